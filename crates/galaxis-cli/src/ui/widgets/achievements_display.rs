use galaxis_engine::Achievement;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// One line per achievement: icon and name, dimmed while locked.
#[derive(Debug)]
pub struct AchievementsDisplay<'a> {
    achievements: &'a [Achievement],
    block: Option<BlockWidget<'a>>,
}

impl<'a> AchievementsDisplay<'a> {
    pub fn new(achievements: &'a [Achievement]) -> Self {
        Self {
            achievements,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.achievements.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn line(achievement: &Achievement) -> Line<'_> {
        let style = if achievement.unlocked {
            style::UNLOCKED
        } else {
            style::LOCKED
        };
        Line::from(vec![
            Span::styled(achievement.icon.as_str(), style),
            Span::styled(" ", style),
            Span::styled(achievement.name.as_str(), style),
        ])
    }
}

impl Widget for AchievementsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (achievement, row) in self.achievements.iter().zip(area.rows()) {
            Self::line(achievement).render(row, buf);
        }
    }
}
