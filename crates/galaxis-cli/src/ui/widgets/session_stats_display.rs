use std::iter;

use galaxis_engine::SessionSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

pub struct SessionStatsDisplay<'a> {
    snapshot: &'a SessionSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(snapshot: &'a SessionSnapshot) -> Self {
        Self {
            snapshot,
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
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&SessionSnapshot) -> String),
    LabelValue(&'static str, &'static dyn Fn(&SessionSnapshot) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|snapshot| snapshot.score.to_string()),
    Row::FullLabel("HIGH SCORE:"),
    Row::FullValue(&|snapshot| snapshot.high_score.max(snapshot.score).to_string()),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|snapshot| snapshot.level.to_string()),
    Row::LabelValue("LINES:", &|snapshot| snapshot.lines.to_string()),
    Row::Empty,
    Row::LabelValue("GALAXY PTS:", &|snapshot| snapshot.galaxy_points.to_string()),
    Row::LabelValue("TETRISES:", &|snapshot| snapshot.tetris_count.to_string()),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(3),
                        Constraint::Fill(2),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
