use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode};
use galaxis_engine::{Action, GameEvent, GameSession, KeyValueStore, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, Tui},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

/// How long a notice stays under the board.
const TOAST_DURATION: Duration = Duration::from_secs(2);

const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "a"], "Left"),
    (&["→", "d"], "Right"),
    (&["↑", "w", "x"], "Rotate"),
    (&["↓", "s"], "Soft Drop"),
    (&["Space"], "Hard Drop"),
    (&["p", "Esc"], "Pause"),
    (&["r"], "Restart"),
    (&["q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[
    (&["p", "Esc", "Enter"], "Resume"),
    (&["r"], "Restart"),
    (&["q"], "Quit"),
];
const IDLE_KEYS: &[KeyBinding] = &[(&["Enter"], "Start"), (&["q"], "Quit")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Game(Action),
    Start,
    Quit,
}

fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Left | KeyCode::Char('a') => Command::Game(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Command::Game(Action::MoveRight),
        KeyCode::Up | KeyCode::Char('w' | 'x') => Command::Game(Action::Rotate),
        KeyCode::Down | KeyCode::Char('s') => Command::Game(Action::SoftDrop),
        KeyCode::Char(' ') => Command::Game(Action::HardDrop),
        KeyCode::Char('p') | KeyCode::Esc => Command::Game(Action::TogglePause),
        KeyCode::Char('r') => Command::Game(Action::Restart),
        KeyCode::Enter => Command::Start,
        KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[derive(Debug)]
struct Toast {
    text: String,
    until: Duration,
}

/// Interactive game screen.
///
/// Session time is the wall-clock time elapsed since the app was created.
#[derive(Debug)]
pub struct PlayApp<S> {
    session: GameSession<S>,
    clock: Instant,
    toast: Option<Toast>,
    is_exiting: bool,
}

impl<S> PlayApp<S>
where
    S: KeyValueStore,
{
    pub fn new(session: GameSession<S>) -> Self {
        Self {
            session,
            clock: Instant::now(),
            toast: None,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    fn now(&self) -> Duration {
        self.clock.elapsed()
    }

    fn run_command(&mut self, command: Command, now: Duration) {
        match command {
            Command::Game(action) => {
                if let Err(e) = self.session.apply(action, now) {
                    log::trace!("{action:?} ignored: {e}");
                }
            }
            Command::Start => self.session.start(now),
            Command::Quit => {
                self.session.end_game();
                self.is_exiting = true;
            }
        }
    }

    /// Turns session events into notices.
    fn collect_events(&mut self, now: Duration) {
        for event in self.session.drain_events() {
            let text = match event {
                GameEvent::AchievementUnlocked(id) => self
                    .session
                    .achievements()
                    .into_iter()
                    .find(|achievement| achievement.id == id)
                    .map(|a| format!("{} {} unlocked! +{}", a.icon, a.name, a.points)),
                GameEvent::LevelUp(level) => Some(format!("Level {level}")),
                GameEvent::LinesCleared(4) => Some("TETRIS!".to_owned()),
                _ => None,
            };
            if let Some(text) = text {
                self.toast = Some(Toast {
                    text,
                    until: now + TOAST_DURATION,
                });
            }
        }
        if self.toast.as_ref().is_some_and(|toast| toast.until <= now) {
            self.toast = None;
        }
    }

    /// Earliest of the next automatic drop and the toast expiry.
    fn next_wakeup(&self) -> Option<Duration> {
        let toast = self.toast.as_ref().map(|toast| toast.until);
        match (self.session.next_deadline(), toast) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn sync_deadline(&mut self, tui: &mut Tui, now: Duration) {
        self.collect_events(now);
        tui.set_deadline(self.next_wakeup().map(|d| self.clock + d));
    }
}

impl<S> App for PlayApp<S>
where
    S: KeyValueStore,
{
    fn init(&mut self, tui: &mut Tui) {
        let now = self.now();
        self.sync_deadline(tui, now);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Some(key) = event.as_key_press_event()
            && let Some(command) = command_for_key(key.code)
        {
            let now = self.now();
            self.run_command(command, now);
            self.sync_deadline(tui, now);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();
        let toast = self.toast.as_ref().map(|toast| toast.text.as_str());
        let bindings = match snapshot.state {
            SessionState::Active => PLAYING_KEYS,
            SessionState::Paused => PAUSED_KEYS,
            SessionState::Idle | SessionState::GameOver => IDLE_KEYS,
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(24), Constraint::Length(2)])
                .areas::<2>(frame.area());
        frame.render_widget(SessionDisplay::new(&snapshot).toast(toast), main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        let now = self.now();
        self.session.advance(now);
        self.sync_deadline(tui, now);
    }
}
