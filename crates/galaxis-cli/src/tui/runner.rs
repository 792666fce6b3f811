use std::time::Instant;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal runtime for an [`App`].
///
/// The loop sleeps until the app's deadline or the next terminal event,
/// whichever comes first. There is no fixed frame rate.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets when `App::update` runs next; `None` waits for input only.
    ///
    /// Replaces any deadline set before.
    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.events.set_deadline(deadline);
    }

    /// Takes over the terminal and drives `app` until it asks to exit.
    ///
    /// `app.init()` sets the first deadline. Once that instant passes the app
    /// gets a single `update()` and must set a new deadline itself. Key and
    /// resize events go to `handle_event()`, and the screen is redrawn after
    /// each update or event. The terminal is restored on return, including
    /// on error.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            log::debug!("event loop finished");
            Ok(())
        })
    }
}
