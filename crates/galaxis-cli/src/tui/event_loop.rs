use std::time::Instant;

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Ticks are not periodic: the application sets the instant it next needs
/// to be woken up and gets exactly one `Tick` once that instant has passed.
/// Without a deadline the loop only waits for terminal events. The screen is
/// redrawn after every tick or terminal event.
#[derive(Debug)]
pub(super) struct EventLoop {
    deadline: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with no deadline.
    pub fn new() -> Self {
        Self {
            deadline: None,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the instant of the next `Tick`.
    ///
    /// Pass `None` to disable tick events.
    pub(super) fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
    }

    /// Returns the next event.
    ///
    /// Blocks until the deadline is reached or a crossterm event occurs.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(deadline) = self.deadline
                && now >= deadline
            {
                self.deadline = None;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(deadline) = self.deadline
                && !event::poll(deadline.saturating_duration_since(now))?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
