use std::time::Duration;

/// Fastest automatic drop period.
pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(100);

/// Automatic drop period at `level`.
///
/// Starts at one second on level 1 and speeds up by 100ms per level, floored
/// at [`MIN_DROP_INTERVAL`].
#[must_use]
pub fn drop_interval(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let millis = 1000_u64.saturating_sub(steps.saturating_mul(100));
    Duration::from_millis(millis).max(MIN_DROP_INTERVAL)
}

/// Schedules the automatic drop ticks of a session.
///
/// The timer works on caller-supplied timestamps, so it never sleeps and
/// never reads a clock. A running timer has an *anchor* (the time it was
/// armed or last fired) and a period; its next deadline is
/// `anchor + period`. A stopped timer has no deadline at all.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use galaxis_engine::DropTimer;
///
/// let ms = Duration::from_millis;
/// let mut timer = DropTimer::new();
/// timer.start(ms(0), ms(1000));
///
/// assert!(!timer.poll(ms(999)));
/// assert!(timer.poll(ms(1000)));
/// assert_eq!(timer.next_deadline(), Some(ms(2000)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropTimer {
    period: Duration,
    anchor: Option<Duration>,
}

impl DropTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            period: Duration::ZERO,
            anchor: None,
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Arms the timer so that it first fires at `now + period`.
    pub fn start(&mut self, now: Duration, period: Duration) {
        self.period = period.max(MIN_DROP_INTERVAL);
        self.anchor = Some(now);
    }

    /// Disarms the timer. Pending ticks are discarded.
    pub fn stop(&mut self) {
        self.anchor = None;
    }

    /// Swaps the period while keeping the anchor.
    ///
    /// The pending deadline moves to `anchor + period`; it is never dropped
    /// nor fired twice.
    pub fn reschedule(&mut self, period: Duration) {
        self.period = period.max(MIN_DROP_INTERVAL);
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.anchor.map(|anchor| anchor + self.period)
    }

    /// Consumes one due tick.
    ///
    /// Returns `true` and advances the anchor to the consumed deadline when
    /// the next deadline is at or before `now`. Call repeatedly to catch up
    /// on several missed ticks.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.next_deadline() {
            Some(deadline) if deadline <= now => {
                self.anchor = Some(deadline);
                true
            }
            _ => false,
        }
    }
}
