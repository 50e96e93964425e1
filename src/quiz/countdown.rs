//! Per-question countdown clock
//!
//! Converts wall-clock time into whole-second ticks for the session. Uses
//! tokio's clock so paused-time tests can drive it deterministically.

use std::time::Duration;
use tokio::time::Instant;

/// Second ticker that can be stopped synchronously
#[derive(Debug, Clone)]
pub struct Countdown {
    period: Duration,
    next_tick: Option<Instant>,
}

impl Countdown {
    /// Create a stopped countdown ticking once per `period`
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_tick: None,
        }
    }

    /// Start (or restart) counting from now
    pub fn start(&mut self) {
        self.next_tick = Some(Instant::now() + self.period);
    }

    /// Stop; no tick will be reported until the next `start`
    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Number of whole periods elapsed since the last call
    pub fn due_ticks(&mut self) -> u32 {
        let now = Instant::now();
        let mut due = 0;
        while let Some(next) = self.next_tick {
            if next > now {
                break;
            }
            due += 1;
            self.next_tick = Some(next + self.period);
        }
        due
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
