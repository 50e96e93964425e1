//! Quiz session module
//!
//! The session state machine and the countdown that drives its timeouts.

pub mod countdown;
pub mod session;

pub use countdown::Countdown;
pub use session::{Outcome, QuizSession, SessionState};
