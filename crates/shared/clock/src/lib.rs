//! Meridian Clock Infrastructure
//!
//! Time sources for production and tests. Each clock implements both
//! [`Clock`] (reading time) and [`Sleeper`] (waiting), so cooldowns and
//! retry delays always follow the clock the engine reads.
//!
//! ```text
//! SystemClock  wall time, tokio::time::sleep
//! ManualClock  frozen time; advance()/set_time(), sleep() jumps forward
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use meridian_clock::{ManualClock, Clock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::new(start);
//! clock.advance(Duration::minutes(5));
//! assert_eq!(clock.now(), start + Duration::minutes(5));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the ports for convenience
pub use meridian_ports::{Clock, Sleeper};
