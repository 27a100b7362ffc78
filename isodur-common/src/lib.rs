pub mod duration;
pub mod serde_iso8601;
pub mod error;

pub use duration::{
    format, from_elapsed, parse, parse_duration, parse_to_elapsed, to_elapsed, ElapsedTime,
    IsoDuration,
};
pub use error::{ConfigError, DurationError, ErrorReporting, IsodurError, Result};
