//! Serde adapters for `std::time::Duration` fields written as ISO 8601
//! durations.
//!
//! ```ignore
//! #[derive(Deserialize, Serialize)]
//! struct Retention {
//!     #[serde(with = "isodur_common::serde_iso8601")]
//!     keep_for: std::time::Duration,
//! }
//! ```
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

use crate::duration::{parse_to_elapsed, IsoDuration};

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&IsoDuration::from_elapsed(*duration))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let duration_str = String::deserialize(deserializer)?;
    parse_to_elapsed(&duration_str).map_err(serde::de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.collect_str(&IsoDuration::from_elapsed(*d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| parse_to_elapsed(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Schedule {
        #[serde(with = "crate::serde_iso8601")]
        interval: Duration,
        #[serde(default, with = "crate::serde_iso8601::option")]
        grace: Option<Duration>,
    }

    #[test]
    fn test_deserialize_fields() {
        let schedule: Schedule =
            serde_json::from_str(r#"{"interval": "P1W", "grace": "PT30M"}"#).unwrap();
        assert_eq!(schedule.interval, Duration::from_secs(7 * 24 * 3600));
        assert_eq!(schedule.grace, Some(Duration::from_secs(1800)));

        let schedule: Schedule = serde_json::from_str(r#"{"interval": "PT1S"}"#).unwrap();
        assert_eq!(schedule.grace, None);
    }

    #[test]
    fn test_serialize_uses_day_form() {
        let schedule = Schedule {
            interval: Duration::from_secs(7 * 24 * 3600),
            grace: Some(Duration::from_secs(90)),
        };
        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(json, r#"{"interval":"P7D","grace":"PT1M30S"}"#);
    }

    #[test]
    fn test_deserialize_rejects_month() {
        let result = serde_json::from_str::<Schedule>(r#"{"interval": "P1M"}"#);
        assert!(result.is_err());
    }
}
