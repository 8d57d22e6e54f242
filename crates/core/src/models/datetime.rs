//! Textual timestamp format used on the wire: `DD-MM-YYYY HH:MM`, UTC, minute precision.
//!
//! An empty string, the string `"null"`, JSON `null` or a missing field all decode to
//! "not set". An unset time renders as [`UNSET_WIRE_TIME`].

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

pub const WIRE_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Rendering of a time that was never set (the first minute of year 1).
pub const UNSET_WIRE_TIME: &str = "01-01-0001 00:00";

pub fn parse_wire_time(value: &str) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() || value == "null" {
        return Ok(None);
    }

    let naive = NaiveDateTime::parse_from_str(value, WIRE_FORMAT)?;
    Ok(Some(Utc.from_utc_datetime(&naive)))
}

pub fn format_wire_time(value: Option<&DateTime<Utc>>) -> String {
    match value {
        Some(time) => time.format(WIRE_FORMAT).to_string(),
        None => UNSET_WIRE_TIME.to_string(),
    }
}

/// Serde adapter for `Option<DateTime<Utc>>` fields. Pair with `#[serde(default)]`.
pub mod optional {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wire_time(value.as_ref()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_wire_time(&raw)
                .map_err(|e| de::Error::custom(format!("invalid time format {e}"))),
            None => Ok(None),
        }
    }
}

/// Serde adapter for `DateTime<Utc>` fields that must always carry a value.
pub mod required {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wire_time(Some(value)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wire_time(&raw)
            .map_err(|e| de::Error::custom(format!("invalid time format {e}")))?
            .ok_or_else(|| de::Error::custom("time is required"))
    }
}
