//! Serde helpers for loosely-typed order documents
//!
//! Order snapshots arrive from the ordering system as plain field maps, so the
//! same field can show up in several encodings:
//! - timestamps as RFC 3339 strings, Unix millis, or `{seconds, nanoseconds}`
//! - table labels as strings or bare numbers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
    Parts {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
}

impl RawTimestamp {
    fn into_datetime<E: serde::de::Error>(self) -> Result<DateTime<Utc>, E> {
        match self {
            Self::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| E::custom(format!("timestamp out of range: {ms}"))),
            Self::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| E::custom(format!("invalid timestamp '{text}': {e}"))),
            Self::Parts {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(seconds, nanoseconds)
                .ok_or_else(|| E::custom(format!("timestamp out of range: {seconds}s"))),
        }
    }
}

/// `Option<DateTime<Utc>>` accepting any supported timestamp encoding,
/// serialized back as Unix millis
pub mod option_timestamp {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => s.serialize_some(&dt.timestamp_millis()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawTimestamp>::deserialize(deserializer)?
            .map(RawTimestamp::into_datetime)
            .transpose()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Integer(i64),
}

/// Optional label that may be sent as a string or a number
pub fn option_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawLabel>::deserialize(deserializer)?.map(|raw| match raw {
            RawLabel::Text(text) => text,
            RawLabel::Integer(n) => n.to_string(),
        }),
    )
}

/// Optional reference id; an empty string counts as absent
pub fn option_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}
