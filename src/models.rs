use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub date_read: NaiveDate,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub book_title: String,
    pub quote: String,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
