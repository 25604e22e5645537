use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Set on the fallback snapshot derived from the public events feed.
pub(crate) const EVENTS_NOTE: &str = "基于最近30天的事件数据";

/// Reported when neither remote source nor the cache produced any data.
pub(crate) const ALL_SOURCES_FAILED: &str = "无法获取GitHub贡献数据";

/// One calendar day of attributable activity. `weekday` is 0=Sunday..6=Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(with = "date_format")]
    pub date: Date,
    pub count: u32,
    pub weekday: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    pub total: u64,
    pub daily: Vec<DayRecord>,
    pub weeks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The envelope served to clients and persisted verbatim to the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributions: Option<Contributions>,
    #[serde(with = "stamp_format")]
    pub last_updated: PrimitiveDateTime,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Snapshot {
    pub fn fetched(contributions: Contributions, username: &str, now: OffsetDateTime) -> Self {
        Self {
            contributions: Some(contributions),
            last_updated: utc_stamp(now),
            username: username.to_string(),
            error: None,
        }
    }

    pub fn failed(username: &str, now: OffsetDateTime) -> Self {
        Self {
            contributions: None,
            last_updated: utc_stamp(now),
            username: username.to_string(),
            error: Some(ALL_SOURCES_FAILED.to_string()),
        }
    }

    /// Whether there is at least one daily record to serve or render.
    pub fn has_records(&self) -> bool {
        self.contributions
            .as_ref()
            .is_some_and(|c| !c.daily.is_empty())
    }
}

pub(crate) fn utc_stamp(now: OffsetDateTime) -> PrimitiveDateTime {
    let utc = now.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}

/// `[year]-[month]-[day]`, the date format used on the wire and in the cache.
pub mod date_format {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(FORMAT).map_err(ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, FORMAT).map_err(de::Error::custom)
    }
}

/// `[year]-[month]-[day] [hour]:[minute]:[second]`, the `last_updated` format.
pub mod stamp_format {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

    const FORMAT: &[BorrowedFormatItem<'_>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    pub fn serialize<S: Serializer>(
        stamp: &PrimitiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let formatted = stamp.format(FORMAT).map_err(ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PrimitiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PrimitiveDateTime::parse(&raw, FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn envelope_wire_format() {
        let snapshot = Snapshot {
            contributions: Some(Contributions {
                total: 3,
                daily: vec![DayRecord {
                    date: date!(2024 - 03 - 15),
                    count: 3,
                    weekday: 5,
                }],
                weeks: 1,
                note: None,
            }),
            last_updated: datetime!(2024-03-15 08:30:00),
            username: "octocat".to_string(),
            error: None,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["last_updated"], "2024-03-15 08:30:00");
        assert_eq!(json["username"], "octocat");
        assert_eq!(json["contributions"]["daily"][0]["date"], "2024-03-15");
        assert!(json.get("error").is_none());

        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn empty_contributions_is_not_records() {
        let snapshot = Snapshot {
            contributions: Some(Contributions {
                total: 0,
                daily: vec![],
                weeks: 0,
                note: None,
            }),
            last_updated: datetime!(2024-03-15 08:30:00),
            username: "octocat".to_string(),
            error: None,
        };
        assert!(!snapshot.has_records());
        assert!(!Snapshot::failed("octocat", datetime!(2024-03-15 08:30:00 UTC)).has_records());
    }
}
