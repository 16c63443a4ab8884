//! End-of-life feed data model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

/// A feed field that is either a date or a boolean flag.
///
/// - `Date`: becomes true on that date
/// - `Flag(true)`: already true, no date recorded
/// - `Flag(false)` / `Unknown`: not known to be true
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateOrFlag {
    #[default]
    Unknown,
    /// Raw date string as sent by the feed; parsed on evaluation
    Date(String),
    Flag(bool),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDateOrFlag {
    Flag(bool),
    Date(String),
}

impl<'de> Deserialize<'de> for DateOrFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawDateOrFlag>::deserialize(deserializer)? {
            None => DateOrFlag::Unknown,
            Some(RawDateOrFlag::Flag(flag)) => DateOrFlag::Flag(flag),
            Some(RawDateOrFlag::Date(date)) => DateOrFlag::Date(date),
        })
    }
}

impl Serialize for DateOrFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DateOrFlag::Unknown => serializer.serialize_none(),
            DateOrFlag::Date(date) => serializer.serialize_str(date),
            DateOrFlag::Flag(flag) => serializer.serialize_bool(*flag),
        }
    }
}

impl DateOrFlag {
    /// Evaluate the field as of `today`.
    ///
    /// Unparsable dates evaluate to [`EolStatus::Supported`].
    pub fn status_at(&self, today: NaiveDate) -> EolStatus {
        match self {
            DateOrFlag::Date(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) if today >= date => EolStatus::EndOfLife { since: raw.clone() },
                Ok(_) => EolStatus::Supported,
                Err(e) => {
                    warn!("Ignoring unparsable date {:?}: {}", raw, e);
                    EolStatus::Supported
                }
            },
            DateOrFlag::Flag(true) => EolStatus::EndOfLife {
                since: "true".to_string(),
            },
            DateOrFlag::Flag(false) | DateOrFlag::Unknown => EolStatus::Supported,
        }
    }
}

/// Result of an end-of-life check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EolStatus {
    Supported,
    /// `since` is the EOL date, or `"true"` when the feed gives no date
    EndOfLife { since: String },
}

impl EolStatus {
    pub fn is_eol(&self) -> bool {
        matches!(self, EolStatus::EndOfLife { .. })
    }

    /// The EOL date (or `"true"`), empty when supported.
    pub fn since(&self) -> &str {
        match self {
            EolStatus::Supported => "",
            EolStatus::EndOfLife { since } => since,
        }
    }
}

/// One runtime release line as published by the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub cycle: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub eol: DateOrFlag,
    #[serde(default, rename = "latest")]
    pub latest_patch: Option<String>,
    #[serde(default)]
    pub latest_release_date: Option<String>,
    #[serde(default, rename = "lts", deserialize_with = "deserialize_lts")]
    pub is_lts: bool,
    #[serde(default)]
    pub support: DateOrFlag,
}

/// Some products publish an LTS start date instead of a flag.
fn deserialize_lts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match DateOrFlag::deserialize(deserializer)? {
        DateOrFlag::Flag(flag) => flag,
        DateOrFlag::Date(_) => true,
        DateOrFlag::Unknown => false,
    })
}

impl CatalogEntry {
    pub fn eol_status(&self, today: NaiveDate) -> EolStatus {
        self.eol.status_at(today)
    }

    /// Whether active (bugfix) support has ended, as opposed to security support.
    pub fn active_support_ended(&self, today: NaiveDate) -> bool {
        self.support.status_at(today).is_eol()
    }
}

/// Feed snapshot, in feed order
pub type Catalog = Vec<CatalogEntry>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[rstest]
    #[case(json!("2024-10-07"), DateOrFlag::Date("2024-10-07".to_string()))]
    #[case(json!(true), DateOrFlag::Flag(true))]
    #[case(json!(false), DateOrFlag::Flag(false))]
    #[case(json!(null), DateOrFlag::Unknown)]
    fn date_or_flag_deserializes_every_shape(
        #[case] value: serde_json::Value,
        #[case] expected: DateOrFlag,
    ) {
        assert_eq!(serde_json::from_value::<DateOrFlag>(value).unwrap(), expected);
    }

    #[test]
    fn date_or_flag_rejects_numbers() {
        assert!(serde_json::from_value::<DateOrFlag>(json!(2024)).is_err());
    }

    #[rstest]
    #[case(DateOrFlag::Date("2024-10-07".to_string()), EolStatus::EndOfLife { since: "2024-10-07".to_string() })]
    #[case(DateOrFlag::Date("2025-06-01".to_string()), EolStatus::EndOfLife { since: "2025-06-01".to_string() })]
    #[case(DateOrFlag::Date("2029-10-31".to_string()), EolStatus::Supported)]
    #[case(DateOrFlag::Date("not-a-date".to_string()), EolStatus::Supported)]
    #[case(DateOrFlag::Flag(true), EolStatus::EndOfLife { since: "true".to_string() })]
    #[case(DateOrFlag::Flag(false), EolStatus::Supported)]
    #[case(DateOrFlag::Unknown, EolStatus::Supported)]
    fn status_at_evaluates_each_variant(#[case] field: DateOrFlag, #[case] expected: EolStatus) {
        assert_eq!(field.status_at(today()), expected);
    }

    #[test]
    fn catalog_entry_deserializes_feed_object() {
        let entry: CatalogEntry = serde_json::from_value(json!({
            "cycle": "3.12",
            "releaseDate": "2023-10-02",
            "eol": "2028-10-31",
            "latest": "3.12.7",
            "latestReleaseDate": "2024-10-01",
            "lts": false,
            "support": "2025-04-02"
        }))
        .unwrap();

        assert_eq!(
            entry,
            CatalogEntry {
                cycle: "3.12".to_string(),
                release_date: Some("2023-10-02".to_string()),
                eol: DateOrFlag::Date("2028-10-31".to_string()),
                latest_patch: Some("3.12.7".to_string()),
                latest_release_date: Some("2024-10-01".to_string()),
                is_lts: false,
                support: DateOrFlag::Date("2025-04-02".to_string()),
            }
        );
        assert!(!entry.eol_status(today()).is_eol());
        assert!(entry.active_support_ended(today()));
    }

    #[test]
    fn catalog_entry_uses_defaults_for_missing_fields() {
        let entry: CatalogEntry = serde_json::from_value(json!({ "cycle": "3.14" })).unwrap();

        assert_eq!(entry.eol, DateOrFlag::Unknown);
        assert_eq!(entry.support, DateOrFlag::Unknown);
        assert!(!entry.is_lts);
        assert_eq!(entry.latest_patch, None);
    }

    #[test]
    fn catalog_entry_treats_lts_date_as_lts() {
        let entry: CatalogEntry =
            serde_json::from_value(json!({ "cycle": "20", "lts": "2023-10-24" })).unwrap();
        assert!(entry.is_lts);
    }

    #[test]
    fn eol_status_accessors() {
        let eol = EolStatus::EndOfLife {
            since: "true".to_string(),
        };
        assert!(eol.is_eol());
        assert_eq!(eol.since(), "true");
        assert!(!EolStatus::Supported.is_eol());
        assert_eq!(EolStatus::Supported.since(), "");
    }
}
