use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{validate_tle_format, ValidationError};

const UNKNOWN_NAME: &str = "Unknown";

/// A validated two-line element set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitalElementSet {
    line1: String,
    line2: String,
}

impl OrbitalElementSet {
    pub fn new(line1: &str, line2: &str) -> Result<Self, ValidationError> {
        let (line1, line2) = validate_tle_format(line1, line2)?;
        Ok(Self { line1, line2 })
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn line2(&self) -> &str {
        &self.line2
    }

    /// Name fallback cut from columns 3-23 of line 1.
    pub fn designator_name(&self) -> String {
        match self.line1.get(2..23) {
            Some(slice) if self.line1.len() > 23 => slice.trim().to_string(),
            _ => UNKNOWN_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SatelliteIdentity {
    pub norad_id: u32,
    pub name: String,
    pub elements: OrbitalElementSet,
}

/// One search hit, normalized from whatever field names the catalog used.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CatalogEntry {
    pub norad_id: u32,
    pub name: String,
    pub object_type: String,
    pub country: String,
    pub launch_date: String,
}

/// Result of a catalog search. Callers decide whether an unreachable or
/// malformed catalog counts as "no results".
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(Vec<CatalogEntry>),
    Unreachable(String),
    Malformed(String),
}

impl SearchOutcome {
    /// Collapses failures into an empty result, logging the reason.
    pub fn into_entries(self, query: &str) -> Vec<CatalogEntry> {
        match self {
            SearchOutcome::Found(entries) => entries,
            SearchOutcome::Unreachable(reason) => {
                log::warn!("catalog search for '{}' failed: {}", query, reason);
                Vec::new()
            }
            SearchOutcome::Malformed(reason) => {
                log::warn!("catalog search for '{}' returned bad data: {}", query, reason);
                Vec::new()
            }
        }
    }
}

/// Catalog numbers arrive either as JSON numbers or as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum CatalogNumber {
    Number(i64),
    Text(String),
}

impl CatalogNumber {
    fn as_id(&self) -> Option<u32> {
        let value = match self {
            CatalogNumber::Number(n) => *n,
            CatalogNumber::Text(s) => s.trim().parse().ok()?,
        };
        u32::try_from(value).ok().filter(|id| *id > 0)
    }
}

/// A raw SATCAT record. Different endpoints use different names for the
/// same fields, so every alias is kept until [`SatcatRecord::into_entry`].
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SatcatRecord {
    #[serde(rename = "CATNR")]
    catnr: Option<CatalogNumber>,
    #[serde(rename = "NORAD_CAT_ID")]
    norad_cat_id: Option<CatalogNumber>,
    #[serde(rename = "OBJECT_NAME")]
    object_name: Option<String>,
    #[serde(rename = "NAME")]
    name: Option<String>,
    #[serde(rename = "OBJECT_TYPE")]
    object_type: Option<String>,
    #[serde(rename = "COUNTRY")]
    country: Option<String>,
    #[serde(rename = "OWNER")]
    owner: Option<String>,
    #[serde(rename = "LAUNCH_DATE")]
    launch_date: Option<String>,
}

impl SatcatRecord {
    /// Returns `None` for records without a usable catalog number.
    pub(crate) fn into_entry(self) -> Option<CatalogEntry> {
        let norad_id = [self.catnr.as_ref(), self.norad_cat_id.as_ref()]
            .into_iter()
            .flatten()
            .find_map(CatalogNumber::as_id)?;

        Some(CatalogEntry {
            norad_id,
            name: first_non_empty([self.object_name, self.name])
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            object_type: self.object_type.unwrap_or_default(),
            country: first_non_empty([self.country, self.owner]).unwrap_or_default(),
            launch_date: self.launch_date.unwrap_or_default(),
        })
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ISS_LINE1, ISS_LINE2};

    fn record(json: &str) -> SatcatRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn designator_name_from_line1() {
        let elements = OrbitalElementSet::new(ISS_LINE1, ISS_LINE2).unwrap();
        assert_eq!(elements.designator_name(), "25544U 98067A   20194");
    }

    #[test]
    fn element_set_rejects_bad_shape() {
        assert!(OrbitalElementSet::new(ISS_LINE2, ISS_LINE1).is_err());
        assert!(OrbitalElementSet::new("1 short", ISS_LINE2).is_err());
    }

    #[test]
    fn record_with_catnr_and_object_name() {
        let entry = record(
            r#"{"CATNR": 25544, "OBJECT_NAME": "ISS (ZARYA)", "OBJECT_TYPE": "PAY",
                "COUNTRY": "ISS", "LAUNCH_DATE": "1998-11-20"}"#,
        )
        .into_entry()
        .unwrap();
        assert_eq!(
            entry,
            CatalogEntry {
                norad_id: 25544,
                name: "ISS (ZARYA)".to_string(),
                object_type: "PAY".to_string(),
                country: "ISS".to_string(),
                launch_date: "1998-11-20".to_string(),
            }
        );
    }

    #[test]
    fn record_with_alias_fields() {
        let entry = record(r#"{"NORAD_CAT_ID": "54234", "NAME": "NOAA 21", "OWNER": "US"}"#)
            .into_entry()
            .unwrap();
        assert_eq!(entry.norad_id, 54234);
        assert_eq!(entry.name, "NOAA 21");
        assert_eq!(entry.country, "US");
        assert_eq!(entry.object_type, "");
    }

    #[test]
    fn empty_primary_field_falls_back_to_alias() {
        let entry = record(r#"{"CATNR": "", "NORAD_CAT_ID": 43013, "OBJECT_NAME": ""}"#)
            .into_entry()
            .unwrap();
        assert_eq!(entry.norad_id, 43013);
        assert_eq!(entry.name, "Unknown");
    }

    #[test]
    fn record_without_id_is_dropped() {
        assert!(record(r#"{"OBJECT_NAME": "MYSTERY"}"#).into_entry().is_none());
        assert!(record(r#"{"CATNR": "abc"}"#).into_entry().is_none());
        assert!(record(r#"{"CATNR": null}"#).into_entry().is_none());
    }
}
