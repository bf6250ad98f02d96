use super::client::{excerpt, Catalog};
use super::error::CatalogError;
use super::types::{CatalogEntry, OrbitalElementSet, SatelliteIdentity};
use crate::validation::validate_norad_id;

const MISSING_DATA_HINT: &str =
    "no element data available, the satellite may have decayed or the NORAD ID may be wrong";

/// Resolves a name or catalog number to a satellite with current elements.
///
/// A numeric identifier is used as the catalog number directly. Anything
/// else goes through a single-result catalog search; the first match wins.
pub async fn resolve(
    catalog: &dyn Catalog,
    identifier: &str,
) -> Result<SatelliteIdentity, CatalogError> {
    let identifier = identifier.trim();

    let (norad_id, search_name) = match identifier.parse::<i64>() {
        Ok(id) => (validate_norad_id(id)?, None),
        Err(_) => {
            let entry = catalog
                .search(identifier, 1)
                .await
                .into_entries(identifier)
                .into_iter()
                .next()
                .ok_or_else(|| CatalogError::NotFound(identifier.to_string()))?;
            (validate_norad_id(i64::from(entry.norad_id))?, Some(entry.name))
        }
    };

    let text = catalog.fetch_elements(norad_id).await?;
    let (name_line, elements) = parse_elements_response(norad_id, &text)?;

    let name = name_line
        .or(search_name)
        .unwrap_or_else(|| elements.designator_name());

    log::info!("resolved '{}' to {} ({})", identifier, name, norad_id);

    Ok(SatelliteIdentity {
        norad_id,
        name,
        elements,
    })
}

/// Splits a GP element response into an optional name line and the two
/// element lines.
pub fn parse_elements_response(
    norad_id: u32,
    text: &str,
) -> Result<(Option<String>, OrbitalElementSet), CatalogError> {
    let invalid = |message: String| CatalogError::InvalidElements { norad_id, message };

    let lower = text.to_lowercase();
    if lower.contains("no gp data found") || lower.contains("not found") {
        return Err(invalid(MISSING_DATA_HINT.to_string()));
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let (name, line1, line2) = match lines.as_slice() {
        [name, line1, line2, ..] => {
            let name = name.strip_prefix("0 ").unwrap_or(*name).trim();
            (Some(name.to_string()).filter(|n| !n.is_empty()), *line1, *line2)
        }
        [line1, line2] => (None, *line1, *line2),
        _ => {
            return Err(invalid(format!(
                "expected at least 2 lines, got {}: {}",
                lines.len(),
                excerpt(text)
            )))
        }
    };

    let elements = OrbitalElementSet::new(line1, line2)?;
    Ok((name, elements))
}

/// Name search with the default failure policy: an unreachable or
/// misbehaving catalog yields no results.
pub async fn search(catalog: &dyn Catalog, query: &str, limit: usize) -> Vec<CatalogEntry> {
    catalog.search(query, limit).await.into_entries(query)
}
