use std::collections::BTreeMap;

use crate::config::DatasetConfig;
use crate::error::LinkError;
use crate::model::{Side, SourceRecord};

/// Parse one dataset's CSV text into records using the configured column mapping.
///
/// An empty name cell is treated as an absent name. Unmapped columns are kept
/// in `extra` until the sanitizer drops them.
pub fn load_csv_records(
    side: Side,
    csv_data: &str,
    dataset: &DatasetConfig,
) -> Result<Vec<SourceRecord>, LinkError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LinkError::csv(Some(side), e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let col = &dataset.columns;

    let idx = |name: &str| -> Result<usize, LinkError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LinkError::MissingColumn {
                side,
                column: name.into(),
            })
    };

    let id_idx = idx(&col.id)?;
    let name_idx = idx(&col.name)?;
    let address_idx = idx(&col.address)?;
    let city_idx = idx(&col.city)?;
    let state_idx = idx(&col.state)?;
    let postal_idx = idx(&col.postal)?;
    let mapped = [id_idx, name_idx, address_idx, city_idx, state_idx, postal_idx];

    let mut records = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| LinkError::csv(Some(side), e))?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();

        let name = record
            .get(name_idx)
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string);

        let extra: BTreeMap<String, String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !mapped.contains(i))
            .filter_map(|(i, h)| record.get(i).map(|v| (h.clone(), v.to_string())))
            .collect();

        records.push(SourceRecord {
            side,
            id: field(id_idx),
            name,
            address: field(address_idx),
            city: field(city_idx),
            state: field(state_idx),
            postal: field(postal_idx),
            extra,
        });
    }

    Ok(records)
}
