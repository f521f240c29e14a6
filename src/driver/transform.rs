use std::collections::HashSet;

use super::model::{DriverRecord, RawDriverRow, DRIVER_ROLE};

/// Drops rows with any NULL, drops exact duplicates (first one wins) and
/// stamps the driver role on what is left. Input order is preserved.
pub fn clean(rows: Vec<RawDriverRow>) -> Vec<DriverRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(rows.len());

    rows.into_iter()
        .filter_map(|row| match row {
            RawDriverRow {
                chapa: Some(chapa),
                nome: Some(nome),
            } => Some((chapa, nome)),
            _ => None,
        })
        .filter(|key| seen.insert(key.clone()))
        .map(|(chapa, nome)| DriverRecord {
            chapa,
            nome,
            cargo: DRIVER_ROLE.to_string(),
        })
        .collect()
}
