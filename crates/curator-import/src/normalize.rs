use curator_model::{NormalizedItem, Row};

/// Trims every column name and cell, dropping columns whose name is blank.
///
/// When two columns trim to the same name the later one wins.
pub fn normalize(row: &Row) -> NormalizedItem {
    row.iter()
        .filter_map(|(column, value)| {
            let name = column.trim();
            (!name.is_empty()).then(|| (name, value.trim()))
        })
        .collect()
}
