use curator_model::{NormalizedItem, SkipReason};

/// Returns the item's key value, or the reason the item cannot be written.
pub fn validate<'a>(item: &'a NormalizedItem, key_field: &str) -> Result<&'a str, SkipReason> {
    match item.get(key_field) {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(SkipReason::MissingKeyField {
            field: key_field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, &str)]) -> NormalizedItem {
        pairs.iter().copied().collect()
    }

    #[test]
    fn accepts_present_key() {
        let item = item(&[("AssetTag", "A1"), ("Owner", "Bob")]);
        assert_eq!(validate(&item, "AssetTag"), Ok("A1"));
    }

    #[test]
    fn rejects_absent_key() {
        let item = item(&[("Owner", "Carol")]);
        assert_eq!(
            validate(&item, "AssetTag"),
            Err(SkipReason::MissingKeyField {
                field: "AssetTag".to_string()
            })
        );
    }

    #[test]
    fn rejects_blank_key() {
        let item = item(&[("AssetTag", ""), ("Owner", "Carol")]);
        assert!(validate(&item, "AssetTag").is_err());
    }

    #[test]
    fn key_lookup_is_case_sensitive() {
        let item = item(&[("assettag", "A1")]);
        assert!(validate(&item, "AssetTag").is_err());
    }
}
