//! `OutcomeAssetTypeResolver`: derives the canonical asset-type tag for an
//! outcome-id.

/// "drake-album" ↦ "DRAKE_ALBUM"; blank input ↦ "OUTCOME_UNKNOWN".
pub fn resolve_asset_type(outcome_id: &str) -> String {
    let trimmed = outcome_id.trim();
    if trimmed.is_empty() {
        return "OUTCOME_UNKNOWN".to_string();
    }
    trimmed.replace('-', "_").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_hyphens_and_upcases() {
        assert_eq!(resolve_asset_type("drake-album"), "DRAKE_ALBUM");
    }

    #[test]
    fn blank_input_falls_back_to_unknown() {
        assert_eq!(resolve_asset_type(""), "OUTCOME_UNKNOWN");
        assert_eq!(resolve_asset_type("   "), "OUTCOME_UNKNOWN");
    }

    #[test]
    fn is_idempotent_on_already_normalised_input() {
        let once = resolve_asset_type("drake-album");
        let twice = resolve_asset_type(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(resolve_asset_type("  drake-album  "), "DRAKE_ALBUM");
    }
}
