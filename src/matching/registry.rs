//! `OutcomeRegistry`: the set of outcome-ids the matching engine will
//! accept orders for. Tolerantly optional — a `None` registry at the
//! `MatchingEngine` accepts everything.

use dashmap::DashSet;

pub struct OutcomeRegistry {
    outcomes: DashSet<String>,
}

impl Default for OutcomeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeRegistry {
    pub fn new() -> Self {
        Self {
            outcomes: DashSet::new(),
        }
    }

    fn key(outcome_id: &str) -> String {
        outcome_id.trim().to_ascii_lowercase()
    }

    pub fn register(&self, outcome_id: &str) {
        self.outcomes.insert(Self::key(outcome_id));
    }

    /// Registers both legs of a binary market: `<baseId>-yes` and
    /// `<baseId>-no`.
    pub fn register_binary_market(&self, base_id: &str) {
        let base = base_id.trim();
        self.register(&format!("{base}-yes"));
        self.register(&format!("{base}-no"));
    }

    pub fn contains(&self, outcome_id: &str) -> bool {
        self.outcomes.contains(&Self::key(outcome_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_binary_market_adds_both_legs() {
        let registry = OutcomeRegistry::new();
        registry.register_binary_market("drake-album");
        assert!(registry.contains("drake-album-yes"));
        assert!(registry.contains("drake-album-no"));
        assert!(!registry.contains("drake-album"));
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let registry = OutcomeRegistry::new();
        registry.register("Outcome-X");
        assert!(registry.contains("outcome-x"));
        assert!(registry.contains("OUTCOME-X"));
    }
}
