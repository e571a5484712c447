//! Operator-id normalisation.
//!
//! Callers address accounts with free-form operator-id strings. When one
//! already parses as a UUID it is used verbatim; otherwise a deterministic
//! 128-bit id is derived so the same string always resolves to the same
//! surrogate id, in this process or any other.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Resolve a caller-supplied operator-id string to a stable 128-bit id.
pub fn resolve_operator_id(raw: &str) -> Uuid {
    let trimmed = raw.trim();
    if let Ok(parsed) = Uuid::parse_str(trimmed) {
        return parsed;
    }
    let digest = Sha256::digest(trimmed.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_existing_uuid_verbatim() {
        let id = Uuid::new_v4();
        assert_eq!(resolve_operator_id(&id.to_string()), id);
    }

    #[test]
    fn is_stable_across_calls() {
        let a = resolve_operator_id("mm-provider");
        let b = resolve_operator_id("mm-provider");
        assert_eq!(a, b);
    }

    #[test]
    fn trims_whitespace_before_hashing() {
        let a = resolve_operator_id("mm-provider");
        let b = resolve_operator_id("  mm-provider  ");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_resolve_to_distinct_ids() {
        let a = resolve_operator_id("drake");
        let b = resolve_operator_id("kendrick");
        assert_ne!(a, b);
    }
}
