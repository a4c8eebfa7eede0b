//! Write and delete condition building.
//!
//! A supplied version token always expresses "only act if nothing changed
//! since I last observed this value" and takes precedence over the
//! declared concurrency mode. The mode only governs the no-version case
//! for writes, distinguishing "create if absent" from "overwrite
//! regardless".

use serde::{Deserialize, Serialize};

use crate::backend::WriteCondition;

/// Caller-declared write policy, consulted only when no explicit version
/// token is supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concurrency {
    /// Succeed only if this is the first write of the key.
    FirstWrite,
    /// Succeed regardless of prior state.
    #[default]
    LastWrite,
}

/// Build the precondition for a write.
pub fn write_condition(expected_version: Option<&str>, concurrency: Concurrency) -> WriteCondition {
    match expected_version {
        Some(tag) if !tag.is_empty() => WriteCondition::IfMatch(tag.to_string()),
        _ => match concurrency {
            Concurrency::FirstWrite => WriteCondition::IfAbsent,
            Concurrency::LastWrite => WriteCondition::None,
        },
    }
}

/// Build the precondition for a delete. Deletes have no first-write
/// notion; without a version token they are unconditional.
pub fn delete_condition(expected_version: Option<&str>) -> WriteCondition {
    match expected_version {
        Some(tag) if !tag.is_empty() => WriteCondition::IfMatch(tag.to_string()),
        _ => WriteCondition::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_version_last_write_is_unconditional() {
        assert_eq!(
            write_condition(None, Concurrency::LastWrite),
            WriteCondition::None
        );
    }

    #[test]
    fn test_no_version_first_write_requires_absence() {
        assert_eq!(
            write_condition(None, Concurrency::FirstWrite),
            WriteCondition::IfAbsent
        );
    }

    #[test]
    fn test_supplied_version_overrides_concurrency_mode() {
        // Easy to invert by mistake: the token wins over FirstWrite.
        assert_eq!(
            write_condition(Some("0xabc"), Concurrency::FirstWrite),
            WriteCondition::IfMatch("0xabc".to_string())
        );
        assert_eq!(
            write_condition(Some("0xabc"), Concurrency::LastWrite),
            WriteCondition::IfMatch("0xabc".to_string())
        );
    }

    #[test]
    fn test_empty_version_treated_as_absent() {
        assert_eq!(
            write_condition(Some(""), Concurrency::FirstWrite),
            WriteCondition::IfAbsent
        );
        assert_eq!(delete_condition(Some("")), WriteCondition::None);
    }

    #[test]
    fn test_delete_condition() {
        assert_eq!(delete_condition(None), WriteCondition::None);
        assert_eq!(
            delete_condition(Some("0xabc")),
            WriteCondition::IfMatch("0xabc".to_string())
        );
    }
}
