//! Condition building behavior, including the precedence rule between a
//! supplied version token and the declared concurrency mode.

use blobstate_core::store::{delete_condition, write_condition, Concurrency};
use blobstate_core::WriteCondition;

#[test]
fn test_last_write_without_version_is_unconditional() {
    assert_eq!(
        write_condition(None, Concurrency::LastWrite),
        WriteCondition::None
    );
}

#[test]
fn test_first_write_without_version_requires_absence() {
    assert_eq!(
        write_condition(None, Concurrency::FirstWrite),
        WriteCondition::IfAbsent
    );
}

#[test]
fn test_version_token_wins_over_first_write() {
    // The token means "only act if nothing changed since I observed this
    // value"; it must not degrade to a create-only write.
    assert_eq!(
        write_condition(Some("W/\"1\""), Concurrency::FirstWrite),
        WriteCondition::IfMatch("W/\"1\"".to_string())
    );
}

#[test]
fn test_version_token_wins_over_last_write() {
    assert_eq!(
        write_condition(Some("W/\"1\""), Concurrency::LastWrite),
        WriteCondition::IfMatch("W/\"1\"".to_string())
    );
}

#[test]
fn test_empty_token_is_no_expectation() {
    assert_eq!(
        write_condition(Some(""), Concurrency::LastWrite),
        WriteCondition::None
    );
    assert_eq!(
        write_condition(Some(""), Concurrency::FirstWrite),
        WriteCondition::IfAbsent
    );
}

#[test]
fn test_delete_without_version_is_unconditional() {
    assert_eq!(delete_condition(None), WriteCondition::None);
    assert_eq!(delete_condition(Some("")), WriteCondition::None);
}

#[test]
fn test_delete_with_version_requires_match() {
    assert_eq!(
        delete_condition(Some("W/\"1\"")),
        WriteCondition::IfMatch("W/\"1\"".to_string())
    );
}

#[test]
fn test_default_concurrency_is_last_write() {
    assert_eq!(Concurrency::default(), Concurrency::LastWrite);
}
