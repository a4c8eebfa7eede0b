//! Key mapping behavior.

use blobstate_core::store::object_name;

#[test]
fn test_prefix_is_discarded() {
    assert_eq!(object_name("tenantA||itemX"), "itemX");
}

#[test]
fn test_unprefixed_key_is_verbatim() {
    assert_eq!(object_name("itemX"), "itemX");
}

#[test]
fn test_repeated_delimiter_is_verbatim() {
    assert_eq!(object_name("a||b||c"), "a||b||c");
}

#[test]
fn test_slash_keys_pass_through() {
    // Hierarchical names are the backend's concern, not the mapper's.
    assert_eq!(object_name("orders/2024/42"), "orders/2024/42");
    assert_eq!(object_name("shop||orders/2024/42"), "orders/2024/42");
}
