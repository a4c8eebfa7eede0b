//! Logical key to object name mapping.

/// Delimiter separating an optional caller-side prefix from the object name.
const KEY_DELIMITER: &str = "||";

/// Derive the storage object name from a logical state key.
///
/// A key of the form `"<prefix>||<name>"` maps to `<name>`; the prefix is
/// reserved for caller-side namespacing (multi-tenant partitioning) and
/// never reaches the storage path. Keys with zero or more than one
/// delimiter occurrence are used verbatim.
///
/// No escaping or length validation happens here; the backend rejects
/// overlong or illegal names.
pub fn object_name(key: &str) -> &str {
    match key.split_once(KEY_DELIMITER) {
        Some((_, name)) if !name.contains(KEY_DELIMITER) => name,
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_key_drops_prefix() {
        assert_eq!(object_name("tenantA||itemX"), "itemX");
    }

    #[test]
    fn test_plain_key_unchanged() {
        assert_eq!(object_name("itemX"), "itemX");
    }

    #[test]
    fn test_multiple_delimiters_disable_splitting() {
        assert_eq!(object_name("a||b||c"), "a||b||c");
    }

    #[test]
    fn test_empty_name_after_delimiter() {
        // Backend rejects the empty object name; no validation here.
        assert_eq!(object_name("tenantA||"), "");
    }
}
