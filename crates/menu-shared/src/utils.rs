//! Utility functions

use uuid::Uuid;

/// Parses a path or query value into an entity id, tolerating surrounding whitespace.
pub fn parse_entity_id(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s.trim()).ok()
}

/// Interprets query flags such as `?cascade=true`. Only a literal `true`
/// (any casing) enables the flag.
pub fn parse_flag(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
