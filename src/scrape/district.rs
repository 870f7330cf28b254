use regex::Regex;
use std::sync::LazyLock;

static PRAGUE_DISTRICT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Praha\s+([0-9]+)").expect("district pattern is valid"));

/// Municipal district number from a free-text address ("Praha 10" -> "10").
pub fn resolve_district(address: Option<&str>) -> Option<String> {
    let captures = PRAGUE_DISTRICT.captures(address?)?;
    captures.get(1).map(|m| m.as_str().to_string())
}
