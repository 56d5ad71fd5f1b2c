//! Listing filters shared by products and sales.

/// Default values that mean "no filter applied".
pub const DEFAULT_SENTINELS: [&str; 2] = ["Todos", "All"];

/// Resolve an exact-match filter value.
///
/// Returns `None` (no filtering) when the value is absent, empty, or one of
/// `sentinels`.
pub fn active_filter<'a, S: AsRef<str>>(value: Option<&'a str>, sentinels: &[S]) -> Option<&'a str> {
    let value = value?;
    if value.is_empty() || sentinels.iter().any(|s| s.as_ref() == value) {
        return None;
    }
    Some(value)
}

/// Case-insensitive substring search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    /// Build a search term; absent or empty input means "match everything"
    /// and yields `None`.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(raw) if !raw.is_empty() => Some(Self {
                needle: raw.to_lowercase(),
            }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// True when any of `fields` contains the term, ignoring case.
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}
