//! Establishment allow-list
//!
//! Only ids in this list get a visit page, a QR code or a counter.

use std::str::FromStr;

use crate::error::ConfigError;

/// Restaurants and shops shipped with the default configuration
pub const DEFAULT_ESTABLISHMENTS: [&str; 8] = [
    "rest_001", "rest_002", "rest_003", "rest_004", "rest_005",
    "com_001", "com_002", "com_003",
];

/// Ordered, duplicate-free list of known establishment ids
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Establishments {
    ids: Vec<String>,
}

impl Default for Establishments {
    fn default() -> Self {
        Self {
            ids: DEFAULT_ESTABLISHMENTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl Establishments {
    /// Build from an explicit list, keeping the first occurrence of each id
    pub fn new<I, S>(ids: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            let id = id.trim();
            if !id.is_empty() && !unique.iter().any(|known| known == id) {
                unique.push(id.to_string());
            }
        }

        if unique.is_empty() {
            return Err(ConfigError::EmptyEstablishments);
        }

        Ok(Self { ids: unique })
    }

    /// Parse a comma-separated list such as `"rest_001, com_001"`
    pub fn parse(csv: &str) -> Result<Self, ConfigError> {
        Self::new(csv.split(','))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromStr for Establishments {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        let list = Establishments::default();
        assert_eq!(list.len(), 8);
        assert!(list.contains("rest_001"));
        assert!(list.contains("com_003"));
        assert!(!list.contains("com_999"));
    }

    #[test]
    fn test_parse_trims_and_dedups() {
        let list: Establishments = " cafe_1, bar_2 ,,cafe_1 ".parse().unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["cafe_1", "bar_2"]);
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert_eq!(
            Establishments::parse(" , ,"),
            Err(ConfigError::EmptyEstablishments)
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        let list = Establishments::default();
        assert!(!list.contains("REST_001"));
        assert!(!list.contains("rest_001 "));
    }
}
