//! Dark-mode activation strategy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the generated stylesheet decides that dark variants apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkModeStrategy {
    /// Dark variants apply under an ancestor carrying the `dark` marker class.
    #[default]
    Class,
    /// Dark variants follow the `prefers-color-scheme` media query.
    Media,
}

impl DarkModeStrategy {
    /// The configuration tag (`"class"` or `"media"`).
    pub fn as_str(self) -> &'static str {
        match self {
            DarkModeStrategy::Class => "class",
            DarkModeStrategy::Media => "media",
        }
    }
}

impl fmt::Display for DarkModeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DarkModeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "class" => Ok(DarkModeStrategy::Class),
            "media" => Ok(DarkModeStrategy::Media),
            other => Err(format!("unknown dark mode strategy: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_class() {
        assert_eq!(DarkModeStrategy::default(), DarkModeStrategy::Class);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("class".parse::<DarkModeStrategy>(), Ok(DarkModeStrategy::Class));
        assert_eq!("media".parse::<DarkModeStrategy>(), Ok(DarkModeStrategy::Media));
        assert!("os".parse::<DarkModeStrategy>().is_err());
    }

    #[test]
    fn test_serde_tag() {
        assert_eq!(
            serde_json::to_string(&DarkModeStrategy::Class).unwrap(),
            "\"class\""
        );
        let parsed: DarkModeStrategy = serde_yaml::from_str("media").unwrap();
        assert_eq!(parsed, DarkModeStrategy::Media);
    }
}
