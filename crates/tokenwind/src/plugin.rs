//! Plugins: external plugin references and inline utility rules.
//!
//! Inline rules register one utility class with a fixed set of declarations,
//! emitted only under the listed variants:
//!
//! ```rust
//! use tokenwind::UtilityPluginRule;
//!
//! let rule = UtilityPluginRule::new("input-dark")
//!     .property("color-scheme", "dark")
//!     .variant("dark");
//! assert_eq!(rule.selector(), ".input-dark");
//! assert_eq!(rule.to_css(), ".input-dark { color-scheme: dark; }");
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, SchemaError};

/// A custom utility class gated on a set of variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtilityPluginRule {
    name: String,
    properties: IndexMap<String, String>,
    variants: Vec<String>,
}

impl UtilityPluginRule {
    /// Starts a rule for the class `name` (a leading `.` is dropped).
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.strip_prefix('.').map(str::to_string).unwrap_or(name);
        Self {
            name,
            properties: IndexMap::new(),
            variants: Vec::new(),
        }
    }

    /// Adds a declaration. A repeated property replaces the earlier value.
    pub fn property(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    /// Adds a variant under which the rule is emitted (`dark`, `hover`, ...).
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> String {
        format!(".{}", self.name)
    }

    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// The rule body as CSS, declarations in insertion order.
    pub fn to_css(&self) -> String {
        let body: Vec<String> = self
            .properties
            .iter()
            .map(|(p, v)| format!("{}: {};", p, v))
            .collect();
        format!("{} {{ {} }}", self.selector(), body.join(" "))
    }

    /// Checks that the rule has a name and at least one declaration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| SchemaError::EmptyUtility {
            rule: self.name.clone(),
            message: message.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("rule has no class name"));
        }
        if self.properties.is_empty() {
            return Err(invalid("rule has no declarations"));
        }
        if let Some((property, _)) = self.properties.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(invalid(&format!("property '{}' has an empty value", property)));
        }
        Ok(())
    }
}

/// An entry in the descriptor's plugin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Plugin {
    /// A plugin package the class generator loads by name (`autoprefixer`).
    External(String),
    /// An inline utility rule.
    Utility(UtilityPluginRule),
}

impl Plugin {
    /// The package or rule name.
    pub fn name(&self) -> &str {
        match self {
            Plugin::External(name) => name,
            Plugin::Utility(rule) => rule.name(),
        }
    }

    pub fn as_utility(&self) -> Option<&UtilityPluginRule> {
        match self {
            Plugin::Utility(rule) => Some(rule),
            Plugin::External(_) => None,
        }
    }
}

impl From<UtilityPluginRule> for Plugin {
    fn from(rule: UtilityPluginRule) -> Self {
        Plugin::Utility(rule)
    }
}
