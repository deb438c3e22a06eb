//! Runtime resolution of custom-property indirections.
//!
//! Descriptors keep `var(--name)` references unresolved. This module models
//! the page-side layer that defines those variables, kept separate from the
//! descriptor so that a theme switch only swaps the [`VariableScope`].
//!
//! Resolution follows chains (`--accent-500: var(--brand)`) and reports a
//! reference that is never defined or that loops back on itself.
//!
//! ```rust
//! use tokenwind::{ColorValue, VariableScope};
//!
//! let scope = VariableScope::new()
//!     .define("brand", "#16a34a")
//!     .define("primary-500", "var(--brand)");
//!
//! let value = ColorValue::variable("primary-500");
//! assert_eq!(scope.resolve(&value).unwrap(), "#16a34a");
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::color::{ColorRole, ColorValue, ShadeKey};
use crate::descriptor::ThemeDescriptor;

/// A variable reference that cannot be resolved to a literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The custom property is not defined in the scope.
    #[error("custom property '{name}' is not defined")]
    Unresolved { name: String },

    /// The custom properties reference each other in a loop.
    #[error("custom property cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },
}

/// Custom property definitions visible to the rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableScope {
    values: HashMap<String, ColorValue>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines (or redefines) a custom property. `--` is added when missing.
    pub fn define(mut self, name: impl Into<String>, value: impl Into<ColorValue>) -> Self {
        let name = name.into();
        let name = if name.starts_with("--") {
            name
        } else {
            format!("--{}", name)
        };
        self.values.insert(name, value.into());
        self
    }

    /// Defines `--<role>-<shade>` for every slot of `role`.
    ///
    /// Use this with a literal palette to back a variable role of the same
    /// name, e.g. a blue `primary` palette behind `var(--primary-500)`.
    pub fn define_role(self, role: &ColorRole) -> Self {
        role.iter().fold(self, |scope, (key, value)| {
            scope.define(format!("{}-{}", role.name(), key), value.clone())
        })
    }

    /// The value defined for `name`, without following references.
    pub fn get(&self, name: &str) -> Option<&ColorValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolves a value to its literal colour.
    pub fn resolve(&self, value: &ColorValue) -> Result<String, ReferenceError> {
        let mut current = match value {
            ColorValue::Literal(literal) => return Ok(literal.clone()),
            ColorValue::VariableRef(name) => name.as_str(),
        };
        let mut path: Vec<String> = Vec::new();

        loop {
            if path.iter().any(|seen| seen == current) {
                path.push(current.to_string());
                return Err(ReferenceError::Cycle { path });
            }
            path.push(current.to_string());

            match self.values.get(current) {
                None => {
                    return Err(ReferenceError::Unresolved {
                        name: current.to_string(),
                    })
                }
                Some(ColorValue::Literal(literal)) => return Ok(literal.clone()),
                Some(ColorValue::VariableRef(next)) => current = next.as_str(),
            }
        }
    }

    /// Resolves every slot of a role, lightest first.
    pub fn resolve_role(&self, role: &ColorRole) -> Result<Vec<(ShadeKey, String)>, ReferenceError> {
        role.iter()
            .map(|(key, value)| self.resolve(value).map(|v| (key, v)))
            .collect()
    }

    /// Variables the descriptor needs that this scope cannot resolve.
    pub fn missing_variables(&self, descriptor: &ThemeDescriptor) -> Vec<String> {
        descriptor
            .required_variables()
            .into_iter()
            .filter(|name| {
                self.resolve(&ColorValue::VariableRef(name.clone()))
                    .is_err()
            })
            .collect()
    }

    /// Checks that every variable the descriptor needs resolves.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReferenceError`] in required-variable order.
    pub fn check(&self, descriptor: &ThemeDescriptor) -> Result<(), ReferenceError> {
        for name in descriptor.required_variables() {
            self.resolve(&ColorValue::VariableRef(name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ThemeBuilder;

    #[test]
    fn test_literal_resolves_to_itself() {
        let scope = VariableScope::new();
        assert_eq!(scope.resolve(&ColorValue::literal("#fff")).unwrap(), "#fff");
    }

    #[test]
    fn test_unresolved() {
        let scope = VariableScope::new();
        assert_eq!(
            scope.resolve(&ColorValue::variable("primary-500")),
            Err(ReferenceError::Unresolved {
                name: "--primary-500".to_string()
            })
        );
    }

    #[test]
    fn test_chain_and_cycle() {
        let scope = VariableScope::new()
            .define("a", "var(--b)")
            .define("b", "var(--c)")
            .define("c", "var(--a)");
        match scope.resolve(&ColorValue::variable("a")).unwrap_err() {
            ReferenceError::Cycle { path } => {
                assert_eq!(path, vec!["--a", "--b", "--c", "--a"]);
            }
            other => panic!("expected Cycle, got {:?}", other),
        }

        let err = ReferenceError::Cycle {
            path: vec!["--a".to_string(), "--a".to_string()],
        };
        assert_eq!(err.to_string(), "custom property cycle: --a -> --a");
    }

    #[test]
    fn test_define_role_backs_variable_role() {
        let blue = ColorRole::from_entries(
            "primary",
            ShadeKey::ALL.iter().map(|k| (k.value(), format!("#0000{:02x}", k.value() / 4))),
        )
        .unwrap();
        let scope = VariableScope::new().define_role(&blue);
        assert_eq!(scope.len(), 11);

        let variables = ColorRole::variables("primary");
        let resolved = scope.resolve_role(&variables).unwrap();
        assert_eq!(resolved.len(), 11);
        assert_eq!(resolved[0], (ShadeKey::S50, "#00000c".to_string()));
    }

    #[test]
    fn test_missing_variables_and_check() {
        let descriptor = ThemeBuilder::new()
            .variable_role("text")
            .emit_descriptor()
            .unwrap();

        let partial = VariableScope::new()
            .define("text-50", "#fff")
            .define("text-100", "#eee");
        let missing = partial.missing_variables(&descriptor);
        assert_eq!(missing.len(), 9);
        assert_eq!(missing[0], "--text-200");
        assert_eq!(
            partial.check(&descriptor),
            Err(ReferenceError::Unresolved {
                name: "--text-200".to_string()
            })
        );

        let complete = ShadeKey::ALL
            .iter()
            .fold(VariableScope::new(), |s, k| s.define(format!("text-{}", k), "#123456"));
        assert!(complete.missing_variables(&descriptor).is_empty());
        assert!(complete.check(&descriptor).is_ok());
    }
}
