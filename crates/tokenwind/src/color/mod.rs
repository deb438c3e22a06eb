//! Colour roles and their eleven shade slots.
//!
//! A [`ColorRole`] binds a semantic name (`primary`, `background`, `text`, ...)
//! to exactly eleven shades, keyed by [`ShadeKey`] from 50 (lightest) to 950
//! (darkest). Each shade is a [`ColorValue`]: either a literal colour or a
//! reference to a CSS custom property that the page defines at runtime.
//!
//! ```rust
//! use tokenwind::{ColorRole, ColorValue, ShadeKey};
//!
//! let role = ColorRole::variables("primary");
//! assert_eq!(role[ShadeKey::S500], ColorValue::variable("primary-500"));
//! assert_eq!(role[ShadeKey::S500].to_string(), "var(--primary-500)");
//! ```
//!
//! Variable references are never resolved here. They stay indirections in the
//! descriptor so the theme can be switched live by redefining the variables;
//! see [`crate::runtime`] for the resolution side.

mod literal;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{MissingShadeError, Result, SchemaError};

pub use literal::validate_literal;

/// One of the eleven fixed lightness steps of a colour role.
///
/// Variants are declared lightest first, so the derived ordering is the
/// numeric ordering of the slot keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShadeKey {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl ShadeKey {
    /// All slots, lightest to darkest.
    pub const ALL: [ShadeKey; 11] = [
        ShadeKey::S50,
        ShadeKey::S100,
        ShadeKey::S200,
        ShadeKey::S300,
        ShadeKey::S400,
        ShadeKey::S500,
        ShadeKey::S600,
        ShadeKey::S700,
        ShadeKey::S800,
        ShadeKey::S900,
        ShadeKey::S950,
    ];

    /// The numeric slot key (50, 100, ..., 950).
    pub const fn value(self) -> u16 {
        match self {
            ShadeKey::S50 => 50,
            ShadeKey::S100 => 100,
            ShadeKey::S200 => 200,
            ShadeKey::S300 => 300,
            ShadeKey::S400 => 400,
            ShadeKey::S500 => 500,
            ShadeKey::S600 => 600,
            ShadeKey::S700 => 700,
            ShadeKey::S800 => 800,
            ShadeKey::S900 => 900,
            ShadeKey::S950 => 950,
        }
    }

    /// Looks up a slot by its numeric key.
    pub fn from_value(value: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.value() == value)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShadeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<u16> for ShadeKey {
    type Error = String;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        Self::from_value(value).ok_or_else(|| format!("unknown shade key: {}", value))
    }
}

impl FromStr for ShadeKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: u16 = s
            .trim()
            .parse()
            .map_err(|_| format!("unknown shade key: {}", s))?;
        Self::try_from(value)
    }
}

/// The value held by a shade slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorValue {
    /// A colour written out in full (`#3b82f6`, `rgb(59, 130, 246)`).
    Literal(String),
    /// A custom property name including its `--` prefix, resolved by the
    /// page's cascade at render time.
    VariableRef(String),
}

impl ColorValue {
    /// Wraps a literal colour without validating it.
    pub fn literal(value: impl Into<String>) -> Self {
        ColorValue::Literal(value.into())
    }

    /// References a custom property. The `--` prefix is added when missing.
    pub fn variable(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.starts_with("--") {
            ColorValue::VariableRef(name)
        } else {
            ColorValue::VariableRef(format!("--{}", name))
        }
    }

    /// Reads a configuration string: `var(--name)` becomes a
    /// [`VariableRef`](ColorValue::VariableRef), anything else a literal.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let inner = trimmed
            .strip_prefix("var(")
            .and_then(|rest| rest.strip_suffix(')'))
            .map(str::trim);
        match inner {
            Some(name) if name.starts_with("--") && !name.contains(',') => {
                ColorValue::VariableRef(name.to_string())
            }
            _ => ColorValue::Literal(value.to_string()),
        }
    }

    /// The custom property name, for variable references.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            ColorValue::VariableRef(name) => Some(name),
            ColorValue::Literal(_) => None,
        }
    }

    /// Returns true for literal values.
    pub fn is_literal(&self) -> bool {
        matches!(self, ColorValue::Literal(_))
    }

    /// Checks the value's syntax. `field` names the slot in error messages.
    pub fn validate(&self, field: &str) -> Result<()> {
        match self {
            ColorValue::Literal(value) => {
                validate_literal(value).map_err(|message| SchemaError::InvalidColor {
                    field: field.to_string(),
                    value: value.clone(),
                    message,
                })
            }
            ColorValue::VariableRef(name) => {
                if is_custom_property(name) {
                    Ok(())
                } else {
                    Err(SchemaError::InvalidColor {
                        field: field.to_string(),
                        value: self.to_string(),
                        message: format!("'{}' is not a custom property name", name),
                    })
                }
            }
        }
    }
}

/// `--` followed by one or more identifier characters.
fn is_custom_property(name: &str) -> bool {
    match name.strip_prefix("--") {
        Some(rest) if !rest.is_empty() => rest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()),
        _ => false,
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Literal(value) => f.write_str(value),
            ColorValue::VariableRef(name) => write!(f, "var({})", name),
        }
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        ColorValue::parse(value)
    }
}

impl From<String> for ColorValue {
    fn from(value: String) -> Self {
        ColorValue::parse(&value)
    }
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Shade values keyed by slot, as declared for one role.
pub type ShadeTable = BTreeMap<ShadeKey, ColorValue>;

/// A semantic colour with all eleven shade slots filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRole {
    name: String,
    shades: [ColorValue; 11],
}

impl ColorRole {
    /// Builds a role from a shade table, validating every slot.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MissingShade`] when fewer than eleven slots are given
    /// - [`SchemaError::InvalidColor`] when a literal does not parse
    pub fn new(name: impl Into<String>, mut table: ShadeTable) -> Result<Self> {
        let name = name.into();

        let missing: Vec<ShadeKey> = ShadeKey::ALL
            .iter()
            .copied()
            .filter(|k| !table.contains_key(k))
            .collect();
        if !missing.is_empty() {
            return Err(MissingShadeError {
                role: name,
                supplied: table.len(),
                missing,
            }
            .into());
        }

        for (key, value) in &table {
            value.validate(&format!("colors.{}.{}", name, key))?;
        }

        let ordered: Vec<ColorValue> = ShadeKey::ALL
            .iter()
            .filter_map(|k| table.remove(k))
            .collect();
        let supplied = ordered.len();
        let shades: [ColorValue; 11] = ordered.try_into().map_err(|_| MissingShadeError {
            role: name.clone(),
            missing: Vec::new(),
            supplied,
        })?;

        Ok(Self { name, shades })
    }

    /// Builds a role from numeric keys, e.g. `[(50, "#eff6ff"), ...]`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownShade`] for keys outside the scale, plus
    /// everything [`ColorRole::new`] reports.
    pub fn from_entries<I, V>(name: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u16, V)>,
        V: Into<ColorValue>,
    {
        let name = name.into();
        let table = entries
            .into_iter()
            .map(|(key, value)| {
                ShadeKey::from_value(key)
                    .map(|k| (k, value.into()))
                    .ok_or_else(|| SchemaError::UnknownShade {
                        role: name.clone(),
                        key: key.to_string(),
                    })
            })
            .collect::<Result<ShadeTable>>()?;
        Self::new(name, table)
    }

    /// A role whose every slot references `--<name>-<shade>`.
    pub fn variables(name: impl Into<String>) -> Self {
        let name = name.into();
        let shades = ShadeKey::ALL.map(|k| ColorValue::variable(format!("{}-{}", name, k)));
        Self { name, shades }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value in `key`'s slot.
    pub fn shade(&self, key: ShadeKey) -> &ColorValue {
        &self.shades[key.index()]
    }

    /// The value for a numeric key, if the key is on the scale.
    pub fn get(&self, key: u16) -> Option<&ColorValue> {
        ShadeKey::from_value(key).map(|k| self.shade(k))
    }

    /// Slots in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (ShadeKey, &ColorValue)> {
        ShadeKey::ALL.iter().copied().zip(self.shades.iter())
    }

    /// Custom property names this role depends on.
    pub fn variable_refs(&self) -> impl Iterator<Item = &str> {
        self.shades.iter().filter_map(ColorValue::variable_name)
    }
}

impl Index<ShadeKey> for ColorRole {
    type Output = ColorValue;

    fn index(&self, key: ShadeKey) -> &Self::Output {
        self.shade(key)
    }
}

impl Serialize for ColorRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shades.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

/// Composes a role table into validated colour roles, keeping declaration order.
///
/// # Errors
///
/// Fails on the first role that is missing a shade, carries an invalid
/// literal, or repeats an earlier role name.
pub fn compose_color_roles<I, N>(table: I) -> Result<IndexMap<String, ColorRole>>
where
    I: IntoIterator<Item = (N, ShadeTable)>,
    N: Into<String>,
{
    let mut roles = IndexMap::new();
    for (name, shades) in table {
        let name = name.into();
        if roles.contains_key(&name) {
            return Err(SchemaError::DuplicateRole { role: name });
        }
        let role = ColorRole::new(name.clone(), shades)?;
        tracing::trace!(role = %name, variables = role.variable_refs().count(), "composed color role");
        roles.insert(name, role);
    }
    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: [&str; 11] = [
        "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
        "#1e40af", "#1e3a8a", "#172554",
    ];

    fn blue_table() -> ShadeTable {
        ShadeKey::ALL
            .iter()
            .zip(BLUE)
            .map(|(k, v)| (*k, ColorValue::literal(v)))
            .collect()
    }

    #[test]
    fn test_shade_key_order_is_numeric() {
        let values: Vec<u16> = ShadeKey::ALL.iter().map(|k| k.value()).collect();
        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(values, sorted);
        assert!(ShadeKey::S50 < ShadeKey::S950);
    }

    #[test]
    fn test_shade_key_parsing() {
        assert_eq!("500".parse::<ShadeKey>(), Ok(ShadeKey::S500));
        assert_eq!(ShadeKey::try_from(950u16), Ok(ShadeKey::S950));
        assert!("550".parse::<ShadeKey>().is_err());
        assert!("bold".parse::<ShadeKey>().is_err());
    }

    #[test]
    fn test_color_value_parse_variable() {
        assert_eq!(
            ColorValue::parse("var(--text-50)"),
            ColorValue::VariableRef("--text-50".to_string())
        );
        assert_eq!(
            ColorValue::parse("#fff"),
            ColorValue::Literal("#fff".to_string())
        );
        // Fallback arguments are not modelled; the string stays a literal.
        assert!(ColorValue::parse("var(--a, #fff)").is_literal());
    }

    #[test]
    fn test_variable_names_must_be_identifiers() {
        assert!(ColorValue::parse("var(--primary-500)").validate("x").is_ok());
        assert!(ColorValue::variable("brand_accent").validate("x").is_ok());

        for bad in ["var(--p-500))", "var(--)", "var(--a(b))"] {
            let value = ColorValue::parse(bad);
            assert!(!value.is_literal(), "{} should read as a reference", bad);
            assert!(value.validate("colors.p.500").is_err(), "{} accepted", bad);
        }
        assert!(ColorValue::VariableRef("--a b".to_string()).validate("x").is_err());
        assert!(ColorValue::VariableRef("primary".to_string()).validate("x").is_err());
    }

    #[test]
    fn test_role_rejects_malformed_reference() {
        let table: ShadeTable = ShadeKey::ALL
            .iter()
            .map(|k| (*k, ColorValue::parse(&format!("var(--p-{}))", k))))
            .collect();
        match ColorRole::new("p", table).unwrap_err() {
            SchemaError::InvalidColor { field, value, .. } => {
                assert_eq!(field, "colors.p.50");
                assert_eq!(value, "var(--p-50))");
            }
            other => panic!("expected InvalidColor, got {:?}", other),
        }
    }

    #[test]
    fn test_color_value_display_round_trips() {
        assert_eq!(ColorValue::variable("accent-900").to_string(), "var(--accent-900)");
        assert_eq!(ColorValue::variable("--accent-900").to_string(), "var(--accent-900)");
        assert_eq!(ColorValue::literal("rgb(1, 2, 3)").to_string(), "rgb(1, 2, 3)");
    }

    #[test]
    fn test_role_new_orders_slots() {
        let role = ColorRole::new("primary", blue_table()).unwrap();
        let keys: Vec<ShadeKey> = role.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ShadeKey::ALL.to_vec());
        assert_eq!(role[ShadeKey::S500], ColorValue::literal("#3b82f6"));
        assert_eq!(role.get(950), Some(&ColorValue::literal("#172554")));
        assert_eq!(role.get(550), None);
    }

    #[test]
    fn test_role_new_missing_shades() {
        let mut table = blue_table();
        table.remove(&ShadeKey::S900);
        table.remove(&ShadeKey::S950);

        let err = ColorRole::new("primary", table).unwrap_err();
        match err {
            SchemaError::MissingShade(e) => {
                assert_eq!(e.role, "primary");
                assert_eq!(e.supplied, 9);
                assert_eq!(e.missing, vec![ShadeKey::S900, ShadeKey::S950]);
            }
            other => panic!("expected MissingShade, got {:?}", other),
        }
    }

    #[test]
    fn test_role_new_invalid_literal() {
        let mut table = blue_table();
        table.insert(ShadeKey::S300, ColorValue::literal("#xyz"));
        let err = ColorRole::new("primary", table).unwrap_err();
        match err {
            SchemaError::InvalidColor { field, value, .. } => {
                assert_eq!(field, "colors.primary.300");
                assert_eq!(value, "#xyz");
            }
            other => panic!("expected InvalidColor, got {:?}", other),
        }
    }

    #[test]
    fn test_role_from_entries_unknown_key() {
        let entries = vec![(50u16, "#fff"), (75u16, "#eee")];
        let err = ColorRole::from_entries("text", entries).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownShade {
                role: "text".to_string(),
                key: "75".to_string()
            }
        );
    }

    #[test]
    fn test_variables_role() {
        let role = ColorRole::variables("background");
        let refs: Vec<&str> = role.variable_refs().collect();
        assert_eq!(refs.len(), 11);
        assert_eq!(refs[0], "--background-50");
        assert_eq!(refs[10], "--background-950");
    }

    #[test]
    fn test_compose_rejects_duplicate_roles() {
        let err = compose_color_roles(vec![
            ("primary", blue_table()),
            ("primary", blue_table()),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateRole {
                role: "primary".to_string()
            }
        );
    }

    #[test]
    fn test_compose_keeps_declaration_order() {
        let roles = compose_color_roles(vec![
            ("secondary", blue_table()),
            ("accent", blue_table()),
            ("primary", blue_table()),
        ])
        .unwrap();
        let names: Vec<&str> = roles.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["secondary", "accent", "primary"]);
    }

    #[test]
    fn test_role_serializes_as_ordered_map() {
        let role = ColorRole::variables("text");
        let json = serde_json::to_string(&role).unwrap();
        assert!(json.starts_with(r#"{"50":"var(--text-50)","100":"var(--text-100)""#));
        assert!(json.ends_with(r#""950":"var(--text-950)"}"#));
    }
}
