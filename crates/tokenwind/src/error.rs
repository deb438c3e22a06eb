//! Error types for theme descriptor construction.
//!
//! Every failure here is a schema failure detected while the configuration is
//! loaded. None of them are recoverable: the first one aborts
//! [`ThemeBuilder::emit_descriptor`](crate::ThemeBuilder::emit_descriptor) and
//! no partial descriptor is produced.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::color::ShadeKey;

/// A colour role that does not supply all eleven shade slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingShadeError {
    /// Role name.
    pub role: String,
    /// Slots that were not supplied, lightest first.
    pub missing: Vec<ShadeKey>,
    /// Number of slots the role did supply.
    pub supplied: usize,
}

impl fmt::Display for MissingShadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<String> = self.missing.iter().map(|k| k.to_string()).collect();
        write!(
            f,
            "color role '{}' supplies {} of {} shades (missing: {})",
            self.role,
            self.supplied,
            ShadeKey::ALL.len(),
            missing.join(", ")
        )
    }
}

impl std::error::Error for MissingShadeError {}

/// Errors raised while composing or loading a theme descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A colour role is missing one or more shade slots.
    #[error(transparent)]
    MissingShade(#[from] MissingShadeError),

    /// A shade key outside the fixed 50..950 scale.
    #[error("color role '{role}' has unknown shade key '{key}'")]
    UnknownShade { role: String, key: String },

    /// A shade slot given twice, e.g. as `50` and `"50"`.
    #[error("color role '{role}' declares shade '{key}' more than once")]
    DuplicateShade { role: String, key: String },

    /// The same role name was declared twice.
    #[error("color role '{role}' is declared more than once")]
    DuplicateRole { role: String },

    /// A literal colour that does not parse.
    #[error("invalid color '{value}' in {field}: {message}")]
    InvalidColor {
        field: String,
        value: String,
        message: String,
    },

    /// A content pattern that is not a usable glob.
    #[error("invalid content glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// A keyframe stop outside 0%..100% or with an unreadable key.
    #[error("animation '{animation}' has invalid keyframe stop '{stop}'")]
    InvalidKeyframe { animation: String, stop: String },

    /// Animation timing that does not parse.
    #[error("animation '{animation}' has invalid timing '{timing}': {message}")]
    InvalidTiming {
        animation: String,
        timing: String,
        message: String,
    },

    /// An animation names a keyframe set that was never declared.
    #[error("animation '{animation}' references undefined keyframes '{keyframes}'")]
    UndefinedKeyframes { animation: String, keyframes: String },

    /// Two animations share a keyframe set name but not its stops.
    #[error(
        "animation '{animation}' declares keyframes '{keyframes}' with stops that differ from animation '{other}'"
    )]
    ConflictingKeyframes {
        animation: String,
        keyframes: String,
        other: String,
    },

    /// An animation without any keyframe stops.
    #[error("animation '{animation}' has no keyframes")]
    EmptyAnimation { animation: String },

    /// A gradient without any layers.
    #[error("gradient '{gradient}' has no layers")]
    EmptyGradient { gradient: String },

    /// A font family whose fallback list resolves to nothing.
    #[error("font family '{family}' has no fonts and no default fallback stack")]
    UnresolvedFontFallback { family: String },

    /// A utility plugin rule without a name or without properties.
    #[error("utility rule '{rule}' is invalid: {message}")]
    EmptyUtility { rule: String, message: String },

    /// A box shadow with an empty expression.
    #[error("box shadow '{name}' has an empty value")]
    InvalidShadow { name: String },

    /// The configuration file could not be parsed.
    #[error("{}", describe_parse(.path, .message))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// The configuration file could not be read.
    #[error("failed to load theme configuration: {message}")]
    Load { message: String },
}

fn describe_parse(path: &Option<PathBuf>, message: &str) -> String {
    match path {
        Some(p) => format!("failed to parse theme configuration {}: {}", p.display(), message),
        None => format!("failed to parse theme configuration: {}", message),
    }
}

/// Result type for descriptor operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_shade_display_names_role_and_slots() {
        let err = MissingShadeError {
            role: "primary".to_string(),
            missing: vec![ShadeKey::S900, ShadeKey::S950],
            supplied: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains("primary"));
        assert!(msg.contains("9 of 11"));
        assert!(msg.contains("900, 950"));
    }

    #[test]
    fn test_missing_shade_converts_into_schema_error() {
        let err: SchemaError = MissingShadeError {
            role: "accent".to_string(),
            missing: vec![ShadeKey::S50],
            supplied: 10,
        }
        .into();
        assert!(matches!(err, SchemaError::MissingShade(_)));
        assert!(err.to_string().contains("accent"));
    }

    #[test]
    fn test_parse_error_display_with_and_without_path() {
        let with_path = SchemaError::Parse {
            path: Some(PathBuf::from("theme.yaml")),
            message: "bad indent".to_string(),
        };
        assert!(with_path.to_string().contains("theme.yaml"));
        assert!(with_path.to_string().contains("bad indent"));

        let without = SchemaError::Parse {
            path: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(
            without.to_string(),
            "failed to parse theme configuration: bad indent"
        );
    }
}
