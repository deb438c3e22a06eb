//! # Tokenwind - Design-Token Theme Descriptors
//!
//! `tokenwind` assembles the theme section of a utility-class stylesheet
//! generator: the content globs it scans, the dark-mode strategy, semantic
//! colour roles, keyframe animations, layered gradients, font families, box
//! shadows and custom utility rules. Everything is validated once and frozen
//! into an immutable [`ThemeDescriptor`] that serializes to the generator's
//! configuration shape.
//!
//! ## Core Concepts
//!
//! - [`ThemeBuilder`]: collects declarations, then emits one descriptor
//! - [`ColorRole`]: a semantic colour with eleven [`ShadeKey`] slots (50..950)
//! - [`ColorValue`]: a literal colour or a `var(--name)` indirection
//! - [`AnimationDefinition`]: timing plus keyframe stops, sorted on composition
//! - [`GradientDefinition`]: ordered layers, first layer painted on top
//! - [`UtilityPluginRule`]: a custom class gated on variants such as `dark`
//! - [`VariableScope`]: runtime resolution of `var()` references, kept apart
//!   from the descriptor
//!
//! ## Quick Start
//!
//! ```rust
//! use tokenwind::{ColorValue, DarkModeStrategy, ShadeKey, ThemeBuilder, UtilityPluginRule};
//!
//! let descriptor = ThemeBuilder::new()
//!     .content(["./src/**/*.rs", "./index.html"])
//!     .variable_role("primary")
//!     .register_utility_plugin(
//!         UtilityPluginRule::new("input-dark")
//!             .property("color-scheme", "dark")
//!             .variant("dark"),
//!     )
//!     .emit_descriptor()
//!     .unwrap();
//!
//! assert_eq!(descriptor.dark_mode(), DarkModeStrategy::Class);
//! assert_eq!(
//!     descriptor.color_role("primary").unwrap()[ShadeKey::S500],
//!     ColorValue::variable("primary-500"),
//! );
//! ```
//!
//! ## Configuration Files
//!
//! ```rust
//! use tokenwind::ThemeConfig;
//!
//! let descriptor = ThemeConfig::from_yaml(r#"
//! content: ["./src/**/*.rs"]
//! darkMode: class
//! theme:
//!   extend:
//!     boxShadow:
//!       white-md: "0 4px 6px -1px rgba(255, 255, 255, 0.1)"
//! "#)
//! .unwrap()
//! .into_builder()
//! .unwrap()
//! .emit_descriptor()
//! .unwrap();
//!
//! assert_eq!(descriptor.box_shadows().len(), 1);
//! ```
//!
//! ## Failure
//!
//! All checks run in [`ThemeBuilder::emit_descriptor`]. The first
//! [`SchemaError`] aborts emission; there are no partial descriptors.
//! Unresolvable `var()` references are not schema errors: the page defines
//! those variables, and [`VariableScope::check`] verifies a given scope.

pub mod animation;
mod builder;
pub mod color;
pub mod config;
mod content;
mod dark_mode;
mod descriptor;
mod error;
pub mod font;
pub mod gradient;
pub mod plugin;
pub mod presets;
pub mod runtime;

pub use animation::{
    compose_animations, AnimationDefinition, ComposedAnimation, Iteration, Keyframe, TimingSpec,
};
pub use builder::ThemeBuilder;
pub use color::{compose_color_roles, ColorRole, ColorValue, ShadeKey, ShadeTable};
pub use config::{load_descriptor, ThemeConfig};
pub use content::{build_content_globs, validate_glob};
pub use dark_mode::DarkModeStrategy;
pub use descriptor::ThemeDescriptor;
pub use error::{MissingShadeError, Result, SchemaError};
pub use font::{DefaultStack, FontFamily};
pub use gradient::{compose_gradient, GradientDefinition, GradientKind, GradientLayer};
pub use plugin::{Plugin, UtilityPluginRule};
pub use runtime::{ReferenceError, VariableScope};
