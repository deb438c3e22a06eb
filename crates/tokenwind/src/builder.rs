//! Accumulate-then-snapshot construction of a [`ThemeDescriptor`].
//!
//! [`ThemeBuilder`] collects declarations without validating them. All checks
//! run in [`emit_descriptor`](ThemeBuilder::emit_descriptor), which consumes
//! the builder: the descriptor is produced at most once, and the first
//! failure aborts emission before anything is returned.
//!
//! ```rust
//! use tokenwind::{DarkModeStrategy, ThemeBuilder, UtilityPluginRule};
//!
//! let descriptor = ThemeBuilder::new()
//!     .content(["./src/**/*.rs", "./index.html"])
//!     .dark_mode(DarkModeStrategy::Class)
//!     .variable_role("primary")
//!     .register_utility_plugin(
//!         UtilityPluginRule::new("input-dark")
//!             .property("color-scheme", "dark")
//!             .variant("dark"),
//!     )
//!     .emit_descriptor()
//!     .unwrap();
//!
//! assert_eq!(descriptor.plugins().len(), 1);
//! assert_eq!(descriptor.required_variables().len(), 11);
//! ```

use indexmap::IndexMap;

use crate::animation::{compose_animations, AnimationDefinition};
use crate::color::{compose_color_roles, ColorValue, ShadeKey, ShadeTable};
use crate::content::{build_content_globs, validate_glob};
use crate::dark_mode::DarkModeStrategy;
use crate::descriptor::ThemeDescriptor;
use crate::error::{Result, SchemaError};
use crate::font::FontFamily;
use crate::gradient::GradientDefinition;
use crate::plugin::{Plugin, UtilityPluginRule};

/// Collects theme declarations and emits one validated [`ThemeDescriptor`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeBuilder {
    content: Vec<String>,
    dark_mode: DarkModeStrategy,
    roles: Vec<(String, ShadeTable)>,
    animations: Vec<AnimationDefinition>,
    gradients: Vec<GradientDefinition>,
    fonts: Vec<FontFamily>,
    shadows: Vec<(String, String)>,
    plugins: Vec<Plugin>,
}

impl ThemeBuilder {
    /// An empty builder using class-based dark mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds content globs.
    pub fn content<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn dark_mode(mut self, strategy: DarkModeStrategy) -> Self {
        self.dark_mode = strategy;
        self
    }

    /// Declares a colour role from its shade table.
    pub fn color_role(mut self, name: impl Into<String>, shades: ShadeTable) -> Self {
        self.roles.push((name.into(), shades));
        self
    }

    /// Declares a colour role whose shades are `var(--<name>-<shade>)`.
    pub fn variable_role(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let shades = ShadeKey::ALL
            .iter()
            .map(|k| (*k, ColorValue::variable(format!("{}-{}", name, k))))
            .collect();
        self.color_role(name, shades)
    }

    pub fn animation(mut self, animation: AnimationDefinition) -> Self {
        self.animations.push(animation);
        self
    }

    pub fn gradient(mut self, gradient: GradientDefinition) -> Self {
        self.gradients.push(gradient);
        self
    }

    /// Declares a font family. A later family with the same name replaces it.
    pub fn font_family(mut self, family: FontFamily) -> Self {
        self.fonts.push(family);
        self
    }

    /// Declares a named box shadow expression.
    pub fn box_shadow(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.shadows.push((name.into(), value.into()));
        self
    }

    /// Appends an external plugin reference (`tailwindcss`, `autoprefixer`).
    pub fn plugin(mut self, name: impl Into<String>) -> Self {
        self.plugins.push(Plugin::External(name.into()));
        self
    }

    /// Appends an inline utility rule.
    ///
    /// Rules are not de-duplicated: registering the same name twice keeps
    /// both, and the later rule's declarations win in the cascade.
    pub fn register_utility_plugin(mut self, rule: UtilityPluginRule) -> Self {
        let repeated = self
            .plugins
            .iter()
            .filter_map(Plugin::as_utility)
            .any(|r| r.name() == rule.name());
        if repeated {
            tracing::warn!(rule = %rule.name(), "utility rule registered more than once");
        }
        self.plugins.push(Plugin::Utility(rule));
        self
    }

    /// The dark-mode strategy the descriptor will carry.
    pub fn resolve_dark_mode_strategy(&self) -> DarkModeStrategy {
        self.dark_mode
    }

    /// Validates every declaration and produces the immutable descriptor.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, checking content globs,
    /// colour roles, animations, gradients, fonts, shadows and plugins in
    /// that order.
    pub fn emit_descriptor(self) -> Result<ThemeDescriptor> {
        let content = build_content_globs(self.content);
        for pattern in &content {
            validate_glob(pattern)?;
        }

        let color_roles = compose_color_roles(self.roles)?;
        let animations = compose_animations(self.animations)?;

        let mut background_images = IndexMap::new();
        for gradient in &self.gradients {
            let composed = gradient.compose()?;
            if background_images
                .insert(gradient.name().to_string(), composed)
                .is_some()
            {
                tracing::warn!(gradient = %gradient.name(), "gradient redefined; later definition wins");
            }
        }

        let mut font_families = IndexMap::new();
        for family in self.fonts {
            family.validate()?;
            font_families.insert(family.name().to_string(), family);
        }

        let mut box_shadows = IndexMap::new();
        for (name, value) in self.shadows {
            if value.trim().is_empty() {
                return Err(SchemaError::InvalidShadow { name });
            }
            box_shadows.insert(name, value);
        }

        for rule in self.plugins.iter().filter_map(Plugin::as_utility) {
            rule.validate()?;
        }

        tracing::debug!(
            content = content.len(),
            roles = color_roles.len(),
            animations = animations.len(),
            gradients = background_images.len(),
            fonts = font_families.len(),
            shadows = box_shadows.len(),
            plugins = self.plugins.len(),
            dark_mode = %self.dark_mode,
            "emitted theme descriptor"
        );

        Ok(ThemeDescriptor {
            content,
            dark_mode: self.dark_mode,
            color_roles,
            animations,
            background_images,
            font_families,
            box_shadows,
            plugins: self.plugins,
        })
    }
}
