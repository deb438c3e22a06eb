//! The immutable theme descriptor handed to the class generator.
//!
//! A [`ThemeDescriptor`] is only produced by
//! [`ThemeBuilder::emit_descriptor`](crate::ThemeBuilder::emit_descriptor),
//! after every collection has been validated. It exposes read-only accessors
//! and serializes to the generator's configuration shape:
//!
//! ```json
//! {
//!   "content": ["./src/**/*.rs"],
//!   "darkMode": "class",
//!   "theme": { "extend": { "animation": {}, "keyframes": {}, "boxShadow": {},
//!                          "backgroundImage": {}, "colors": {}, "fontFamily": {} } },
//!   "plugins": []
//! }
//! ```

use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};

use crate::animation::ComposedAnimation;
use crate::color::ColorRole;
use crate::dark_mode::DarkModeStrategy;
use crate::font::FontFamily;
use crate::plugin::{Plugin, UtilityPluginRule};

/// A validated, read-only theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDescriptor {
    pub(crate) content: Vec<String>,
    pub(crate) dark_mode: DarkModeStrategy,
    pub(crate) color_roles: IndexMap<String, ColorRole>,
    pub(crate) animations: IndexMap<String, ComposedAnimation>,
    pub(crate) background_images: IndexMap<String, String>,
    pub(crate) font_families: IndexMap<String, FontFamily>,
    pub(crate) box_shadows: IndexMap<String, String>,
    pub(crate) plugins: Vec<Plugin>,
}

impl ThemeDescriptor {
    /// Content globs, de-duplicated, in declaration order.
    pub fn content(&self) -> &[String] {
        &self.content
    }

    pub fn dark_mode(&self) -> DarkModeStrategy {
        self.dark_mode
    }

    pub fn color_roles(&self) -> &IndexMap<String, ColorRole> {
        &self.color_roles
    }

    pub fn color_role(&self, name: &str) -> Option<&ColorRole> {
        self.color_roles.get(name)
    }

    pub fn animations(&self) -> &IndexMap<String, ComposedAnimation> {
        &self.animations
    }

    pub fn animation(&self, name: &str) -> Option<&ComposedAnimation> {
        self.animations.get(name)
    }

    /// Composed gradient expressions keyed by utility name.
    pub fn background_images(&self) -> &IndexMap<String, String> {
        &self.background_images
    }

    pub fn background_image(&self, name: &str) -> Option<&str> {
        self.background_images.get(name).map(String::as_str)
    }

    pub fn font_families(&self) -> &IndexMap<String, FontFamily> {
        &self.font_families
    }

    pub fn font_family(&self, name: &str) -> Option<&FontFamily> {
        self.font_families.get(name)
    }

    pub fn box_shadows(&self) -> &IndexMap<String, String> {
        &self.box_shadows
    }

    /// Plugins in registration order.
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Inline utility rules in registration order, duplicates included.
    pub fn utility_rules(&self) -> impl Iterator<Item = &UtilityPluginRule> {
        self.plugins.iter().filter_map(Plugin::as_utility)
    }

    /// Every custom property the page must define for this theme to render.
    ///
    /// Roles come first in declaration order (shades lightest first), then
    /// any variables used by gradient layers. Each name appears once.
    pub fn required_variables(&self) -> Vec<String> {
        let mut names = IndexSet::new();
        for role in self.color_roles.values() {
            names.extend(role.variable_refs().map(str::to_string));
        }
        for expression in self.background_images.values() {
            names.extend(variables_in(expression));
        }
        names.into_iter().collect()
    }

    /// Serializes to compact JSON in the generator's configuration shape.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn variables_in(expression: &str) -> Vec<String> {
    expression
        .split("var(")
        .skip(1)
        .filter_map(|rest| rest.split(')').next())
        .map(str::trim)
        .filter(|name| name.starts_with("--"))
        .map(str::to_string)
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Wire<'a> {
    content: &'a [String],
    dark_mode: DarkModeStrategy,
    theme: WireTheme<'a>,
    plugins: &'a [Plugin],
}

#[derive(Serialize)]
struct WireTheme<'a> {
    extend: WireExtend<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireExtend<'a> {
    animation: IndexMap<&'a str, String>,
    keyframes: IndexMap<&'a str, IndexMap<String, WireKeyframe<'a>>>,
    box_shadow: &'a IndexMap<String, String>,
    background_image: &'a IndexMap<String, String>,
    colors: &'a IndexMap<String, ColorRole>,
    font_family: IndexMap<&'a str, Vec<String>>,
}

#[derive(Serialize)]
struct WireKeyframe<'a> {
    transform: &'a str,
}

impl Serialize for ThemeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let animation: IndexMap<&str, String> = self
            .animations
            .iter()
            .map(|(name, a)| (name.as_str(), a.shorthand()))
            .collect();
        let keyframes: IndexMap<&str, IndexMap<String, WireKeyframe<'_>>> = self
            .animations
            .values()
            .map(|a| {
                let stops: IndexMap<String, WireKeyframe<'_>> = a
                    .keyframes()
                    .iter()
                    .map(|k| {
                        (
                            k.selector(),
                            WireKeyframe {
                                transform: k.transform(),
                            },
                        )
                    })
                    .collect();
                (a.keyframes_name(), stops)
            })
            .collect();
        let font_family: IndexMap<&str, Vec<String>> = self
            .font_families
            .iter()
            .map(|(name, f)| (name.as_str(), f.resolved()))
            .collect();

        Wire {
            content: &self.content,
            dark_mode: self.dark_mode,
            theme: WireTheme {
                extend: WireExtend {
                    animation,
                    keyframes,
                    box_shadow: &self.box_shadows,
                    background_image: &self.background_images,
                    colors: &self.color_roles,
                    font_family,
                },
            },
            plugins: &self.plugins,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorValue, DefaultStack, GradientDefinition, GradientLayer, ThemeBuilder};

    fn sample() -> ThemeDescriptor {
        ThemeBuilder::new()
            .content(["./src/**/*.rs"])
            .variable_role("primary")
            .gradient(
                GradientDefinition::new("glow")
                    .layer(GradientLayer::radial("50% 0%", "var(--accent-500)", "40%"))
                    .layer(GradientLayer::radial("0% 0%", "var(--primary-500)", "60%")),
            )
            .font_family(crate::FontFamily::new("kanit", ["Kanit"]).with_fallback(DefaultStack::Sans))
            .box_shadow("white-md", "0 4px 6px -1px rgba(255, 255, 255, 0.1)")
            .emit_descriptor()
            .unwrap()
    }

    #[test]
    fn test_variables_in_expression() {
        assert_eq!(
            variables_in("radial-gradient(at 0% 0%, var(--a-1) 0, transparent 10%), var( --b )"),
            vec!["--a-1", "--b"]
        );
        assert!(variables_in("rgb(1, 2, 3)").is_empty());
    }

    #[test]
    fn test_required_variables_dedups_and_orders() {
        let descriptor = sample();
        let vars = descriptor.required_variables();
        assert_eq!(vars.len(), 12);
        assert_eq!(vars[0], "--primary-50");
        assert_eq!(vars[10], "--primary-950");
        assert_eq!(vars[11], "--accent-500");
    }

    #[test]
    fn test_accessors() {
        let descriptor = sample();
        assert_eq!(descriptor.content(), &["./src/**/*.rs".to_string()]);
        assert_eq!(
            descriptor.color_role("primary").unwrap().get(500),
            Some(&ColorValue::variable("primary-500"))
        );
        assert!(descriptor.background_image("glow").unwrap().starts_with("radial-gradient(at 50% 0%"));
        assert_eq!(descriptor.font_family("kanit").unwrap().fonts(), &["Kanit".to_string()]);
        assert_eq!(descriptor.utility_rules().count(), 0);
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["darkMode"], "class");
        assert_eq!(json["content"][0], "./src/**/*.rs");
        let extend = &json["theme"]["extend"];
        assert_eq!(extend["colors"]["primary"]["500"], "var(--primary-500)");
        assert_eq!(extend["fontFamily"]["kanit"][0], "Kanit");
        assert_eq!(extend["fontFamily"]["kanit"][1], "ui-sans-serif");
        assert_eq!(
            extend["boxShadow"]["white-md"],
            "0 4px 6px -1px rgba(255, 255, 255, 0.1)"
        );
        assert!(json["plugins"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_pretty_json_parses_to_same_value() {
        let descriptor = sample();
        let compact: serde_json::Value =
            serde_json::from_str(&descriptor.to_json().unwrap()).unwrap();
        let pretty: serde_json::Value =
            serde_json::from_str(&descriptor.to_json_pretty().unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }
}
