//! Configuration-file surface.
//!
//! A theme can be declared in YAML or JSON with the same shape the class
//! generator reads:
//!
//! ```yaml
//! content:
//!   - "./src/**/*.rs"
//!   - "./index.html"
//! darkMode: class
//! theme:
//!   extend:
//!     animation:
//!       blob: "blob 7s infinite"
//!     keyframes:
//!       blob:
//!         "0%": { transform: "translate(0px, 0px) scale(1)" }
//!         "100%": { transform: "translate(0px, 0px) scale(1)" }
//!     boxShadow:
//!       white-md: "0 4px 6px -1px rgba(255, 255, 255, 0.1)"
//!     backgroundImage:
//!       custom-gradient:
//!         - { at: "56% 0%", color: "rgb(22, 163, 74)", stop: "33%" }
//!     colors:
//!       primary:
//!         50: "var(--primary-50)"
//!         # ... all eleven shades
//!     fontFamily:
//!       kanit: { fonts: [Kanit], fallback: sans }
//! plugins:
//!   - tailwindcss
//!   - utility:
//!       name: input-dark
//!       properties: { color-scheme: dark }
//!       variants: [dark]
//! ```
//!
//! Parsing only checks structure. [`ThemeConfig::into_builder`] maps the file
//! onto a [`ThemeBuilder`], resolving animation shorthands against the
//! declared keyframes; the remaining checks run at emission.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::animation::{AnimationDefinition, Keyframe, TimingSpec};
use crate::builder::ThemeBuilder;
use crate::color::{ColorValue, ShadeKey, ShadeTable};
use crate::dark_mode::DarkModeStrategy;
use crate::descriptor::ThemeDescriptor;
use crate::error::{Result, SchemaError};
use crate::font::{DefaultStack, FontFamily};
use crate::gradient::{GradientDefinition, GradientKind, GradientLayer};
use crate::plugin::UtilityPluginRule;

/// File extensions recognised by [`ThemeConfig::from_file`].
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Root of a theme configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub dark_mode: DarkModeStrategy,
    #[serde(default)]
    pub theme: ThemeSection,
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

/// The `theme` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeSection {
    #[serde(default)]
    pub extend: ExtendSection,
}

/// The `theme.extend` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExtendSection {
    /// Animation name to `"<keyframes> <timing>"` shorthand.
    #[serde(default)]
    pub animation: IndexMap<String, String>,
    /// Keyframe set name to stop (`"33%"`, `from`, `to`) to body.
    #[serde(default)]
    pub keyframes: IndexMap<String, IndexMap<String, KeyframeConfig>>,
    #[serde(default)]
    pub box_shadow: IndexMap<String, String>,
    #[serde(default)]
    pub background_image: IndexMap<String, Vec<GradientLayerConfig>>,
    #[serde(default)]
    pub colors: IndexMap<String, ShadeEntries>,
    #[serde(default)]
    pub font_family: IndexMap<String, FontFamilyConfig>,
}

/// Body of one keyframe stop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyframeConfig {
    pub transform: String,
}

/// One gradient layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradientLayerConfig {
    #[serde(default)]
    pub kind: GradientKind,
    /// Position (radial) or direction (linear).
    pub at: String,
    pub color: String,
    pub stop: String,
}

/// A font family: a bare list, or fonts plus a default fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FontFamilyConfig {
    List(Vec<String>),
    Detailed {
        #[serde(default)]
        fonts: Vec<String>,
        #[serde(default)]
        fallback: Option<DefaultStack>,
    },
}

/// A plugin entry: an external package name or an inline utility.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PluginConfig {
    External(String),
    Utility { utility: UtilityConfig },
}

/// An inline utility rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UtilityConfig {
    pub name: String,
    #[serde(default)]
    pub properties: IndexMap<String, String>,
    #[serde(default)]
    pub variants: Vec<String>,
}

/// A shade key as written in a file: `500` in YAML, `"500"` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShadeToken(pub String);

impl<'de> Deserialize<'de> for ShadeToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ShadeTokenVisitor;

        impl Visitor<'_> for ShadeTokenVisitor {
            type Value = ShadeToken;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a shade key such as 50 or \"500\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ShadeToken, E> {
                Ok(ShadeToken(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ShadeToken, E> {
                Ok(ShadeToken(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ShadeToken, E> {
                Ok(ShadeToken(v.to_string()))
            }
        }

        deserializer.deserialize_any(ShadeTokenVisitor)
    }
}

/// A role's shade entries in file order, repeated keys included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadeEntries(pub Vec<(ShadeToken, String)>);

impl ShadeEntries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for ShadeEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ShadeEntriesVisitor;

        impl<'de> Visitor<'de> for ShadeEntriesVisitor {
            type Value = ShadeEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of shade keys to colors")
            }

            fn visit_map<A: de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<ShadeEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(11));
                while let Some(entry) = map.next_entry::<ShadeToken, String>()? {
                    entries.push(entry);
                }
                Ok(ShadeEntries(entries))
            }
        }

        deserializer.deserialize_map(ShadeEntriesVisitor)
    }
}

impl ThemeConfig {
    /// Parses YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SchemaError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Parses JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SchemaError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Reads a `.yaml`, `.yml` or `.json` configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !CONFIG_EXTENSIONS.contains(&extension.as_str()) {
            return Err(SchemaError::Load {
                message: format!(
                    "unsupported configuration file {} (expected one of: {})",
                    path.display(),
                    CONFIG_EXTENSIONS.join(", ")
                ),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Load {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        tracing::debug!(path = %path.display(), "loading theme configuration");

        let parsed = if extension == "json" {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };
        parsed.map_err(|e| match e {
            SchemaError::Parse { message, .. } => SchemaError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Maps the configuration onto a builder.
    ///
    /// # Errors
    ///
    /// Fails on shade keys outside the scale, unparseable animation timing,
    /// animations naming undeclared keyframes, and invalid keyframe stops.
    pub fn into_builder(self) -> Result<ThemeBuilder> {
        let extend = self.theme.extend;
        let mut builder = ThemeBuilder::new()
            .content(self.content)
            .dark_mode(self.dark_mode);

        for (role, shades) in extend.colors {
            let table = shade_table(&role, shades)?;
            builder = builder.color_role(role, table);
        }

        let mut unused: Vec<&String> = extend.keyframes.keys().collect();
        for (name, shorthand) in &extend.animation {
            let animation = animation_from_shorthand(name, shorthand, &extend.keyframes)?;
            unused.retain(|k| k.as_str() != animation.keyframes_name());
            builder = builder.animation(animation);
        }
        for keyframes in unused {
            tracing::warn!(keyframes = %keyframes, "keyframes declared but not used by any animation");
        }

        for (name, layers) in extend.background_image {
            let gradient = layers
                .into_iter()
                .fold(GradientDefinition::new(name), |g, layer| {
                    g.layer(layer.into_layer())
                });
            builder = builder.gradient(gradient);
        }

        for (name, family) in extend.font_family {
            let family = match family {
                FontFamilyConfig::List(fonts) => FontFamily::new(name, fonts),
                FontFamilyConfig::Detailed { fonts, fallback } => {
                    let family = FontFamily::new(name, fonts);
                    match fallback {
                        Some(stack) => family.with_fallback(stack),
                        None => family,
                    }
                }
            };
            builder = builder.font_family(family);
        }

        for (name, value) in extend.box_shadow {
            builder = builder.box_shadow(name, value);
        }

        for plugin in self.plugins {
            builder = match plugin {
                PluginConfig::External(name) => builder.plugin(name),
                PluginConfig::Utility { utility } => {
                    builder.register_utility_plugin(utility.into_rule())
                }
            };
        }

        Ok(builder)
    }
}

impl GradientLayerConfig {
    fn into_layer(self) -> GradientLayer {
        match self.kind {
            GradientKind::Radial => GradientLayer::radial(self.at, self.color, self.stop),
            GradientKind::Linear => GradientLayer::linear(self.at, self.color, self.stop),
        }
    }
}

impl UtilityConfig {
    fn into_rule(self) -> UtilityPluginRule {
        let rule = self
            .properties
            .into_iter()
            .fold(UtilityPluginRule::new(self.name), |r, (p, v)| r.property(p, v));
        self.variants.into_iter().fold(rule, |r, v| r.variant(v))
    }
}

fn shade_table(role: &str, shades: ShadeEntries) -> Result<ShadeTable> {
    let mut table = ShadeTable::new();
    for (token, value) in shades.0 {
        let key = token
            .0
            .parse::<ShadeKey>()
            .map_err(|_| SchemaError::UnknownShade {
                role: role.to_string(),
                key: token.0.clone(),
            })?;
        if table.insert(key, ColorValue::parse(&value)).is_some() {
            return Err(SchemaError::DuplicateShade {
                role: role.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(table)
}

fn animation_from_shorthand(
    name: &str,
    shorthand: &str,
    keyframes: &IndexMap<String, IndexMap<String, KeyframeConfig>>,
) -> Result<AnimationDefinition> {
    let shorthand = shorthand.trim();
    let (keyframes_name, timing) = shorthand
        .split_once(char::is_whitespace)
        .unwrap_or((shorthand, ""));

    let timing: TimingSpec = timing
        .parse()
        .map_err(|message| SchemaError::InvalidTiming {
            animation: name.to_string(),
            timing: shorthand.to_string(),
            message,
        })?;

    let stops = keyframes
        .get(keyframes_name)
        .ok_or_else(|| SchemaError::UndefinedKeyframes {
            animation: name.to_string(),
            keyframes: keyframes_name.to_string(),
        })?;

    let stops = stops
        .iter()
        .map(|(stop, body)| {
            Keyframe::parse_stop(stop)
                .map(|percent| Keyframe::new(percent, body.transform.clone()))
                .ok_or_else(|| SchemaError::InvalidKeyframe {
                    animation: name.to_string(),
                    stop: stop.clone(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut animation = AnimationDefinition::new(name, timing).stops(stops);
    if keyframes_name != name {
        animation = animation.keyframes_named(keyframes_name);
    }
    Ok(animation)
}

/// Loads a configuration file and emits its descriptor.
pub fn load_descriptor<P: AsRef<Path>>(path: P) -> Result<ThemeDescriptor> {
    ThemeConfig::from_file(path)?.into_builder()?.emit_descriptor()
}
