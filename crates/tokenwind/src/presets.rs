//! Ready-made theme declarations.
//!
//! Two instantiations of the same schema ship with the crate:
//!
//! - [`semantic`]: five variable-backed roles (`text`, `background`,
//!   `primary`, `secondary`, `accent`), the `blob`/`blob2` animations, a
//!   layered radial `custom-gradient`, the `white-md` shadow, the Kanit font
//!   family and the `input-dark` utility.
//! - [`flat_primary`]: a single literal blue `primary` palette and no plugins.
//!
//! [`SEMANTIC_YAML`] is the file form of [`semantic`] and loads to an equal
//! descriptor.

use crate::animation::{AnimationDefinition, Iteration, TimingSpec};
use crate::builder::ThemeBuilder;
use crate::color::{ColorValue, ShadeKey, ShadeTable};
use crate::dark_mode::DarkModeStrategy;
use crate::font::{DefaultStack, FontFamily};
use crate::gradient::{GradientDefinition, GradientLayer};
use crate::plugin::UtilityPluginRule;

/// The semantic theme as a configuration file.
pub const SEMANTIC_YAML: &str = include_str!("../themes/semantic.yaml");

/// Content globs shared by both presets.
pub const CONTENT: [&str; 4] = [
    "./src/**/*.rs",
    "./index.html",
    "./src/**/*.html",
    "./src/**/*.css",
];

/// Semantic roles, each bound to `--<role>-<shade>` variables.
pub const SEMANTIC_ROLES: [&str; 5] = ["text", "background", "primary", "secondary", "accent"];

/// The literal blue palette of [`flat_primary`], lightest first.
pub const BLUE: [&str; 11] = [
    "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
    "#1e40af", "#1e3a8a", "#172554",
];

const CUSTOM_GRADIENT: [(&str, &str, &str); 8] = [
    ("56% 0%", "rgb(22, 163, 74)", "33%"),
    ("62% 23%", "rgb(234, 179, 8)", "49%"),
    ("42% 0%", "rgb(16, 185, 129)", "47%"),
    ("68% 26%", "rgb(249, 115, 22)", "65%"),
    ("0% 43%", "rgb(249, 115, 22)", "60%"),
    ("29% 21%", "rgb(132, 204, 22)", "69%"),
    ("4% 12%", "rgb(245, 158, 11)", "64%"),
    ("36% 40%", "rgb(52, 211, 153)", "100%"),
];

const REST: &str = "translate(0px, 0px) scale(1)";

/// The full semantic theme.
pub fn semantic() -> ThemeBuilder {
    let builder = ThemeBuilder::new()
        .content(CONTENT)
        .dark_mode(DarkModeStrategy::Class)
        .animation(
            blob("blob", 7)
                .stop(0, REST)
                .stop(33, "translate(30px, -50px) scale(1.1)")
                .stop(66, "translate(-20px, 20px) scale(0.9)")
                .stop(100, REST),
        )
        .animation(
            blob("blob2", 8)
                .stop(0, REST)
                .stop(33, "translate(-51px, 30px) scale(1.1)")
                .stop(66, "translate(20px, -20px) scale(0.9)")
                .stop(100, REST),
        )
        .box_shadow(
            "white-md",
            "0 4px 6px -1px rgba(255, 255, 255, 0.1), 0 2px 4px -1px rgba(255, 255, 255, 0.06)",
        )
        .gradient(
            CUSTOM_GRADIENT
                .iter()
                .fold(GradientDefinition::new("custom-gradient"), |g, (at, color, stop)| {
                    g.layer(GradientLayer::radial(*at, *color, *stop))
                }),
        );

    SEMANTIC_ROLES
        .iter()
        .fold(builder, |b, role| b.variable_role(*role))
        .font_family(FontFamily::new("kanit", ["Kanit"]).with_fallback(DefaultStack::Sans))
        .plugin("tailwindcss")
        .plugin("autoprefixer")
        .register_utility_plugin(
            UtilityPluginRule::new("input-dark")
                .property("color-scheme", "dark")
                .variant("dark"),
        )
}

/// A single literal `primary` palette without plugins or extensions.
pub fn flat_primary() -> ThemeBuilder {
    let shades: ShadeTable = ShadeKey::ALL
        .iter()
        .zip(BLUE)
        .map(|(k, v)| (*k, ColorValue::literal(v)))
        .collect();
    ThemeBuilder::new()
        .content(CONTENT)
        .dark_mode(DarkModeStrategy::Class)
        .color_role("primary", shades)
}

fn blob(name: &str, seconds: u32) -> AnimationDefinition {
    let timing = TimingSpec::new(format!("{}s", seconds), Some(Iteration::Infinite));
    AnimationDefinition::new(name, timing)
}
