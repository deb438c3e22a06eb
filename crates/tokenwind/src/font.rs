//! Font families and their fallback chains.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// A system fallback chain supplied by the class generator's default theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultStack {
    Sans,
    Serif,
    Mono,
}

impl DefaultStack {
    /// The fonts in this chain, most preferred first.
    pub fn fonts(self) -> &'static [&'static str] {
        match self {
            DefaultStack::Sans => &[
                "ui-sans-serif",
                "system-ui",
                "sans-serif",
                "\"Apple Color Emoji\"",
                "\"Segoe UI Emoji\"",
                "\"Segoe UI Symbol\"",
                "\"Noto Color Emoji\"",
            ],
            DefaultStack::Serif => &[
                "ui-serif",
                "Georgia",
                "Cambria",
                "\"Times New Roman\"",
                "Times",
                "serif",
            ],
            DefaultStack::Mono => &[
                "ui-monospace",
                "SFMono-Regular",
                "Menlo",
                "Monaco",
                "Consolas",
                "\"Liberation Mono\"",
                "\"Courier New\"",
                "monospace",
            ],
        }
    }
}

impl fmt::Display for DefaultStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DefaultStack::Sans => "sans",
            DefaultStack::Serif => "serif",
            DefaultStack::Mono => "mono",
        })
    }
}

/// A named font family: preferred fonts, then an optional default chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontFamily {
    name: String,
    fonts: Vec<String>,
    fallback: Option<DefaultStack>,
}

impl FontFamily {
    pub fn new<I, S>(name: impl Into<String>, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fonts: fonts.into_iter().map(Into::into).collect(),
            fallback: None,
        }
    }

    /// Ends the family with `stack`.
    pub fn with_fallback(mut self, stack: DefaultStack) -> Self {
        self.fallback = Some(stack);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fonts declared for this family, without the fallback chain.
    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    pub fn fallback(&self) -> Option<DefaultStack> {
        self.fallback
    }

    /// Declared fonts followed by the default chain.
    pub fn resolved(&self) -> Vec<String> {
        let chain = self.fallback.map(DefaultStack::fonts).unwrap_or(&[]);
        self.fonts
            .iter()
            .cloned()
            .chain(chain.iter().map(|f| f.to_string()))
            .collect()
    }

    /// Checks that the family resolves to at least one font.
    pub fn validate(&self) -> Result<()> {
        let has_font = self.fonts.iter().any(|f| !f.trim().is_empty());
        if self.name.trim().is_empty() || (!has_font && self.fallback.is_none()) {
            return Err(SchemaError::UnresolvedFontFallback {
                family: self.name.clone(),
            });
        }
        Ok(())
    }
}
