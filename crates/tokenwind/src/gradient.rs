//! Layered background gradients.
//!
//! A gradient utility is a stack of layers painted in declaration order: the
//! first layer is the topmost. Each layer fades one colour from a position out
//! to transparent at its stop. Composition joins the layers into a single
//! `background-image` value and never reorders them.

use serde::{Deserialize, Serialize};

use crate::color::ColorValue;
use crate::error::{Result, SchemaError};

/// Gradient function used for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// `radial-gradient(at <position>, ...)`
    #[default]
    Radial,
    /// `linear-gradient(<direction>, ...)`
    Linear,
}

/// One `(position, color, stop)` layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GradientLayer {
    kind: GradientKind,
    position: String,
    color: ColorValue,
    stop: String,
}

impl GradientLayer {
    /// A radial layer centred at `position` (`"56% 0%"`).
    pub fn radial(
        position: impl Into<String>,
        color: impl Into<ColorValue>,
        stop: impl Into<String>,
    ) -> Self {
        Self {
            kind: GradientKind::Radial,
            position: position.into(),
            color: color.into(),
            stop: stop.into(),
        }
    }

    /// A linear layer running towards `direction` (`"to right"`, `"45deg"`).
    pub fn linear(
        direction: impl Into<String>,
        color: impl Into<ColorValue>,
        stop: impl Into<String>,
    ) -> Self {
        Self {
            kind: GradientKind::Linear,
            position: direction.into(),
            color: color.into(),
            stop: stop.into(),
        }
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn color(&self) -> &ColorValue {
        &self.color
    }

    pub fn stop(&self) -> &str {
        &self.stop
    }

    /// This layer's gradient function call.
    pub fn to_css(&self) -> String {
        match self.kind {
            GradientKind::Radial => format!(
                "radial-gradient(at {}, {} 0, transparent {})",
                self.position, self.color, self.stop
            ),
            GradientKind::Linear => format!(
                "linear-gradient({}, {} 0, transparent {})",
                self.position, self.color, self.stop
            ),
        }
    }
}

/// Joins layers into one `background-image` value, first layer on top.
pub fn compose_gradient(layers: &[GradientLayer]) -> String {
    layers
        .iter()
        .map(GradientLayer::to_css)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A named background-image utility built from gradient layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientDefinition {
    name: String,
    layers: Vec<GradientLayer>,
}

impl GradientDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: Vec::new(),
        }
    }

    /// Appends a layer beneath the ones already added.
    pub fn layer(mut self, layer: GradientLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> &[GradientLayer] {
        &self.layers
    }

    /// Validates the layers and composes them.
    ///
    /// # Errors
    ///
    /// [`SchemaError::EmptyGradient`] without layers, [`SchemaError::InvalidColor`]
    /// for a layer colour that does not parse.
    pub fn compose(&self) -> Result<String> {
        if self.layers.is_empty() {
            return Err(SchemaError::EmptyGradient {
                gradient: self.name.clone(),
            });
        }
        for (i, layer) in self.layers.iter().enumerate() {
            layer
                .color
                .validate(&format!("backgroundImage.{}[{}]", self.name, i))?;
        }
        Ok(compose_gradient(&self.layers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_css() {
        let layer = GradientLayer::radial("56% 0%", "rgb(22, 163, 74)", "33%");
        assert_eq!(
            layer.to_css(),
            "radial-gradient(at 56% 0%, rgb(22, 163, 74) 0, transparent 33%)"
        );

        let linear = GradientLayer::linear("to right", "var(--accent-500)", "80%");
        assert_eq!(
            linear.to_css(),
            "linear-gradient(to right, var(--accent-500) 0, transparent 80%)"
        );
    }

    #[test]
    fn test_compose_preserves_order() {
        let a = GradientLayer::radial("56% 0%", "rgb(22, 163, 74)", "33%");
        let b = GradientLayer::radial("62% 23%", "rgb(234, 179, 8)", "49%");

        let forward = compose_gradient(&[a.clone(), b.clone()]);
        let reversed = compose_gradient(&[b, a]);
        assert!(forward.starts_with("radial-gradient(at 56% 0%"));
        assert!(reversed.starts_with("radial-gradient(at 62% 23%"));
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_compose_empty_is_empty_string() {
        assert_eq!(compose_gradient(&[]), "");
    }

    #[test]
    fn test_definition_compose() {
        let def = GradientDefinition::new("custom-gradient")
            .layer(GradientLayer::radial("56% 0%", "rgb(22, 163, 74)", "33%"))
            .layer(GradientLayer::radial("0% 43%", "rgb(249, 115, 22)", "60%"));
        assert_eq!(
            def.compose().unwrap(),
            "radial-gradient(at 56% 0%, rgb(22, 163, 74) 0, transparent 33%), \
             radial-gradient(at 0% 43%, rgb(249, 115, 22) 0, transparent 60%)"
        );
    }

    #[test]
    fn test_definition_errors() {
        let empty = GradientDefinition::new("none");
        assert_eq!(
            empty.compose().unwrap_err(),
            SchemaError::EmptyGradient {
                gradient: "none".to_string()
            }
        );

        let bad = GradientDefinition::new("bad").layer(GradientLayer::radial("0% 0%", "rgb(1, 2", "10%"));
        match bad.compose().unwrap_err() {
            SchemaError::InvalidColor { field, .. } => assert_eq!(field, "backgroundImage.bad[0]"),
            other => panic!("expected InvalidColor, got {:?}", other),
        }
    }
}
