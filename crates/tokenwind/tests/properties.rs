//! Property-based tests for descriptor composition using proptest.

use proptest::prelude::*;
use tokenwind::{
    compose_animations, compose_gradient, AnimationDefinition, ColorRole, ColorValue,
    GradientLayer, Keyframe, SchemaError, ShadeKey, ShadeTable, ThemeBuilder, TimingSpec,
    UtilityPluginRule,
};

// ============================================================================
// Strategies
// ============================================================================

fn hex_color() -> impl Strategy<Value = String> {
    "#[0-9a-f]{6}"
}

fn shade_values() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(hex_color(), 11)
}

fn transform() -> impl Strategy<Value = String> {
    (-100i32..100, -100i32..100, 5u32..20)
        .prop_map(|(x, y, s)| format!("translate({}px, {}px) scale({}.{})", x, y, s / 10, s % 10))
}

/// Distinct stops in ascending order, paired with transforms.
fn keyframes() -> impl Strategy<Value = Vec<Keyframe>> {
    prop::collection::btree_set(0u8..=100, 1..12).prop_flat_map(|stops| {
        let n = stops.len();
        prop::collection::vec(transform(), n).prop_map(move |transforms| {
            stops
                .iter()
                .zip(transforms)
                .map(|(p, t)| Keyframe::new(*p, t))
                .collect()
        })
    })
}

/// Layers with pairwise distinct positions, so no sequence is a palindrome.
fn layers() -> impl Strategy<Value = Vec<GradientLayer>> {
    prop::collection::btree_set(0u8..=100, 2..9)
        .prop_flat_map(|xs| {
            let n = xs.len();
            (Just(xs), prop::collection::vec(hex_color(), n))
        })
        .prop_map(|(xs, colors)| {
            xs.iter()
                .zip(colors)
                .map(|(x, c)| GradientLayer::radial(format!("{}% 0%", x), c, "50%"))
                .collect()
        })
}

fn table(values: &[String]) -> ShadeTable {
    ShadeKey::ALL
        .iter()
        .zip(values)
        .map(|(k, v)| (*k, ColorValue::literal(v.clone())))
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Composing a role keeps slots in ascending order and values untouched.
    #[test]
    fn color_role_preserves_literals(values in shade_values()) {
        let role = ColorRole::new("primary", table(&values)).unwrap();

        let keys: Vec<u16> = role.iter().map(|(k, _)| k.value()).collect();
        prop_assert_eq!(keys, vec![50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]);

        let emitted: Vec<String> = role.iter().map(|(_, v)| v.to_string()).collect();
        prop_assert_eq!(emitted, values);
    }

    /// Any role with fewer than eleven slots is rejected, never padded.
    #[test]
    fn short_roles_are_rejected(values in shade_values(), keep in 0usize..11) {
        let shades: ShadeTable = table(&values).into_iter().take(keep).collect();
        match ColorRole::new("accent", shades) {
            Err(SchemaError::MissingShade(e)) => {
                prop_assert_eq!(e.supplied, keep);
                prop_assert_eq!(e.missing.len(), 11 - keep);
            }
            other => prop_assert!(false, "expected MissingShade, got {:?}", other),
        }
    }

    /// Keyframe output does not depend on declaration order.
    #[test]
    fn keyframes_invariant_under_permutation(
        (sorted, shuffled) in keyframes().prop_flat_map(|k| (Just(k.clone()), Just(k).prop_shuffle()))
    ) {
        let timing: TimingSpec = "7s infinite".parse().unwrap();
        let a = compose_animations(vec![
            AnimationDefinition::new("blob", timing.clone()).stops(sorted.clone()),
        ]).unwrap();
        let b = compose_animations(vec![
            AnimationDefinition::new("blob", timing).stops(shuffled),
        ]).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a["blob"].keyframes(), sorted.as_slice());
    }

    /// Reversing gradient layers changes the composed expression.
    #[test]
    fn gradient_is_order_sensitive(layers in layers()) {
        let forward = compose_gradient(&layers);
        let mut reversed_layers = layers.clone();
        reversed_layers.reverse();
        let reversed = compose_gradient(&reversed_layers);

        prop_assert_ne!(&forward, &reversed);
        let first = layers[0].to_css();
        prop_assert!(forward.starts_with(&first));
        prop_assert!(reversed.ends_with(&first));
    }

    /// Emitting from identical builders yields equal descriptors and JSON.
    #[test]
    fn emit_is_deterministic(
        values in shade_values(),
        stops in keyframes(),
        globs in prop::collection::vec("\\./src/[a-z]{1,6}/\\*\\*/\\*\\.rs", 0..6),
        duplicates in 0usize..3,
    ) {
        let timing: TimingSpec = "8s infinite".parse().unwrap();
        let rule = UtilityPluginRule::new("input-dark")
            .property("color-scheme", "dark")
            .variant("dark");
        let builder = (0..duplicates).fold(
            ThemeBuilder::new()
                .content(globs)
                .color_role("primary", table(&values))
                .variable_role("accent")
                .animation(AnimationDefinition::new("blob2", timing).stops(stops)),
            |b, _| b.register_utility_plugin(rule.clone()),
        );

        let first = builder.clone().emit_descriptor().unwrap();
        let second = builder.emit_descriptor().unwrap();
        prop_assert_eq!(first.utility_rules().count(), duplicates);
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        prop_assert_eq!(first, second);
    }
}
