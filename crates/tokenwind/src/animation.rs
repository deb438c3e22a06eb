//! Keyframe animations.
//!
//! An animation is a timing spec (`7s infinite`) plus a sequence of keyframe
//! stops. Stops may be declared in any order; composition sorts them by
//! percentage so the emitted sequence depends only on the set of stops.
//!
//! ```rust
//! use tokenwind::{compose_animations, AnimationDefinition};
//!
//! let blob = AnimationDefinition::new("blob", "7s infinite".parse().unwrap())
//!     .stop(100, "translate(0px, 0px) scale(1)")
//!     .stop(0, "translate(0px, 0px) scale(1)")
//!     .stop(33, "translate(30px, -50px) scale(1.1)");
//!
//! let composed = compose_animations(vec![blob]).unwrap();
//! let stops: Vec<u8> = composed["blob"].keyframes().iter().map(|k| k.percent()).collect();
//! assert_eq!(stops, vec![0, 33, 100]);
//! assert_eq!(composed["blob"].shorthand(), "blob 7s infinite");
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use indexmap::IndexMap;

use crate::error::{Result, SchemaError};

/// One keyframe stop: a percentage and the transform applied there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyframe {
    percent: u8,
    transform: String,
}

impl Keyframe {
    pub fn new(percent: u8, transform: impl Into<String>) -> Self {
        Self {
            percent,
            transform: transform.into(),
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn transform(&self) -> &str {
        &self.transform
    }

    /// The stop as written in a keyframes block (`33%`).
    pub fn selector(&self) -> String {
        format!("{}%", self.percent)
    }

    /// Reads a stop key: `N%`, `from` or `to`. Returns `None` outside 0..=100.
    ///
    /// Stops are whole percentages; fractional stops such as `12.5%` are not
    /// accepted.
    pub fn parse_stop(stop: &str) -> Option<u8> {
        match stop.trim() {
            "from" => Some(0),
            "to" => Some(100),
            other => other
                .strip_suffix('%')
                .and_then(|n| n.trim().parse::<u8>().ok())
                .filter(|n| *n <= 100),
        }
    }
}

/// How many times an animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Iteration {
    Infinite,
    Count(u32),
}

impl fmt::Display for Iteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Iteration::Infinite => f.write_str("infinite"),
            Iteration::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Duration, iteration count and any other animation shorthand tokens.
///
/// Tokens other than the first time value and the iteration count (easing
/// functions, delays, directions) are kept verbatim in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimingSpec {
    duration: String,
    modifiers: Vec<String>,
    iteration: Option<Iteration>,
}

impl TimingSpec {
    /// Timing with no extra modifiers. `duration` is kept as written.
    pub fn new(duration: impl Into<String>, iteration: Option<Iteration>) -> Self {
        Self {
            duration: duration.into(),
            modifiers: Vec::new(),
            iteration,
        }
    }

    /// Appends a modifier token (`ease-in-out`, `alternate`, a delay).
    pub fn modifier(mut self, token: impl Into<String>) -> Self {
        self.modifiers.push(token.into());
        self
    }

    /// The duration token as written (`7s`, `250ms`).
    pub fn duration_text(&self) -> &str {
        &self.duration
    }

    /// The duration as a [`Duration`].
    pub fn duration(&self) -> Duration {
        parse_time(&self.duration).unwrap_or_default()
    }

    /// Iteration count; `None` means the CSS default of one run.
    pub fn iteration(&self) -> Option<Iteration> {
        self.iteration
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }
}

impl FromStr for TimingSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut duration = None;
        let mut iteration = None;
        let mut modifiers = Vec::new();

        for token in s.split_whitespace() {
            if duration.is_none() && parse_time(token).is_some() {
                duration = Some(token.to_string());
                continue;
            }

            let parsed = if token == "infinite" {
                Some(Iteration::Infinite)
            } else {
                token.parse::<u32>().ok().map(Iteration::Count)
            };
            match parsed {
                Some(_) if iteration.is_some() => {
                    return Err(format!("more than one iteration count ('{}')", token));
                }
                Some(it) => iteration = Some(it),
                None => modifiers.push(token.to_string()),
            }
        }

        let duration = duration.ok_or_else(|| "missing duration".to_string())?;
        Ok(Self {
            duration,
            modifiers,
            iteration,
        })
    }
}

impl fmt::Display for TimingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.duration)?;
        for modifier in &self.modifiers {
            write!(f, " {}", modifier)?;
        }
        if let Some(iteration) = self.iteration {
            write!(f, " {}", iteration)?;
        }
        Ok(())
    }
}

fn parse_time(token: &str) -> Option<Duration> {
    let (number, per_second) = if let Some(ms) = token.strip_suffix("ms") {
        (ms, 1000.0)
    } else if let Some(s) = token.strip_suffix('s') {
        (s, 1.0)
    } else {
        return None;
    };
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(value / per_second).ok()
}

/// An animation as declared: name, timing and keyframe stops in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDefinition {
    name: String,
    keyframes_name: Option<String>,
    timing: TimingSpec,
    stops: Vec<Keyframe>,
}

impl AnimationDefinition {
    pub fn new(name: impl Into<String>, timing: TimingSpec) -> Self {
        Self {
            name: name.into(),
            keyframes_name: None,
            timing,
            stops: Vec::new(),
        }
    }

    /// Runs a differently named keyframe set (defaults to the animation name).
    pub fn keyframes_named(mut self, keyframes: impl Into<String>) -> Self {
        self.keyframes_name = Some(keyframes.into());
        self
    }

    /// Adds a stop at `percent`.
    pub fn stop(mut self, percent: u8, transform: impl Into<String>) -> Self {
        self.stops.push(Keyframe::new(percent, transform));
        self
    }

    /// Adds several stops at once.
    pub fn stops<I: IntoIterator<Item = Keyframe>>(mut self, stops: I) -> Self {
        self.stops.extend(stops);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keyframes_name(&self) -> &str {
        self.keyframes_name.as_deref().unwrap_or(&self.name)
    }

    pub fn timing(&self) -> &TimingSpec {
        &self.timing
    }

    /// Stops in declaration order.
    pub fn declared_stops(&self) -> &[Keyframe] {
        &self.stops
    }
}

/// A validated animation with its stops in ascending percentage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedAnimation {
    name: String,
    keyframes_name: String,
    keyframes: Vec<Keyframe>,
    timing: TimingSpec,
}

impl ComposedAnimation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keyframes_name(&self) -> &str {
        &self.keyframes_name
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn timing(&self) -> &TimingSpec {
        &self.timing
    }

    /// The `animation` shorthand value, e.g. `blob 7s infinite`.
    pub fn shorthand(&self) -> String {
        format!("{} {}", self.keyframes_name, self.timing)
    }

    /// True when the sequence starts at 0% and ends at 100%.
    pub fn is_seamless(&self) -> bool {
        matches!(
            (self.keyframes.first(), self.keyframes.last()),
            (Some(first), Some(last)) if first.percent == 0 && last.percent == 100
        )
    }
}

/// Validates animations and sorts each one's stops by percentage.
///
/// A later definition with the same name replaces an earlier one, keeping the
/// earlier position.
///
/// # Errors
///
/// - [`SchemaError::EmptyAnimation`] for an animation without stops
/// - [`SchemaError::InvalidKeyframe`] for a stop above 100%, a repeated stop,
///   or an empty transform
/// - [`SchemaError::ConflictingKeyframes`] when two animations run the same
///   keyframe set name with different stops
pub fn compose_animations<I>(defs: I) -> Result<IndexMap<String, ComposedAnimation>>
where
    I: IntoIterator<Item = AnimationDefinition>,
{
    let mut composed = IndexMap::new();
    for def in defs {
        let animation = compose_one(def)?;
        if !animation.is_seamless() {
            tracing::warn!(
                animation = %animation.name,
                "keyframes do not run from 0% to 100%; the loop will jump"
            );
        }
        if composed.contains_key(&animation.name) {
            tracing::warn!(animation = %animation.name, "animation redefined; later definition wins");
        }
        let conflict = composed.values().find(|other: &&ComposedAnimation| {
            other.name != animation.name
                && other.keyframes_name == animation.keyframes_name
                && other.keyframes != animation.keyframes
        });
        if let Some(other) = conflict {
            return Err(SchemaError::ConflictingKeyframes {
                animation: animation.name,
                keyframes: animation.keyframes_name,
                other: other.name.clone(),
            });
        }
        composed.insert(animation.name.clone(), animation);
    }
    Ok(composed)
}

fn compose_one(def: AnimationDefinition) -> Result<ComposedAnimation> {
    let keyframes_name = def.keyframes_name().to_string();
    let AnimationDefinition {
        name,
        timing,
        mut stops,
        ..
    } = def;

    if stops.is_empty() {
        return Err(SchemaError::EmptyAnimation { animation: name });
    }

    for stop in &stops {
        if stop.percent > 100 || stop.transform.trim().is_empty() {
            return Err(SchemaError::InvalidKeyframe {
                animation: name,
                stop: stop.selector(),
            });
        }
    }

    stops.sort_by_key(|k| k.percent);
    if let Some(pair) = stops.windows(2).find(|w| w[0].percent == w[1].percent) {
        return Err(SchemaError::InvalidKeyframe {
            animation: name,
            stop: format!("{} (repeated)", pair[1].selector()),
        });
    }

    Ok(ComposedAnimation {
        name,
        keyframes_name,
        keyframes: stops,
        timing,
    })
}
