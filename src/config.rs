// config.rs - Typed component configuration and markup attribute parsing
use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::effects::counter::CounterTiming;
use crate::effects::interaction::RippleConfig;
use crate::effects::navigation::NavigationConfig;
use crate::effects::particles::{BounceConfig, DriftConfig};
use crate::effects::reveal::RevealConfig;
use crate::effects::text::SkeletonConfig;
use crate::error::{EffectsError, Result};
use crate::scene::SceneConfig;

/// String-encoded parameters attached to a page element, keyed by attribute
/// name (`data-target`, `data-magnetic`, ...).
pub type Attributes = HashMap<String, String>;

/// Typed config read once from an element's attributes.
///
/// Returns `None` when the element lacks the marker attribute, in which case
/// the behaviour is simply not attached.
pub trait FromAttributes: Sized {
    fn from_attributes(attrs: &Attributes) -> Option<Self>;
}

/// Build an attribute map from `(name, value)` pairs.
pub fn attributes<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Attributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Like `parseFloat`: accepts a leading decimal number and ignores trailing
/// junk (`"0.8x"` -> 0.8). Empty or non-numeric values are missing.
pub fn parse_float_attr(attrs: &Attributes, key: &str) -> Option<f32> {
    let raw = attrs.get(key)?.trim();
    let bytes = raw.as_bytes();
    let skip_digits = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = skip_digits(start);
    let mut has_digits = end > start;
    if bytes.get(end) == Some(&b'.') {
        let fraction = skip_digits(end + 1);
        has_digits |= fraction > end + 1;
        end = fraction;
    }
    if !has_digits {
        return None;
    }

    // Exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = skip_digits(sign);
        if exponent > sign {
            end = exponent;
        }
    }
    raw[..end].parse().ok()
}

/// Like `parseInt`: accepts a leading integer and ignores trailing junk
/// (`"250ms"` -> 250).
pub fn parse_int_attr(attrs: &Attributes, key: &str) -> Option<i64> {
    let raw = attrs.get(key)?.trim();
    let end = raw
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}

/// Top-level configuration for every effect on the page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub scene: SceneConfig,
    pub reveal: RevealConfig,
    pub counter: CounterTiming,
    pub drift: DriftConfig,
    pub bounce: BounceConfig,
    pub navigation: NavigationConfig,
    pub ripple: RippleConfig,
    pub skeleton: SkeletonConfig,
    /// Request minimised animation regardless of the platform setting
    pub reduced_motion: bool,
}

impl EffectsConfig {
    /// Load from a JSON file, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::info!("No config file given, using built-in defaults");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| EffectsError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw).map_err(|source| EffectsError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded effects config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
