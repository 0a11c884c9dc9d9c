//! Engine tuning constants.
//!
//! Every magic number the behaviors use lives here with its stock value,
//! so a host can override the lot from a TOML file without touching
//! code. Collaborator selectors are deliberately *not* configurable —
//! they are the engine's contract with the page, not tuning.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tuning constants for every behavior the engine wires.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Viewport width at or below which the sidebar behaves as a mobile
    /// overlay.
    pub mobile_breakpoint: f32,

    /// Scroll-spy visibility threshold.
    pub spy_threshold: f32,
    /// Scroll-spy band margins (CSS root-margin shorthand).
    pub spy_root_margin: String,
    /// Scroll offset below which the load-time default link activates.
    pub hero_activation_limit: f32,

    /// Pixels left above an anchor-scroll target.
    pub anchor_offset: f32,

    /// Content-block reveal threshold.
    pub content_threshold: f32,
    /// Content-block reveal band margins.
    pub content_root_margin: String,
    /// Content blocks start this many pixels below their resting place.
    pub content_rise: f32,
    /// Section-number reveal threshold.
    pub number_threshold: f32,
    /// Section numbers start this many pixels left of their resting place.
    pub number_slide: f32,
    /// Transition registered on reveal targets.
    pub reveal_transition: String,

    /// Counter visibility threshold.
    pub counter_threshold: f32,
    /// Number of increments on the way to the counter target.
    pub counter_steps: u32,
    /// Counter tick cadence in milliseconds.
    pub counter_tick_ms: u64,

    /// Fraction of the scroll offset applied to the hero translation.
    pub parallax_factor: f32,
    /// Opacity lost by the hero over one viewport height of scroll.
    pub parallax_fade: f32,

    /// Delay before the load fade begins, in milliseconds.
    pub load_fade_delay_ms: u64,
    /// Transition registered on the body for the load fade.
    pub load_fade_transition: String,

    /// Border accent while hovering a card.
    pub hover_accent: String,
    /// Border color restored when the pointer leaves.
    pub hover_resting: String,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,

            spy_threshold: 0.3,
            spy_root_margin: "-100px 0px -50% 0px".to_string(),
            hero_activation_limit: 100.0,

            anchor_offset: 20.0,

            content_threshold: 0.1,
            content_root_margin: "0px 0px -50px 0px".to_string(),
            content_rise: 20.0,
            number_threshold: 0.5,
            number_slide: 20.0,
            reveal_transition: "opacity 0.6s ease, transform 0.6s ease".to_string(),

            counter_threshold: 0.5,
            counter_steps: 20,
            counter_tick_ms: 30,

            parallax_factor: 0.5,
            parallax_fade: 0.5,

            load_fade_delay_ms: 100,
            load_fade_transition: "opacity 0.5s ease".to_string(),

            hover_accent: "var(--green)".to_string(),
            hover_resting: "var(--lightest-navy)".to_string(),
        }
    }
}

impl MotionConfig {
    /// Parse a TOML document; absent keys keep their stock values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load a config file. A missing file is not an error — the stock
    /// configuration applies.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_values() {
        let config = MotionConfig::default();
        assert_eq!(config.mobile_breakpoint, 768.0);
        assert_eq!(config.spy_threshold, 0.3);
        assert_eq!(config.counter_steps, 20);
        assert_eq!(config.counter_tick_ms, 30);
        assert_eq!(config.spy_root_margin, "-100px 0px -50% 0px");
    }

    #[test]
    fn partial_toml_overrides() {
        let config = MotionConfig::from_toml_str(
            r#"
            mobile_breakpoint = 900
            counter_tick_ms = 16
            "#,
        )
        .unwrap();
        assert_eq!(config.mobile_breakpoint, 900.0);
        assert_eq!(config.counter_tick_ms, 16);
        // Untouched keys keep their stock values.
        assert_eq!(config.anchor_offset, 20.0);
    }

    #[test]
    fn empty_toml_is_stock() {
        let config = MotionConfig::from_toml_str("").unwrap();
        assert_eq!(config, MotionConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = MotionConfig::from_toml_str("no_such_key = 1");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_falls_back_to_stock() {
        let config = MotionConfig::load(Path::new("/nonexistent/motion.toml")).unwrap();
        assert_eq!(config, MotionConfig::default());
    }
}
