//! Show settings and palette
//!
//! Defaults reproduce the page's built-in show. An inline JSON config
//! element can override individual fields on the web build; nothing is
//! ever written back.

use serde::{Deserialize, Serialize};

use crate::consts;

/// The built-in palette: golds and soft accents
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#d4af37", "#f0d875", "#faf8f5", "#ff6b6b", "#4ecdc4", "#ffe66d",
];

/// Show configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rocket/spark colors as hex triples
    pub palette: Vec<String>,
    /// Rockets launched over one show
    pub max_rockets: u32,
    /// Launch cadence band, milliseconds between rockets
    pub launch_delay_min_ms: f64,
    pub launch_delay_max_ms: f64,
    /// Wind-down after the final launch before the frame loop stops
    pub grace_ms: f64,
    /// Fixed seed for a reproducible show (time-derived when absent)
    pub seed: Option<u64>,
    /// Accessibility: shorten the show for motion-sensitive viewers
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            max_rockets: consts::MAX_ROCKETS,
            launch_delay_min_ms: consts::LAUNCH_DELAY_MIN_MS,
            launch_delay_max_ms: consts::LAUNCH_DELAY_MAX_MS,
            grace_ms: consts::GRACE_MS,
            seed: None,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// DOM id of the optional inline JSON config element
    const CONFIG_ELEMENT_ID: &'static str = "skyburst-config";

    /// Palette entries, falling back to the built-in set when empty
    pub fn effective_palette(&self) -> &[String] {
        if self.palette.is_empty() {
            // A show with no colors is a config mistake; keep drawing
            static FALLBACK: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
            FALLBACK.get_or_init(|| DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect())
        } else {
            &self.palette
        }
    }

    /// Rocket budget (respects reduced_motion)
    pub fn effective_max_rockets(&self) -> u32 {
        if self.reduced_motion {
            self.max_rockets.min(5)
        } else {
            self.max_rockets
        }
    }

    /// Launch delay band with the max clamped to at least the min
    pub fn delay_band_ms(&self) -> (f64, f64) {
        let min = self.launch_delay_min_ms.max(0.0);
        (min, self.launch_delay_max_ms.max(min))
    }

    /// Parse settings from a JSON string, logging and defaulting on failure
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => {
                log::info!("Loaded settings from page config");
                settings
            }
            Err(err) => {
                log::warn!("Ignoring malformed page config: {err}");
                Self::default()
            }
        }
    }

    /// Load settings from the page's inline config element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => Self::from_json(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native builds have no page to read from
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_show_constants() {
        let s = Settings::default();
        assert_eq!(s.palette.len(), 6);
        assert_eq!(s.max_rockets, 20);
        assert_eq!(s.delay_band_ms(), (250.0, 650.0));
        assert_eq!(s.grace_ms, 4000.0);
        assert!(s.seed.is_none());
    }

    #[test]
    fn test_partial_json_keeps_remaining_defaults() {
        let s = Settings::from_json(r#"{"max_rockets": 8, "seed": 42}"#);
        assert_eq!(s.max_rockets, 8);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.palette.len(), 6);
        assert_eq!(s.grace_ms, 4000.0);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let s = Settings::from_json("{nope");
        assert_eq!(s.max_rockets, 20);
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let s = Settings::from_json(r#"{"palette": []}"#);
        assert_eq!(s.effective_palette().len(), 6);
    }

    #[test]
    fn test_reduced_motion_caps_rockets() {
        let mut s = Settings::default();
        assert_eq!(s.effective_max_rockets(), 20);
        s.reduced_motion = true;
        assert_eq!(s.effective_max_rockets(), 5);
    }

    #[test]
    fn test_inverted_delay_band_is_clamped() {
        let s = Settings::from_json(
            r#"{"launch_delay_min_ms": 500.0, "launch_delay_max_ms": 100.0}"#,
        );
        assert_eq!(s.delay_band_ms(), (500.0, 500.0));
    }
}
