use log::{warn, Level};
use serde::Deserialize;

use crate::engine::{DetectionBand, EngineError, Theme};

/// Attribute on `<html>` that may carry a JSON override of [`EngineConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-scroll-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum spacing between processed scroll/resize samples.
    pub sample_interval_ms: f64,
    /// How long a theme candidate must hold before it is committed.
    pub debounce_ms: f64,
    pub detection_band: DetectionBand,
    /// Decimal places kept when comparing successive progress samples.
    pub progress_precision: u32,
    /// Use direct style writes on fine pointers too.
    pub prefer_direct_write: bool,
    pub initial_theme: Theme,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 32.0,
            debounce_ms: 50.0,
            detection_band: DetectionBand::default(),
            progress_precision: 3,
            prefer_direct_write: false,
            initial_theme: Theme::Light,
        }
    }
}

impl EngineConfig {
    pub fn validate(self) -> Result<Self, EngineError> {
        let band = self.detection_band;
        if !(0.0..=1.0).contains(&band.top) || !(0.0..=1.0).contains(&band.bottom) {
            return Err(EngineError::InvalidConfig(format!(
                "detection band {}..{} is outside the viewport",
                band.top, band.bottom
            )));
        }
        if band.top > band.bottom {
            return Err(EngineError::InvalidConfig(format!(
                "detection band top {} is below its bottom {}",
                band.top, band.bottom
            )));
        }
        if !(self.sample_interval_ms >= 0.0) || !(self.debounce_ms >= 0.0) {
            return Err(EngineError::InvalidConfig(
                "durations must be non-negative".to_string(),
            ));
        }
        if self.progress_precision > 6 {
            return Err(EngineError::InvalidConfig(format!(
                "progress precision {} is more than 6 decimals",
                self.progress_precision
            )));
        }
        Ok(self)
    }
}

pub fn parse(raw: &str) -> Result<EngineConfig, EngineError> {
    serde_json::from_str::<EngineConfig>(raw)?.validate()
}

/// Reads the page's override, falling back to defaults on any problem.
pub fn load() -> EngineConfig {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .and_then(|root| root.get_attribute(CONFIG_ATTRIBUTE));

    match raw {
        Some(raw) => parse(&raw).unwrap_or_else(|err| {
            warn!("ignoring {}: {}", CONFIG_ATTRIBUTE, err);
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
