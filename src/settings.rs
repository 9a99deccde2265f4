//! Page settings and element selectors
//!
//! Read once at startup from an optional JSON block in the page:
//! `<script type="application/json" id="fx-settings">{ ... }</script>`.
//! Every field has a default, so the block may override only what differs.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::FxResult;

/// Quality preset levels
///
/// Written lowercase in the settings block; `"med"` is accepted for medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Canonical settings-block name
    pub fn name(&self) -> &'static str {
        match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        }
    }

    /// Ambient particles in the backdrop
    pub fn particle_count(&self) -> usize {
        match self {
            QualityPreset::Low => 20,
            QualityPreset::Medium => 45,
            QualityPreset::High => 90,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(format!("unknown quality preset `{}` (low, medium, high)", other)),
        }
    }
}

impl Serialize for QualityPreset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for QualityPreset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// How the backdrop advances its simulated clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeStep {
    /// Fixed 1/60 s per frame; animation speed follows the display rate
    #[default]
    PerFrame,
    /// Actual elapsed time between frames, capped after stalls
    Elapsed,
}

/// Element ids, attribute and class names the components look for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Element carrying the event start/end attributes
    pub event_host: String,
    pub event_start_attr: String,
    pub event_end_attr: String,
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub status: String,
    /// Base class always kept on the status element
    pub status_base_class: String,
    /// Full-viewport backdrop canvas
    pub canvas: String,
    /// Attribute marking revealable elements
    pub reveal_attr: String,
    /// Class added when an element is revealed
    pub reveal_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            event_host: "featuredEvent".into(),
            event_start_attr: "data-event-date".into(),
            event_end_attr: "data-event-end".into(),
            days: "countDays".into(),
            hours: "countHours".into(),
            minutes: "countMinutes".into(),
            seconds: "countSeconds".into(),
            status: "countdownStatus".into(),
            status_base_class: "cd-status".into(),
            canvas: "fluidCanvas".into(),
            reveal_attr: "data-v".into(),
            reveal_class: "show".into(),
        }
    }
}

impl Selectors {
    /// The four numeric countdown regions in display order
    pub fn countdown_fields(&self) -> [&str; 4] {
        [&self.days, &self.hours, &self.minutes, &self.seconds]
    }

    /// Class string for the status element in a given phase
    pub fn status_class_name(&self, modifier: &str) -> String {
        if modifier.is_empty() {
            self.status_base_class.clone()
        } else {
            format!("{} {}", self.status_base_class, modifier)
        }
    }
}

/// Page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backdrop quality preset
    pub quality: QualityPreset,
    /// Backdrop clock policy
    pub time_step: TimeStep,
    /// Draw a single static backdrop frame and skip reveal staggering
    pub reduced_motion: bool,
    /// Seed for the particle field; `None` seeds from the clock
    pub seed: Option<u64>,
    pub selectors: Selectors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            time_step: TimeStep::PerFrame,
            reduced_motion: false,
            seed: None,
            selectors: Selectors::default(),
        }
    }
}

impl Settings {
    /// Element id of the optional settings block
    pub const ELEMENT_ID: &'static str = "fx-settings";

    /// Decode a settings block
    pub fn from_json(json: &str) -> FxResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings (quality {})", settings.quality.name());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings block: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Particle count after reduced-motion is applied
    pub fn particle_count(&self) -> usize {
        if self.reduced_motion {
            self.quality.particle_count() / 2
        } else {
            self.quality.particle_count()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;

    #[test]
    fn test_defaults_match_markup() {
        let s = Settings::default();
        assert_eq!(s.selectors.event_host, "featuredEvent");
        assert_eq!(
            s.selectors.countdown_fields(),
            ["countDays", "countHours", "countMinutes", "countSeconds"]
        );
        assert_eq!(s.time_step, TimeStep::PerFrame);
    }

    #[test]
    fn test_partial_override() {
        let s = Settings::from_json(
            r#"{ "quality": "high", "time_step": "elapsed",
                 "selectors": { "canvas": "heroCanvas", "event_host": "nextEvent" } }"#,
        )
        .unwrap();
        assert_eq!(s.quality, QualityPreset::High);
        assert_eq!(s.time_step, TimeStep::Elapsed);
        assert_eq!(s.selectors.canvas, "heroCanvas");
        assert_eq!(s.selectors.event_host, "nextEvent");
        // Untouched selectors keep their defaults
        assert_eq!(s.selectors.status, "countdownStatus");
    }

    #[test]
    fn test_malformed_settings() {
        let err = Settings::from_json("{ quality: ").unwrap_err();
        assert!(matches!(err, FxError::Settings(_)));
    }

    #[test]
    fn test_status_class_name() {
        let sel = Selectors::default();
        assert_eq!(sel.status_class_name(""), "cd-status");
        assert_eq!(sel.status_class_name("live"), "cd-status live");
    }

    #[test]
    fn test_quality_preset_names() {
        let s = Settings::from_json(r#"{ "quality": "Med" }"#).unwrap();
        assert_eq!(s.quality, QualityPreset::Medium);
        assert_eq!("LOW".parse::<QualityPreset>(), Ok(QualityPreset::Low));

        let err = Settings::from_json(r#"{ "quality": "ultra" }"#).unwrap_err();
        assert!(err.to_string().contains("ultra"));

        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains(r#""quality":"medium""#));
        assert!(QualityPreset::Low.particle_count() < QualityPreset::High.particle_count());
    }

    #[test]
    fn test_reduced_motion_halves_particles() {
        let s = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(s.particle_count(), QualityPreset::Medium.particle_count() / 2);
    }
}
