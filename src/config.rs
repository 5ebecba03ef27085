//! Panel configuration: grouped settings, defaults, and merge rules.
//!
//! A [`GaugeConfig`] always carries both groups fully populated. Partial
//! updates (host-supplied config, persisted snapshots, settings-form edits)
//! merge field-by-field over the previous snapshot, so a blob written by an
//! older version of the panel still inherits defaults for fields it does not
//! know about.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// AngleUnit – readout suffix selection
// ─────────────────────────────────────────────────────────────────────────────

/// Display unit for the readout. Purely cosmetic: it selects the label
/// suffix, never converts the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Deg,
    Rad,
}

impl Default for AngleUnit {
    fn default() -> Self {
        AngleUnit::Deg
    }
}

impl AngleUnit {
    /// All units (useful for combo-box UIs).
    pub fn all() -> &'static [AngleUnit] {
        &[AngleUnit::Deg, AngleUnit::Rad]
    }

    /// Stable key used in the settings form and the persisted blob.
    pub fn key(&self) -> &'static str {
        match self {
            AngleUnit::Deg => "deg",
            AngleUnit::Rad => "rad",
        }
    }

    /// Parse a settings-form value. Anything other than the two known keys
    /// is rejected so an edit cannot corrupt the config.
    pub fn from_key(key: &str) -> Option<AngleUnit> {
        match key {
            "deg" => Some(AngleUnit::Deg),
            "rad" => Some(AngleUnit::Rad),
            _ => None,
        }
    }

    /// Suffix appended to the readout text.
    pub fn suffix(&self) -> &'static str {
        match self {
            AngleUnit::Deg => "°",
            AngleUnit::Rad => " rad",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config groups
// ─────────────────────────────────────────────────────────────────────────────

/// Appearance settings for the readout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Readout font size in px.
    pub font_size: f32,
    /// Decimal places shown in the readout.
    pub precision: usize,
    /// Optional readout prefix; empty means no prefix.
    pub title: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            font_size: 30.0,
            precision: 1,
            title: String::new(),
        }
    }
}

/// Which stream/field to read and how to scale it.
///
/// The scaling factors are kept as raw user text and parsed at use-time
/// (see [`parse_factor`]), so transient invalid input survives editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Stream identifier plus optional dot-separated field path,
    /// e.g. `/veh.twist.angular.z`.
    pub message_path: String,
    /// Readout unit suffix.
    pub unit: AngleUnit,
    /// Multiplier applied to the raw value before rounding.
    pub scaling_factor: String,
    /// Multiplier applied to the already-rounded display value.
    pub number_scaling_factor: String,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            message_path: String::new(),
            unit: AngleUnit::Deg,
            scaling_factor: "1.0".to_string(),
            number_scaling_factor: "1.0".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Patch types – every field optional
// ─────────────────────────────────────────────────────────────────────────────

/// Partial [`GeneralConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralPatch {
    pub font_size: Option<f32>,
    pub precision: Option<usize>,
    pub title: Option<String>,
}

/// Partial [`SeriesConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesPatch {
    pub message_path: Option<String>,
    pub unit: Option<AngleUnit>,
    pub scaling_factor: Option<String>,
    pub number_scaling_factor: Option<String>,
}

/// Partial [`GaugeConfig`]: the shape of host-supplied config and of
/// persisted snapshots. A group that is absent leaves the corresponding
/// group of the base config untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub general: Option<GeneralPatch>,
    pub series: Option<SeriesPatch>,
}

// ─────────────────────────────────────────────────────────────────────────────
// GaugeConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Complete panel configuration. Never partially populated: every merge
/// path fills missing fields from the previous (or default) snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GaugeConfig {
    pub general: GeneralConfig,
    pub series: SeriesConfig,
}

impl GaugeConfig {
    /// Layer a config from, in increasing precedence: hardcoded defaults,
    /// the persisted snapshot if present, else the host-supplied config.
    pub fn initialize(
        host_config: Option<ConfigPatch>,
        persisted: Option<ConfigPatch>,
    ) -> GaugeConfig {
        let base = GaugeConfig::default();
        match persisted.or(host_config) {
            Some(patch) => base.apply_update(&patch),
            None => base,
        }
    }

    /// Merge `patch` over `self` at the group level: absent groups leave
    /// the previous group untouched, present groups merge field-by-field.
    /// An empty patch is a no-op.
    pub fn apply_update(&self, patch: &ConfigPatch) -> GaugeConfig {
        let mut next = self.clone();
        if let Some(general) = &patch.general {
            if let Some(font_size) = general.font_size {
                next.general.font_size = font_size;
            }
            if let Some(precision) = general.precision {
                next.general.precision = precision;
            }
            if let Some(title) = &general.title {
                next.general.title = title.clone();
            }
        }
        if let Some(series) = &patch.series {
            if let Some(message_path) = &series.message_path {
                next.series.message_path = message_path.clone();
            }
            if let Some(unit) = series.unit {
                next.series.unit = unit;
            }
            if let Some(scaling_factor) = &series.scaling_factor {
                next.series.scaling_factor = scaling_factor.clone();
            }
            if let Some(number_scaling_factor) = &series.number_scaling_factor {
                next.series.number_scaling_factor = number_scaling_factor.clone();
            }
        }
        next
    }

    /// Apply a single settings-form edit. Numeric fields parse the raw
    /// string as a float; an unparseable or out-of-range edit keeps the
    /// previous value. Unknown group/field keys change nothing.
    pub fn apply_field_edit(&self, group: &str, field: &str, raw: &str) -> GaugeConfig {
        let mut next = self.clone();
        match (group, field) {
            ("general", "font_size") => {
                if let Some(v) = parse_finite(raw) {
                    if v > 0.0 {
                        next.general.font_size = v as f32;
                    }
                }
            }
            ("general", "precision") => {
                if let Some(v) = parse_finite(raw) {
                    if v >= 0.0 {
                        next.general.precision = v as usize;
                    }
                }
            }
            ("general", "title") => next.general.title = raw.to_string(),
            ("series", "message_path") => next.series.message_path = raw.to_string(),
            ("series", "unit") => {
                if let Some(unit) = AngleUnit::from_key(raw) {
                    next.series.unit = unit;
                }
            }
            ("series", "scaling_factor") => next.series.scaling_factor = raw.to_string(),
            ("series", "number_scaling_factor") => {
                next.series.number_scaling_factor = raw.to_string()
            }
            _ => {}
        }
        next
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing and serialization helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a scaling-factor string. Invalid or non-finite text is a no-op
/// multiplier (1.0), so stale user input can never poison the display.
pub fn parse_factor(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(1.0)
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Serialize the full config as pretty JSON.
pub fn config_to_json(config: &GaugeConfig) -> Result<String, String> {
    serde_json::to_string_pretty(config).map_err(|e| e.to_string())
}

/// Deserialize a persisted snapshot. The result is a patch, not a full
/// config: missing fields are filled in by [`GaugeConfig::initialize`].
pub fn config_from_json(json: &str) -> Result<ConfigPatch, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_without_inputs_yields_defaults() {
        let config = GaugeConfig::initialize(None, None);
        assert_eq!(config, GaugeConfig::default());
        assert_eq!(config.general.font_size, 30.0);
        assert_eq!(config.general.precision, 1);
        assert_eq!(config.series.unit, AngleUnit::Deg);
        assert_eq!(config.series.scaling_factor, "1.0");
    }

    #[test]
    fn persisted_takes_precedence_over_host_config() {
        let host = ConfigPatch {
            general: Some(GeneralPatch {
                font_size: Some(12.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let persisted = ConfigPatch {
            general: Some(GeneralPatch {
                font_size: Some(48.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = GaugeConfig::initialize(Some(host), Some(persisted));
        assert_eq!(config.general.font_size, 48.0);
    }

    #[test]
    fn host_config_used_when_nothing_persisted() {
        let host = ConfigPatch {
            series: Some(SeriesPatch {
                message_path: Some("/veh.twist.angular.z".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = GaugeConfig::initialize(Some(host), None);
        assert_eq!(config.series.message_path, "/veh.twist.angular.z");
        // untouched fields come from the defaults
        assert_eq!(config.series.scaling_factor, "1.0");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut config = GaugeConfig::default();
        config.general.title = "Steering".to_string();
        config.series.message_path = "/veh".to_string();
        assert_eq!(config.apply_update(&ConfigPatch::default()), config);
    }

    #[test]
    fn single_field_patch_changes_exactly_that_field() {
        let base = GaugeConfig::default();
        let patch = ConfigPatch {
            series: Some(SeriesPatch {
                scaling_factor: Some("57.2958".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let next = base.apply_update(&patch);
        assert_eq!(next.series.scaling_factor, "57.2958");
        assert_eq!(next.general, base.general);
        assert_eq!(next.series.message_path, base.series.message_path);
        assert_eq!(next.series.unit, base.series.unit);
        assert_eq!(
            next.series.number_scaling_factor,
            base.series.number_scaling_factor
        );
    }

    #[test]
    fn field_edit_parses_numeric_fields() {
        let base = GaugeConfig::default();
        let next = base.apply_field_edit("general", "font_size", "42.5");
        assert_eq!(next.general.font_size, 42.5);
        let next = next.apply_field_edit("general", "precision", "3");
        assert_eq!(next.general.precision, 3);
    }

    #[test]
    fn invalid_numeric_edit_keeps_previous_value() {
        let base = GaugeConfig::default();
        assert_eq!(
            base.apply_field_edit("general", "font_size", "not a number"),
            base
        );
        assert_eq!(base.apply_field_edit("general", "precision", "-2"), base);
        assert_eq!(base.apply_field_edit("general", "font_size", "NaN"), base);
    }

    #[test]
    fn unit_edit_rejects_unknown_keys() {
        let base = GaugeConfig::default();
        let next = base.apply_field_edit("series", "unit", "rad");
        assert_eq!(next.series.unit, AngleUnit::Rad);
        assert_eq!(next.apply_field_edit("series", "unit", "furlongs"), next);
    }

    #[test]
    fn scaling_factor_edit_keeps_raw_text() {
        // Transient invalid text must survive editing; it only falls back
        // to 1.0 at use-time.
        let next = GaugeConfig::default().apply_field_edit("series", "scaling_factor", "2.");
        assert_eq!(next.series.scaling_factor, "2.");
    }

    #[test]
    fn unknown_keys_change_nothing() {
        let base = GaugeConfig::default();
        assert_eq!(base.apply_field_edit("general", "bogus", "1"), base);
        assert_eq!(base.apply_field_edit("bogus", "title", "x"), base);
    }

    #[test]
    fn parse_factor_falls_back_to_identity() {
        assert_eq!(parse_factor("2.0"), 2.0);
        assert_eq!(parse_factor(" -0.5 "), -0.5);
        assert_eq!(parse_factor(""), 1.0);
        assert_eq!(parse_factor("garbage"), 1.0);
        assert_eq!(parse_factor("inf"), 1.0);
        assert_eq!(parse_factor("NaN"), 1.0);
    }

    #[test]
    fn json_round_trip_reproduces_config() {
        let mut config = GaugeConfig::default();
        config.general.title = "Steering".to_string();
        config.general.precision = 2;
        config.series.message_path = "/veh.twist.angular.z".to_string();
        config.series.unit = AngleUnit::Rad;
        config.series.scaling_factor = "0.0174533".to_string();

        let blob = config_to_json(&config).unwrap();
        let restored = GaugeConfig::initialize(None, Some(config_from_json(&blob).unwrap()));
        assert_eq!(restored, config);
    }

    #[test]
    fn snapshot_missing_fields_inherits_defaults() {
        // A blob from an older panel version that predates the second
        // scaling factor.
        let blob = r#"{ "series": { "message_path": "/veh", "unit": "rad" } }"#;
        let config = GaugeConfig::initialize(None, Some(config_from_json(blob).unwrap()));
        assert_eq!(config.series.message_path, "/veh");
        assert_eq!(config.series.unit, AngleUnit::Rad);
        assert_eq!(config.series.number_scaling_factor, "1.0");
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[test]
    fn malformed_blob_is_an_error() {
        assert!(config_from_json("not json").is_err());
    }
}
