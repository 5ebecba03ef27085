//! Declarative settings-form schema.
//!
//! The form is plain data pushed to the host whenever the config changes;
//! edits come back as [`SettingsAction`] values and are applied by
//! [`GaugeConfig::apply_field_edit`]. Keeping "what the form looks like"
//! and "how an edit is applied" separate means no mutable state is ever
//! captured inside the schema.
//!
//! [`GaugeConfig::apply_field_edit`]: crate::config::GaugeConfig::apply_field_edit

use serde::{Deserialize, Serialize};

use crate::config::{AngleUnit, GaugeConfig};

/// One choice of a [`FieldInput::Select`] field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Input widget kind for a settings field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldInput {
    /// Free-form text input.
    Text,
    /// Single-select with enumerated options.
    Select { options: Vec<SelectOption> },
    /// Stream-path picker (hosts may offer completion; falls back to text).
    MessagePath,
}

/// A single editable field with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsField {
    /// Stable key dispatched back in [`SettingsAction::Update`].
    pub key: String,
    pub label: String,
    pub value: String,
    pub input: FieldInput,
}

/// A titled group of fields (`general` or `series`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsGroup {
    pub key: String,
    pub label: String,
    pub fields: Vec<SettingsField>,
}

/// The whole form as pushed to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsForm {
    pub groups: Vec<SettingsGroup>,
}

/// Edit callback payload delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SettingsAction {
    Update {
        group: String,
        field: String,
        value: String,
    },
}

fn text_field(key: &str, label: &str, value: impl Into<String>) -> SettingsField {
    SettingsField {
        key: key.to_string(),
        label: label.to_string(),
        value: value.into(),
        input: FieldInput::Text,
    }
}

/// Build the form schema reflecting `config`'s current values. Regenerated
/// on every config change so the host UI never shows stale values.
pub fn settings_form(config: &GaugeConfig) -> SettingsForm {
    let unit_options = AngleUnit::all()
        .iter()
        .map(|unit| SelectOption {
            label: unit.key().to_string(),
            value: unit.key().to_string(),
        })
        .collect();

    SettingsForm {
        groups: vec![
            SettingsGroup {
                key: "general".to_string(),
                label: "General".to_string(),
                fields: vec![
                    text_field(
                        "font_size",
                        "Font Size (px)",
                        config.general.font_size.to_string(),
                    ),
                    text_field("precision", "Precision", config.general.precision.to_string()),
                    text_field("title", "Title", config.general.title.clone()),
                ],
            },
            SettingsGroup {
                key: "series".to_string(),
                label: "Series".to_string(),
                fields: vec![
                    SettingsField {
                        key: "message_path".to_string(),
                        label: "Message Path".to_string(),
                        value: config.series.message_path.clone(),
                        input: FieldInput::MessagePath,
                    },
                    SettingsField {
                        key: "unit".to_string(),
                        label: "Unit".to_string(),
                        value: config.series.unit.key().to_string(),
                        input: FieldInput::Select {
                            options: unit_options,
                        },
                    },
                    text_field(
                        "scaling_factor",
                        "Scaling Factor",
                        config.series.scaling_factor.clone(),
                    ),
                    text_field(
                        "number_scaling_factor",
                        "Number Scaling Factor",
                        config.series.number_scaling_factor.clone(),
                    ),
                ],
            },
        ],
    }
}
