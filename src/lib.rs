//! WheelGauge crate root: re-exports and module wiring.
//!
//! This crate renders one numeric telemetry field as a rotating steering
//! wheel with a numeric readout, built on egui/eframe:
//! - `config`: grouped panel configuration, defaults, and merge rules
//! - `settings`: declarative settings-form schema and edit actions
//! - `message_path`: stream/field-path parsing and nested value lookup
//! - `frame`: host frame delivery types and channels
//! - `host`: injected persistence and subscription capabilities
//! - `panel`: the panel core (subscription state, extraction, display)
//! - `wheel_ui`: egui drawing of the wheel and readout
//! - `app`: ready-to-run eframe embedding

pub mod app;
pub mod config;
pub mod frame;
pub mod host;
pub mod message_path;
pub mod panel;
pub mod settings;
pub mod wheel_ui;

// Public re-exports for a compact external API
pub use app::{run_wheel, WheelApp};
pub use config::{
    config_from_json, config_to_json, parse_factor, AngleUnit, ConfigPatch, GaugeConfig,
    GeneralConfig, GeneralPatch, SeriesConfig, SeriesPatch,
};
pub use frame::{channel_frames, Frame, FrameDone, FrameSink, MessageEvent};
pub use host::{ConfigStore, MemoryStore, PassiveHost, StreamHost, PANEL_STORAGE_KEY};
pub use message_path::{resolve_path, MessagePath, SCALAR_PAYLOAD_FIELD};
pub use panel::{compute_display, Subscription, WheelDisplay, WheelPanel};
pub use settings::{
    settings_form, FieldInput, SelectOption, SettingsAction, SettingsField, SettingsForm,
    SettingsGroup,
};
pub use wheel_ui::{draw_wheel, wheel_widget, WheelStyle};
