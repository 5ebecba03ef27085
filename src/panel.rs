//! Panel core: subscription state, frame handling, and display computation.
//!
//! [`WheelPanel`] owns the configuration snapshot and the current angle,
//! and drives the three-way synchronization between the persisted store,
//! the host's settings form, and the rendered state. All handlers run
//! synchronously to completion; the host owns invocation timing.

use log::{debug, warn};

use crate::config::{self, parse_factor, ConfigPatch, GaugeConfig};
use crate::frame::Frame;
use crate::host::{ConfigStore, StreamHost};
use crate::message_path::MessagePath;
use crate::settings::{settings_form, SettingsAction};

/// Subscription state. `Subscribed` replaces any previous stream on
/// reconfiguration; the only exit is [`WheelPanel::teardown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscription {
    Unsubscribed,
    Subscribed(String),
}

/// Resolved render output: needle rotation and formatted readout.
///
/// The rotation uses the pre-label-scaling angle while the label applies
/// `number_scaling_factor`, so the needle and the readout can show
/// independent quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelDisplay {
    pub rotation_deg: f64,
    pub label: String,
}

/// The panel core. `S` persists the config blob, `H` receives subscription
/// interest and settings-form pushes.
pub struct WheelPanel<S, H> {
    config: GaugeConfig,
    path: MessagePath,
    angle: f64,
    subscription: Subscription,
    torn_down: bool,
    store: S,
    host: H,
}

impl<S: ConfigStore, H: StreamHost> WheelPanel<S, H> {
    /// Initialize from the persisted snapshot (falling back to defaults on
    /// a malformed blob) or, when nothing is persisted, the host-supplied
    /// config. Pushes the initial settings form and subscribes.
    pub fn new(store: S, host: H, host_config: Option<ConfigPatch>) -> WheelPanel<S, H> {
        let persisted = store.read_config().and_then(|blob| {
            match config::config_from_json(&blob) {
                Ok(patch) => Some(patch),
                Err(e) => {
                    warn!("discarding malformed persisted config: {e}");
                    None
                }
            }
        });
        let config = GaugeConfig::initialize(host_config, persisted);
        let mut panel = WheelPanel {
            path: MessagePath::parse(&config.series.message_path),
            config,
            angle: 0.0,
            subscription: Subscription::Unsubscribed,
            torn_down: false,
            store,
            host,
        };
        panel.host.update_settings_form(&settings_form(&panel.config));
        panel.configure_subscription();
        panel
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Current subscription state.
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// The injected host, for embeddings that need to read back the
    /// recorded interest or the latest settings form.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The injected store, holding the last persisted snapshot.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// `true` once [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// (Re)establish interest in the configured stream, replacing any
    /// previous subscription. A path without a stream leaves the panel
    /// unsubscribed.
    fn configure_subscription(&mut self) {
        if matches!(self.subscription, Subscription::Subscribed(_)) {
            self.host.unsubscribe();
        }
        self.subscription = Subscription::Unsubscribed;
        if self.path.has_stream() {
            self.host.subscribe(&self.path.stream);
            self.subscription = Subscription::Subscribed(self.path.stream.clone());
            // Angle state resets only here, never explicitly.
            self.angle = 0.0;
            debug!("subscribed to {}", self.path.stream);
        }
    }

    /// Handle one delivered frame: scan the messages in receive order and
    /// adopt the first value that matches the configured stream *and*
    /// resolves to a number. Non-matching and non-numeric messages are
    /// skipped silently. The frame is acknowledged exactly once, hit or
    /// miss; a torn-down panel changes no state (the token still fires via
    /// its drop guard).
    pub fn on_frame(&mut self, frame: Frame) {
        let Frame { messages, done } = frame;
        if self.torn_down {
            return;
        }
        let Subscription::Subscribed(stream) = &self.subscription else {
            done.ack();
            return;
        };
        let scale = parse_factor(&self.config.series.scaling_factor);
        for message in &messages {
            if message.topic != *stream {
                continue;
            }
            if let Some(raw) = self.path.extract(&message.payload) {
                self.angle = raw * scale;
                break;
            }
        }
        done.ack();
    }

    /// Handle a settings-form edit delivered by the host.
    pub fn on_settings_action(&mut self, action: SettingsAction) {
        if self.torn_down {
            return;
        }
        match action {
            SettingsAction::Update {
                group,
                field,
                value,
            } => {
                debug!("settings edit {group}.{field} = {value:?}");
                let next = self.config.apply_field_edit(&group, &field, &value);
                self.install_config(next);
            }
        }
    }

    /// Apply a whole-config patch supplied by the host (group-level merge,
    /// same persistence and re-subscription behavior as a field edit).
    pub fn apply_config_update(&mut self, patch: &ConfigPatch) {
        if self.torn_down {
            return;
        }
        let next = self.config.apply_update(patch);
        self.install_config(next);
    }

    fn install_config(&mut self, next: GaugeConfig) {
        let path = MessagePath::parse(&next.series.message_path);
        let stream_changed = path.stream != self.path.stream;
        self.config = next;
        self.path = path;
        self.persist();
        self.host.update_settings_form(&settings_form(&self.config));
        if stream_changed {
            self.configure_subscription();
        }
    }

    /// Best-effort snapshot write; failures are logged, never surfaced.
    fn persist(&mut self) {
        match config::config_to_json(&self.config) {
            Ok(blob) => self.store.write_config(&blob),
            Err(e) => warn!("failed to serialize config: {e}"),
        }
    }

    /// Compute the current render output. Pure with respect to the stored
    /// angle: rounding and the label-only scaling happen here.
    pub fn display(&self) -> WheelDisplay {
        let general = &self.config.general;
        let series = &self.config.series;
        let rounded = round_to(self.angle, general.precision);
        let label_value = rounded * parse_factor(&series.number_scaling_factor);

        let mut label = String::new();
        if !general.title.is_empty() {
            label.push_str(&general.title);
            label.push_str(": ");
        }
        label.push_str(&format!("{label_value:.prec$}", prec = general.precision));
        label.push_str(series.unit.suffix());

        WheelDisplay {
            rotation_deg: self.angle,
            label,
        }
    }

    /// Release the subscription and stop accepting frames and edits.
    /// Terminal and idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if matches!(self.subscription, Subscription::Subscribed(_)) {
            self.host.unsubscribe();
        }
        self.subscription = Subscription::Unsubscribed;
        self.torn_down = true;
        debug!("panel torn down");
    }
}

/// Round to `precision` decimal places.
fn round_to(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// The raw-value-to-display pipeline in one place: scale, round, apply the
/// label-only factor, format. Returns the needle angle in degrees and the
/// formatted (unsuffixed) readout number.
pub fn compute_display(
    raw_value: f64,
    scaling_factor: &str,
    number_scaling_factor: &str,
    precision: usize,
) -> (f64, String) {
    let angle = raw_value * parse_factor(scaling_factor);
    let rounded = round_to(angle, precision);
    let label_value = rounded * parse_factor(number_scaling_factor);
    (angle, format!("{label_value:.precision$}"))
}
