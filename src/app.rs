//! Ready-to-run eframe embedding of the wheel panel.
//!
//! [`WheelApp`] plays the host: it drains a frame channel into the panel,
//! renders the settings form the panel pushed (the same declarative schema
//! an external host would consume), and dispatches edits back as
//! [`SettingsAction`] values.

use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::config::ConfigPatch;
use crate::frame::Frame;
use crate::host::{ConfigStore, PassiveHost};
use crate::panel::WheelPanel;
use crate::settings::{FieldInput, SettingsAction, SettingsForm};
use crate::wheel_ui::{wheel_widget, WheelStyle};

/// eframe application embedding a single [`WheelPanel`].
pub struct WheelApp<S: ConfigStore> {
    rx: Receiver<Frame>,
    panel: WheelPanel<S, PassiveHost>,
    style: WheelStyle,
    show_settings: bool,
}

impl<S: ConfigStore> WheelApp<S> {
    pub fn new(rx: Receiver<Frame>, store: S, host_config: Option<ConfigPatch>) -> WheelApp<S> {
        WheelApp {
            rx,
            panel: WheelPanel::new(store, PassiveHost::default(), host_config),
            style: WheelStyle::default(),
            show_settings: true,
        }
    }

    /// Access the embedded panel (e.g. to tear it down).
    pub fn panel_mut(&mut self) -> &mut WheelPanel<S, PassiveHost> {
        &mut self.panel
    }
}

impl<S: ConfigStore> eframe::App for WheelApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Ingest every frame delivered since the last repaint, in order.
        while let Ok(frame) = self.rx.try_recv() {
            self.panel.on_frame(frame);
        }

        let form = self.panel.host().form.clone();
        let mut actions = Vec::new();
        if self.show_settings {
            if let Some(form) = &form {
                egui::SidePanel::right("wheel_settings")
                    .default_width(220.0)
                    .show(ctx, |ui| {
                        settings_form_ui(ui, form, &mut actions);
                    });
            }
        }
        for action in actions {
            self.panel.on_settings_action(action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let font_size = self.panel.config().general.font_size;
            wheel_widget(ui, &self.panel.display(), font_size, &self.style);
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(16));
    }
}

/// Render the declarative settings form with stock egui widgets, pushing
/// one [`SettingsAction::Update`] per changed field.
fn settings_form_ui(ui: &mut egui::Ui, form: &SettingsForm, actions: &mut Vec<SettingsAction>) {
    for group in &form.groups {
        ui.heading(&group.label);
        egui::Grid::new(group.key.as_str())
            .num_columns(2)
            .show(ui, |ui| {
                for field in &group.fields {
                    ui.label(&field.label);
                    match &field.input {
                        FieldInput::Text | FieldInput::MessagePath => {
                            let mut text = field.value.clone();
                            if ui.text_edit_singleline(&mut text).changed() {
                                actions.push(SettingsAction::Update {
                                    group: group.key.clone(),
                                    field: field.key.clone(),
                                    value: text,
                                });
                            }
                        }
                        FieldInput::Select { options } => {
                            let mut selected = field.value.clone();
                            egui::ComboBox::from_id_salt((&group.key, &field.key))
                                .selected_text(selected.clone())
                                .show_ui(ui, |ui| {
                                    for option in options {
                                        ui.selectable_value(
                                            &mut selected,
                                            option.value.clone(),
                                            &option.label,
                                        );
                                    }
                                });
                            if selected != field.value {
                                actions.push(SettingsAction::Update {
                                    group: group.key.clone(),
                                    field: field.key.clone(),
                                    value: selected,
                                });
                            }
                        }
                    }
                    ui.end_row();
                }
            });
        ui.separator();
    }
}

/// Run the wheel UI until the window closes. Unified entry point in the
/// spirit of a one-call embedding.
pub fn run_wheel(
    rx: Receiver<Frame>,
    store: impl ConfigStore + 'static,
    host_config: Option<ConfigPatch>,
) -> eframe::Result<()> {
    let mut options = eframe::NativeOptions::default();
    options.viewport = egui::ViewportBuilder::default().with_inner_size([480.0, 480.0]);
    eframe::run_native(
        "Steering Wheel",
        options,
        Box::new(move |_cc| Ok(Box::new(WheelApp::new(rx, store, host_config)))),
    )
}
