use serde_json::json;
use wheelgauge::{
    compute_display, ConfigPatch, Frame, FrameDone, GeneralPatch, MemoryStore, MessageEvent,
    PassiveHost, SeriesPatch, WheelPanel,
};

fn one_message_frame(topic: &str, payload: serde_json::Value) -> Frame {
    Frame {
        messages: vec![MessageEvent {
            topic: topic.to_string(),
            receive_order: 0,
            payload,
        }],
        done: FrameDone::noop(),
    }
}

#[test]
fn needle_and_readout_scale_independently() {
    // raw 45, scaling 2.0, number scaling 0.5, precision 1:
    // the needle turns to 90°, the readout shows 45.0.
    let (angle, label) = compute_display(45.0, "2.0", "0.5", 1);
    assert_eq!(angle, 90.0);
    assert_eq!(label, "45.0");
}

#[test]
fn panel_display_matches_the_pipeline() {
    let config = ConfigPatch {
        general: Some(GeneralPatch {
            precision: Some(1),
            ..Default::default()
        }),
        series: Some(SeriesPatch {
            message_path: Some("/veh".to_string()),
            scaling_factor: Some("2.0".to_string()),
            number_scaling_factor: Some("0.5".to_string()),
            ..Default::default()
        }),
    };
    let mut panel = WheelPanel::new(MemoryStore::default(), PassiveHost::default(), Some(config));
    panel.on_frame(one_message_frame("/veh", json!({ "data": 45 })));

    let display = panel.display();
    assert_eq!(display.rotation_deg, 90.0);
    assert_eq!(display.label, "45.0°");
}

#[test]
fn rounding_happens_before_the_label_factor() {
    // 1.26 rounds to 1.3 at precision 1; the label factor of 10 then
    // multiplies the rounded value, not the raw one.
    let (_, label) = compute_display(1.26, "1.0", "10", 1);
    assert_eq!(label, "13.0");
}

#[test]
fn precision_zero_formats_whole_numbers() {
    let (angle, label) = compute_display(33.7, "1.0", "1.0", 0);
    assert_eq!(angle, 33.7);
    assert_eq!(label, "34");
}

#[test]
fn invalid_factors_fall_back_to_identity() {
    let (angle, label) = compute_display(45.0, "not-a-number", "also bad", 1);
    assert_eq!(angle, 45.0);
    assert_eq!(label, "45.0");
}
