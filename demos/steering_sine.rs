//! Demo: sine-wave steering angle on a nested field.
//!
//! What it demonstrates
//! - Feeding frames into the panel with `channel_frames()` and `FrameSink`.
//! - Nested field extraction via the message path `/veh.twist.angular.z`.
//! - Editing the settings form live (try switching the unit or the title).
//!
//! How to run
//! ```bash
//! cargo run --example steering_sine
//! ```
//! You should see the wheel swing back and forth through ±90°.

use serde_json::json;
use std::time::Duration;
use wheelgauge::{channel_frames, run_wheel, ConfigPatch, GeneralPatch, MemoryStore, SeriesPatch};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let (sink, rx) = channel_frames();

    // Producer: 20 Hz frames carrying a slow sine steering angle.
    std::thread::spawn(move || {
        let mut tick: u64 = 0;
        loop {
            let t = tick as f64 / 20.0;
            let angle = 90.0 * (0.8 * t).sin();
            let payload = json!({ "twist": { "angular": { "z": angle } } });
            // Ignore error if the UI closed (receiver dropped)
            let _ = sink.send_frame([("/veh".to_string(), payload)]);
            tick = tick.wrapping_add(1);
            std::thread::sleep(Duration::from_millis(50));
        }
    });

    let host_config = ConfigPatch {
        general: Some(GeneralPatch {
            title: Some("Steering".to_string()),
            ..Default::default()
        }),
        series: Some(SeriesPatch {
            message_path: Some("/veh.twist.angular.z".to_string()),
            ..Default::default()
        }),
    };
    run_wheel(rx, MemoryStore::default(), Some(host_config))
}
