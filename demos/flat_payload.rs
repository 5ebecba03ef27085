//! Demo: bare scalar payloads and split needle/readout scaling.
//!
//! What it demonstrates
//! - Empty field path: the panel reads the message's `data` field.
//! - `scaling_factor` turning radians into degrees for the needle, while
//!   `number_scaling_factor` keeps the readout in raw radians.
//!
//! How to run
//! ```bash
//! cargo run --example flat_payload
//! ```

use serde_json::json;
use std::time::Duration;
use wheelgauge::{channel_frames, run_wheel, AngleUnit, ConfigPatch, MemoryStore, SeriesPatch};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let (sink, rx) = channel_frames();

    // Producer: steering angle in radians, ramping between ±π/2.
    std::thread::spawn(move || {
        let mut tick: u64 = 0;
        loop {
            let t = tick as f64 / 20.0;
            let rad = std::f64::consts::FRAC_PI_2 * (0.5 * t).sin();
            let _ = sink.send_frame([("steering".to_string(), json!({ "data": rad }))]);
            tick = tick.wrapping_add(1);
            std::thread::sleep(Duration::from_millis(50));
        }
    });

    let host_config = ConfigPatch {
        series: Some(SeriesPatch {
            message_path: Some("steering".to_string()),
            unit: Some(AngleUnit::Rad),
            // Needle in degrees, readout scaled back to radians.
            scaling_factor: Some("57.29578".to_string()),
            number_scaling_factor: Some("0.0174533".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    run_wheel(rx, MemoryStore::default(), Some(host_config))
}
