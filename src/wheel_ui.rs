//! Wheel drawing: the rotated rim and spokes plus the centered readout.
//!
//! Geometry follows a 200-unit square viewport (rim radius 85, hub radius
//! 60, spoke width 15) scaled to fill whatever rectangle the embedding
//! allots. Only the spokes visibly rotate; the circles are rotation
//! invariant and the readout stays upright.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

use crate::panel::WheelDisplay;

/// Visual style for the wheel graphic.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelStyle {
    /// Rim, hub, and spoke color.
    pub rim_color: Color32,
    /// Readout text color.
    pub text_color: Color32,
}

impl Default for WheelStyle {
    fn default() -> Self {
        Self {
            rim_color: Color32::from_rgb(0x52, 0x49, 0x94),
            text_color: Color32::WHITE,
        }
    }
}

fn rotate_about(point: Pos2, center: Pos2, angle_rad: f32) -> Pos2 {
    let (sin, cos) = angle_rad.sin_cos();
    let d = point - center;
    center + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// Draw the wheel and readout into `rect`.
pub fn draw_wheel(
    painter: &Painter,
    rect: Rect,
    display: &WheelDisplay,
    font_size: f32,
    style: &WheelStyle,
) {
    let center = rect.center();
    let unit = rect.width().min(rect.height()) / 200.0;
    let angle = (display.rotation_deg as f32).to_radians();
    let rim = Stroke::new(15.0 * unit, style.rim_color);

    painter.circle_stroke(center, 85.0 * unit, rim);
    painter.circle_filled(center, 60.0 * unit, style.rim_color);

    let spoke = |from: Pos2, to: Pos2| {
        painter.line_segment(
            [
                rotate_about(from, center, angle),
                rotate_about(to, center, angle),
            ],
            rim,
        );
    };
    // Lower spoke and cross spoke, as on the physical wheel.
    spoke(center, center + Vec2::new(0.0, 80.0 * unit));
    spoke(
        center - Vec2::new(80.0 * unit, 0.0),
        center + Vec2::new(80.0 * unit, 0.0),
    );

    painter.text(
        center,
        Align2::CENTER_CENTER,
        &display.label,
        FontId::proportional(font_size),
        style.text_color,
    );
}

/// Widget wrapper: fills the available space and draws the wheel.
pub fn wheel_widget(
    ui: &mut Ui,
    display: &WheelDisplay,
    font_size: f32,
    style: &WheelStyle,
) -> Response {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
    draw_wheel(ui.painter(), rect, display, font_size, style);
    response
}
