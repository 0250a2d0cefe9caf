//! Shared rendering utilities for gauges

use cairo::{Context, LineCap, LineJoin};
use g5_panel_types::Color;

/// Select a solid pen of `width` pixels in `color`
pub fn set_pen(cr: &Context, width: f64, color: Color) {
    cr.set_line_width(width);
    cr.set_line_cap(LineCap::Square);
    cr.set_line_join(LineJoin::Bevel);
    cr.set_dash(&[], 0.0);
    color.apply_to_cairo(cr);
}

/// Fill a rectangle with `fill` and outline it with the current pen
pub fn draw_rect(cr: &Context, x: f64, y: f64, width: f64, height: f64, fill: Color) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.rectangle(x, y, width, height);
    fill.apply_to_cairo(cr);
    cr.fill_preserve()?;
    cr.restore()?;
    cr.stroke()
}

/// Stroke a straight segment with the current pen
pub fn draw_line(cr: &Context, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.move_to(x1, y1);
    cr.line_to(x2, y2);
    cr.stroke()
}
