//! Engine RPM gauge
//!
//! A 200x120 panel with a round tachometer: a white normal-range arc, a
//! green and a red arc, six fixed peripheral markers and a needle.
//!
//! Arc angles follow the usual widget convention: 1/16-degree units,
//! counter-clockwise from the 3 o'clock axis. Rotations are clockwise on
//! screen, the same as Cairo's `rotate`.

use cairo::Context;
use g5_panel_types::{Color, ParamValue};

use crate::pango_text::{pango_show_text_in_box, LabelFont};
use crate::render_utils::{draw_line, draw_rect, set_pen};

pub const GAUGE_WIDTH: f64 = 200.0;
pub const GAUGE_HEIGHT: f64 = 120.0;

/// RPM at full needle deflection
pub const RPM_MAX: f64 = 2800.0;
const RPM_MAX_INVERSE: f64 = 1.0 / RPM_MAX;

/// Needle rotation between 0 RPM and [`RPM_MAX`]
pub const NEEDLE_SWEEP_DEGREES: f64 = 225.0;
/// Needle rotation at 0 RPM
pub const NEEDLE_BASE_DEGREES: f64 = 45.0;

pub const DIAL_RADIUS: f64 = 40.0;
const DIAL_MARGIN: f64 = 20.0;

pub const ARC_UNITS_PER_DEGREE: i32 = 16;

const END_RED_DEGREE: i32 = 0;
const RED_ARC_DEGREES: i32 = 45;
const GREEN_ARC_DEGREES: i32 = 45;
const WHITE_ARC_DEGREES: i32 = 45 + 90;

/// Peripheral marker rotations in degrees, counter-clockwise from 6 o'clock
pub const MARKER_ANGLES: [f64; 6] = [90.0, 135.0, 180.0, 225.0, 270.0, 315.0];
const MARKER_LENGTH: f64 = 10.0;
const NEEDLE_INSET: f64 = 5.0;

const LABEL_OFFSET: f64 = 20.0;
const LABEL_WIDTH: f64 = 80.0;
const LABEL_HEIGHT: f64 = 40.0;

/// Needle rotation in degrees for `rpm`.
///
/// Linear and unclamped: values beyond the dial keep rotating.
pub fn needle_angle(rpm: f64) -> f64 {
    rpm * RPM_MAX_INVERSE * NEEDLE_SWEEP_DEGREES + NEEDLE_BASE_DEGREES
}

/// One colored band of the dial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcZone {
    /// Start angle in 1/16 degree
    pub start: i32,
    /// Sweep in 1/16 degree, positive is counter-clockwise
    pub span: i32,
    pub pen_width: f64,
    pub color: Color,
}

impl ArcZone {
    fn from_degrees(start: i32, span: i32, pen_width: f64, color: Color) -> Self {
        Self {
            start: start * ARC_UNITS_PER_DEGREE,
            span: span * ARC_UNITS_PER_DEGREE,
            pen_width,
            color,
        }
    }

    pub fn start_degrees(&self) -> f64 {
        self.start as f64 / ARC_UNITS_PER_DEGREE as f64
    }

    pub fn span_degrees(&self) -> f64 {
        self.span as f64 / ARC_UNITS_PER_DEGREE as f64
    }

    /// Start and end angle in Cairo radians (clockwise on screen)
    pub fn cairo_angles(&self) -> (f64, f64) {
        let start = -self.start_degrees().to_radians();
        let end = -(self.start_degrees() + self.span_degrees()).to_radians();
        (start, end)
    }

    /// Stroke this zone around the origin with the zone's own pen
    fn stroke(&self, cr: &Context, radius: f64) -> Result<(), cairo::Error> {
        let (start, end) = self.cairo_angles();
        set_pen(cr, self.pen_width, self.color);
        cr.new_path();
        if self.span >= 0 {
            cr.arc_negative(0.0, 0.0, radius, start, end);
        } else {
            cr.arc(0.0, 0.0, radius, start, end);
        }
        cr.stroke()
    }
}

/// Everything needed to paint one frame, derived from the RPM alone
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeGeometry {
    pub center: (f64, f64),
    pub radius: f64,
    /// Painted in order: white, green, red
    pub zones: [ArcZone; 3],
    pub markers: [f64; 6],
    pub needle_angle: f64,
}

impl GaugeGeometry {
    pub fn for_rpm(rpm: f64) -> Self {
        let radius = DIAL_RADIUS;
        Self {
            center: (DIAL_MARGIN + radius, DIAL_MARGIN + radius),
            radius,
            zones: [
                ArcZone::from_degrees(
                    END_RED_DEGREE + RED_ARC_DEGREES + GREEN_ARC_DEGREES,
                    END_RED_DEGREE + WHITE_ARC_DEGREES,
                    1.0,
                    Color::WHITE,
                ),
                ArcZone::from_degrees(
                    END_RED_DEGREE + RED_ARC_DEGREES,
                    END_RED_DEGREE + GREEN_ARC_DEGREES,
                    4.0,
                    Color::GREEN,
                ),
                ArcZone::from_degrees(-END_RED_DEGREE, RED_ARC_DEGREES, 4.0, Color::RED),
            ],
            markers: MARKER_ANGLES,
            needle_angle: needle_angle(rpm),
        }
    }
}

/// Paint the engine gauge for the current `rpm`.
///
/// Nothing is cached between frames; the geometry is recomputed each call.
pub fn render_engine_gauge(cr: &Context, rpm: ParamValue) -> Result<(), cairo::Error> {
    let geometry = GaugeGeometry::for_rpm(rpm.as_f64());
    let (center_x, center_y) = geometry.center;
    let radius = geometry.radius;

    cr.save()?;

    // Background
    set_pen(cr, 1.0, Color::BLACK);
    draw_rect(cr, 0.0, 0.0, GAUGE_WIDTH, GAUGE_HEIGHT, Color::BLACK)?;

    set_pen(cr, 1.0, Color::WHITE);
    pango_show_text_in_box(
        cr,
        &format!("{} rpm", rpm),
        center_x,
        center_y + LABEL_OFFSET,
        LABEL_WIDTH,
        LABEL_HEIGHT,
        &LabelFont::default(),
    )?;

    cr.translate(center_x, center_y);

    for zone in &geometry.zones {
        zone.stroke(cr, radius)?;
    }

    set_pen(cr, 2.0, Color::WHITE);
    for marker in geometry.markers {
        cr.rotate(-marker.to_radians());
        draw_line(cr, 0.0, radius, 0.0, radius + MARKER_LENGTH)?;
        cr.rotate(marker.to_radians());
    }

    let needle = geometry.needle_angle.to_radians();
    cr.rotate(needle);
    draw_line(cr, 0.0, 0.0, 0.0, radius - NEEDLE_INSET)?;
    cr.rotate(-needle);

    cr.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Format, ImageSurface};
    use std::f64::consts::FRAC_PI_4;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_needle_angle_mapping() {
        assert!((needle_angle(0.0) - 45.0).abs() < EPS);
        assert!((needle_angle(1400.0) - 157.5).abs() < EPS);
        assert!((needle_angle(2800.0) - 270.0).abs() < EPS);
    }

    #[test]
    fn test_needle_angle_is_unclamped() {
        assert!((needle_angle(5600.0) - 495.0).abs() < EPS);
        assert!((needle_angle(-1400.0) - (-67.5)).abs() < EPS);
    }

    #[test]
    fn test_zone_layout() {
        let geometry = GaugeGeometry::for_rpm(0.0);
        let [white, green, red] = geometry.zones;

        assert_eq!((white.start, white.span), (90 * 16, 135 * 16));
        assert_eq!((green.start, green.span), (45 * 16, 45 * 16));
        assert_eq!((red.start, red.span), (0, 45 * 16));

        // Zones tile the dial without gaps
        assert_eq!(red.start + red.span, green.start);
        assert_eq!(green.start + green.span, white.start);

        assert_eq!(white.pen_width, 1.0);
        assert_eq!(green.color, Color::GREEN);
        assert_eq!(red.pen_width, 4.0);
        assert_eq!(geometry.center, (60.0, 60.0));
        assert_eq!(geometry.radius, 40.0);
    }

    #[test]
    fn test_zone_cairo_angles() {
        let red = GaugeGeometry::for_rpm(0.0).zones[2];
        let (start, end) = red.cairo_angles();
        assert!(start.abs() < EPS);
        assert!((end + FRAC_PI_4).abs() < EPS);
        assert!((red.span_degrees() - 45.0).abs() < EPS);
    }

    #[test]
    fn test_needle_spans_white_end_to_red_start() {
        // Needle rotation is clockwise from 6 o'clock, arc angles
        // counter-clockwise from 3 o'clock
        let as_arc_degrees = |needle: f64| (270.0 - needle).rem_euclid(360.0);

        let geometry = GaugeGeometry::for_rpm(RPM_MAX);
        let [white, _, red] = geometry.zones;
        assert!((as_arc_degrees(needle_angle(0.0)) - (white.start_degrees() + white.span_degrees())).abs() < EPS);
        let off = (as_arc_degrees(geometry.needle_angle) - red.start_degrees()).rem_euclid(360.0);
        assert!(off < 1e-6 || off > 360.0 - 1e-6, "full scale off red start by {}", off);
        assert_eq!(geometry.markers, MARKER_ANGLES);
    }

    fn render(rpm: ParamValue) -> ImageSurface {
        let surface = ImageSurface::create(Format::ARgb32, GAUGE_WIDTH as i32, GAUGE_HEIGHT as i32).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            render_engine_gauge(&cr, rpm).unwrap();
        }
        surface.flush();
        surface
    }

    /// (a, r, g, b) of one pixel
    fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        let px = u32::from_ne_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]);
        (
            (px >> 24) as u8,
            (px >> 16 & 0xff) as u8,
            (px >> 8 & 0xff) as u8,
            (px & 0xff) as u8,
        )
    }

    #[test]
    fn test_background_is_opaque_black() {
        let mut surface = render(ParamValue::Int(0));
        assert_eq!(pixel(&mut surface, 190, 5), (255, 0, 0, 0));
        assert_eq!(pixel(&mut surface, 150, 10), (255, 0, 0, 0));
    }

    #[test]
    fn test_zone_colors_on_dial() {
        let mut surface = render(ParamValue::Int(0));

        // Red band, about 23 degrees above 3 o'clock
        let (_, r, g, b) = pixel(&mut surface, 96, 44);
        assert!(r > 200 && g < 60 && b < 60, "red zone: {:?}", (r, g, b));

        // Green band, about 67 degrees above 3 o'clock
        let (_, r, g, b) = pixel(&mut surface, 75, 23);
        assert!(g > 200 && r < 60 && b < 60, "green zone: {:?}", (r, g, b));
    }

    #[test]
    fn test_needle_follows_rpm() {
        // 0 RPM: needle points down-left
        let mut idle = render(ParamValue::Int(0));
        let (_, r, g, b) = pixel(&mut idle, 45, 74);
        assert!(r > 200 && g > 200 && b > 200, "idle needle: {:?}", (r, g, b));
        assert_eq!(pixel(&mut idle, 80, 59), (255, 0, 0, 0));

        // Full scale: needle points at 3 o'clock
        let mut full = render(ParamValue::Float(2800.0));
        let (_, r, g, b) = pixel(&mut full, 80, 59);
        assert!(r > 200 && g > 200 && b > 200, "full-scale needle: {:?}", (r, g, b));
    }

    #[test]
    fn test_label_stays_on_one_line_inside_its_box() {
        // Wider than the 80 px box at 16 px
        let mut surface = render(ParamValue::Float(2437.25));
        let black = (255, 0, 0, 0);

        for y in 80..GAUGE_HEIGHT as usize {
            for x in 140..GAUGE_WIDTH as usize {
                assert_eq!(pixel(&mut surface, x, y), black, "label past box edge at ({}, {})", x, y);
            }
        }
        for y in 102..GAUGE_HEIGHT as usize {
            for x in 0..GAUGE_WIDTH as usize {
                assert_eq!(pixel(&mut surface, x, y), black, "second label line at ({}, {})", x, y);
            }
        }
    }
}
