//! Pango-based text rendering
//!
//! Cairo's toy font API creates internal font caches that grow unboundedly,
//! so gauge labels go through Pango instead.

use cairo::Context;
use pango::{FontDescription, Weight as PangoWeight};
use pangocairo::functions::{create_layout, show_layout};
use std::cell::RefCell;
use std::collections::HashMap;

/// Font of a gauge label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFont {
    pub family: String,
    /// Size in device pixels
    pub pixel_size: f64,
    pub bold: bool,
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            pixel_size: 16.0,
            bold: false,
        }
    }
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct FontKey {
    family: String,
    bold: bool,
    size_pango: i32,
}

const MAX_CACHED_FONTS: usize = 16;

// Gauges repaint many times a second with the same few fonts
thread_local! {
    static FONT_DESC_CACHE: RefCell<HashMap<FontKey, FontDescription>> = RefCell::new(HashMap::new());
}

fn font_description(font: &LabelFont) -> FontDescription {
    let key = FontKey {
        family: font.family.clone(),
        bold: font.bold,
        size_pango: (font.pixel_size * pango::SCALE as f64) as i32,
    };

    FONT_DESC_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(desc) = cache.get(&key) {
            return desc.clone();
        }
        if cache.len() >= MAX_CACHED_FONTS {
            cache.clear();
        }

        let mut desc = FontDescription::new();
        desc.set_family(&font.family);
        desc.set_weight(if font.bold {
            PangoWeight::Bold
        } else {
            PangoWeight::Normal
        });
        desc.set_absolute_size(key.size_pango as f64);

        cache.insert(key, desc.clone());
        desc
    })
}

/// Draw `text` as one line, left/top aligned in the box at (`x`, `y`) with
/// the current source color. Anything outside the box is clipped.
pub fn pango_show_text_in_box(
    cr: &Context,
    text: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    font: &LabelFont,
) -> Result<(), cairo::Error> {
    let layout = create_layout(cr);
    layout.set_font_description(Some(&font_description(font)));
    layout.set_alignment(pango::Alignment::Left);
    layout.set_text(text);

    cr.save()?;
    cr.rectangle(x, y, width, height);
    cr.clip();
    cr.move_to(x, y);
    show_layout(cr, &layout);
    cr.restore()
}
