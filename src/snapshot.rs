//! Headless PNG export of an instrument

use anyhow::{Context as _, Result};
use cairo::{Format, ImageSurface};
use std::fs::File;
use std::path::Path;

use g5_panel_core::Instrument;

/// Paint `instrument` at its natural size and write it to `path` as PNG
pub fn write_png(instrument: &dyn Instrument, path: &Path) -> Result<()> {
    let (width, height) = instrument.size_request();
    let surface = ImageSurface::create(Format::ARgb32, width, height)
        .context("creating image surface")?;
    {
        let cr = cairo::Context::new(&surface)?;
        instrument.draw(&cr, width as f64, height as f64)?;
    }
    surface.flush();

    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::displayers::EngineGauge;

    #[test]
    fn test_write_png() {
        let mut gauge = EngineGauge::new();
        gauge.state_mut().set_engine_rpm(2100);

        let path = std::env::temp_dir().join(format!("g5-panel-snapshot-{}.png", std::process::id()));
        write_png(&gauge, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let _ = std::fs::remove_file(&path);
    }
}
