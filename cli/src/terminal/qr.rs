use anyhow::Context;
use qrcode::render::unicode::Dense1x2;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use crate::terminal::print;

/// Renders `payload` as a compact QR code using half-block characters.
///
/// Colors are inverted so the code reads as dark-on-light on dark terminals.
pub fn render(payload: &str) -> Result<String, QrError> {
    let code = QrCode::with_error_correction_level(payload, EcLevel::L)?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

pub fn display(payload: &str) -> anyhow::Result<()> {
    let rendered = render(payload).context("failed to encode the pairing QR code")?;
    for line in rendered.lines() {
        print::print(line);
    }
    Ok(())
}
