//! Confirmation QR codes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Render `payload` as a QR code PNG, base64 encoded.
pub fn render_qr_png_base64(payload: &str) -> Result<String, ReceiptError> {
    let code = QrCode::new(payload.as_bytes())?;
    let img = code.render::<Luma<u8>>().min_dimensions(200, 200).build();

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(STANDARD.encode(png))
}
