use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::app::Result;

/// Center-crop `img` to the given aspect ratio (width over height).
///
/// The longer dimension is trimmed symmetrically; a source that already
/// matches the ratio passes through untouched. A source wider than the
/// ratio keeps its full height, a taller one keeps its full width.
pub fn center_crop(img: DynamicImage, aspect_w: u32, aspect_h: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || aspect_w == 0 || aspect_h == 0 {
        return img;
    }

    // Cross-multiplied ratio comparison, no floats.
    let lhs = u64::from(w) * u64::from(aspect_h);
    let rhs = u64::from(h) * u64::from(aspect_w);

    if lhs == rhs {
        img
    } else if lhs > rhs {
        let new_w = (u64::from(h) * u64::from(aspect_w) / u64::from(aspect_h)) as u32;
        let new_w = new_w.max(1);
        img.crop_imm((w - new_w) / 2, 0, new_w, h)
    } else {
        let new_h = (u64::from(w) * u64::from(aspect_h) / u64::from(aspect_w)) as u32;
        let new_h = new_h.max(1);
        img.crop_imm(0, (h - new_h) / 2, w, new_h)
    }
}

/// Re-encode as JPEG. Alpha is dropped first; the JPEG encoder rejects RGBA.
pub fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)?;
    Ok(buf)
}
