use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

use crate::error::EcoletaError;

/// Image decoded into RGBA8 pixels, ready to be uploaded as a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    bytes: Vec<u8>,
    dimensions: (u32, u32),
}

impl DecodedImage {
    /// Decodes a PNG, JPEG or SVG image. SVG documents are rasterized at their own size.
    pub fn decode(bytes: &[u8]) -> Result<Self, EcoletaError> {
        if is_svg(bytes) {
            return Self::rasterize_svg(bytes);
        }

        let image = image::load_from_memory(bytes)?.to_rgba8();
        let dimensions = image.dimensions();

        Ok(Self {
            bytes: image.into_raw(),
            dimensions,
        })
    }

    /// Wraps unmultiplied RGBA8 pixels. Returns `None` if the buffer length does not match the
    /// dimensions.
    pub fn from_rgba(bytes: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        (bytes.len() == width as usize * height as usize * 4).then_some(Self {
            bytes,
            dimensions: (width, height),
        })
    }

    fn rasterize_svg(bytes: &[u8]) -> Result<Self, EcoletaError> {
        let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
            .map_err(|e| EcoletaError::SvgDecode(e.to_string()))?;
        let size = tree.size().to_int_size();
        let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            EcoletaError::SvgDecode(format!("invalid size {}x{}", size.width(), size.height()))
        })?;

        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        // Pixmap stores premultiplied alpha, textures expect straight alpha.
        let bytes = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();

        Ok(Self {
            bytes,
            dimensions: (size.width(), size.height()),
        })
    }

    /// Pixel data, 4 bytes per pixel, row by row.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.dimensions.1
    }
}

fn is_svg(bytes: &[u8]) -> bool {
    let text = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let start = text
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(text.len());
    let head = &text[start..text.len().min(start + 512)];

    head.starts_with(b"<") && head.windows(4).any(|window| window == b"<svg")
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;
    use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};

    use super::*;

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("encoding to memory cannot fail");
        bytes
    }

    #[test]
    fn decode_png() {
        let decoded = DecodedImage::decode(&png_bytes(3, 2)).expect("valid png");
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.bytes().len(), 3 * 2 * 4);
        assert_eq!(&decoded.bytes()[..4], &[10, 20, 30, 255]);
    }

    const ICON: &[u8] = br##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="48" height="32" viewBox="0 0 48 32">
  <rect x="0" y="0" width="48" height="32" fill="#34CB79"/>
</svg>
"##;

    #[test]
    fn decode_svg_icon() {
        let decoded = DecodedImage::decode(ICON).expect("valid svg");
        assert_eq!(decoded.width(), 48);
        assert_eq!(decoded.height(), 32);
        assert_eq!(decoded.bytes().len(), 48 * 32 * 4);
        assert_eq!(&decoded.bytes()[..4], &[0x34, 0xCB, 0x79, 255]);
    }

    #[test]
    fn decode_garbage() {
        assert_matches!(
            DecodedImage::decode(b"not an image"),
            Err(EcoletaError::ImageDecode(_))
        );
        assert_matches!(
            DecodedImage::decode(b"<svg><rect"),
            Err(EcoletaError::SvgDecode(_))
        );
    }

    #[test]
    fn rgba_buffer_must_match_dimensions() {
        assert!(DecodedImage::from_rgba(vec![0; 16], 2, 2).is_some());
        assert!(DecodedImage::from_rgba(vec![0; 15], 2, 2).is_none());
    }
}
