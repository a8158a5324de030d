//! Reusable scratch drawing surface.
//!
//! One surface is shared by every page of an import. Each page resizes it,
//! replaces its pixels, and encodes it before the next page starts, so the
//! backing buffer is allocated once for the largest page rather than once
//! per page.
//!
//! Sizing the surface is also where the dimension cap and fallible
//! allocation live; backends resize it before drawing anything. A backend
//! that renders into its own buffer (hayro allocates a pixmap per page)
//! copies into the surface afterwards, so peak memory for such a page is
//! two page buffers.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{Error, Result};
use crate::model::ImageFormat;

const BYTES_PER_PIXEL: usize = 4;

/// An RGBA8 pixel buffer with straight (non-premultiplied) alpha.
#[derive(Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    max_dimension: u32,
}

impl Surface {
    /// Create an empty surface that refuses dimensions above `max_dimension`.
    pub fn new(max_dimension: u32) -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            max_dimension,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes currently reserved for pixels.
    pub fn capacity(&self) -> usize {
        self.pixels.capacity()
    }

    /// Whether the surface currently holds no backing memory.
    pub fn is_released(&self) -> bool {
        self.width == 0 && self.height == 0 && self.pixels.capacity() == 0
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Resize to `width` x `height` and clear every pixel to transparent.
    ///
    /// Existing capacity is reused; the buffer only grows.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::RenderSurface(format!(
                "cannot draw on a {}x{} surface",
                width, height
            )));
        }
        if width > self.max_dimension || height > self.max_dimension {
            return Err(Error::RenderSurface(format!(
                "{}x{} exceeds the {} pixel surface limit",
                width, height, self.max_dimension
            )));
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| {
                Error::RenderSurface(format!("{}x{} surface overflows memory", width, height))
            })?;

        self.pixels.clear();
        self.pixels.try_reserve_exact(len).map_err(|e| {
            Error::RenderSurface(format!(
                "failed to allocate a {}x{} surface: {}",
                width, height, e
            ))
        })?;
        self.pixels.resize(len, 0);
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Fill every pixel with one RGBA color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for pixel in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Replace the contents with premultiplied RGBA8 pixels of the same size.
    pub fn write_premultiplied(&mut self, data: &[u8]) -> Result<()> {
        if data.len() != self.pixels.len() {
            return Err(Error::RenderSurface(format!(
                "renderer produced {} bytes for a {}x{} surface ({} expected)",
                data.len(),
                self.width,
                self.height,
                self.pixels.len()
            )));
        }

        for (dst, src) in self
            .pixels
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(data.chunks_exact(BYTES_PER_PIXEL))
        {
            let alpha = src[3];
            match alpha {
                0 => dst.copy_from_slice(&[0, 0, 0, 0]),
                255 => dst.copy_from_slice(src),
                _ => {
                    for channel in 0..3 {
                        let value = u32::from(src[channel]) * 255 / u32::from(alpha);
                        dst[channel] = value.min(255) as u8;
                    }
                    dst[3] = alpha;
                }
            }
        }
        Ok(())
    }

    /// Encode the current contents.
    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Encode("surface has no pixels to encode".into()));
        }

        let mut out = Vec::new();
        match format {
            ImageFormat::Png => {
                PngEncoder::new(&mut out).write_image(
                    &self.pixels,
                    self.width,
                    self.height,
                    ExtendedColorType::Rgba8,
                )?;
            }
            ImageFormat::Jpeg { quality } => {
                let rgb = flatten_onto_white(&self.pixels);
                JpegEncoder::new_with_quality(&mut out, quality).write_image(
                    &rgb,
                    self.width,
                    self.height,
                    ExtendedColorType::Rgb8,
                )?;
            }
        }
        Ok(out)
    }

    /// Drop the pixels and reset the dimensions to zero.
    pub fn release(&mut self) {
        self.width = 0;
        self.height = 0;
        self.pixels = Vec::new();
    }
}

fn flatten_onto_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / BYTES_PER_PIXEL * 3);
    for pixel in rgba.chunks_exact(BYTES_PER_PIXEL) {
        let alpha = u32::from(pixel[3]);
        for channel in &pixel[..3] {
            let blended = (u32::from(*channel) * alpha + 255 * (255 - alpha)) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_clears_and_reuses_capacity() {
        let mut surface = Surface::new(1024);
        surface.resize(10, 10).unwrap();
        surface.fill([255, 0, 0, 255]);
        let capacity = surface.capacity();

        surface.resize(5, 5).unwrap();
        assert_eq!(surface.pixels().len(), 5 * 5 * 4);
        assert!(surface.pixels().iter().all(|b| *b == 0));
        assert_eq!(surface.capacity(), capacity);
    }

    #[test]
    fn test_resize_rejects_empty_and_oversized() {
        let mut surface = Surface::new(100);
        assert!(matches!(surface.resize(0, 10), Err(Error::RenderSurface(_))));
        assert!(matches!(surface.resize(101, 10), Err(Error::RenderSurface(_))));
        assert!(surface.is_released());
    }

    #[test]
    fn test_write_premultiplied_unpremultiplies() {
        let mut surface = Surface::new(16);
        surface.resize(2, 1).unwrap();
        surface
            .write_premultiplied(&[64, 32, 0, 128, 10, 20, 30, 255])
            .unwrap();
        assert_eq!(surface.pixels(), &[127, 63, 0, 128, 10, 20, 30, 255]);
    }

    #[test]
    fn test_write_premultiplied_size_mismatch() {
        let mut surface = Surface::new(16);
        surface.resize(2, 2).unwrap();
        let result = surface.write_premultiplied(&[0; 4]);
        assert!(matches!(result, Err(Error::RenderSurface(_))));
    }

    #[test]
    fn test_encode_png_signature() {
        let mut surface = Surface::new(16);
        surface.resize(3, 2).unwrap();
        surface.fill([0, 128, 255, 255]);
        let png = surface.encode(ImageFormat::Png).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_encode_jpeg_signature() {
        let mut surface = Surface::new(16);
        surface.resize(8, 8).unwrap();
        surface.fill([255, 255, 255, 0]);
        let jpeg = surface.encode(ImageFormat::Jpeg { quality: 85 }).unwrap();
        assert!(jpeg.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn test_encode_released_surface_fails() {
        let surface = Surface::new(16);
        assert!(matches!(
            surface.encode(ImageFormat::Png),
            Err(Error::Encode(_))
        ));
    }

    #[test]
    fn test_release_frees_memory() {
        let mut surface = Surface::new(64);
        surface.resize(32, 32).unwrap();
        surface.release();
        assert_eq!((surface.width(), surface.height()), (0, 0));
        assert!(surface.is_released());
    }

    #[test]
    fn test_flatten_onto_white() {
        assert_eq!(flatten_onto_white(&[0, 0, 0, 0]), vec![255, 255, 255]);
        assert_eq!(flatten_onto_white(&[10, 20, 30, 255]), vec![10, 20, 30]);
    }
}
