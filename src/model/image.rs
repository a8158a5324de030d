//! Encoded page images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Encoding used for rendered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    /// Lossless PNG, keeps transparency
    #[default]
    Png,
    /// JPEG flattened onto white
    Jpeg {
        /// Encoder quality, 1-100
        quality: u8,
    },
}

impl ImageFormat {
    /// MIME type of the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg { .. } => "image/jpeg",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg { .. } => "jpg",
        }
    }
}

/// A rendered page, encoded and ready to register as an image asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageImage {
    /// Encoded image bytes
    #[serde(skip)]
    pub data: Vec<u8>,

    /// Encoding of `data`
    pub format: ImageFormat,

    /// Width in device pixels
    pub pixel_width: u32,

    /// Height in device pixels
    pub pixel_height: u32,
}

impl PageImage {
    pub fn new(data: Vec<u8>, format: ImageFormat, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            data,
            format,
            pixel_width,
            pixel_height,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Size of the encoded bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// The image as a `data:` URI, suitable as an asset `src`.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.data))
    }

    /// Suggested filename for page `number`.
    pub fn suggested_filename(&self, number: u32) -> String {
        format!("page-{:03}.{}", number, self.format.extension())
    }
}
