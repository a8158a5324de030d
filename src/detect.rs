//! PDF header sniffing, run before any bytes reach the rendering backend.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// PDF format information read from the file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Whether the first object declares the file linearized (fast web view)
    pub linearized: bool,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3;

/// Readers accept junk ahead of the header as long as the header starts
/// within the first kilobyte.
const HEADER_WINDOW: usize = 1024;

/// The linearization dictionary must be the first object, so it sits in
/// the first kilobyte after the header of any linearized file.
const LINEARIZED_WINDOW: usize = 1024;
const LINEARIZED_KEY: &[u8] = b"/Linearized";

/// Detect PDF format from a file path.
///
/// Only the head of the file is read.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let file = File::open(path)?;
    let head_len = HEADER_WINDOW + PDF_MAGIC.len() + VERSION_LEN + LINEARIZED_WINDOW;
    let mut head = Vec::with_capacity(head_len);
    BufReader::new(file)
        .take(head_len as u64)
        .read_to_end(&mut head)?;
    detect_format_from_bytes(&head)
}

/// Detect PDF format from bytes.
///
/// # Returns
/// * `Ok(PdfFormat)` if a valid PDF header starts within the first 1024 bytes
/// * `Err(Error::Decode)` if the data is not a PDF
/// * `Err(Error::UnsupportedVersion)` if the header version is malformed
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN {
        return Err(Error::Decode(format!(
            "input is too short to be a PDF ({} bytes)",
            data.len()
        )));
    }

    let search = &data[..data.len().min(HEADER_WINDOW - 1 + PDF_MAGIC.len())];
    let Some(offset) = search
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
    else {
        return Err(Error::Decode(format!(
            "missing %PDF- header in the first {} bytes",
            HEADER_WINDOW
        )));
    };
    if offset > 0 {
        log::debug!("PDF header found after {} leading bytes", offset);
    }

    let header = &data[offset..];
    let version_bytes = &header[PDF_MAGIC.len()..header.len().min(PDF_MAGIC.len() + VERSION_LEN)];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    let window = &header[..header.len().min(LINEARIZED_WINDOW)];
    let linearized = window
        .windows(LINEARIZED_KEY.len())
        .any(|w| w == LINEARIZED_KEY);

    Ok(PdfFormat {
        version,
        linearized,
    })
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if a file starts with a valid PDF header.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.version, "1.7");
        assert!(!format.linearized);
    }

    #[test]
    fn test_detect_linearized() {
        let data = b"%PDF-1.5\n1 0 obj\n<< /Linearized 1 /L 1234 /N 3 >>\nendobj\n";
        let format = detect_format_from_bytes(data).unwrap();
        assert!(format.linearized);
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_detect_header_after_leading_bytes() {
        let format = detect_format_from_bytes(b"\r\n\r\n%PDF-1.6\n%%EOF\n").unwrap();
        assert_eq!(format.version, "1.6");

        let mut data = vec![b' '; HEADER_WINDOW - 1];
        data.extend_from_slice(b"%PDF-1.4\n");
        assert_eq!(detect_format_from_bytes(&data).unwrap().version, "1.4");
    }

    #[test]
    fn test_detect_header_too_far_in() {
        let mut data = vec![b' '; HEADER_WINDOW + 1];
        data.extend_from_slice(b"%PDF-1.4\n");
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_detect_too_short() {
        let result = detect_format_from_bytes(b"%PDF");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_detect_bad_version() {
        let result = detect_format_from_bytes(b"%PDF-x.y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(v)) if v == "x.y"));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
        assert!(!is_pdf_bytes(b""));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }

    #[test]
    fn test_detect_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header.pdf");
        std::fs::write(&path, b"%PDF-1.4\n%%EOF\n").unwrap();
        assert_eq!(detect_format_from_path(&path).unwrap().version, "1.4");

        let padded = dir.path().join("padded.pdf");
        let mut data = vec![b'\n'; 1000];
        data.extend_from_slice(b"%PDF-2.0\n%%EOF\n");
        std::fs::write(&padded, &data).unwrap();
        assert_eq!(detect_format_from_path(&padded).unwrap().version, "2.0");
        assert!(is_pdf(&path));
        assert!(!is_pdf(dir.path().join("missing.pdf")));
    }
}
