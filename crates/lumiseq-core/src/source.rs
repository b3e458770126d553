//! Reading sequence files that are not guaranteed to be UTF-8.
//!
//! Sequence files are usually plain ASCII, but comments written on other
//! systems occasionally arrive as GBK, Latin-1 or UTF-16 and should not
//! abort a compile. UTF-8 passes straight through; anything else goes
//! through encoding detection.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

/// Reads a sequence file into decoded text.
pub fn read_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_text(&bytes))
}

/// Decodes raw file bytes: UTF-8 fast path, detection fallback.
pub fn decode_text(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        // Editors on Windows like to prepend a BOM; it is not content.
        return text.strip_prefix('\u{feff}').unwrap_or(text).to_string();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, used, _) = encoding.decode(bytes);
    debug!("sequence file decoded as {}", used.name());
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode_text(b"* - 500\n"), "* - 500\n");
    }

    #[test]
    fn utf8_bom_is_stripped() {
        assert_eq!(decode_text(b"\xEF\xBB\xBF# header\n* 1\n"), "# header\n* 1\n");
    }

    #[test]
    fn utf16le_with_bom_decodes() {
        let bytes = b"\xFF\xFE*\x00 \x005\x000\x000\x00";
        assert_eq!(decode_text(bytes), "* 500");
    }

    #[test]
    fn legacy_encodings_keep_ascii_lines_intact() {
        // A non-UTF-8 comment byte must not corrupt the ASCII step line,
        // whatever legacy encoding the detector settles on.
        let text = decode_text(b"# caf\xE9\n* - 100\n");
        assert!(text.starts_with("# caf"));
        assert!(text.contains("\n* - 100\n"));
    }

    #[test]
    fn empty_input_decodes_to_empty() {
        assert_eq!(decode_text(b""), "");
    }
}
