//! Decoding uploaded files to UTF-8 text using chardetng and `encoding_rs`.
//!
//! The import pipeline itself consumes `&str`; this module is the boundary
//! that turns whatever bytes a user uploaded into that text. Valid UTF-8
//! passes through zero-copy.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;

/// Check if the given bytes are valid UTF-8.
///
/// Uses SIMD-accelerated validation for performance.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Check if the data starts with a UTF-8 BOM (Byte Order Mark).
///
/// The UTF-8 BOM is the byte sequence: EF BB BF
pub fn has_utf8_bom(data: &[u8]) -> bool {
    data.len() >= 3 && data[0] == 0xEF && data[1] == 0xBB && data[2] == 0xBF
}

/// How an upload was decoded to UTF-8 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// The upload was already valid UTF-8.
    Utf8 {
        /// Whether a UTF-8 BOM was present.
        had_bom: bool,
    },
    /// The upload was transcoded from the named encoding.
    Transcoded(&'static str),
}

impl SourceEncoding {
    /// Returns true if the upload needed transcoding.
    pub fn was_transcoded(&self) -> bool {
        matches!(self, SourceEncoding::Transcoded(_))
    }
}

/// Decode uploaded bytes to UTF-8 text.
///
/// Handles, in order:
/// - UTF-16 LE/BE with BOM (chardetng does not handle these well)
/// - valid UTF-8, returned zero-copy
/// - legacy single/multi-byte encodings (Windows-125x, ISO-8859 variants,
///   GB2312/GBK, ...) detected with chardetng and transcoded with
///   `encoding_rs`
///
/// A UTF-8 BOM is left in place; the text normalizer strips the decoded
/// U+FEFF along with the rest of its cleanup.
pub fn decode_upload(data: &[u8]) -> (Cow<'_, str>, SourceEncoding) {
    if data.len() >= 2 {
        // UTF-16 LE BOM: FF FE
        if data[0] == 0xFF && data[1] == 0xFE {
            let (decoded, _, _) = encoding_rs::UTF_16LE.decode(data);
            return (
                Cow::Owned(decoded.into_owned()),
                SourceEncoding::Transcoded(encoding_rs::UTF_16LE.name()),
            );
        }
        // UTF-16 BE BOM: FE FF
        if data[0] == 0xFE && data[1] == 0xFF {
            let (decoded, _, _) = encoding_rs::UTF_16BE.decode(data);
            return (
                Cow::Owned(decoded.into_owned()),
                SourceEncoding::Transcoded(encoding_rs::UTF_16BE.name()),
            );
        }
    }

    if let Ok(text) = from_utf8(data) {
        return (
            Cow::Borrowed(text),
            SourceEncoding::Utf8 {
                had_bom: has_utf8_bom(data),
            },
        );
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);

    let (decoded, _, _) = encoding.decode(data);
    (
        Cow::Owned(decoded.into_owned()),
        SourceEncoding::Transcoded(encoding.name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_utf8() {
        assert!(is_utf8(b"Hello, World!"));
        assert!(is_utf8("こんにちは".as_bytes()));
        assert!(is_utf8(b""));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(!is_utf8(&[0xFF, 0xFE]));
        assert!(!is_utf8(&[0x80, 0x81, 0x82]));
    }

    #[test]
    fn test_utf8_bom() {
        let with_bom = [0xEF, 0xBB, 0xBF, b'a', b'b', b'c'];
        assert!(has_utf8_bom(&with_bom));
        assert!(!has_utf8_bom(b"abc"));
    }

    #[test]
    fn test_decode_utf8_passthrough() {
        let (text, encoding) = decode_upload(b"text,type\nhello,short-text\n");
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(encoding, SourceEncoding::Utf8 { had_bom: false });
    }

    #[test]
    fn test_decode_utf8_bom_reported() {
        let data = [0xEF, 0xBB, 0xBF, b'h', b'i'];
        let (_, encoding) = decode_upload(&data);
        assert_eq!(encoding, SourceEncoding::Utf8 { had_bom: true });
    }

    #[test]
    fn test_decode_utf16_le() {
        // UTF-16 LE with BOM: "Hi"
        let data: &[u8] = &[0xFF, 0xFE, b'H', 0x00, b'i', 0x00];
        let (text, encoding) = decode_upload(data);
        assert!(encoding.was_transcoded());
        assert_eq!(text.as_ref(), "Hi");
    }

    #[test]
    fn test_decode_windows1251() {
        // Windows-1251 encoded Cyrillic text: "Привет"
        let data: &[u8] = &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let (text, encoding) = decode_upload(data);
        assert!(encoding.was_transcoded());
        assert!(is_utf8(text.as_bytes()));
    }
}
