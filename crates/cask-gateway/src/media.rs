//! Pure, stateless content classification helpers.
//!
//! Two directions, deliberately asymmetric:
//!
//! - On write, a blob's stored type tag comes from its key's extension
//!   ([`type_tag`]), never from the bytes.
//! - On read, the response content type comes from sniffing the leading
//!   bytes ([`sniff_content_type`]), never from the key.

/// Fixed tag recorded for keys with no extension.
pub const FALLBACK_TYPE_TAG: &str = "bin";

/// Sniffing inspects at most this many leading bytes.
const SNIFF_LEN: usize = 512;

/// The type tag for a key: the suffix after the final `.` of the key's last
/// path segment, or [`FALLBACK_TYPE_TAG`] when there is none.
pub fn type_tag(key: &str) -> &str {
    let name = key.rsplit('/').next().unwrap_or(key);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => FALLBACK_TYPE_TAG,
    }
}

/// Classify content by its leading bytes.
///
/// Checks byte-order marks, then a table of magic-number signatures, then
/// falls back to a text-versus-binary scan. Unrecognized binary data is
/// `application/octet-stream`; anything that scans as text is
/// `text/plain; charset=utf-8`. The key's extension plays no part here.
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];

    if let Some(label) = match_bom(data) {
        return label;
    }
    if let Some(label) = match_signature(data) {
        return label;
    }
    if looks_textual(data) {
        "text/plain; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

fn match_bom(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xef, 0xbb, 0xbf]) {
        return Some("text/plain; charset=utf-8");
    }
    if data.starts_with(&[0xfe, 0xff]) {
        return Some("text/plain; charset=utf-16be");
    }
    if data.starts_with(&[0xff, 0xfe]) {
        return Some("text/plain; charset=utf-16le");
    }
    None
}

/// Prefix signatures, checked in order. RIFF containers need a second probe
/// at offset 8 and are handled separately.
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"%!PS-Adobe-", "application/postscript"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"BM", "image/bmp"),
    (b"OggS", "application/ogg"),
    (b"\x1a\x45\xdf\xa3", "video/webm"),
    (b"fLaC", "audio/flac"),
    (b"ID3", "audio/mpeg"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b\x08", "application/x-gzip"),
    (b"wOFF", "font/woff"),
    (b"wOF2", "font/woff2"),
    (b"\x00\x01\x00\x00", "font/ttf"),
    (b"OTTO", "font/otf"),
    (b"\x00asm", "application/wasm"),
];

fn match_signature(data: &[u8]) -> Option<&'static str> {
    if data.len() >= 12 && data.starts_with(b"RIFF") {
        return match &data[8..12] {
            b"WEBP" => Some("image/webp"),
            b"WAVE" => Some("audio/wave"),
            b"AVI " => Some("video/avi"),
            _ => None,
        };
    }
    SIGNATURES
        .iter()
        .find(|&&(prefix, _)| data.starts_with(prefix))
        .map(|&(_, label)| label)
}

/// `true` when the window contains no control bytes outside the usual
/// whitespace set (the WHATWG binary-byte classification).
fn looks_textual(data: &[u8]) -> bool {
    !data
        .iter()
        .any(|&b| matches!(b, 0x00..=0x08 | 0x0b | 0x0e..=0x1a | 0x1c..=0x1f))
}
