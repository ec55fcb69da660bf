//! Text decoding with a fixed fallback chain.
//!
//! Inputs come from spreadsheets exported on different systems, so the
//! bytes are tried as UTF-8, then ISO-8859-1, then Windows-1252; the first
//! decoder that accepts the whole buffer wins.

use std::fmt;

use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Encodings attempted, in order.
pub const DECODE_ORDER: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
            Self::Windows1252 => "windows-1252",
        }
    }

    /// Decodes the whole buffer or returns `None` on the first invalid byte.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(|text| text.into_owned())
            }
            Self::Latin1 => decode_latin1(bytes),
            Self::Windows1252 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Strict ISO-8859-1: the C1 range 0x80-0x9F never appears in real Latin-1
// text but is where Windows-1252 puts its smart quotes and dashes.
fn decode_latin1(bytes: &[u8]) -> Option<String> {
    if bytes.iter().any(|byte| (0x80..=0x9F).contains(byte)) {
        return None;
    }
    Some(bytes.iter().map(|&byte| char::from(byte)).collect())
}

/// Decodes with the first encoding in [`DECODE_ORDER`] that accepts the bytes.
pub fn decode_text(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    for encoding in DECODE_ORDER {
        match encoding.decode(bytes) {
            Some(text) => return Some((text, encoding)),
            None => tracing::debug!(encoding = %encoding, "decode attempt rejected"),
        }
    }
    None
}

/// Human-readable list of the attempted encodings, for error messages.
pub fn attempted_encodings() -> String {
    DECODE_ORDER
        .iter()
        .map(|encoding| encoding.name())
        .collect::<Vec<_>>()
        .join(", ")
}
