// Text encodings for the input and output streams.
//
//   - `decoder`: LineReader, bytes -> Unicode -> lines, streaming
//   - `encoder`: LineEncoder, lines -> bytes in the target encoding
//
// Decoding goes through `encoding_rs` for every identifier. Encoding uses
// `encoding_rs` for EUC-KR only: the WHATWG model behind it never emits
// UTF-16, and UTF-8 needs no transcoding, so both are serialized directly.

pub mod decoder;
pub mod encoder;

use std::fmt;
use std::str::FromStr;

use encoding_rs::{Decoder, EUC_KR, Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::config::ConfigError;

pub use decoder::LineReader;
pub use encoder::{EncodeError, LineEncoder};

pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
pub const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
pub const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// The fixed set of encodings a run can read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// UTF-8; a leading BOM is ordinary text (U+FEFF).
    #[default]
    Utf8,
    /// UTF-8; a leading BOM is stripped on read and always written.
    Utf8Bom,
    /// UTF-16 little endian, no BOM handling.
    Utf16Le,
    /// UTF-16; read sniffs the BOM (default little endian), write emits `FF FE`.
    Utf16LeBom,
    /// UTF-16 big endian, no BOM handling.
    Utf16Be,
    /// UTF-16; read sniffs the BOM (default big endian), write emits `FE FF`.
    Utf16BeBom,
    /// EUC-KR (Windows-949 superset, as decoded by browsers).
    EucKr,
}

impl TextEncoding {
    pub const ALL: [TextEncoding; 7] = [
        TextEncoding::Utf8,
        TextEncoding::Utf8Bom,
        TextEncoding::Utf16Le,
        TextEncoding::Utf16LeBom,
        TextEncoding::Utf16Be,
        TextEncoding::Utf16BeBom,
        TextEncoding::EucKr,
    ];

    /// Identifier accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF8",
            Self::Utf8Bom => "UTF8BOM",
            Self::Utf16Le => "UTF16LE",
            Self::Utf16LeBom => "UTF16LEBOM",
            Self::Utf16Be => "UTF16BE",
            Self::Utf16BeBom => "UTF16BEBOM",
            Self::EucKr => "EUCKR",
        }
    }

    /// The `encoding_rs` codec behind this identifier.
    pub fn codec(self) -> &'static Encoding {
        match self {
            Self::Utf8 | Self::Utf8Bom => UTF_8,
            Self::Utf16Le | Self::Utf16LeBom => UTF_16LE,
            Self::Utf16Be | Self::Utf16BeBom => UTF_16BE,
            Self::EucKr => EUC_KR,
        }
    }

    /// Byte order mark written ahead of the first output line, if any.
    pub fn bom(self) -> Option<&'static [u8]> {
        match self {
            Self::Utf8Bom => Some(UTF8_BOM),
            Self::Utf16LeBom => Some(UTF16LE_BOM),
            Self::Utf16BeBom => Some(UTF16BE_BOM),
            _ => None,
        }
    }

    /// A fresh decoder with this identifier's BOM policy.
    pub fn new_decoder(self) -> Decoder {
        match self {
            // Sniffing may switch to whichever UTF the BOM announces.
            Self::Utf16LeBom | Self::Utf16BeBom => self.codec().new_decoder(),
            Self::Utf8Bom => self.codec().new_decoder_with_bom_removal(),
            Self::Utf8 | Self::Utf16Le | Self::Utf16Be | Self::EucKr => {
                self.codec().new_decoder_without_bom_handling()
            }
        }
    }

    fn choices() -> String {
        Self::ALL.map(TextEncoding::name).join(", ")
    }
}

/// Case-insensitive; `-` and `_` are ignored, so `utf-16le` and `euc_kr` parse.
impl FromStr for TextEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect();
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ConfigError::UnknownEncoding {
                name: s.to_string(),
                choices: Self::choices(),
            })
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_identifier() {
        for enc in TextEncoding::ALL {
            assert_eq!(enc.name().parse::<TextEncoding>().unwrap(), enc);
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_separators() {
        assert_eq!("utf-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!(
            "utf_16le_bom".parse::<TextEncoding>().unwrap(),
            TextEncoding::Utf16LeBom
        );
        assert_eq!("euc-kr".parse::<TextEncoding>().unwrap(), TextEncoding::EucKr);
    }

    #[test]
    fn unknown_identifier_lists_choices() {
        let err = "latin1".parse::<TextEncoding>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown encoding 'latin1' (expected one of: UTF8, UTF8BOM, UTF16LE, \
             UTF16LEBOM, UTF16BE, UTF16BEBOM, EUCKR)"
        );
    }

    #[test]
    fn only_bom_variants_write_a_bom() {
        let with_bom: Vec<_> = TextEncoding::ALL
            .into_iter()
            .filter(|e| e.bom().is_some())
            .collect();
        assert_eq!(
            with_bom,
            [
                TextEncoding::Utf8Bom,
                TextEncoding::Utf16LeBom,
                TextEncoding::Utf16BeBom
            ]
        );
    }
}
