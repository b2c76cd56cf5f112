// Line encoder: Unicode lines -> bytes in the writer encoding.
//
// Every line gets a single `\n` terminator regardless of what the input
// used. BOM-carrying encodings emit their mark once, ahead of the first
// line (or at finish for an empty document).

use std::io::{self, Write};

use encoding_rs::{Encoder, EncoderResult};
use thiserror::Error;

use super::TextEncoding;

const TERMINATOR: &str = "\n";

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot encode {ch:?} as {encoding}")]
    Unmappable { ch: char, encoding: TextEncoding },
}

enum Sink {
    Utf8,
    Utf16 { big_endian: bool },
    Codec(Encoder),
}

/// Writes lines to `W` in a fixed encoding.
pub struct LineEncoder<W: Write> {
    writer: W,
    encoding: TextEncoding,
    sink: Sink,
    bom: Option<&'static [u8]>,
    buf: Vec<u8>,
    bytes_written: u64,
}

impl<W: Write> LineEncoder<W> {
    pub fn new(writer: W, encoding: TextEncoding) -> Self {
        let sink = match encoding {
            TextEncoding::Utf8 | TextEncoding::Utf8Bom => Sink::Utf8,
            TextEncoding::Utf16Le | TextEncoding::Utf16LeBom => Sink::Utf16 { big_endian: false },
            TextEncoding::Utf16Be | TextEncoding::Utf16BeBom => Sink::Utf16 { big_endian: true },
            TextEncoding::EucKr => Sink::Codec(encoding.codec().new_encoder()),
        };
        Self {
            writer,
            encoding,
            sink,
            bom: encoding.bom(),
            buf: Vec::new(),
            bytes_written: 0,
        }
    }

    /// Bytes handed to the writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Encode `line` plus a terminator and write it out.
    pub fn write_line(&mut self, line: &str) -> Result<(), EncodeError> {
        self.buf.clear();
        if let Some(bom) = self.bom.take() {
            self.buf.extend_from_slice(bom);
        }
        self.encode(line)?;
        self.encode(TERMINATOR)?;
        self.writer.write_all(&self.buf)?;
        self.bytes_written += self.buf.len() as u64;
        Ok(())
    }

    /// Flush and hand back the writer with the total byte count.
    pub fn finish(mut self) -> Result<(W, u64), EncodeError> {
        if let Some(bom) = self.bom.take() {
            self.writer.write_all(bom)?;
            self.bytes_written += bom.len() as u64;
        }
        self.writer.flush()?;
        Ok((self.writer, self.bytes_written))
    }

    fn encode(&mut self, text: &str) -> Result<(), EncodeError> {
        match &mut self.sink {
            Sink::Utf8 => self.buf.extend_from_slice(text.as_bytes()),
            Sink::Utf16 { big_endian } => {
                let big_endian = *big_endian;
                for unit in text.encode_utf16() {
                    let bytes = if big_endian {
                        unit.to_be_bytes()
                    } else {
                        unit.to_le_bytes()
                    };
                    self.buf.extend_from_slice(&bytes);
                }
            }
            Sink::Codec(encoder) => {
                let mut src = text;
                loop {
                    let needed = encoder
                        .max_buffer_length_from_utf8_without_replacement(src.len())
                        .unwrap_or(src.len() + 16);
                    self.buf.reserve(needed);
                    let (result, read) =
                        encoder.encode_from_utf8_to_vec_without_replacement(src, &mut self.buf, false);
                    src = &src[read..];
                    match result {
                        EncoderResult::InputEmpty => break,
                        EncoderResult::OutputFull => continue,
                        EncoderResult::Unmappable(ch) => {
                            return Err(EncodeError::Unmappable {
                                ch,
                                encoding: self.encoding,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_lines(encoding: TextEncoding, lines: &[&str]) -> Vec<u8> {
        let mut enc = LineEncoder::new(Vec::new(), encoding);
        for line in lines {
            enc.write_line(line).unwrap();
        }
        enc.finish().unwrap().0
    }

    #[test]
    fn utf8_appends_lf() {
        assert_eq!(encode_lines(TextEncoding::Utf8, &["a", "", "b"]), b"a\n\nb\n");
    }

    #[test]
    fn bom_written_once() {
        assert_eq!(
            encode_lines(TextEncoding::Utf8Bom, &["a", "b"]),
            b"\xEF\xBB\xBFa\nb\n"
        );
        assert_eq!(
            encode_lines(TextEncoding::Utf16LeBom, &["a"]),
            [0xFF, 0xFE, b'a', 0, b'\n', 0]
        );
        assert_eq!(
            encode_lines(TextEncoding::Utf16BeBom, &["a"]),
            [0xFE, 0xFF, 0, b'a', 0, b'\n']
        );
    }

    #[test]
    fn empty_document_still_gets_bom() {
        assert_eq!(encode_lines(TextEncoding::Utf8Bom, &[]), crate::encoding::UTF8_BOM);
        assert!(encode_lines(TextEncoding::Utf16Le, &[]).is_empty());
    }

    #[test]
    fn utf16_surrogate_pairs() {
        assert_eq!(
            encode_lines(TextEncoding::Utf16Be, &["😀"]),
            [0xD8u8, 0x3D, 0xDE, 0x00, 0x00, 0x0A]
        );
    }

    #[test]
    fn euc_kr_encodes_hangul() {
        let (expected, _, _) = encoding_rs::EUC_KR.encode("가\n");
        assert_eq!(encode_lines(TextEncoding::EucKr, &["가"]), &*expected);
    }

    #[test]
    fn euc_kr_rejects_unmappable() {
        let mut enc = LineEncoder::new(Vec::new(), TextEncoding::EucKr);
        let err = enc.write_line("ok 😀").unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Unmappable {
                ch: '😀',
                encoding: TextEncoding::EucKr
            }
        ));
        assert_eq!(enc.bytes_written(), 0);
    }

    #[test]
    fn counts_bytes_written() {
        let mut enc = LineEncoder::new(Vec::new(), TextEncoding::Utf16Le);
        enc.write_line("ab").unwrap();
        assert_eq!(enc.bytes_written(), 6);
    }
}
