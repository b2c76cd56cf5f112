// Streaming decode + line split.
//
// LineReader pulls fixed-size byte chunks from the reader, decodes them into
// a String buffer, and hands out one line at a time:
//   - `\n`, `\r\n` and a lone `\r` all end a line; terminators are dropped
//   - a `\r\n` pair split across two chunks is still a single terminator
//   - a trailing terminator does not produce an extra empty line
//   - the last line needs no terminator
//
// Memory stays bounded by one chunk plus the longest line.

use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder};

use super::TextEncoding;

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

/// Decodes `src` into the spare capacity of `dst`, growing it as needed.
/// Returns whether malformed input was replaced with U+FFFD.
fn decode_into(decoder: &mut Decoder, mut src: &[u8], dst: &mut String, last: bool) -> bool {
    let mut replaced = false;
    loop {
        let needed = decoder
            .max_utf8_buffer_length(src.len())
            .unwrap_or(src.len() + 16);
        dst.reserve(needed);
        let (result, read, had_replacements) = decoder.decode_to_string(src, dst, last);
        replaced |= had_replacements;
        src = &src[read..];
        match result {
            CoderResult::InputEmpty => return replaced,
            CoderResult::OutputFull => continue,
        }
    }
}

/// Reads decoded lines from a byte stream.
pub struct LineReader<R: Read> {
    reader: R,
    decoder: Decoder,
    chunk: Vec<u8>,
    text: String,
    pos: usize,
    /// Bytes of `text[pos..]` already searched without finding a terminator.
    scanned: usize,
    eof: bool,
    /// Previous line ended in `\r`; swallow a `\n` that follows it.
    after_cr: bool,
    replaced: bool,
    bytes_read: u64,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R, encoding: TextEncoding) -> Self {
        Self::with_capacity(BUF_SIZE, reader, encoding)
    }

    /// `capacity` is the read chunk size in bytes.
    pub fn with_capacity(capacity: usize, reader: R, encoding: TextEncoding) -> Self {
        Self {
            reader,
            decoder: encoding.new_decoder(),
            chunk: vec![0u8; capacity.max(1)],
            text: String::new(),
            pos: 0,
            scanned: 0,
            eof: false,
            after_cr: false,
            replaced: false,
            bytes_read: 0,
        }
    }

    /// Total raw bytes consumed from the reader so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Whether any malformed input has been replaced with U+FFFD.
    pub fn had_replacements(&self) -> bool {
        self.replaced
    }

    /// The next line without its terminator, or `None` at end of stream.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if self.after_cr {
                let next = self.text[self.pos..].chars().next();
                match next {
                    Some('\n') => {
                        self.pos += 1;
                        self.after_cr = false;
                    }
                    Some(_) => self.after_cr = false,
                    None if self.eof => self.after_cr = false,
                    None => {
                        self.fill()?;
                        continue;
                    }
                }
            }

            let pending = &self.text[self.pos..];
            if let Some(i) = pending[self.scanned..].find(['\n', '\r']) {
                let i = self.scanned + i;
                let line = pending[..i].to_string();
                self.after_cr = pending.as_bytes()[i] == b'\r';
                self.pos += i + 1;
                self.scanned = 0;
                return Ok(Some(line));
            }
            self.scanned = pending.len();

            if self.eof {
                if pending.is_empty() {
                    return Ok(None);
                }
                let line = pending.to_string();
                self.pos = self.text.len();
                self.scanned = 0;
                return Ok(Some(line));
            }

            self.fill()?;
        }
    }

    /// Read and decode one more chunk, discarding consumed text first.
    fn fill(&mut self) -> io::Result<()> {
        self.text.drain(..self.pos);
        self.pos = 0;

        let n = loop {
            match self.reader.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.bytes_read += n as u64;

        let last = n == 0;
        self.replaced |= decode_into(&mut self.decoder, &self.chunk[..n], &mut self.text, last);
        self.eof = last;
        Ok(())
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
