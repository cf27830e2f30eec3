// src/ppm/reader.rs

//! PPM decoder: byte-cursor scan of the header followed by the
//! variant-specific payload read.

use super::{PixelBuffer, PpmError, Variant, MAGIC, SAMPLES_PER_PIXEL};
use log::{debug, trace};
use std::fs;
use std::path::Path;

/// Reads and decodes a PPM file.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, PpmError> {
    let bytes = fs::read(path.as_ref())?;
    trace!(
        "read {} bytes from {}",
        bytes.len(),
        path.as_ref().display()
    );
    decode_bytes(&bytes)
}

/// Decodes a complete PPM byte stream.
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer, PpmError> {
    let mut cursor = Cursor::new(bytes);

    match cursor.next_byte() {
        Some(MAGIC) => {}
        _ => return Err(PpmError::NotRecognizedFormat),
    }
    let variant = cursor
        .next_byte()
        .and_then(Variant::from_code)
        .ok_or(PpmError::UnsupportedVariant)?;

    let width = parse_dimension(cursor.header_token())?;
    let height = parse_dimension(cursor.header_token())?;
    let max_value = parse_max_value(cursor.header_token())?;

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(SAMPLES_PER_PIXEL))
        .ok_or(PpmError::MalformedHeader)?;

    // Exactly one whitespace byte separates the max-color-value token from
    // the pixel payload. Tokens are maximal non-whitespace runs, so the
    // byte here is whitespace whenever it exists at all.
    if cursor.next_byte().is_none() {
        return Err(PpmError::TruncatedData {
            expected,
            actual: 0,
        });
    }

    let data = match variant {
        Variant::Binary => read_binary_samples(&mut cursor, expected)?,
        Variant::Text => read_text_samples(&mut cursor, expected)?,
    };

    debug!(
        "decoded P{} image: {}x{}, max color value {}",
        char::from(variant.code()),
        width,
        height,
        max_value
    );
    PixelBuffer::from_raw(width, height, max_value, data)
}

fn parse_dimension(token: Option<&[u8]>) -> Result<u32, PpmError> {
    token
        .and_then(parse_ascii_u32)
        .filter(|&n| n > 0)
        .ok_or(PpmError::MalformedHeader)
}

fn parse_max_value(token: Option<&[u8]>) -> Result<u8, PpmError> {
    token
        .and_then(parse_ascii_u32)
        .filter(|&n| n >= 1 && n <= super::MAX_COLOR_VALUE as u32)
        .map(|n| n as u8)
        .ok_or(PpmError::InvalidColorDepth)
}

fn parse_ascii_u32(token: &[u8]) -> Option<u32> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

fn read_binary_samples(cursor: &mut Cursor, expected: usize) -> Result<Vec<u8>, PpmError> {
    let rest = cursor.remaining();
    if rest.len() < expected {
        return Err(PpmError::TruncatedData {
            expected,
            actual: rest.len(),
        });
    }
    // Bytes past the declared payload are ignored.
    Ok(rest[..expected].to_vec())
}

fn read_text_samples(cursor: &mut Cursor, expected: usize) -> Result<Vec<u8>, PpmError> {
    let mut data = Vec::with_capacity(expected);
    for count in 0..expected {
        let sample = cursor
            .sample_token()
            .and_then(parse_ascii_u32)
            .filter(|&n| n <= super::MAX_COLOR_VALUE as u32)
            .ok_or(PpmError::TruncatedData {
                expected,
                actual: count,
            })?;
        data.push(sample as u8);
    }
    Ok(data)
}

/// Scanning position over the raw file bytes.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Everything from the current position to the end of input.
    fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skips whitespace and any `#` comment lines sitting between header
    /// tokens.
    fn skip_header_separators(&mut self) {
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'#') {
                return;
            }
            while !matches!(self.peek(), None | Some(b'\n')) {
                self.pos += 1;
            }
        }
    }

    /// The next header token, with comment lines allowed before it.
    fn header_token(&mut self) -> Option<&'a [u8]> {
        self.skip_header_separators();
        self.token_run()
    }

    /// The next payload sample token. Comments are not recognized inside
    /// the pixel payload.
    fn sample_token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace();
        self.token_run()
    }

    fn token_run(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if !b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(&self.bytes[start..self.pos])
        }
    }
}
