//! Streaming binary-to-hex-literal encoder.
//!
//! Bytes are rendered as unpadded lowercase hex literals, each followed by a
//! comma: `0x41,0x9,0xff,`. A line break plus two tabs is written before the
//! first token and before every `tokens_per_line`-th token after it, so an
//! array body for three bytes with the default options reads
//!
//! ```text
//! \n\t\t0x41,0x9,0xff,
//! ```
//!
//! The source is read forward exactly once through a fixed-size buffer, so
//! memory use does not grow with the input.

use std::io::{self, ErrorKind, Read, Write};

use thiserror::Error;

/// Tokens per line in the generated array body.
pub const DEFAULT_TOKENS_PER_LINE: usize = 20;

/// Indentation written after each line break in the array body.
pub const ROW_INDENT: &str = "\t\t";

const READ_CHUNK: usize = 8 * 1024;

/// Formatting options for one encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Number of hex tokens written per line
    pub tokens_per_line: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            tokens_per_line: DEFAULT_TOKENS_PER_LINE,
        }
    }
}

impl EncoderOptions {
    /// Options with a custom line width
    pub fn with_tokens_per_line(mut self, tokens_per_line: usize) -> Self {
        self.tokens_per_line = tokens_per_line;
        self
    }
}

/// Which side of the encode failed.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Reading from the source failed
    #[error("failed to read encoder input: {0}")]
    Read(#[source] io::Error),
    /// Writing to the sink failed
    #[error("failed to write encoded tokens: {0}")]
    Write(#[source] io::Error),
}

/// Encode every byte of `source` into `sink`, returning the token count.
///
/// The returned count equals the number of bytes read and is the
/// authoritative array length. Empty input writes nothing and returns 0.
/// A `tokens_per_line` of zero is treated as one.
pub fn encode<R, W>(
    source: &mut R,
    sink: &mut W,
    options: &EncoderOptions,
) -> Result<u64, EncodeError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let per_line = options.tokens_per_line.max(1) as u64;
    let mut buffer = [0u8; READ_CHUNK];
    let mut count: u64 = 0;

    loop {
        let read = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(EncodeError::Read(e)),
        };

        for &byte in &buffer[..read] {
            if count % per_line == 0 {
                write!(sink, "\n{ROW_INDENT}").map_err(EncodeError::Write)?;
            }
            write!(sink, "0x{byte:x},").map_err(EncodeError::Write)?;
            count += 1;
        }
    }

    Ok(count)
}

/// Parse an encoded array body back into bytes.
///
/// Test-only inverse of [`encode`].
#[cfg(test)]
pub(crate) fn decode_tokens(body: &str) -> Vec<u8> {
    body.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let digits = token.strip_prefix("0x").expect("token must start with 0x");
            u8::from_str_radix(digits, 16).expect("token must be a hex byte")
        })
        .collect()
}

#[cfg(test)]
#[path = "encoder_tests.rs"]
mod tests;
