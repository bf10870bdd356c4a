//! Per-file declaration blocks.
//!
//! For `hello.txt` holding `AB` the emitted block is
//!
//! ```text
//! 	const char * hello_txt_filename = "hello.txt";
//! 	const unsigned int hello_txt_data_size = 2;
//! 	unsigned char hello_data[hello_txt_data_size] = {
//! 		0x41,0x42,
//! 	};
//! ```
//!
//! The size constant precedes the array but must equal the number of tokens
//! in it, so the array body is first encoded into an anonymous spool file.
//! The input is still read forward exactly once and memory use stays flat;
//! the constant is written from the encoder's count and the spool is then
//! copied into the sink.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codegen::encoder::{encode, EncodeError, EncoderOptions};
use crate::codegen::symbol::{symbol_stem, SymbolStem};
use crate::core::errors::{RecEmError, Result, ResultExt};

/// What was written for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSummary {
    /// Input path as given
    pub path: PathBuf,
    /// Stem the declarations were named from
    pub stem: SymbolStem,
    /// Value of the `_data_size` constant, equal to the array's token count
    pub declared_size: u64,
    /// Length the filesystem reported when the file was opened
    pub probed_size: u64,
}

/// Write the declaration block for `path` to `sink`.
///
/// `output_path` is only used to name the sink in write errors. Files whose
/// reported length exceeds an `unsigned int` are rejected before reading.
pub fn emit_declaration<W>(
    path: &Path,
    sink: &mut W,
    output_path: &Path,
    options: &EncoderOptions,
) -> Result<DeclarationSummary>
where
    W: Write + ?Sized,
{
    let file = File::open(path).map_err(|e| RecEmError::input(path, e))?;
    let probed_size = file
        .metadata()
        .map_err(|e| RecEmError::input(path, e))?
        .len();
    ensure_fits_size_constant(path, probed_size)?;

    let mut reader = BufReader::new(file);
    let declared_size = emit_from_reader(path, &mut reader, sink, output_path, options)?;

    if declared_size == probed_size {
        debug!("Embedded {} bytes from {}", declared_size, path.display());
    } else {
        debug!(
            "{} reported {} bytes but streamed {}; declaring the streamed size",
            path.display(),
            probed_size,
            declared_size
        );
    }

    Ok(DeclarationSummary {
        path: path.to_path_buf(),
        stem: symbol_stem(path),
        declared_size,
        probed_size,
    })
}

/// Emit the block for `path` with its contents taken from `source`.
///
/// Returns the token count, which is also the declared size.
fn emit_from_reader<R, W>(
    path: &Path,
    source: &mut R,
    sink: &mut W,
    output_path: &Path,
    options: &EncoderOptions,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut spool = tempfile::tempfile().context("Failed to create spool file")?;

    let token_count = {
        let mut spool_writer = BufWriter::new(&mut spool);
        let count = encode(source, &mut spool_writer, options).map_err(|e| match e {
            EncodeError::Read(e) => RecEmError::input(path, e),
            EncodeError::Write(e) => {
                RecEmError::io(format!("Failed to spool {}", path.display()), e)
            }
        })?;
        spool_writer
            .flush()
            .with_context(|| format!("Failed to spool {}", path.display()))?;
        count
    };
    ensure_fits_size_constant(path, token_count)?;
    spool
        .rewind()
        .with_context(|| format!("Failed to rewind spool for {}", path.display()))?;

    let stem = symbol_stem(path);
    let write_err = |e: io::Error| RecEmError::output(output_path, e);

    writeln!(
        sink,
        "\tconst char * {} = \"{}\";",
        stem.filename_symbol(),
        escape_string_literal(&display_filename(path))
    )
    .map_err(write_err)?;
    writeln!(
        sink,
        "\tconst unsigned int {} = {token_count};",
        stem.size_symbol()
    )
    .map_err(write_err)?;
    write!(
        sink,
        "\tunsigned char {}[{}] = {{",
        stem.data_symbol(),
        stem.size_symbol()
    )
    .map_err(write_err)?;
    io::copy(&mut spool, &mut *sink).map_err(write_err)?;
    write!(sink, "\n\t}};\n").map_err(write_err)?;

    Ok(token_count)
}

/// The size constant is an `unsigned int`.
fn ensure_fits_size_constant(path: &Path, len: u64) -> Result<()> {
    if u32::try_from(len).is_err() {
        return Err(RecEmError::InputTooLarge {
            path: path.to_path_buf(),
            len,
        });
    }
    Ok(())
}

/// Bare filename of `path`, without any directory part.
fn display_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Escape `text` so it forms a valid C++ string literal.
///
/// Control characters become octal escapes; `\x` is avoided because it
/// swallows any hex digits that follow.
fn escape_string_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_ascii_control() => escaped.push_str(&format!("\\{:03o}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::encoder::decode_tokens;
    use std::fs;
    use tempfile::tempdir;

    fn emit_to_string(path: &Path) -> (DeclarationSummary, String) {
        let mut sink = Vec::new();
        let summary = emit_declaration(
            path,
            &mut sink,
            Path::new("rec_em.hpp"),
            &EncoderOptions::default(),
        )
        .unwrap();
        (summary, String::from_utf8(sink).unwrap())
    }

    #[test]
    fn test_hello_block() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        fs::write(&path, [0x41u8, 0x42]).unwrap();

        let (summary, text) = emit_to_string(&path);

        assert_eq!(
            text,
            "\tconst char * hello_txt_filename = \"hello.txt\";\n\
             \tconst unsigned int hello_txt_data_size = 2;\n\
             \tunsigned char hello_data[hello_txt_data_size] = {\n\
             \t\t0x41,0x42,\n\
             \t};\n"
        );
        assert_eq!(summary.declared_size, 2);
        assert_eq!(summary.probed_size, 2);
    }

    #[test]
    fn test_empty_file_block() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("b.bin");
        fs::write(&path, b"").unwrap();

        let (summary, text) = emit_to_string(&path);

        assert!(text.contains("const unsigned int b_bin_data_size = 0;"));
        assert!(text.ends_with("unsigned char b_data[b_bin_data_size] = {\n\t};\n"));
        assert_eq!(summary.declared_size, 0);
    }

    #[test]
    fn test_size_constant_matches_token_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.dat");
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        fs::write(&path, &bytes).unwrap();

        let (summary, text) = emit_to_string(&path);

        assert!(text.contains("blob_dat_data_size = 1000;"));
        let body_start = text.find('{').unwrap() + 1;
        let body_end = text.rfind('}').unwrap();
        assert_eq!(decode_tokens(&text[body_start..body_end]), bytes);
        assert_eq!(summary.declared_size, 1000);
    }

    #[test]
    fn test_filename_keeps_original_spelling() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("my-Icon.PNG");
        fs::write(&path, [1u8]).unwrap();

        let (_, text) = emit_to_string(&path);

        assert!(text.contains("const char * my_Icon_png_filename = \"my-Icon.PNG\";"));
        assert!(text.contains("unsigned char my_Icon_data[my_Icon_png_data_size]"));
    }

    #[test]
    fn test_missing_input_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.bin");
        let mut sink = Vec::new();

        let err = emit_declaration(
            &path,
            &mut sink,
            Path::new("rec_em.hpp"),
            &EncoderOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, RecEmError::InputUnavailable { .. }));
        assert!(err.to_string().contains("gone.bin"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_escape_string_literal() {
        assert_eq!(escape_string_literal("plain.txt"), "plain.txt");
        assert_eq!(escape_string_literal("a\"b\\c"), "a\\\"b\\\\c");
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape_string_literal("a\nb\tc\r"), "a\\nb\\tc\\r");
        assert_eq!(escape_string_literal("x\u{1}ab"), "x\\001ab");
        assert_eq!(escape_string_literal("del\u{7f}"), "del\\177");
        assert_eq!(escape_string_literal("café"), "café");
    }

    #[cfg(unix)]
    #[test]
    fn test_filename_with_newline_stays_on_one_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two\nlines.bin");
        fs::write(&path, [7u8]).unwrap();

        let (_, text) = emit_to_string(&path);

        assert!(text.contains("_filename = \"two\\nlines.bin\";\n"));
    }

    #[test]
    fn test_size_constant_comes_from_stream() {
        let mut sink = Vec::new();
        let mut source: &[u8] = b"hello";

        let declared = emit_from_reader(
            Path::new("status"),
            &mut source,
            &mut sink,
            Path::new("rec_em.hpp"),
            &EncoderOptions::default(),
        )
        .unwrap();

        let text = String::from_utf8(sink).unwrap();
        assert_eq!(declared, 5);
        assert!(text.contains("const unsigned int status_no_ext_data_size = 5;"));
        assert!(text.ends_with("{\n\t\t0x68,0x65,0x6c,0x6c,0x6f,\n\t};\n"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_size_constant_for_file_with_unreliable_length() {
        // procfs reports a zero length for files that stream content
        let path = Path::new("/proc/self/status");
        let (summary, text) = emit_to_string(path);

        let marker = "status_no_ext_data_size = ";
        let start = text.find(marker).unwrap() + marker.len();
        let end = start + text[start..].find(';').unwrap();
        let constant: u64 = text[start..end].parse().unwrap();

        let body_start = text.find('{').unwrap() + 1;
        let body_end = text.rfind('}').unwrap();
        let tokens = decode_tokens(&text[body_start..body_end]).len() as u64;

        assert!(tokens > 0);
        assert_eq!(constant, tokens);
        assert_eq!(summary.declared_size, tokens);
    }
}
