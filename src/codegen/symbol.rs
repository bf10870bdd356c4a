//! Identifier stems derived from input file paths.
//!
//! A file `assets/my-logo.PNG` yields the stem `my_logo_png`: the file stem
//! with every `-` turned into `_`, followed by `_` and the lowercased
//! extension (`_no_ext` when there is none). The three generated declarations
//! of a file are named from it:
//!
//! | declaration | name                 |
//! |-------------|----------------------|
//! | filename    | `my_logo_png_filename` |
//! | size        | `my_logo_png_data_size` |
//! | array       | `my_logo_data`       |
//!
//! The array is named from the file stem alone, without the extension.
//!
//! Stems are not checked for uniqueness or for being legal C++ identifiers.
//! `a-1.txt` and `a_1.txt` both produce `a_1_txt`, and a run containing both
//! emits conflicting declarations; a leading digit or an embedded `.` (as in
//! `archive.tar.gz` -> `archive.tar_gz`) passes straight through.

use std::fmt;
use std::path::Path;

/// Extension text used for files without one.
pub const NO_EXTENSION: &str = "no_ext";

/// Naming root shared by the declarations generated for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolStem {
    base: String,
    extension: String,
}

impl SymbolStem {
    /// File stem with hyphens normalised, without the extension part
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Lowercased extension without its dot, or [`NO_EXTENSION`]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Name of the filename string constant.
    pub fn filename_symbol(&self) -> String {
        format!("{self}_filename")
    }

    /// Name of the size constant.
    pub fn size_symbol(&self) -> String {
        format!("{self}_data_size")
    }

    /// Name of the byte array.
    pub fn data_symbol(&self) -> String {
        format!("{}_data", self.base)
    }
}

impl fmt::Display for SymbolStem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.base, self.extension)
    }
}

/// Derive the symbol stem for `path`.
///
/// Pure function of the path text; never fails. Degenerate paths such as
/// `..` or the empty path produce an empty base.
pub fn symbol_stem(path: &Path) -> SymbolStem {
    let base = path
        .file_stem()
        .map(|stem| normalize_identifier(&stem.to_string_lossy()))
        .unwrap_or_default();

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| NO_EXTENSION.to_string());

    SymbolStem { base, extension }
}

/// Replace every `-` with `_`.
///
/// Also applied to namespace names.
pub fn normalize_identifier(name: &str) -> String {
    name.replace('-', "_")
}
