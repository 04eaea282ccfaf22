//! TrueType font lookup.
//!
//! The layout engine measures text with real glyph metrics, so rendering needs
//! a TrueType family on disk. [`FontSource::discover`] looks in the usual
//! system font directories; [`FontSource::new`] points at an explicit one.

use std::fs;
use std::path::{Path, PathBuf};

use genpdf::fonts::{FontData, FontFamily};
use tracing::debug;

use crate::error::DocError;

/// Sans-serif families tried by [`FontSource::find_in`], in order.
pub const FAMILIES: &[&str] = &["LiberationSans", "DejaVuSans", "Arial"];

/// Directories searched by [`FontSource::discover`], in order.
pub const SEARCH_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu-sans-fonts",
    "/usr/share/fonts/TTF",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
];

const REGULAR: &[&str] = &["-Regular", ""];
const BOLD: &[&str] = &["-Bold"];
const ITALIC: &[&str] = &["-Italic", "-Oblique"];
const BOLD_ITALIC: &[&str] = &["-BoldItalic", "-BoldOblique"];

/// A font family stored as `<dir>/<family><suffix>.ttf` files.
///
/// Only the regular face is required. Missing bold or italic faces fall back
/// to the regular one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSource {
    dir: PathBuf,
    family: String,
}

impl FontSource {
    /// Family `family` in directory `dir`.
    pub fn new(dir: impl Into<PathBuf>, family: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            family: family.into(),
        }
    }

    /// First of [`FAMILIES`] with a regular face in `dir`.
    pub fn find_in(dir: impl AsRef<Path>) -> Option<Self> {
        FAMILIES
            .iter()
            .map(|family| Self::new(dir.as_ref(), *family))
            .find(|source| source.face_path(REGULAR).is_some())
    }

    /// First usable family across [`SEARCH_DIRS`].
    pub fn discover() -> Result<Self, DocError> {
        let source = SEARCH_DIRS
            .iter()
            .find_map(Self::find_in)
            .ok_or(DocError::NoSystemFont)?;
        debug!(dir = %source.dir.display(), family = %source.family, "Found font family");
        Ok(source)
    }

    /// Directory holding the font files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name stem of the family.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    fn face_path(&self, suffixes: &[&str]) -> Option<PathBuf> {
        suffixes
            .iter()
            .map(|suffix| self.dir.join(format!("{}{suffix}.ttf", self.family)))
            .find(|path| path.is_file())
    }

    fn face(&self, suffixes: &[&str], fallback: &[u8]) -> Result<FontData, DocError> {
        let data = match self.face_path(suffixes) {
            Some(path) => fs::read(path)?,
            None => fallback.to_vec(),
        };
        Ok(FontData::new(data, None)?)
    }

    /// Reads the four faces of the family.
    pub(crate) fn load(&self) -> Result<FontFamily<FontData>, DocError> {
        let path = self
            .face_path(REGULAR)
            .ok_or_else(|| DocError::FontNotFound {
                dir: self.dir.clone(),
                family: self.family.clone(),
            })?;
        let regular = fs::read(path)?;

        Ok(FontFamily {
            bold: self.face(BOLD, &regular)?,
            italic: self.face(ITALIC, &regular)?,
            bold_italic: self.face(BOLD_ITALIC, &regular)?,
            regular: FontData::new(regular, None)?,
        })
    }
}
