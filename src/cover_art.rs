//! Cover-art loading.
//!
//! The `-picture` option names an image file rather than carrying the tag
//! content itself. [`CoverArt::load`] reads the whole file and sniffs its
//! format from the leading bytes, since the artwork atom records whether the
//! payload is PNG, JPEG or BMP. Any other payload is still embedded, with the
//! implicit data type.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    fs::File,
    io::Read,
    path::Path,
};

use image::ImageFormat;

use crate::error::TagError;

/// Image encodings the artwork atom can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtFormat {
    Png,
    Jpeg,
    Bmp,
    /// Not recognised (GIF, truncated headers, ...); stored untyped.
    Implicit,
}

impl ArtFormat {
    /// The typed image format, or `None` for [`ArtFormat::Implicit`].
    pub(crate) fn to_img_fmt(self) -> Option<mp4ameta::ImgFmt> {
        match self {
            ArtFormat::Png => Some(mp4ameta::ImgFmt::Png),
            ArtFormat::Jpeg => Some(mp4ameta::ImgFmt::Jpeg),
            ArtFormat::Bmp => Some(mp4ameta::ImgFmt::Bmp),
            ArtFormat::Implicit => None,
        }
    }
}

/// Image bytes ready to embed as artwork.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub format: ArtFormat,
    pub data: Vec<u8>,
}

impl Debug for CoverArt {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CoverArt")
            .field("format", &self.format)
            .field("len", &self.data.len())
            .finish()
    }
}

impl CoverArt {
    /// Read an image file in full and detect its format.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::CoverArt`] naming `path` when the file cannot be
    /// opened or is shorter than its reported size.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TagError> {
        let path = path.as_ref();
        let art_error = |reason: String| TagError::CoverArt {
            path: path.to_path_buf(),
            reason,
        };

        let mut file = File::open(path).map_err(|error| art_error(error.to_string()))?;
        let expected = file
            .metadata()
            .map_err(|error| art_error(error.to_string()))?
            .len();

        let mut data = Vec::with_capacity(expected as usize);
        let read = file
            .read_to_end(&mut data)
            .map_err(|error| art_error(error.to_string()))?;
        if read as u64 != expected {
            return Err(art_error(format!("read {read} of {expected} bytes")));
        }

        Ok(Self::from_bytes(data))
    }

    /// Wrap image bytes already in memory, detecting the format.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let format = match image::guess_format(&data) {
            Ok(ImageFormat::Png) => ArtFormat::Png,
            Ok(ImageFormat::Jpeg) => ArtFormat::Jpeg,
            Ok(ImageFormat::Bmp) => ArtFormat::Bmp,
            _ => ArtFormat::Implicit,
        };
        log::debug!("Loaded {} bytes of {format:?} cover art", data.len());
        Self { format, data }
    }
}
