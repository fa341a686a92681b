//! Metadata storage backends.
//!
//! [`MetadataStore`] is the handle the dispatcher edits: per-field set and
//! remove operations plus a read of the paired track/disk values. Edits are
//! buffered until [`MetadataStore::commit`] persists them.
//!
//! [`Mp4File`] is the production backend. It reads the `ilst` item list of an
//! existing MP4 container with [`mp4ameta`] and rewrites it in place on commit.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    fs,
    path::{Path, PathBuf},
};

use mp4ameta::{Data, Fourcc, Img, Tag, ident};

use crate::{
    cover_art::CoverArt,
    error::TagError,
    media_type::MediaType,
    tag_code::{Field, NumberField, Pair, PairField, TextField},
};

/// An open container whose metadata can be edited.
///
/// Only [`commit`](MetadataStore::commit) reports failure; individual edits
/// are buffered and cannot fail.
pub trait MetadataStore {
    /// Current (number, total) of a paired field; unset halves read as zero.
    fn pair(&self, field: PairField) -> Pair;

    fn set_pair(&mut self, field: PairField, pair: Pair);

    fn set_text(&mut self, field: TextField, value: &str);

    /// Store an integer at the width of the field's atom.
    fn set_number(&mut self, field: NumberField, value: i32);

    fn set_media_type(&mut self, media_type: MediaType);

    /// Replace any existing artwork with `art`. Untyped payloads are stored
    /// as-is.
    fn set_cover_art(&mut self, art: CoverArt);

    fn remove(&mut self, field: Field);

    /// Persist every buffered edit and release the handle.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::FileWrite`] if the edits could not be written.
    fn commit(self) -> Result<(), TagError>
    where
        Self: Sized;
}

/// An MP4 container opened for in-place metadata edits.
///
/// # Example
///
/// ```no_run
/// use mp4tags::{MetadataStore, Mp4File, TextField};
///
/// let mut file = Mp4File::open("song.m4a")?;
/// file.set_text(TextField::Name, "Intro");
/// file.commit()?;
/// # Ok::<(), mp4tags::TagError>(())
/// ```
pub struct Mp4File {
    tag: Tag,
    path: PathBuf,
}

impl Debug for Mp4File {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Mp4File")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Mp4File {
    /// Open an existing container for modification.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::FileOpen`] if the file is missing, read-only, or
    /// not an MP4 container.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TagError> {
        let path = path.as_ref().to_path_buf();
        log::debug!("Opening container for modification: {}", path.display());

        let open_error = |reason: String| TagError::FileOpen {
            path: path.clone(),
            reason,
        };

        let file_metadata = fs::metadata(&path).map_err(|error| open_error(error.to_string()))?;
        if file_metadata.permissions().readonly() {
            return Err(open_error("file is read-only".to_string()));
        }

        let tag = Tag::read_from_path(&path).map_err(|error| open_error(error.to_string()))?;

        Ok(Self { tag, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataStore for Mp4File {
    fn pair(&self, field: PairField) -> Pair {
        let (number, total) = match field {
            PairField::Track => (self.tag.track_number(), self.tag.total_tracks()),
            PairField::Disk => (self.tag.disc_number(), self.tag.total_discs()),
        };
        Pair::new(number.unwrap_or(0), total.unwrap_or(0))
    }

    fn set_pair(&mut self, field: PairField, pair: Pair) {
        log::debug!("Setting {field:?} to {}/{}", pair.number, pair.total);
        match field {
            PairField::Track => {
                self.tag.set_track_number(pair.number);
                self.tag.set_total_tracks(pair.total);
            }
            PairField::Disk => {
                self.tag.set_disc_number(pair.number);
                self.tag.set_total_discs(pair.total);
            }
        }
    }

    fn set_text(&mut self, field: TextField, value: &str) {
        log::debug!("Setting {field:?} to {value:?}");
        if field == TextField::Genre {
            self.tag.remove_data_of(&ident::STANDARD_GENRE);
        }
        self.tag
            .set_data(Fourcc(field.fourcc()), Data::Utf8(value.to_string()));
    }

    fn set_number(&mut self, field: NumberField, value: i32) {
        log::debug!("Setting {field:?} to {value}");
        self.tag
            .set_data(Fourcc(field.fourcc()), Data::BeSigned(field.encode(value)));
    }

    fn set_media_type(&mut self, media_type: MediaType) {
        log::debug!("Setting media type to {media_type}");
        self.tag
            .set_data(ident::MEDIA_TYPE, Data::BeSigned(vec![media_type.code()]));
    }

    fn set_cover_art(&mut self, art: CoverArt) {
        log::debug!("Setting cover art ({} bytes, {:?})", art.data.len(), art.format);
        match art.format.to_img_fmt() {
            Some(format) => self.tag.set_artwork(Img::new(format, art.data)),
            None => self.tag.set_data(ident::ARTWORK, Data::Reserved(art.data)),
        }
    }

    fn remove(&mut self, field: Field) {
        log::debug!("Removing {field:?}");
        match field {
            Field::Text(text) => {
                if text == TextField::Genre {
                    self.tag.remove_data_of(&ident::STANDARD_GENRE);
                }
                self.tag.remove_data_of(&Fourcc(text.fourcc()));
            }
            Field::Number(number) => self.tag.remove_data_of(&Fourcc(number.fourcc())),
            Field::Pair(PairField::Track) => self.tag.remove_track(),
            Field::Pair(PairField::Disk) => self.tag.remove_disc(),
            Field::MediaType => self.tag.remove_data_of(&ident::MEDIA_TYPE),
            Field::CoverArt => self.tag.remove_artworks(),
        }
    }

    fn commit(self) -> Result<(), TagError> {
        log::debug!("Writing metadata to {}", self.path.display());
        self.tag
            .write_to_path(&self.path)
            .map_err(|error| TagError::FileWrite {
                path: self.path.clone(),
                reason: error.to_string(),
            })
    }
}
