//! In-memory metadata store shared by the integration tests.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
};

use mp4tags::{
    CoverArt, Field, MediaType, MetadataStore, ModificationRequest, NumberField, Pair, PairField,
    TagCode, TagError, TextField,
};

/// Metadata of one fake container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub text: HashMap<TextField, String>,
    pub numbers: HashMap<NumberField, i32>,
    pub track: Option<Pair>,
    pub disk: Option<Pair>,
    pub media_type: Option<MediaType>,
    pub cover_art: Option<CoverArt>,
    /// Every operation applied, in order.
    pub log: Vec<String>,
}

/// A store over [`Metadata`] that writes back into a shared library on commit.
pub struct MemoryStore {
    pub path: PathBuf,
    pub metadata: Metadata,
    library: Rc<RefCell<Library>>,
}

impl MetadataStore for MemoryStore {
    fn pair(&self, field: PairField) -> Pair {
        let pair = match field {
            PairField::Track => self.metadata.track,
            PairField::Disk => self.metadata.disk,
        };
        pair.unwrap_or_default()
    }

    fn set_pair(&mut self, field: PairField, pair: Pair) {
        self.metadata.log.push(format!("set {field:?}"));
        match field {
            PairField::Track => self.metadata.track = Some(pair),
            PairField::Disk => self.metadata.disk = Some(pair),
        }
    }

    fn set_text(&mut self, field: TextField, value: &str) {
        self.metadata.log.push(format!("set {field:?}"));
        self.metadata.text.insert(field, value.to_string());
    }

    fn set_number(&mut self, field: NumberField, value: i32) {
        self.metadata.log.push(format!("set {field:?}"));
        self.metadata.numbers.insert(field, value);
    }

    fn set_media_type(&mut self, media_type: MediaType) {
        self.metadata.log.push("set MediaType".to_string());
        self.metadata.media_type = Some(media_type);
    }

    fn set_cover_art(&mut self, art: CoverArt) {
        self.metadata.log.push("set CoverArt".to_string());
        self.metadata.cover_art = Some(art);
    }

    fn remove(&mut self, field: Field) {
        self.metadata.log.push(format!("remove {field:?}"));
        match field {
            Field::Text(text) => {
                self.metadata.text.remove(&text);
            }
            Field::Number(number) => {
                self.metadata.numbers.remove(&number);
            }
            Field::Pair(PairField::Track) => self.metadata.track = None,
            Field::Pair(PairField::Disk) => self.metadata.disk = None,
            Field::MediaType => self.metadata.media_type = None,
            Field::CoverArt => self.metadata.cover_art = None,
        }
    }

    fn commit(self) -> Result<(), TagError> {
        let mut library = self.library.borrow_mut();
        if library.unwritable.contains(&self.path) {
            return Err(TagError::FileWrite {
                path: self.path,
                reason: "disk full".to_string(),
            });
        }
        library.files.insert(self.path, self.metadata);
        Ok(())
    }
}

/// A set of fake containers keyed by path.
#[derive(Debug, Default)]
pub struct Library {
    pub files: HashMap<PathBuf, Metadata>,
    pub unwritable: Vec<PathBuf>,
    pub opened: Vec<PathBuf>,
}

impl Library {
    pub fn with_files(paths: &[&str]) -> Rc<RefCell<Library>> {
        let library = Library {
            files: paths
                .iter()
                .map(|path| (PathBuf::from(path), Metadata::default()))
                .collect(),
            ..Library::default()
        };
        Rc::new(RefCell::new(library))
    }
}

/// Open a store for `path`, failing like a missing container if it is unknown.
pub fn open(library: &Rc<RefCell<Library>>, path: &Path) -> Result<MemoryStore, TagError> {
    let mut shared = library.borrow_mut();
    shared.opened.push(path.to_path_buf());
    let metadata = shared
        .files
        .get(path)
        .cloned()
        .ok_or_else(|| TagError::FileOpen {
            path: path.to_path_buf(),
            reason: "No such file or directory".to_string(),
        })?;
    Ok(MemoryStore {
        path: path.to_path_buf(),
        metadata,
        library: Rc::clone(library),
    })
}

/// A fresh store not backed by any library entry.
pub fn store_with(metadata: Metadata) -> MemoryStore {
    MemoryStore {
        path: PathBuf::from("memory.m4a"),
        metadata,
        library: Rc::new(RefCell::new(Library::default())),
    }
}

/// A request built from `(code, argument)` pairs, as the command line would.
pub fn request(entries: &[(TagCode, &str)]) -> ModificationRequest {
    let mut request = ModificationRequest::new();
    for (code, raw) in entries {
        request
            .insert(*code, raw)
            .unwrap_or_else(|error| panic!("{code}: {error}"));
    }
    request
}

/// Bytes that sniff as a PNG image.
pub fn png_bytes() -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend_from_slice(&[0; 32]);
    data
}
