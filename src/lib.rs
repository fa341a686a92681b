//! # mp4tags
//!
//! Set or remove iTunes-style metadata tags (title, artist, album, track and
//! disk numbers, cover art, ...) on existing MP4 files, in place.
//!
//! The crate backs the `mp4tags` command-line tool but is usable as a
//! library: build a [`ModificationRequest`], then apply it to one open file
//! with [`dispatcher::apply`] or to many with [`tag_files`]. Container
//! parsing and rewriting is done by [`mp4ameta`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use mp4tags::{ModificationRequest, TagCode};
//!
//! let request = ModificationRequest::new()
//!     .with_value(TagCode::Song, "Intro")?
//!     .with_value(TagCode::Tracks, "12")?
//!     .with_removals("c");
//!
//! let files: Vec<PathBuf> = vec!["01.m4a".into(), "02.m4a".into()];
//! mp4tags::tag_files(&files, &request, |path, report| {
//!     if !report.is_clean() {
//!         eprintln!("{}: {report}", path.display());
//!     }
//! })?;
//! # Ok::<(), mp4tags::TagError>(())
//! ```
//!
//! ## Edit order
//!
//! For each file, removals run first, then the track/disk pairs are
//! reconciled with their current values, then every other field is set. So
//! `-T 12` keeps the existing track number, and `-r s -s Title` leaves the
//! title set.

pub mod batch;
pub mod collector;
pub mod cover_art;
pub mod dispatcher;
pub mod error;
pub mod media_type;
pub mod request;
pub mod store;
pub mod tag_code;
mod utilities;

pub use batch::{process_files, tag_files};
pub use collector::{Invocation, collect};
pub use cover_art::{ArtFormat, CoverArt};
pub use dispatcher::DispatchReport;
pub use error::TagError;
pub use media_type::MediaType;
pub use request::ModificationRequest;
pub use store::{MetadataStore, Mp4File};
pub use tag_code::{Field, NumberField, Pair, PairField, TagCode, TextField, ValueKind};
