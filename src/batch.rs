//! Running a request over every named file.
//!
//! Files are processed one at a time, in order. Each is opened, edited, and
//! committed before the next is opened. The first open or commit failure
//! aborts the batch; files committed before it stay modified.

use std::path::{Path, PathBuf};

use crate::{
    dispatcher::{self, DispatchReport},
    error::TagError,
    request::ModificationRequest,
    store::{MetadataStore, Mp4File},
};

/// Apply `request` to each MP4 file in `files`, editing them in place.
///
/// `on_file` is called after each file is committed with that file's report.
///
/// # Errors
///
/// Returns [`TagError::FileOpen`] or [`TagError::FileWrite`] for the first
/// file that could not be opened or written. Later files are not touched.
pub fn tag_files<F>(
    files: &[PathBuf],
    request: &ModificationRequest,
    on_file: F,
) -> Result<usize, TagError>
where
    F: FnMut(&Path, &DispatchReport),
{
    process_files(files, request, |path: &Path| Mp4File::open(path), on_file)
}

/// Apply `request` to each file using stores produced by `open`.
///
/// Returns the number of files committed.
///
/// # Errors
///
/// Propagates the first error from `open` or from committing a store.
pub fn process_files<S, O, F>(
    files: &[PathBuf],
    request: &ModificationRequest,
    mut open: O,
    mut on_file: F,
) -> Result<usize, TagError>
where
    S: MetadataStore,
    O: FnMut(&Path) -> Result<S, TagError>,
    F: FnMut(&Path, &DispatchReport),
{
    log::info!(
        "Applying {} modification(s) to {} file(s)",
        request.modification_count(),
        files.len()
    );

    let mut committed = 0;
    for path in files {
        let mut store = open(path)?;
        let report = dispatcher::apply(&mut store, request);
        store.commit()?;
        committed += 1;

        log::debug!(
            "Committed {} ({} warning(s))",
            path.display(),
            report.warnings.len()
        );
        on_file(path, &report);
    }

    Ok(committed)
}
