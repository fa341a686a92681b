//! Applying a [`ModificationRequest`] to one open file.
//!
//! Edits run in three phases, always in this order:
//!
//! 1. **Remove** every field named in the removal list.
//! 2. **Reconcile** the track and disk pairs: read the current pair, override
//!    whichever halves were requested, write the pair back.
//! 3. **Set** every other requested field.
//!
//! Because removals run first, a field that is both removed and set in one
//! invocation ends up set.
//!
//! Cover-art and media-type problems do not abort the file: they are
//! collected in the returned [`DispatchReport`] and the remaining fields are
//! still applied.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use crate::{
    cover_art::CoverArt,
    error::TagError,
    media_type::MediaType,
    request::ModificationRequest,
    store::MetadataStore,
    tag_code::{Field, PairField},
};

/// Non-fatal problems met while editing one file.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Edits that were skipped, each naming the offending value or file.
    pub warnings: Vec<TagError>,
}

impl DispatchReport {
    /// Returns `true` if every requested edit was applied.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl Display for DispatchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for warning in &self.warnings {
            writeln!(f, "[WARN] {warning}")?;
        }
        Ok(())
    }
}

/// Apply every requested removal and edit to `store`.
pub fn apply<S: MetadataStore>(store: &mut S, request: &ModificationRequest) -> DispatchReport {
    let mut report = DispatchReport::default();

    remove_fields(store, request);
    reconcile_pair(store, request, PairField::Track);
    reconcile_pair(store, request, PairField::Disk);
    set_fields(store, request, &mut report);

    report
}

fn remove_fields<S: MetadataStore>(store: &mut S, request: &ModificationRequest) {
    for code in request.removals() {
        if let Some(field) = code.field() {
            log::debug!("Removing {code}");
            store.remove(field);
        }
    }
}

fn reconcile_pair<S: MetadataStore>(
    store: &mut S,
    request: &ModificationRequest,
    field: PairField,
) {
    if !request.touches_pair(field) {
        return;
    }

    let (number_code, total_code) = field.codes();
    let mut pair = store.pair(field);
    // Both halves are 16-bit in the atom.
    if let Some(number) = request.number(number_code) {
        pair.number = number as u16;
    }
    if let Some(total) = request.number(total_code) {
        pair.total = total as u16;
    }
    store.set_pair(field, pair);
}

fn set_fields<S: MetadataStore>(
    store: &mut S,
    request: &ModificationRequest,
    report: &mut DispatchReport,
) {
    for code in request.requested_codes() {
        let Some(value) = request.string(code) else {
            continue;
        };

        match code.field() {
            Some(Field::Text(field)) => store.set_text(field, value),
            Some(Field::Number(field)) => {
                if let Some(number) = request.number(code) {
                    store.set_number(field, number);
                }
            }
            Some(Field::MediaType) => match MediaType::lookup(value) {
                Ok(media_type) => store.set_media_type(media_type),
                Err(error) => {
                    log::warn!("Skipping media type: {error}");
                    report.warnings.push(error);
                }
            },
            Some(Field::CoverArt) => match CoverArt::load(Path::new(value)) {
                Ok(art) => store.set_cover_art(art),
                Err(error) => {
                    log::warn!("Skipping cover art: {error}");
                    report.warnings.push(error);
                }
            },
            // Pairs were written during reconciliation.
            Some(Field::Pair(_)) | None => {}
        }
    }
}
