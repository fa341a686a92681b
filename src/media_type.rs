//! iTunes media kinds (the `stik` atom).
//!
//! [`MediaType::lookup`] turns the `-type` argument into a kind. It accepts
//! the decimal atom value, a case-insensitive name, or a name prefix that
//! matches exactly one kind, so `tv` and `music` both resolve.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::TagError;

/// Media kind stored in the `stik` atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    OldMovie,
    Normal,
    AudioBook,
    MusicVideo,
    Movie,
    TvShow,
    Booklet,
    Ringtone,
}

impl MediaType {
    pub const ALL: [MediaType; 8] = [
        MediaType::OldMovie,
        MediaType::Normal,
        MediaType::AudioBook,
        MediaType::MusicVideo,
        MediaType::Movie,
        MediaType::TvShow,
        MediaType::Booklet,
        MediaType::Ringtone,
    ];

    /// Value written to the `stik` atom.
    pub fn code(self) -> u8 {
        match self {
            MediaType::OldMovie => 0,
            MediaType::Normal => 1,
            MediaType::AudioBook => 2,
            MediaType::MusicVideo => 6,
            MediaType::Movie => 9,
            MediaType::TvShow => 10,
            MediaType::Booklet => 11,
            MediaType::Ringtone => 14,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MediaType::OldMovie => "oldmovie",
            MediaType::Normal => "normal",
            MediaType::AudioBook => "audiobook",
            MediaType::MusicVideo => "musicvideo",
            MediaType::Movie => "movie",
            MediaType::TvShow => "tvshow",
            MediaType::Booklet => "booklet",
            MediaType::Ringtone => "ringtone",
        }
    }

    /// Resolve a command-line value to a media kind.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::UnknownMediaType`] when the value is empty, names
    /// no kind, or is a prefix of more than one kind.
    pub fn lookup(value: &str) -> Result<MediaType, TagError> {
        let wanted = value.trim().to_ascii_lowercase();
        let unknown = || TagError::UnknownMediaType(value.to_string());

        if wanted.is_empty() {
            return Err(unknown());
        }

        if let Ok(code) = wanted.parse::<u8>() {
            return MediaType::ALL
                .into_iter()
                .find(|kind| kind.code() == code)
                .ok_or_else(unknown);
        }

        if let Some(kind) = MediaType::ALL.into_iter().find(|kind| kind.name() == wanted) {
            return Ok(kind);
        }

        let mut candidates = MediaType::ALL
            .into_iter()
            .filter(|kind| kind.name().starts_with(&wanted));
        match (candidates.next(), candidates.next()) {
            (Some(kind), None) => Ok(kind),
            _ => Err(unknown()),
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names() {
        assert_eq!(MediaType::lookup("tvshow").unwrap(), MediaType::TvShow);
        assert_eq!(MediaType::lookup("Movie").unwrap(), MediaType::Movie);
        assert_eq!(MediaType::lookup("normal").unwrap(), MediaType::Normal);
    }

    #[test]
    fn unique_prefixes() {
        assert_eq!(MediaType::lookup("music").unwrap(), MediaType::MusicVideo);
        assert_eq!(MediaType::lookup("tv").unwrap(), MediaType::TvShow);
        assert_eq!(MediaType::lookup("audio").unwrap(), MediaType::AudioBook);
    }

    #[test]
    fn numeric_codes() {
        assert_eq!(MediaType::lookup("10").unwrap(), MediaType::TvShow);
        assert_eq!(MediaType::lookup("0").unwrap(), MediaType::OldMovie);
        assert!(MediaType::lookup("3").is_err());
    }

    #[test]
    fn rejects_unknown_and_ambiguous() {
        assert!(MediaType::lookup("podcast").is_err());
        assert!(MediaType::lookup("").is_err());
        // "mo" is not a prefix of "oldmovie"; "m" matches musicvideo and movie.
        assert!(MediaType::lookup("m").is_err());
        assert_eq!(MediaType::lookup("mo").unwrap(), MediaType::Movie);
    }
}
