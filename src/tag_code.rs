//! Tag codes and the metadata fields they address.
//!
//! Every command-line option is identified by a one-character [`TagCode`].
//! The same characters are used in removal lists (`-r cs` removes the comment
//! and song title), so the code table is the single source of truth for
//! option letters, long names, and which metadata [`Field`] a code touches.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// How the argument of an option is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Stored verbatim.
    Text,
    /// Must start with a decimal integer; stored both raw and parsed.
    Numeric,
    /// A filesystem path to read, not the tag content itself.
    Path,
    /// A list of other tag codes.
    CodeList,
}

/// One-character identifier for a metadata field or the removal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagCode {
    Album,
    Artist,
    Tempo,
    Comment,
    Copyright,
    Disk,
    Disks,
    EncodedBy,
    Tool,
    Genre,
    Grouping,
    HdVideo,
    MediaType,
    Cnid,
    Description,
    TvEpisode,
    Picture,
    Song,
    Track,
    Tracks,
    Composer,
    Year,
    AlbumArtist,
    Remove,
}

impl TagCode {
    /// Every code, in the order the set phase visits them.
    pub const ALL: [TagCode; 24] = [
        TagCode::Album,
        TagCode::Artist,
        TagCode::Tempo,
        TagCode::Comment,
        TagCode::Copyright,
        TagCode::Disk,
        TagCode::Disks,
        TagCode::EncodedBy,
        TagCode::Tool,
        TagCode::Genre,
        TagCode::Grouping,
        TagCode::HdVideo,
        TagCode::MediaType,
        TagCode::Cnid,
        TagCode::Description,
        TagCode::TvEpisode,
        TagCode::Picture,
        TagCode::Song,
        TagCode::Track,
        TagCode::Tracks,
        TagCode::Composer,
        TagCode::Year,
        TagCode::AlbumArtist,
        TagCode::Remove,
    ];

    /// The short option letter, also used in removal lists.
    pub fn as_char(self) -> char {
        match self {
            TagCode::Album => 'A',
            TagCode::Artist => 'a',
            TagCode::Tempo => 'b',
            TagCode::Comment => 'c',
            TagCode::Copyright => 'C',
            TagCode::Disk => 'd',
            TagCode::Disks => 'D',
            TagCode::EncodedBy => 'e',
            TagCode::Tool => 'E',
            TagCode::Genre => 'g',
            TagCode::Grouping => 'G',
            TagCode::HdVideo => 'H',
            TagCode::MediaType => 'i',
            TagCode::Cnid => 'I',
            TagCode::Description => 'm',
            TagCode::TvEpisode => 'M',
            TagCode::Picture => 'P',
            TagCode::Song => 's',
            TagCode::Track => 't',
            TagCode::Tracks => 'T',
            TagCode::Composer => 'w',
            TagCode::Year => 'y',
            TagCode::AlbumArtist => 'R',
            TagCode::Remove => 'r',
        }
    }

    /// Look up a code by its option letter.
    pub fn from_char(letter: char) -> Option<TagCode> {
        TagCode::ALL
            .into_iter()
            .find(|code| code.as_char() == letter)
    }

    /// The long option name, without dashes.
    pub fn long_name(self) -> &'static str {
        match self {
            TagCode::Album => "album",
            TagCode::Artist => "artist",
            TagCode::Tempo => "tempo",
            TagCode::Comment => "comment",
            TagCode::Copyright => "copyright",
            TagCode::Disk => "disk",
            TagCode::Disks => "disks",
            TagCode::EncodedBy => "encodedby",
            TagCode::Tool => "tool",
            TagCode::Genre => "genre",
            TagCode::Grouping => "grouping",
            TagCode::HdVideo => "hdvideo",
            TagCode::MediaType => "type",
            TagCode::Cnid => "cnid",
            TagCode::Description => "description",
            TagCode::TvEpisode => "episode",
            TagCode::Picture => "picture",
            TagCode::Song => "song",
            TagCode::Track => "track",
            TagCode::Tracks => "tracks",
            TagCode::Composer => "writer",
            TagCode::Year => "year",
            TagCode::AlbumArtist => "albumartist",
            TagCode::Remove => "remove",
        }
    }

    pub fn value_kind(self) -> ValueKind {
        match self {
            TagCode::Tempo
            | TagCode::Disk
            | TagCode::Disks
            | TagCode::HdVideo
            | TagCode::Cnid
            | TagCode::TvEpisode
            | TagCode::Track
            | TagCode::Tracks => ValueKind::Numeric,
            TagCode::Picture => ValueKind::Path,
            TagCode::Remove => ValueKind::CodeList,
            _ => ValueKind::Text,
        }
    }

    /// The metadata field this code sets or removes.
    ///
    /// `Track`/`Tracks` (and `Disk`/`Disks`) share one paired field, so
    /// removing either half removes the pair. `Remove` addresses no field.
    pub fn field(self) -> Option<Field> {
        let field = match self {
            TagCode::Album => Field::Text(TextField::Album),
            TagCode::Artist => Field::Text(TextField::Artist),
            TagCode::Comment => Field::Text(TextField::Comment),
            TagCode::Copyright => Field::Text(TextField::Copyright),
            TagCode::EncodedBy => Field::Text(TextField::EncodedBy),
            TagCode::Tool => Field::Text(TextField::Tool),
            TagCode::Genre => Field::Text(TextField::Genre),
            TagCode::Grouping => Field::Text(TextField::Grouping),
            TagCode::Description => Field::Text(TextField::Description),
            TagCode::Song => Field::Text(TextField::Name),
            TagCode::Composer => Field::Text(TextField::Composer),
            TagCode::Year => Field::Text(TextField::ReleaseDate),
            TagCode::AlbumArtist => Field::Text(TextField::AlbumArtist),
            TagCode::Tempo => Field::Number(NumberField::Tempo),
            TagCode::HdVideo => Field::Number(NumberField::HdVideo),
            TagCode::Cnid => Field::Number(NumberField::Cnid),
            TagCode::TvEpisode => Field::Number(NumberField::TvEpisode),
            TagCode::Track | TagCode::Tracks => Field::Pair(PairField::Track),
            TagCode::Disk | TagCode::Disks => Field::Pair(PairField::Disk),
            TagCode::MediaType => Field::MediaType,
            TagCode::Picture => Field::CoverArt,
            TagCode::Remove => return None,
        };
        Some(field)
    }
}

impl Display for TagCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "-{} (-{})", self.as_char(), self.long_name())
    }
}

/// Free-text metadata items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Album,
    Artist,
    Comment,
    Copyright,
    EncodedBy,
    Tool,
    Genre,
    Grouping,
    Description,
    Name,
    Composer,
    ReleaseDate,
    AlbumArtist,
}

impl TextField {
    /// The iTunes atom identifier holding this item.
    pub fn fourcc(self) -> [u8; 4] {
        match self {
            TextField::Album => *b"\xa9alb",
            TextField::Artist => *b"\xa9ART",
            TextField::Comment => *b"\xa9cmt",
            TextField::Copyright => *b"cprt",
            TextField::EncodedBy => *b"\xa9enc",
            TextField::Tool => *b"\xa9too",
            TextField::Genre => *b"\xa9gen",
            TextField::Grouping => *b"\xa9grp",
            TextField::Description => *b"desc",
            TextField::Name => *b"\xa9nam",
            TextField::Composer => *b"\xa9wrt",
            TextField::ReleaseDate => *b"\xa9day",
            TextField::AlbumArtist => *b"aART",
        }
    }
}

/// Single integer metadata items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberField {
    Tempo,
    HdVideo,
    Cnid,
    TvEpisode,
}

impl NumberField {
    pub fn fourcc(self) -> [u8; 4] {
        match self {
            NumberField::Tempo => *b"tmpo",
            NumberField::HdVideo => *b"hdvd",
            NumberField::Cnid => *b"cnID",
            NumberField::TvEpisode => *b"tves",
        }
    }

    /// Big-endian encoding at the width of the atom.
    ///
    /// Values wider than the atom are truncated in two's complement.
    pub fn encode(self, value: i32) -> Vec<u8> {
        match self {
            NumberField::Tempo => (value as u16).to_be_bytes().to_vec(),
            NumberField::HdVideo => vec![value as u8],
            NumberField::Cnid | NumberField::TvEpisode => (value as u32).to_be_bytes().to_vec(),
        }
    }
}

/// Metadata items stored as a (number, total) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairField {
    Track,
    Disk,
}

impl PairField {
    /// Codes for the (number, total) halves of this pair.
    pub fn codes(self) -> (TagCode, TagCode) {
        match self {
            PairField::Track => (TagCode::Track, TagCode::Tracks),
            PairField::Disk => (TagCode::Disk, TagCode::Disks),
        }
    }
}

/// A (number, total) pair; zero means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair {
    pub number: u16,
    pub total: u16,
}

impl Pair {
    pub fn new(number: u16, total: u16) -> Self {
        Self { number, total }
    }
}

/// Any metadata item a [`MetadataStore`](crate::MetadataStore) can remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Text(TextField),
    Number(NumberField),
    Pair(PairField),
    MediaType,
    CoverArt,
}
