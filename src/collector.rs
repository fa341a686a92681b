//! Command-line collection.
//!
//! [`collect`] turns the process arguments into an [`Invocation`]: the
//! [`ModificationRequest`] shared by every file plus the list of files. All
//! argument and precondition checks happen here, before any file is opened.
//!
//! Long options are accepted with one dash as well as two (`-album` and
//! `--album`), and as unambiguous prefixes (`-desc`). An ambiguous prefix such
//! as `-tr` (track or tracks) is rejected.
//!
//! Numeric values are checked in command-line order, so a bad value is
//! reported even when a later token is a help flag or an unknown option.

use std::{ffi::OsString, path::PathBuf};

use clap::{ArgAction, CommandFactory, Parser, error::ErrorKind};
use clap_complete::Shell;

use crate::{
    error::TagError,
    request::ModificationRequest,
    tag_code::{TagCode, ValueKind},
    utilities::{AmbiguousOption, LongOption, normalize_long_options, parse_leading_integer},
};

const AFTER_HELP: &str = "\
Removal codes are the option letters above, e.g. \"-r cs\" removes the comment
and song tags. Removing -t or -T (-d or -D) removes the whole track (disk) pair.

Long options may be written with one dash and shortened to any unambiguous
prefix (-desc for -description). An ambiguous prefix such as -tr is an error;
spell it out (-track, -tracks) or use the short letter.

Examples:
  mp4tags -song \"Intro\" -track 1 -tracks 12 song.m4a
  mp4tags -T 12 *.m4a
  mp4tags -picture cover.png -r c album/*.m4a";

/// Options accepted by `mp4tags`.
#[derive(Debug, Parser)]
#[command(
    name = "mp4tags",
    version,
    about = "Adds or modifies iTunes-compatible tags on MP4 files",
    override_usage = "mp4tags OPTION... FILE...",
    after_help = AFTER_HELP,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Arguments {
    /// Display this help text and exit
    #[arg(
        short = 'h',
        long = "help",
        action = ArgAction::Help,
        value_parser = clap::value_parser!(bool)
    )]
    help: (),

    /// Display version information and exit
    #[arg(
        short = 'v',
        long = "version",
        action = ArgAction::Version,
        value_parser = clap::value_parser!(bool)
    )]
    version: (),

    /// Set the album title
    #[arg(short = 'A', long = "album", value_name = "STR", allow_hyphen_values = true)]
    album: Option<String>,

    /// Set the artist information
    #[arg(short = 'a', long = "artist", value_name = "STR", allow_hyphen_values = true)]
    artist: Option<String>,

    /// Set the tempo (beats per minute)
    #[arg(short = 'b', long = "tempo", value_name = "NUM", allow_hyphen_values = true)]
    tempo: Option<String>,

    /// Set a general comment
    #[arg(short = 'c', long = "comment", value_name = "STR", allow_hyphen_values = true)]
    comment: Option<String>,

    /// Set the copyright information
    #[arg(short = 'C', long = "copyright", value_name = "STR", allow_hyphen_values = true)]
    copyright: Option<String>,

    /// Set the disk number
    #[arg(short = 'd', long = "disk", value_name = "NUM", allow_hyphen_values = true)]
    disk: Option<String>,

    /// Set the number of disks
    #[arg(short = 'D', long = "disks", value_name = "NUM", allow_hyphen_values = true)]
    disks: Option<String>,

    /// Set the name of the person or company who encoded the file
    #[arg(short = 'e', long = "encodedby", value_name = "STR", allow_hyphen_values = true)]
    encoded_by: Option<String>,

    /// Set the software used for encoding
    #[arg(short = 'E', long = "tool", value_name = "STR", allow_hyphen_values = true)]
    tool: Option<String>,

    /// Set the genre name
    #[arg(short = 'g', long = "genre", value_name = "STR", allow_hyphen_values = true)]
    genre: Option<String>,

    /// Set the grouping name
    #[arg(short = 'G', long = "grouping", value_name = "STR", allow_hyphen_values = true)]
    grouping: Option<String>,

    /// Set the HD flag (1/0)
    #[arg(short = 'H', long = "hdvideo", value_name = "NUM", allow_hyphen_values = true)]
    hd_video: Option<String>,

    /// Set the media type (tvshow, movie, music, ...)
    #[arg(short = 'i', long = "type", value_name = "STR", allow_hyphen_values = true)]
    media_type: Option<String>,

    /// Set the catalog ID (cnID)
    #[arg(short = 'I', long = "cnid", value_name = "NUM", allow_hyphen_values = true)]
    cnid: Option<String>,

    /// Set the short description
    #[arg(short = 'm', long = "description", value_name = "STR", allow_hyphen_values = true)]
    description: Option<String>,

    /// Set the episode number
    #[arg(short = 'M', long = "episode", value_name = "NUM", allow_hyphen_values = true)]
    episode: Option<String>,

    /// Set the picture from an image file
    #[arg(short = 'P', long = "picture", value_name = "PTH", allow_hyphen_values = true)]
    picture: Option<String>,

    /// Set the song title
    #[arg(short = 's', long = "song", value_name = "STR", allow_hyphen_values = true)]
    song: Option<String>,

    /// Set the track number
    #[arg(short = 't', long = "track", value_name = "NUM", allow_hyphen_values = true)]
    track: Option<String>,

    /// Set the number of tracks
    #[arg(short = 'T', long = "tracks", value_name = "NUM", allow_hyphen_values = true)]
    tracks: Option<String>,

    /// Set the composer information
    #[arg(short = 'w', long = "writer", value_name = "STR", allow_hyphen_values = true)]
    writer: Option<String>,

    /// Set the release date
    #[arg(short = 'y', long = "year", value_name = "STR", allow_hyphen_values = true)]
    year: Option<String>,

    /// Set the album artist
    #[arg(short = 'R', long = "albumartist", value_name = "STR", allow_hyphen_values = true)]
    album_artist: Option<String>,

    /// Remove tags by code (e.g. "-r cs" removes the comment and song tags)
    #[arg(short = 'r', long = "remove", value_name = "STR", allow_hyphen_values = true)]
    remove: Option<String>,

    /// Show additional logging output
    #[arg(long)]
    verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,

    /// MP4 files to modify in place
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

impl Arguments {
    /// Tag options that were given, paired with their raw argument.
    fn entries(&self) -> Vec<(TagCode, &str)> {
        [
            (TagCode::Album, &self.album),
            (TagCode::Artist, &self.artist),
            (TagCode::Tempo, &self.tempo),
            (TagCode::Comment, &self.comment),
            (TagCode::Copyright, &self.copyright),
            (TagCode::Disk, &self.disk),
            (TagCode::Disks, &self.disks),
            (TagCode::EncodedBy, &self.encoded_by),
            (TagCode::Tool, &self.tool),
            (TagCode::Genre, &self.genre),
            (TagCode::Grouping, &self.grouping),
            (TagCode::HdVideo, &self.hd_video),
            (TagCode::MediaType, &self.media_type),
            (TagCode::Cnid, &self.cnid),
            (TagCode::Description, &self.description),
            (TagCode::TvEpisode, &self.episode),
            (TagCode::Picture, &self.picture),
            (TagCode::Song, &self.song),
            (TagCode::Track, &self.track),
            (TagCode::Tracks, &self.tracks),
            (TagCode::Composer, &self.writer),
            (TagCode::Year, &self.year),
            (TagCode::AlbumArtist, &self.album_artist),
            (TagCode::Remove, &self.remove),
        ]
        .into_iter()
        .filter_map(|(code, value)| value.as_deref().map(|value| (code, value)))
        .collect()
    }
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Invocation {
    /// Edit the listed files.
    Tag {
        request: ModificationRequest,
        files: Vec<PathBuf>,
        verbose: bool,
    },
    /// Print a completion script for `shell`.
    Completions(Shell),
}

/// The `clap` command definition, for help text and completions.
pub fn command() -> clap::Command {
    Arguments::command()
}

/// Parse process arguments (including the program name) into an [`Invocation`].
///
/// # Errors
///
/// - [`TagError::NumericArgument`] when a numeric option has no leading
///   integer and no earlier token already ended parsing.
/// - [`TagError::Usage`] for unknown flags, ambiguous prefixes, missing
///   values, or a help/version request (see [`TagError::is_informational`]).
/// - [`TagError::MissingFile`] when no file is named.
/// - [`TagError::NoModification`] when no tag is set or removed.
pub fn collect<I, T>(arguments: I) -> Result<Invocation, TagError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let normalized = normalize_long_options(
        arguments.into_iter().map(Into::into),
        &long_options(),
        &short_options_with_value(),
    );

    if let Some(ambiguous) = normalized.ambiguous {
        // Whatever precedes the ambiguous token decides first.
        let preceding = &normalized.arguments[..ambiguous.index];
        check_numeric_arguments(preceding)?;
        Arguments::try_parse_from(preceding)?;
        return Err(ambiguous_error(&ambiguous));
    }

    check_numeric_arguments(&normalized.arguments)?;
    let arguments = Arguments::try_parse_from(normalized.arguments)?;

    if let Some(shell) = arguments.completions {
        return Ok(Invocation::Completions(shell));
    }

    let mut request = ModificationRequest::new();
    for (code, raw) in arguments.entries() {
        request.insert(code, raw)?;
    }

    if arguments.files.is_empty() {
        return Err(TagError::MissingFile);
    }
    if request.is_empty() {
        return Err(TagError::NoModification);
    }

    Ok(Invocation::Tag {
        request,
        files: arguments.files,
        verbose: arguments.verbose,
    })
}

/// Check numeric option values in the order they appear.
///
/// Stops without error at the first token that ends option parsing on its
/// own: a help or version flag, an unknown option, `--`, or a missing value.
fn check_numeric_arguments(arguments: &[OsString]) -> Result<(), TagError> {
    let mut tokens = arguments.iter().skip(1).map(|argument| argument.to_str());

    while let Some(token) = tokens.next() {
        let Some(token) = token else {
            continue;
        };
        if token == "--" {
            break;
        }

        let (code, attached) = if let Some(body) = token.strip_prefix("--") {
            let (name, inline_value) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            match TagCode::ALL.into_iter().find(|code| code.long_name() == name) {
                Some(code) => (code, inline_value),
                None if name == "verbose" => continue,
                None if name == "completions" => {
                    if inline_value.is_none() {
                        tokens.next();
                    }
                    continue;
                }
                None => break,
            }
        } else if let Some(body) = token.strip_prefix('-') {
            let mut letters = body.chars();
            let Some(letter) = letters.next() else {
                continue;
            };
            let Some(code) = TagCode::from_char(letter) else {
                break;
            };
            let rest = letters.as_str();
            let rest = rest.strip_prefix('=').unwrap_or(rest);
            (code, (!rest.is_empty()).then_some(rest))
        } else {
            continue;
        };

        let value = match attached {
            Some(value) => value,
            None => match tokens.next() {
                Some(Some(value)) => value,
                _ => break,
            },
        };
        if code.value_kind() == ValueKind::Numeric && parse_leading_integer(value).is_none() {
            return Err(TagError::NumericArgument {
                flag: code.as_char(),
                value: value.to_string(),
            });
        }
    }

    Ok(())
}

fn ambiguous_error(ambiguous: &AmbiguousOption) -> TagError {
    let candidates: Vec<String> = ambiguous
        .candidates
        .iter()
        .map(|name| format!("-{name}"))
        .collect();
    TagError::Usage(command().error(
        ErrorKind::UnknownArgument,
        format!(
            "option '{}' is ambiguous; possibilities: {}",
            ambiguous.token,
            candidates.join(" ")
        ),
    ))
}

fn long_options() -> Vec<LongOption> {
    let mut options: Vec<LongOption> = TagCode::ALL
        .into_iter()
        .map(|code| LongOption {
            name: code.long_name(),
            takes_value: true,
        })
        .collect();
    options.extend([
        LongOption { name: "help", takes_value: false },
        LongOption { name: "version", takes_value: false },
        LongOption { name: "verbose", takes_value: false },
        LongOption { name: "completions", takes_value: true },
    ]);
    options
}

fn short_options_with_value() -> Vec<char> {
    TagCode::ALL.into_iter().map(TagCode::as_char).collect()
}
