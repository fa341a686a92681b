//! End-to-end tests against real MP4 containers.
//!
//! Each test writes a minimal `ftyp` + `moov/mvhd` container to a temporary
//! directory, optionally seeds it with metadata, runs a command line through
//! `collect` and `tag_files`, then reads the file back with `mp4ameta`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use mp4ameta::{Data, Fourcc, Img, ImgFmt, Tag, ident};
use mp4tags::{Invocation, TagError};
use tempfile::TempDir;

const HD_VIDEO: Fourcc = Fourcc(*b"hdvd");
const CATALOG_ID: Fourcc = Fourcc(*b"cnID");

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";

// ── Fixtures ─────────────────────────────────────────────────

fn atom(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut atom = ((body.len() + 8) as u32).to_be_bytes().to_vec();
    atom.extend_from_slice(kind);
    atom.extend_from_slice(body);
    atom
}

/// The smallest container `mp4ameta` will read and rewrite.
fn minimal_container() -> Vec<u8> {
    let mut movie_header = vec![0u8; 100];
    movie_header[12..16].copy_from_slice(&1000u32.to_be_bytes()); // timescale
    movie_header[20..24].copy_from_slice(&0x0001_0000u32.to_be_bytes()); // rate 1.0
    movie_header[24..26].copy_from_slice(&0x0100u16.to_be_bytes()); // volume 1.0
    movie_header[96..100].copy_from_slice(&1u32.to_be_bytes()); // next track id

    let mut container = atom(b"ftyp", b"M4A \x00\x00\x02\x00M4A isom");
    container.extend(atom(b"moov", &atom(b"mvhd", &movie_header)));
    container
}

/// Write a container seeded by `seed` and return its path.
fn container_with(directory: &TempDir, seed: impl FnOnce(&mut Tag)) -> PathBuf {
    let path = directory.path().join("song.m4a");
    fs::write(&path, minimal_container()).expect("Failed to write container");

    let mut tag = Tag::read_from_path(&path).expect("Failed to read fresh container");
    seed(&mut tag);
    tag.write_to_path(&path).expect("Failed to seed container");
    path
}

fn png_bytes() -> Vec<u8> {
    let mut data = PNG_MAGIC.to_vec();
    data.extend_from_slice(&[0; 24]);
    data
}

/// Run `mp4tags <arguments> <path>` in-process and read the result back.
fn tag_with(arguments: &[&str], path: &Path) -> Tag {
    let file = path.to_str().expect("utf-8 path");
    let command_line = std::iter::once("mp4tags")
        .chain(arguments.iter().copied())
        .chain(std::iter::once(file));

    let Invocation::Tag { request, files, .. } =
        mp4tags::collect(command_line).expect("arguments should parse")
    else {
        panic!("expected a tag invocation");
    };
    let mut warnings = Vec::new();
    mp4tags::tag_files(&files, &request, |_, report| {
        warnings.extend(report.warnings.iter().map(TagError::to_string));
    })
    .expect("tagging should succeed");
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    Tag::read_from_path(path).expect("Failed to read tagged container")
}

// ── Paired fields ────────────────────────────────────────────

#[test]
fn total_alone_keeps_existing_track_number() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |tag| tag.set_track_number(5));

    let tag = tag_with(&["-T", "12"], &path);

    assert_eq!(tag.track(), (Some(5), Some(12)));
}

#[test]
fn both_halves_written_from_scratch() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |_| {});

    let tag = tag_with(&["-t", "3", "-T", "12", "-d", "1", "-D", "2"], &path);

    assert_eq!(tag.track(), (Some(3), Some(12)));
    assert_eq!(tag.disc(), (Some(1), Some(2)));
}

#[test]
fn removing_track_number_removes_the_pair() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |tag| {
        tag.set_track(4, 10);
        tag.set_title("Kept");
    });

    let tag = tag_with(&["-r", "t"], &path);

    assert_eq!(tag.track(), (None, None));
    assert_eq!(tag.title(), Some("Kept"));
}

// ── Text and numbers ─────────────────────────────────────────

#[test]
fn removal_then_set_leaves_new_title() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |tag| tag.set_title("Old Title"));

    let tag = tag_with(&["-r", "s", "-s", "New Title"], &path);

    assert_eq!(tag.title(), Some("New Title"));
}

#[test]
fn numbers_are_written_at_atom_width() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |_| {});

    let tag = tag_with(
        &["-tempo", "120", "-H", "1", "-I", "123456", "-M", "4"],
        &path,
    );

    assert_eq!(tag.bpm(), Some(120));
    assert_eq!(tag.tv_episode(), Some(4));
    assert_eq!(tag.bytes_of(&HD_VIDEO).next(), Some(&[1u8][..]));
    assert_eq!(
        tag.bytes_of(&CATALOG_ID).next(),
        Some(&123456u32.to_be_bytes()[..])
    );
}

#[test]
fn media_type_is_stored_as_its_code() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |_| {});

    let tag = tag_with(&["-type", "tvshow"], &path);

    assert_eq!(tag.bytes_of(&ident::MEDIA_TYPE).next(), Some(&[10u8][..]));
}

#[test]
fn genre_text_replaces_standard_genre() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |tag| tag.set_standard_genre(8));

    let tag = tag_with(&["-g", "Jazz Fusion"], &path);

    assert_eq!(tag.standard_genre(), None);
    assert_eq!(tag.genre(), Some("Jazz Fusion"));
}

// ── Cover art ────────────────────────────────────────────────

#[test]
fn png_cover_art_is_typed() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |_| {});
    let image = directory.path().join("cover.png");
    fs::write(&image, png_bytes()).expect("Failed to write image");

    let tag = tag_with(&["-P", image.to_str().expect("utf-8 path")], &path);

    let artwork = tag.artwork().expect("artwork should be set");
    assert_eq!(artwork.fmt, ImgFmt::Png);
    assert_eq!(artwork.data, png_bytes().as_slice());
}

#[test]
fn unrecognised_cover_art_is_stored_untyped() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |_| {});
    let image = directory.path().join("cover.gif");
    fs::write(&image, GIF).expect("Failed to write image");

    let tag = tag_with(&["-picture", image.to_str().expect("utf-8 path")], &path);

    let stored: Vec<&Data> = tag.data_of(&ident::ARTWORK).collect();
    assert_eq!(stored, vec![&Data::Reserved(GIF.to_vec())]);
}

#[test]
fn removing_cover_art_deletes_every_artwork() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = container_with(&directory, |tag| {
        tag.add_artwork(Img::new(ImgFmt::Png, png_bytes()));
        tag.add_artwork(Img::new(ImgFmt::Jpeg, vec![0xFF, 0xD8, 0xFF]));
    });

    let tag = tag_with(&["-r", "P"], &path);

    assert_eq!(tag.data_of(&ident::ARTWORK).count(), 0);
}
