//! core/tags/read.rs
//! Read ID3 tags from an extracted MP3 and convert them into `TrackMetadata`.
//!
//! - ID3v2 is tried first.
//! - If the file has no ID3v2 header at all, an ID3v1 trailer is accepted.
//! - Anything else (no tag, malformed tag) is a `MetadataError::TagParse`.

use std::fs::File;
use std::path::Path;

use id3::frame::Content;
use id3::{ErrorKind, Tag, TagLike};
use tracing::debug;

use super::super::error::MetadataError;
use super::super::types::TrackMetadata;
use super::util::{clean_v1_field, parse_slash_pair_u32, version_label};

pub fn read_metadata(path: &Path) -> Result<TrackMetadata, MetadataError> {
    let mut file = File::open(path).map_err(|source| MetadataError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    match Tag::read_from2(&mut file) {
        Ok(tag) => Ok(metadata_from_v2(&tag)),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => {
            debug!(path = %path.display(), "no ID3v2 tag, trying ID3v1");
            id3::v1::Tag::read_from(&mut file)
                .map(|v1| metadata_from_v1(&v1))
                .map_err(|source| MetadataError::TagParse {
                    path: path.to_path_buf(),
                    source,
                })
        }
        Err(source) => Err(MetadataError::TagParse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn metadata_from_v2(tag: &Tag) -> TrackMetadata {
    // TRCK / TPOS carry the totals as "n/total".
    let (track_from_text, track_total) = parse_slash_pair_u32(text_frame(tag, "TRCK").as_deref());
    let (disc_from_text, disc_total) = parse_slash_pair_u32(text_frame(tag, "TPOS").as_deref());

    TrackMetadata {
        format: version_label(tag.version()).to_string(),

        title: tag
            .title()
            .map(str::to_owned)
            .or_else(|| text_frame(tag, "TIT2"))
            .unwrap_or_default(),
        album: tag
            .album()
            .map(str::to_owned)
            .or_else(|| text_frame(tag, "TALB"))
            .unwrap_or_default(),
        artist: tag
            .artist()
            .map(str::to_owned)
            .or_else(|| text_frame(tag, "TPE1"))
            .unwrap_or_default(),
        album_artist: text_frame(tag, "TPE2").unwrap_or_default(),

        disc: tag.disc().or(disc_from_text).unwrap_or(0),
        disc_total: tag.total_discs().or(disc_total).unwrap_or(0),
        track: tag.track().or(track_from_text).unwrap_or(0),
        track_total: tag.total_tracks().or(track_total).unwrap_or(0),
    }
}

fn metadata_from_v1(tag: &id3::v1::Tag) -> TrackMetadata {
    TrackMetadata {
        format: "ID3v1".to_string(),
        title: clean_v1_field(&tag.title),
        album: clean_v1_field(&tag.album),
        artist: clean_v1_field(&tag.artist),
        // ID3v1 has no album artist, disc, or totals.
        album_artist: String::new(),
        disc: 0,
        disc_total: 0,
        track: tag.track.map(u32::from).unwrap_or(0),
        track_total: 0,
    }
}

/// First plain text value of a frame id like "TPE2".
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        _ => None,
    }
}
