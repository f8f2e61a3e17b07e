//! core/tags/util.rs
//! Small parsing helpers for tag reading.

use id3::Version;

/// Parse TRCK/TPOS style values:
/// - "3" -> (Some(3), None)
/// - "3/12" -> (Some(3), Some(12))
/// - "/12" -> (None, Some(12))
pub(crate) fn parse_slash_pair_u32(s: Option<&str>) -> (Option<u32>, Option<u32>) {
    let Some(s) = s else { return (None, None) };
    let s = s.trim();
    if s.is_empty() {
        return (None, None);
    }

    let mut parts = s.split('/');
    let a = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let b = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    (a, b)
}

/// Human label for the tag container, as printed in the report.
pub(crate) fn version_label(version: Version) -> &'static str {
    match version {
        Version::Id3v22 => "ID3v2.2",
        Version::Id3v23 => "ID3v2.3",
        Version::Id3v24 => "ID3v2.4",
    }
}

/// ID3v1 pads fixed-width fields with NULs or spaces.
pub(crate) fn clean_v1_field(s: &str) -> String {
    s.trim_end_matches(['\0', ' ']).to_string()
}
