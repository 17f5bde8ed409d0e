use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "xmpDM:duration",
    "channels",
    "samplerate",
    "bitrate",
    "xmpDM:audioCompressor",
    "xmpDM:artist",
    "xmpDM:album",
    "xmpDM:genre",
    "xmpDM:trackNumber",
    "xmpDM:releaseDate",
    "xmpDM:videoFrameRate",
    "tiff:ImageWidth",
    "tiff:ImageLength",
];

/// Audio and video streams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    /// As reported by the parser; seconds for most containers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_compressor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_frame_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Media(MediaMetadata {
        base: r.base(ctx),
        duration: r.number("xmpDM:duration"),
        channels: r.number("channels"),
        sample_rate: r.number("samplerate"),
        bitrate: r.number("bitrate"),
        audio_compressor: r.text("xmpDM:audioCompressor"),
        artist: r.text("xmpDM:artist"),
        album: r.text("xmpDM:album"),
        genre: r.text("xmpDM:genre"),
        // "3/12" style numbering keeps the track, not the total.
        track_number: r.number("xmpDM:trackNumber"),
        release_date: r.date("xmpDM:releaseDate"),
        video_frame_rate: r.rational("xmpDM:videoFrameRate"),
        width: r.number("tiff:ImageWidth"),
        height: r.number("tiff:ImageLength"),
    })
}
