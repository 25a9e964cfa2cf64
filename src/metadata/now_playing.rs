use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::library::Track;

use super::error::MetadataError;
use super::reader::{Picture, TrackTags};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const METADATA_ERROR_ARTIST: &str = "Unknown Artist (Metadata Error)";

/// Cover art for the now-playing box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverArt {
    /// No picture embedded, or tags not read yet.
    Placeholder,
    /// Picture from the file's tags, encoded as a `data:` URL.
    Embedded {
        mime: String,
        data_url: String,
        size: usize,
    },
    /// Tags could not be read.
    Fallback,
}

/// Display fields derived for the current track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub cover: CoverArt,
    /// False until the metadata fetch for this track has completed.
    pub resolved: bool,
}

/// Encode a picture as `data:<format>;base64,<bytes>`.
pub fn data_url(picture: &Picture) -> String {
    format!(
        "data:{};base64,{}",
        picture.format,
        STANDARD.encode(&picture.data)
    )
}

impl NowPlaying {
    /// Shown while the tags are being read.
    pub fn pending(index: usize, track: &Track) -> Self {
        Self {
            index,
            title: track.name.clone(),
            artist: String::new(),
            cover: CoverArt::Placeholder,
            resolved: false,
        }
    }

    pub fn from_result(
        index: usize,
        track: &Track,
        result: &Result<TrackTags, MetadataError>,
    ) -> Self {
        match result {
            Ok(tags) => Self::from_tags(index, track, tags),
            Err(_) => Self::fallback(index, track),
        }
    }

    pub fn from_tags(index: usize, track: &Track, tags: &TrackTags) -> Self {
        let cover = match &tags.picture {
            Some(picture) => CoverArt::Embedded {
                mime: picture.format.clone(),
                data_url: data_url(picture),
                size: picture.data.len(),
            },
            None => CoverArt::Placeholder,
        };

        Self {
            index,
            title: tags.title.clone().unwrap_or_else(|| track.name.clone()),
            artist: tags
                .artist
                .clone()
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            cover,
            resolved: true,
        }
    }

    pub fn fallback(index: usize, track: &Track) -> Self {
        Self {
            index,
            title: track.name.clone(),
            artist: METADATA_ERROR_ARTIST.to_string(),
            cover: CoverArt::Fallback,
            resolved: true,
        }
    }

    pub fn cover_url(&self) -> Option<&str> {
        match &self.cover {
            CoverArt::Embedded { data_url, .. } => Some(data_url),
            _ => None,
        }
    }
}
