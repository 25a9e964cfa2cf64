use std::path::Path;

use lofty::picture::PictureType;
use lofty::prelude::{Accessor, TaggedFileExt};

use super::error::MetadataError;

/// Embedded picture bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub data: Vec<u8>,
    pub format: String,
}

/// The tag fields the player displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub picture: Option<Picture>,
}

/// Reads display tags from an audio file.
pub trait MetadataReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<TrackTags, MetadataError>;
}

/// `MetadataReader` backed by `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyReader;

fn non_empty(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl MetadataReader for LoftyReader {
    fn read(&self, path: &Path) -> Result<TrackTags, MetadataError> {
        let tagged = lofty::read_from_path(path)?;
        let tag = tagged
            .primary_tag()
            .or_else(|| tagged.first_tag())
            .ok_or(MetadataError::NoTags)?;

        let pictures = tag.pictures();
        let picture = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first())
            .map(|p| Picture {
                data: p.data().to_vec(),
                format: p
                    .mime_type()
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| "image/jpeg".to_string()),
            });

        Ok(TrackTags {
            title: non_empty(tag.title()),
            artist: non_empty(tag.artist()),
            picture,
        })
    }
}
