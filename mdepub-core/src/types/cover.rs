//! Cover image and stylesheet assets

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CompileError, MdepubError};

/// Cover image bytes with their declared media type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverImage {
    /// Raw image data
    #[serde(with = "base64_serde")]
    pub data: Vec<u8>,

    /// MIME type (e.g. "image/jpeg")
    pub media_type: String,
}

impl CoverImage {
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
        }
    }

    /// Read a cover from disk, guessing the media type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MdepubError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let media_type = media_type_for_extension(ext).ok_or_else(|| {
            CompileError::InvalidMetadata(format!(
                "unsupported cover image type: {}",
                path.display()
            ))
        })?;
        let data = std::fs::read(path)?;
        Ok(Self::new(data, media_type))
    }

    /// File extension used inside the container
    pub fn extension(&self) -> &str {
        match self.media_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/svg+xml" => "svg",
            "image/webp" => "webp",
            _ => "img",
        }
    }

    /// Path of the cover inside the content directory
    pub fn href(&self) -> String {
        format!("cover.{}", self.extension())
    }
}

/// Map an image file extension to its MIME type
pub fn media_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// CSS linked from every content document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stylesheet {
    pub css: String,
}

impl Stylesheet {
    /// Path of the stylesheet inside the content directory
    pub const HREF: &'static str = "style.css";

    pub fn new(css: impl Into<String>) -> Self {
        Self { css: css.into() }
    }
}

/// Base64 serialization for binary data
mod base64_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_guessing() {
        assert_eq!(media_type_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(media_type_for_extension("png"), Some("image/png"));
        assert_eq!(media_type_for_extension("bmp"), None);
    }

    #[test]
    fn test_cover_href() {
        let cover = CoverImage::new(vec![1, 2, 3], "image/png");
        assert_eq!(cover.href(), "cover.png");
    }

    #[test]
    fn test_cover_serializes_as_base64() {
        let cover = CoverImage::new(vec![0xff, 0x00], "image/jpeg");
        let json = serde_json::to_string(&cover).unwrap();
        assert!(json.contains("\"/wA=\""));
        let back: CoverImage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cover);
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let err = CoverImage::from_path("cover.bmp").unwrap_err();
        assert!(matches!(
            err,
            MdepubError::Compile(CompileError::InvalidMetadata(_))
        ));
    }
}
