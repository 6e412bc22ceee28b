//! Images picked in the write form but not yet uploaded.
//!
//! The staged set is pure bookkeeping: entries are added when the file input
//! changes and removed from their preview, and the running total is always
//! derived from what is currently staged.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::format::format_megabytes;
use crate::models::Upload;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StagingError {
    #[error("각 이미지는 {limit_mb}MB 이하여야 합니다.")]
    TooLarge { name: String, limit_mb: u64 },
    #[error("허용되지 않는 파일 형식입니다.")]
    UnsupportedType { name: String },
}

/// Handle of a staged entry, stable across removals of other entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage {
    pub id: ImageId,
    pub name: String,
    pub mime: &'static str,
    pub data: Vec<u8>,
    /// `data:` URL for the thumbnail, shared with every [`Thumbnail`].
    pub preview: Arc<str>,
}

/// What the write form renders per staged image. Carries no upload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub id: ImageId,
    pub name: String,
    pub preview: Arc<str>,
}

impl StagedImage {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A file from the file input. `size` is what the input reported; `data` is
/// left empty when the file was too large to be worth reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    pub name: String,
    pub size: u64,
    pub data: Vec<u8>,
}

impl PickedImage {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: data.len() as u64,
            data,
        }
    }

    /// A file known only by name and size.
    pub fn unread(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageStaging {
    entries: Vec<StagedImage>,
    next_id: u32,
}

/// Content type for an accepted image extension.
pub fn mime_for(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

impl ImageStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage one file, refusing it if it exceeds `max_bytes` or is not an image.
    /// A refused file leaves the staged set untouched.
    pub fn stage(&mut self, file: PickedImage, max_bytes: u64) -> Result<ImageId, StagingError> {
        if file.size.max(file.data.len() as u64) > max_bytes {
            return Err(StagingError::TooLarge {
                name: file.name,
                limit_mb: max_bytes / (1024 * 1024),
            });
        }
        let Some(mime) = mime_for(&file.name) else {
            return Err(StagingError::UnsupportedType { name: file.name });
        };

        let id = ImageId(self.next_id);
        self.next_id += 1;
        let preview: Arc<str> = format!("data:{mime};base64,{}", STANDARD.encode(&file.data)).into();
        self.entries.push(StagedImage {
            id,
            name: file.name,
            mime,
            data: file.data,
            preview,
        });
        Ok(id)
    }

    /// Drop an entry. Returns false if it was not staged.
    pub fn remove(&mut self, id: ImageId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[StagedImage] {
        &self.entries
    }

    pub fn thumbnails(&self) -> Vec<Thumbnail> {
        self.entries
            .iter()
            .map(|e| Thumbnail {
                id: e.id,
                name: e.name.clone(),
                preview: Arc::clone(&e.preview),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(StagedImage::size).sum()
    }

    /// Running total as shown under the file input.
    pub fn total_display(&self) -> String {
        format_megabytes(self.total_bytes())
    }

    /// Multipart parts in staging order.
    pub fn to_uploads(&self) -> Vec<Upload> {
        self.entries
            .iter()
            .map(|e| Upload {
                name: e.name.clone(),
                mime: e.mime.to_string(),
                data: e.data.clone(),
            })
            .collect()
    }
}
