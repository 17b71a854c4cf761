//! Tooltip images, resolved from the record table's image references.
//!
//! A reference is a `data:` URI, an `http(s)://` or `file://` URL, or a
//! filesystem path. Relative paths resolve against the image root. Decoded
//! textures live in a bounded LRU cache; failures are remembered for the
//! whole session.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use eframe::egui;
use thiserror::Error;

use crate::http_client::{self, FetchError};

/// Upper bound for a remote image download.
const MAX_REMOTE_IMAGE_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Unsupported data URI (only base64 payloads are read)")]
    DataUri,
    #[error("Invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Where the bytes of an image reference come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocation {
    Inline(Vec<u8>),
    Remote(String),
    Local(PathBuf),
}

/// Work out where `reference` points without touching the disk or network.
pub fn locate(reference: &str, root: &Path) -> Result<ImageLocation, ImageLoadError> {
    let reference = reference.trim();
    if let Some(rest) = reference.strip_prefix("data:") {
        let (header, payload) = rest.split_once(',').ok_or(ImageLoadError::DataUri)?;
        if !header.ends_with(";base64") {
            return Err(ImageLoadError::DataUri);
        }
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
        return Ok(ImageLocation::Inline(bytes));
    }
    if let Ok(url) = url::Url::parse(reference) {
        match url.scheme() {
            "http" | "https" => return Ok(ImageLocation::Remote(url.into())),
            "file" => {
                if let Ok(path) = url.to_file_path() {
                    return Ok(ImageLocation::Local(path));
                }
            }
            // Anything else (including Windows drive letters) is read as a path.
            _ => {}
        }
    }
    let path = Path::new(reference);
    if path.is_absolute() {
        Ok(ImageLocation::Local(path.to_path_buf()))
    } else {
        Ok(ImageLocation::Local(root.join(path)))
    }
}

/// Fetch the raw bytes for a located image.
pub fn read_bytes(location: ImageLocation) -> Result<Vec<u8>, ImageLoadError> {
    match location {
        ImageLocation::Inline(bytes) => Ok(bytes),
        ImageLocation::Remote(url) => Ok(http_client::fetch_bytes(&url, MAX_REMOTE_IMAGE_BYTES)?),
        ImageLocation::Local(path) => {
            std::fs::read(&path).map_err(|source| ImageLoadError::Read { path, source })
        }
    }
}

/// Decode encoded image bytes into an egui image.
pub fn decode(bytes: &[u8]) -> Result<egui::ColorImage, ImageLoadError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        image.as_raw(),
    ))
}

/// Resolve, read and decode one reference.
pub fn load_image(reference: &str, root: &Path) -> Result<egui::ColorImage, ImageLoadError> {
    decode(&read_bytes(locate(reference, root)?)?)
}

/// Cached outcome for one reference.
pub enum ImageSlot {
    Ready(egui::TextureHandle),
    Failed(String),
}

/// Decoded textures kept alive before the least recently shown one is dropped.
pub const DEFAULT_TEXTURE_CAPACITY: usize = 64;

struct CacheEntry {
    slot: ImageSlot,
    last_used: u64,
}

/// Per-reference texture cache with LRU eviction of textures.
///
/// Failures are small and stay cached for the whole session, so a broken
/// reference is read at most once. Only `Ready` slots count against the
/// capacity.
pub struct ImageCache {
    root: PathBuf,
    entries: HashMap<String, CacheEntry>,
    capacity: usize,
    tick: u64,
}

impl ImageCache {
    pub fn new(root: PathBuf) -> Self {
        Self::with_capacity(root, DEFAULT_TEXTURE_CAPACITY)
    }

    /// Create a cache that keeps up to `capacity` textures.
    pub fn with_capacity(root: PathBuf, capacity: usize) -> Self {
        Self {
            root,
            entries: HashMap::new(),
            capacity: capacity.max(1),
            tick: 0,
        }
    }

    /// Texture for `reference`, loading it into `ctx` on first use.
    pub fn get_or_load(&mut self, ctx: &egui::Context, reference: &str) -> &ImageSlot {
        self.tick = self.tick.saturating_add(1);
        if let Some(entry) = self.entries.get_mut(reference) {
            entry.last_used = self.tick;
        } else {
            let slot = load_slot(ctx, &self.root, reference);
            if matches!(slot, ImageSlot::Ready(_)) {
                while self.texture_count() >= self.capacity {
                    if !self.evict_lru() {
                        break;
                    }
                }
            }
            self.entries.insert(
                reference.to_string(),
                CacheEntry {
                    slot,
                    last_used: self.tick,
                },
            );
        }
        &self.entries[reference].slot
    }

    /// Number of cached references, failures included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn texture_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry.slot, ImageSlot::Ready(_)))
            .count()
    }

    fn evict_lru(&mut self) -> bool {
        let Some(reference) = self
            .entries
            .iter()
            .filter(|(_, entry)| matches!(entry.slot, ImageSlot::Ready(_)))
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(reference, _)| reference.clone())
        else {
            return false;
        };
        tracing::debug!(reference = short(&reference), "Evicted tooltip image");
        self.entries.remove(&reference);
        true
    }
}

fn load_slot(ctx: &egui::Context, root: &Path, reference: &str) -> ImageSlot {
    match load_image(reference, root) {
        Ok(image) => {
            tracing::debug!(reference = short(reference), "Loaded tooltip image");
            ImageSlot::Ready(ctx.load_texture(
                format!("tooltip:{}", short(reference)),
                image,
                egui::TextureOptions::LINEAR,
            ))
        }
        Err(err) => {
            tracing::warn!(reference = short(reference), "Tooltip image unavailable: {err}");
            ImageSlot::Failed(err.to_string())
        }
    }
}

/// Data URIs can be megabytes long; keep logs and texture names readable.
fn short(reference: &str) -> &str {
    const LIMIT: usize = 96;
    match reference.char_indices().nth(LIMIT) {
        Some((idx, _)) => &reference[..idx],
        None => reference,
    }
}
