use log::{info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{GalleryError, GalleryResult};
use crate::settings::{PhotosLayout, PhotosLayoutPatch, DEFAULT_PHOTOS_LAYOUT};

pub const PHOTOS_LAYOUT_KEY: &str = "photos-layout";

/// String-keyed backing store for client settings.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> GalleryResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> GalleryResult<()>;
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> GalleryResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| GalleryError::Store("Failed to acquire store lock".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> GalleryResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| GalleryError::Store("Failed to acquire store lock".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Keeps all entries in one JSON object on disk. Writes rewrite the whole file
/// under a lock, so concurrent writers resolve as last write wins.
#[derive(Clone)]
pub struct FileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> GalleryResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            path,
            lock: Arc::new(Mutex::new(())),
        })
    }

    fn read_entries(&self) -> GalleryResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> GalleryResult<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| GalleryError::Store("Failed to acquire store lock".to_string()))?;
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> GalleryResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| GalleryError::Store("Failed to acquire store lock".to_string()))?;

        // A corrupt file is replaced rather than blocking every future write
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            warn!("Discarding unreadable settings file {:?}: {}", self.path, e);
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, serde_json::to_vec_pretty(&entries)?)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Load/update/reset contract for [`PhotosLayout`] against a [`SettingsStore`].
#[derive(Clone)]
pub struct LayoutSettings {
    store: Arc<dyn SettingsStore>,
}

impl LayoutSettings {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// The persisted value merged over the default, `None` when nothing has
    /// been saved yet. Store and parse failures are returned as errors.
    pub fn stored(&self) -> GalleryResult<Option<PhotosLayout>> {
        match self.store.get(PHOTOS_LAYOUT_KEY)? {
            Some(raw) => parse_layout(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Never fails: absent, unreadable or malformed values fall back to the
    /// default. Missing fields of a stored value are filled from the default.
    pub fn load(&self) -> PhotosLayout {
        match self.stored() {
            Ok(Some(layout)) => layout,
            Ok(None) => DEFAULT_PHOTOS_LAYOUT,
            Err(e @ GalleryError::Parse(_)) => {
                warn!("{}, using defaults", e);
                DEFAULT_PHOTOS_LAYOUT
            }
            Err(e) => {
                warn!("Failed to read layout settings, using defaults: {}", e);
                DEFAULT_PHOTOS_LAYOUT
            }
        }
    }

    pub fn update(
        &self,
        current: &PhotosLayout,
        patch: &PhotosLayoutPatch,
    ) -> GalleryResult<PhotosLayout> {
        let merged = current.merge(patch);
        let serialized = serde_json::to_string(&merged)?;
        self.store.set(PHOTOS_LAYOUT_KEY, &serialized)?;
        info!(
            "Layout settings updated: layout={} size={} spacing={} corner_radius={} group_by={}",
            merged.layout, merged.size, merged.spacing, merged.corner_radius, merged.group_by
        );
        Ok(merged)
    }

    pub fn reset(&self, current: &PhotosLayout) -> GalleryResult<PhotosLayout> {
        self.update(current, &DEFAULT_PHOTOS_LAYOUT.into())
    }
}

/// Parses a stored value, merging it over the default.
pub fn parse_layout(raw: &str) -> GalleryResult<PhotosLayout> {
    let patch: PhotosLayoutPatch = serde_json::from_str(raw)?;
    Ok(DEFAULT_PHOTOS_LAYOUT.merge(&patch))
}
