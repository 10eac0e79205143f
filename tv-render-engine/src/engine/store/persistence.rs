use bevy::prelude::*;

use super::bookmarks::{BookmarkError, BookmarkSet};

/// Durable home of the camera bookmarks.
pub trait BookmarkStorage: Send + Sync {
    fn load(&self) -> Result<BookmarkSet, BookmarkError>;
    fn save(&self, bookmarks: &BookmarkSet) -> Result<(), BookmarkError>;
}

/// Resource wrapping the platform bookmark storage.
#[derive(Resource)]
pub struct BookmarkPersistence(pub Box<dyn BookmarkStorage>);

impl Default for BookmarkPersistence {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self(Box::new(LocalStorageBookmarks))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self(Box::new(FileBookmarks::new(
                constants::media::BOOKMARK_STORE_FILE,
            )))
        }
    }
}

/// Browser `localStorage`: the slot array and the default index live under
/// separate keys.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageBookmarks;

#[cfg(target_arch = "wasm32")]
impl LocalStorageBookmarks {
    fn storage() -> Result<web_sys::Storage, BookmarkError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| BookmarkError::Storage("localStorage unavailable".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl BookmarkStorage for LocalStorageBookmarks {
    fn load(&self) -> Result<BookmarkSet, BookmarkError> {
        use constants::media::{BOOKMARK_DEFAULT_KEY, BOOKMARK_SLOTS_KEY};

        let storage = Self::storage()?;
        let slots = match storage.get_item(BOOKMARK_SLOTS_KEY).ok().flatten() {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        let default_index = storage
            .get_item(BOOKMARK_DEFAULT_KEY)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(-1);

        Ok(BookmarkSet::from_parts(slots, default_index))
    }

    fn save(&self, bookmarks: &BookmarkSet) -> Result<(), BookmarkError> {
        use constants::media::{BOOKMARK_DEFAULT_KEY, BOOKMARK_SLOTS_KEY};

        let storage = Self::storage()?;
        let slots = serde_json::to_string(bookmarks.slots())?;
        storage
            .set_item(BOOKMARK_SLOTS_KEY, &slots)
            .map_err(|e| BookmarkError::Storage(format!("{e:?}")))?;
        storage
            .set_item(
                BOOKMARK_DEFAULT_KEY,
                &bookmarks.default_index_raw().to_string(),
            )
            .map_err(|e| BookmarkError::Storage(format!("{e:?}")))
    }
}

/// JSON document on disk, same shape as an export.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileBookmarks {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileBookmarks {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BookmarkStorage for FileBookmarks {
    fn load(&self) -> Result<BookmarkSet, BookmarkError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => BookmarkSet::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BookmarkSet::default()),
            Err(e) => Err(BookmarkError::Storage(e.to_string())),
        }
    }

    fn save(&self, bookmarks: &BookmarkSet) -> Result<(), BookmarkError> {
        let json = bookmarks.to_json()?;
        std::fs::write(&self.path, json).map_err(|e| BookmarkError::Storage(e.to_string()))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}-{}", std::process::id(), name))
    }

    #[test]
    fn missing_file_loads_an_empty_set() {
        let storage = FileBookmarks::new(temp_path("absent-bookmarks.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn saved_bookmarks_load_back() {
        let path = temp_path("saved-bookmarks.json");
        let storage = FileBookmarks::new(&path);

        let mut set = BookmarkSet::default();
        set.save("Couch", Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        set.set_default(Some(0)).unwrap();
        storage.save(&set).unwrap();

        assert_eq!(storage.load().unwrap(), set);
        let _ = std::fs::remove_file(path);
    }
}
