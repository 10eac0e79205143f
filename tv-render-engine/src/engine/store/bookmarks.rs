use bevy::math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("malformed bookmark data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("no bookmark at index {0}")]
    OutOfRange(usize),

    #[error("bookmark name is empty")]
    EmptyName,

    #[error("bookmark storage failed: {0}")]
    Storage(String),
}

/// Plain `{x, y, z}` vector as it appears in the bookmark JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkVec {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl BookmarkVec {
    /// Capture a camera vector, rounded to two decimals per axis.
    pub fn rounded(v: Vec3) -> Self {
        let round = |value: f32| (value * 100.0).round() / 100.0;
        Self {
            x: round(v.x),
            y: round(v.y),
            z: round(v.z),
        }
    }
}

impl From<BookmarkVec> for Vec3 {
    fn from(v: BookmarkVec) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Saved camera position and look-at target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraBookmark {
    pub name: String,
    pub position: BookmarkVec,
    pub target: BookmarkVec,
}

/// Export/import document: `{ slots: [...], defaultIndex: n }`.
#[derive(Debug, Serialize, Deserialize)]
struct BookmarkDocument {
    slots: Vec<CameraBookmark>,
    #[serde(rename = "defaultIndex", default = "no_default_index")]
    default_index: i64,
}

fn no_default_index() -> i64 {
    -1
}

/// Ordered bookmark list with at most one default slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkSet {
    slots: Vec<CameraBookmark>,
    default_index: Option<usize>,
}

impl BookmarkSet {
    pub fn slots(&self) -> &[CameraBookmark] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&CameraBookmark> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn default_index(&self) -> Option<usize> {
        self.default_index
    }

    pub fn default_slot(&self) -> Option<&CameraBookmark> {
        self.default_index.and_then(|index| self.slots.get(index))
    }

    /// Append a bookmark and return its index.
    pub fn save(&mut self, name: impl Into<String>, position: Vec3, target: Vec3) -> usize {
        self.slots.push(CameraBookmark {
            name: name.into(),
            position: BookmarkVec::rounded(position),
            target: BookmarkVec::rounded(target),
        });
        self.slots.len() - 1
    }

    /// Name proposed for the next saved view ("View 1", "View 2", ...).
    pub fn next_name(&self) -> String {
        format!("View {}", self.slots.len() + 1)
    }

    pub fn delete(&mut self, index: usize) -> Result<CameraBookmark, BookmarkError> {
        if index >= self.slots.len() {
            return Err(BookmarkError::OutOfRange(index));
        }
        let removed = self.slots.remove(index);
        self.default_index = match self.default_index {
            Some(default) if default == index => None,
            Some(default) if default > index => Some(default - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn rename(&mut self, index: usize, name: &str) -> Result<(), BookmarkError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookmarkError::EmptyName);
        }
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(BookmarkError::OutOfRange(index))?;
        slot.name = name.to_string();
        Ok(())
    }

    /// Overwrite position and target of an existing bookmark.
    pub fn update(
        &mut self,
        index: usize,
        position: Vec3,
        target: Vec3,
    ) -> Result<(), BookmarkError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(BookmarkError::OutOfRange(index))?;
        slot.position = BookmarkVec::rounded(position);
        slot.target = BookmarkVec::rounded(target);
        Ok(())
    }

    /// Mark a slot as default, or clear the default with `None`.
    pub fn set_default(&mut self, index: Option<usize>) -> Result<(), BookmarkError> {
        if let Some(index) = index {
            if index >= self.slots.len() {
                return Err(BookmarkError::OutOfRange(index));
            }
        }
        self.default_index = index;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, BookmarkError> {
        let document = BookmarkDocument {
            slots: self.slots.clone(),
            default_index: self.default_index.map_or(-1, |index| index as i64),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Parse an exported document. A missing or out-of-range default index
    /// means "no default".
    pub fn from_json(json: &str) -> Result<Self, BookmarkError> {
        let document: BookmarkDocument = serde_json::from_str(json)?;
        Ok(Self::from_parts(document.slots, document.default_index))
    }

    pub fn from_parts(slots: Vec<CameraBookmark>, default_index: i64) -> Self {
        let default_index = usize::try_from(default_index)
            .ok()
            .filter(|index| *index < slots.len());
        Self {
            slots,
            default_index,
        }
    }

    /// Raw default index as persisted (`-1` for none).
    pub fn default_index_raw(&self) -> i64 {
        self.default_index.map_or(-1, |index| index as i64)
    }
}

impl Serialize for BookmarkSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BookmarkDocument {
            slots: self.slots.clone(),
            default_index: self.default_index_raw(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_views() -> BookmarkSet {
        let mut set = BookmarkSet::default();
        set.save("Front", Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        set.save("Side", Vec3::new(4.0, 5.0, 6.0), Vec3::X);
        set.save("Top", Vec3::new(0.0, 9.0, 0.0), Vec3::Y);
        set
    }

    #[test]
    fn save_rounds_to_two_decimals() {
        let mut set = BookmarkSet::default();
        set.save("View 1", Vec3::new(12.0249, -3.456, 0.001), Vec3::ZERO);
        let slot = set.get(0).unwrap();
        assert_eq!(slot.position, BookmarkVec { x: 12.02, y: -3.46, z: 0.0 });
        assert_eq!(set.next_name(), "View 2");
    }

    #[test]
    fn delete_shifts_default_index() {
        let mut set = three_views();
        set.set_default(Some(2)).unwrap();
        set.delete(0).unwrap();
        assert_eq!(set.default_index(), Some(1));
        assert_eq!(set.default_slot().unwrap().name, "Top");

        set.delete(1).unwrap();
        assert_eq!(set.default_index(), None);
    }

    #[test]
    fn delete_after_default_keeps_it() {
        let mut set = three_views();
        set.set_default(Some(0)).unwrap();
        set.delete(2).unwrap();
        assert_eq!(set.default_index(), Some(0));
    }

    #[test]
    fn rename_trims_and_rejects_empty_names() {
        let mut set = three_views();
        set.rename(1, "  Couch  ").unwrap();
        assert_eq!(set.get(1).unwrap().name, "Couch");
        assert!(matches!(set.rename(1, "   "), Err(BookmarkError::EmptyName)));
        assert!(matches!(set.rename(7, "Nope"), Err(BookmarkError::OutOfRange(7))));
    }

    #[test]
    fn update_overwrites_position_and_target() {
        let mut set = three_views();
        set.update(0, Vec3::splat(7.0), Vec3::splat(8.0)).unwrap();
        let slot = set.get(0).unwrap();
        assert_eq!(slot.name, "Front");
        assert_eq!(Vec3::from(slot.position), Vec3::splat(7.0));
        assert_eq!(Vec3::from(slot.target), Vec3::splat(8.0));
    }

    #[test]
    fn export_then_import_reproduces_the_set() {
        let mut set = three_views();
        set.set_default(Some(1)).unwrap();

        let json = set.to_json().unwrap();
        let restored = BookmarkSet::from_json(&json).unwrap();
        assert_eq!(restored, set);
    }

    #[test]
    fn export_uses_the_documented_shape() {
        let set = three_views();
        let json: serde_json::Value = serde_json::from_str(&set.to_json().unwrap()).unwrap();
        assert_eq!(json["defaultIndex"], -1);
        assert_eq!(json["slots"][1]["name"], "Side");
        assert_eq!(json["slots"][1]["position"]["y"], 5.0);
    }

    #[test]
    fn import_without_default_index_has_no_default() {
        let json = r#"{ "slots": [ {
            "name": "A",
            "position": {"x":1,"y":2,"z":3},
            "target": {"x":0,"y":0,"z":0}
        } ] }"#;
        let set = BookmarkSet::from_json(json).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.default_index(), None);
    }

    #[test]
    fn import_rejects_malformed_documents() {
        assert!(BookmarkSet::from_json("{ \"slots\": 5 }").is_err());
        assert!(BookmarkSet::from_json("not json").is_err());
    }
}
