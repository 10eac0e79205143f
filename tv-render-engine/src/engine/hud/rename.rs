use bevy::input::keyboard::Key;
use bevy::prelude::*;

use crate::engine::store::ChannelStore;
use crate::engine::store::bookmarks::BookmarkError;

const MAX_NAME_CHARS: usize = 32;

/// What a key did to an open rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Editing,
    Committed,
    Cancelled,
}

/// Bookmark name being typed in the panel.
///
/// While a rename is open the keyboard belongs to it: shortcuts and WASD
/// movement are ignored until Enter or Escape.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    slot: Option<usize>,
    text: String,
}

impl RenameEntry {
    /// Open a slot for renaming, prefilled with its current name. Returns
    /// `false` for a slot that does not exist.
    pub fn begin(&mut self, slot: usize, store: &ChannelStore) -> bool {
        let Some(bookmark) = store.bookmarks.get(slot) else {
            return false;
        };
        self.slot = Some(slot);
        self.text = bookmark.name.clone();
        true
    }

    pub fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cancel(&mut self) {
        self.slot = None;
        self.text.clear();
    }

    /// Store the typed name. A blank name keeps the old one.
    pub fn commit(&mut self, store: &mut ChannelStore) -> Result<RenameOutcome, BookmarkError> {
        let Some(slot) = self.slot.take() else {
            return Ok(RenameOutcome::Cancelled);
        };
        let name = std::mem::take(&mut self.text);
        if name.trim().is_empty() {
            return Ok(RenameOutcome::Cancelled);
        }
        store.rename_bookmark(slot, &name)?;
        Ok(RenameOutcome::Committed)
    }

    /// Feed one pressed key. Does nothing while no rename is open.
    pub fn press(
        &mut self,
        key: &Key,
        store: &mut ChannelStore,
    ) -> Result<RenameOutcome, BookmarkError> {
        if !self.is_active() {
            return Ok(RenameOutcome::Cancelled);
        }
        match key {
            Key::Enter => return self.commit(store),
            Key::Escape => {
                self.cancel();
                return Ok(RenameOutcome::Cancelled);
            }
            Key::Backspace => {
                self.text.pop();
            }
            Key::Space => self.push(" "),
            Key::Character(chars) => self.push(chars),
            _ => {}
        }
        Ok(RenameOutcome::Editing)
    }

    fn push(&mut self, chars: &str) {
        for c in chars.chars().filter(|c| !c.is_control()) {
            if self.text.chars().count() >= MAX_NAME_CHARS {
                break;
            }
            self.text.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_view() -> ChannelStore {
        let mut store = ChannelStore::default();
        store.save_bookmark("View 1", Vec3::ONE, Vec3::ZERO);
        store
    }

    fn type_text(entry: &mut RenameEntry, store: &mut ChannelStore, text: &str) {
        for c in text.chars() {
            let key = if c == ' ' {
                Key::Space
            } else {
                Key::Character(c.to_string().into())
            };
            assert_eq!(entry.press(&key, store).unwrap(), RenameOutcome::Editing);
        }
    }

    #[test]
    fn typing_then_enter_renames_the_slot() {
        let mut store = store_with_view();
        let mut entry = RenameEntry::default();
        assert!(entry.begin(0, &store));
        assert_eq!(entry.text(), "View 1");

        for _ in 0.."View 1".len() {
            entry.press(&Key::Backspace, &mut store).unwrap();
        }
        type_text(&mut entry, &mut store, "Sofa corner");
        assert_eq!(entry.press(&Key::Enter, &mut store).unwrap(), RenameOutcome::Committed);

        assert!(!entry.is_active());
        assert_eq!(store.bookmarks.get(0).unwrap().name, "Sofa corner");
    }

    #[test]
    fn escape_and_blank_names_keep_the_old_name() {
        let mut store = store_with_view();
        let mut entry = RenameEntry::default();

        entry.begin(0, &store);
        type_text(&mut entry, &mut store, "x");
        assert_eq!(entry.press(&Key::Escape, &mut store).unwrap(), RenameOutcome::Cancelled);
        assert_eq!(store.bookmarks.get(0).unwrap().name, "View 1");

        entry.begin(0, &store);
        for _ in 0..10 {
            entry.press(&Key::Backspace, &mut store).unwrap();
        }
        type_text(&mut entry, &mut store, "   ");
        assert_eq!(entry.press(&Key::Enter, &mut store).unwrap(), RenameOutcome::Cancelled);
        assert_eq!(store.bookmarks.get(0).unwrap().name, "View 1");
    }

    #[test]
    fn unknown_slot_does_not_open() {
        let mut store = store_with_view();
        let mut entry = RenameEntry::default();
        assert!(!entry.begin(3, &store));
        assert!(!entry.is_active());
        assert_eq!(entry.press(&Key::Enter, &mut store).unwrap(), RenameOutcome::Cancelled);
    }

    #[test]
    fn names_are_capped() {
        let mut store = store_with_view();
        let mut entry = RenameEntry::default();
        entry.begin(0, &store);
        type_text(&mut entry, &mut store, &"a".repeat(40));
        assert_eq!(entry.text().chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn deleted_slot_reports_out_of_range() {
        let mut store = store_with_view();
        let mut entry = RenameEntry::default();
        entry.begin(0, &store);
        store.delete_bookmark(0).unwrap();
        type_text(&mut entry, &mut store, "!");
        assert!(matches!(
            entry.press(&Key::Enter, &mut store),
            Err(BookmarkError::OutOfRange(0))
        ));
        assert!(!entry.is_active());
    }
}
