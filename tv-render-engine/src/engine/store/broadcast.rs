use bevy::prelude::*;

use super::channel_store::ChannelStore;
use super::persistence::BookmarkPersistence;

/// Emitted once per frame in which the store contents changed.
///
/// Consumers are edge-triggered: they compare the fields they care about
/// between `previous` and `current`.
#[derive(Event, Debug, Clone)]
pub struct StoreChanged {
    pub previous: ChannelStore,
    pub current: ChannelStore,
}

impl StoreChanged {
    pub fn changed<T: PartialEq>(&self, field: impl Fn(&ChannelStore) -> T) -> bool {
        field(&self.previous) != field(&self.current)
    }
}

pub fn broadcast_store_changes(
    store: Res<ChannelStore>,
    mut snapshot: Local<Option<ChannelStore>>,
    mut changes: EventWriter<StoreChanged>,
) {
    if !store.is_changed() {
        return;
    }

    match snapshot.as_ref() {
        // Mutable access without a real edit.
        Some(previous) if previous == &*store => return,
        Some(previous) => {
            changes.write(StoreChanged {
                previous: previous.clone(),
                current: store.clone(),
            });
        }
        None => {}
    }

    *snapshot = Some(store.clone());
}

/// Commit a partial channel number once its idle timeout elapsed.
pub fn commit_idle_channel_entry(mut store: ResMut<ChannelStore>, time: Res<Time>) {
    if store.entry.in_progress().is_empty() {
        return;
    }
    if let Some(channel) = store.poll_channel_entry(time.elapsed_secs_f64()) {
        debug!("Channel entry committed: {}", channel);
    }
}

pub fn load_persisted_bookmarks(
    mut store: ResMut<ChannelStore>,
    persistence: Res<BookmarkPersistence>,
) {
    match persistence.0.load() {
        Ok(bookmarks) => {
            println!("✓ Loaded {} camera bookmarks", bookmarks.len());
            store.bookmarks = bookmarks;
        }
        Err(e) => warn!("Ignoring stored camera bookmarks: {}", e),
    }
}

pub fn persist_bookmarks(
    mut changes: EventReader<StoreChanged>,
    persistence: Res<BookmarkPersistence>,
) {
    let Some(latest) = changes
        .read()
        .filter(|change| change.changed(|s| s.bookmarks.clone()))
        .last()
    else {
        return;
    };

    if let Err(e) = persistence.0.save(&latest.current.bookmarks) {
        warn!("Failed to persist camera bookmarks: {}", e);
    }
}
