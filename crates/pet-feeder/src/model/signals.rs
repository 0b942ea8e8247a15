//! Change notification channels for the pet collection.
//!
//! The presentation layer connects to these signals to stay synchronized
//! with the collection. Every mutation publishes its specific event first
//! and `content_updated` last:
//!
//! | Mutation            | Events                                   |
//! |---------------------|------------------------------------------|
//! | `add`               | `pet_added`, `content_updated`           |
//! | `remove_at`         | `pet_removed`, `content_updated`         |
//! | `update_image`      | `image_updated`, `content_updated`       |
//! | `replace_all/clear` | `content_updated`                        |
//!
//! Events are published after the state change is complete.

use pet_feeder_core::{Signal, SignalEmitter};

use super::view::PetView;

/// Payload of [`PetSignals::content_updated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentUpdated {
    /// Number of pets after the mutation.
    pub count: usize,
}

/// Payload of [`PetSignals::pet_added`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetAdded {
    /// The new pet.
    pub view: PetView,
    /// Its index, always the last position at the time of insertion.
    pub index: usize,
}

/// Payload of [`PetSignals::pet_removed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetRemoved {
    /// The removed pet. Its identity is no longer in the collection.
    pub view: PetView,
    /// The index it occupied before removal.
    pub index: usize,
    /// The pet that took its index, else the new last pet, as of the removal.
    pub neighbor: Option<PetView>,
}

/// Payload of [`PetSignals::image_updated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpdated {
    /// The pet whose image changed.
    pub view: PetView,
    /// Its current index.
    pub index: usize,
}

/// The four independent broadcast channels published by a collection.
pub struct PetSignals {
    /// Emitted after every mutation, including bulk resets.
    pub content_updated: Signal<ContentUpdated>,

    /// Emitted after a pet has been appended.
    pub pet_added: Signal<PetAdded>,

    /// Emitted after a pet has been removed.
    pub pet_removed: Signal<PetRemoved>,

    /// Emitted after a pet's image reference changed.
    pub image_updated: Signal<ImageUpdated>,
}

impl Default for PetSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl PetSignals {
    /// Creates a set of signals with no connections.
    pub fn new() -> Self {
        Self {
            content_updated: Signal::new(),
            pet_added: Signal::new(),
            pet_removed: Signal::new(),
            image_updated: Signal::new(),
        }
    }

    fn channels(&self) -> [&dyn SignalEmitter; 4] {
        [
            &self.content_updated,
            &self.pet_added,
            &self.pet_removed,
            &self.image_updated,
        ]
    }

    /// Blocks or unblocks all four channels at once.
    pub fn set_blocked(&self, blocked: bool) {
        for channel in self.channels() {
            channel.set_blocked(blocked);
        }
    }

    /// Disconnects every slot from every channel.
    pub fn disconnect_all(&self) {
        for channel in self.channels() {
            channel.disconnect_all();
        }
    }

    /// Total number of connected slots across all channels.
    pub fn connection_count(&self) -> usize {
        self.channels()
            .iter()
            .map(|channel| channel.connection_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signals_creation() {
        let signals = PetSignals::new();
        assert_eq!(signals.connection_count(), 0);
    }

    #[test]
    fn test_block_and_disconnect_all() {
        let signals = PetSignals::new();
        signals.content_updated.connect(|_| {});
        signals.pet_added.connect(|_| {});
        signals.pet_removed.connect(|_| {});
        signals.image_updated.connect(|_| {});
        assert_eq!(signals.connection_count(), 4);

        signals.set_blocked(true);
        assert!(signals.pet_added.is_blocked());
        assert!(signals.image_updated.is_blocked());
        signals.set_blocked(false);
        assert!(!signals.content_updated.is_blocked());

        signals.disconnect_all();
        assert_eq!(signals.connection_count(), 0);
    }
}
