//! Top-level model aggregator.
//!
//! `AppModel` is what a screen holds on to: the shared [`PetCollection`], the
//! [`FeedController`] over it, and the "current pet" selection pointer.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use pet_feeder_core::logging::targets;
use pet_feeder_core::{ConnectionId, Signal};

use super::collection::PetCollection;
use super::feed::FeedController;
use super::signals::{PetRemoved, PetSignals};
use super::view::PetView;
use crate::config::{ModelConfig, SelectionPolicy};
use crate::error::Result;
use crate::image::{self, ImageLoader};

/// The selection pointer and its change signal.
struct Selection {
    current: RwLock<Option<PetView>>,
    changed: Signal<Option<PetView>>,
}

impl Selection {
    fn new() -> Self {
        Self {
            current: RwLock::new(None),
            changed: Signal::new(),
        }
    }

    fn get(&self) -> Option<PetView> {
        self.current.read().clone()
    }

    /// Moves the pointer, emitting `changed` only if it moved.
    fn set(&self, pet: Option<PetView>) -> bool {
        {
            let mut current = self.current.write();
            if *current == pet {
                return false;
            }
            *current = pet.clone();
        }
        tracing::debug!(
            target: targets::SELECTION,
            id = ?pet.as_ref().map(PetView::id),
            "current pet changed"
        );
        self.changed.emit(pet);
        true
    }

    fn on_removed(
        &self,
        removed: &PetRemoved,
        policy: SelectionPolicy,
        pets: &Weak<PetCollection>,
    ) {
        if self.current.read().as_ref() != Some(&removed.view) {
            return;
        }

        let next = match policy {
            SelectionPolicy::Retain => return,
            SelectionPolicy::Clear => None,
            // The payload index may be stale if a nested mutation ran first.
            SelectionPolicy::Neighbor => removed.neighbor.clone().filter(|neighbor| {
                pets.upgrade()
                    .is_some_and(|pets| pets.index_of(neighbor).is_some())
            }),
        };
        self.set(next);
    }

    /// Drops a pointer left behind by a bulk reset.
    fn on_content_updated(&self, policy: SelectionPolicy, pets: &Weak<PetCollection>) {
        if policy == SelectionPolicy::Retain {
            return;
        }
        let Some(pets) = pets.upgrade() else {
            return;
        };
        let stale = self
            .current
            .read()
            .as_ref()
            .is_some_and(|current| pets.index_of(current).is_none());
        if stale {
            self.set(None);
        }
    }
}

/// Aggregates the pet collection, the card feed and the current selection.
///
/// # Selection on removal
///
/// The model connects priority slots to `pet_removed` and `content_updated`,
/// so they run before every ordinary subscriber, including ones connected to
/// a shared collection before this model was built. By the time others see a
/// removal or a reset, the pointer already follows
/// [`ModelConfig::selection_on_remove`]. A reset clears the pointer under
/// every policy except [`SelectionPolicy::Retain`].
///
/// # Example
///
/// ```
/// use pet_feeder::config::ModelConfig;
/// use pet_feeder::model::AppModel;
///
/// let app = AppModel::new(ModelConfig::default());
/// let rex = app.add_new_pet("Rex");
/// app.add_new_pet("Mimi");
///
/// assert!(app.set_current_pet(Some(rex.clone())));
/// app.remove_pet_at(0).unwrap();
///
/// // Default policy clears the selection.
/// assert_eq!(app.current_pet(), None);
/// assert_eq!(app.pets_count(), 1);
/// ```
pub struct AppModel {
    pets: Arc<PetCollection>,
    feed: FeedController,
    selection: Arc<Selection>,
    config: ModelConfig,
    // Plain ids, undone in `Drop`: a `ConnectionGuard` borrows its signal and
    // cannot sit next to the `Arc` that owns it.
    removal_hook: ConnectionId,
    reset_hook: ConnectionId,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl AppModel {
    /// Creates a model over a new, empty collection.
    pub fn new(config: ModelConfig) -> Self {
        Self::with_collection(Arc::new(PetCollection::new()), config)
    }

    /// Creates a model over an existing collection.
    ///
    /// Subscribers already connected to `pets` keep working and observe the
    /// selection after this model has updated it.
    pub fn with_collection(pets: Arc<PetCollection>, config: ModelConfig) -> Self {
        let selection = Arc::new(Selection::new());
        let policy = config.selection_on_remove;

        let removal_hook = {
            let selection = selection.clone();
            let weak_pets = Arc::downgrade(&pets);
            pets.signals().pet_removed.connect_priority(move |removed| {
                selection.on_removed(removed, policy, &weak_pets);
            })
        };
        let reset_hook = {
            let selection = selection.clone();
            let weak_pets = Arc::downgrade(&pets);
            pets.signals().content_updated.connect_priority(move |_| {
                selection.on_content_updated(policy, &weak_pets);
            })
        };

        Self {
            feed: FeedController::new(pets.clone()),
            pets,
            selection,
            config,
            removal_hook,
            reset_hook,
        }
    }

    /// Number of pets.
    pub fn pets_count(&self) -> usize {
        self.pets.count()
    }

    /// Pet at `index`.
    pub fn model_at(&self, index: usize) -> Result<PetView> {
        self.pets.at(index)
    }

    /// Pet before `pet`, if any.
    pub fn model_before(&self, pet: &PetView) -> Option<PetView> {
        self.pets.before(pet)
    }

    /// Pet after `pet`, if any.
    pub fn model_after(&self, pet: &PetView) -> Option<PetView> {
        self.pets.after(pet)
    }

    /// Current index of `pet`.
    pub fn index_of(&self, pet: &PetView) -> Option<usize> {
        self.pets.index_of(pet)
    }

    /// Adds a pet named `name`.
    ///
    /// With `select_added` configured, the new pet becomes current after the
    /// collection's events have been delivered.
    pub fn add_new_pet(&self, name: impl Into<String>) -> PetView {
        let pet = self.pets.add(name);
        if self.config.select_added {
            self.selection.set(Some(pet.clone()));
        }
        pet
    }

    /// Removes the pet at `index`.
    pub fn remove_pet_at(&self, index: usize) -> Result<PetView> {
        self.pets.remove_at(index)
    }

    /// The current pet.
    ///
    /// Under [`SelectionPolicy::Retain`] this may be a pet that has since
    /// been removed.
    pub fn current_pet(&self) -> Option<PetView> {
        self.selection.get()
    }

    /// Sets or clears the current pet.
    ///
    /// Returns `true` if the pointer changed. Selecting a pet that is not in
    /// the collection is refused and returns `false`.
    pub fn set_current_pet(&self, pet: Option<PetView>) -> bool {
        if let Some(pet) = &pet {
            if self.pets.index_of(pet).is_none() {
                tracing::debug!(
                    target: targets::SELECTION,
                    id = %pet.id(),
                    "refusing to select pet not in collection"
                );
                return false;
            }
        }
        self.selection.set(pet)
    }

    /// Emitted with the new value whenever the current pet changes.
    pub fn current_pet_changed(&self) -> &Signal<Option<PetView>> {
        &self.selection.changed
    }

    /// Resolves `pet`'s image through `loader`.
    ///
    /// See [`image::request_image`] for completion semantics.
    pub fn request_image(&self, pet: &PetView, loader: &dyn ImageLoader) {
        image::request_image(&self.pets, pet, loader);
    }

    /// The card feed over this model's collection.
    pub fn feed(&self) -> &FeedController {
        &self.feed
    }

    /// The underlying collection.
    pub fn collection(&self) -> &Arc<PetCollection> {
        &self.pets
    }

    /// The collection's signals.
    pub fn signals(&self) -> &PetSignals {
        self.pets.signals()
    }

    /// The configuration this model was built with.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl Drop for AppModel {
    fn drop(&mut self) {
        let signals = self.pets.signals();
        signals.pet_removed.disconnect(self.removal_hook);
        signals.content_updated.disconnect(self.reset_hook);
    }
}
