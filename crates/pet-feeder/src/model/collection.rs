//! The ordered pet collection.
//!
//! `PetCollection` owns the sequence of [`PetView`]s, answers index and
//! identity queries against the current order, and publishes a
//! [`PetSignals`] event after every mutation.
//!
//! Mutating methods take `&self`: the sequence sits behind a lock that is
//! released before any event is published, so slots may call back into the
//! collection (including mutating it). Nested mutations are delivered
//! depth-first, before the outer emission continues.

use std::fmt;

use parking_lot::RwLock;
use pet_feeder_core::logging::targets;

use super::record::{IdentitySource, ImageRef, PetId, PetRecord, SequentialIds};
use super::signals::{ContentUpdated, ImageUpdated, PetAdded, PetRemoved, PetSignals};
use super::view::PetView;
use crate::error::{ModelError, Result};

/// An ordered collection of pets with change notification.
///
/// # Example
///
/// ```
/// use pet_feeder::model::PetCollection;
///
/// let pets = PetCollection::new();
/// pets.signals().pet_added.connect(|added| {
///     println!("{} added at {}", added.view.name(), added.index);
/// });
///
/// let rex = pets.add("Rex");
/// let mimi = pets.add("Mimi");
///
/// assert_eq!(pets.count(), 2);
/// assert_eq!(pets.index_of(&mimi), Some(1));
/// assert_eq!(pets.before(&mimi), Some(rex.clone()));
///
/// pets.remove_at(0).unwrap();
/// assert_eq!(pets.index_of(&rex), None);
/// ```
pub struct PetCollection {
    pets: RwLock<Vec<PetView>>,
    identities: Box<dyn IdentitySource>,
    signals: PetSignals,
}

impl Default for PetCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl PetCollection {
    /// Creates an empty collection using [`SequentialIds`].
    pub fn new() -> Self {
        Self::with_identity_source(SequentialIds)
    }

    /// Creates an empty collection with a custom identity source.
    pub fn with_identity_source<S>(identities: S) -> Self
    where
        S: IdentitySource + 'static,
    {
        Self {
            pets: RwLock::new(Vec::new()),
            identities: Box::new(identities),
            signals: PetSignals::new(),
        }
    }

    /// Returns the number of pets.
    pub fn count(&self) -> usize {
        self.pets.read().len()
    }

    /// Returns `true` if the collection holds no pets.
    pub fn is_empty(&self) -> bool {
        self.pets.read().is_empty()
    }

    /// Returns the pet at `index`.
    ///
    /// Fails with [`ModelError::IndexOutOfBounds`] if `index >= count()`.
    pub fn at(&self, index: usize) -> Result<PetView> {
        let pets = self.pets.read();
        pets.get(index)
            .cloned()
            .ok_or(ModelError::IndexOutOfBounds {
                index,
                count: pets.len(),
            })
    }

    /// Returns the pet immediately before `view`.
    ///
    /// `None` if `view` is first or no longer in the collection.
    pub fn before(&self, view: &PetView) -> Option<PetView> {
        let pets = self.pets.read();
        let index = position(&pets, view)?;
        index.checked_sub(1).and_then(|prev| pets.get(prev).cloned())
    }

    /// Returns the pet immediately after `view`.
    ///
    /// `None` if `view` is last or no longer in the collection.
    pub fn after(&self, view: &PetView) -> Option<PetView> {
        let pets = self.pets.read();
        let index = position(&pets, view)?;
        pets.get(index + 1).cloned()
    }

    /// Returns the current position of `view`, matched by identity.
    pub fn index_of(&self, view: &PetView) -> Option<usize> {
        position(&self.pets.read(), view)
    }

    /// Looks a pet up by identity.
    pub fn find(&self, id: PetId) -> Option<PetView> {
        self.pets.read().iter().find(|pet| pet.id() == id).cloned()
    }

    /// Returns a snapshot of the current order.
    pub fn views(&self) -> Vec<PetView> {
        self.pets.read().clone()
    }

    /// Appends a new pet with a fresh identity.
    ///
    /// Publishes `pet_added` with index `count() - 1`, then `content_updated`.
    pub fn add(&self, name: impl Into<String>) -> PetView {
        let view = self.create(name);
        let (index, count) = {
            let mut pets = self.pets.write();
            pets.push(view.clone());
            (pets.len() - 1, pets.len())
        };

        tracing::debug!(target: targets::MODEL, id = %view.id(), index, "pet added");
        self.signals.pet_added.emit(PetAdded {
            view: view.clone(),
            index,
        });
        self.signals.content_updated.emit(ContentUpdated { count });
        view
    }

    /// Removes the pet at `index`; later pets shift down by one.
    ///
    /// Publishes `pet_removed` with the former index and the pet now standing
    /// in for it, then `content_updated`.
    /// Fails with [`ModelError::IndexOutOfBounds`] without publishing
    /// anything if `index >= count()`.
    pub fn remove_at(&self, index: usize) -> Result<PetView> {
        let (view, neighbor, count) = {
            let mut pets = self.pets.write();
            if index >= pets.len() {
                return Err(ModelError::IndexOutOfBounds {
                    index,
                    count: pets.len(),
                });
            }
            let view = pets.remove(index);
            let neighbor = pets.get(index).or_else(|| pets.last()).cloned();
            (view, neighbor, pets.len())
        };

        tracing::debug!(target: targets::MODEL, id = %view.id(), index, "pet removed");
        self.signals.pet_removed.emit(PetRemoved {
            view: view.clone(),
            index,
            neighbor,
        });
        self.signals.content_updated.emit(ContentUpdated { count });
        Ok(view)
    }

    /// Replaces the image of the pet `view` refers to.
    ///
    /// Publishes `image_updated`, then `content_updated`, and returns `true`
    /// if the image changed. Returns `false` without publishing if the pet is
    /// no longer present or already has this image.
    pub fn update_image(&self, view: &PetView, image: Option<ImageRef>) -> bool {
        let (pet, index, count) = {
            let pets = self.pets.read();
            let Some(index) = position(&pets, view) else {
                tracing::debug!(
                    target: targets::MODEL,
                    id = %view.id(),
                    "image update for pet no longer in collection"
                );
                return false;
            };
            (pets[index].clone(), index, pets.len())
        };

        if !pet.set_image(image) {
            return false;
        }

        tracing::debug!(target: targets::MODEL, id = %pet.id(), index, "pet image updated");
        self.signals.image_updated.emit(ImageUpdated { view: pet, index });
        self.signals.content_updated.emit(ContentUpdated { count });
        true
    }

    /// Replaces every pet with fresh records named `names`, in order.
    ///
    /// This is a reset: only `content_updated` is published. Views of the
    /// previous pets become stale.
    pub fn replace_all<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fresh: Vec<PetView> = names.into_iter().map(|name| self.create(name)).collect();
        let count = {
            let mut pets = self.pets.write();
            *pets = fresh;
            pets.len()
        };

        tracing::debug!(target: targets::MODEL, count, "collection reset");
        self.signals.content_updated.emit(ContentUpdated { count });
    }

    /// Removes every pet. Publishes only `content_updated`.
    pub fn clear(&self) {
        self.replace_all(std::iter::empty::<String>());
    }

    /// Returns the collection's change signals.
    pub fn signals(&self) -> &PetSignals {
        &self.signals
    }

    fn create(&self, name: impl Into<String>) -> PetView {
        PetView::new(PetRecord::new(self.identities.next_id(), name))
    }
}

impl fmt::Debug for PetCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetCollection")
            .field("pets", &*self.pets.read())
            .finish_non_exhaustive()
    }
}

fn position(pets: &[PetView], view: &PetView) -> Option<usize> {
    pets.iter().position(|pet| pet == view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn collection_of(names: &[&str]) -> PetCollection {
        let pets = PetCollection::new();
        pets.replace_all(names.iter().copied());
        pets
    }

    fn names(pets: &PetCollection) -> Vec<String> {
        pets.views().iter().map(PetView::name).collect()
    }

    #[test]
    fn test_add_appends_and_signals() {
        let pets = PetCollection::new();
        let added = Arc::new(Mutex::new(Vec::new()));

        let recv = added.clone();
        pets.signals().pet_added.connect(move |event| {
            recv.lock().push((event.view.name(), event.index));
        });

        pets.add("Rex");
        pets.add("Mimi");

        assert_eq!(pets.count(), 2);
        assert_eq!(pets.at(1).unwrap().name(), "Mimi");
        assert_eq!(
            *added.lock(),
            vec![("Rex".to_string(), 0), ("Mimi".to_string(), 1)]
        );
    }

    #[test]
    fn test_at_out_of_bounds() {
        let pets = collection_of(&["Rex", "Mimi"]);
        assert_eq!(
            pets.at(5),
            Err(ModelError::IndexOutOfBounds { index: 5, count: 2 })
        );
        assert_eq!(
            pets.at(2),
            Err(ModelError::IndexOutOfBounds { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_remove_shifts_later_elements() {
        let pets = collection_of(&["A", "B", "C", "D"]);
        let before: Vec<PetView> = pets.views();

        let removed = pets.remove_at(1).unwrap();
        assert_eq!(removed, before[1]);
        assert_eq!(pets.count(), 3);

        for i in 2..before.len() {
            assert_eq!(pets.at(i - 1).unwrap(), before[i]);
        }
        assert_eq!(pets.index_of(&removed), None);
    }

    #[test]
    fn test_removed_payload_names_neighbor() {
        let pets = collection_of(&["A", "B", "C"]);
        let neighbors = Arc::new(Mutex::new(Vec::new()));

        let recv = neighbors.clone();
        pets.signals().pet_removed.connect(move |event| {
            recv.lock().push(event.neighbor.as_ref().map(PetView::name));
        });

        pets.remove_at(1).unwrap();
        pets.remove_at(1).unwrap();
        pets.remove_at(0).unwrap();

        assert_eq!(
            *neighbors.lock(),
            vec![Some("C".to_string()), Some("A".to_string()), None]
        );
    }

    #[test]
    fn test_remove_out_of_bounds_publishes_nothing() {
        let pets = collection_of(&["Rex"]);
        let events = Arc::new(Mutex::new(0));

        let recv = events.clone();
        pets.signals().pet_removed.connect(move |_| *recv.lock() += 1);
        let recv = events.clone();
        pets.signals().content_updated.connect(move |_| *recv.lock() += 1);

        assert_eq!(
            pets.remove_at(1),
            Err(ModelError::IndexOutOfBounds { index: 1, count: 1 })
        );
        assert_eq!(pets.count(), 1);
        assert_eq!(*events.lock(), 0);
    }

    #[test]
    fn test_index_of_round_trip() {
        let pets = collection_of(&["A", "B", "C"]);
        for i in 0..pets.count() {
            assert_eq!(pets.index_of(&pets.at(i).unwrap()), Some(i));
        }
    }

    #[test]
    fn test_neighbors() {
        let pets = collection_of(&["A", "B", "C"]);
        let a = pets.at(0).unwrap();
        let b = pets.at(1).unwrap();
        let c = pets.at(2).unwrap();

        assert_eq!(pets.before(&a), None);
        assert_eq!(pets.after(&c), None);
        assert_eq!(pets.before(&b), Some(a.clone()));
        assert_eq!(pets.after(&b), Some(c.clone()));

        // Removal is reflected immediately.
        pets.remove_at(1).unwrap();
        assert_eq!(pets.after(&a), Some(c.clone()));
        assert_eq!(pets.before(&c), Some(a));
        assert_eq!(pets.before(&b), None);
        assert_eq!(pets.after(&b), None);
    }

    #[test]
    fn test_event_order_per_mutation() {
        let pets = PetCollection::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let recv = log.clone();
        pets.signals()
            .pet_added
            .connect(move |e| recv.lock().push(format!("added {}", e.index)));
        let recv = log.clone();
        pets.signals()
            .pet_removed
            .connect(move |e| recv.lock().push(format!("removed {}", e.index)));
        let recv = log.clone();
        pets.signals()
            .image_updated
            .connect(move |e| recv.lock().push(format!("image {}", e.index)));
        let recv = log.clone();
        pets.signals()
            .content_updated
            .connect(move |e| recv.lock().push(format!("content {}", e.count)));

        let rex = pets.add("Rex");
        pets.add("Mimi");
        pets.update_image(&rex, Some(ImageRef::new("rex.png")));
        pets.remove_at(0).unwrap();
        pets.replace_all(["Bo"]);

        assert_eq!(
            *log.lock(),
            vec![
                "added 0",
                "content 1",
                "added 1",
                "content 2",
                "image 0",
                "content 2",
                "removed 0",
                "content 1",
                "content 1",
            ]
        );
    }

    #[test]
    fn test_update_image() {
        let pets = collection_of(&["Rex", "Mimi"]);
        let mimi = pets.at(1).unwrap();
        let updates = Arc::new(Mutex::new(Vec::new()));

        let recv = updates.clone();
        pets.signals().image_updated.connect(move |event| {
            recv.lock().push((event.view.clone(), event.index));
        });

        assert!(pets.update_image(&mimi, Some(ImageRef::new("mimi.jpg"))));
        assert!(!pets.update_image(&mimi, Some(ImageRef::new("mimi.jpg"))));
        assert_eq!(mimi.image(), Some(ImageRef::new("mimi.jpg")));

        let updates = updates.lock();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0], (mimi.clone(), 1));
        assert!(updates[0].0.has_image());
    }

    #[test]
    fn test_update_image_on_stale_view() {
        let pets = collection_of(&["Rex"]);
        let rex = pets.remove_at(0).unwrap();
        let fired = Arc::new(Mutex::new(false));

        let recv = fired.clone();
        pets.signals().image_updated.connect(move |_| *recv.lock() = true);

        assert!(!pets.update_image(&rex, Some(ImageRef::new("rex.png"))));
        assert!(!*fired.lock());
        assert!(!rex.has_image());
    }

    #[test]
    fn test_replace_all_and_clear() {
        let pets = collection_of(&["Rex"]);
        let old = pets.at(0).unwrap();
        let added = Arc::new(Mutex::new(0));

        let recv = added.clone();
        pets.signals().pet_added.connect(move |_| *recv.lock() += 1);

        pets.replace_all(["Rex", "Mimi"]);
        assert_eq!(names(&pets), vec!["Rex", "Mimi"]);
        // Fresh identities, even for a reused name.
        assert_eq!(pets.index_of(&old), None);
        assert_eq!(*added.lock(), 0);

        pets.clear();
        assert!(pets.is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let pets = collection_of(&["Rex", "Mimi"]);
        let mimi = pets.at(1).unwrap();
        assert_eq!(pets.find(mimi.id()), Some(mimi.clone()));

        pets.remove_at(1).unwrap();
        assert_eq!(pets.find(mimi.id()), None);
    }

    #[test]
    fn test_custom_identity_source() {
        struct Counting(AtomicU64);

        impl IdentitySource for Counting {
            fn next_id(&self) -> PetId {
                PetId::from_raw(self.0.fetch_add(10, Ordering::Relaxed))
            }
        }

        let pets = PetCollection::with_identity_source(Counting(AtomicU64::new(100)));
        assert_eq!(pets.add("Rex").id(), PetId::from_raw(100));
        assert_eq!(pets.add("Mimi").id(), PetId::from_raw(110));
    }

    #[test]
    fn test_reentrant_mutation_from_slot() {
        let pets = Arc::new(PetCollection::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        // The first added pet gets a companion, added from inside the slot.
        let weak = Arc::downgrade(&pets);
        let recv = log.clone();
        pets.signals().pet_added.connect(move |event| {
            recv.lock().push((event.view.name(), event.index));
            if event.view.name() == "Rex" {
                if let Some(pets) = weak.upgrade() {
                    pets.add("Rex's friend");
                }
            }
        });

        pets.add("Rex");

        assert_eq!(names(&pets), vec!["Rex", "Rex's friend"]);
        assert_eq!(
            *log.lock(),
            vec![("Rex".to_string(), 0), ("Rex's friend".to_string(), 1)]
        );
    }
}
