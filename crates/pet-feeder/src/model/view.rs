//! Presentation-facing handles onto pet records.
//!
//! [`PetView`] is the key consumers hold on to. Clones share one record, so
//! an image update made through the collection is visible through every
//! handle. [`PetCardView`] is the card-list projection of a view.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;

use super::record::{ImageRef, PetId, PetRecord};

struct PetViewData {
    id: PetId,
    record: RwLock<PetRecord>,
}

/// A presentation wrapper bound 1:1 to a [`PetRecord`].
///
/// Equality and hashing use the record's identity only. A view stays usable
/// after its record is removed from the collection; lookups with it simply
/// report "not found".
#[derive(Clone)]
pub struct PetView {
    inner: Arc<PetViewData>,
}

impl PetView {
    pub(crate) fn new(record: PetRecord) -> Self {
        Self {
            inner: Arc::new(PetViewData {
                id: record.id(),
                record: RwLock::new(record),
            }),
        }
    }

    /// Returns the identity of the underlying record.
    pub fn id(&self) -> PetId {
        self.inner.id
    }

    /// Returns the display name.
    pub fn name(&self) -> String {
        self.inner.record.read().name().to_string()
    }

    /// Returns the current image reference.
    pub fn image(&self) -> Option<ImageRef> {
        self.inner.record.read().image().cloned()
    }

    /// Returns `true` once an image has been resolved for this pet.
    pub fn has_image(&self) -> bool {
        self.inner.record.read().image().is_some()
    }

    /// Returns a snapshot of the underlying record.
    pub fn record(&self) -> PetRecord {
        self.inner.record.read().clone()
    }

    /// Reads the underlying record without cloning it.
    pub fn with_record<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PetRecord) -> R,
    {
        f(&self.inner.record.read())
    }

    pub(crate) fn set_image(&self, image: Option<ImageRef>) -> bool {
        self.inner.record.write().set_image(image)
    }
}

impl PartialEq for PetView {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for PetView {}

impl Hash for PetView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for PetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.inner.record.read();
        f.debug_struct("PetView")
            .field("id", &record.id())
            .field("name", &record.name())
            .field("image", &record.image())
            .finish()
    }
}

/// Card-list projection of a [`PetView`].
///
/// `position` is the index the card was projected from. It is not updated
/// by later mutations; ask the controller for the live index instead.
#[derive(Clone)]
pub struct PetCardView {
    pet: PetView,
    position: usize,
}

impl PetCardView {
    pub(crate) fn new(pet: PetView, position: usize) -> Self {
        Self { pet, position }
    }

    /// Returns the identity of the underlying record.
    pub fn id(&self) -> PetId {
        self.pet.id()
    }

    /// Card title: the pet's display name.
    pub fn title(&self) -> String {
        self.pet.name()
    }

    /// Returns the image to show on the card, if resolved.
    pub fn image(&self) -> Option<ImageRef> {
        self.pet.image()
    }

    /// Index the card was projected from.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The pet view this card projects.
    pub fn pet(&self) -> &PetView {
        &self.pet
    }

    /// Consumes the card, returning the underlying view.
    pub fn into_pet(self) -> PetView {
        self.pet
    }
}

impl PartialEq for PetCardView {
    fn eq(&self, other: &Self) -> bool {
        self.pet == other.pet
    }
}

impl Eq for PetCardView {}

impl Hash for PetCardView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pet.hash(state);
    }
}

impl fmt::Debug for PetCardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetCardView")
            .field("id", &self.id())
            .field("position", &self.position)
            .finish()
    }
}
