//! Pet records and identity.
//!
//! A [`PetRecord`] is the canonical data for one pet. Its [`PetId`] is
//! assigned once, at construction, by an [`IdentitySource`] and is the only
//! thing equality and lookup look at.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter backing [`SequentialIds`].
static NEXT_PET_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a pet record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PetId(u64);

impl PetId {
    /// Creates an identity from a raw value.
    ///
    /// Custom [`IdentitySource`]s use this; callers must not hand out the
    /// same value twice.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pet#{}", self.0)
    }
}

/// Assigns identities to newly added pets.
pub trait IdentitySource: Send + Sync {
    /// Returns an identity that has never been returned before.
    fn next_id(&self) -> PetId;
}

/// Default identity source: a process-wide monotonic counter starting at 1.
///
/// Identities are unique across every collection in the process, so a view
/// taken from one collection never matches a record in another.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialIds;

impl IdentitySource for SequentialIds {
    fn next_id(&self) -> PetId {
        PetId(NEXT_PET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Reference to a pet's image, resolved by the image collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    /// Creates an image reference from a URI or path.
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Returns the location string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The canonical data for one pet.
#[derive(Debug, Clone)]
pub struct PetRecord {
    id: PetId,
    name: String,
    image: Option<ImageRef>,
}

impl PetRecord {
    /// Creates a record without an image.
    pub fn new(id: PetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
        }
    }

    /// Returns the record's identity.
    pub fn id(&self) -> PetId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the associated image, if one has been resolved.
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    /// Replaces the image, returning `true` if it changed.
    pub(crate) fn set_image(&mut self, image: Option<ImageRef>) -> bool {
        if self.image == image {
            return false;
        }
        self.image = image;
        true
    }
}

impl PartialEq for PetRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PetRecord {}

impl Hash for PetRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
