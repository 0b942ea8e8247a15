//! Prelude module for Pet Feeder.
//!
//! Re-exports the types a presentation layer usually needs:
//!
//! ```
//! use pet_feeder::prelude::*;
//!
//! let app = AppModel::new(ModelConfig::default());
//! let rex: PetView = app.add_new_pet("Rex");
//! assert_eq!(app.index_of(&rex), Some(0));
//! ```

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use pet_feeder_core::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    AppModel, ContentUpdated, FeedController, ImageRef, ImageUpdated, PetAdded, PetCardView,
    PetCollection, PetId, PetRemoved, PetView,
};

// ============================================================================
// Collaborators and Configuration
// ============================================================================

pub use crate::config::{ModelConfig, SelectionPolicy};
pub use crate::image::{ImageCallback, ImageLoader};
pub use crate::ModelError;
