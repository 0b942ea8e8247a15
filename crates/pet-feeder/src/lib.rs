//! Pet Feeder - the in-memory model layer behind a pet management screen.
//!
//! The crate keeps an ordered collection of pets, exposes list and card
//! accessors for presentation, and publishes change notifications on four
//! channels: content updated, pet added, pet removed and image updated.
//!
//! # Example
//!
//! ```
//! use pet_feeder::config::ModelConfig;
//! use pet_feeder::model::AppModel;
//!
//! let app = AppModel::new(ModelConfig::default());
//!
//! app.signals().pet_added.connect(|added| {
//!     println!("render card {} for {}", added.index, added.view.name());
//! });
//! app.signals().pet_removed.connect(|removed| {
//!     println!("drop card {}", removed.index);
//! });
//!
//! app.add_new_pet("Rex");
//! app.add_new_pet("Mimi");
//! app.remove_pet_at(0)?;
//!
//! assert_eq!(app.feed().card_at(0)?.title(), "Mimi");
//! # Ok::<(), pet_feeder::ModelError>(())
//! ```

pub mod config;
mod error;
pub mod image;
pub mod model;
pub mod prelude;

pub use error::{ConfigError, ImageLoadError, ModelError, Result};
pub use pet_feeder_core::{ConnectionGuard, ConnectionId, Signal};
