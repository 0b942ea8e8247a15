//! The pet model: records, views, the collection and its controllers.
//!
//! # Core Types
//!
//! - `PetRecord` / `PetId`: the canonical data for one pet and its identity
//! - `PetView`: presentation handle used as the lookup key
//! - `PetCardView`: card-list projection of a view
//! - `PetCollection`: the ordered collection and its four signals
//! - `FeedController`: card projection over a collection
//! - `AppModel`: aggregator that also owns the current-pet selection
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐  reads/mutations  ┌──────────────────┐
//! │ Presentation │──────────────────>│ AppModel         │
//! │              │                   │  ├ FeedController│
//! │              │                   │  └ selection     │
//! │              │                   └────────┬─────────┘
//! │              │                            │
//! │              │     PetSignals     ┌───────v─────────┐
//! │              │<───────────────────│ PetCollection   │
//! └──────────────┘                    └─────────────────┘
//! ```

mod app;
mod collection;
mod feed;
mod record;
mod signals;
mod view;

pub use app::AppModel;
pub use collection::PetCollection;
pub use feed::FeedController;
pub use record::{IdentitySource, ImageRef, PetId, PetRecord, SequentialIds};
pub use signals::{ContentUpdated, ImageUpdated, PetAdded, PetRemoved, PetSignals};
pub use view::{PetCardView, PetView};
