//! Reactive primitives for the pet feeder model layer.
//!
//! - **Signal/Slot System**: typed, synchronous, multicast event channels
//! - **Logging**: `tracing` target names shared by the workspace
//!
//! # Signal/Slot Example
//!
//! ```
//! use pet_feeder_core::Signal;
//!
//! let count_changed = Signal::<usize>::new();
//!
//! let conn_id = count_changed.connect(|count| {
//!     println!("Now showing {} pets", count);
//! });
//!
//! count_changed.emit(2);
//! count_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{Result, SignalError};
pub use signal::{ConnectionGuard, ConnectionId, Signal, SignalEmitter};
