//! Typed multicast event channels.
//!
//! A [`Signal<Args>`] is a broadcast stream with one payload type. Slots
//! (closures) connect to it and are invoked synchronously, in subscription
//! order, every time the signal is emitted. There is no buffering: a slot
//! connected after an emission never sees it.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The channel itself
//! - [`ConnectionId`] - Returned by [`Signal::connect`], used to disconnect
//! - [`ConnectionGuard`] - Scoped connection that disconnects on drop
//! - [`SignalEmitter`] - Type-erased access for bulk operations over channels
//!
//! # Priority slots
//!
//! Slots connected with [`Signal::connect_priority`] run ahead of every slot
//! connected with [`Signal::connect`], whenever either was connected. An owner
//! that must observe an event before its other subscribers uses them.
//!
//! # Reentrancy
//!
//! The connection table is snapshotted before delivery and the internal lock
//! is released while slots run. A slot may therefore emit, connect to or
//! disconnect from the same signal; table changes apply from the next
//! emission onward.
//!
//! # Example
//!
//! ```
//! use pet_feeder_core::Signal;
//!
//! let renamed = Signal::<String>::new();
//!
//! let conn_id = renamed.connect(|name| {
//!     println!("Pet renamed to: {}", name);
//! });
//!
//! renamed.emit("Rex".to_string());
//! renamed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::SignalError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Connection table.
///
/// Slot-map keys get reused after removal, so delivery order is kept in
/// separate lists instead of relying on slot-map iteration. `priority` is
/// delivered before `order`.
struct Connections<Args> {
    slots: SlotMap<ConnectionId, Slot<Args>>,
    priority: Vec<ConnectionId>,
    order: Vec<ConnectionId>,
}

impl<Args> Connections<Args> {
    fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            priority: Vec::new(),
            order: Vec::new(),
        }
    }

    fn remove(&mut self, id: ConnectionId) -> bool {
        if self.slots.remove(id).is_some() {
            self.priority.retain(|&other| other != id);
            self.order.retain(|&other| other != id);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.priority.clear();
        self.order.clear();
    }

    fn snapshot(&self) -> Vec<Slot<Args>> {
        self.priority
            .iter()
            .chain(&self.order)
            .filter_map(|id| self.slots.get(*id).cloned())
            .collect()
    }
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, every connected slot is invoked with a reference
/// to the payload before `emit` returns.
///
/// # Type Parameter
///
/// - `Args`: The payload type passed to connected slots. Use `()` for signals
///   without a payload.
pub struct Signal<Args> {
    /// All active connections, in subscription order.
    connections: Mutex<Connections<Args>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections::new()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Slots are invoked in the order they were connected. Returns a
    /// `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use pet_feeder_core::Signal;
    ///
    /// let signal = Signal::<usize>::new();
    /// let id = signal.connect(|count| println!("{} pets", count));
    /// signal.emit(3);
    /// assert!(signal.disconnect(id));
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        let id = connections.slots.insert(Arc::new(slot));
        connections.order.push(id);
        id
    }

    /// Connect a slot that runs before every slot connected with
    /// [`connect`](Self::connect).
    ///
    /// Priority slots run among themselves in the order they were connected.
    ///
    /// # Example
    ///
    /// ```
    /// use pet_feeder_core::Signal;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let signal = Signal::<()>::new();
    /// let log = Arc::new(Mutex::new(Vec::new()));
    ///
    /// let l = log.clone();
    /// signal.connect(move |_| l.lock().unwrap().push("view"));
    /// let l = log.clone();
    /// signal.connect_priority(move |_| l.lock().unwrap().push("owner"));
    ///
    /// signal.emit(());
    /// assert_eq!(*log.lock().unwrap(), ["owner", "view"]);
    /// ```
    pub fn connect_priority<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        let id = connections.slots.insert(Arc::new(slot));
        connections.priority.push(id);
        id
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id)
    }

    /// Disconnect a slot, reporting an unknown ID as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().slots.len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing. Emissions made while
    /// blocked are dropped, not replayed.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in subscription order.
    ///
    /// Every slot has run by the time this returns. Does nothing while the
    /// signal is blocked.
    #[tracing::instrument(skip_all, target = "pet_feeder_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        // Release the lock before delivery so slots can reenter.
        let slots = self.connections.lock().snapshot();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
    }

    /// Connect a slot that is disconnected when the returned guard drops.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }
}

/// Type-erased signal access.
///
/// Lets a group of differently-typed channels be blocked or cleared together.
pub trait SignalEmitter: Send + Sync {
    /// Disconnect a connection by ID.
    fn disconnect(&self, id: ConnectionId) -> bool;

    /// Disconnect all connections.
    fn disconnect_all(&self);

    /// Get the number of connections.
    fn connection_count(&self) -> usize;

    /// Check if blocked.
    fn is_blocked(&self) -> bool;

    /// Set blocked state.
    fn set_blocked(&self, blocked: bool);
}

impl<Args: 'static> SignalEmitter for Signal<Args> {
    fn disconnect(&self, id: ConnectionId) -> bool {
        Signal::disconnect(self, id)
    }

    fn disconnect_all(&self) {
        Signal::disconnect_all(self);
    }

    fn connection_count(&self) -> usize {
        Signal::connection_count(self)
    }

    fn is_blocked(&self) -> bool {
        Signal::is_blocked(self)
    }

    fn set_blocked(&self, blocked: bool) {
        Signal::set_blocked(self, blocked);
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`]. The guard borrows the signal, so
/// the borrow checker guarantees the signal outlives it.
///
/// # Example
///
/// ```
/// use pet_feeder_core::Signal;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<usize>::new();
/// let total = Arc::new(AtomicUsize::new(0));
/// {
///     let total = total.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         total.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(2);
/// }
/// signal.emit(5); // guard dropped, nothing connected
/// assert_eq!(total.load(Ordering::SeqCst), 2);
/// ```
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}
