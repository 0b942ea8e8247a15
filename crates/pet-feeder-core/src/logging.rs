//! Logging conventions.
//!
//! The pet feeder crates log through the `tracing` crate and never install a
//! subscriber themselves. To see logs, install one in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("pet_feeder::model=debug")
//!     .init();
//! ```
//!
//! Every event carries one of the [`targets`] below so output can be
//! filtered per subsystem.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "pet_feeder_core";
    /// Signal emission target.
    pub const SIGNAL: &str = "pet_feeder_core::signal";
    /// Collection and controller mutations.
    pub const MODEL: &str = "pet_feeder::model";
    /// Selection pointer changes.
    pub const SELECTION: &str = "pet_feeder::model::selection";
    /// Image collaborator callbacks.
    pub const IMAGE: &str = "pet_feeder::image";
    /// Configuration loading.
    pub const CONFIG: &str = "pet_feeder::config";
}
