//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() from /erised/shutdown or a signal
//!     → server stops accepting → in-flight responses finish → exit
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM/SIGQUIT/SIGHUP → Shutdown::trigger()
//! ```
//!
//! # Design Decisions
//! - Shutdown is a capability handed to the HTTP state, never a global
//! - Responses already past header commit are allowed to complete

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::spawn_signal_listener;
