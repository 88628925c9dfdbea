//! Editing sessions
//!
//! A session is the explicit handle for one widget instance: its text,
//! annotation store, selection state and last rendered overlay. The
//! registry lets many sessions coexist without sharing state.

mod instance;
mod registry;
mod selection;

pub use instance::{Session, SessionId, SessionSummary};
pub use registry::{RegistryError, SessionHandle, SessionRegistry};
pub use selection::{SelectionEvent, SelectionEventKind, SelectionTracker};
