//! Input plumbing between the windowing backend and the camera.
//!
//! # Invariants
//! - The camera and pipeline never implement [`InputHandler`]; a session
//!   object above them does, and the event loop feeds it.
//! - All callbacks run on one thread, one at a time.

pub mod event;
pub mod handler;
pub mod key;

pub use event::{InputEvent, ReplaySummary, replay};
pub use handler::{Control, InputHandler};
pub use key::Key;
