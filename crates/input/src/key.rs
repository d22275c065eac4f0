use serde::{Deserialize, Serialize};

/// Backend-independent key codes the demo reacts to.
///
/// Backends map their native codes onto these; anything else becomes
/// [`Key::Other`] so handlers can still report it as unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Re-derive the camera angles and re-center the pointer.
    Home,
    /// Request the event loop to exit.
    Quit,
    Other,
}

impl Key {
    /// Arrow keys translate the camera.
    pub fn is_movement(self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }
}
