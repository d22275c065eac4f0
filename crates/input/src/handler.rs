use crate::key::Key;

/// What the event loop should do after a keyboard callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// The three callbacks an event-loop owner provides.
///
/// The desktop app feeds it from winit events; the CLI feeds it from
/// scripted replays.
pub trait InputHandler {
    type Error;

    /// A key was pressed.
    fn on_keyboard(&mut self, key: Key) -> Result<Control, Self::Error>;

    /// The pointer moved to `(x, y)` in window pixels.
    fn on_mouse(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    /// One frame tick.
    fn on_display(&mut self) -> Result<(), Self::Error>;
}
