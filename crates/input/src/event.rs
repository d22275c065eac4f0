use serde::{Deserialize, Serialize};

use crate::handler::{Control, InputHandler};
use crate::key::Key;

/// A recorded input event.
///
/// Serialized as externally tagged JSON, e.g. `{"key": "up"}`,
/// `{"mouse": {"x": 50.0, "y": 360.0}}`, `{"frames": 10}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    Key(Key),
    Mouse { x: f64, y: f64 },
    /// Run this many display ticks.
    Frames(u32),
}

/// Counts from a finished [`replay`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub keys: usize,
    pub mouse_moves: usize,
    pub frames: u64,
    /// True when a key callback asked to exit before the script ended.
    pub exited: bool,
}

/// Feed `events` to `handler` in order, stopping early on [`Control::Exit`].
pub fn replay<H: InputHandler>(
    handler: &mut H,
    events: &[InputEvent],
) -> Result<ReplaySummary, H::Error> {
    let mut summary = ReplaySummary::default();
    for event in events {
        match *event {
            InputEvent::Key(key) => {
                summary.keys += 1;
                if handler.on_keyboard(key)? == Control::Exit {
                    tracing::debug!("replay stopped by {key:?}");
                    summary.exited = true;
                    break;
                }
            }
            InputEvent::Mouse { x, y } => {
                summary.mouse_moves += 1;
                handler.on_mouse(x, y)?;
            }
            InputEvent::Frames(n) => {
                for _ in 0..n {
                    handler.on_display()?;
                }
                summary.frames += u64::from(n);
            }
        }
    }
    Ok(summary)
}
