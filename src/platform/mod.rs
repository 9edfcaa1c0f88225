//! Platform abstraction layer
//!
//! The collaborators the simulation consumes but does not implement:
//! - Input state (held / just-pressed queries)
//! - A monotonic clock
//! - A presenter that draws snapshots
//! - A sink that reacts to frame events (sound, screen shake, ...)

pub mod input;
pub mod time;

pub use input::{Action, InputProvider, KeyState};
pub use time::{Clock, ManualClock, SystemClock};

use crate::sim::{FrameEvent, Snapshot};

/// Draws a snapshot. Must treat it as read-only.
pub trait Presenter {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Reacts to the events of one frame. Implementations must not fail the
/// frame; a missing device simply means nothing happens.
pub trait EventSink {
    fn handle(&mut self, events: &[FrameEvent]);
}
