//! Runtime: the frame loop and the session it drives.
//!
//! # Invariants
//! - One frame callback in flight at a time; resize handling runs between
//!   frames on the same thread.
//! - Elapsed time is measured from loop start and never reset.
//! - A loop that has stopped, by cancellation or by a failed frame, never
//!   runs another frame.

mod clock;
mod frame_loop;
mod session;
mod source;

pub use clock::{Clock, FrameTime};
pub use frame_loop::{CancelToken, FrameLoop, LoopState, RunningLoop, Tick, run_loop};
pub use session::Session;
pub use source::{FixedRateSource, FrameSource};
