use crate::clock::{Clock, FrameTime};
use crate::source::FrameSource;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Shared flag that stops a running loop before its next frame.
///
/// Clones observe the same flag, so a token handed to another thread or a
/// window-close handler cancels the loop that issued it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Result of asking a running loop for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick<T> {
    /// The frame callback ran and produced this value.
    Frame(T),
    /// The loop has stopped; nothing ran.
    Stopped,
}

/// A frame loop that has not started yet.
#[derive(Debug, Default)]
pub struct FrameLoop {
    token: CancelToken,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Idle`, or `Stopped` once the token has been cancelled: a loop
    /// cancelled before it starts never runs a frame.
    pub fn state(&self) -> LoopState {
        if self.token.is_cancelled() {
            LoopState::Stopped
        } else {
            LoopState::Idle
        }
    }

    /// Token that cancels this loop, usable before or after it starts.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Start the loop. Elapsed time is measured from `now`.
    pub fn start(self, now: Instant) -> RunningLoop {
        tracing::debug!("frame loop started");
        RunningLoop {
            clock: Clock::start(now),
            token: self.token,
            last_elapsed: 0.0,
            frames: 0,
            stopped: false,
        }
    }
}

/// A started frame loop.
///
/// Each [`RunningLoop::tick`] runs at most one frame callback. The loop stops
/// for good once its token is cancelled or a callback fails.
#[derive(Debug)]
pub struct RunningLoop {
    clock: Clock,
    token: CancelToken,
    last_elapsed: f64,
    frames: u64,
    stopped: bool,
}

impl RunningLoop {
    pub fn state(&self) -> LoopState {
        if self.stopped || self.token.is_cancelled() {
            LoopState::Stopped
        } else {
            LoopState::Running
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame at `now`.
    ///
    /// A callback error stops the loop and is returned unchanged; later ticks
    /// return [`Tick::Stopped`].
    pub fn tick<T, E, F>(&mut self, now: Instant, frame: F) -> Result<Tick<T>, E>
    where
        F: FnOnce(FrameTime) -> Result<T, E>,
    {
        if self.state() == LoopState::Stopped {
            if !self.stopped {
                self.stopped = true;
                tracing::info!(frames = self.frames, "frame loop cancelled");
            }
            return Ok(Tick::Stopped);
        }

        let elapsed = self.clock.elapsed_secs(now).max(self.last_elapsed);
        let time = FrameTime {
            elapsed,
            delta: (elapsed - self.last_elapsed) as f32,
            frame_index: self.frames,
        };

        match frame(time) {
            Ok(value) => {
                self.frames += 1;
                self.last_elapsed = elapsed;
                Ok(Tick::Frame(value))
            }
            Err(err) => {
                self.stopped = true;
                tracing::error!(frame = time.frame_index, "frame failed, stopping loop");
                Err(err)
            }
        }
    }
}

/// Drive `running` from `source` until the source runs dry or the loop stops.
///
/// Returns the number of frames rendered by this call.
pub fn run_loop<S, F, T, E>(running: &mut RunningLoop, source: &mut S, mut frame: F) -> Result<u64, E>
where
    S: FrameSource + ?Sized,
    F: FnMut(FrameTime) -> Result<T, E>,
{
    let mut rendered = 0;
    while let Some(now) = source.next_frame() {
        match running.tick(now, &mut frame)? {
            Tick::Frame(_) => rendered += 1,
            Tick::Stopped => break,
        }
    }
    Ok(rendered)
}
