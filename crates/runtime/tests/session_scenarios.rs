//! End-to-end scenarios: a session driven by the frame loop, with resizes
//! arriving between frames.

use lightlab_render::{DebugTextRenderer, PerspectiveCamera, RenderError, Renderer, Viewport};
use lightlab_runtime::{FixedRateSource, FrameLoop, LoopState, Session, Tick, run_loop};
use lightlab_scene::SceneGraph;
use std::time::{Duration, Instant};

/// Renderer that fails on a chosen frame.
struct FailingRenderer {
    size: (u32, u32),
    ratio: f64,
    rendered: u32,
    fail_at: u32,
}

impl Renderer for FailingRenderer {
    type Output = ();

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.ratio = ratio;
    }

    fn pixel_ratio(&self) -> f64 {
        self.ratio
    }

    fn render(&mut self, _: &SceneGraph, _: &PerspectiveCamera) -> Result<(), RenderError> {
        if self.rendered == self.fail_at {
            return Err(RenderError::OutOfMemory);
        }
        self.rendered += 1;
        Ok(())
    }
}

#[test]
fn resize_from_1024x768_to_1920x1080() {
    let mut session = Session::new(DebugTextRenderer::new(), Viewport::new(1024, 768), 1.0);
    assert!((session.camera().aspect - 1.3333).abs() < 1e-3);

    session.on_resize(1920, 1080, 1.0);
    assert!((session.camera().aspect - 1.7778).abs() < 1e-3);
    assert_eq!(session.renderer().size(), (1920, 1080));
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    let mut session = Session::new(DebugTextRenderer::new(), Viewport::new(800, 600), 3.0);
    assert_eq!(session.renderer().pixel_ratio(), 2.0);

    session.on_resize(800, 600, 1.25);
    assert_eq!(session.renderer().pixel_ratio(), 1.25);
    assert_eq!(session.renderer().drawing_buffer_size(), (1000, 750));
}

#[test]
fn repeated_resize_is_idempotent() {
    let mut session = Session::new(DebugTextRenderer::new(), Viewport::new(640, 480), 1.0);
    session.on_resize(1280, 720, 2.5);
    let camera = session.camera().clone();
    let size = session.renderer().size();
    let ratio = session.renderer().pixel_ratio();

    session.on_resize(1280, 720, 2.5);
    assert_eq!(session.camera(), &camera);
    assert_eq!(session.renderer().size(), size);
    assert_eq!(session.renderer().pixel_ratio(), ratio);
}

#[test]
fn ten_simulated_seconds_turn_sphere_one_radian() {
    let t0 = Instant::now();
    let mut session = Session::new(DebugTextRenderer::new(), Viewport::new(800, 600), 1.0);
    let mut running = FrameLoop::new().start(t0);
    // 0..=10 seconds in 100 ms steps.
    let mut source = FixedRateSource::new(t0, Duration::from_millis(100)).take_frames(101);

    let rendered = run_loop(&mut running, &mut source, |time| session.frame(time)).unwrap();
    assert_eq!(rendered, 101);
    assert_eq!(session.renderer().frames(), 101);

    let sphere = session.scene().get(session.rig().sphere).unwrap();
    assert!((sphere.transform.rotation.y - 1.0).abs() < 1e-5);
    let torus = session.scene().get(session.rig().torus).unwrap();
    assert!((torus.transform.rotation.x - 1.5).abs() < 1e-5);
}

#[test]
fn resize_between_frames_takes_effect_next_frame() {
    let t0 = Instant::now();
    let mut session = Session::new(DebugTextRenderer::new(), Viewport::new(800, 600), 1.0);
    let mut running = FrameLoop::new().start(t0);

    let first = running.tick(t0, |time| session.frame(time)).unwrap();
    session.on_resize(1600, 900, 3.0);
    let second = running
        .tick(t0 + Duration::from_millis(16), |time| session.frame(time))
        .unwrap();

    let (Tick::Frame(first), Tick::Frame(second)) = (first, second) else {
        panic!("both ticks should render");
    };
    assert!(first.starts_with("=== Frame 0 (800x600 @1.00 -> 800x600)"));
    assert!(second.starts_with("=== Frame 1 (1600x900 @2.00 -> 3200x1800)"));
}

#[test]
fn cancellation_stops_an_unbounded_source() {
    let t0 = Instant::now();
    let mut session = Session::new(DebugTextRenderer::new(), Viewport::new(320, 240), 1.0);
    let mut running = FrameLoop::new().start(t0);
    let token = running.cancel_token();
    let mut source = FixedRateSource::from_fps(t0, 60.0);

    let rendered = run_loop(&mut running, &mut source, |time| {
        let report = session.frame(time)?;
        if time.frame_index == 59 {
            token.cancel();
        }
        Ok::<_, RenderError>(report)
    })
    .unwrap();
    assert_eq!(rendered, 60);
    assert_eq!(running.state(), LoopState::Stopped);
}

#[test]
fn render_failure_is_fatal() {
    let t0 = Instant::now();
    let renderer = FailingRenderer {
        size: (0, 0),
        ratio: 1.0,
        rendered: 0,
        fail_at: 5,
    };
    let mut session = Session::new(renderer, Viewport::new(800, 600), 1.0);
    let mut running = FrameLoop::new().start(t0);
    let mut source = FixedRateSource::from_fps(t0, 60.0).take_frames(100);

    let result = run_loop(&mut running, &mut source, |time| session.frame(time));
    assert!(matches!(result, Err(RenderError::OutOfMemory)));
    assert_eq!(running.frames(), 5);
    assert_eq!(running.state(), LoopState::Stopped);
    assert_eq!(session.renderer().rendered, 5);
}

#[test]
fn zero_pixel_ratio_keeps_rendering() {
    let t0 = Instant::now();
    let mut session = Session::new(DebugTextRenderer::new(), Viewport::new(800, 600), 0.0);
    assert_eq!(session.renderer().drawing_buffer_size(), (0, 0));
    let mut running = FrameLoop::new().start(t0);
    let mut source = FixedRateSource::from_fps(t0, 60.0).take_frames(3);

    let rendered = run_loop(&mut running, &mut source, |time| session.frame(time)).unwrap();
    assert_eq!(rendered, 3);
    assert_eq!(running.state(), LoopState::Running);
    assert_eq!(session.renderer().frames(), 3);
}

#[test]
fn sub_pixel_resize_keeps_rendering() {
    let t0 = Instant::now();
    let mut session = Session::new(DebugTextRenderer::new(), Viewport::new(800, 600), 1.0);
    let mut running = FrameLoop::new().start(t0);

    assert!(session.on_resize(1, 1, 0.5));
    assert_eq!(session.renderer().drawing_buffer_size(), (0, 0));

    let tick = running.tick(t0, |time| session.frame(time)).unwrap();
    let Tick::Frame(report) = tick else {
        panic!("expected a rendered frame, got {tick:?}");
    };
    assert!(report.starts_with("=== Frame 0 (1x1 @0.50 -> 1x1)"));
    assert_eq!(running.state(), LoopState::Running);
}
