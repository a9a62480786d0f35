use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use lightlab_render::{DebugTextRenderer, MAX_PIXEL_RATIO, RenderError, Renderer, Viewport};
use lightlab_runtime::{FixedRateSource, FrameLoop, Session, run_loop};
use lightlab_tools::{SceneInspector, SceneSummary};
use serde::Serialize;
use std::str::FromStr;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightlab-cli", about = "Headless runner for the lighting demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and demo scene info
    Info,
    /// Run the frame loop against a simulated display
    Simulate {
        /// Simulated seconds to run
        #[arg(short, long, default_value = "10")]
        seconds: f64,
        /// Simulated refresh rate
        #[arg(short, long, default_value = "60")]
        fps: f64,
        /// Host device pixel ratio
        #[arg(long, default_value = "1")]
        device_pixel_ratio: f64,
        /// Viewport width in logical pixels
        #[arg(long, default_value = "1280")]
        width: u32,
        /// Viewport height in logical pixels
        #[arg(long, default_value = "720")]
        height: u32,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply a resize and print camera and renderer state before and after
    Resize {
        /// Starting viewport, e.g. 1024x768
        #[arg(long, default_value = "1024x768")]
        from: Size,
        /// Target viewport, e.g. 1920x1080
        #[arg(long, default_value = "1920x1080")]
        to: Size,
        /// Host device pixel ratio
        #[arg(long, default_value = "1")]
        device_pixel_ratio: f64,
    },
}

/// `WIDTHxHEIGHT` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Size {
    width: u32,
    height: u32,
}

impl FromStr for Size {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((w, h)) = s.split_once(['x', 'X']) else {
            bail!("expected WIDTHxHEIGHT, got {s:?}");
        };
        Ok(Self {
            width: w.trim().parse().with_context(|| format!("bad width in {s:?}"))?,
            height: h.trim().parse().with_context(|| format!("bad height in {s:?}"))?,
        })
    }
}

#[derive(Serialize)]
struct SimulationReport {
    frames: u64,
    seconds: f64,
    viewport: [u32; 2],
    pixel_ratio: f64,
    drawing_buffer: [u32; 2],
    rotations: Vec<NodeRotation>,
    scene: SceneSummary,
}

#[derive(Serialize)]
struct NodeRotation {
    name: String,
    rotation: [f32; 3],
}

fn simulate(
    seconds: f64,
    fps: f64,
    device_pixel_ratio: f64,
    viewport: Viewport,
) -> anyhow::Result<SimulationReport> {
    if viewport.is_empty() {
        bail!("viewport must have a non-zero size, got {viewport}");
    }
    if !(seconds.is_finite() && seconds >= 0.0) {
        bail!("seconds must be a non-negative number, got {seconds}");
    }
    if !(fps.is_finite() && fps > 0.0) {
        bail!("fps must be positive, got {fps}");
    }

    let start = Instant::now();
    let mut session = Session::new(DebugTextRenderer::new(), viewport, device_pixel_ratio);
    let mut running = FrameLoop::new().start(start);
    // Frames at t = 0, 1/fps, ... up to `seconds`.
    let frame_count = (seconds * fps + 1e-9).floor() as u64 + 1;
    let mut source = FixedRateSource::from_fps(start, fps).take_frames(frame_count);

    let mut last_elapsed = 0.0;
    let frames = run_loop(&mut running, &mut source, |time| {
        let report = session.frame(time)?;
        tracing::trace!("{report}");
        last_elapsed = time.elapsed;
        Ok::<_, RenderError>(())
    })?;

    let scene = session.scene();
    let rotations = session
        .rig()
        .spinning()
        .into_iter()
        .filter_map(|id| {
            let node = scene.get(id)?;
            Some(NodeRotation {
                name: node.name.clone(),
                rotation: SceneInspector::rotation(scene, id)?,
            })
        })
        .collect();
    let (bw, bh) = session.renderer().drawing_buffer_size();

    Ok(SimulationReport {
        frames,
        seconds: last_elapsed,
        viewport: [viewport.width, viewport.height],
        pixel_ratio: session.renderer().pixel_ratio(),
        drawing_buffer: [bw, bh],
        rotations,
        scene: SceneInspector::summary(scene),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("lightlab-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("max pixel ratio: {MAX_PIXEL_RATIO}");
            let session = Session::new(DebugTextRenderer::new(), Viewport::new(1280, 720), 1.0);
            println!("{}", SceneInspector::summary(session.scene()));
            for (id, name) in SceneInspector::list_nodes(session.scene()) {
                println!("  {} {name}", id.short());
            }
        }
        Commands::Simulate {
            seconds,
            fps,
            device_pixel_ratio,
            width,
            height,
            json,
        } => {
            let report = simulate(seconds, fps, device_pixel_ratio, Viewport::new(width, height))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Simulated {} frames over {:.3}s at {}x{} (pixel ratio {:.2}, buffer {}x{})",
                    report.frames,
                    report.seconds,
                    report.viewport[0],
                    report.viewport[1],
                    report.pixel_ratio,
                    report.drawing_buffer[0],
                    report.drawing_buffer[1]
                );
                for node in &report.rotations {
                    let [x, y, z] = node.rotation;
                    println!("  {}: rotation=({x:.4}, {y:.4}, {z:.4})", node.name);
                }
                println!("{}", report.scene);
            }
        }
        Commands::Resize {
            from,
            to,
            device_pixel_ratio,
        } => {
            let mut session = Session::new(
                DebugTextRenderer::new(),
                Viewport::new(from.width, from.height),
                device_pixel_ratio,
            );
            print_viewport_state("Before", &session);
            if !session.on_resize(to.width, to.height, device_pixel_ratio) {
                println!("Ignored zero-area resize to {}x{}", to.width, to.height);
            }
            print_viewport_state("After", &session);
        }
    }

    Ok(())
}

fn print_viewport_state(label: &str, session: &Session<DebugTextRenderer>) {
    let (bw, bh) = session.renderer().drawing_buffer_size();
    println!(
        "{label}: viewport={} aspect={:.3} pixel_ratio={:.2} buffer={bw}x{bh}",
        session.viewport(),
        session.camera().aspect,
        session.renderer().pixel_ratio()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes() {
        assert_eq!(
            "1920x1080".parse::<Size>().unwrap(),
            Size {
                width: 1920,
                height: 1080
            }
        );
        assert_eq!("800X600".parse::<Size>().unwrap().height, 600);
        assert!("1920".parse::<Size>().is_err());
        assert!("ax600".parse::<Size>().is_err());
    }

    #[test]
    fn ten_seconds_turn_one_radian() {
        let report = simulate(10.0, 60.0, 3.0, Viewport::new(1024, 768)).unwrap();
        assert_eq!(report.frames, 601);
        assert_eq!(report.pixel_ratio, 2.0);
        assert_eq!(report.drawing_buffer, [2048, 1536]);
        let sphere = &report.rotations[0];
        assert_eq!(sphere.name, "sphere");
        assert!((sphere.rotation[1] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_empty_viewport() {
        assert!(simulate(1.0, 60.0, 1.0, Viewport::new(0, 720)).is_err());
    }
}
