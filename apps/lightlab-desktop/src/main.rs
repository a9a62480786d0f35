use anyhow::{Context as _, Result};
use clap::Parser;
use egui::Context as EguiContext;
use lightlab_common::Color;
use lightlab_input::{DragButton, PointerGesture};
use lightlab_render::Viewport;
use lightlab_render_wgpu::{SurfaceFrame, WgpuRenderer};
use lightlab_runtime::{FrameLoop, RunningLoop, Session, Tick};
use lightlab_tools::{Binding, SceneInspector};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Pixels of trackpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f64 = 50.0;

#[derive(Parser)]
#[command(name = "lightlab-desktop", about = "Lighting demo with a debug panel")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Present without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,
}

/// Drag in progress, in physical cursor coordinates.
#[derive(Default)]
struct PointerState {
    button: Option<DragButton>,
    last: Option<PhysicalPosition<f64>>,
}

struct GpuApp {
    cli: Cli,
    window: Option<Arc<Window>>,
    session: Option<Session<WgpuRenderer>>,
    running: Option<RunningLoop>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    pointer: PointerState,
    show_panel: bool,
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            window: None,
            session: None,
            running: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            pointer: PointerState::default(),
            show_panel: true,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Light Lab")
            .with_inner_size(LogicalSize::new(self.cli.width, self.cli.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let physical = window.inner_size();
        let renderer = WgpuRenderer::new(
            window.clone(),
            (physical.width, physical.height),
            !self.cli.no_vsync,
        )?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            renderer.device(),
            renderer.surface_format(),
            None,
            1,
            false,
        );

        let scale_factor = window.scale_factor();
        let session = Session::new(renderer, logical_viewport(physical, scale_factor), scale_factor);

        self.running = Some(FrameLoop::new().start(Instant::now()));
        self.session = Some(session);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        if let Some(running) = &self.running {
            running.cancel_token().cancel();
        }
        self.error = Some(err);
        event_loop.exit();
    }

    fn handle_resize(&mut self, physical: PhysicalSize<u32>) {
        let (Some(window), Some(session)) = (&self.window, &mut self.session) else {
            return;
        };
        let scale_factor = window.scale_factor();
        session
            .renderer_mut()
            .resize_surface(physical.width, physical.height);
        let viewport = logical_viewport(physical, scale_factor);
        session.on_resize(viewport.width, viewport.height, scale_factor);
    }

    fn handle_cursor(&mut self, position: PhysicalPosition<f64>) {
        let previous = self.pointer.last.replace(position);
        let (Some(button), Some(previous), Some(window), Some(session)) =
            (self.pointer.button, previous, &self.window, &mut self.session)
        else {
            return;
        };
        let scale = window.scale_factor();
        let dx = ((position.x - previous.x) / scale) as f32;
        let dy = ((position.y - previous.y) / scale) as f32;
        session.apply_gesture(PointerGesture::from_drag(button, dx, dy));
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
        };
        if let Some(session) = &mut self.session {
            session.apply_gesture(PointerGesture::from_wheel(lines));
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(session), Some(running)) = (&mut self.session, &mut self.running) else {
            return;
        };

        match running.tick(Instant::now(), |time| session.frame(time)) {
            Ok(Tick::Frame(Some(frame))) => {
                if let Err(err) = self.paint_overlay(&frame) {
                    self.fail(event_loop, err);
                    return;
                }
                frame.present();
            }
            // Surface was reconfigured; try again next redraw.
            Ok(Tick::Frame(None)) => {}
            Ok(Tick::Stopped) => event_loop.exit(),
            Err(err) => self.fail(event_loop, anyhow::Error::new(err).context("render failed")),
        }
    }

    fn paint_overlay(&mut self, frame: &SurfaceFrame) -> Result<()> {
        let (Some(window), Some(session), Some(egui_winit), Some(egui_renderer)) = (
            &self.window,
            &mut self.session,
            &mut self.egui_winit,
            &mut self.egui_renderer,
        ) else {
            anyhow::bail!("overlay painted before initialization");
        };

        let raw_input = egui_winit.take_egui_input(window);
        let show_panel = self.show_panel;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show_panel {
                draw_panel(ctx, session);
            }
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = session.renderer().surface_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let renderer = session.renderer();
        let (device, queue) = (renderer.device(), renderer.queue());
        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: frame.view(),
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }
        Ok(())
    }
}

fn logical_viewport(physical: PhysicalSize<u32>, scale_factor: f64) -> Viewport {
    let logical: LogicalSize<f64> = physical.to_logical(scale_factor);
    Viewport::new(logical.width.round() as u32, logical.height.round() as u32)
}

/// Physical size that keeps a logical viewport unchanged at a new scale factor.
fn physical_size(viewport: Viewport, scale_factor: f64) -> PhysicalSize<u32> {
    LogicalSize::new(viewport.width as f64, viewport.height as f64).to_physical(scale_factor)
}

/// Debug panel: one row per bound control, plus the scene summary.
fn draw_panel(ctx: &EguiContext, session: &mut Session<WgpuRenderer>) {
    egui::SidePanel::left("lights")
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading("Light Lab");
            ui.label(SceneInspector::summary(session.scene()).to_string());
            ui.separator();

            let controls = session.panel().controls().to_vec();
            for control in controls {
                match control.binding {
                    Binding::Color(id) => {
                        let Some(light) = session.scene().light(id) else {
                            continue;
                        };
                        let mut rgb = light.color.to_array();
                        let changed = ui
                            .horizontal(|ui| {
                                let changed = ui.color_edit_button_rgb(&mut rgb).changed();
                                ui.label(&control.label);
                                changed
                            })
                            .inner;
                        if changed {
                            if let Err(err) = session.set_light_color(id, Color::from_array(rgb)) {
                                tracing::warn!("{err}");
                            }
                        }
                    }
                    Binding::Intensity(id, range) => {
                        let Some(light) = session.scene().light(id) else {
                            continue;
                        };
                        let mut value = light.intensity;
                        let slider = egui::Slider::new(&mut value, range.min..=range.max)
                            .step_by(range.step as f64)
                            .text(&control.label);
                        if ui.add(slider).changed() {
                            if let Err(err) = session.set_light_intensity(id, value) {
                                tracing::warn!("{err}");
                            }
                        }
                    }
                    Binding::Action(action) => {
                        if ui.button(&control.label).clicked() {
                            session.trigger(action);
                        }
                    }
                }
            }

            ui.separator();
            let camera = session.camera();
            ui.label(format!(
                "Camera: ({:.2}, {:.2}, {:.2})",
                camera.position.x, camera.position.y, camera.position.z
            ));
            ui.small("F1: Toggle panel | LMB: Orbit | RMB: Pan | Wheel: Zoom");
        });
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(running) = &self.running {
                    running.cancel_token().cancel();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => self.handle_resize(new_size),
            WindowEvent::ScaleFactorChanged {
                scale_factor,
                mut inner_size_writer,
            } => {
                let Some(session) = &self.session else {
                    return;
                };
                let physical = physical_size(session.viewport(), scale_factor);
                if let Err(err) = inner_size_writer.request_inner_size(physical) {
                    tracing::warn!(%err, "window rejected rescaled size");
                }
                self.handle_resize(physical);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::F1),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.show_panel = !self.show_panel;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let drag = match button {
                    MouseButton::Left => Some(DragButton::Primary),
                    MouseButton::Middle => Some(DragButton::Middle),
                    MouseButton::Right => Some(DragButton::Secondary),
                    _ => None,
                };
                if drag.is_some() {
                    self.pointer.button = if state == ElementState::Pressed {
                        drag
                    } else {
                        None
                    };
                }
            }
            WindowEvent::CursorMoved { position, .. } => self.handle_cursor(position),
            WindowEvent::CursorLeft { .. } => {
                self.pointer = PointerState::default();
            }
            WindowEvent::MouseWheel { delta, .. } => self.handle_wheel(delta),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!("lightlab-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_change_keeps_logical_viewport() {
        let viewport = Viewport::new(1280, 720);
        let physical = physical_size(viewport, 1.5);
        assert_eq!(physical, PhysicalSize::new(1920, 1080));
        assert_eq!(logical_viewport(physical, 1.5), viewport);

        let physical = physical_size(viewport, 2.0);
        assert_eq!(physical, PhysicalSize::new(2560, 1440));
        assert_eq!(logical_viewport(physical, 2.0), viewport);
    }
}
