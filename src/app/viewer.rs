//! Windowed frame loop: two-phase startup, then one tick per redraw.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, KeyCode, NamedKey, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::app::session::Session;
use crate::config::ViewerSettings;
use crate::demos::DemoSpec;
use crate::interaction::InteractionController;
use crate::rendering::RenderEngine;

/// Everything the frame loop needs once startup has finished.
struct Ready {
    window: Arc<Window>,
    engine: RenderEngine,
    session: Session,
    interaction: InteractionController,
    frame: u64,
    last_frame: Instant,
    tick_accumulator: f32,
}

/// The windowed application. Idle until `resumed` completes startup, then
/// Running for the lifetime of the window.
pub struct Viewer {
    settings: ViewerSettings,
    demo: DemoSpec,
    state: Option<Ready>,
}

impl Viewer {
    pub fn new(settings: ViewerSettings, demo: DemoSpec) -> Self {
        Self {
            settings,
            demo,
            state: None,
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(format!("{} - {}", crate::APP_NAME, self.demo.name))
                        .with_inner_size(winit::dpi::LogicalSize::new(
                            self.settings.window.width,
                            self.settings.window.height,
                        )),
                )
                .expect("Failed to create window"),
        );

        let session = match Session::build(&self.demo, &self.settings.physics) {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to build demo session: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Renderer acquisition is the one async suspension point of the app;
        // failure here is fatal, the demo cannot start without a surface.
        let engine = match pollster::block_on(RenderEngine::new(window.clone(), &session.scene)) {
            Ok(engine) => engine,
            Err(e) => {
                error!("Render engine initialization failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        info!("Startup complete, entering frame loop");
        window.request_redraw();

        self.state = Some(Ready {
            window,
            engine,
            session,
            interaction: InteractionController::new(),
            frame: 0,
            last_frame: Instant::now(),
            tick_accumulator: 0.0,
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(ready) = self.state.as_mut() else {
            return;
        };
        if ready.window.id() != window_id {
            return;
        }

        let viewport = (
            ready.engine.size.width as f32,
            ready.engine.size.height as f32,
        );
        ready.interaction.process_events(
            &event,
            &mut ready.engine.camera,
            &mut ready.session.scene,
            viewport,
        );

        match event {
            WindowEvent::CloseRequested => {
                info!("Shutdown requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                ready.engine.resize(size);
                // Out-of-band render so the resized surface is never stale.
                ready.engine.render_frame(&ready.session.scene);
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::KeyZ) => {
                        // Debug action: manual single-step of the physics
                        // world.
                        ready.session.single_step();
                    }
                    _ => {
                        if event.logical_key == Key::Named(NamedKey::Escape) {
                            event_loop.exit();
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta = (now - ready.last_frame).as_secs_f32();
                ready.last_frame = now;

                // Optional throttle: at most one tick per 1/fps interval.
                let run_tick = if let Some(fps) = self.settings.target_fps {
                    let interval = 1.0 / fps;
                    ready.tick_accumulator += delta;
                    if ready.tick_accumulator >= interval {
                        ready.tick_accumulator %= interval;
                        true
                    } else {
                        false
                    }
                } else {
                    true
                };

                if run_tick {
                    ready.session.tick();
                    ready.engine.render_frame(&ready.session.scene);
                    ready.frame += 1;

                    if ready.frame % 300 == 1 {
                        info!(
                            "Frame {}: {} entities, {:.1} fps",
                            ready.frame,
                            ready.session.entities.len(),
                            1.0 / delta.max(1e-6)
                        );
                    }
                }

                ready.window.request_redraw();
            }

            _ => {}
        }
    }
}

/// Run a demo to completion (window close or Escape).
pub fn run(settings: ViewerSettings, demo: DemoSpec) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(settings, demo);
    event_loop.run_app(&mut viewer)?;
    Ok(())
}
