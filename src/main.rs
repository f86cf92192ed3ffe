//! modviz - tracker module player with a song info panel and a per-channel
//! volume visualizer.
//! Uses winit + glutin + glow + imgui-rs for the GUI and libopenmpt for replay.

mod app;
mod config;
mod ui;

use anyhow::{Context, Result};
use app::{App, WindowConfig};
use clap::Parser;
use std::time::{Duration, Instant};
use ui::input::PlayerAction;
use ui::GuiState;

use winit::application::ApplicationHandler;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

const FRAME_INTERVAL: Duration = Duration::from_millis(20);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = config::Args::parse();
    let mut gui = GuiState::new(args.playback(), args.visualizer, args.exit_at_end());

    if let Some(path) = &args.file {
        gui.controller
            .open(path)
            .with_context(|| format!("cannot play {}", path.display()))?;
    }

    let event_loop = EventLoop::new()?;
    let mut state = AppState {
        window_config: WindowConfig {
            width: args.width,
            height: args.height,
            font_size: args.font_size,
        },
        app: None,
        gui,
        next_frame: Instant::now(),
        error: None,
    };

    event_loop.run_app(&mut state)?;

    match state.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct AppState {
    window_config: WindowConfig,
    app: Option<App>,
    gui: GuiState,
    next_frame: Instant,
    /// First fatal error; returned from `main` once the loop exits.
    error: Option<anyhow::Error>,
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        self.gui.shutdown();
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = &mut self.app else { return };

        if let Err(e) = app.render_frame(&mut self.gui) {
            self.fail(event_loop, e);
            return;
        }
        app.set_title(self.gui.title());

        if self.gui.should_exit() {
            self.gui.shutdown();
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match App::new(event_loop, self.window_config) {
            Ok(app) => self.app = Some(app),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(app) = &self.app {
                app.window().request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let wrapped: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            app.handle_event(&wrapped);
        }

        match event {
            WindowEvent::CloseRequested => {
                self.gui.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(app) = &self.app {
                    app.handle_resize(size);
                }
            }
            WindowEvent::DroppedFile(path) => {
                log::info!("dropped {}", path.display());
                ui::process_actions(&mut self.gui, &[PlayerAction::Open(path)]);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(app) = &self.app {
                app.window().request_redraw();
            }
            self.next_frame = now + FRAME_INTERVAL;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
