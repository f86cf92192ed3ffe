//! App struct owning the GL/imgui stack.

use crate::ui::{self, GuiState};
use anyhow::{anyhow, Context, Result};
use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;

use imgui_glow_renderer::AutoRenderer;
use imgui_winit_support::{HiDpiMode, WinitPlatform};

use raw_window_handle::HasWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

struct GlObjects {
    window: Window,
    surface: glutin::surface::Surface<WindowSurface>,
    context: glutin::context::PossiblyCurrentContext,
}

/// Window geometry and font settings.
#[derive(Clone, Copy, Debug)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
}

pub struct App {
    gl: GlObjects,
    imgui: imgui::Context,
    platform: WinitPlatform,
    renderer: AutoRenderer,
    title: String,
}

impl App {
    /// Create the window and GL context (call in `resumed()`).
    pub fn new(event_loop: &ActiveEventLoop, config: WindowConfig) -> Result<Self> {
        let mut imgui = create_imgui_context(config.font_size);
        let mut platform = WinitPlatform::new(&mut imgui);
        let (window, gl_config) = create_gl_window(event_loop, config.width, config.height)?;
        platform.attach_window(imgui.io_mut(), &window, HiDpiMode::Default);

        let (surface, context) = create_gl_surface(&window, &gl_config)?;
        if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
            log::debug!("vsync unavailable: {}", e);
        }
        let glow_ctx = create_glow_context(&gl_config);
        let renderer = AutoRenderer::new(glow_ctx, &mut imgui)
            .map_err(|e| anyhow!("failed to create imgui renderer: {e:?}"))?;

        Ok(Self {
            gl: GlObjects {
                window,
                surface,
                context,
            },
            imgui,
            platform,
            renderer,
            title: String::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.gl.window
    }

    /// Handle a winit event (forward to imgui platform).
    pub fn handle_event(&mut self, event: &winit::event::Event<()>) {
        self.platform
            .handle_event(self.imgui.io_mut(), &self.gl.window, event);
    }

    /// Handle window resize.
    pub fn handle_resize(&self, size: winit::dpi::PhysicalSize<u32>) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.gl.surface.resize(&self.gl.context, w, h);
        }
    }

    /// Update the window title only when it changes.
    pub fn set_title(&mut self, title: String) {
        if self.title != title {
            self.gl.window.set_title(&title);
            self.title = title;
        }
    }

    /// Render one frame: build UI, render to GL, swap buffers.
    pub fn render_frame(&mut self, gui: &mut GuiState) -> Result<()> {
        self.platform
            .prepare_frame(self.imgui.io_mut(), &self.gl.window)
            .map_err(|e| anyhow!("prepare_frame failed: {e}"))?;

        let ui = self.imgui.new_frame();
        ui::build_ui(ui, gui);
        self.platform.prepare_render(ui, &self.gl.window);

        let draw_data = self.imgui.render();

        unsafe {
            let gl_ctx = self.renderer.gl_context();
            gl_ctx.clear_color(0.0, 0.0, 0.0, 1.0);
            gl_ctx.clear(glow::COLOR_BUFFER_BIT);
        }

        self.renderer
            .render(draw_data)
            .map_err(|e| anyhow!("imgui render failed: {e:?}"))?;

        self.gl
            .surface
            .swap_buffers(&self.gl.context)
            .map_err(|e| anyhow!("swap_buffers failed: {e}"))
    }
}

fn create_imgui_context(font_size: f32) -> imgui::Context {
    let mut imgui = imgui::Context::create();
    imgui.set_ini_filename(None);
    imgui.style_mut().use_dark_colors();
    imgui.fonts().add_font(&[imgui::FontSource::DefaultFontData {
        config: Some(imgui::FontConfig {
            size_pixels: font_size,
            ..Default::default()
        }),
    }]);
    imgui
}

fn create_gl_window(
    event_loop: &ActiveEventLoop,
    width: f32,
    height: f32,
) -> Result<(Window, glutin::config::Config)> {
    let window_attrs = WindowAttributes::default()
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(true)
        .with_title("modviz");

    let template = ConfigTemplateBuilder::new();
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            configs
                .reduce(|a, b| {
                    if a.num_samples() > b.num_samples() {
                        a
                    } else {
                        b
                    }
                })
                .expect("glutin offers at least one config")
        })
        .map_err(|e| anyhow!("failed to create GL window: {e}"))?;

    let window = window.context("no window created")?;
    Ok((window, gl_config))
}

fn create_gl_surface(
    window: &Window,
    gl_config: &glutin::config::Config,
) -> Result<(
    glutin::surface::Surface<WindowSurface>,
    glutin::context::PossiblyCurrentContext,
)> {
    let raw_handle = window
        .window_handle()
        .map_err(|e| anyhow!("failed to get window handle: {e}"))?
        .as_raw();

    let gl_display = gl_config.display();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(raw_handle));

    let gl_context = unsafe { gl_display.create_context(gl_config, &context_attrs) }
        .map_err(|e| anyhow!("failed to create GL context: {e}"))?;

    let size = window.inner_size();
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_handle,
        NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
    );

    let surface = unsafe { gl_display.create_window_surface(gl_config, &surface_attrs) }
        .map_err(|e| anyhow!("failed to create GL surface: {e}"))?;

    let context = gl_context
        .make_current(&surface)
        .map_err(|e| anyhow!("failed to make GL context current: {e}"))?;

    Ok((surface, context))
}

fn create_glow_context(gl_config: &glutin::config::Config) -> glow::Context {
    let gl_display = gl_config.display();
    unsafe { glow::Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s)) }
}
