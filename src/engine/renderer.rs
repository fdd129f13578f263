use std::ffi::CStr;

use anyhow::{Result, anyhow};
use glutin::{
    Api,
    ContextBuilder,
    ContextWrapper,
    GlProfile,
    GlRequest,
    PossiblyCurrent,
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyboardInput, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    platform::run_return::EventLoopExtRunReturn,
    window::{Window, WindowBuilder},
};

use crate::engine::clock::{FrameClock, FrameTime};
use crate::engine::config::WindowConfig;
use crate::engine::input::{Key, KeyboardState};

/// What the frame loop drives. A scene owns its GL resources and draws itself
/// with the program, mesh and textures it built after the context came up.
pub trait Scene {
    /// Advances per-frame state. Called once per frame before `draw`.
    fn update(&mut self, time: &FrameTime, keys: &KeyboardState);

    /// Framebuffer size changed. Sizes may be zero while the window is minimized.
    fn resize(&mut self, width: u32, height: u32);

    /// Issues the draw calls for one frame. The framebuffer is already cleared.
    fn draw(&mut self);
}

/// `Renderer` owns the window, the OpenGL context and the event loop.
///
/// It uses `glutin` to create a window with an OpenGL 3.3 core context and loads
/// the GL function pointers through the `gl` crate. `run` then drives the frame
/// loop until the window is closed.
///
/// # Frame loop
///
/// Each frame clears color and depth, ticks the [`FrameClock`], hands the clock
/// and the keyboard state to [`Scene::update`], calls [`Scene::draw`] and swaps
/// buffers. Window resizes update the viewport and are forwarded to the scene.
///
/// # Example Usage
///
/// ```no_run
/// use gl_cubes::engine::config::WindowConfig;
/// use gl_cubes::engine::renderer::Renderer;
///
/// let renderer = Renderer::new(&WindowConfig::default())?;
/// let (width, height) = renderer.framebuffer_size();
/// # let _ = (width, height);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Renderer {
    /// The event loop responsible for driving window events and rendering
    event_loop: EventLoop<()>,

    /// The OpenGL context tied to a window, current on this thread.
    windowed_context: ContextWrapper<PossiblyCurrent, Window>,

    /// The color used to clear the framebuffer each frame, stored as RGBA floats.
    clear_color: [f32; 4],
}

impl Renderer {
    /// Creates the window and its OpenGL context from `config`.
    ///
    /// 1. Builds the event loop and a window with the configured title and size.
    /// 2. Requests an OpenGL 3.3 core context with a 24-bit depth buffer.
    /// 3. Makes the context current and loads all GL function pointers.
    /// 4. Sets the clear color, enables depth testing and sizes the viewport.
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new();

        let wb = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(PhysicalSize::new(config.width, config.height));

        let windowed_context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, (3, 3)))
            .with_gl_profile(GlProfile::Core)
            .with_depth_buffer(24)
            .with_vsync(config.vsync)
            .build_windowed(wb, &event_loop)
            .map_err(|e| anyhow!("failed to create OpenGL window: {e}"))?;

        // GL calls are only valid once the context is current on this thread
        let windowed_context = unsafe { windowed_context.make_current() }
            .map_err(|(_, e)| anyhow!("failed to make OpenGL context current: {e}"))?;

        gl::load_with(|symbol| windowed_context.get_proc_address(symbol) as *const _);
        if !gl::Clear::is_loaded() {
            return Err(anyhow!("failed to load OpenGL function pointers"));
        }

        log::info!(
            "OpenGL {} on {}",
            gl_string(gl::VERSION),
            gl_string(gl::RENDERER)
        );

        let mut renderer = Self {
            event_loop,
            windowed_context,
            clear_color: config.clear_color,
        };

        let [r, g, b, a] = renderer.clear_color;
        renderer.set_clear_color(r, g, b, a);
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
        }
        let (width, height) = renderer.framebuffer_size();
        set_viewport(width, height);

        Ok(renderer)
    }

    /// Current framebuffer size in physical pixels.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.windowed_context.window().inner_size();
        (size.width, size.height)
    }

    /// Updates the OpenGL clear color.
    pub fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.clear_color = [r, g, b, a];
        unsafe {
            gl::ClearColor(r, g, b, a);
        }
    }

    /// Runs the frame loop until the window is closed or Escape is pressed.
    ///
    /// Returns once the loop has stopped. The scene is dropped before the context
    /// so its buffers, textures and program are deleted while GL is still current.
    /// A failed buffer swap ends the loop and is returned as an error.
    pub fn run<S: Scene>(self, mut scene: S) -> Result<()> {
        let Renderer {
            mut event_loop,
            windowed_context,
            clear_color: _,
        } = self;

        let mut keys = KeyboardState::new();
        let mut clock = FrameClock::new();
        let mut failure = None;

        let size = windowed_context.window().inner_size();
        scene.resize(size.width, size.height);

        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                    WindowEvent::Resized(size) => {
                        on_resize(&windowed_context, size);
                        scene.resize(size.width, size.height);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        on_resize(&windowed_context, *new_inner_size);
                        scene.resize(new_inner_size.width, new_inner_size.height);
                    }
                    WindowEvent::Focused(false) => keys.clear(),
                    WindowEvent::KeyboardInput {
                        input: KeyboardInput { virtual_keycode, state, .. },
                        ..
                    } => {
                        let key = keys.apply(virtual_keycode, state);
                        if key == Some(Key::Escape) && state == ElementState::Pressed {
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                    _ => {}
                },

                Event::MainEventsCleared => {
                    windowed_context.window().request_redraw();
                }

                Event::RedrawRequested(_) => {
                    unsafe {
                        gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
                    }

                    let time = clock.tick();
                    scene.update(&time, &keys);
                    scene.draw();

                    if let Err(e) = windowed_context.swap_buffers() {
                        failure = Some(anyhow!("failed to swap buffers: {e}"));
                        *control_flow = ControlFlow::Exit;
                    }
                }

                _ => {}
            }
        });

        drop(scene);

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn on_resize(context: &ContextWrapper<PossiblyCurrent, Window>, size: PhysicalSize<u32>) {
    log::debug!("framebuffer resized to {}x{}", size.width, size.height);
    context.resize(size);
    set_viewport(size.width, size.height);
}

/// Tells OpenGL the region to draw into: the whole framebuffer.
fn set_viewport(width: u32, height: u32) {
    unsafe {
        gl::Viewport(0, 0, width as i32, height as i32);
    }
}

fn gl_string(name: gl::types::GLenum) -> String {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return String::from("unknown");
        }
        CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
    }
}
