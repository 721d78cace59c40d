#[macro_use]
extern crate glium;
#[macro_use]
extern crate log;
extern crate nalgebra as na;

mod backend;
mod config;
mod cube;
mod error;
mod frame;
mod geom;
mod glium_backend;
mod logging;
mod mesh;
mod renderer;
mod shader;
#[cfg(test)]
mod testing;

use std::fs;
use std::time::Instant;

use anyhow::Context;
use winit::event::{ElementState, Event, StartCause, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Fullscreen;

use config::Config;
use error::{GraphicsError, RenderError};
use glium_backend::GliumBackend;
use renderer::Renderer;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init_logging(&config);

    let vertex_source = fs::read_to_string(&config.vertex_shader)
        .with_context(|| format!("reading vertex shader {}", config.vertex_shader))?;
    let fragment_source = fs::read_to_string(&config.fragment_shader)
        .with_context(|| format!("reading fragment shader {}", config.fragment_shader))?;

    let event_loop = EventLoop::new().context("Unable to initialize the event loop")?;
    let (window, display) = glium::backend::glutin::SimpleWindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(config.width, config.height)
        .build(&event_loop);

    let mut renderer = Renderer::new(GliumBackend::new(display), &config.render_config());
    renderer.initialize_graphics_state().context("opengl setup")?;
    renderer.build_geometry().context("uploading cube geometry")?;
    match renderer.build_shaders(&vertex_source, &fragment_source) {
        Ok(()) => (),
        Err(RenderError::Shader(_)) => warn!("running without a shader program"),
        Err(RenderError::Graphics(e)) => return Err(e).context("shader setup"),
    }

    let frame_delay = config.frame_delay();
    let mut rotating = !config.paused;
    let mut failure: Option<GraphicsError> = None;

    event_loop.run(|event, elwt| {
        match event {
            Event::NewEvents(StartCause::Init)
            | Event::NewEvents(StartCause::ResumeTimeReached { .. }) => window.request_redraw(),
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => {
                    if let Err(e) = renderer.resize(size.width, size.height) {
                        failure = Some(e);
                        elwt.exit();
                    }
                }
                WindowEvent::KeyboardInput { event, .. }
                    if event.state == ElementState::Pressed && !event.repeat =>
                {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                        PhysicalKey::Code(KeyCode::Space) => {
                            rotating = !rotating;
                            let verb = if rotating { "resumed" } else { "paused" };
                            debug!("rotation {} at {} degrees", verb, renderer.angle());
                        }
                        PhysicalKey::Code(KeyCode::KeyF) => {
                            if window.fullscreen().is_some() {
                                window.set_fullscreen(None);
                            } else {
                                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                            }
                        }
                        _ => (),
                    }
                }
                WindowEvent::RedrawRequested => {
                    match renderer.advance_frame(rotating) {
                        Ok(out) => {
                            trace!("frame at {} degrees", out.angle);
                            let next = Instant::now() + frame_delay;
                            elwt.set_control_flow(ControlFlow::WaitUntil(next));
                        }
                        Err(e) => {
                            failure = Some(e);
                            elwt.exit();
                        }
                    }
                }
                _ => (),
            },
            _ => (),
        }
    }).context("Processing EventLoop")?;

    if let Some(e) = failure {
        error!("{}", e);
        if let Err(e) = renderer.teardown() {
            warn!("teardown after failure: {}", e);
        }
        std::process::exit(1);
    }
    renderer.teardown().context("takedown")?;
    Ok(())
}
