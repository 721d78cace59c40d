use std::rc::Rc;

use crate::backend::{Attribute, Backend, RenderState};
use crate::cube;
use crate::error::{GraphicsError, RenderError};
use crate::frame::{FrameOutput, FrameUpdater};
use crate::mesh::FaceMesh;
use crate::shader::{ShaderProgram, LIGHT_UNIFORM, MVP_UNIFORM};

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Poll for GL errors after every state change and fail on the first one.
    pub strict_error_checking: bool,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: 640,
            height: 480,
            strict_error_checking: cfg!(debug_assertions),
        }
    }
}

struct SharedBuffers<B: Backend> {
    positions: Rc<B::Buffer>,
    colours: Rc<B::Buffer>,
}

/// Everything needed to draw the cube, owned in one place.
pub struct Renderer<B: Backend> {
    faces: Vec<FaceMesh<B>>,
    shared: Option<SharedBuffers<B>>,
    shader: Option<ShaderProgram<B>>,
    frame: FrameUpdater,
    state: RenderState,
    strict: bool,
    backend: B,
}

impl<B: Backend> Renderer<B> {
    pub fn new(backend: B, config: &RenderConfig) -> Renderer<B> {
        Renderer {
            faces: Vec::new(),
            shared: None,
            shader: None,
            frame: FrameUpdater::new(),
            state: RenderState::new(config.width, config.height),
            strict: config.strict_error_checking,
            backend,
        }
    }

    fn check(&mut self, hint: &str) -> Result<(), GraphicsError> {
        if self.strict {
            self.backend.check_error(hint)?;
        }
        Ok(())
    }

    pub fn initialize_graphics_state(&mut self) -> Result<(), GraphicsError> {
        self.backend.apply_state(&self.state);
        self.check("opengl setup")?;
        debug!("graphics state: {:?}", self.state);
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), GraphicsError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.state.viewport = (width, height);
        self.backend.resize(width, height);
        self.backend.apply_state(&self.state);
        self.check("resize")
    }

    pub fn build_geometry(&mut self) -> Result<(), GraphicsError> {
        let geo = cube::build_geometry();

        let positions = Rc::new(self.backend.create_buffer(Attribute::Position, &geo.positions)?);
        self.check("vertex data")?;
        let colours = Rc::new(self.backend.create_buffer(Attribute::Colour, &geo.colours)?);
        self.check("colour data")?;

        let mut faces = Vec::with_capacity(cube::NUM_FACES);
        for face in geo.faces.iter() {
            faces.push(FaceMesh::new(&mut self.backend, &positions, &colours, face)?);
            self.check("square buffers")?;
        }

        self.faces = faces;
        self.shared = Some(SharedBuffers { positions, colours });
        debug!("uploaded cube geometry: {} faces", self.faces.len());
        Ok(())
    }

    /// On failure the renderer is left without a program; frames are still
    /// cleared and presented but nothing is drawn.
    pub fn build_shaders(&mut self, vertex: &str, fragment: &str) -> Result<(), RenderError> {
        let shader = match ShaderProgram::build(&mut self.backend, vertex, fragment) {
            Ok(shader) => shader,
            Err(e) => {
                error!("{}", e);
                self.shader = None;
                return Err(RenderError::Shader(e));
            }
        };
        shader.use_program(&mut self.backend);
        let light = self.frame.light_base();
        shader.set_uniform_vec3(&mut self.backend, LIGHT_UNIFORM, [light.x, light.y, light.z]);
        self.shader = Some(shader);
        self.check("shader setup")?;
        info!("shader program linked");
        Ok(())
    }

    pub fn advance_frame(&mut self, rotating: bool) -> Result<FrameOutput, GraphicsError> {
        let out = self.frame.advance(rotating, self.state.aspect_ratio());

        self.backend.begin_frame(self.state.clear_colour);
        if let Some(ref shader) = self.shader {
            shader.use_program(&mut self.backend);
            shader.set_uniform_mat4(&mut self.backend, MVP_UNIFORM, out.mvp.into());
            shader.set_uniform_vec3(&mut self.backend, LIGHT_UNIFORM, [out.light.x, out.light.y, out.light.z]);
            for face in self.faces.iter() {
                face.draw(&mut self.backend)?;
            }
        }
        self.check("square draw")?;
        self.backend.present()?;
        Ok(out)
    }

    pub fn teardown(&mut self) -> Result<(), GraphicsError> {
        self.backend.use_program(None);
        self.faces.clear();
        self.shared = None;
        if let Some(shader) = self.shader.take() {
            shader.destroy(&mut self.backend);
        }
        self.check("takedown")
    }

    pub fn angle(&self) -> f32 {
        self.frame.angle()
    }

    #[cfg(test)]
    pub fn has_shader(&self) -> bool {
        self.shader.is_some()
    }

    #[cfg(test)]
    pub fn faces(&self) -> &[FaceMesh<B>] {
        &self.faces
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
