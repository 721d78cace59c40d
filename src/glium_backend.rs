use std::cell::RefCell;
use std::rc::Rc;

use glium::backend::Facade;
use glium::draw_parameters::{BackfaceCullingMode, DepthClamp, DepthTest};
use glium::glutin::surface::WindowSurface;
use glium::index::PrimitiveType;
use glium::program::{ProgramCreationError, ShaderType};
use glium::uniforms::{UniformValue, Uniforms};
use glium::vertex::VertexBufferAny;
use glium::{Display, DrawParameters, Frame, IndexBuffer, Program, Rect, Surface, VertexBuffer};

use crate::backend::{Attribute, Backend, RenderState, UniformData, UniformTable};
use crate::error::{GraphicsError, ShaderError, ShaderStage};
use crate::geom;

impl Uniforms for UniformTable {
    fn visit_values<'a, F: FnMut(&str, UniformValue<'a>)>(&'a self, mut visit: F) {
        for (name, value) in self.iter() {
            let value = match *value {
                UniformData::Vec3(v) => UniformValue::Vec3(v),
                UniformData::Mat4(m) => UniformValue::Mat4(m),
            };
            visit(name, value);
        }
    }
}

pub struct GliumProgram {
    program: Program,
    uniforms: RefCell<UniformTable>,
}

/// Renders into the window surface of a glium display.
pub struct GliumBackend {
    display: Display<WindowSurface>,
    params: DrawParameters<'static>,
    frame: Option<Frame>,
    current: Option<Rc<GliumProgram>>,
}

impl GliumBackend {
    pub fn new(display: Display<WindowSurface>) -> GliumBackend {
        GliumBackend {
            display,
            params: Default::default(),
            frame: None,
            current: None,
        }
    }
}

fn to_shader_error(err: ProgramCreationError) -> ShaderError {
    match err {
        ProgramCreationError::CompilationError(log, ShaderType::Vertex) => ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log,
        },
        ProgramCreationError::CompilationError(log, ShaderType::Fragment) => ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log,
        },
        ProgramCreationError::LinkingError(log) => ShaderError::Link { log },
        other => ShaderError::Unsupported(other.to_string()),
    }
}

impl Backend for GliumBackend {
    type Buffer = VertexBufferAny;
    type Indices = IndexBuffer<u8>;
    type Program = Rc<GliumProgram>;

    fn apply_state(&mut self, state: &RenderState) {
        self.params = DrawParameters {
            depth: glium::Depth {
                test: if state.depth_test { DepthTest::IfLess } else { DepthTest::Overwrite },
                write: state.depth_test,
                range: state.depth_range,
                clamp: if state.depth_clamp { DepthClamp::Clamp } else { DepthClamp::NoClamp },
                ..Default::default()
            },
            backface_culling: if state.cull_back_faces {
                BackfaceCullingMode::CullClockwise
            } else {
                BackfaceCullingMode::CullingDisabled
            },
            viewport: Some(Rect {
                left: 0,
                bottom: 0,
                width: state.viewport.0,
                height: state.viewport.1,
            }),
            ..Default::default()
        };
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.display.resize((width, height));
    }

    fn create_buffer(&mut self, attribute: Attribute, data: &[[f32; 3]]) -> Result<VertexBufferAny, GraphicsError> {
        let buffer: Result<VertexBufferAny, _> = match attribute {
            Attribute::Position => VertexBuffer::new(&self.display, &geom::positions(data)).map(Into::into),
            Attribute::Colour => VertexBuffer::new(&self.display, &geom::colours(data)).map(Into::into),
            Attribute::Normal => VertexBuffer::new(&self.display, &geom::normals(data)).map(Into::into),
        };
        buffer.map_err(|e| GraphicsError::Buffer(format!("{}: {}", attribute.name(), e)))
    }

    fn create_indices(&mut self, indices: &[u8]) -> Result<IndexBuffer<u8>, GraphicsError> {
        IndexBuffer::new(&self.display, PrimitiveType::TrianglesList, indices)
            .map_err(|e| GraphicsError::Buffer(format!("indices: {}", e)))
    }

    fn link_program(&mut self, vertex: &str, fragment: &str, bindings: &[Attribute])
                    -> Result<Rc<GliumProgram>, ShaderError> {
        let program = Program::from_source(&self.display, vertex, fragment, None).map_err(to_shader_error)?;
        // glium binds attributes by name; the slots come from the shader source.
        for binding in bindings {
            match program.get_attribute(binding.name()) {
                Some(attr) if attr.location != binding.slot() as i32 => {
                    warn!("attribute {} linked at location {}, expected {}",
                          binding.name(), attr.location, binding.slot());
                }
                Some(_) => (),
                None => debug!("attribute {} is not used by the program", binding.name()),
            }
        }
        Ok(Rc::new(GliumProgram {
            program,
            uniforms: RefCell::new(UniformTable::default()),
        }))
    }

    fn use_program(&mut self, program: Option<&Rc<GliumProgram>>) {
        self.current = program.cloned();
    }

    fn set_uniform(&mut self, program: &Rc<GliumProgram>, name: &str, value: UniformData) -> bool {
        if program.program.get_uniform(name).is_none() {
            return false;
        }
        program.uniforms.borrow_mut().set(name, value);
        true
    }

    fn begin_frame(&mut self, clear_colour: [f32; 4]) {
        if let Some(stale) = self.frame.take() {
            if let Err(e) = stale.finish() {
                warn!("discarding unpresented frame: {}", e);
            }
        }
        let mut frame = self.display.draw();
        frame.clear_color_and_depth((clear_colour[0], clear_colour[1], clear_colour[2], clear_colour[3]), 1.0);
        self.frame = Some(frame);
    }

    fn draw_indexed(&mut self, attributes: [&VertexBufferAny; 3], indices: &IndexBuffer<u8>)
                    -> Result<(), GraphicsError> {
        let frame = self.frame.as_mut().ok_or(GraphicsError::NoFrame)?;
        let program = match self.current {
            Some(ref p) => p,
            None => return Err(GraphicsError::Draw("no program in use".to_string())),
        };
        let uniforms = program.uniforms.borrow();
        frame.draw((attributes[0], attributes[1], attributes[2]), indices,
                   &program.program, &*uniforms, &self.params)
            .map_err(|e| GraphicsError::Draw(e.to_string()))
    }

    fn present(&mut self) -> Result<(), GraphicsError> {
        match self.frame.take() {
            Some(frame) => frame.finish().map_err(|e| GraphicsError::Present(e.to_string())),
            None => Err(GraphicsError::NoFrame),
        }
    }

    /// glium reports a pending GL error by panicking with the error string
    /// and `hint`, so a failed check never returns and teardown is skipped.
    fn check_error(&mut self, hint: &str) -> Result<(), GraphicsError> {
        self.display.get_context().assert_no_error(Some(hint));
        Ok(())
    }
}

impl Drop for GliumBackend {
    fn drop(&mut self) {
        // An unfinished frame panics when dropped.
        if let Some(frame) = self.frame.take() {
            if let Err(e) = frame.finish() {
                warn!("finishing last frame on shutdown: {}", e);
            }
        }
    }
}
