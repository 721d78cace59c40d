//! A `Backend` that records every call instead of talking to a GPU.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{Attribute, Backend, RenderState, UniformData};
use crate::error::{GraphicsError, ShaderError, ShaderStage};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    ApplyState(RenderState),
    Resize(u32, u32),
    CreateBuffer { id: u32, attribute: Attribute, data: Vec<[f32; 3]> },
    CreateIndices { id: u32, indices: Vec<u8> },
    Link { id: u32, bindings: Vec<Attribute> },
    UseProgram(Option<u32>),
    SetUniform { program: u32, name: String, value: UniformData },
    BeginFrame([f32; 4]),
    Draw { program: Option<u32>, attributes: [u32; 3], indices: Vec<u8> },
    Present,
}

type ReleaseLog = Rc<RefCell<Vec<u32>>>;

pub struct Handle {
    pub id: u32,
    released: ReleaseLog,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.released.borrow_mut().push(self.id);
    }
}

pub struct FakeBuffer {
    pub handle: Handle,
    pub attribute: Attribute,
}

pub struct FakeIndices {
    pub handle: Handle,
    pub indices: Vec<u8>,
}

pub struct FakeProgram {
    pub handle: Handle,
    pub uniforms: Vec<String>,
}

#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    next_id: u32,
    released: ReleaseLog,
    pending_error: Option<String>,
    current: Option<u32>,
}

/// Stand-in for a GLSL compiler: braces must balance and a `main` must exist.
fn compile(stage: ShaderStage, source: &str) -> Result<(), ShaderError> {
    let mut depth = 0i32;
    for (line_no, line) in source.lines().enumerate() {
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => (),
            }
            if depth < 0 {
                return Err(ShaderError::Compile {
                    stage,
                    log: format!("0:{}: error: unexpected '}}'", line_no + 1),
                });
            }
        }
    }
    if depth != 0 {
        return Err(ShaderError::Compile {
            stage,
            log: format!("0:{}: error: syntax error, unexpected end of file", source.lines().count()),
        });
    }
    if !source.contains("void main") {
        return Err(ShaderError::Compile {
            stage,
            log: "0:0: error: missing entry point 'main'".to_string(),
        });
    }
    Ok(())
}

fn uniform_names(source: &str) -> Vec<String> {
    source
        .lines()
        .map(|l| l.trim())
        .filter(|l| l.starts_with("uniform "))
        .filter_map(|l| l.split_whitespace().last())
        .map(|n| n.trim_end_matches(';').to_string())
        .collect()
}

impl RecordingBackend {
    pub fn new() -> RecordingBackend {
        Default::default()
    }

    pub fn inject_error(&mut self, message: &str) {
        self.pending_error = Some(message.to_string());
    }

    pub fn released(&self) -> Vec<u32> {
        self.released.borrow().clone()
    }

    pub fn draws(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Draw { .. })).collect()
    }

    pub fn links(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Link { .. })).count()
    }

    pub fn uniform_uploads(&self, name: &str) -> Vec<UniformData> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetUniform { name: n, value, .. } if n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    fn handle(&mut self) -> Handle {
        self.next_id += 1;
        Handle {
            id: self.next_id,
            released: self.released.clone(),
        }
    }
}

impl Backend for RecordingBackend {
    type Buffer = FakeBuffer;
    type Indices = FakeIndices;
    type Program = FakeProgram;

    fn apply_state(&mut self, state: &RenderState) {
        self.calls.push(Call::ApplyState(state.clone()));
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Resize(width, height));
    }

    fn create_buffer(&mut self, attribute: Attribute, data: &[[f32; 3]]) -> Result<FakeBuffer, GraphicsError> {
        let handle = self.handle();
        self.calls.push(Call::CreateBuffer {
            id: handle.id,
            attribute,
            data: data.to_vec(),
        });
        Ok(FakeBuffer { handle, attribute })
    }

    fn create_indices(&mut self, indices: &[u8]) -> Result<FakeIndices, GraphicsError> {
        let handle = self.handle();
        self.calls.push(Call::CreateIndices {
            id: handle.id,
            indices: indices.to_vec(),
        });
        Ok(FakeIndices {
            handle,
            indices: indices.to_vec(),
        })
    }

    fn link_program(&mut self, vertex: &str, fragment: &str, bindings: &[Attribute]) -> Result<FakeProgram, ShaderError> {
        compile(ShaderStage::Vertex, vertex)?;
        compile(ShaderStage::Fragment, fragment)?;
        if !vertex.contains("gl_Position") {
            return Err(ShaderError::Link {
                log: "error: vertex shader does not write gl_Position".to_string(),
            });
        }
        let handle = self.handle();
        self.calls.push(Call::Link {
            id: handle.id,
            bindings: bindings.to_vec(),
        });
        let mut uniforms = uniform_names(vertex);
        uniforms.extend(uniform_names(fragment));
        Ok(FakeProgram { handle, uniforms })
    }

    fn use_program(&mut self, program: Option<&FakeProgram>) {
        self.current = program.map(|p| p.handle.id);
        self.calls.push(Call::UseProgram(self.current));
    }

    fn set_uniform(&mut self, program: &FakeProgram, name: &str, value: UniformData) -> bool {
        if !program.uniforms.iter().any(|u| u == name) {
            return false;
        }
        self.calls.push(Call::SetUniform {
            program: program.handle.id,
            name: name.to_string(),
            value,
        });
        true
    }

    fn begin_frame(&mut self, clear_colour: [f32; 4]) {
        self.calls.push(Call::BeginFrame(clear_colour));
    }

    fn draw_indexed(&mut self, attributes: [&FakeBuffer; 3], indices: &FakeIndices) -> Result<(), GraphicsError> {
        for (buffer, expected) in attributes.iter().zip(Attribute::ALL.iter()) {
            assert_eq!(buffer.attribute, *expected, "attribute buffers out of slot order");
        }
        self.calls.push(Call::Draw {
            program: self.current,
            attributes: [attributes[0].handle.id, attributes[1].handle.id, attributes[2].handle.id],
            indices: indices.indices.clone(),
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), GraphicsError> {
        self.calls.push(Call::Present);
        Ok(())
    }

    fn check_error(&mut self, hint: &str) -> Result<(), GraphicsError> {
        match self.pending_error.take() {
            Some(message) => Err(GraphicsError::State {
                hint: hint.to_string(),
                message,
            }),
            None => Ok(()),
        }
    }
}
