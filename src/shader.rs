use crate::backend::{Attribute, Backend, UniformData};
use crate::error::ShaderError;

pub const MVP_UNIFORM: &str = "mvpmatrix";
pub const LIGHT_UNIFORM: &str = "u_lightsource";

/// A linked vertex + fragment program.
///
/// Created once at startup; the program object is released when this is
/// dropped or passed to `destroy`.
pub struct ShaderProgram<B: Backend> {
    program: B::Program,
}

impl<B: Backend> ShaderProgram<B> {
    /// Compiles both sources and links them with the fixed attribute slots.
    /// On failure nothing is left allocated and the error carries the full
    /// driver log.
    pub fn build(backend: &mut B, vertex: &str, fragment: &str) -> Result<ShaderProgram<B>, ShaderError> {
        let program = backend.link_program(vertex, fragment, &Attribute::ALL)?;
        Ok(ShaderProgram { program })
    }

    pub fn use_program(&self, backend: &mut B) {
        backend.use_program(Some(&self.program));
    }

    // A uniform the program does not declare is ignored, like glUniform
    // with location -1.
    pub fn set_uniform_vec3(&self, backend: &mut B, name: &str, v: [f32; 3]) {
        if !backend.set_uniform(&self.program, name, UniformData::Vec3(v)) {
            trace!("uniform {} not found in program", name);
        }
    }

    pub fn set_uniform_mat4(&self, backend: &mut B, name: &str, m: [[f32; 4]; 4]) {
        if !backend.set_uniform(&self.program, name, UniformData::Mat4(m)) {
            trace!("uniform {} not found in program", name);
        }
    }

    pub fn destroy(self, backend: &mut B) {
        backend.use_program(None);
    }

    #[cfg(test)]
    pub fn program(&self) -> &B::Program {
        &self.program
    }
}
