use std::collections::BTreeMap;

use crate::error::{GraphicsError, ShaderError};

/// Per-vertex inputs of the cube program, with the slot each one is bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Colour,
    Normal,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Position, Attribute::Colour, Attribute::Normal];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Position => "in_position",
            Attribute::Colour => "in_colour",
            Attribute::Normal => "in_normal",
        }
    }

    pub fn slot(self) -> u32 {
        match self {
            Attribute::Position => 0,
            Attribute::Colour => 1,
            Attribute::Normal => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformData {
    Vec3([f32; 3]),
    Mat4([[f32; 4]; 4]),
}

/// Uniform values last uploaded to a program, by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniformTable {
    values: BTreeMap<String, UniformData>,
}

impl UniformTable {
    pub fn set(&mut self, name: &str, value: UniformData) {
        self.values.insert(name.to_string(), value);
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&UniformData> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformData)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Fixed-function state set up once before the first frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    pub cull_back_faces: bool,
    pub depth_test: bool,
    pub depth_clamp: bool,
    pub depth_range: (f32, f32),
    pub viewport: (u32, u32),
    pub clear_colour: [f32; 4],
}

impl RenderState {
    pub fn new(width: u32, height: u32) -> RenderState {
        RenderState {
            cull_back_faces: true,
            depth_test: true,
            depth_clamp: true,
            depth_range: (0.0, 1.0),
            viewport: (width, height),
            clear_colour: [0.0, 0.0, 0.0, 0.0],
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1.max(1) as f32
    }
}

/// The graphics calls the renderer is built on.
///
/// All calls assume the context is current on the calling thread. Handles
/// release their GPU object when dropped.
pub trait Backend {
    type Buffer;
    type Indices;
    type Program;

    fn apply_state(&mut self, state: &RenderState);

    fn resize(&mut self, width: u32, height: u32);

    fn create_buffer(&mut self, attribute: Attribute, data: &[[f32; 3]]) -> Result<Self::Buffer, GraphicsError>;

    /// Unsigned byte indices drawn as a triangle list.
    fn create_indices(&mut self, indices: &[u8]) -> Result<Self::Indices, GraphicsError>;

    /// Compiles both stages and links them. A compile failure names the
    /// stage that failed and carries that stage's log.
    fn link_program(&mut self, vertex: &str, fragment: &str, bindings: &[Attribute])
                    -> Result<Self::Program, ShaderError>;

    fn use_program(&mut self, program: Option<&Self::Program>);

    /// Returns false if `program` has no active uniform called `name`.
    fn set_uniform(&mut self, program: &Self::Program, name: &str, value: UniformData) -> bool;

    fn begin_frame(&mut self, clear_colour: [f32; 4]);

    /// Draws with the current program; attributes in slot order.
    fn draw_indexed(&mut self, attributes: [&Self::Buffer; 3], indices: &Self::Indices) -> Result<(), GraphicsError>;

    fn present(&mut self) -> Result<(), GraphicsError>;

    fn check_error(&mut self, hint: &str) -> Result<(), GraphicsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_slots_follow_declaration_order() {
        for (i, a) in Attribute::ALL.iter().enumerate() {
            assert_eq!(a.slot(), i as u32);
        }
        assert_eq!(Attribute::Colour.name(), "in_colour");
    }

    #[test]
    fn uniform_table_keeps_last_value() {
        let mut table = UniformTable::default();
        table.set("u_lightsource", UniformData::Vec3([1.0, 2.0, 3.0]));
        table.set("u_lightsource", UniformData::Vec3([4.0, 5.0, 6.0]));
        assert_eq!(table.iter().count(), 1);
        assert_eq!(table.get("u_lightsource"), Some(&UniformData::Vec3([4.0, 5.0, 6.0])));
    }

    #[test]
    fn aspect_ratio_of_default_window() {
        let state = RenderState::new(640, 480);
        assert!((state.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }
}
