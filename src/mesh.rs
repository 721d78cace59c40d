use std::rc::Rc;

use crate::backend::{Attribute, Backend};
use crate::cube::Face;
use crate::error::GraphicsError;

/// One cube face: its own index and normal buffers, plus shared handles to
/// the position and colour buffers. Dropping a face releases only what it
/// owns.
pub struct FaceMesh<B: Backend> {
    positions: Rc<B::Buffer>,
    colours: Rc<B::Buffer>,
    normals: B::Buffer,
    indices: B::Indices,
}

impl<B: Backend> FaceMesh<B> {
    pub fn new(backend: &mut B, positions: &Rc<B::Buffer>, colours: &Rc<B::Buffer>, face: &Face)
               -> Result<FaceMesh<B>, GraphicsError> {
        let indices = backend.create_indices(&face.indices)?;
        let normals = backend.create_buffer(Attribute::Normal, &face.normals())?;
        Ok(FaceMesh {
            positions: positions.clone(),
            colours: colours.clone(),
            normals,
            indices,
        })
    }

    /// Binds this face's buffers and draws its two triangles.
    pub fn draw(&self, backend: &mut B) -> Result<(), GraphicsError> {
        backend.draw_indexed([&*self.positions, &*self.colours, &self.normals], &self.indices)
    }
}
