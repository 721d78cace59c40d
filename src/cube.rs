use na::Vector3;

pub const NUM_VERTICES: usize = 8;
pub const NUM_FACES: usize = 6;
pub const INDICES_PER_FACE: usize = 6;

/*
 *   7 ---- 6
 *   |      |
 * 3 ---- 2 |
 * | 4 ---- 5
 * |      |
 * 0 ---- 1
 */
pub const VERTICES: [[f32; 3]; NUM_VERTICES] = [
    [-1.0, -1.0,  1.0],
    [ 1.0, -1.0,  1.0],
    [ 1.0,  1.0,  1.0],
    [-1.0,  1.0,  1.0],
    [-1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0],
    [ 1.0,  1.0, -1.0],
    [-1.0,  1.0, -1.0],
];

pub const COLOURS: [[f32; 3]; NUM_VERTICES] = [
    [0.0, 0.0, 1.0], // blue
    [1.0, 0.0, 1.0], // magenta
    [1.0, 1.0, 1.0], // white
    [0.0, 1.0, 1.0], // cyan
    [0.0, 0.0, 0.0], // black
    [1.0, 0.0, 0.0], // red
    [1.0, 1.0, 0.0], // yellow
    [0.0, 1.0, 0.0], // green
];

// Two counter-clockwise triangles per face.
pub const FACE_INDICES: [[u8; INDICES_PER_FACE]; NUM_FACES] = [
    [0, 1, 2, 0, 2, 3], // front
    [1, 5, 6, 1, 6, 2], // right
    [5, 4, 7, 5, 7, 6], // back
    [4, 0, 3, 4, 3, 7], // left
    [3, 2, 6, 3, 6, 7], // top
    [1, 0, 4, 1, 4, 5], // bottom
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Face {
    pub indices: [u8; INDICES_PER_FACE],
    pub normal: Vector3<f32>,
}

impl Face {
    /// One copy of the flat normal per vertex slot, so that any index into
    /// the shared vertex array fetches the same normal.
    pub fn normals(&self) -> [[f32; 3]; NUM_VERTICES] {
        [[self.normal.x, self.normal.y, self.normal.z]; NUM_VERTICES]
    }
}

pub struct CubeGeometry {
    pub positions: [[f32; 3]; NUM_VERTICES],
    pub colours: [[f32; 3]; NUM_VERTICES],
    pub faces: [Face; NUM_FACES],
}

fn vertex(vertices: &[[f32; 3]], index: u8) -> Vector3<f32> {
    let v = vertices[index as usize];
    Vector3::new(v[0], v[1], v[2])
}

/// normalize((B - A) x (C - B)) for the triangle A, B, C.
pub fn face_normal(vertices: &[[f32; 3]], triangle: [u8; 3]) -> Vector3<f32> {
    let a = vertex(vertices, triangle[0]);
    let b = vertex(vertices, triangle[1]);
    let c = vertex(vertices, triangle[2]);
    let ab = b - a;
    let bc = c - b;
    ab.cross(&bc).normalize()
}

pub fn build_geometry() -> CubeGeometry {
    let mut faces = [Face { indices: [0; INDICES_PER_FACE], normal: Vector3::zeros() }; NUM_FACES];
    for (face, indices) in faces.iter_mut().zip(FACE_INDICES.iter()) {
        face.indices = *indices;
        face.normal = face_normal(&VERTICES, [indices[0], indices[1], indices[2]]);
    }
    CubeGeometry {
        positions: VERTICES,
        colours: COLOURS,
        faces,
    }
}
