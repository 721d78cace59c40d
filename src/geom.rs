#[derive(Copy, Clone)]
pub struct Position {
    pub in_position: [f32; 3],
}

implement_vertex!(Position, in_position);

#[derive(Copy, Clone)]
pub struct Colour {
    pub in_colour: [f32; 3],
}

implement_vertex!(Colour, in_colour);

#[derive(Copy, Clone)]
pub struct Normal {
    pub in_normal: [f32; 3],
}

implement_vertex!(Normal, in_normal);

pub fn positions(data: &[[f32; 3]]) -> Vec<Position> {
    data.iter().map(|&p| Position { in_position: p }).collect()
}

pub fn colours(data: &[[f32; 3]]) -> Vec<Colour> {
    data.iter().map(|&c| Colour { in_colour: c }).collect()
}

pub fn normals(data: &[[f32; 3]]) -> Vec<Normal> {
    data.iter().map(|&n| Normal { in_normal: n }).collect()
}
