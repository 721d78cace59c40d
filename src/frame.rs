use na::{Matrix4, Perspective3, Rotation3, Unit, Vector3, Vector4};

pub const ANGLE_STEP: f32 = 1.0;
pub const FULL_TURN: f32 = 360.0;

pub const FIELD_OF_VIEW: f32 = 60.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 10.0;
pub const CAMERA_DISTANCE: f32 = 5.0;
pub const TILT: f32 = 45.0;

pub const LIGHT_LOCATION: [f32; 4] = [10.0, 10.0, 5.0, 1.0];

pub struct FrameOutput {
    pub angle: f32,
    pub mvp: Matrix4<f32>,
    pub light: Vector4<f32>,
}

/// Rotation state of the cube. The angle is in degrees and only moves while
/// rotation is enabled.
pub struct FrameUpdater {
    angle: f32,
    light_base: Vector4<f32>,
}

pub fn projection(aspect: f32) -> Matrix4<f32> {
    Perspective3::new(aspect, FIELD_OF_VIEW.to_radians(), Z_NEAR, Z_FAR).to_homogeneous()
}

/// translate(0, 0, -5) * rotateY(angle) * rotate(45deg, (1, 1, 1))
pub fn view(angle: f32) -> Matrix4<f32> {
    let translate = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -CAMERA_DISTANCE));
    let spin = Rotation3::from_axis_angle(&Vector3::y_axis(), angle.to_radians());
    let tilt = Rotation3::from_axis_angle(&Unit::new_normalize(Vector3::new(1.0, 1.0, 1.0)), TILT.to_radians());
    translate * spin.to_homogeneous() * tilt.to_homogeneous()
}

pub fn light_position(base: &Vector4<f32>, angle: f32) -> Vector4<f32> {
    Vector4::new(base.x, base.y * angle.to_radians().sin(), base.z, base.w)
}

impl Default for FrameUpdater {
    fn default() -> FrameUpdater {
        FrameUpdater {
            angle: 0.0,
            light_base: Vector4::from(LIGHT_LOCATION),
        }
    }
}

impl FrameUpdater {
    pub fn new() -> FrameUpdater {
        FrameUpdater::default()
    }

    #[cfg(test)]
    pub fn with_angle(angle: f32) -> FrameUpdater {
        FrameUpdater {
            angle,
            ..FrameUpdater::default()
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn light_base(&self) -> Vector4<f32> {
        self.light_base
    }

    /// Wraps to 0 only once the angle has gone past a full turn.
    pub fn step(&mut self, rotating: bool) {
        if rotating {
            self.angle += ANGLE_STEP;
            if self.angle > FULL_TURN {
                self.angle = 0.0;
            }
        }
    }

    pub fn advance(&mut self, rotating: bool, aspect: f32) -> FrameOutput {
        self.step(rotating);
        FrameOutput {
            angle: self.angle,
            mvp: projection(aspect) * view(self.angle),
            light: light_position(&self.light_base, self.angle),
        }
    }
}
