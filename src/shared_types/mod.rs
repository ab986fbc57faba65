use nalgebra::Vector3;

/// One of the six faces of a cuboid element.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CubeFace {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl CubeFace {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "north" => Some(CubeFace::North),
            "south" => Some(CubeFace::South),
            "east" => Some(CubeFace::East),
            "west" => Some(CubeFace::West),
            "up" => Some(CubeFace::Up),
            "down" => Some(CubeFace::Down),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Axis3 {
    X,
    Y,
    Z,
}

/// Animation timestamps are stored in these ticks; Blockbench authors
/// keyframe times in seconds.
pub const TICKS_PER_SECOND: f32 = 20.0;

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn vec3(v: [f32; 3]) -> Vector3<f32> {
    Vector3::new(v[0], v[1], v[2])
}
