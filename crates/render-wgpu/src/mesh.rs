use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

/// Pyramid corners: position then texture coordinate.
#[rustfmt::skip]
const PYRAMID_CORNERS: [(Vec3, Vec2); 4] = [
    (Vec3::new(-1.0, -1.0,  0.5773),  Vec2::new(0.0, 0.0)),
    (Vec3::new( 0.0, -1.0, -1.15475), Vec2::new(0.5, 0.0)),
    (Vec3::new( 1.0, -1.0,  0.5773),  Vec2::new(1.0, 0.0)),
    (Vec3::new( 0.0,  1.0,  0.0),     Vec2::new(0.5, 1.0)),
];

#[rustfmt::skip]
const PYRAMID_FACES: [[usize; 3]; 4] = [
    [0, 3, 1],
    [1, 3, 2],
    [2, 3, 0],
    [0, 1, 2],
];

/// Flat-shaded triangular pyramid.
///
/// Corners are duplicated per face so each face carries its own outward
/// normal.
pub fn pyramid_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let centroid = PYRAMID_CORNERS
        .iter()
        .fold(Vec3::ZERO, |acc, (p, _)| acc + *p)
        / PYRAMID_CORNERS.len() as f32;

    let mut vertices = Vec::with_capacity(PYRAMID_FACES.len() * 3);
    for face in PYRAMID_FACES {
        let [a, b, c] = face.map(|i| PYRAMID_CORNERS[i].0);
        let mut normal = (b - a).cross(c - a).normalize_or_zero();
        let face_center = (a + b + c) / 3.0;
        if normal.dot(face_center - centroid) < 0.0 {
            normal = -normal;
        }

        for i in face {
            let (position, uv) = PYRAMID_CORNERS[i];
            vertices.push(Vertex {
                position: position.to_array(),
                tex_coords: uv.to_array(),
                normal: normal.to_array(),
            });
        }
    }

    let indices = (0..vertices.len() as u16).collect();
    (vertices, indices)
}
