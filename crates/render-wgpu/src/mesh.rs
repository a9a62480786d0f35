use bytemuck::{Pod, Zeroable};
use lightlab_scene::Primitive;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// CPU-side triangle list for one primitive.
#[derive(Debug, Clone, Default)]
pub(crate) struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Tessellate a primitive in its local space.
pub(crate) fn tessellate(primitive: &Primitive) -> MeshData {
    match *primitive {
        Primitive::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere(radius, width_segments.max(3), height_segments.max(2)),
        Primitive::Box {
            width,
            height,
            depth,
        } => cuboid(width, height, depth),
        Primitive::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(radius, tube, radial_segments.max(3), tubular_segments.max(3)),
        Primitive::Plane { width, height } => plane(width, height),
    }
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let row = width_segments + 1;

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let normal = [
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            ];
            mesh.vertices.push(Vertex {
                position: normal.map(|c| c * radius),
                normal,
            });
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // The pole rows collapse to a point; skip their degenerate triangles.
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0],  [[-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z]]),
        ([0.0, 0.0, -1.0], [[ x, -y, -z], [-x, -y, -z], [-x,  y, -z], [ x,  y, -z]]),
        ([1.0, 0.0, 0.0],  [[ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z]]),
        ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z]]),
        ([0.0, 1.0, 0.0],  [[-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z]]),
        ([0.0, -1.0, 0.0], [[-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z]]),
    ];

    let mut mesh = MeshData::default();
    for (normal, corners) in faces {
        let base = mesh.vertices.len() as u32;
        mesh.vertices
            .extend(corners.iter().map(|&position| Vertex { position, normal }));
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    mesh
}

fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let row = tubular_segments + 1;

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let ring = radius + tube * v.cos();
            let position = [ring * u.cos(), ring * u.sin(), tube * v.sin()];
            let center = [radius * u.cos(), radius * u.sin(), 0.0];
            let offset = [
                position[0] - center[0],
                position[1] - center[1],
                position[2] - center[2],
            ];
            let len = (offset[0] * offset[0] + offset[1] * offset[1] + offset[2] * offset[2])
                .sqrt()
                .max(f32::EPSILON);
            mesh.vertices.push(Vertex {
                position,
                normal: offset.map(|c| c / len),
            });
        }
    }

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

fn plane(width: f32, height: f32) -> MeshData {
    let (x, y) = (width * 0.5, height * 0.5);
    let normal = [0.0, 0.0, 1.0];
    MeshData {
        vertices: [[-x, -y, 0.0], [x, -y, 0.0], [x, y, 0.0], [-x, y, 0.0]]
            .into_iter()
            .map(|position| Vertex { position, normal })
            .collect(),
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}
