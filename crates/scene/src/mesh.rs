use lightlab_common::Color;
use serde::{Deserialize, Serialize};

/// Parametric primitive geometry. Backends tessellate these themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// Lies in the local XY plane, facing +Z.
    Plane { width: f32, height: f32 },
}

impl Primitive {
    pub fn label(&self) -> &'static str {
        match self {
            Primitive::Sphere { .. } => "sphere",
            Primitive::Box { .. } => "box",
            Primitive::Torus { .. } => "torus",
            Primitive::Plane { .. } => "plane",
        }
    }
}

/// Surface appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// Lit by every enabled light.
    Physical { color: Color, roughness: f32 },
    /// Flat color that ignores scene lights.
    Matcap { color: Color },
}

impl Default for Material {
    fn default() -> Self {
        Material::Physical {
            color: Color::WHITE,
            roughness: 1.0,
        }
    }
}

impl Material {
    pub fn color(&self) -> Color {
        match *self {
            Material::Physical { color, .. } | Material::Matcap { color } => color,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Physical { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub primitive: Primitive,
    pub material: Material,
}

impl Mesh {
    pub fn new(primitive: Primitive, material: Material) -> Self {
        Self {
            primitive,
            material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_is_lit_white() {
        let m = Material::default();
        assert!(m.is_lit());
        assert_eq!(m.color(), Color::WHITE);
    }

    #[test]
    fn matcap_is_unlit() {
        let m = Material::Matcap {
            color: Color::from_hex(0xefd5af),
        };
        assert!(!m.is_lit());
        assert_eq!(m.color().to_hex(), 0xefd5af);
    }
}
