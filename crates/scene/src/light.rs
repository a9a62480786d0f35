use glam::Vec3;
use lightlab_common::{Color, NodeId};
use serde::{Deserialize, Serialize};

/// Per-kind light parameters. Position comes from the owning node's transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel rays travelling from the node position towards `target`.
    Directional { target: Vec3 },
    /// Sky color from above (node position is the up direction), ground color from below.
    Hemisphere { ground_color: Color },
    /// Omnidirectional light. `distance == 0` means unlimited range.
    Point { distance: f32, decay: f32 },
    /// Rectangular emitter facing `target`.
    RectArea {
        width: f32,
        height: f32,
        target: Vec3,
    },
    /// Cone of light aimed at `target`; `angle` is the half-angle in radians.
    Spot {
        target: Vec3,
        distance: f32,
        angle: f32,
        penumbra: f32,
        decay: f32,
    },
}

impl LightKind {
    pub fn label(&self) -> &'static str {
        match self {
            LightKind::Ambient => "ambient",
            LightKind::Directional { .. } => "directional",
            LightKind::Hemisphere { .. } => "hemisphere",
            LightKind::Point { .. } => "point",
            LightKind::RectArea { .. } => "rect-area",
            LightKind::Spot { .. } => "spot",
        }
    }

    /// Point the light is aimed at, for kinds that have one.
    pub fn target(&self) -> Option<Vec3> {
        match *self {
            LightKind::Directional { target }
            | LightKind::RectArea { target, .. }
            | LightKind::Spot { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// A light source.
///
/// `enabled == false` removes the light from illumination entirely; renderers
/// must skip it rather than merely hiding it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub color: Color,
    pub intensity: f32,
    pub enabled: bool,
    pub kind: LightKind,
}

impl Light {
    pub fn new(kind: LightKind, color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            enabled: true,
            kind,
        }
    }

    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    pub fn directional(color: Color, intensity: f32) -> Self {
        Self::new(
            LightKind::Directional { target: Vec3::ZERO },
            color,
            intensity,
        )
    }

    pub fn hemisphere(sky: Color, ground: Color, intensity: f32) -> Self {
        Self::new(
            LightKind::Hemisphere {
                ground_color: ground,
            },
            sky,
            intensity,
        )
    }

    pub fn point(color: Color, intensity: f32) -> Self {
        Self::new(
            LightKind::Point {
                distance: 0.0,
                decay: 2.0,
            },
            color,
            intensity,
        )
    }

    pub fn rect_area(color: Color, intensity: f32, width: f32, height: f32) -> Self {
        Self::new(
            LightKind::RectArea {
                width,
                height,
                target: Vec3::ZERO,
            },
            color,
            intensity,
        )
    }

    pub fn spot(
        color: Color,
        intensity: f32,
        distance: f32,
        angle: f32,
        penumbra: f32,
        decay: f32,
    ) -> Self {
        Self::new(
            LightKind::Spot {
                target: Vec3::ZERO,
                distance,
                angle,
                penumbra,
                decay,
            },
            color,
            intensity,
        )
    }

    /// Color scaled by intensity, or black when disabled.
    pub fn radiance(&self) -> [f32; 3] {
        if !self.enabled {
            return [0.0; 3];
        }
        let [r, g, b] = self.color.to_linear();
        [r * self.intensity, g * self.intensity, b * self.intensity]
    }

    /// Re-aim a directional, rect-area or spot light. Other kinds ignore it.
    pub fn set_target(&mut self, new_target: Vec3) {
        match &mut self.kind {
            LightKind::Directional { target }
            | LightKind::RectArea { target, .. }
            | LightKind::Spot { target, .. } => *target = new_target,
            _ => {}
        }
    }
}

/// Wireframe visualisation of a light. Visibility lives on the owning node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Helper {
    pub light: NodeId,
    pub size: f32,
    /// Overrides the light's own color when set.
    pub color: Option<Color>,
}

impl Helper {
    pub fn new(light: NodeId, size: f32) -> Self {
        Self {
            light,
            size,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}
