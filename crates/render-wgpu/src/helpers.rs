use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use lightlab_scene::{Helper, LightKind, SceneGraph};
use std::f32::consts::TAU;

const CIRCLE_SEGMENTS: usize = 32;
const CONE_RAYS: usize = 5;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Line-list vertices for every visible helper.
///
/// Rebuilt from the current light state each frame, so a helper always
/// matches the light it describes.
pub(crate) fn helper_lines(scene: &SceneGraph) -> Vec<LineVertex> {
    let mut lines = LineBatch::default();
    for (_, node, helper) in scene.helpers() {
        if !node.visible {
            continue;
        }
        let (Some(light_node), Some(light)) = (scene.get(helper.light), scene.light(helper.light))
        else {
            continue;
        };
        let [r, g, b] = helper.color.unwrap_or(light.color).to_linear();
        lines.color = [r, g, b, 1.0];
        let position = light_node.transform.position;
        lines.add_helper(helper, position, &light.kind);
    }
    lines.vertices
}

#[derive(Default)]
struct LineBatch {
    vertices: Vec<LineVertex>,
    color: [f32; 4],
}

impl LineBatch {
    fn add_helper(&mut self, helper: &Helper, position: Vec3, kind: &LightKind) {
        let size = helper.size;
        match *kind {
            LightKind::Ambient => {}
            LightKind::Directional { target } => {
                let dir = (target - position).normalize_or(Vec3::NEG_Y);
                self.rectangle(position, dir, size * 2.0, size * 2.0);
                self.line(position, target);
            }
            LightKind::Hemisphere { .. } => self.octahedron(position, size),
            LightKind::Point { .. } => {
                self.circle(position, Vec3::X, size);
                self.circle(position, Vec3::Y, size);
                self.circle(position, Vec3::Z, size);
            }
            LightKind::RectArea {
                width,
                height,
                target,
            } => {
                let dir = (target - position).normalize_or(Vec3::NEG_Z);
                self.rectangle(position, dir, width, height);
            }
            LightKind::Spot {
                target,
                distance,
                angle,
                ..
            } => {
                let to_target = target - position;
                let dir = to_target.normalize_or(Vec3::NEG_Y);
                let length = if distance > 0.0 {
                    distance
                } else {
                    to_target.length().max(size)
                };
                let base = position + dir * length;
                let radius = length * angle.tan();
                self.circle(base, dir, radius);
                let (right, up) = basis(dir);
                for i in 0..CONE_RAYS {
                    let a = i as f32 / CONE_RAYS as f32 * TAU;
                    self.line(position, base + (right * a.cos() + up * a.sin()) * radius);
                }
            }
        }
    }

    fn line(&mut self, a: Vec3, b: Vec3) {
        let color = self.color;
        self.vertices.push(LineVertex {
            position: a.to_array(),
            color,
        });
        self.vertices.push(LineVertex {
            position: b.to_array(),
            color,
        });
    }

    fn loop_through(&mut self, points: &[Vec3]) {
        for (i, &p) in points.iter().enumerate() {
            self.line(p, points[(i + 1) % points.len()]);
        }
    }

    fn rectangle(&mut self, center: Vec3, normal: Vec3, width: f32, height: f32) {
        let (right, up) = basis(normal);
        let (hw, hh) = (right * width * 0.5, up * height * 0.5);
        self.loop_through(&[
            center - hw - hh,
            center + hw - hh,
            center + hw + hh,
            center - hw + hh,
        ]);
    }

    fn circle(&mut self, center: Vec3, normal: Vec3, radius: f32) {
        let (right, up) = basis(normal);
        let points: Vec<Vec3> = (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let a = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
                center + (right * a.cos() + up * a.sin()) * radius
            })
            .collect();
        self.loop_through(&points);
    }

    fn octahedron(&mut self, center: Vec3, radius: f32) {
        let top = center + Vec3::Y * radius;
        let bottom = center - Vec3::Y * radius;
        let ring = [Vec3::X, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Z].map(|d| center + d * radius);
        self.loop_through(&ring);
        for p in ring {
            self.line(top, p);
            self.line(bottom, p);
        }
    }
}

/// Two unit vectors spanning the plane perpendicular to `normal`.
fn basis(normal: Vec3) -> (Vec3, Vec3) {
    let reference = if normal.y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };
    let right = normal.cross(reference).normalize();
    let up = right.cross(normal);
    (right, up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_scene::{HelperToggle, demo};

    #[test]
    fn demo_helpers_produce_line_pairs() {
        let (scene, _) = demo::build((800.0, 600.0));
        let lines = helper_lines(&scene);
        assert!(!lines.is_empty());
        assert_eq!(lines.len() % 2, 0);
    }

    #[test]
    fn hidden_helpers_draw_nothing() {
        let (mut scene, _) = demo::build((800.0, 600.0));
        scene.hide_helpers();
        assert!(helper_lines(&scene).is_empty());
        scene.show_helpers();
        assert!(!helper_lines(&scene).is_empty());
    }

    #[test]
    fn spot_helper_uses_override_color() {
        let (scene, _) = demo::build((800.0, 600.0));
        let orange = lightlab_common::Color::from_hex(0xffa500).to_linear();
        let lines = helper_lines(&scene);
        assert!(
            lines
                .iter()
                .any(|v| v.color == [orange[0], orange[1], orange[2], 1.0])
        );
    }

    #[test]
    fn spot_helper_follows_target() {
        let (mut scene, rig) = demo::build((800.0, 600.0));
        let before = helper_lines(&scene);
        scene
            .light_mut(rig.spot)
            .unwrap()
            .set_target(Vec3::new(-2.0, -1.0, 0.0));
        let after = helper_lines(&scene);
        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
    }

    #[test]
    fn basis_is_orthonormal() {
        for n in [Vec3::Y, Vec3::NEG_Y, Vec3::X, Vec3::new(0.55, -1.0, 0.0).normalize()] {
            let (r, u) = basis(n);
            assert!(r.dot(n).abs() < 1e-5);
            assert!(u.dot(n).abs() < 1e-5);
            assert!(r.dot(u).abs() < 1e-5);
            assert!((r.length() - 1.0).abs() < 1e-5);
            assert!((u.length() - 1.0).abs() < 1e-5);
        }
    }
}
