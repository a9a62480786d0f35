//! The lighting demo scene: six light kinds, their helpers, three spinning
//! primitives and a floor.

use crate::graph::{Node, SceneGraph, Spin};
use crate::light::{Helper, Light};
use crate::mesh::{Material, Mesh, Primitive};
use glam::Vec3;
use lightlab_common::{Color, NodeId};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Angular rate shared by every primitive about the Y axis.
pub const SPIN_RATE_Y: f32 = 0.1;
/// Angular rate of the cube and torus about the X axis.
pub const SPIN_RATE_X: f32 = 0.15;

/// Handles to every node the demo creates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemoRig {
    pub ambient: NodeId,
    pub directional: NodeId,
    pub hemisphere: NodeId,
    pub point: NodeId,
    pub rect_area: NodeId,
    pub spot: NodeId,
    pub sphere: NodeId,
    pub cube: NodeId,
    pub torus: NodeId,
    pub floor: NodeId,
}

impl DemoRig {
    pub fn lights(&self) -> [NodeId; 6] {
        [
            self.ambient,
            self.directional,
            self.hemisphere,
            self.point,
            self.rect_area,
            self.spot,
        ]
    }

    pub fn spinning(&self) -> [NodeId; 3] {
        [self.sphere, self.cube, self.torus]
    }
}

/// Build the demo scene. The floor plane is `floor_size` wide and deep,
/// normally the initial viewport size in logical pixels.
pub fn build(floor_size: (f32, f32)) -> (SceneGraph, DemoRig) {
    let mut scene = SceneGraph::new();
    let up = Vec3::new(0.0, 1.0, 0.0);

    // Lights
    let ambient = scene.add(Node::light(
        "ambient light",
        Light::ambient(Color::from_hex(0xe0ff21f), 0.5),
    ));
    let directional = scene.add(
        Node::light(
            "directional light",
            Light::directional(Color::from_hex(0xeeff44f), 0.3),
        )
        .at(up),
    );
    let hemisphere = scene.add(
        Node::light(
            "hemisphere light",
            Light::hemisphere(Color::from_hex(0x00fffc), Color::from_hex(0x0003ff), 0.3),
        )
        .at(up),
    );
    let point = scene.add(
        Node::light("point light", Light::point(Color::from_hex(0xffffff), 0.5))
            .at(Vec3::new(1.0, 0.25, 0.2)),
    );
    let rect_area = scene.add(
        Node::light(
            "rect area light",
            Light::rect_area(Color::from_hex(0x4e00ff), 2.0, 3.0, 1.0),
        )
        .at(Vec3::new(-1.5, 0.0, 1.5)),
    );
    let mut spot_light = Light::spot(Color::from_hex(0xfffff), 0.5, 10.0, PI * 0.1, 0.0, 1.0);
    spot_light.set_target(Vec3::new(0.55, -1.0, 0.0));
    let spot = scene.add(Node::light("spot light", spot_light).at(up));

    // Helpers
    scene.add(Node::helper(
        "hemisphere helper",
        Helper::new(hemisphere, 0.1),
    ));
    scene.add(Node::helper(
        "directional helper",
        Helper::new(directional, 0.2),
    ));
    scene.add(Node::helper("point helper", Helper::new(point, 0.2)));
    scene.add(Node::helper(
        "spot helper",
        Helper::new(spot, 0.2).with_color(Color::from_hex(0xffa500)),
    ));
    scene.add(Node::helper("rect area helper", Helper::new(rect_area, 1.0)));

    // Objects
    let material = Material::Physical {
        color: Color::WHITE,
        roughness: 0.4,
    };
    let sphere = scene.add(
        Node::mesh(
            "sphere",
            Mesh::new(
                Primitive::Sphere {
                    radius: 0.5,
                    width_segments: 32,
                    height_segments: 32,
                },
                material,
            ),
        )
        .at(Vec3::new(-1.5, 0.0, 0.0)),
    );
    let cube = scene.add(Node::mesh(
        "cube",
        Mesh::new(
            Primitive::Box {
                width: 0.75,
                height: 0.75,
                depth: 0.75,
            },
            material,
        ),
    ));
    let torus = scene.add(
        Node::mesh(
            "torus",
            Mesh::new(
                Primitive::Torus {
                    radius: 0.3,
                    tube: 0.2,
                    radial_segments: 32,
                    tubular_segments: 64,
                },
                material,
            ),
        )
        .at(Vec3::new(1.5, 0.0, 0.0)),
    );
    let floor = scene.add(
        Node::mesh(
            "floor",
            Mesh::new(
                Primitive::Plane {
                    width: floor_size.0,
                    height: floor_size.1,
                },
                Material::Matcap {
                    color: Color::from_hex(0xefd5af),
                },
            ),
        )
        .at(Vec3::new(0.0, -0.65, 0.0))
        .with_rotation(Vec3::new(-PI * 0.5, 0.0, 0.0)),
    );

    scene.set_spin(sphere, Spin::new(0.0, SPIN_RATE_Y, 0.0));
    scene.set_spin(cube, Spin::new(SPIN_RATE_X, SPIN_RATE_Y, 0.0));
    scene.set_spin(torus, Spin::new(SPIN_RATE_X, SPIN_RATE_Y, 0.0));

    tracing::info!(nodes = scene.len(), "demo scene built");

    let rig = DemoRig {
        ambient,
        directional,
        hemisphere,
        point,
        rect_area,
        spot,
        sphere,
        cube,
        torus,
        floor,
    };
    (scene, rig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::LightKind;
    use crate::toggle::{HelperToggle, LightToggle};

    #[test]
    fn demo_has_six_lights_five_helpers_four_meshes() {
        let (scene, rig) = build((1280.0, 720.0));
        assert_eq!(scene.lights().count(), 6);
        assert_eq!(scene.helpers().count(), 5);
        assert_eq!(scene.meshes().count(), 4);
        for id in rig.lights() {
            assert!(scene.light(id).is_some());
        }
    }

    #[test]
    fn every_helper_points_at_a_demo_light() {
        let (scene, rig) = build((800.0, 600.0));
        let lights = rig.lights();
        for (_, _, helper) in scene.helpers() {
            assert!(lights.contains(&helper.light));
        }
    }

    #[test]
    fn oversized_color_literals_are_coerced() {
        let (scene, rig) = build((800.0, 600.0));
        assert_eq!(scene.light(rig.ambient).unwrap().color.to_hex(), 0x0ff21f);
        assert_eq!(scene.light(rig.spot).unwrap().color.to_hex(), 0x0fffff);
    }

    #[test]
    fn spot_light_is_aimed_below_the_cube() {
        let (scene, rig) = build((800.0, 600.0));
        let spot = scene.light(rig.spot).unwrap();
        match spot.kind {
            LightKind::Spot {
                target,
                distance,
                angle,
                ..
            } => {
                assert_eq!(target, Vec3::new(0.55, -1.0, 0.0));
                assert_eq!(distance, 10.0);
                assert!((angle - PI * 0.1).abs() < 1e-6);
            }
            other => panic!("unexpected light kind {other:?}"),
        }
    }

    #[test]
    fn floor_is_sized_from_viewport_and_laid_flat() {
        let (scene, rig) = build((1024.0, 768.0));
        let floor = scene.get(rig.floor).unwrap();
        assert_eq!(floor.transform.position.y, -0.65);
        assert!((floor.transform.rotation.x + PI * 0.5).abs() < 1e-6);
        match floor.kind {
            crate::graph::NodeKind::Mesh(mesh) => {
                assert_eq!(
                    mesh.primitive,
                    Primitive::Plane {
                        width: 1024.0,
                        height: 768.0
                    }
                );
                assert!(!mesh.material.is_lit());
            }
            _ => panic!("floor is not a mesh"),
        }
    }

    #[test]
    fn only_primitives_spin() {
        let (mut scene, rig) = build((800.0, 600.0));
        scene.animate(10.0);
        let sphere = scene.get(rig.sphere).unwrap().transform.rotation;
        let cube = scene.get(rig.cube).unwrap().transform.rotation;
        assert_eq!(sphere.x, 0.0);
        assert!((sphere.y - 1.0).abs() < 1e-5);
        assert!((cube.x - 1.5).abs() < 1e-5);
        assert_eq!(scene.get(rig.floor).unwrap().transform.rotation.y, 0.0);
        assert!(scene.spin(rig.floor).is_none());
    }

    #[test]
    fn toggles_cover_the_whole_rig() {
        let (mut scene, rig) = build((800.0, 600.0));
        scene.turn_off();
        scene.hide_helpers();
        for id in rig.lights() {
            assert!(!scene.light(id).unwrap().enabled);
        }
        assert_eq!(scene.helpers().filter(|(_, n, _)| n.visible).count(), 0);
    }
}
