//! Bulk on/off switches exposed to the debug panel.

use crate::graph::SceneGraph;

/// Switch every light in a scene on or off.
pub trait LightToggle {
    fn turn_on(&mut self);
    fn turn_off(&mut self);
}

/// Show or hide every light helper in a scene.
pub trait HelperToggle {
    fn show_helpers(&mut self);
    fn hide_helpers(&mut self);
}

impl SceneGraph {
    fn set_lights_enabled(&mut self, enabled: bool) {
        let mut count = 0;
        for light in self.lights_mut() {
            light.enabled = enabled;
            count += 1;
        }
        tracing::debug!(enabled, count, "lights switched");
    }

    fn set_helpers_visible(&mut self, visible: bool) {
        let mut count = 0;
        for node in self.helper_nodes_mut() {
            node.visible = visible;
            count += 1;
        }
        tracing::debug!(visible, count, "helpers switched");
    }
}

impl LightToggle for SceneGraph {
    fn turn_on(&mut self) {
        self.set_lights_enabled(true);
    }

    fn turn_off(&mut self) {
        self.set_lights_enabled(false);
    }
}

impl HelperToggle for SceneGraph {
    fn show_helpers(&mut self) {
        self.set_helpers_visible(true);
    }

    fn hide_helpers(&mut self) {
        self.set_helpers_visible(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::light::{Helper, Light};
    use crate::mesh::{Material, Mesh, Primitive};
    use lightlab_common::Color;

    fn scene() -> SceneGraph {
        let mut s = SceneGraph::new();
        let a = s.add(Node::light("ambient", Light::ambient(Color::WHITE, 0.5)));
        let p = s.add(Node::light("point", Light::point(Color::WHITE, 0.5)));
        s.add(Node::helper("point helper", Helper::new(p, 0.2)));
        s.add(Node::helper("ambient helper", Helper::new(a, 0.2)));
        s.add(Node::mesh(
            "plane",
            Mesh::new(
                Primitive::Plane {
                    width: 1.0,
                    height: 1.0,
                },
                Material::default(),
            ),
        ));
        s
    }

    #[test]
    fn turn_off_disables_every_light() {
        let mut s = scene();
        s.turn_off();
        assert!(s.lights().all(|(_, _, l)| !l.enabled));
        s.turn_on();
        assert!(s.lights().all(|(_, _, l)| l.enabled));
    }

    #[test]
    fn turning_off_twice_is_harmless() {
        let mut s = scene();
        s.turn_off();
        s.turn_off();
        assert_eq!(s.lights().filter(|(_, _, l)| l.enabled).count(), 0);
    }

    #[test]
    fn hide_helpers_leaves_meshes_visible() {
        let mut s = scene();
        s.hide_helpers();
        assert!(s.helpers().all(|(_, n, _)| !n.visible));
        assert!(s.meshes().all(|(_, n, _)| n.visible));
        s.show_helpers();
        assert!(s.helpers().all(|(_, n, _)| n.visible));
    }
}
