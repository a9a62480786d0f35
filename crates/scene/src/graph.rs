use crate::light::{Helper, Light};
use crate::mesh::Mesh;
use glam::Vec3;
use lightlab_common::{NodeId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a node carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Mesh(Mesh),
    Light(Light),
    Helper(Helper),
}

/// A single entry in the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            visible: true,
            kind,
        }
    }

    pub fn mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self::new(name, NodeKind::Mesh(mesh))
    }

    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::new(name, NodeKind::Light(light))
    }

    pub fn helper(name: impl Into<String>, helper: Helper) -> Self {
        Self::new(name, NodeKind::Helper(helper))
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }
}

/// Constant angular rate, in radians per second, about each Euler axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    pub rate: Vec3,
}

impl Spin {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            rate: Vec3::new(x, y, z),
        }
    }

    /// Rotation reached after `elapsed` seconds, wrapped into `[0, 2π)`.
    ///
    /// Derived from elapsed time rather than accumulated per frame, so the
    /// result does not depend on how often it is sampled.
    pub fn angle_at(&self, elapsed: f64) -> Vec3 {
        let wrap = |rate: f32| (rate as f64 * elapsed).rem_euclid(std::f64::consts::TAU) as f32;
        Vec3::new(wrap(self.rate.x), wrap(self.rate.y), wrap(self.rate.z))
    }
}

/// The scene: every mesh, light and helper the renderer draws.
///
/// Nodes are keyed by id; `order` keeps insertion order so reports and draw
/// submission are stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    nodes: BTreeMap<NodeId, Node>,
    order: Vec<NodeId>,
    spins: BTreeMap<NodeId, Spin>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns its id.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId::new();
        tracing::debug!(id = %id, name = %node.name, "scene node added");
        self.nodes.insert(id, node);
        self.order.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.nodes.get(id).map(|n| (*id, n)))
    }

    pub fn light(&self, id: NodeId) -> Option<&Light> {
        match &self.nodes.get(&id)?.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn light_mut(&mut self, id: NodeId) -> Option<&mut Light> {
        match &mut self.nodes.get_mut(&id)?.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Lights with their node, in insertion order.
    pub fn lights(&self) -> impl Iterator<Item = (NodeId, &Node, &Light)> + '_ {
        self.nodes().filter_map(|(id, node)| match &node.kind {
            NodeKind::Light(light) => Some((id, node, light)),
            _ => None,
        })
    }

    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &Node, &Mesh)> + '_ {
        self.nodes().filter_map(|(id, node)| match &node.kind {
            NodeKind::Mesh(mesh) => Some((id, node, mesh)),
            _ => None,
        })
    }

    pub fn helpers(&self) -> impl Iterator<Item = (NodeId, &Node, &Helper)> + '_ {
        self.nodes().filter_map(|(id, node)| match &node.kind {
            NodeKind::Helper(helper) => Some((id, node, helper)),
            _ => None,
        })
    }

    pub(crate) fn lights_mut(&mut self) -> impl Iterator<Item = &mut Light> + '_ {
        self.nodes.values_mut().filter_map(|node| match &mut node.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        })
    }

    pub(crate) fn helper_nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> + '_ {
        self.nodes
            .values_mut()
            .filter(|node| matches!(node.kind, NodeKind::Helper(_)))
    }

    /// Attach a spin animation to a node. Returns false for unknown ids.
    pub fn set_spin(&mut self, id: NodeId, spin: Spin) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        self.spins.insert(id, spin);
        true
    }

    pub fn spin(&self, id: NodeId) -> Option<Spin> {
        self.spins.get(&id).copied()
    }

    /// Set every spinning node's rotation for the given elapsed time.
    pub fn animate(&mut self, elapsed: f64) {
        for (id, spin) in &self.spins {
            if let Some(node) = self.nodes.get_mut(id) {
                node.transform.rotation = spin.angle_at(elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::LightKind;
    use crate::mesh::{Material, Primitive};
    use lightlab_common::Color;
    use std::f32::consts::TAU;

    fn cube() -> Mesh {
        Mesh::new(
            Primitive::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::default(),
        )
    }

    #[test]
    fn scene_starts_empty() {
        let s = SceneGraph::new();
        assert!(s.is_empty());
        assert_eq!(s.nodes().count(), 0);
    }

    #[test]
    fn add_and_get() {
        let mut s = SceneGraph::new();
        let id = s.add(Node::mesh("cube", cube()).at(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(s.len(), 1);
        let node = s.get(id).unwrap();
        assert_eq!(node.name, "cube");
        assert_eq!(node.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(node.visible);
    }

    #[test]
    fn nodes_iterate_in_insertion_order() {
        let mut s = SceneGraph::new();
        let names = ["a", "b", "c", "d", "e"];
        for name in names {
            s.add(Node::mesh(name, cube()));
        }
        let seen: Vec<&str> = s.nodes().map(|(_, n)| n.name.as_str()).collect();
        assert_eq!(seen, names);
    }

    #[test]
    fn typed_accessors_filter_by_kind() {
        let mut s = SceneGraph::new();
        let mesh = s.add(Node::mesh("cube", cube()));
        let light = s.add(Node::light("ambient", Light::ambient(Color::WHITE, 0.5)));
        s.add(Node::helper("helper", Helper::new(light, 0.2)));

        assert_eq!(s.meshes().count(), 1);
        assert_eq!(s.lights().count(), 1);
        assert_eq!(s.helpers().count(), 1);
        assert!(s.light(mesh).is_none());
        assert_eq!(s.light(light).unwrap().kind, LightKind::Ambient);

        s.light_mut(light).unwrap().intensity = 0.9;
        assert_eq!(s.light(light).unwrap().intensity, 0.9);
    }

    #[test]
    fn spin_on_unknown_node_is_rejected() {
        let mut s = SceneGraph::new();
        assert!(!s.set_spin(NodeId::new(), Spin::new(0.0, 0.1, 0.0)));
    }

    #[test]
    fn animate_sets_rotation_from_elapsed_time() {
        let mut s = SceneGraph::new();
        let id = s.add(Node::mesh("cube", cube()));
        assert!(s.set_spin(id, Spin::new(0.15, 0.1, 0.0)));

        s.animate(2.0);
        let r = s.get(id).unwrap().transform.rotation;
        assert!((r.x - 0.3).abs() < 1e-6);
        assert!((r.y - 0.2).abs() < 1e-6);
        assert_eq!(r.z, 0.0);
    }

    #[test]
    fn animate_is_independent_of_sampling() {
        let mut coarse = SceneGraph::new();
        let a = coarse.add(Node::mesh("a", cube()));
        coarse.set_spin(a, Spin::new(0.0, 0.1, 0.0));
        let mut fine = coarse.clone();

        coarse.animate(10.0);
        for i in 1..=600 {
            fine.animate(i as f64 / 60.0);
        }

        let rc = coarse.get(a).unwrap().transform.rotation.y;
        let rf = fine.get(a).unwrap().transform.rotation.y;
        assert!((rc - rf).abs() < 1e-5);
        assert!((rc - 1.0).abs() < 1e-5);
    }

    #[test]
    fn spin_wraps_at_full_turn() {
        let spin = Spin::new(1.0, 0.0, 0.0);
        let angle = spin.angle_at(TAU as f64 + 0.5);
        assert!((angle.x - 0.5).abs() < 1e-5);
        let negative = Spin::new(-1.0, 0.0, 0.0).angle_at(0.5);
        assert!((negative.x - (TAU - 0.5)).abs() < 1e-5);
    }
}
