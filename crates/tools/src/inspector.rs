use lightlab_common::NodeId;
use lightlab_scene::SceneGraph;
use serde::Serialize;

/// Scene inspector for developer tooling.
///
/// Read-only queries against the scene graph for the debug panel header,
/// logging, and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(scene: &SceneGraph) -> SceneSummary {
        SceneSummary {
            node_count: scene.len(),
            mesh_count: scene.meshes().count(),
            light_count: scene.lights().count(),
            enabled_lights: scene.lights().filter(|(_, _, l)| l.enabled).count(),
            helper_count: scene.helpers().count(),
            visible_helpers: scene.helpers().filter(|(_, n, _)| n.visible).count(),
        }
    }

    /// Rotation of a node in radians, if it exists.
    pub fn rotation(scene: &SceneGraph, id: NodeId) -> Option<[f32; 3]> {
        scene.get(id).map(|n| n.transform.rotation.to_array())
    }

    /// Node ids and names in insertion order.
    pub fn list_nodes(scene: &SceneGraph) -> Vec<(NodeId, String)> {
        scene
            .nodes()
            .map(|(id, node)| (id, node.name.clone()))
            .collect()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneSummary {
    pub node_count: usize,
    pub mesh_count: usize,
    pub light_count: usize,
    pub enabled_lights: usize,
    pub helper_count: usize,
    pub visible_helpers: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: nodes={} meshes={} lights={}/{} helpers={}/{}",
            self.node_count,
            self.mesh_count,
            self.enabled_lights,
            self.light_count,
            self.visible_helpers,
            self.helper_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_scene::{HelperToggle, LightToggle, demo};

    #[test]
    fn summary_empty_scene() {
        let summary = SceneInspector::summary(&SceneGraph::new());
        assert_eq!(summary.node_count, 0);
        assert_eq!(summary.light_count, 0);
    }

    #[test]
    fn summary_of_demo() {
        let (scene, _) = demo::build((800.0, 600.0));
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.node_count, 15);
        assert_eq!(summary.mesh_count, 4);
        assert_eq!(summary.light_count, 6);
        assert_eq!(summary.enabled_lights, 6);
        assert_eq!(summary.visible_helpers, 5);
    }

    #[test]
    fn summary_tracks_toggles() {
        let (mut scene, _) = demo::build((800.0, 600.0));
        scene.turn_off();
        scene.hide_helpers();
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.enabled_lights, 0);
        assert_eq!(summary.visible_helpers, 0);
        assert_eq!(summary.to_string(), "Scene: nodes=15 meshes=4 lights=0/6 helpers=0/5");
    }

    #[test]
    fn rotation_lookup() {
        let (mut scene, rig) = demo::build((800.0, 600.0));
        scene.animate(1.0);
        let r = SceneInspector::rotation(&scene, rig.cube).unwrap();
        assert!((r[0] - 0.15).abs() < 1e-6);
        assert!(SceneInspector::rotation(&scene, NodeId::new()).is_none());
    }

    #[test]
    fn list_nodes_in_order() {
        let (scene, _) = demo::build((800.0, 600.0));
        let nodes = SceneInspector::list_nodes(&scene);
        assert_eq!(nodes.first().map(|(_, n)| n.as_str()), Some("ambient light"));
        assert_eq!(nodes.last().map(|(_, n)| n.as_str()), Some("floor"));
    }
}
