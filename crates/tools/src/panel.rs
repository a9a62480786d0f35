use lightlab_common::{Color, NodeId};
use lightlab_scene::{DemoRig, HelperToggle, LightToggle, SceneGraph};

/// Errors from applying a panel edit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error("no panel control is bound to node {0}")]
    Unbound(NodeId),
    #[error("node {0} is not a light")]
    NotALight(NodeId),
}

/// Numeric slider bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl NumericRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp into the range and snap to the nearest step from `min`.
    pub fn apply(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }
}

/// Zero-argument panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    HelpersOff,
    HelpersOn,
    LightsOff,
    LightsOn,
}

impl PanelAction {
    pub const ALL: [PanelAction; 4] = [
        PanelAction::HelpersOff,
        PanelAction::HelpersOn,
        PanelAction::LightsOff,
        PanelAction::LightsOn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PanelAction::HelpersOff => "turn off helpers",
            PanelAction::HelpersOn => "turn on helpers",
            PanelAction::LightsOff => "turn off lights",
            PanelAction::LightsOn => "turn on lights",
        }
    }

    /// Run the action against anything that can switch lights and helpers.
    pub fn run<T: LightToggle + HelperToggle>(&self, target: &mut T) {
        match self {
            PanelAction::HelpersOff => target.hide_helpers(),
            PanelAction::HelpersOn => target.show_helpers(),
            PanelAction::LightsOff => target.turn_off(),
            PanelAction::LightsOn => target.turn_on(),
        }
    }
}

/// What a control edits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    Color(NodeId),
    Intensity(NodeId, NumericRange),
    Action(PanelAction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub label: String,
    pub binding: Binding,
}

impl Control {
    pub fn color(label: impl Into<String>, light: NodeId) -> Self {
        Self {
            label: label.into(),
            binding: Binding::Color(light),
        }
    }

    pub fn intensity(label: impl Into<String>, light: NodeId, range: NumericRange) -> Self {
        Self {
            label: label.into(),
            binding: Binding::Intensity(light, range),
        }
    }

    pub fn action(action: PanelAction) -> Self {
        Self {
            label: action.label().to_string(),
            binding: Binding::Action(action),
        }
    }
}

/// Ordered list of debug controls bound to scene fields.
#[derive(Debug, Clone, Default)]
pub struct DebugPanel {
    controls: Vec<Control>,
}

impl DebugPanel {
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }

    /// Controls for the demo scene: color and intensity for each light,
    /// then the helper and light switches.
    pub fn for_demo(rig: &DemoRig) -> Self {
        let unit = NumericRange::new(0.0, 1.0, 0.01);
        let mut controls = vec![
            Control::color("ambient color", rig.ambient),
            Control::intensity("ambient intensity", rig.ambient, unit),
            Control::color("directional color", rig.directional),
            Control::intensity("directional intensity", rig.directional, unit),
            Control::color("hemisphere color", rig.hemisphere),
            Control::intensity("hemisphere intensity", rig.hemisphere, unit),
            Control::color("point light color", rig.point),
            Control::intensity("point light intensity", rig.point, unit),
            Control::color("rect area color", rig.rect_area),
            Control::intensity(
                "rect area intensity",
                rig.rect_area,
                NumericRange::new(0.0, 2.0, 0.01),
            ),
            Control::color("spot light color", rig.spot),
            Control::intensity(
                "spot light intensity",
                rig.spot,
                NumericRange::new(0.0, 20.0, 0.01),
            ),
        ];
        controls.extend(PanelAction::ALL.iter().copied().map(Control::action));
        Self { controls }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn intensity_range(&self, light: NodeId) -> Option<NumericRange> {
        self.controls.iter().find_map(|c| match c.binding {
            Binding::Intensity(id, range) if id == light => Some(range),
            _ => None,
        })
    }

    fn has_color_control(&self, light: NodeId) -> bool {
        self.controls
            .iter()
            .any(|c| matches!(c.binding, Binding::Color(id) if id == light))
    }

    /// Write an intensity through the bound control. Returns the value
    /// actually stored after clamping and snapping.
    pub fn set_intensity(
        &self,
        scene: &mut SceneGraph,
        light: NodeId,
        value: f32,
    ) -> Result<f32, PanelError> {
        let range = self
            .intensity_range(light)
            .ok_or(PanelError::Unbound(light))?;
        let target = scene.light_mut(light).ok_or(PanelError::NotALight(light))?;
        target.intensity = range.apply(value);
        tracing::debug!(light = %light, intensity = target.intensity, "panel set intensity");
        Ok(target.intensity)
    }

    /// Write a color through the bound control. Colors are not validated.
    pub fn set_color(
        &self,
        scene: &mut SceneGraph,
        light: NodeId,
        color: Color,
    ) -> Result<(), PanelError> {
        if !self.has_color_control(light) {
            return Err(PanelError::Unbound(light));
        }
        let target = scene.light_mut(light).ok_or(PanelError::NotALight(light))?;
        target.color = color;
        tracing::debug!(light = %light, color = %color, "panel set color");
        Ok(())
    }

    pub fn trigger(&self, scene: &mut SceneGraph, action: PanelAction) {
        tracing::info!(action = action.label(), "panel action");
        action.run(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_scene::demo;

    #[test]
    fn range_clamps_and_snaps() {
        let r = NumericRange::new(0.0, 1.0, 0.01);
        assert_eq!(r.apply(-3.0), 0.0);
        assert_eq!(r.apply(7.0), 1.0);
        assert!((r.apply(0.456) - 0.46).abs() < 1e-6);
        assert!((r.apply(0.454) - 0.45).abs() < 1e-6);
    }

    #[test]
    fn range_without_step_only_clamps() {
        let r = NumericRange::new(0.0, 2.0, 0.0);
        assert_eq!(r.apply(1.2345), 1.2345);
        assert_eq!(r.apply(5.0), 2.0);
    }

    #[test]
    fn demo_panel_layout() {
        let (_, rig) = demo::build((800.0, 600.0));
        let panel = DebugPanel::for_demo(&rig);
        assert_eq!(panel.controls().len(), 16);
        let actions = panel
            .controls()
            .iter()
            .filter(|c| matches!(c.binding, Binding::Action(_)))
            .count();
        assert_eq!(actions, 4);
        assert_eq!(panel.intensity_range(rig.rect_area).unwrap().max, 2.0);
        assert_eq!(panel.intensity_range(rig.spot).unwrap().max, 20.0);
        assert_eq!(panel.intensity_range(rig.ambient).unwrap().max, 1.0);
        assert!(panel.intensity_range(rig.cube).is_none());
    }

    #[test]
    fn set_intensity_respects_each_range() {
        let (mut scene, rig) = demo::build((800.0, 600.0));
        let panel = DebugPanel::for_demo(&rig);

        assert_eq!(panel.set_intensity(&mut scene, rig.point, 3.0), Ok(1.0));
        assert_eq!(scene.light(rig.point).unwrap().intensity, 1.0);

        let spot = panel.set_intensity(&mut scene, rig.spot, 12.347).unwrap();
        assert!((spot - 12.35).abs() < 1e-4);
        assert_eq!(panel.set_intensity(&mut scene, rig.rect_area, -1.0), Ok(0.0));
    }

    #[test]
    fn unbound_nodes_are_rejected() {
        let (mut scene, rig) = demo::build((800.0, 600.0));
        let panel = DebugPanel::for_demo(&rig);
        assert_eq!(
            panel.set_intensity(&mut scene, rig.cube, 0.5),
            Err(PanelError::Unbound(rig.cube))
        );
        let stray = NodeId::new();
        assert_eq!(
            panel.set_color(&mut scene, stray, Color::BLACK),
            Err(PanelError::Unbound(stray))
        );
    }

    #[test]
    fn bound_node_that_is_not_a_light() {
        let (mut scene, rig) = demo::build((800.0, 600.0));
        let panel = DebugPanel::new(vec![Control::color("oops", rig.cube)]);
        assert_eq!(
            panel.set_color(&mut scene, rig.cube, Color::BLACK),
            Err(PanelError::NotALight(rig.cube))
        );
    }

    #[test]
    fn set_color_writes_through() {
        let (mut scene, rig) = demo::build((800.0, 600.0));
        let panel = DebugPanel::for_demo(&rig);
        panel
            .set_color(&mut scene, rig.hemisphere, Color::from_hex(0x123456))
            .unwrap();
        assert_eq!(scene.light(rig.hemisphere).unwrap().color.to_hex(), 0x123456);
    }

    #[test]
    fn actions_switch_lights_and_helpers() {
        let (mut scene, rig) = demo::build((800.0, 600.0));
        let panel = DebugPanel::for_demo(&rig);

        panel.trigger(&mut scene, PanelAction::LightsOff);
        assert!(scene.lights().all(|(_, _, l)| !l.enabled));
        panel.trigger(&mut scene, PanelAction::HelpersOff);
        assert!(scene.helpers().all(|(_, n, _)| !n.visible));

        panel.trigger(&mut scene, PanelAction::LightsOn);
        panel.trigger(&mut scene, PanelAction::HelpersOn);
        assert!(scene.lights().all(|(_, _, l)| l.enabled));
        assert!(scene.helpers().all(|(_, n, _)| n.visible));
    }
}
