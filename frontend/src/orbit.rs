//! Orbital layout engine behind the radial timeline.
//!
//! Nodes sit on a circle and drift around it while nothing is selected.
//! Clicking a node focuses it: rotation stops, the node is swung to the top
//! of the orbit and the nodes it points at start pulsing. Everything here is
//! plain state and math so the component only has to forward events and
//! draw the [`NodeLayout`]s it gets back.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::config::OrbitConfig;
use crate::timeline::TimelineItem;

/// z-index and opacity used for the expanded node, above every orbit value.
pub const EXPANDED_Z_INDEX: i32 = 200;
pub const EXPANDED_OPACITY: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
    /// Degrees in [0, 360).
    pub angle: f64,
    pub z_index: i32,
    pub opacity: f64,
}

impl NodePosition {
    /// Length of the line drawn from the node back to the orbit centre.
    pub fn spoke_length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotation in radians that points the spoke at the centre.
    pub fn spoke_rotation(&self) -> f64 {
        (-self.y).atan2(-self.x)
    }
}

fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can land on 360.0 for values a hair below zero
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Where node `index` of `total` sits before any rotation is applied.
pub fn baseline_angle(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    index as f64 / total as f64 * 360.0
}

pub fn calculate_node_position(
    index: usize,
    total: usize,
    rotation: f64,
    radius: f64,
    offset: Offset,
) -> NodePosition {
    let angle = wrap_degrees(baseline_angle(index, total) + rotation);
    let radian = angle.to_radians();

    let x = radius * radian.cos() + offset.x;
    let y = radius * radian.sin() + offset.y;

    // Front of the orbit draws on top, back of the orbit fades out
    let z_index = (100.0 + 50.0 * radian.cos()).round() as i32;
    let opacity = (0.4 + 0.6 * ((1.0 + radian.sin()) / 2.0)).clamp(0.4, 1.0);

    NodePosition {
        x,
        y,
        angle,
        z_index,
        opacity,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Idle,
    Focused(u32),
}

/// Everything the component needs to draw one node for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLayout {
    pub id: u32,
    pub position: NodePosition,
    pub expanded: bool,
    pub related: bool,
    pub pulsing: bool,
}

impl NodeLayout {
    pub fn z_index(&self) -> i32 {
        if self.expanded {
            EXPANDED_Z_INDEX
        } else {
            self.position.z_index
        }
    }

    pub fn opacity(&self) -> f64 {
        if self.expanded {
            EXPANDED_OPACITY
        } else {
            self.position.opacity
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitEngine {
    items: Vec<TimelineItem>,
    config: OrbitConfig,
    rotation_angle: f64,
    focus: Focus,
    pulse_effect: BTreeSet<u32>,
    center_offset: Offset,
}

impl OrbitEngine {
    pub fn new(items: Vec<TimelineItem>, config: OrbitConfig) -> Self {
        Self {
            items,
            config,
            rotation_angle: 0.0,
            focus: Focus::Idle,
            pulse_effect: BTreeSet::new(),
            center_offset: Offset::default(),
        }
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn center_offset(&self) -> Offset {
        self.center_offset
    }

    pub fn auto_rotate(&self) -> bool {
        self.focus == Focus::Idle
    }

    pub fn active_node_id(&self) -> Option<u32> {
        match self.focus {
            Focus::Idle => None,
            Focus::Focused(id) => Some(id),
        }
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.focus == Focus::Focused(id)
    }

    /// Expansion flags keyed by id. Holds at most one entry.
    pub fn expanded_items(&self) -> BTreeMap<u32, bool> {
        self.active_node_id().map(|id| (id, true)).into_iter().collect()
    }

    pub fn pulse_effect(&self) -> &BTreeSet<u32> {
        &self.pulse_effect
    }

    pub fn is_pulsing(&self, id: u32) -> bool {
        self.pulse_effect.contains(&id)
    }

    pub fn item(&self, id: u32) -> Option<&TimelineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Declared relations of `id`. Unknown ids have none.
    pub fn related_items(&self, id: u32) -> &[u32] {
        self.item(id)
            .map(|item| item.related_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the active node lists `id` among its relations. The check is
    /// one-directional: `id`'s own list is never consulted.
    pub fn is_related_to_active(&self, id: u32) -> bool {
        match self.active_node_id() {
            Some(active) => self.related_items(active).contains(&id),
            None => false,
        }
    }

    /// Advances the auto-rotation by one step. Returns false when focused.
    pub fn tick(&mut self) -> bool {
        if !self.auto_rotate() {
            return false;
        }
        let advanced = round3((self.rotation_angle + self.config.step_deg) % 360.0);
        self.rotation_angle = wrap_degrees(advanced);
        true
    }

    /// Click on a node: collapses it if it is the expanded one, otherwise
    /// focuses it exclusively.
    pub fn toggle(&mut self, id: u32) -> Focus {
        if self.is_expanded(id) {
            debug!("collapsing node {}", id);
            self.reset();
        } else {
            debug!("focusing node {}", id);
            self.focus = Focus::Focused(id);
            self.pulse_effect = self.related_items(id).iter().copied().collect();
            self.center_view_on(id);
        }
        self.focus
    }

    /// Click on the empty background.
    pub fn reset(&mut self) {
        self.focus = Focus::Idle;
        self.pulse_effect.clear();
    }

    fn center_view_on(&mut self, id: u32) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let target = baseline_angle(index, self.items.len());
        self.rotation_angle = wrap_degrees(self.config.focus_angle_deg - target);
    }

    pub fn node_position(&self, index: usize) -> NodePosition {
        calculate_node_position(
            index,
            self.items.len(),
            self.rotation_angle,
            self.config.radius,
            self.center_offset,
        )
    }

    pub fn layout(&self) -> Vec<NodeLayout> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| NodeLayout {
                id: item.id,
                position: self.node_position(index),
                expanded: self.is_expanded(item.id),
                related: self.is_related_to_active(item.id),
                pulsing: self.is_pulsing(item.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::sample_timeline;

    const EPS: f64 = 1e-9;

    fn engine() -> OrbitEngine {
        OrbitEngine::new(sample_timeline().unwrap(), OrbitConfig::default())
    }

    fn assert_collapsed(engine: &OrbitEngine) {
        assert_eq!(engine.focus(), Focus::Idle);
        assert!(engine.expanded_items().is_empty());
        assert!(engine.pulse_effect().is_empty());
        assert_eq!(engine.active_node_id(), None);
        assert!(engine.auto_rotate());
    }

    #[test]
    fn angle_is_baseline_plus_rotation_in_range() {
        for total in 1..=12 {
            for index in 0..total {
                for rotation in [0.0, 0.3, 126.0, 359.7, 720.5, -18.0] {
                    let position =
                        calculate_node_position(index, total, rotation, 200.0, Offset::default());
                    let expected =
                        (index as f64 / total as f64 * 360.0 + rotation).rem_euclid(360.0);
                    assert!((position.angle - expected).abs() < EPS);
                    assert!((0.0..360.0).contains(&position.angle));
                }
            }
        }
    }

    #[test]
    fn nodes_stay_on_the_circle() {
        let offset = Offset { x: 13.0, y: -7.5 };
        for total in 1..=9 {
            for index in 0..total {
                for rotation in [0.0, 45.3, 181.0, 299.999] {
                    let p = calculate_node_position(index, total, rotation, 200.0, offset);
                    let radius = (p.x - offset.x).hypot(p.y - offset.y);
                    assert!((radius - 200.0).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn depth_and_fade_follow_the_angle() {
        // angle 0: front of the orbit, halfway faded
        let front = calculate_node_position(0, 4, 0.0, 200.0, Offset::default());
        assert_eq!(front.z_index, 150);
        assert!((front.opacity - 0.7).abs() < EPS);

        // angle 90: bottom, fully opaque
        let bottom = calculate_node_position(1, 4, 0.0, 200.0, Offset::default());
        assert_eq!(bottom.z_index, 100);
        assert!((bottom.opacity - 1.0).abs() < EPS);

        // angle 180: back of the orbit
        let back = calculate_node_position(2, 4, 0.0, 200.0, Offset::default());
        assert_eq!(back.z_index, 50);

        // angle 270: top, clamped to the floor
        let top = calculate_node_position(3, 4, 0.0, 200.0, Offset::default());
        assert!((top.opacity - 0.4).abs() < EPS);
    }

    #[test]
    fn spoke_points_back_at_centre() {
        let p = calculate_node_position(0, 4, 0.0, 200.0, Offset::default());
        assert!((p.spoke_length() - 200.0).abs() < EPS);
        assert!((p.spoke_rotation().abs() - std::f64::consts::PI).abs() < EPS);
    }

    #[test]
    fn ticks_accumulate_and_wrap() {
        let mut engine = engine();
        for _ in 0..10 {
            assert!(engine.tick());
        }
        assert!((engine.rotation_angle() - 3.0).abs() < EPS);

        let mut long_run = self::engine();
        for t in 1..=1500u32 {
            long_run.tick();
            let expected = round3((0.3 * t as f64) % 360.0);
            let diff = (long_run.rotation_angle() - expected).abs();
            // 0.0 and 360.0 are the same spot on the orbit
            assert!(
                diff < 1e-6 || (360.0 - diff) < 1e-6,
                "tick {}: {} vs {}",
                t,
                long_run.rotation_angle(),
                expected
            );
        }
    }

    #[test]
    fn tick_is_ignored_while_focused() {
        let mut engine = engine();
        engine.toggle(3);
        let angle = engine.rotation_angle();
        assert!(!engine.tick());
        assert_eq!(engine.rotation_angle(), angle);
    }

    #[test]
    fn clicking_a_node_focuses_it() {
        let mut engine = engine();
        let focus = engine.toggle(3);

        assert_eq!(focus, Focus::Focused(3));
        assert_eq!(engine.expanded_items(), BTreeMap::from([(3, true)]));
        assert_eq!(engine.active_node_id(), Some(3));
        assert!(!engine.auto_rotate());
        assert_eq!(engine.pulse_effect(), &BTreeSet::from([2, 4]));
        assert!((engine.rotation_angle() - 126.0).abs() < EPS);
    }

    #[test]
    fn focused_node_lands_at_the_top() {
        let mut engine = engine();
        for _ in 0..77 {
            engine.tick();
        }
        engine.toggle(5);
        // 270 - 288 wraps to 342
        assert!((engine.rotation_angle() - 342.0).abs() < EPS);
        let position = engine.node_position(4);
        assert!((position.angle - 270.0).abs() < 1e-6);
    }

    #[test]
    fn background_click_resets_and_rotation_resumes() {
        let mut engine = engine();
        engine.toggle(3);
        engine.reset();
        assert_collapsed(&engine);

        assert!(engine.tick());
        assert!((engine.rotation_angle() - 126.3).abs() < EPS);
    }

    #[test]
    fn background_click_when_idle_is_harmless() {
        let mut engine = engine();
        engine.tick();
        engine.reset();
        assert_collapsed(&engine);
        assert!((engine.rotation_angle() - 0.3).abs() < EPS);
    }

    #[test]
    fn clicking_the_expanded_node_collapses_it() {
        let mut engine = engine();
        engine.toggle(2);
        assert_eq!(engine.toggle(2), Focus::Idle);
        assert_collapsed(&engine);
    }

    #[test]
    fn switching_focus_replaces_pulse() {
        let mut engine = engine();
        engine.toggle(1);
        assert_eq!(engine.pulse_effect(), &BTreeSet::from([2]));
        engine.toggle(4);
        assert_eq!(engine.expanded_items(), BTreeMap::from([(4, true)]));
        assert_eq!(engine.pulse_effect(), &BTreeSet::from([3, 5]));
        assert!(!engine.is_expanded(1));
    }

    #[test]
    fn unknown_id_has_no_relations() {
        let mut engine = engine();
        assert!(engine.related_items(99).is_empty());

        engine.tick();
        engine.toggle(99);
        assert_eq!(engine.active_node_id(), Some(99));
        assert!(engine.pulse_effect().is_empty());
        // nothing to centre on, rotation is left alone
        assert!((engine.rotation_angle() - 0.3).abs() < EPS);
    }

    #[test]
    fn relation_is_directed() {
        let mut items = sample_timeline().unwrap();
        // 1 -> 3 but 3 does not list 1
        items[0].related_ids = vec![3];
        let mut engine = OrbitEngine::new(items, OrbitConfig::default());

        engine.toggle(1);
        assert!(engine.is_related_to_active(3));

        engine.toggle(3);
        assert!(!engine.is_related_to_active(1));
        assert!(engine.is_related_to_active(2));
    }

    #[test]
    fn nothing_is_related_without_an_active_node() {
        let engine = engine();
        assert!((1..=5).all(|id| !engine.is_related_to_active(id)));
    }

    #[test]
    fn at_most_one_node_expanded_for_any_click_sequence() {
        let mut engine = engine();
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..2000 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let roll = (seed >> 33) % 8;
            match roll {
                7 => engine.reset(),
                // 0 and 6 are not in the dataset
                id => {
                    engine.toggle(id as u32);
                }
            }
            engine.tick();

            let expanded = engine.expanded_items();
            assert!(expanded.values().filter(|v| **v).count() <= 1);
            match engine.active_node_id() {
                None => {
                    assert!(engine.auto_rotate());
                    assert!(engine.pulse_effect().is_empty());
                }
                Some(id) => {
                    assert!(!engine.auto_rotate());
                    let related: BTreeSet<u32> =
                        engine.related_items(id).iter().copied().collect();
                    assert_eq!(engine.pulse_effect(), &related);
                }
            }
            assert!((0.0..360.0).contains(&engine.rotation_angle()));
        }
    }

    #[test]
    fn layout_marks_expanded_related_and_pulsing() {
        let mut engine = engine();
        engine.toggle(3);
        let layout = engine.layout();
        assert_eq!(layout.len(), 5);

        let node = |id: u32| layout.iter().find(|n| n.id == id).copied().unwrap();
        assert!(node(3).expanded);
        assert_eq!(node(3).z_index(), EXPANDED_Z_INDEX);
        assert_eq!(node(3).opacity(), EXPANDED_OPACITY);
        assert!(node(2).related && node(2).pulsing);
        assert!(node(4).related && node(4).pulsing);
        assert!(!node(1).related && !node(5).pulsing);
        assert_eq!(node(1).z_index(), node(1).position.z_index);
    }

    #[test]
    fn empty_dataset_ticks_harmlessly() {
        let mut engine = OrbitEngine::new(Vec::new(), OrbitConfig::default());
        assert!(engine.layout().is_empty());
        assert!(engine.tick());
        engine.toggle(1);
        engine.reset();
        assert!(engine.tick());
        assert!((engine.rotation_angle() - 0.6).abs() < EPS);
    }
}
