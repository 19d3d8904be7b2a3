use log::Level;

/// Distance in px from the orbit centre to every node.
pub const ORBIT_RADIUS: f64 = 200.0;
/// Period of the auto-rotation timer in milliseconds.
pub const ROTATION_TICK_MS: u32 = 50;
/// Degrees added to the rotation on every tick.
pub const ROTATION_STEP_DEG: f64 = 0.3;
/// Angle a focused node is rotated to (straight up on screen).
pub const FOCUS_ANGLE_DEG: f64 = 270.0;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Local builds get the tick/selection chatter
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    pub radius: f64,
    pub tick_ms: u32,
    pub step_deg: f64,
    pub focus_angle_deg: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: ORBIT_RADIUS,
            tick_ms: ROTATION_TICK_MS,
            step_deg: ROTATION_STEP_DEG,
            focus_angle_deg: FOCUS_ANGLE_DEG,
        }
    }
}
