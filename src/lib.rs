//! Peg Duel - A two-player peg-clearing physics duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, abilities, turn logic)
//! - `settings`: Data-driven physics, layout and turn tuning

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Physics values are per simulation step, not per second.
pub mod consts {
    /// Target host tick rate
    pub const TICK_HZ: u32 = 60;

    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 600.0;
    /// Distance below the board at which a ball is retired
    pub const OUT_OF_PLAY_MARGIN: f32 = 100.0;

    /// Launcher sits centered near the top edge
    pub const LAUNCHER_X: f32 = BOARD_WIDTH / 2.0;
    pub const LAUNCHER_Y: f32 = 50.0;
    /// Launch speed (units per step)
    pub const LAUNCH_SPEED: f32 = 15.0;

    /// Entity sizes
    pub const PEG_RADIUS: f32 = 15.0;
    pub const BALL_RADIUS: f32 = 10.0;

    /// Integration
    pub const GRAVITY: f32 = 0.2;
    pub const FRICTION: f32 = 0.98;
    pub const BOUNCE_FACTOR: f32 = 0.7;

    /// Shots each player gets per game
    pub const SHOTS_PER_PLAYER: u32 = 10;
    /// Pause between a retired ball and the next player's turn (1 s)
    pub const TURN_DELAY_TICKS: u32 = TICK_HZ;

    /// Default trajectory preview length (steps)
    pub const TRAJECTORY_STEPS: usize = 10;

    /// Chain reaction reach (center to center)
    pub const CHAIN_REACTION_RADIUS: f32 = 80.0;
    /// Chain reaction hops per collision
    pub const CHAIN_DEPTH: u32 = 1;

    /// Board layout grid
    pub const LAYOUT_ROWS: u32 = 8;
    pub const LAYOUT_COLS: u32 = 8;
    pub const LAYOUT_SPACING: f32 = 50.0;
    pub const LAYOUT_MARGIN: f32 = 100.0;
    pub const LAYOUT_JITTER: f32 = 10.0;
    pub const LAYOUT_SKIP_CHANCE: f64 = 0.3;
    pub const BONUS_CHANCE: f64 = 0.2;
}

/// Unit direction for an aim angle (radians, screen space: +y is down)
#[inline]
pub fn aim_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Aim angle pointing from `from` toward `to`
#[inline]
pub fn aim_angle_toward(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
