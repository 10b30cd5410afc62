//! Game tuning settings
//!
//! Every physics, layout and turn constant lives here so a host can tune a
//! match from a JSON file. Missing fields fall back to `crate::consts`.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PegKind;

/// Number of pegs of each special kind placed on a new board
pub type SpecialCounts = BTreeMap<PegKind, u32>;

/// Default special peg mix: two ability triggers, three multipliers
pub fn default_special_counts() -> SpecialCounts {
    BTreeMap::from([(PegKind::Trigger, 2), (PegKind::Multiplier, 3)])
}

/// Tuning for a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    pub board_width: f32,
    pub board_height: f32,
    /// Retirement line sits this far below the board
    pub out_of_play_margin: f32,
    pub launcher: Vec2,

    // === Physics (per step) ===
    pub gravity: f32,
    /// Multiplicative velocity decay, < 1
    pub friction: f32,
    pub bounce_factor: f32,
    pub ball_radius: f32,
    pub peg_radius: f32,
    pub launch_speed: f32,
    /// Chain reaction hops beyond the directly struck peg
    pub chain_depth: u32,

    // === Turns ===
    pub shots_per_player: u32,
    pub turn_delay_ticks: u32,
    pub trajectory_steps: usize,

    // === Layout ===
    pub layout_rows: u32,
    pub layout_cols: u32,
    pub layout_spacing: f32,
    pub layout_margin: f32,
    pub layout_jitter: f32,
    pub layout_skip_chance: f64,
    pub bonus_chance: f64,
    pub special_counts: SpecialCounts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            out_of_play_margin: OUT_OF_PLAY_MARGIN,
            launcher: Vec2::new(LAUNCHER_X, LAUNCHER_Y),

            gravity: GRAVITY,
            friction: FRICTION,
            bounce_factor: BOUNCE_FACTOR,
            ball_radius: BALL_RADIUS,
            peg_radius: PEG_RADIUS,
            launch_speed: LAUNCH_SPEED,
            chain_depth: CHAIN_DEPTH,

            shots_per_player: SHOTS_PER_PLAYER,
            turn_delay_ticks: TURN_DELAY_TICKS,
            trajectory_steps: TRAJECTORY_STEPS,

            layout_rows: LAYOUT_ROWS,
            layout_cols: LAYOUT_COLS,
            layout_spacing: LAYOUT_SPACING,
            layout_margin: LAYOUT_MARGIN,
            layout_jitter: LAYOUT_JITTER,
            layout_skip_chance: LAYOUT_SKIP_CHANCE,
            bonus_chance: BONUS_CHANCE,
            special_counts: default_special_counts(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Y coordinate past which a ball is retired
    #[inline]
    pub fn out_of_play_line(&self) -> f32 {
        self.board_height + self.out_of_play_margin
    }

    /// Clamp values that would break the simulation
    pub(crate) fn sanitized(mut self) -> Self {
        if !(0.0..1.0).contains(&self.friction) {
            log::warn!("friction {} outside [0, 1); using {}", self.friction, FRICTION);
            self.friction = FRICTION;
        }
        if self.bounce_factor < 0.0 {
            log::warn!("negative bounce factor {}; using 0", self.bounce_factor);
            self.bounce_factor = 0.0;
        }
        if self.shots_per_player == 0 {
            log::warn!("shots_per_player must be at least 1");
            self.shots_per_player = 1;
        }
        if !self.layout_jitter.is_finite() || self.layout_jitter < 0.0 {
            log::warn!("layout jitter {} is invalid; using 0", self.layout_jitter);
            self.layout_jitter = 0.0;
        }
        self.layout_skip_chance = unit_chance("layout_skip_chance", self.layout_skip_chance, LAYOUT_SKIP_CHANCE);
        self.bonus_chance = unit_chance("bonus_chance", self.bonus_chance, BONUS_CHANCE);
        self
    }
}

fn unit_chance(name: &str, value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        log::warn!("{name} is NaN; using {fallback}");
        fallback
    } else if !(0.0..=1.0).contains(&value) {
        log::warn!("{name} {value} outside [0, 1]; clamping");
        value.clamp(0.0, 1.0)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "gravity": 0.3, "shots_per_player": 3 }"#).unwrap();
        assert_eq!(settings.gravity, 0.3);
        assert_eq!(settings.shots_per_player, 3);
        assert_eq!(settings.friction, FRICTION);
        assert_eq!(settings.special_counts, default_special_counts());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_values_are_sanitized() {
        let settings =
            Settings::from_json(r#"{ "friction": 1.5, "bounce_factor": -1.0, "shots_per_player": 0 }"#)
                .unwrap();
        assert_eq!(settings.friction, FRICTION);
        assert_eq!(settings.bounce_factor, 0.0);
        assert_eq!(settings.shots_per_player, 1);
    }

    #[test]
    fn test_chances_and_jitter_are_clamped() {
        let settings = Settings {
            layout_skip_chance: 1.5,
            bonus_chance: f64::NAN,
            layout_jitter: -4.0,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.layout_skip_chance, 1.0);
        assert_eq!(settings.bonus_chance, BONUS_CHANCE);
        assert_eq!(settings.layout_jitter, 0.0);
        assert_eq!(Settings::default().sanitized(), Settings::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
    }
}
