//! Aim preview
//!
//! Runs the engine's integration law forward from the launcher without
//! collisions. Pure: the same inputs always give the same path.

use glam::Vec2;

use super::ability::ModifierProfile;
use crate::{Settings, aim_direction};

/// Predict the ball path for an aim angle
///
/// Returns at most `steps` points. The path stops after the first point that
/// leaves the board horizontally. Gravity and launch speed follow the shot's
/// profile; friction is the profile's preview friction.
pub fn predict_trajectory(
    origin: Vec2,
    angle: f32,
    steps: usize,
    profile: &ModifierProfile,
    settings: &Settings,
) -> Vec<Vec2> {
    let friction = profile.trajectory_friction(settings);
    let gravity = profile.gravity(settings);
    let mut pos = origin;
    let mut vel = aim_direction(angle) * settings.launch_speed * profile.velocity_multiplier();
    let mut points = Vec::with_capacity(steps);

    for _ in 0..steps {
        vel *= friction;
        vel.y += gravity;
        pos += vel;
        points.push(pos);

        if pos.x < 0.0 || pos.x > settings.board_width {
            break;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_length_matches_request() {
        let settings = Settings::default();
        let path = predict_trajectory(Vec2::new(400.0, 50.0), FRAC_PI_2, 25, &ModifierProfile::default(), &settings);
        assert_eq!(path.len(), 25);
        // Straight down: x fixed, y increasing
        assert!(path.iter().all(|p| (p.x - 400.0).abs() < 1e-3));
        assert!(path.windows(2).all(|w| w[1].y > w[0].y));
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let settings = Settings::default();
        assert!(predict_trajectory(Vec2::new(400.0, 50.0), 1.0, 0, &ModifierProfile::default(), &settings).is_empty());
    }

    #[test]
    fn test_stops_past_wall() {
        let settings = Settings::default();
        // Aim flat left from near the left wall
        let path = predict_trajectory(Vec2::new(20.0, 50.0), PI, 50, &ModifierProfile::default(), &settings);
        assert_eq!(path.len(), 2);
        assert!(path.last().unwrap().x < 0.0);
    }

    #[test]
    fn test_matches_engine_step() {
        use crate::sim::{Ball, step};

        let settings = Settings::default();
        let origin = Vec2::new(400.0, 50.0);
        let angle = 1.2;
        let path = predict_trajectory(origin, angle, 5, &ModifierProfile::default(), &settings);

        let mut ball = Ball::new(origin, aim_direction(angle) * settings.launch_speed, settings.ball_radius);
        for point in &path {
            ball = step(&ball, &[], &ModifierProfile::default(), &settings).ball.unwrap();
            assert!((ball.pos - *point).length() < 1e-3);
        }
    }

    #[test]
    fn test_lighter_friction_goes_further() {
        let settings = Settings::default();
        let origin = Vec2::new(400.0, 50.0);
        let normal = predict_trajectory(origin, 0.3, 20, &ModifierProfile::default(), &settings);
        let guided_profile = ModifierProfile {
            trajectory_friction: Some(0.995),
            ..Default::default()
        };
        let guided = predict_trajectory(origin, 0.3, 20, &guided_profile, &settings);
        assert!(guided.last().unwrap().x > normal.last().unwrap().x);
    }

    #[test]
    fn test_profile_gravity_and_speed_apply() {
        let settings = Settings::default();
        let origin = Vec2::new(400.0, 50.0);
        let plain = predict_trajectory(origin, 0.5, 10, &ModifierProfile::default(), &settings);

        let frozen = ModifierProfile {
            gravity: Some(0.05),
            ..Default::default()
        };
        let floaty = predict_trajectory(origin, 0.5, 10, &frozen, &settings);
        assert!(floaty[9].y < plain[9].y);

        let boosted = ModifierProfile {
            velocity_multiplier: Some(1.25),
            ..Default::default()
        };
        let fast = predict_trajectory(origin, 0.5, 10, &boosted, &settings);
        assert!(fast[0].distance(origin) > plain[0].distance(origin));
    }
}
