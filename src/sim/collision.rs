//! Collision detection and response for ball vs. pegs and side walls

use glam::Vec2;

use super::state::Ball;

/// Result of a collision check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal from the obstacle toward the ball center.
    /// Zero when the centers coincide.
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// Centers coincide: a hit with no usable normal
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.hit && self.normal == Vec2::ZERO
    }
}

/// Check collision between a ball and a circular peg
///
/// Circles collide iff the distance between centers is strictly less than
/// the sum of radii.
pub fn ball_peg_collision(ball_pos: Vec2, ball_radius: f32, peg_pos: Vec2, peg_radius: f32) -> CollisionResult {
    let delta = ball_pos - peg_pos;
    let distance = delta.length();
    let radius_sum = ball_radius + peg_radius;

    if distance >= radius_sum {
        return CollisionResult::miss();
    }

    let normal = if distance == 0.0 { Vec2::ZERO } else { delta / distance };
    CollisionResult {
        hit: true,
        normal,
        penetration: radius_sum - distance,
    }
}

/// Reflect velocity off a surface, damped by `bounce`
///
/// v' = v - 2(v·n)n * bounce. With `bounce == 1` this is a mirror reflection.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, bounce: f32) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal * bounce
}

/// Bounce the ball off a peg and push it out of the overlap
///
/// Degenerate contacts (coincident centers) leave the ball unchanged.
pub fn resolve_peg_collision(ball: &Ball, contact: &CollisionResult, bounce: f32) -> Ball {
    if !contact.hit || contact.is_degenerate() {
        return *ball;
    }
    Ball {
        pos: ball.pos + contact.normal * contact.penetration,
        vel: reflect_velocity(ball.vel, contact.normal, bounce),
        radius: ball.radius,
    }
}

/// Keep the ball between the side walls
///
/// Clamps x to `[radius, width - radius]` and inverts and damps the
/// horizontal velocity on contact. Returns whether a wall was hit.
pub fn bounce_off_walls(ball: &mut Ball, board_width: f32, bounce: f32) -> bool {
    let min_x = ball.radius;
    let max_x = board_width - ball.radius;

    if ball.pos.x < min_x {
        ball.pos.x = min_x;
    } else if ball.pos.x > max_x {
        ball.pos.x = max_x;
    } else {
        return false;
    }
    ball.vel.x = -ball.vel.x * bounce;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_peg_collision_overlap() {
        let result = ball_peg_collision(Vec2::new(0.0, -20.0), 10.0, Vec2::ZERO, 15.0);
        assert!(result.hit);
        assert!((result.penetration - 5.0).abs() < 1e-5);
        // Normal points from peg toward ball
        assert!((result.normal - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_ball_peg_touching_is_miss() {
        let result = ball_peg_collision(Vec2::new(25.0, 0.0), 10.0, Vec2::ZERO, 15.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_degenerate_contact_leaves_ball() {
        let ball = Ball::new(Vec2::new(5.0, 5.0), Vec2::new(1.0, 2.0), 10.0);
        let contact = ball_peg_collision(ball.pos, ball.radius, ball.pos, 15.0);
        assert!(contact.is_degenerate());
        assert_eq!(resolve_peg_collision(&ball, &contact, 0.7), ball);
    }

    #[test]
    fn test_resolve_pushes_out_and_reflects() {
        let ball = Ball::new(Vec2::new(0.0, -20.0), Vec2::new(0.0, 10.0), 10.0);
        let contact = ball_peg_collision(ball.pos, ball.radius, Vec2::ZERO, 15.0);
        let resolved = resolve_peg_collision(&ball, &contact, 0.7);

        assert!((resolved.pos.length() - 25.0).abs() < 1e-4);
        // Straight-on hit: vy = 10 - 2 * (-10) * (-1) * 0.7 = -4
        assert!((resolved.vel.y - (-4.0)).abs() < 1e-4);
        assert!(resolved.vel.x.abs() < 1e-6);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal, 1.0);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_wall_bounce_left_and_right() {
        let mut ball = Ball::new(Vec2::new(3.0, 100.0), Vec2::new(-4.0, 2.0), 10.0);
        assert!(bounce_off_walls(&mut ball, 800.0, 0.5));
        assert_eq!(ball.pos.x, 10.0);
        assert_eq!(ball.vel, Vec2::new(2.0, 2.0));

        let mut ball = Ball::new(Vec2::new(799.0, 100.0), Vec2::new(6.0, -1.0), 10.0);
        assert!(bounce_off_walls(&mut ball, 800.0, 0.5));
        assert_eq!(ball.pos.x, 790.0);
        assert_eq!(ball.vel, Vec2::new(-3.0, -1.0));
    }

    #[test]
    fn test_no_wall_contact() {
        let mut ball = Ball::new(Vec2::new(400.0, 100.0), Vec2::new(4.0, 2.0), 10.0);
        let before = ball;
        assert!(!bounce_off_walls(&mut ball, 800.0, 0.5));
        assert_eq!(ball, before);
    }
}
