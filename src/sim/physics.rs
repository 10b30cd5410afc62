//! Fixed-step ball physics
//!
//! `step` is a pure function of its inputs: it never touches `GameState`,
//! it only reports which pegs were struck.

use glam::Vec2;

use super::ability::ModifierProfile;
use super::collision::{ball_peg_collision, bounce_off_walls, resolve_peg_collision};
use super::state::{Ball, Peg, PegId, PegKind};
use crate::Settings;

/// Result of one physics step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepOutcome {
    /// `None` once the ball has left play
    pub ball: Option<Ball>,
    /// Struck pegs in discovery order (direct hits first, then chained)
    pub hits: Vec<PegId>,
}

impl StepOutcome {
    fn retired() -> Self {
        Self::default()
    }
}

/// Create a ball for a new shot
///
/// The profile scales radius and launch velocity.
pub fn launch(origin: Vec2, velocity: Vec2, profile: &ModifierProfile, settings: &Settings) -> Ball {
    Ball::new(
        origin,
        velocity * profile.velocity_multiplier(),
        profile.ball_radius(settings),
    )
}

/// Advance the ball by one step
///
/// Integration applies friction before gravity, then moves the ball by the
/// new velocity. A ball past the retirement line yields `ball: None`.
/// Colliding pegs are resolved in slice order against the already-updated
/// ball; inactive and filtered pegs are skipped.
pub fn step(ball: &Ball, pegs: &[Peg], profile: &ModifierProfile, settings: &Settings) -> StepOutcome {
    let out_line = settings.out_of_play_line();
    if ball.pos.y > out_line {
        return StepOutcome::retired();
    }

    let bounce = profile.bounce(settings);
    let mut ball = *ball;

    ball.vel *= profile.friction(settings);
    ball.vel.y += profile.gravity(settings);
    ball.pos += ball.vel;

    if ball.pos.y > out_line {
        return StepOutcome::retired();
    }

    bounce_off_walls(&mut ball, settings.board_width, bounce);

    let mut hits: Vec<PegId> = Vec::new();
    for peg in pegs {
        if !peg.active || !profile.peg_filter.admits(peg) || hits.contains(&peg.id) {
            continue;
        }
        let contact = ball_peg_collision(ball.pos, ball.radius, peg.pos, peg.radius);
        if contact.hit {
            ball = resolve_peg_collision(&ball, &contact, bounce);
            hits.push(peg.id);
        }
    }

    if let Some(radius) = profile.chain_reaction_radius {
        chain_reaction(&mut hits, pegs, radius, settings.chain_depth);
    }

    StepOutcome {
        ball: Some(ball),
        hits,
    }
}

/// Extend `hits` with active pegs near already-struck ones
///
/// Each hop only expands from pegs added by the previous hop. Trigger pegs
/// never join a chain.
fn chain_reaction(hits: &mut Vec<PegId>, pegs: &[Peg], radius: f32, depth: u32) {
    let mut frontier: Vec<Vec2> = pegs
        .iter()
        .filter(|p| hits.contains(&p.id))
        .map(|p| p.pos)
        .collect();

    for _ in 0..depth {
        if frontier.is_empty() {
            break;
        }
        let mut next = Vec::new();
        for peg in pegs {
            if !peg.active || peg.kind == PegKind::Trigger || hits.contains(&peg.id) {
                continue;
            }
            if frontier.iter().any(|&src| src.distance(peg.pos) <= radius) {
                hits.push(peg.id);
                next.push(peg.pos);
            }
        }
        frontier = next;
    }
}
