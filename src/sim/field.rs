//! Peg field generation
//!
//! Pegs sit on a jittered grid. Every cell is first rolled as Standard or
//! Bonus, then special kinds are assigned by drawing from the pegs that are
//! still Standard, so placement always terminates.

use glam::Vec2;
use rand::Rng;

use super::state::{Peg, PegId, PegKind};
use crate::Settings;
use crate::settings::SpecialCounts;

const MAX_PREALLOCATED_PEGS: usize = 1024;

/// Build a fresh board
///
/// `next_id` allocates peg ids. Specials that cannot be placed because no
/// Standard peg is left are dropped with a warning.
pub fn generate_layout(
    rng: &mut impl Rng,
    special_counts: &SpecialCounts,
    settings: &Settings,
    mut next_id: impl FnMut() -> PegId,
) -> Vec<Peg> {
    let cells = settings.layout_rows.saturating_mul(settings.layout_cols) as usize;
    let mut pegs = Vec::with_capacity(cells.min(MAX_PREALLOCATED_PEGS));
    let skip_chance = probability(settings.layout_skip_chance);
    let bonus_chance = probability(settings.bonus_chance);

    for row in 0..settings.layout_rows {
        for col in 0..settings.layout_cols {
            if rng.random_bool(skip_chance) {
                continue;
            }

            let offset = Vec2::new(jitter(rng, settings.layout_jitter), jitter(rng, settings.layout_jitter));
            let pos = Vec2::new(
                settings.layout_margin + col as f32 * settings.layout_spacing,
                settings.layout_margin + row as f32 * settings.layout_spacing,
            ) + offset;

            let kind = if rng.random_bool(bonus_chance) {
                PegKind::Bonus
            } else {
                PegKind::Standard
            };
            pegs.push(Peg::new(next_id(), kind, pos, settings.peg_radius));
        }
    }

    if pegs.is_empty() {
        log::warn!("Every grid cell was skipped; placing a single center peg");
        let center = Vec2::new(settings.board_width / 2.0, settings.board_height / 2.0);
        pegs.push(Peg::new(next_id(), PegKind::Standard, center, settings.peg_radius));
    }

    assign_specials(rng, &mut pegs, special_counts);

    log::info!(
        "Generated board: {} pegs ({} bonus, {} trigger, {} multiplier)",
        pegs.len(),
        count_kind(&pegs, PegKind::Bonus),
        count_kind(&pegs, PegKind::Trigger),
        count_kind(&pegs, PegKind::Multiplier),
    );

    pegs
}

/// Convert randomly chosen Standard pegs into the requested special kinds
fn assign_specials(rng: &mut impl Rng, pegs: &mut [Peg], special_counts: &SpecialCounts) {
    let mut candidates: Vec<usize> = pegs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind == PegKind::Standard)
        .map(|(i, _)| i)
        .collect();

    for (&kind, &count) in special_counts {
        if kind == PegKind::Standard {
            continue;
        }
        for placed in 0..count {
            if candidates.is_empty() {
                log::warn!("No Standard pegs left: placed {placed} of {count} {kind:?} pegs");
                break;
            }
            let pick = rng.random_range(0..candidates.len());
            let index = candidates.swap_remove(pick);
            pegs[index].kind = kind;
        }
    }
}

fn jitter(rng: &mut impl Rng, amount: f32) -> f32 {
    if amount.is_finite() && amount > 0.0 {
        rng.random_range(-amount..amount)
    } else {
        0.0
    }
}

/// `random_bool` panics outside [0, 1]
fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

fn count_kind(pegs: &[Peg], kind: PegKind) -> usize {
    pegs.iter().filter(|p| p.kind == kind).count()
}
