//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pegs in id order)
//! - No rendering or platform dependencies

pub mod ability;
pub mod collision;
pub mod field;
pub mod physics;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use ability::{Ability, ModifierProfile, PegFilter, modifier_profile};
pub use collision::{CollisionResult, ball_peg_collision, bounce_off_walls, reflect_velocity, resolve_peg_collision};
pub use field::generate_layout;
pub use physics::{StepOutcome, launch, step};
pub use state::{
    Ball, GameEvent, GamePhase, GameState, MASTERS, MAX_PENDING_EVENTS, Master, MasterId, Peg, PegId, PegKind,
    Player, PlayerId, RngState,
};
pub use tick::{Action, decide_winner, dispatch, tick};
pub use trajectory::predict_trajectory;
