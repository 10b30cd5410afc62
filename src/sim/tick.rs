//! Turn/phase state machine
//!
//! `dispatch` is the single entry point for mutating `GameState`. Commands
//! that don't fit the current phase are ignored. `tick` advances the shot or
//! the between-turn pause by one fixed step and feeds its results back
//! through `dispatch`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::field::generate_layout;
use super::physics::{launch, step};
use super::state::{GameEvent, GamePhase, GameState, MasterId, PegId, PegKind, Player, PlayerId};
use crate::aim_direction;

/// Commands accepted by the state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    SelectMaster { player: PlayerId, master: MasterId },
    StartGame,
    /// Aim angle in radians (+y is down)
    SetAim(f32),
    Launch,
    HitPeg { peg: PegId, points: u64 },
    ActivateAbility(MasterId),
    EndTurn,
    SwitchPlayer,
    EndGame,
    ResetGame,
    SetPlayerNames { first: String, second: String },
}

/// Apply a command to the game
pub fn dispatch(state: &mut GameState, action: Action) {
    let applied = match &action {
        Action::SelectMaster { player, master } => select_master(state, *player, *master),
        Action::StartGame => start_game(state),
        Action::SetAim(angle) => set_aim(state, *angle),
        Action::Launch => launch_ball(state),
        Action::HitPeg { peg, points } => hit_peg(state, *peg, *points),
        Action::ActivateAbility(master) => activate_ability(state, *master),
        Action::EndTurn => end_turn(state),
        Action::SwitchPlayer => switch_player(state),
        Action::EndGame => end_game(state),
        Action::ResetGame => reset_game(state),
        Action::SetPlayerNames { first, second } => set_player_names(state, first, second),
    };

    if !applied {
        log::debug!("Ignored {:?} during {:?}", action, state.phase);
    }
}

/// Advance the game by one fixed step
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Shooting => advance_shot(state),
        GamePhase::Waiting => {
            state.wait_ticks = state.wait_ticks.saturating_sub(1);
            if state.wait_ticks == 0 {
                dispatch(state, Action::SwitchPlayer);
            }
        }
        _ => {}
    }
}

fn advance_shot(state: &mut GameState) {
    let Some(ball) = state.ball else {
        return;
    };

    let profile = state.modifier_profile();
    let outcome = step(&ball, &state.pegs, &profile, &state.settings);
    let retired = outcome.ball.is_none();
    if let Some(next) = outcome.ball {
        state.ball = Some(next);
    }

    for id in outcome.hits {
        let Some(kind) = state.peg(id).map(|p| p.kind) else {
            continue;
        };
        dispatch(state, Action::HitPeg { peg: id, points: kind.points() });

        if kind == PegKind::Trigger {
            if let Some(master) = state.current().master {
                dispatch(state, Action::ActivateAbility(master));
            }
        }
    }

    if retired {
        dispatch(state, Action::EndTurn);
    }
}

fn select_master(state: &mut GameState, player: PlayerId, master: MasterId) -> bool {
    if state.phase != GamePhase::Selection {
        return false;
    }
    state.player_mut(player).master = Some(master);
    log::info!("Player {} picked {}", player.number(), master.master().name);

    if state.players.iter().all(|p| p.master.is_some()) {
        start_game(state);
    }
    true
}

fn start_game(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Selection || state.players.iter().any(|p| p.master.is_none()) {
        return false;
    }

    let settings = state.settings.clone();
    let mut rng = state.rng_state.next_rng();
    let pegs = generate_layout(&mut rng, &settings.special_counts, &settings, || {
        state.next_entity_id()
    });
    let count = pegs.len();

    state.pegs = pegs;
    state.phase = GamePhase::Aiming;
    state.emit(GameEvent::BoardGenerated { pegs: count });
    true
}

fn set_aim(state: &mut GameState, angle: f32) -> bool {
    if state.phase != GamePhase::Aiming || !angle.is_finite() {
        return false;
    }
    state.aim_angle = angle;
    true
}

fn launch_ball(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Aiming || state.ball.is_some() {
        return false;
    }

    let profile = state.modifier_profile();
    let velocity = aim_direction(state.aim_angle) * state.settings.launch_speed;
    let ball = launch(state.settings.launcher, velocity, &profile, &state.settings);

    state.ball = Some(ball);
    state.phase = GamePhase::Shooting;
    state.shot_points = 0;
    state.shot_hits.clear();
    state.emit(GameEvent::BallLaunched {
        player: state.current_player,
        pos: ball.pos,
        vel: ball.vel,
    });
    true
}

fn hit_peg(state: &mut GameState, id: PegId, points: u64) -> bool {
    if state.phase != GamePhase::Shooting {
        return false;
    }
    let Some(peg) = state.pegs.iter_mut().find(|p| p.id == id && p.active) else {
        return false;
    };
    peg.active = false;
    let kind = peg.kind;

    let player = state.current_player;
    state.current_mut().score += points;
    state.shot_points += points;
    state.shot_hits.push(id);
    state.emit(GameEvent::PegHit {
        player,
        peg: id,
        kind,
        points,
    });
    true
}

fn activate_ability(state: &mut GameState, master: MasterId) -> bool {
    if !matches!(state.phase, GamePhase::Aiming | GamePhase::Shooting)
        || state.ability_active
        || state.current().master != Some(master)
    {
        return false;
    }
    state.ability_active = true;

    // Launch-time scaling can't apply retroactively, but an in-flight ball
    // still grows to the boosted size.
    let radius = state.modifier_profile().ball_radius(&state.settings);
    if let Some(ball) = state.ball.as_mut() {
        ball.radius = ball.radius.max(radius);
    }

    let ability = master.ability();
    log::info!("Player {} activated {:?}", state.current_player.number(), ability);
    state.emit(GameEvent::AbilityActivated {
        player: state.current_player,
        ability,
    });
    true
}

fn end_turn(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Shooting {
        return false;
    }
    state.ball = None;

    let player = state.current_player;
    let shot_points = state.shot_points;
    let current = state.current_mut();
    current.shots_left = current.shots_left.saturating_sub(1);
    let shots_left = current.shots_left;

    state.emit(GameEvent::BallRetired { player, shot_points });
    state.emit(GameEvent::TurnEnded { player, shots_left });

    if state.players.iter().all(|p| p.shots_left == 0) {
        finish_game(state);
    } else {
        state.phase = GamePhase::Waiting;
        state.wait_ticks = state.settings.turn_delay_ticks;
    }
    true
}

fn switch_player(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Waiting {
        return false;
    }
    state.current_player = state.current_player.other();
    state.ability_active = false;
    state.wait_ticks = 0;
    state.phase = GamePhase::Aiming;
    state.emit(GameEvent::PlayerSwitched {
        player: state.current_player,
    });
    true
}

fn end_game(state: &mut GameState) -> bool {
    if state.phase == GamePhase::GameOver {
        return false;
    }
    finish_game(state);
    true
}

fn finish_game(state: &mut GameState) {
    state.ball = None;
    state.ability_active = false;
    state.wait_ticks = 0;
    state.phase = GamePhase::GameOver;
    state.winner = decide_winner(&state.players);

    match state.winner {
        Some(id) => log::info!(
            "Game over: {} wins {} to {}",
            state.player(id).name,
            state.player(id).score,
            state.player(id.other()).score
        ),
        None => log::info!("Game over: tie at {}", state.players[0].score),
    }
    state.emit(GameEvent::GameOver {
        winner: state.winner,
    });
}

/// Strictly higher score wins; a tie has no winner
pub fn decide_winner(players: &[Player; 2]) -> Option<PlayerId> {
    match players[0].score.cmp(&players[1].score) {
        Ordering::Greater => Some(players[0].id),
        Ordering::Less => Some(players[1].id),
        Ordering::Equal => None,
    }
}

fn reset_game(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        return false;
    }

    let mut fresh = GameState::with_settings(state.rng_state.seed, state.settings.clone());
    fresh.rng_state = state.rng_state.clone();
    for (player, old) in fresh.players.iter_mut().zip(&state.players) {
        player.name = old.name.clone();
    }
    *state = fresh;
    state.emit(GameEvent::GameReset);
    true
}

fn set_player_names(state: &mut GameState, first: &str, second: &str) -> bool {
    if state.phase != GamePhase::Selection {
        return false;
    }
    state.players[0].name = first.to_string();
    state.players[1].name = second.to_string();
    true
}
