//! Peg Duel headless runner
//!
//! Plays a full automated match on the simulation core and logs the result.
//!
//! Usage: `peg-duel [seed] [settings.json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use peg_duel::aim_angle_toward;
use peg_duel::settings::Settings;
use peg_duel::sim::{Action, GameEvent, GamePhase, GameState, MasterId, PegKind, PlayerId, dispatch, tick};

/// Upper bound on simulated ticks so a pathological config can't spin forever
const MAX_TICKS: u64 = 1_000_000;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    log::info!("Peg Duel (headless) starting with seed {seed}");
    let state = play_match(seed, settings);

    println!("\nPoint table:");
    for kind in PegKind::ALL {
        println!("  {kind:?}: {}", kind.points());
    }
    println!("\nFinal scores:");
    for player in &state.players {
        let master = player.master.map(|m| m.master().name).unwrap_or("-");
        println!("  {} ({master}): {}", player.name, player.score);
    }
    match state.winner {
        Some(id) => println!("Winner: {}", state.player(id).name),
        None => println!("Tie!"),
    }
}

fn play_match(seed: u64, settings: Settings) -> GameState {
    let mut state = GameState::with_settings(seed, settings);
    let mut aim_rng = Pcg32::seed_from_u64(seed ^ 0xA11E);

    dispatch(
        &mut state,
        Action::SetPlayerNames {
            first: "Left".into(),
            second: "Right".into(),
        },
    );
    for (player, master) in [(PlayerId::One, MasterId::Gnorman), (PlayerId::Two, MasterId::Jeff)] {
        dispatch(&mut state, Action::SelectMaster { player, master });
    }

    while state.phase != GamePhase::GameOver && state.time_ticks < MAX_TICKS {
        if state.phase == GamePhase::Aiming {
            aim_and_fire(&mut state, &mut aim_rng);
        }
        tick(&mut state);

        for event in state.drain_events() {
            match event {
                GameEvent::BallRetired { player, shot_points } => {
                    log::info!("Player {} shot scored {shot_points}", player.number());
                }
                GameEvent::AbilityActivated { player, ability } => {
                    log::info!("Player {} triggered {ability:?}", player.number());
                }
                _ => {}
            }
        }
    }

    if state.phase != GamePhase::GameOver {
        log::warn!("Tick limit reached, ending match early");
        dispatch(&mut state, Action::EndGame);
    }
    state
}

/// Aim at a random remaining peg and launch
fn aim_and_fire(state: &mut GameState, rng: &mut Pcg32) {
    let targets: Vec<_> = state.active_pegs().map(|p| p.pos).collect();
    let angle = if targets.is_empty() {
        std::f32::consts::FRAC_PI_2
    } else {
        let target = targets[rng.random_range(0..targets.len())];
        aim_angle_toward(state.settings.launcher, target)
    };

    dispatch(state, Action::SetAim(angle));
    let preview = state.trajectory_preview();
    log::debug!("Aiming at {angle:.3} rad, preview {} points", preview.len());
    dispatch(state, Action::Launch);
}
