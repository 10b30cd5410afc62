//! Game state and core simulation types
//!
//! `GameState` is the single canonical store. It is only mutated through
//! `tick::dispatch` (and `tick::tick`, which dispatches).

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ability::{Ability, ModifierProfile, modifier_profile};
use super::trajectory::predict_trajectory;
use crate::Settings;

/// Peg identifier, unique within a game
pub type PegId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Both players choosing a master
    Selection,
    /// Current player adjusting aim, ball not yet launched
    Aiming,
    /// Ball in flight
    Shooting,
    /// Short pause between turns
    Waiting,
    /// All shots used
    GameOver,
}

/// Peg types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PegKind {
    #[default]
    Standard,
    Bonus,
    /// Activates the striking player's master ability
    Trigger,
    /// Scores its base value times `score_multiplier`
    Multiplier,
}

impl PegKind {
    pub const ALL: [PegKind; 4] = [
        PegKind::Standard,
        PegKind::Bonus,
        PegKind::Trigger,
        PegKind::Multiplier,
    ];

    /// Points before the multiplier rule
    pub fn base_points(self) -> u64 {
        match self {
            PegKind::Standard => 10,
            PegKind::Bonus => 100,
            PegKind::Trigger => 250,
            PegKind::Multiplier => 250,
        }
    }

    pub fn score_multiplier(self) -> u64 {
        match self {
            PegKind::Multiplier => 2,
            _ => 1,
        }
    }

    /// Points awarded for striking a peg of this kind
    pub fn points(self) -> u64 {
        self.base_points() * self.score_multiplier()
    }
}

/// A peg entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub id: PegId,
    pub kind: PegKind,
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
}

impl Peg {
    pub fn new(id: PegId, kind: PegKind, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            radius,
            active: true,
        }
    }
}

/// The ball, alive only while a shot is in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }
}

/// Selectable master personas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasterId {
    Bjorn,
    Gnorman,
    Luna,
    Jeff,
    Berg,
}

/// Static reference data for a master
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Master {
    pub id: MasterId,
    pub name: &'static str,
    pub ability_name: &'static str,
    pub description: &'static str,
    pub ability: Ability,
}

/// Every selectable master
pub static MASTERS: [Master; 5] = [
    Master {
        id: MasterId::Bjorn,
        name: "Bjorn the Unicorn",
        ability_name: "Super Guide",
        description: "Displays an extended trajectory path for accurate aiming.",
        ability: Ability::SuperGuide,
    },
    Master {
        id: MasterId::Gnorman,
        name: "Gnorman the Gnome",
        ability_name: "Uber Volt",
        description: "Electrifies pegs, causing chain reactions.",
        ability: Ability::UberVolt,
    },
    Master {
        id: MasterId::Luna,
        name: "Luna the Ghost",
        ability_name: "Nightshade",
        description: "Standard pegs become intangible, allowing strategic shots.",
        ability: Ability::Nightshade,
    },
    Master {
        id: MasterId::Jeff,
        name: "Jeff the Troll",
        ability_name: "Boulder Throw",
        description: "A heavy boulder ploughs through multiple pegs in a single shot.",
        ability: Ability::BoulderThrow,
    },
    Master {
        id: MasterId::Berg,
        name: "Berg the Yeti",
        ability_name: "Deep Freeze",
        description: "Freezes the board, making the ball slide instead of bounce.",
        ability: Ability::DeepFreeze,
    },
];

impl MasterId {
    pub fn master(self) -> &'static Master {
        match self {
            MasterId::Bjorn => &MASTERS[0],
            MasterId::Gnorman => &MASTERS[1],
            MasterId::Luna => &MASTERS[2],
            MasterId::Jeff => &MASTERS[3],
            MasterId::Berg => &MASTERS[4],
        }
    }

    pub fn ability(self) -> Ability {
        self.master().ability
    }
}

/// One of the two seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Index into `GameState::players`
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// 1-based seat number for display
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// A participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u64,
    pub master: Option<MasterId>,
    pub shots_left: u32,
    pub total_shots: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, shots: u32) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            master: None,
            shots_left: shots,
            total_shots: shots,
        }
    }
}

/// Notable things that happened, for hosts to drive sound and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BoardGenerated { pegs: usize },
    BallLaunched { player: PlayerId, pos: Vec2, vel: Vec2 },
    PegHit { player: PlayerId, peg: PegId, kind: PegKind, points: u64 },
    AbilityActivated { player: PlayerId, ability: Ability },
    BallRetired { player: PlayerId, shot_points: u64 },
    TurnEnded { player: PlayerId, shots_left: u32 },
    PlayerSwitched { player: PlayerId },
    GameOver { winner: Option<PlayerId> },
    GameReset,
}

/// RNG state wrapper for serialization
///
/// Each call to `next_rng` hands out a fresh stream so successive boards
/// differ while the whole game stays reproducible from its seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub rng_state: RngState,
    /// Pegs in generation order (ids ascending)
    pub pegs: Vec<Peg>,
    pub players: [Player; 2],
    pub current_player: PlayerId,
    pub phase: GamePhase,
    pub winner: Option<PlayerId>,
    /// Present iff `phase == Shooting`
    pub ball: Option<Ball>,
    /// Current aim (radians)
    pub aim_angle: f32,
    /// Current player's master ability is live for this shot
    pub ability_active: bool,
    /// Points scored during the current shot
    pub shot_points: u64,
    /// Pegs deactivated during the current shot, in hit order
    pub shot_hits: Vec<PegId>,
    /// Ticks left in the waiting phase
    pub wait_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending events; hosts should drain them every tick. Capped at
    /// `MAX_PENDING_EVENTS`, dropping the oldest.
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: PegId,
}

/// Undrained events kept before the oldest are discarded
pub const MAX_PENDING_EVENTS: usize = 1024;

impl GameState {
    /// Create a new game with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    /// Create a new game; out-of-range settings are clamped first
    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let shots = settings.shots_per_player;
        Self {
            rng_state: RngState::new(seed),
            pegs: Vec::new(),
            players: [
                Player::new(PlayerId::One, "Player 1", shots),
                Player::new(PlayerId::Two, "Player 2", shots),
            ],
            current_player: PlayerId::One,
            phase: GamePhase::Selection,
            winner: None,
            ball: None,
            aim_angle: std::f32::consts::FRAC_PI_2,
            ability_active: false,
            shot_points: 0,
            shot_hits: Vec::new(),
            wait_ticks: 0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new peg ID
    pub fn next_entity_id(&mut self) -> PegId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn current(&self) -> &Player {
        self.player(self.current_player)
    }

    pub fn current_mut(&mut self) -> &mut Player {
        self.player_mut(self.current_player)
    }

    /// Whether it is `id`'s turn
    pub fn is_current(&self, id: PlayerId) -> bool {
        self.current_player == id
    }

    pub fn ball_active(&self) -> bool {
        self.ball.is_some()
    }

    pub fn peg(&self, id: PegId) -> Option<&Peg> {
        self.pegs.iter().find(|p| p.id == id)
    }

    pub fn active_pegs(&self) -> impl Iterator<Item = &Peg> {
        self.pegs.iter().filter(|p| p.active)
    }

    /// Overrides in force for the current player's shot
    pub fn modifier_profile(&self) -> ModifierProfile {
        modifier_profile(self.current().master, self.ability_active)
    }

    /// Aim guide for the current player; empty outside the aiming phase
    pub fn trajectory_preview(&self) -> Vec<Vec2> {
        if self.phase != GamePhase::Aiming {
            return Vec::new();
        }
        let profile = self.modifier_profile();
        predict_trajectory(
            self.settings.launcher,
            self.aim_angle,
            profile.trajectory_length(&self.settings),
            &profile,
            &self.settings,
        )
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let dropped = self.events.len() / 2;
            log::warn!("Event queue full; dropping {dropped} oldest events");
            self.events.drain(..dropped);
        }
        self.events.push(event);
    }
}
