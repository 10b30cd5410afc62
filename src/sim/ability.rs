//! Master abilities and the physics modifier profile they produce
//!
//! A profile is a set of optional overrides layered on top of `Settings`.
//! The default profile changes nothing.

use serde::{Deserialize, Serialize};

use super::state::{MasterId, Peg, PegKind};
use crate::Settings;
use crate::consts::CHAIN_REACTION_RADIUS;

/// Ability kinds, one per master
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Longer, more accurate trajectory preview
    SuperGuide,
    /// Struck pegs electrify their neighbours
    UberVolt,
    /// Standard pegs become intangible
    Nightshade,
    /// Bigger, faster, heavier ball
    BoulderThrow,
    /// Slippery low-gravity board
    DeepFreeze,
}

impl Ability {
    /// Overrides this ability applies while active
    pub fn profile(self) -> ModifierProfile {
        match self {
            Ability::SuperGuide => ModifierProfile {
                trajectory_length: Some(60),
                trajectory_friction: Some(0.995),
                ..Default::default()
            },
            Ability::UberVolt => ModifierProfile {
                chain_reaction_radius: Some(CHAIN_REACTION_RADIUS),
                ..Default::default()
            },
            Ability::Nightshade => ModifierProfile {
                peg_filter: PegFilter::Hide(PegKind::Standard),
                ..Default::default()
            },
            Ability::BoulderThrow => ModifierProfile {
                radius_multiplier: Some(2.0),
                velocity_multiplier: Some(1.25),
                bounce: Some(0.45),
                ..Default::default()
            },
            Ability::DeepFreeze => ModifierProfile {
                gravity: Some(0.15),
                friction: Some(0.99),
                bounce: Some(0.4),
                ..Default::default()
            },
        }
    }
}

/// Which pegs the ball can collide with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PegFilter {
    #[default]
    All,
    /// Pegs of this kind are skipped by collision for the whole shot
    Hide(PegKind),
}

impl PegFilter {
    #[inline]
    pub fn admits(self, peg: &Peg) -> bool {
        match self {
            PegFilter::All => true,
            PegFilter::Hide(kind) => peg.kind != kind,
        }
    }
}

/// Physics and scoring overrides for the current shot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModifierProfile {
    pub gravity: Option<f32>,
    pub friction: Option<f32>,
    pub bounce: Option<f32>,
    pub radius_multiplier: Option<f32>,
    pub velocity_multiplier: Option<f32>,
    pub peg_filter: PegFilter,
    pub chain_reaction_radius: Option<f32>,
    pub trajectory_length: Option<usize>,
    /// Friction used by the trajectory preview only
    pub trajectory_friction: Option<f32>,
}

impl ModifierProfile {
    pub fn gravity(&self, settings: &Settings) -> f32 {
        self.gravity.unwrap_or(settings.gravity)
    }

    pub fn friction(&self, settings: &Settings) -> f32 {
        self.friction.unwrap_or(settings.friction)
    }

    pub fn bounce(&self, settings: &Settings) -> f32 {
        self.bounce.unwrap_or(settings.bounce_factor)
    }

    pub fn ball_radius(&self, settings: &Settings) -> f32 {
        settings.ball_radius * self.radius_multiplier.unwrap_or(1.0)
    }

    pub fn velocity_multiplier(&self) -> f32 {
        self.velocity_multiplier.unwrap_or(1.0)
    }

    pub fn trajectory_length(&self, settings: &Settings) -> usize {
        self.trajectory_length.unwrap_or(settings.trajectory_steps)
    }

    /// Preview friction: the guidance override, else the shot's friction
    pub fn trajectory_friction(&self, settings: &Settings) -> f32 {
        self.trajectory_friction
            .unwrap_or_else(|| self.friction(settings))
    }
}

/// Profile for a player's master given whether the ability is live
pub fn modifier_profile(master: Option<MasterId>, ability_active: bool) -> ModifierProfile {
    match master {
        Some(master) if ability_active => master.ability().profile(),
        _ => ModifierProfile::default(),
    }
}
