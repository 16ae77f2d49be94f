//! Account record types for the legion economy.
//!
//! One `Account` per user identity, with two independent currencies, an
//! owned-card sequence and a fixed eight-slot trooper team. The serialized
//! field names are part of the on-disk contract: an existing ledger file
//! keeps loading unchanged across releases.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Stable unique user identity (chat platform user id as a string).
pub type UserId = String;

/// Owned card identifier. Duplicates are allowed in an inventory.
pub type CardId = String;

/// Battles restored to each account by the daily reset, and granted at
/// provisioning time.
pub const DAILY_BATTLE_LIMIT: u32 = 5;

/// The eight trooper roles every team carries.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    Assault,
    Sharpshooter,
    Medic,
    ShieldTrooper,
    JetTrooper,
    Engineer,
    Pilot,
    Barc,
}

impl TeamRole {
    pub const ALL: [TeamRole; 8] = [
        TeamRole::Assault,
        TeamRole::Sharpshooter,
        TeamRole::Medic,
        TeamRole::ShieldTrooper,
        TeamRole::JetTrooper,
        TeamRole::Engineer,
        TeamRole::Pilot,
        TeamRole::Barc,
    ];
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamRole::Assault => write!(f, "assault"),
            TeamRole::Sharpshooter => write!(f, "sharpshooter"),
            TeamRole::Medic => write!(f, "medic"),
            TeamRole::ShieldTrooper => write!(f, "shield_trooper"),
            TeamRole::JetTrooper => write!(f, "jet_trooper"),
            TeamRole::Engineer => write!(f, "engineer"),
            TeamRole::Pilot => write!(f, "pilot"),
            TeamRole::Barc => write!(f, "barc"),
        }
    }
}

impl std::str::FromStr for TeamRole {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assault" => Ok(TeamRole::Assault),
            "sharpshooter" => Ok(TeamRole::Sharpshooter),
            "medic" => Ok(TeamRole::Medic),
            "shield_trooper" => Ok(TeamRole::ShieldTrooper),
            "jet_trooper" => Ok(TeamRole::JetTrooper),
            "engineer" => Ok(TeamRole::Engineer),
            "pilot" => Ok(TeamRole::Pilot),
            "barc" => Ok(TeamRole::Barc),
            _ => Err(format!(
                "Invalid role: {}. Allowed: assault, sharpshooter, medic, shield_trooper, jet_trooper, engineer, pilot, barc",
                s
            )),
        }
    }
}

/// A team always has exactly these eight slots. Representing them as named
/// struct fields (rather than a map) keeps the shape invariant out of reach
/// of any update: the serialized document always carries all eight keys,
/// null when unassigned.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Team {
    pub assault: Option<CardId>,
    pub sharpshooter: Option<CardId>,
    pub medic: Option<CardId>,
    pub shield_trooper: Option<CardId>,
    pub jet_trooper: Option<CardId>,
    pub engineer: Option<CardId>,
    pub pilot: Option<CardId>,
    pub barc: Option<CardId>,
}

impl Team {
    pub fn slot(&self, role: TeamRole) -> &Option<CardId> {
        match role {
            TeamRole::Assault => &self.assault,
            TeamRole::Sharpshooter => &self.sharpshooter,
            TeamRole::Medic => &self.medic,
            TeamRole::ShieldTrooper => &self.shield_trooper,
            TeamRole::JetTrooper => &self.jet_trooper,
            TeamRole::Engineer => &self.engineer,
            TeamRole::Pilot => &self.pilot,
            TeamRole::Barc => &self.barc,
        }
    }

    pub fn slot_mut(&mut self, role: TeamRole) -> &mut Option<CardId> {
        match role {
            TeamRole::Assault => &mut self.assault,
            TeamRole::Sharpshooter => &mut self.sharpshooter,
            TeamRole::Medic => &mut self.medic,
            TeamRole::ShieldTrooper => &mut self.shield_trooper,
            TeamRole::JetTrooper => &mut self.jet_trooper,
            TeamRole::Engineer => &mut self.engineer,
            TeamRole::Pilot => &mut self.pilot,
            TeamRole::Barc => &mut self.barc,
        }
    }

    /// Number of slots with a card assigned.
    pub fn assigned_count(&self) -> usize {
        TeamRole::ALL
            .iter()
            .filter(|role| self.slot(**role).is_some())
            .count()
    }
}

/// Per-user economy record.
///
/// Deserialization is strict: unknown keys or missing fields fail, so a
/// document written by the superseded `money`/`upgrades` schema (or edited
/// by hand into a different shape) is rejected at load instead of being
/// half-read.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Account {
    /// Primary currency ("235th Credits").
    pub credits: u64,
    /// Secondary currency ("Sand Grain Credits"), independent of credits.
    pub sgc: u64,
    pub team: Team,
    /// Owned cards in acquisition order. Duplicates allowed.
    pub cards: Vec<CardId>,
    /// Unix timestamp (seconds) before which the user may not battle.
    /// `None` means no cooldown is active.
    pub battle_cooldown: Option<u64>,
    /// Daily battle counter, restored by the maintenance reset.
    pub battles_remaining: u32,
}

impl Account {
    /// A freshly provisioned account: caller-supplied starting credits,
    /// everything else at the documented defaults.
    pub fn new(starting_credits: u64) -> Self {
        Self {
            credits: starting_credits,
            sgc: 0,
            team: Team::default(),
            cards: Vec::new(),
            battle_cooldown: None,
            battles_remaining: DAILY_BATTLE_LIMIT,
        }
    }

    pub fn credit_credits(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.credits = self.credits.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidTransition("credits balance would overflow".to_string())
        })?;
        Ok(())
    }

    pub fn debit_credits(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.credits = self.credits.checked_sub(amount).ok_or_else(|| {
            LedgerError::InvalidTransition(format!(
                "insufficient credits: have {}, need {}",
                self.credits, amount
            ))
        })?;
        Ok(())
    }

    pub fn credit_sgc(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.sgc = self.sgc.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidTransition("SGC balance would overflow".to_string())
        })?;
        Ok(())
    }

    pub fn debit_sgc(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.sgc = self.sgc.checked_sub(amount).ok_or_else(|| {
            LedgerError::InvalidTransition(format!(
                "insufficient SGC: have {}, need {}",
                self.sgc, amount
            ))
        })?;
        Ok(())
    }

    /// Append a card to the inventory. Order is acquisition order.
    pub fn grant_card(&mut self, card: CardId) {
        self.cards.push(card);
    }

    /// Put an owned card into a team slot, replacing whatever was there.
    pub fn assign_role(&mut self, role: TeamRole, card: CardId) -> Result<(), LedgerError> {
        if !self.cards.contains(&card) {
            return Err(LedgerError::InvalidTransition(format!(
                "card not owned: {}",
                card
            )));
        }
        *self.team.slot_mut(role) = Some(card);
        Ok(())
    }

    pub fn clear_role(&mut self, role: TeamRole) {
        *self.team.slot_mut(role) = None;
    }

    pub fn set_battle_cooldown(&mut self, until: u64) {
        self.battle_cooldown = Some(until);
    }

    pub fn clear_battle_cooldown(&mut self) {
        self.battle_cooldown = None;
    }

    /// Spend one of today's battles.
    pub fn consume_battle(&mut self) -> Result<(), LedgerError> {
        self.battles_remaining = self.battles_remaining.checked_sub(1).ok_or_else(|| {
            LedgerError::InvalidTransition("no battles remaining today".to_string())
        })?;
        Ok(())
    }

    /// Start a fresh battle day: restore the counter and drop any cooldown.
    pub fn reset_battles(&mut self, battles: u32) {
        self.battles_remaining = battles;
        self.battle_cooldown = None;
    }
}
