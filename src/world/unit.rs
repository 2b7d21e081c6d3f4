//! Units: the player and the AI-controlled enemies

use serde::{Deserialize, Serialize};

use crate::core::types::{GridPos, UnitId};
use crate::world::map::ResourceKind;

/// State shared by the player and enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    /// `None` until the unit has been placed on the map
    pub position: Option<GridPos>,
    pub hp: u32,
    pub max_hp: u32,
    pub ammo: u32,
    pub medkits: u32,
}

impl Unit {
    pub fn new(id: UnitId, max_hp: u32) -> Self {
        Self {
            id,
            position: None,
            hp: max_hp,
            max_hp,
            ammo: 0,
            medkits: 0,
        }
    }

    pub fn with_position(mut self, position: GridPos) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_supplies(mut self, ammo: u32, medkits: u32) -> Self {
        self.ammo = ammo;
        self.medkits = medkits;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Current HP as a fraction of max HP
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    /// Alive and standing somewhere on the map
    pub fn is_active(&self) -> bool {
        self.is_alive() && self.position.is_some()
    }

    /// Apply damage, saturating at zero. Returns `true` if this blow was lethal.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.hp = self.hp.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    pub fn add_resource(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Medkit => self.medkits = self.medkits.saturating_add(amount),
            ResourceKind::Ammo => self.ammo = self.ammo.saturating_add(amount),
        }
    }
}

/// Behaviour state of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Exploring,
    SeekingResources,
    EngagingEnemy,
    Fleeing,
    Healing,
}

impl AiState {
    pub fn name(&self) -> &'static str {
        match self {
            AiState::Exploring => "EXPLORING",
            AiState::SeekingResources => "SEEKING_RESOURCES",
            AiState::EngagingEnemy => "ENGAGING_ENEMY",
            AiState::Fleeing => "FLEEING",
            AiState::Healing => "HEALING",
        }
    }

    pub fn all() -> [AiState; 5] {
        [
            AiState::Exploring,
            AiState::SeekingResources,
            AiState::EngagingEnemy,
            AiState::Fleeing,
            AiState::Healing,
        ]
    }
}

/// A remembered resource tile the enemy is walking toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTarget {
    pub pos: GridPos,
    pub kind: ResourceKind,
}

/// An AI-controlled unit
///
/// Targets are held by id and re-resolved against `GameState` every turn,
/// so a removed or dead unit can never be reached through a stale handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub unit: Unit,
    pub state: AiState,
    /// Unit being engaged or fled from
    pub target_enemy: Option<UnitId>,
    pub target_resource: Option<ResourceTarget>,
    /// Perception radius, rolled at spawn
    pub detection_range: u32,
}

impl Enemy {
    pub fn new(unit: Unit, detection_range: u32) -> Self {
        Self {
            unit,
            state: AiState::Exploring,
            target_enemy: None,
            target_resource: None,
            detection_range,
        }
    }

    pub fn id(&self) -> UnitId {
        self.unit.id
    }

    /// Change state, logging the transition at debug level
    pub fn transition(&mut self, next: AiState) {
        if self.state != next {
            tracing::debug!(
                "{} {} -> {}",
                self.unit.id,
                self.state.name(),
                next.name()
            );
            self.state = next;
        }
    }

    pub fn clear_targets(&mut self) {
        self.target_enemy = None;
        self.target_resource = None;
    }
}
