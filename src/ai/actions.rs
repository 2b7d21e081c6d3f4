//! Action primitives: healing and attacks
//!
//! Each function either performs the whole action or leaves the state
//! untouched and returns `false`.

use crate::ai::perception::has_clear_cardinal_line_of_sight;
use crate::core::config::CombatConfig;
use crate::core::types::UnitId;
use crate::world::log::{LogLevel, LogTarget};
use crate::world::state::GameState;

/// How an attack was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Ranged,
    Melee,
}

impl AttackKind {
    pub fn name(&self) -> &'static str {
        match self {
            AttackKind::Ranged => "shoots",
            AttackKind::Melee => "strikes",
        }
    }
}

/// Consume one medkit and heal up to `heal_amount`, never above max HP
///
/// Fails without side effects when the unit holds no medkits or is already
/// at full health.
pub fn use_medkit(state: &mut GameState, id: UnitId, heal_amount: u32) -> bool {
    let Some(unit) = state.unit_mut(id) else {
        return false;
    };
    if unit.medkits == 0 || unit.hp >= unit.max_hp {
        return false;
    }

    let healed = heal_amount.min(unit.max_hp - unit.hp);
    unit.medkits -= 1;
    unit.hp += healed;
    let (hp, max_hp, medkits) = (unit.hp, unit.max_hp, unit.medkits);

    state.record(
        format!(
            "{} uses a medkit, healing {} HP ({}/{}, {} medkits left)",
            id, healed, hp, max_hp, medkits
        ),
        LogLevel::Info,
        LogTarget::Combat,
        Some("heal"),
    );
    true
}

/// Shoot `target` along a clear row or column
///
/// Requires ammo and cardinal sight within `combat.ranged_range`.
pub fn try_ranged_attack(
    state: &mut GameState,
    attacker: UnitId,
    target: UnitId,
    combat: &CombatConfig,
) -> bool {
    let (Some(a), Some(t)) = (state.unit(attacker), state.unit(target)) else {
        return false;
    };
    if !a.is_active() || !t.is_active() || a.ammo == 0 {
        return false;
    }
    if !has_clear_cardinal_line_of_sight(a, t, combat.ranged_range, state) {
        return false;
    }

    if let Some(unit) = state.unit_mut(attacker) {
        unit.ammo -= 1;
    }
    apply_hit(state, attacker, target, combat.ranged_damage, AttackKind::Ranged);
    true
}

/// Strike an orthogonally adjacent `target`
pub fn try_melee_attack(
    state: &mut GameState,
    attacker: UnitId,
    target: UnitId,
    combat: &CombatConfig,
) -> bool {
    let (Some(a), Some(t)) = (state.unit(attacker), state.unit(target)) else {
        return false;
    };
    if !a.is_active() || !t.is_active() {
        return false;
    }
    let adjacent = match (a.position, t.position) {
        (Some(from), Some(to)) => from.manhattan(&to) == 1,
        _ => false,
    };
    if !adjacent {
        return false;
    }

    apply_hit(state, attacker, target, combat.melee_damage, AttackKind::Melee);
    true
}

fn apply_hit(
    state: &mut GameState,
    attacker: UnitId,
    target: UnitId,
    damage: u32,
    kind: AttackKind,
) {
    let Some(victim) = state.unit_mut(target) else {
        return;
    };
    let lethal = victim.take_damage(damage);
    let remaining_hp = victim.hp;
    let ammo = state.unit(attacker).map_or(0, |u| u.ammo);

    let detail = match kind {
        AttackKind::Ranged => format!(" (ammo left {})", ammo),
        AttackKind::Melee => String::new(),
    };
    state.record(
        format!(
            "{} {} {} for {} damage, {} HP left{}",
            attacker,
            kind.name(),
            target,
            damage,
            remaining_hp,
            detail
        ),
        LogLevel::Info,
        LogTarget::Combat,
        Some("attack"),
    );

    if lethal {
        state.record(
            format!("{} eliminated {}", attacker, target),
            LogLevel::Info,
            LogTarget::Main,
            Some("elimination"),
        );
        if let Some(enemy) = state.enemy_mut(attacker) {
            enemy.target_enemy = None;
        }
        tracing::debug!("{} eliminated {} on turn {}", attacker, target, state.turn);
    }
}
