//! Arena generation: scatter map, player spawn and enemy roster

use ahash::AHashSet;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::ai::random::SeededRandom;
use crate::core::config::{GameConfig, GridConfig};
use crate::core::error::{Result, RoyaleError};
use crate::core::types::{GridPos, UnitId};
use crate::world::map::{GameMap, TileKind};
use crate::world::state::GameState;
use crate::world::unit::{Enemy, Unit};
use crate::world::zone::SafeZone;

/// Attempts per enemy before giving up on finding a free cell
const SPAWN_ATTEMPTS: u32 = 64;

/// Build a complete starting state from configuration
pub fn build_state(config: &GameConfig, rng: &mut SeededRandom) -> Result<GameState> {
    config.validate()?;
    let rng = rng.rng();

    let mut map = generate_map(&config.grid, rng);
    let center = SafeZone::covering(config.grid.rows, config.grid.cols).center();
    map.set(center, TileKind::Land);

    let player = Unit::new(UnitId::PLAYER, config.units.player_hp)
        .with_position(center)
        .with_supplies(config.units.player_ammo, config.units.player_medkits);

    let mut taken = AHashSet::new();
    taken.insert(center);

    let mut enemies = Vec::with_capacity(config.game.enemy_count as usize);
    for n in 1..=config.game.enemy_count {
        let pos = free_cell(&map, &taken, rng).ok_or_else(|| {
            RoyaleError::Setup(format!("no free walkable cell for enemy {}", n))
        })?;
        taken.insert(pos);
        enemies.push(spawn_enemy(UnitId::new(n), pos, config, rng));
    }

    tracing::debug!(
        "Spawned {} enemies on a map with {} walls and {} trees",
        enemies.len(),
        map.count(TileKind::Wall),
        map.count(TileKind::Tree)
    );

    Ok(GameState::new(map, player, enemies))
}

/// Scatter terrain and resources according to the configured densities
pub fn generate_map(grid: &GridConfig, rng: &mut ChaCha8Rng) -> GameMap {
    let mut map = GameMap::new(grid.rows, grid.cols);
    let bands = [
        (grid.wall_density, TileKind::Wall),
        (grid.tree_density, TileKind::Tree),
        (grid.water_density, TileKind::Water),
        (grid.medkit_density, TileKind::Medkit),
        (grid.ammo_density, TileKind::Ammo),
    ];

    for row in 0..grid.rows as i32 {
        for col in 0..grid.cols as i32 {
            let roll: f64 = rng.gen();
            let mut threshold = 0.0;
            for (density, tile) in bands {
                threshold += density;
                if roll < threshold {
                    map.set(GridPos::new(row, col), tile);
                    break;
                }
            }
        }
    }

    map
}

fn free_cell(map: &GameMap, taken: &AHashSet<GridPos>, rng: &mut ChaCha8Rng) -> Option<GridPos> {
    for _ in 0..SPAWN_ATTEMPTS {
        let pos = GridPos::new(
            rng.gen_range(0..map.rows() as i32),
            rng.gen_range(0..map.cols() as i32),
        );
        if is_spawnable(map, taken, pos) {
            return Some(pos);
        }
    }

    // dense maps: fall back to a scan
    map.iter()
        .map(|(pos, _)| pos)
        .find(|pos| is_spawnable(map, taken, *pos))
}

/// Plain land only: a unit spawned on a resource tile would never step
/// onto it and so never collect it
fn is_spawnable(map: &GameMap, taken: &AHashSet<GridPos>, pos: GridPos) -> bool {
    map.get(pos) == Some(TileKind::Land) && !taken.contains(&pos)
}

fn spawn_enemy(id: UnitId, pos: GridPos, config: &GameConfig, rng: &mut ChaCha8Rng) -> Enemy {
    let units = &config.units;
    let hp = rng.gen_range(units.enemy_hp_min..=units.enemy_hp_max);
    let ammo = rng.gen_range(0..=units.enemy_ammo_max);
    let medkits = rng.gen_range(0..=units.enemy_medkits_max);
    let detection = rng.gen_range(config.ai.detection_range_min..=config.ai.detection_range_max);

    let unit = Unit::new(id, hp)
        .with_position(pos)
        .with_supplies(ammo, medkits);
    Enemy::new(unit, detection)
}
