//! Whole-match integration tests

use zone_royale::core::config::{load_config, GameConfig};
use zone_royale::game::{autopilot, Match, PlayerIntent};
use zone_royale::world::{LogLevel, MatchOutcome};

fn small_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.grid.rows = 16;
    config.grid.cols = 16;
    config.game.enemy_count = 5;
    config.game.max_turns = 80;
    config
}

#[test]
fn test_match_terminates_with_an_outcome() {
    let mut game = Match::new(small_config(), 2024).unwrap();
    let summary = game.run(autopilot);

    assert!(game.is_over());
    assert!(summary.outcome.is_some());
    assert!(summary.turns <= 80);
    if summary.outcome == Some(MatchOutcome::Timeout) {
        assert_eq!(summary.turns, 80);
    }
}

#[test]
fn test_same_seed_same_match() {
    let mut a = Match::new(small_config(), 77).unwrap();
    let mut b = Match::new(small_config(), 77).unwrap();

    let sa = a.run(autopilot);
    let sb = b.run(autopilot);

    assert_eq!(sa.outcome, sb.outcome);
    assert_eq!(sa.turns, sb.turns);
    assert_eq!(sa.player_hp, sb.player_hp);
    assert_eq!(sa.surviving_enemies, sb.surviving_enemies);
    assert_eq!(a.state.log.len(), b.state.log.len());
}

#[test]
fn test_ai_phase_never_errors_in_normal_play() {
    for seed in 0..5 {
        let mut game = Match::new(small_config(), seed).unwrap();
        game.run(|_, _| PlayerIntent::Wait);
        assert_eq!(game.state.log.at_level(LogLevel::Error).count(), 0);
    }
}

#[test]
fn test_zone_only_shrinks() {
    let mut config = small_config();
    config.storm.shrink_interval = 2;
    let mut game = Match::new(config, 5).unwrap();

    let mut previous = game.state.zone;
    while !game.is_over() {
        game.play_turn(PlayerIntent::Wait);
        let zone = game.state.zone;
        assert!(zone.height() <= previous.height());
        assert!(zone.width() <= previous.width());
        assert!(zone.height() >= game.config().storm.min_size.min(previous.height()));
        previous = zone;
    }
}

#[test]
fn test_summary_serializes() {
    let mut game = Match::new(small_config(), 9).unwrap();
    let summary = game.run(autopilot);
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"seed\":9"));
    assert!(json.contains("\"turns\""));
}

#[test]
fn test_shipped_configs_load() {
    for name in ["default", "skirmish"] {
        let config = load_config(name).unwrap();
        assert!(config.validate().is_ok(), "{} should validate", name);
    }
}
