use std::fs;
use std::path::Path;

use tactics_content::ContentFactory;
use tactics_core::{CatalogOracle, GameEvent, InputMode, PlayerId, Position, SpatialQuery};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write_data(dir: &Path, scenario: &str) {
    fs::create_dir_all(dir.join("maps")).unwrap();
    fs::create_dir_all(dir.join("scenarios")).unwrap();
    fs::write(dir.join("config.toml"), "purchased_units_ready = true\n").unwrap();
    fs::write(
        dir.join("units.ron"),
        r#"[
            (name: "Chief", purchasable: false, price: 0, max_health: 4, travel_range: 1,
             attack_range: 1, melee_damage: 1, counter_range: 1, is_boss: true,
             capabilities: (income_per_turn: 3)),
            (name: "Pike", price: 5, max_health: 3, travel_range: 1, attack_range: 1,
             melee_damage: 2, counter_range: 1),
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join("maps").join("strip.ron"),
        "(dimensions: (5, 2), obstacles: [(2, 0, (breakable: false))])",
    )
    .unwrap();
    fs::write(dir.join("scenarios").join("test.ron"), scenario).unwrap();
}

#[test]
fn bundled_skirmish_is_playable() {
    init_tracing();
    let mut content = ContentFactory::bundled().build_match("skirmish").unwrap();

    assert_eq!(content.catalog.len(), 5);
    assert_eq!(content.state.units().count(), 6);
    assert_eq!(content.state.grid.dimensions().width, 9);
    let king = content.catalog.find_by_name("King").unwrap();
    let red_king = content.state.unit_at(Position::new(8, 3)).unwrap();
    assert_eq!(red_king.template, king);
    assert_eq!(red_king.owner, PlayerId::Player2);

    let mut engine = content.engine();
    let outcome = engine.start_match().unwrap();
    assert!(outcome.contains(&GameEvent::TurnStarted {
        player: PlayerId::Player1,
        turn: 1,
    }));
    assert!(outcome.contains(&GameEvent::HealthChanged {
        player: PlayerId::Player2,
        health: 8,
    }));
    assert_eq!(engine.mode(), InputMode::Idle);
    assert_eq!(
        engine.state().player(PlayerId::Player1).unwrap().currency(),
        30
    );

    let soldier = engine.state().unit_at(Position::new(1, 2)).unwrap().id;
    engine.select(soldier).unwrap();
    assert_eq!(engine.mode(), InputMode::UnitActive);
}

#[test]
fn bad_placements_are_skipped() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    write_data(
        dir.path(),
        r#"(
            map: "strip",
            players: [(id: Player1, currency: 7), (id: Player2), (id: Player1)],
            units: [
                (owner: Player1, template: "Chief", at: (0, 0)),
                (owner: Player1, template: "Dragon", at: (1, 0)),
                (owner: Player1, template: "Pike", at: (2, 0)),
                (owner: Player1, template: "Pike", at: (0, 0)),
                (owner: Player1, template: "Chief", at: (1, 1)),
                (owner: Player2, template: "Pike", at: (9, 9)),
                (owner: Player2, template: "Pike", at: (4, 1)),
            ],
        )"#,
    );

    let content = ContentFactory::new(dir.path()).build_match("test").unwrap();

    assert!(content.config.purchased_units_ready);
    assert_eq!(content.state.players().count(), 2);
    assert_eq!(
        content.state.player(PlayerId::Player1).unwrap().currency(),
        7
    );
    let placed: Vec<_> = content
        .state
        .units()
        .map(|unit| (unit.owner, unit.position))
        .collect();
    assert_eq!(placed.len(), 2);
    assert!(placed.contains(&(PlayerId::Player1, Position::new(0, 0))));
    assert!(placed.contains(&(PlayerId::Player2, Position::new(4, 1))));
}

#[test]
fn missing_map_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path(), r#"(map: "nowhere", players: [])"#);

    let error = ContentFactory::new(dir.path())
        .build_match("test")
        .unwrap_err();
    assert!(format!("{error:#}").contains("nowhere.ron"));
}
