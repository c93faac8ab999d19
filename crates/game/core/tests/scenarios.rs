mod common;

use common::{ARCHER, KING, Match, SOLDIER};
use tactics_core::{
    CommandError, GameEvent, InputMode, MapDimensions, MapLayout, PlayerId, Position,
    SpatialQuery, UnitCatalog, UnitTemplate,
};

#[test]
fn reach_stops_at_travel_range() {
    let mut game = Match::new(MapLayout::open(MapDimensions::new(4, 1)));
    let soldier = game.spawn(PlayerId::Player1, SOLDIER, Position::ORIGIN);

    game.engine().select(soldier).unwrap();

    assert_eq!(
        game.highlighted(),
        vec![(Position::new(1, 0), Some(1)), (Position::new(2, 0), Some(2))]
    );
    let far = game.state.grid.tile(Position::new(3, 0)).unwrap();
    assert!(!far.is_highlighted());
    assert_eq!(far.travel_distance(), None);
}

#[test]
fn melee_hit_is_reduced_by_armor_and_wears_it() {
    let mut catalog = UnitCatalog::default();
    let striker = catalog.push(
        UnitTemplate::builder("Striker")
            .max_health(5)
            .damage(3, 2, 1)
            .build(),
    ).unwrap();
    let guard = catalog.push(
        UnitTemplate::builder("Guard")
            .max_health(5)
            .damage(1, 0, 1)
            .armor(1)
            .build(),
    ).unwrap();
    let mut game = Match::with_catalog(MapLayout::open(MapDimensions::new(4, 4)), catalog);
    let attacker = game.spawn(PlayerId::Player1, striker, Position::new(1, 1));
    let target = game.spawn(PlayerId::Player2, guard, Position::new(2, 1));

    let mut engine = game.engine();
    engine.select(attacker).unwrap();
    assert_eq!(
        engine.state().unit(target).unwrap().attackable_distance(),
        Some(1)
    );
    let outcome = engine.attack(target).unwrap();

    assert!(outcome.contains(&GameEvent::DamageNumber {
        amount: 2,
        position: Position::new(2, 1),
    }));
    let target = game.state.unit(target).unwrap();
    assert_eq!(target.health(), 3);
    assert_eq!(target.armor(), 0);

    // The guard answers with its melee damage.
    let attacker = game.state.unit(attacker).unwrap();
    assert_eq!(attacker.health(), 4);
    assert!(attacker.has_attacked);
}

#[test]
fn boss_death_ends_the_match_once() {
    let mut game = Match::new(MapLayout::rectangle(MapDimensions::new(5, 5)));
    let soldier = game.spawn(PlayerId::Player1, SOLDIER, Position::new(2, 2));
    let king = game.spawn(PlayerId::Player2, KING, Position::new(2, 3));
    let reserve = game.spawn(PlayerId::Player1, SOLDIER, Position::new(0, 0));

    let mut engine = game.engine();
    engine.start_match().unwrap();
    engine.select(soldier).unwrap();
    let outcome = engine.attack(king).unwrap();

    let game_overs = outcome
        .events
        .iter()
        .filter(|event| matches!(event, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);
    assert!(outcome.contains(&GameEvent::GameOver {
        winner: PlayerId::Player1
    }));
    assert!(outcome.contains(&GameEvent::HealthChanged {
        player: PlayerId::Player2,
        health: 0,
    }));
    assert_eq!(engine.winner(), Some(PlayerId::Player1));
    assert_eq!(engine.mode(), InputMode::GameOver);
    assert!(!engine.is_input_accepted());
    assert!(engine.state().unit(king).is_none());

    // Input is frozen.
    assert_eq!(
        engine.select(reserve),
        Err(CommandError::InputNotAccepted(InputMode::GameOver))
    );
    assert!(engine.end_turn().is_err());
    assert!(engine.open_store(None).is_err());

    // The terminal presentation fires once, after the delay.
    assert!(engine.advance(0.5).unwrap().is_empty());
    let presented = engine.advance(0.6).unwrap();
    assert_eq!(
        presented.events,
        vec![GameEvent::GameOverPresented {
            winner: PlayerId::Player1
        }]
    );
    assert!(engine.advance(5.0).unwrap().is_empty());
}

#[test]
fn purchase_requires_enough_currency() {
    let mut game = Match::new(MapLayout::rectangle(MapDimensions::new(5, 5)));
    let spawn_at = Position::new(0, 2);

    let mut engine = game.engine();
    engine.set_currency(PlayerId::Player1, 15).unwrap();
    engine.open_store(Some(spawn_at)).unwrap();
    assert_eq!(engine.mode(), InputMode::Buying);

    let archer_offer = engine
        .store_offers()
        .into_iter()
        .find(|offer| offer.template == ARCHER)
        .unwrap();
    assert!(!archer_offer.enabled);

    assert_eq!(
        engine.purchase(ARCHER),
        Err(CommandError::InsufficientFunds {
            price: 20,
            currency: 15
        })
    );
    assert_eq!(engine.mode(), InputMode::Buying);
    assert!(engine.state().unit_at(spawn_at).is_none());
    assert_eq!(engine.state().player(PlayerId::Player1).unwrap().currency(), 15);

    engine.set_currency(PlayerId::Player1, 25).unwrap();
    let outcome = engine.purchase(ARCHER).unwrap();
    assert!(outcome.contains(&GameEvent::CurrencyChanged {
        player: PlayerId::Player1,
        currency: 5,
    }));
    assert_eq!(engine.mode(), InputMode::Idle);

    let bought = game.state.unit_at(spawn_at).unwrap();
    assert_eq!(bought.owner, PlayerId::Player1);
    assert_eq!(bought.template, ARCHER);
    assert_eq!(game.currency(PlayerId::Player1), 5);
    assert_eq!(game.state.player(PlayerId::Player1).unwrap().unit_count(), 1);
}
