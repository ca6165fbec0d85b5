use kamikaze_furry::compute::{init_state, start_game};
use kamikaze_furry::entities::*;

// ── AttackPattern ─────────────────────────────────────────────────────────────

#[test]
fn patterns_cycle_in_order() {
    assert_eq!(AttackPattern::SideToSide.next(), AttackPattern::Circle);
    assert_eq!(AttackPattern::Circle.next(), AttackPattern::ChasePlayer);
    assert_eq!(AttackPattern::ChasePlayer.next(), AttackPattern::SideToSide);
}

#[test]
fn pattern_ids_index_all() {
    for (i, pattern) in AttackPattern::ALL.iter().enumerate() {
        assert_eq!(pattern.id(), i);
    }
}

// ── GameState ─────────────────────────────────────────────────────────────────

#[test]
fn boss_engaged_covers_warning_and_fight() {
    let mut s = init_state(0);
    assert!(!s.boss_engaged());
    s.boss_incoming = true;
    assert!(s.boss_engaged());
}

#[test]
fn lifecycle_predicates() {
    let mut s = init_state(0);
    assert!(!s.is_playing());
    s.lifecycle = Lifecycle::Paused;
    assert!(s.is_paused());
    s.lifecycle = Lifecycle::Playing;
    assert!(s.is_playing());
}

#[test]
fn drain_events_empties_the_queue() {
    let mut s = start_game(&init_state(0));
    let events = s.drain_events();
    assert!(matches!(
        events.first(),
        Some(GameEvent::Spawned {
            kind: EntityKind::Player,
            ..
        })
    ));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { kind: EntityKind::Enemy, .. }))
            .count(),
        9
    );
    assert!(s.drain_events().is_empty());
}

#[test]
fn clone_is_independent() {
    let s = start_game(&init_state(0));
    let mut copy = s.clone();
    copy.score = 999;
    copy.enemies.clear();
    if let Some(p) = copy.player.as_mut() {
        p.x = 0.0;
    }
    assert_eq!(s.score, 0);
    assert_eq!(s.enemies.len(), 9);
    assert_eq!(s.player.as_ref().unwrap().x, 400.0);
}
