use kamikaze_furry::scheduler::{Scheduler, TimerKind};

#[test]
fn one_shot_fires_once_after_delay() {
    let mut s = Scheduler::new();
    s.once(TimerKind::BossArrival, 40);
    assert!(s.advance(16).is_empty());
    assert!(s.advance(16).is_empty());
    assert_eq!(s.advance(16), vec![TimerKind::BossArrival]);
    assert!(s.is_empty());
    assert!(s.advance(1000).is_empty());
}

#[test]
fn repeating_timer_first_fires_one_period_out() {
    let mut s = Scheduler::new();
    s.every(TimerKind::SpiderSpawn, 32);
    assert!(s.advance(16).is_empty());
    assert_eq!(s.advance(16), vec![TimerKind::SpiderSpawn]);
    assert!(s.advance(16).is_empty());
    assert_eq!(s.advance(16), vec![TimerKind::SpiderSpawn]);
}

#[test]
fn repeating_timer_catches_up() {
    let mut s = Scheduler::new();
    s.every(TimerKind::FormationStep, 8);
    assert_eq!(s.advance(16).len(), 2);
    assert_eq!(s.advance(20).len(), 2);
    assert_eq!(s.advance(4).len(), 1);
}

#[test]
fn zero_period_acts_as_one_millisecond() {
    let mut s = Scheduler::new();
    s.every(TimerKind::BossUpdate, 0);
    assert_eq!(s.advance(5).len(), 5);
}

#[test]
fn firings_come_back_in_timer_order() {
    let mut s = Scheduler::new();
    s.once(TimerKind::BurstShot { angle: 0.5 }, 10);
    s.every(TimerKind::BossUpdate, 16);
    assert_eq!(
        s.advance(16),
        vec![TimerKind::BurstShot { angle: 0.5 }, TimerKind::BossUpdate]
    );
}

#[test]
fn cancel_by_id() {
    let mut s = Scheduler::new();
    let id = s.once(TimerKind::BossArrival, 10);
    assert!(s.is_pending(id));
    assert!(s.cancel(id));
    assert!(!s.is_pending(id));
    assert!(!s.cancel(id));
    assert!(s.advance(100).is_empty());
}

#[test]
fn cancel_where_matches_kind() {
    let mut s = Scheduler::new();
    s.once(TimerKind::BurstShot { angle: 1.0 }, 100);
    s.once(TimerKind::BurstShot { angle: 1.0 }, 200);
    s.every(TimerKind::SpiderSpawn, 5000);
    let dropped = s.cancel_where(|k| matches!(k, TimerKind::BurstShot { .. }));
    assert_eq!(dropped, 2);
    assert_eq!(s.count_where(|k| *k == TimerKind::SpiderSpawn), 1);
}

#[test]
fn cancel_all_empties() {
    let mut s = Scheduler::new();
    s.every(TimerKind::SpiderSpawn, 5000);
    s.once(TimerKind::BossArrival, 2000);
    s.cancel_all();
    assert!(s.is_empty());
}
