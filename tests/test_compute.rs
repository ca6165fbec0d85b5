use kamikaze_furry::compute::*;
use kamikaze_furry::constants::*;
use kamikaze_furry::entities::*;
use kamikaze_furry::scheduler::TimerKind;
use kamikaze_furry::spawn;
use kamikaze_furry::store::{HighScoreStore, MemoryStore};

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn playing() -> GameState {
    let mut s = start_game(&init_state(0));
    s.drain_events();
    s
}

fn idle_controls() -> Controls {
    Controls::default()
}

fn still_shot(x: f32, y: f32, owner: ProjectileOwner) -> Projectile {
    Projectile {
        x,
        y,
        vx: 0.0,
        vy: 0.0,
        owner,
    }
}

fn still_enemy(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        direction: 1.0,
        vertical_direction: 1.0,
        speed: 0.0,
        points: 15,
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_is_title_screen() {
    let s = init_state(250);
    assert_eq!(s.lifecycle, Lifecycle::Idle);
    assert_eq!(s.level, 1);
    assert_eq!(s.score, 0);
    assert_eq!(s.high_score, 250);
    assert!(s.player.is_none());
    assert!(s.enemies.is_empty());
    assert!(s.boss.is_none());
    assert!(s.scheduler.is_empty());
}

// ── start_game ────────────────────────────────────────────────────────────────

#[test]
fn start_game_places_ship_and_formation() {
    let s = start_game(&init_state(0));
    assert_eq!(s.lifecycle, Lifecycle::Playing);
    let player = s.player.as_ref().unwrap();
    assert_eq!((player.x, player.y), (PLAYER_START_X, PLAYER_START_Y));
    assert_abs_diff_eq!(player.facing, -std::f32::consts::FRAC_PI_2);
    assert_eq!(s.enemies.len(), 9);
    assert_eq!(s.scheduler.count_where(|k| *k == TimerKind::FormationStep), 1);
    assert_eq!(s.scheduler.count_where(|k| *k == TimerKind::SpiderSpawn), 1);
}

#[test]
fn start_game_ignored_once_playing() {
    let s = playing();
    let again = start_game(&s);
    assert_eq!(again.enemies.len(), 9);
    assert!(again.events.is_empty());
    assert_eq!(again.scheduler.count_where(|k| *k == TimerKind::FormationStep), 1);
}

#[test]
fn start_game_does_not_mutate_input() {
    let s = init_state(0);
    let _ = start_game(&s);
    assert_eq!(s.lifecycle, Lifecycle::Idle);
    assert!(s.player.is_none());
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_ignored_on_title_screen() {
    let s = init_state(0);
    let s2 = tick(&s, &idle_controls(), &mut seeded_rng());
    assert_eq!(s2.frame, 0);
    assert_eq!(s2.lifecycle, Lifecycle::Idle);
}

#[test]
fn tick_increments_frame() {
    let s = playing();
    let s2 = tick(&s, &idle_controls(), &mut seeded_rng());
    assert_eq!(s2.frame, s.frame + 1);
}

#[test]
fn tick_moves_the_formation() {
    let s = playing();
    let before = s.enemies.get(0).unwrap().x;
    let s2 = tick(&s, &idle_controls(), &mut seeded_rng());
    assert!(s2.enemies.get(0).unwrap().x > before);
}

#[test]
fn held_keys_move_the_ship() {
    let s = playing();
    let controls = Controls {
        right: true,
        up: true,
        ..Controls::default()
    };
    let s2 = tick(&s, &controls, &mut seeded_rng());
    let player = s2.player.as_ref().unwrap();
    assert_eq!(player.x, PLAYER_START_X + PLAYER_STEP);
    assert_eq!(player.y, PLAYER_START_Y - PLAYER_STEP);
}

#[test]
fn ship_is_clamped_to_its_box() {
    let mut s = playing();
    if let Some(p) = s.player.as_mut() {
        p.x = PLAYER_MIN_X + 1.0;
        p.y = PLAYER_MAX_Y - 1.0;
    }
    let controls = Controls {
        left: true,
        down: true,
        ..Controls::default()
    };
    let s2 = tick(&s, &controls, &mut seeded_rng());
    let player = s2.player.as_ref().unwrap();
    assert_eq!(player.x, PLAYER_MIN_X);
    assert_eq!(player.y, PLAYER_MAX_Y);
}

// ── player_shoot / aim_player ─────────────────────────────────────────────────

#[test]
fn shot_leaves_ahead_of_the_ship() {
    let s = player_shoot(&playing());
    assert_eq!(s.projectiles.len(), 1);
    let shot = s.projectiles.get(0).unwrap();
    assert_eq!(shot.owner, ProjectileOwner::Player);
    assert_abs_diff_eq!(shot.x, PLAYER_START_X, epsilon = 1e-3);
    assert_abs_diff_eq!(shot.y, PLAYER_START_Y - PLAYER_SHOT_OFFSET, epsilon = 1e-3);
    assert_abs_diff_eq!(shot.vx, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(shot.vy, -PLAYER_SHOT_SPEED, epsilon = 1e-3);
}

#[test]
fn shots_are_not_capped() {
    let mut s = playing();
    for _ in 0..20 {
        s = player_shoot(&s);
    }
    assert_eq!(s.projectiles.len(), 20);
}

#[test]
fn aim_faces_the_pointer() {
    let s = aim_player(&playing(), PLAYER_START_X + 100.0, PLAYER_START_Y);
    assert_abs_diff_eq!(s.player.as_ref().unwrap().facing, 0.0);

    let s = player_shoot(&s);
    let shot = s.projectiles.get(0).unwrap();
    assert_abs_diff_eq!(shot.vx, PLAYER_SHOT_SPEED, epsilon = 1e-3);
    assert_abs_diff_eq!(shot.x, PLAYER_START_X + PLAYER_SHOT_OFFSET, epsilon = 1e-3);
}

#[test]
fn shoot_ignored_while_paused() {
    let s = toggle_pause(&playing());
    let s2 = player_shoot(&s);
    assert!(s2.projectiles.is_empty());
}

#[test]
fn aim_ignored_on_title_screen() {
    let s = aim_player(&init_state(0), 0.0, 0.0);
    assert!(s.player.is_none());
}

// ── toggle_pause ──────────────────────────────────────────────────────────────

#[test]
fn pause_cancels_every_timer() {
    let s = toggle_pause(&playing());
    assert_eq!(s.lifecycle, Lifecycle::Paused);
    assert!(s.scheduler.is_empty());
    assert_eq!(s.events, vec![GameEvent::Paused]);
}

#[test]
fn paused_tick_changes_nothing() {
    let s = toggle_pause(&playing());
    let s2 = tick(&s, &Controls { left: true, ..Controls::default() }, &mut seeded_rng());
    assert_eq!(s2.frame, s.frame);
    assert_eq!(s2.player, s.player);
    assert_eq!(s2.enemies.get(0), s.enemies.get(0));
}

#[test]
fn resume_rearms_recurring_timers() {
    let s = toggle_pause(&toggle_pause(&playing()));
    assert_eq!(s.lifecycle, Lifecycle::Playing);
    assert_eq!(s.scheduler.count_where(|k| *k == TimerKind::FormationStep), 1);
    assert_eq!(s.scheduler.count_where(|k| *k == TimerKind::SpiderSpawn), 1);
    assert_eq!(s.scheduler.count_where(|k| *k == TimerKind::BossUpdate), 0);
    assert_eq!(s.events.last(), Some(&GameEvent::Resumed));
}

#[test]
fn resume_drops_pending_burst_shots() {
    let mut s = playing();
    s.enemies.clear();
    spawn::spawn_boss(&mut s);
    s.scheduler.once(TimerKind::BurstShot { angle: 1.0 }, 100);

    let s = toggle_pause(&toggle_pause(&s));
    assert_eq!(
        s.scheduler.count_where(|k| matches!(k, TimerKind::BurstShot { .. })),
        0
    );
    assert_eq!(s.scheduler.count_where(|k| *k == TimerKind::BossUpdate), 1);
    assert_eq!(s.scheduler.count_where(|k| *k == TimerKind::FormationStep), 0);
}

#[test]
fn resume_restarts_boss_warning() {
    let mut s = playing();
    s.enemies.clear();
    spawn::begin_boss_battle(&mut s);
    let s = toggle_pause(&toggle_pause(&s));
    assert!(s.boss_incoming);
    assert_eq!(s.scheduler.count_where(|k| *k == TimerKind::BossArrival), 1);
}

#[test]
fn pause_ignored_on_title_screen() {
    let s = toggle_pause(&init_state(0));
    assert_eq!(s.lifecycle, Lifecycle::Idle);
    assert!(s.events.is_empty());
}

// ── game over ─────────────────────────────────────────────────────────────────

#[test]
fn enemy_fire_ends_the_run() {
    let mut s = playing();
    s.projectiles
        .add(still_shot(PLAYER_START_X, PLAYER_START_Y, ProjectileOwner::Enemy));
    let s2 = tick(&s, &idle_controls(), &mut seeded_rng());
    assert_eq!(s2.lifecycle, Lifecycle::GameOver);
    assert!(s2.player.is_none());
    assert!(s2.scheduler.is_empty());
    assert!(s2.events.contains(&GameEvent::GameOver { score: 0, level: 1 }));
}

#[test]
fn ramming_an_enemy_ends_the_run() {
    let mut s = playing();
    s.enemies.add(still_enemy(PLAYER_START_X, PLAYER_START_Y));
    let s2 = tick(&s, &idle_controls(), &mut seeded_rng());
    assert_eq!(s2.lifecycle, Lifecycle::GameOver);
}

#[test]
fn game_over_is_terminal_until_restart() {
    let mut s = playing();
    s.projectiles
        .add(still_shot(PLAYER_START_X, PLAYER_START_Y, ProjectileOwner::Boss));
    let over = tick(&s, &idle_controls(), &mut seeded_rng());
    let after = tick(&over, &idle_controls(), &mut seeded_rng());
    assert_eq!(after.frame, over.frame);
    assert_eq!(start_game(&over).lifecycle, Lifecycle::GameOver);
    assert_eq!(toggle_pause(&over).lifecycle, Lifecycle::GameOver);
}

// ── boss battle flow ──────────────────────────────────────────────────────────

#[test]
fn wipeout_brings_the_boss_after_the_warning() {
    let mut s = playing();
    s.enemies.clear();
    s.enemies.add(still_enemy(100.0, 100.0));
    s.projectiles.add(still_shot(100.0, 100.0, ProjectileOwner::Player));
    let mut rng = seeded_rng();

    s = tick(&s, &idle_controls(), &mut rng);
    assert!(s.boss_incoming);
    assert!(s.boss.is_none());
    assert!(s.events.contains(&GameEvent::BossIncoming));
    assert_eq!(s.score, 15);

    let ticks_to_arrive = BOSS_WARNING_MS / TICK_MS;
    for _ in 1..ticks_to_arrive {
        s = tick(&s, &idle_controls(), &mut rng);
    }
    assert!(s.boss.is_none());

    s = tick(&s, &idle_controls(), &mut rng);
    assert!(s.boss.is_some());
    assert!(!s.boss_incoming);
    assert_eq!(s.scheduler.count_where(|k| *k == TimerKind::BossUpdate), 1);
}

#[test]
fn boss_defeat_advances_the_level() {
    let mut s = playing();
    s.enemies.clear();
    spawn::spawn_boss(&mut s);
    if let Some(boss) = s.boss.as_mut() {
        boss.health = 1;
    }
    s.projectiles
        .add(still_shot(BOSS_START_X, BOSS_START_Y, ProjectileOwner::Player));
    s.projectiles.add(still_shot(700.0, 300.0, ProjectileOwner::Boss));
    s.drain_events();

    let s2 = tick(&s, &idle_controls(), &mut seeded_rng());
    assert!(s2.boss.is_none());
    assert_eq!(s2.level, 2);
    assert_eq!(s2.score, 1000);
    assert_eq!(s2.enemies.len(), 11);
    assert!(s2.projectiles.is_empty());
    assert!(s2.events.contains(&GameEvent::BossDefeated { level: 1 }));
    assert!(s2.events.contains(&GameEvent::LevelChanged {
        level: 2,
        boss_level: false
    }));
    assert_eq!(s2.scheduler.count_where(|k| *k == TimerKind::BossUpdate), 0);
    assert_eq!(s2.scheduler.count_where(|k| *k == TimerKind::FormationStep), 1);
    assert_eq!(s2.lifecycle, Lifecycle::Playing);
}

// ── restart ───────────────────────────────────────────────────────────────────

#[test]
fn restart_saves_a_better_score() {
    let mut store = MemoryStore { high_score: 100 };
    let mut s = playing();
    s.score = 500;
    let s2 = restart(&s, &mut store);
    assert_eq!(store.high_score, 500);
    assert_eq!(s2.high_score, 500);
    assert_eq!(s2.lifecycle, Lifecycle::Idle);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.level, 1);
    assert!(s2.scheduler.is_empty());
}

#[test]
fn restart_keeps_a_better_stored_score() {
    let mut store = MemoryStore { high_score: 1000 };
    let mut s = playing();
    s.score = 500;
    let s2 = restart(&s, &mut store);
    assert_eq!(store.load().unwrap(), 1000);
    assert_eq!(s2.high_score, 1000);
}

#[test]
fn restart_twice_is_the_same_as_once() {
    let mut store = MemoryStore { high_score: 40 };
    let mut s = playing();
    s.score = 90;
    let once = restart(&s, &mut store);
    let twice = restart(&once, &mut store);
    assert_eq!(twice.lifecycle, Lifecycle::Idle);
    assert_eq!(twice.high_score, once.high_score);
    assert_eq!(store.high_score, 90);
}

// ── win_game ──────────────────────────────────────────────────────────────────

#[test]
fn win_stops_the_run() {
    let mut s = playing();
    s.score = 42;
    let s2 = win_game(&s);
    assert_eq!(s2.lifecycle, Lifecycle::Won);
    assert!(s2.scheduler.is_empty());
    assert!(s2.events.contains(&GameEvent::Victory { score: 42 }));
}

#[test]
fn win_ignored_on_title_screen() {
    let s = win_game(&init_state(0));
    assert_eq!(s.lifecycle, Lifecycle::Idle);
}
