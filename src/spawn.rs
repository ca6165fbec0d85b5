//! Creation of the formation, spiders and the boss, and the timers that
//! drive them.

use rand::Rng;

use crate::boss;
use crate::constants::*;
use crate::difficulty;
use crate::entities::{Enemy, EntityKind, GameEvent, GameState, ShotClock, Spider};
use crate::movement::aim_spider;
use crate::scheduler::TimerKind;

/// Dispatch this tick's spawn timers.
pub fn update(state: &mut GameState, fired: &[TimerKind], rng: &mut impl Rng) {
    for kind in fired {
        match kind {
            TimerKind::SpiderSpawn => {
                spawn_spider(state, rng);
            }
            TimerKind::BossArrival => spawn_boss(state),
            _ => {}
        }
    }
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// The formation for `level`, laid out on a grid, leader first.
pub fn formation(level: u32) -> Vec<Enemy> {
    (0..difficulty::formation_size(level))
        .map(|i| Enemy {
            x: FORMATION_ORIGIN_X + (i % FORMATION_COLUMNS) as f32 * FORMATION_SPACING,
            y: FORMATION_ORIGIN_Y + (i / FORMATION_COLUMNS) as f32 * FORMATION_SPACING,
            direction: 1.0,
            vertical_direction: 1.0,
            speed: difficulty::enemy_speed(level),
            points: difficulty::enemy_points(level),
        })
        .collect()
}

/// Replace whatever is left of the formation with a fresh one for the
/// current level, and restart the step timer at the level's rate.
pub fn build_formation(state: &mut GameState) {
    for enemy in state.enemies.clear() {
        state.emit(GameEvent::Destroyed {
            kind: EntityKind::Enemy,
            x: enemy.x,
            y: enemy.y,
        });
    }
    for enemy in formation(state.level) {
        state.emit(GameEvent::Spawned {
            kind: EntityKind::Enemy,
            x: enemy.x,
            y: enemy.y,
        });
        state.enemies.add(enemy);
    }
    arm_formation_timer(state);
    log::debug!(
        "formation of {} built for level {}",
        state.enemies.len(),
        state.level
    );
}

pub fn arm_formation_timer(state: &mut GameState) {
    state
        .scheduler
        .cancel_where(|k| *k == TimerKind::FormationStep);
    state.scheduler.every(
        TimerKind::FormationStep,
        difficulty::formation_step_ms(state.level),
    );
}

// ── Spiders ───────────────────────────────────────────────────────────────────

pub fn arm_spider_timer(state: &mut GameState) {
    state.scheduler.cancel_where(|k| *k == TimerKind::SpiderSpawn);
    state
        .scheduler
        .every(TimerKind::SpiderSpawn, SPIDER_SPAWN_MS);
}

/// Spawn a spider at a random edge, aimed at the player.
///
/// Returns `false` without doing anything when the game is not being played
/// or the level's spider cap is already reached.
pub fn spawn_spider(state: &mut GameState, rng: &mut impl Rng) -> bool {
    if !state.is_playing() || state.spiders.len() >= difficulty::spider_cap(state.level) {
        return false;
    }
    let Some(target) = state.player.as_ref().map(|p| (p.x, p.y)) else {
        return false;
    };

    let level = state.level;
    let x = if rng.gen_bool(0.5) {
        SPIDER_SPAWN_LEFT_X
    } else {
        SPIDER_SPAWN_RIGHT_X
    };
    let y = rng.gen_range(SPIDER_SPAWN_MIN_Y..=SPIDER_SPAWN_MAX_Y);
    let mut spider = Spider {
        x,
        y,
        dx: 0.0,
        dy: 0.0,
        speed: difficulty::spider_speed(level),
        points: difficulty::spider_points(level),
        move_timer: 0,
        shooter: difficulty::spider_shoot_delay(level).map(|delay| ShotClock { timer: 0, delay }),
    };
    aim_spider(&mut spider, target, level, rng);

    state.emit(GameEvent::Spawned {
        kind: EntityKind::Spider,
        x,
        y,
    });
    state.spiders.add(spider);
    log::debug!(
        "spider spawned at ({x}, {y:.0}); {} alive",
        state.spiders.len()
    );
    true
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// Announce the boss and start the warning countdown.
pub fn begin_boss_battle(state: &mut GameState) {
    state.boss_incoming = true;
    state.emit(GameEvent::BossIncoming);
    arm_boss_arrival(state);
    log::info!("formation cleared; boss incoming on level {}", state.level);
}

pub fn arm_boss_arrival(state: &mut GameState) {
    state.scheduler.cancel_where(|k| *k == TimerKind::BossArrival);
    state
        .scheduler
        .once(TimerKind::BossArrival, BOSS_WARNING_MS);
}

pub fn arm_boss_updates(state: &mut GameState) {
    state.scheduler.cancel_where(|k| *k == TimerKind::BossUpdate);
    state.scheduler.every(TimerKind::BossUpdate, BOSS_UPDATE_MS);
}

/// Bring in the boss unless one is already on screen.
pub fn spawn_boss(state: &mut GameState) {
    if !state.is_playing() || state.boss.is_some() {
        return;
    }
    let boss = boss::new_boss(state.level);
    state.emit(GameEvent::Spawned {
        kind: EntityKind::Boss,
        x: boss.x,
        y: boss.y,
    });
    log::info!(
        "boss arrives with {} health on level {}",
        boss.health,
        state.level
    );
    state.boss = Some(boss);
    state.boss_incoming = false;
    arm_boss_updates(state);
}
