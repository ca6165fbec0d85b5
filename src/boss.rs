//! Boss behaviour: a cyclic pattern machine.
//!
//! The boss spends `BOSS_PATTERN_DURATION` updates in each `AttackPattern`,
//! then moves on to the next one, wrapping around. Each pattern names one
//! movement rule and one volley, paired in `BEHAVIOURS`. The volley cadence
//! has its own counter, so a volley can land just after a pattern change and
//! use the new pattern's attack.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::constants::*;
use crate::difficulty;
use crate::entities::{AttackPattern, Boss, EntityKind, GameEvent, GameState, ProjectileOwner};
use crate::movement::projectile_at;
use crate::scheduler::TimerKind;

/// Projectiles a pattern wants released, by angle.
#[derive(Clone, Debug, PartialEq)]
pub enum Volley {
    /// All at once from the boss's current position.
    Fan(Vec<f32>),
    /// `BOSS_BURST_SHOTS` shots along one angle, `BURST_STAGGER_MS` apart.
    Burst { angle: f32 },
    Hold,
}

pub type MoveFn = fn(&mut Boss, Option<(f32, f32)>);
pub type AttackFn = fn(&Boss, Option<(f32, f32)>, u32) -> Volley;

pub struct PatternBehaviour {
    pub movement: MoveFn,
    pub attack: AttackFn,
}

/// Indexed by `AttackPattern::id`.
static BEHAVIOURS: [PatternBehaviour; 3] = [
    PatternBehaviour {
        movement: sweep,
        attack: spread_shot,
    },
    PatternBehaviour {
        movement: orbit,
        attack: ring_shot,
    },
    PatternBehaviour {
        movement: chase,
        attack: targeted_burst,
    },
];

pub fn behaviour(pattern: AttackPattern) -> &'static PatternBehaviour {
    &BEHAVIOURS[pattern.id()]
}

pub fn new_boss(level: u32) -> Boss {
    let health = difficulty::boss_health(level);
    Boss {
        x: BOSS_START_X,
        y: BOSS_START_Y,
        health,
        max_health: health,
        speed: difficulty::boss_speed(level),
        pattern: AttackPattern::SideToSide,
        pattern_timer: 0,
        move_timer: 0,
        move_direction: 1.0,
        shoot_timer: 0,
    }
}

/// Dispatch this tick's boss timers. Firings that arrive after the boss is
/// gone are ignored.
pub fn update(state: &mut GameState, fired: &[TimerKind]) {
    for kind in fired {
        match kind {
            TimerKind::BossUpdate => step(state),
            TimerKind::BurstShot { angle } => fire_burst_shot(state, *angle),
            _ => {}
        }
    }
}

/// Remove the boss along with every timer that acts on its behalf.
pub fn retire(state: &mut GameState) -> Option<Boss> {
    let boss = state.boss.take()?;
    cancel_timers(state);
    state.emit(GameEvent::Destroyed {
        kind: EntityKind::Boss,
        x: boss.x,
        y: boss.y,
    });
    log::info!("boss defeated on level {}", state.level);
    Some(boss)
}

pub fn cancel_timers(state: &mut GameState) {
    state
        .scheduler
        .cancel_where(|k| matches!(k, TimerKind::BossUpdate | TimerKind::BurstShot { .. }));
}

/// One boss update: pattern clock, movement, clamp, then maybe a volley.
pub fn step(state: &mut GameState) {
    let target = state.player.as_ref().map(|p| (p.x, p.y));
    let level = state.level;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    boss.pattern_timer += 1;
    if boss.pattern_timer >= BOSS_PATTERN_DURATION {
        boss.pattern_timer = 0;
        boss.pattern = boss.pattern.next();
        log::debug!("boss switches to {:?}", boss.pattern);
    }

    let behaviour = behaviour(boss.pattern);
    (behaviour.movement)(boss, target);
    boss.x = boss.x.clamp(BOSS_MIN_X, BOSS_MAX_X);

    boss.shoot_timer += 1;
    let volley = if boss.shoot_timer > difficulty::boss_shoot_delay(level) {
        boss.shoot_timer = 0;
        (behaviour.attack)(boss, target, level)
    } else {
        Volley::Hold
    };
    release(state, volley);
}

fn release(state: &mut GameState, volley: Volley) {
    match volley {
        Volley::Fan(angles) => {
            for angle in angles {
                fire(state, angle);
            }
        }
        Volley::Burst { angle } => {
            fire(state, angle);
            for i in 1..BOSS_BURST_SHOTS {
                state
                    .scheduler
                    .once(TimerKind::BurstShot { angle }, i * BURST_STAGGER_MS);
            }
        }
        Volley::Hold => {}
    }
}

fn fire_burst_shot(state: &mut GameState, angle: f32) {
    if state.boss.is_some() {
        fire(state, angle);
    }
}

/// Spawn one boss projectile at the boss's current position.
fn fire(state: &mut GameState, angle: f32) {
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    let shot = projectile_at(
        boss.x,
        boss.y,
        angle,
        difficulty::boss_shot_speed(state.level),
        ProjectileOwner::Boss,
    );
    state.emit(GameEvent::Spawned {
        kind: EntityKind::Projectile(ProjectileOwner::Boss),
        x: shot.x,
        y: shot.y,
    });
    state.projectiles.add(shot);
}

fn bearing(boss: &Boss, target: (f32, f32)) -> f32 {
    (target.1 - boss.y).atan2(target.0 - boss.x)
}

// ── Movement rules ────────────────────────────────────────────────────────────

fn sweep(boss: &mut Boss, _target: Option<(f32, f32)>) {
    boss.move_timer += 1;
    if boss.move_timer > BOSS_SWEEP_DURATION {
        boss.move_direction = -boss.move_direction;
        boss.move_timer = 0;
    }
    boss.x += boss.speed * boss.move_direction;
}

fn orbit(boss: &mut Boss, _target: Option<(f32, f32)>) {
    let angle = boss.pattern_timer as f32 * boss.speed / 100.0;
    boss.x = BOSS_ORBIT_CENTER_X + angle.cos() * BOSS_ORBIT_RADIUS;
    boss.y = BOSS_ORBIT_CENTER_Y + angle.sin() * BOSS_ORBIT_RADIUS;
}

fn chase(boss: &mut Boss, target: Option<(f32, f32)>) {
    let Some(target) = target else {
        return;
    };
    let angle = bearing(boss, target);
    let step = boss.speed * 0.5;
    boss.x += angle.cos() * step;
    boss.y = (boss.y + angle.sin() * step).clamp(BOSS_CHASE_MIN_Y, BOSS_CHASE_MAX_Y);
}

// ── Attacks ───────────────────────────────────────────────────────────────────

/// Fan centred on the player; straight down if there is nobody to aim at.
fn spread_shot(boss: &Boss, target: Option<(f32, f32)>, level: u32) -> Volley {
    let count = difficulty::spread_shot_count(level);
    let base = target.map_or(FRAC_PI_2, |t| bearing(boss, t));
    let middle = (count as f32 - 1.0) / 2.0;
    Volley::Fan(
        (0..count)
            .map(|i| base + BOSS_SPREAD_STEP * (i as f32 - middle))
            .collect(),
    )
}

fn ring_shot(_boss: &Boss, _target: Option<(f32, f32)>, level: u32) -> Volley {
    let count = difficulty::ring_shot_count(level);
    Volley::Fan(
        (0..count)
            .map(|i| i as f32 / count as f32 * TAU)
            .collect(),
    )
}

fn targeted_burst(boss: &Boss, target: Option<(f32, f32)>, _level: u32) -> Volley {
    match target {
        Some(t) => Volley::Burst {
            angle: bearing(boss, t),
        },
        None => Volley::Hold,
    }
}
