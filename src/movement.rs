//! Per-tick movement for the player, projectiles, spiders and the formation.
//!
//! The boss moves in `boss`, on its own timer.

use rand::Rng;

use crate::constants::*;
use crate::difficulty;
use crate::entities::{
    Controls, Enemy, EntityKind, GameEvent, GameState, Projectile, ProjectileOwner, Spider,
};

/// Advance every moving entity by one tick. `formation_steps` is how many
/// times the formation timer fired since the previous tick.
pub fn update(
    state: &mut GameState,
    controls: &Controls,
    formation_steps: usize,
    rng: &mut impl Rng,
) {
    move_player(state, controls);
    move_projectiles(state);
    for _ in 0..formation_steps {
        step_formation(state.enemies.as_mut_slice());
    }
    move_spiders(state, rng);
}

/// `true` while a point is inside the viewport plus the off-screen margin.
pub fn in_play_area(x: f32, y: f32) -> bool {
    (-OFFSCREEN_MARGIN..=WORLD_WIDTH + OFFSCREEN_MARGIN).contains(&x)
        && (-OFFSCREEN_MARGIN..=WORLD_HEIGHT + OFFSCREEN_MARGIN).contains(&y)
}

// ── Player ────────────────────────────────────────────────────────────────────

fn move_player(state: &mut GameState, controls: &Controls) {
    let Some(player) = state.player.as_mut() else {
        return;
    };
    let mut dx = 0.0;
    let mut dy = 0.0;
    if controls.left {
        dx -= PLAYER_STEP;
    }
    if controls.right {
        dx += PLAYER_STEP;
    }
    if controls.up {
        dy -= PLAYER_STEP;
    }
    if controls.down {
        dy += PLAYER_STEP;
    }
    player.x = (player.x + dx).clamp(PLAYER_MIN_X, PLAYER_MAX_X);
    player.y = (player.y + dy).clamp(PLAYER_MIN_Y, PLAYER_MAX_Y);
}

// ── Projectiles ───────────────────────────────────────────────────────────────

fn move_projectiles(state: &mut GameState) {
    let gone = state.projectiles.sweep(|shot| {
        shot.x += shot.vx;
        shot.y += shot.vy;
        in_play_area(shot.x, shot.y)
    });
    for shot in gone {
        state.emit(GameEvent::Destroyed {
            kind: EntityKind::Projectile(shot.owner),
            x: shot.x,
            y: shot.y,
        });
    }
}

/// A projectile leaving `(x, y)` along `angle`.
pub fn projectile_at(x: f32, y: f32, angle: f32, speed: f32, owner: ProjectileOwner) -> Projectile {
    Projectile {
        x,
        y,
        vx: angle.cos() * speed,
        vy: angle.sin() * speed,
        owner,
    }
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// One formation step.
///
/// Every segment sweeps sideways, turning around and stepping vertically at
/// the edges; every segment after the first then closes in on the segment
/// ahead of it once the gap exceeds `FOLLOW_DISTANCE`. Segments ahead have
/// already moved when a follower looks at them, which gives the chain its lag.
pub fn step_formation(enemies: &mut [Enemy]) {
    for i in 0..enemies.len() {
        let (ahead, rest) = enemies.split_at_mut(i);
        let enemy = &mut rest[0];

        enemy.x += enemy.speed * enemy.direction;
        if enemy.x > FORMATION_MAX_X || enemy.x < FORMATION_MIN_X {
            enemy.direction = -enemy.direction;
            enemy.y += FORMATION_DROP * enemy.vertical_direction;
            if enemy.y > FORMATION_MAX_Y || enemy.y < FORMATION_MIN_Y {
                enemy.vertical_direction = -enemy.vertical_direction;
            }
        }

        if let Some(leader) = ahead.last() {
            let dx = leader.x - enemy.x;
            let dy = leader.y - enemy.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > FOLLOW_DISTANCE {
                enemy.x += dx / distance * enemy.speed;
                enemy.y += dy / distance * enemy.speed;
            }
        }
    }
}

// ── Spiders ───────────────────────────────────────────────────────────────────

/// Point `spider` at `target`, off by a random angle that widens with level.
pub fn aim_spider(spider: &mut Spider, target: (f32, f32), level: u32, rng: &mut impl Rng) {
    let angle = (target.1 - spider.y).atan2(target.0 - spider.x);
    let jitter = (rng.gen::<f32>() - 0.5) * difficulty::spider_aim_jitter(level);
    let heading = angle + jitter;
    spider.dx = heading.cos();
    spider.dy = heading.sin();
}

fn move_spiders(state: &mut GameState, rng: &mut impl Rng) {
    let target = state.player.as_ref().map(|p| (p.x, p.y));
    let level = state.level;
    let reaim_after = difficulty::spider_reaim_interval(level);
    let mut shots = Vec::new();

    let gone = state.spiders.sweep(|spider| {
        spider.move_timer += 1;
        if spider.move_timer > reaim_after {
            if let Some(target) = target {
                aim_spider(spider, target, level, &mut *rng);
            }
            spider.move_timer = 0;
        }

        spider.x += spider.dx * spider.speed;
        spider.y += spider.dy * spider.speed;

        if let Some(clock) = spider.shooter.as_mut() {
            clock.timer += 1;
            if clock.timer >= clock.delay {
                clock.timer = 0;
                if let Some((tx, ty)) = target {
                    let angle = (ty - spider.y).atan2(tx - spider.x);
                    shots.push(projectile_at(
                        spider.x,
                        spider.y,
                        angle,
                        SPIDER_SHOT_SPEED,
                        ProjectileOwner::Enemy,
                    ));
                }
            }
        }

        in_play_area(spider.x, spider.y)
    });

    for spider in gone {
        state.emit(GameEvent::Destroyed {
            kind: EntityKind::Spider,
            x: spider.x,
            y: spider.y,
        });
    }
    for shot in shots {
        state.emit(GameEvent::Spawned {
            kind: EntityKind::Projectile(shot.owner),
            x: shot.x,
            y: shot.y,
        });
        state.projectiles.add(shot);
    }
}
