//! Overlap tests and their consequences.
//!
//! Hit boxes are axis-aligned rectangles centred on each entity. Every
//! removal happens as soon as the hit is found, so anything checked later in
//! the same pass only ever sees live entities.

use crate::boss;
use crate::constants::*;
use crate::difficulty;
use crate::entities::{
    Boss, Enemy, EntityKind, GameEvent, GameState, Player, Projectile, ProjectileOwner, Spider,
};
use crate::progress;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn centered(x: f32, y: f32, (width, height): (f32, f32)) -> Self {
        Self {
            left: x - width / 2.0,
            top: y - height / 2.0,
            right: x + width / 2.0,
            bottom: y + height / 2.0,
        }
    }

    /// Touching edges count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// Anything with a hit box.
pub trait Body {
    fn position(&self) -> (f32, f32);
    fn size(&self) -> (f32, f32);

    fn bounds(&self) -> Rect {
        let (x, y) = self.position();
        Rect::centered(x, y, self.size())
    }
}

impl Body for Player {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
    fn size(&self) -> (f32, f32) {
        PLAYER_SIZE
    }
}

impl Body for Enemy {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
    fn size(&self) -> (f32, f32) {
        ENEMY_SIZE
    }
}

impl Body for Spider {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
    fn size(&self) -> (f32, f32) {
        SPIDER_SIZE
    }
}

impl Body for Boss {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
    fn size(&self) -> (f32, f32) {
        BOSS_SIZE
    }
}

impl Body for Projectile {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
    fn size(&self) -> (f32, f32) {
        match self.owner {
            ProjectileOwner::Player => PLAYER_SHOT_SIZE,
            ProjectileOwner::Enemy => ENEMY_SHOT_SIZE,
            ProjectileOwner::Boss => BOSS_SHOT_SIZE,
        }
    }
}

/// What the collision pass decided, for the systems that run after it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// The player was hit; nothing else should run this tick.
    pub game_over: bool,
    /// The last formation segment fell with no boss around.
    pub boss_battle_start: bool,
    /// The boss lost its last point of health and has been removed.
    pub boss_defeated: bool,
}

/// Run one collision pass. Does nothing unless the game is being played.
pub fn resolve(state: &mut GameState) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    if !state.is_playing() {
        return outcome;
    }

    let mut index = 0;
    while let Some(shot) = state.projectiles.get(index) {
        let owner = shot.owner;
        let shot_box = shot.bounds();
        let spent = match owner {
            ProjectileOwner::Enemy | ProjectileOwner::Boss => hostile_shot(state, &shot_box),
            ProjectileOwner::Player => player_shot(state, &shot_box, &mut outcome),
        };
        if spent {
            if let Some(shot) = state.projectiles.remove(index) {
                state.emit(GameEvent::Destroyed {
                    kind: EntityKind::Projectile(shot.owner),
                    x: shot.x,
                    y: shot.y,
                });
            }
            if owner != ProjectileOwner::Player {
                outcome.game_over = true;
                return outcome;
            }
        } else {
            index += 1;
        }
    }

    if body_contact(state) {
        outcome.game_over = true;
    }
    outcome
}

/// Enemy and boss fire only ever threatens the player.
fn hostile_shot(state: &GameState, shot: &Rect) -> bool {
    state
        .player
        .as_ref()
        .is_some_and(|player| shot.overlaps(&player.bounds()))
}

/// Resolve at most one hit for a player shot, boss first, then the
/// formation, then spiders. Returns `true` if the shot was used up.
fn player_shot(state: &mut GameState, shot: &Rect, outcome: &mut CollisionOutcome) -> bool {
    if state.boss.as_ref().is_some_and(|b| shot.overlaps(&b.bounds())) {
        strike_boss(state, outcome);
        return true;
    }

    if let Some(index) = state.enemies.find(|e| shot.overlaps(&e.bounds())) {
        if let Some(enemy) = state.enemies.remove(index) {
            state.emit(GameEvent::Destroyed {
                kind: EntityKind::Enemy,
                x: enemy.x,
                y: enemy.y,
            });
            progress::award_score(state, enemy.points);
        }
        if state.enemies.is_empty() && !state.boss_engaged() {
            state.boss_incoming = true;
            outcome.boss_battle_start = true;
        }
        return true;
    }

    if let Some(index) = state.spiders.find(|s| shot.overlaps(&s.bounds())) {
        if let Some(spider) = state.spiders.remove(index) {
            state.emit(GameEvent::Destroyed {
                kind: EntityKind::Spider,
                x: spider.x,
                y: spider.y,
            });
            progress::award_score(state, spider.points);
        }
        return true;
    }

    false
}

fn strike_boss(state: &mut GameState, outcome: &mut CollisionOutcome) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    boss.health = boss.health.saturating_sub(1);
    let (health, max_health) = (boss.health, boss.max_health);
    state.emit(GameEvent::BossHit { health, max_health });

    if health == 0 {
        boss::retire(state);
        let level = state.level;
        state.emit(GameEvent::BossDefeated { level });
        progress::award_score(state, difficulty::boss_reward(level));
        outcome.boss_defeated = true;
    }
}

/// The ship touching any hostile body is fatal.
fn body_contact(state: &GameState) -> bool {
    let Some(player) = state.player.as_ref() else {
        return false;
    };
    let ship = player.bounds();
    state.enemies.iter().any(|e| ship.overlaps(&e.bounds()))
        || state.spiders.iter().any(|s| ship.overlaps(&s.bounds()))
        || state.boss.as_ref().is_some_and(|b| ship.overlaps(&b.bounds()))
}
