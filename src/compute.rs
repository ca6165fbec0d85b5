//! Pure game-logic entry points.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle or the high-score store)
//! and returns a brand-new `GameState`. The lifecycle lives here:
//!
//! ```text
//! Idle ──start──▶ Playing ◀──toggle──▶ Paused
//!                    │
//!                    ├──fatal hit──▶ GameOver
//!                    └──win_game───▶ Won
//! any ──restart──▶ Idle
//! ```

use rand::Rng;

use crate::boss;
use crate::collision;
use crate::constants::*;
use crate::entities::{
    Controls, EntityKind, GameEvent, GameState, Lifecycle, Player, ProjectileOwner,
};
use crate::movement::{self, projectile_at};
use crate::progress;
use crate::registry::Registry;
use crate::scheduler::{Scheduler, TimerKind};
use crate::spawn;
use crate::store::HighScoreStore;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh title-screen session.
pub fn init_state(high_score: u32) -> GameState {
    GameState {
        player: None,
        enemies: Registry::new(),
        spiders: Registry::new(),
        projectiles: Registry::new(),
        boss: None,
        boss_incoming: false,
        score: 0,
        high_score,
        level: 1,
        lifecycle: Lifecycle::Idle,
        frame: 0,
        scheduler: Scheduler::new(),
        events: Vec::new(),
    }
}

// ── Lifecycle transitions ───────────────────────────────────────────────────

/// Leave the title screen: place the ship, build the first formation and
/// start the spider cadence. Ignored outside of `Idle`.
pub fn start_game(state: &GameState) -> GameState {
    if state.lifecycle != Lifecycle::Idle {
        return state.clone();
    }
    let mut s = state.clone();
    s.lifecycle = Lifecycle::Playing;

    let player = Player {
        x: PLAYER_START_X,
        y: PLAYER_START_Y,
        facing: -std::f32::consts::FRAC_PI_2,
    };
    s.emit(GameEvent::Spawned {
        kind: EntityKind::Player,
        x: player.x,
        y: player.y,
    });
    s.player = Some(player);

    spawn::build_formation(&mut s);
    spawn::arm_spider_timer(&mut s);
    log::info!("game started (high score {})", s.high_score);
    s
}

/// Suspend or resume play.
///
/// Pausing cancels every pending timer outright. Resuming re-arms the
/// recurring ones from scratch; deferred burst shots are not brought back.
pub fn toggle_pause(state: &GameState) -> GameState {
    let mut s = state.clone();
    match s.lifecycle {
        Lifecycle::Playing => {
            s.lifecycle = Lifecycle::Paused;
            s.scheduler.cancel_all();
            s.emit(GameEvent::Paused);
            log::info!("paused");
        }
        Lifecycle::Paused => {
            s.lifecycle = Lifecycle::Playing;
            rearm_timers(&mut s);
            s.emit(GameEvent::Resumed);
            log::info!("resumed");
        }
        _ => {}
    }
    s
}

fn rearm_timers(state: &mut GameState) {
    if !state.enemies.is_empty() {
        spawn::arm_formation_timer(state);
    }
    spawn::arm_spider_timer(state);
    if state.boss.is_some() {
        spawn::arm_boss_updates(state);
    }
    if state.boss_incoming {
        spawn::arm_boss_arrival(state);
    }
}

/// Tear the session down and go back to the title screen.
///
/// The score is written to `store` first if it beats the stored best.
/// Store failures are logged and otherwise ignored. Calling this on an
/// `Idle` session yields an equivalent `Idle` session.
pub fn restart(state: &GameState, store: &mut impl HighScoreStore) -> GameState {
    let stored = store.load().unwrap_or_else(|e| {
        log::warn!("could not read high score: {e}");
        state.high_score
    });
    if state.score > stored {
        match store.save(state.score) {
            Ok(()) => log::info!("new high score {}", state.score),
            Err(e) => log::warn!("could not save high score: {e}"),
        }
    }
    let high_score = store.load().unwrap_or_else(|e| {
        log::warn!("could not read high score: {e}");
        stored.max(state.score)
    });
    init_state(high_score)
}

/// Finish the run as a win.
///
/// Nothing in the level progression calls this: levels keep counting past
/// `FINAL_LEVEL`. It exists so a front-end or a future rule can end the run.
pub fn win_game(state: &GameState) -> GameState {
    if !matches!(state.lifecycle, Lifecycle::Playing | Lifecycle::Paused) {
        return state.clone();
    }
    let mut s = state.clone();
    s.lifecycle = Lifecycle::Won;
    s.scheduler.cancel_all();
    s.emit(GameEvent::Victory { score: s.score });
    log::info!("run won on level {} with score {}", s.level, s.score);
    s
}

/// Fatal hit: stop every timer and remove the ship.
fn end_game(state: &mut GameState) {
    state.lifecycle = Lifecycle::GameOver;
    state.scheduler.cancel_all();
    if let Some(player) = state.player.take() {
        state.emit(GameEvent::Destroyed {
            kind: EntityKind::Player,
            x: player.x,
            y: player.y,
        });
    }
    state.emit(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
    log::info!("game over on level {} with score {}", state.level, state.score);
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Turn the ship to face the pointer at `(x, y)`.
pub fn aim_player(state: &GameState, x: f32, y: f32) -> GameState {
    let mut s = state.clone();
    if !s.is_playing() {
        return s;
    }
    if let Some(player) = s.player.as_mut() {
        player.facing = (y - player.y).atan2(x - player.x);
    }
    s
}

/// Fire a shot from just ahead of the ship along its facing.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut s = state.clone();
    if !s.is_playing() {
        return s;
    }
    let Some(player) = s.player.as_ref() else {
        return s;
    };
    let shot = projectile_at(
        player.x + player.facing.cos() * PLAYER_SHOT_OFFSET,
        player.y + player.facing.sin() * PLAYER_SHOT_OFFSET,
        player.facing,
        PLAYER_SHOT_SPEED,
        ProjectileOwner::Player,
    );
    s.emit(GameEvent::Spawned {
        kind: EntityKind::Projectile(ProjectileOwner::Player),
        x: shot.x,
        y: shot.y,
    });
    s.projectiles.add(shot);
    s
}

// ── Per-frame tick (nearly pure: RNG is injected) ──────────────────────────

/// Advance the simulation by one `TICK_MS` step. All randomness comes
/// through `rng` so callers control determinism. Does nothing unless the
/// game is being played.
pub fn tick(state: &GameState, controls: &Controls, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    if !s.is_playing() {
        return s;
    }
    s.frame += 1;

    let fired = s.scheduler.advance(TICK_MS);
    let formation_steps = fired
        .iter()
        .filter(|k| **k == TimerKind::FormationStep)
        .count();

    // ── 1. Movement ──────────────────────────────────────────────────────────
    movement::update(&mut s, controls, formation_steps, rng);

    // ── 2. Collisions ────────────────────────────────────────────────────────
    let outcome = collision::resolve(&mut s);
    if outcome.game_over {
        end_game(&mut s);
        return s;
    }

    // ── 3. Spawning ──────────────────────────────────────────────────────────
    if outcome.boss_battle_start {
        spawn::begin_boss_battle(&mut s);
    }
    spawn::update(&mut s, &fired, rng);

    // ── 4. Boss ──────────────────────────────────────────────────────────────
    boss::update(&mut s, &fired);

    // ── 5. Level progression ─────────────────────────────────────────────────
    if outcome.boss_defeated {
        progress::complete_level(&mut s);
    }

    s
}
