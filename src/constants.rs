//! World geometry, entity sizes and timer periods.
//!
//! All positions are in world units on a fixed 800×600 viewport; the
//! presentation layer scales them onto whatever surface it draws to.

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;

/// Entities further than this outside the viewport are discarded.
pub const OFFSCREEN_MARGIN: f32 = 50.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_MIN_X: f32 = 30.0;
pub const PLAYER_MAX_X: f32 = 770.0;
pub const PLAYER_MIN_Y: f32 = 100.0;
pub const PLAYER_MAX_Y: f32 = 500.0;

pub const PLAYER_START_X: f32 = 400.0;
pub const PLAYER_START_Y: f32 = 400.0;

/// Distance moved per tick for each held direction.
pub const PLAYER_STEP: f32 = 5.0;

pub const PLAYER_SHOT_SPEED: f32 = 10.0;
/// Shots appear this far ahead of the ship along its facing.
pub const PLAYER_SHOT_OFFSET: f32 = 30.0;

// ── Formation ─────────────────────────────────────────────────────────────────

pub const FORMATION_COLUMNS: usize = 4;
pub const FORMATION_SPACING: f32 = 40.0;
pub const FORMATION_ORIGIN_X: f32 = 50.0;
pub const FORMATION_ORIGIN_Y: f32 = 50.0;

pub const FORMATION_MIN_X: f32 = 20.0;
pub const FORMATION_MAX_X: f32 = 780.0;
pub const FORMATION_MIN_Y: f32 = 50.0;
pub const FORMATION_MAX_Y: f32 = 500.0;
pub const FORMATION_DROP: f32 = 20.0;

/// Followers only close in once they trail their predecessor by more than this.
pub const FOLLOW_DISTANCE: f32 = 40.0;

// ── Spiders ───────────────────────────────────────────────────────────────────

pub const SPIDER_SPAWN_LEFT_X: f32 = -20.0;
pub const SPIDER_SPAWN_RIGHT_X: f32 = 820.0;
pub const SPIDER_SPAWN_MIN_Y: f32 = 100.0;
pub const SPIDER_SPAWN_MAX_Y: f32 = 400.0;
pub const SPIDER_SHOT_SPEED: f32 = 6.0;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_START_X: f32 = 400.0;
pub const BOSS_START_Y: f32 = 100.0;
pub const BOSS_MIN_X: f32 = 100.0;
pub const BOSS_MAX_X: f32 = 700.0;

/// Updates spent in one attack pattern before cycling to the next.
pub const BOSS_PATTERN_DURATION: u32 = 300;
/// Side-to-side pattern reverses after this many updates.
pub const BOSS_SWEEP_DURATION: u32 = 120;

pub const BOSS_ORBIT_CENTER_X: f32 = 400.0;
pub const BOSS_ORBIT_CENTER_Y: f32 = 150.0;
pub const BOSS_ORBIT_RADIUS: f32 = 100.0;

pub const BOSS_CHASE_MIN_Y: f32 = 100.0;
pub const BOSS_CHASE_MAX_Y: f32 = 200.0;

/// Angle between neighbouring projectiles of a spread shot.
pub const BOSS_SPREAD_STEP: f32 = std::f32::consts::FRAC_PI_4;
pub const BOSS_BURST_SHOTS: u32 = 3;

// ── Hit boxes (width, height), centred on the entity position ───────────────

pub const PLAYER_SIZE: (f32, f32) = (48.0, 48.0);
pub const ENEMY_SIZE: (f32, f32) = (38.0, 38.0);
pub const SPIDER_SIZE: (f32, f32) = (38.0, 38.0);
pub const BOSS_SIZE: (f32, f32) = (96.0, 96.0);
pub const PLAYER_SHOT_SIZE: (f32, f32) = (4.0, 12.0);
pub const ENEMY_SHOT_SIZE: (f32, f32) = (6.0, 6.0);
pub const BOSS_SHOT_SIZE: (f32, f32) = (8.0, 8.0);

// ── Timers (milliseconds) ─────────────────────────────────────────────────────

/// Simulated time covered by one call to `tick`.
pub const TICK_MS: u32 = 16;
pub const SPIDER_SPAWN_MS: u32 = 5000;
pub const BOSS_UPDATE_MS: u32 = 16;
pub const BOSS_WARNING_MS: u32 = 2000;
pub const BURST_STAGGER_MS: u32 = 100;

/// Level at which the run counts as complete.
pub const FINAL_LEVEL: u32 = 99;
