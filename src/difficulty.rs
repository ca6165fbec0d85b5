//! Difficulty tables.
//!
//! Every level-scaled number in the game lives here as a pure function of
//! the current level (1-based), so the scaling rules can be read and tested
//! in one place.

// ── Formation ─────────────────────────────────────────────────────────────────

/// Members in the formation built for `level`: `8 + floor(1.5 * level)`.
pub fn formation_size(level: u32) -> usize {
    8 + (level as usize * 3) / 2
}

pub fn enemy_speed(level: u32) -> f32 {
    3.0 + level as f32 * 0.4
}

pub fn enemy_points(level: u32) -> u32 {
    10 + level * 5
}

/// Milliseconds between formation steps; gets faster with level.
pub fn formation_step_ms(level: u32) -> u32 {
    16u32.saturating_sub(level).max(8)
}

// ── Spiders ───────────────────────────────────────────────────────────────────

/// Maximum simultaneous spiders: `2 + floor(level / 3)`.
pub fn spider_cap(level: u32) -> usize {
    2 + (level / 3) as usize
}

pub fn spider_speed(level: u32) -> f32 {
    4.0 + level as f32 * 0.5
}

pub fn spider_points(level: u32) -> u32 {
    100 + level * 20
}

/// Spiders only start shooting after level 2.
pub fn spider_shoot_delay(level: u32) -> Option<u32> {
    if level > 2 {
        Some(120u32.saturating_sub(level * 10).max(30))
    } else {
        None
    }
}

/// Ticks between spider re-aims, never below 10.
pub fn spider_reaim_interval(level: u32) -> u32 {
    30u32.saturating_sub(level).max(10)
}

/// Width (radians) of the random window added to a spider's aim.
pub fn spider_aim_jitter(level: u32) -> f32 {
    0.5 + level as f32 * 0.1
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// `8 + floor(0.8 * level)`.
pub fn boss_health(level: u32) -> u32 {
    8 + (level * 4) / 5
}

pub fn boss_speed(level: u32) -> f32 {
    4.0 + level as f32 * 0.3
}

/// Boss updates between volleys.
pub fn boss_shoot_delay(level: u32) -> u32 {
    60u32.saturating_sub(level * 5).max(20)
}

pub fn boss_shot_speed(level: u32) -> f32 {
    6.0 + level as f32 * 0.3
}

pub fn spread_shot_count(level: u32) -> u32 {
    5 + level / 2
}

pub fn ring_shot_count(level: u32) -> u32 {
    8 + level / 2
}

pub fn boss_reward(level: u32) -> u32 {
    1000 * level
}

/// Cosmetic label only: boss encounters happen after every wipeout.
pub fn is_boss_level(level: u32) -> bool {
    level % 5 == 0
}
