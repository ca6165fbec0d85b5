//! All game entity types. Pure data, no logic.

use crate::registry::Registry;
use crate::scheduler::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Title screen; the tick loop does not run.
    Idle,
    Playing,
    /// Tick loop suspended and every timer cancelled.
    Paused,
    GameOver,
    Won,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    /// Fired by a spider.
    Enemy,
    Boss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub owner: ProjectileOwner,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Direction the ship points and fires in, radians (0 = right, −π/2 = up).
    pub facing: f32,
}

/// Direction keys currently held by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// One segment of the formation. The segment it follows is simply the one
/// stored before it in `GameState::enemies`.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// +1 moving right, −1 moving left.
    pub direction: f32,
    /// +1 stepping down at each edge, −1 stepping up.
    pub vertical_direction: f32,
    pub speed: f32,
    pub points: u32,
}

// ── Spiders ───────────────────────────────────────────────────────────────────

/// Countdown for entities that fire on their own cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotClock {
    pub timer: u32,
    pub delay: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spider {
    pub x: f32,
    pub y: f32,
    /// Unit heading.
    pub dx: f32,
    pub dy: f32,
    pub speed: f32,
    pub points: u32,
    /// Ticks since the last re-aim.
    pub move_timer: u32,
    /// Present only for spiders spawned after level 2.
    pub shooter: Option<ShotClock>,
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// The boss's current behaviour. The same value selects both how it moves
/// and which volley it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackPattern {
    SideToSide,
    Circle,
    ChasePlayer,
}

impl AttackPattern {
    pub const ALL: [AttackPattern; 3] = [
        AttackPattern::SideToSide,
        AttackPattern::Circle,
        AttackPattern::ChasePlayer,
    ];

    pub fn id(self) -> usize {
        match self {
            AttackPattern::SideToSide => 0,
            AttackPattern::Circle => 1,
            AttackPattern::ChasePlayer => 2,
        }
    }

    /// The pattern that follows this one, wrapping back to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.id() + 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    pub pattern: AttackPattern,
    /// Updates spent in the current pattern.
    pub pattern_timer: u32,
    /// Updates since the side-to-side sweep last turned around.
    pub move_timer: u32,
    pub move_direction: f32,
    /// Updates since the last volley.
    pub shoot_timer: u32,
}

// ── Events ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
    Spider,
    Boss,
    Projectile(ProjectileOwner),
}

/// Things that happened during a state transition, for the presentation
/// layer to turn into sprites, banners and popups.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Spawned { kind: EntityKind, x: f32, y: f32 },
    Destroyed { kind: EntityKind, x: f32, y: f32 },
    ScoreChanged { score: u32 },
    /// Floating "+N" near the player.
    ScorePopup { amount: u32, x: f32, y: f32 },
    BossIncoming,
    BossHit { health: u32, max_health: u32 },
    BossDefeated { level: u32 },
    LevelChanged { level: u32, boss_level: bool },
    GameOver { score: u32, level: u32 },
    Victory { score: u32 },
    Paused,
    Resumed,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session. Cloneable so the pure entry points in `compute`
/// can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    /// `None` outside of play, and after the ship is destroyed.
    pub player: Option<Player>,
    /// Formation segments, leader first.
    pub enemies: Registry<Enemy>,
    pub spiders: Registry<Spider>,
    pub projectiles: Registry<Projectile>,
    pub boss: Option<Boss>,
    /// Set between the formation wipeout and the boss arriving.
    pub boss_incoming: bool,
    pub score: u32,
    /// Best score from the persistent store, read when entering Idle.
    pub high_score: u32,
    pub level: u32,
    pub lifecycle: Lifecycle,
    pub frame: u64,
    pub scheduler: Scheduler,
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn is_playing(&self) -> bool {
        self.lifecycle == Lifecycle::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.lifecycle == Lifecycle::Paused
    }

    /// A boss is either on screen or on its way.
    pub fn boss_engaged(&self) -> bool {
        self.boss.is_some() || self.boss_incoming
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand every pending event to the caller.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
