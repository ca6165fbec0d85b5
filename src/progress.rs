//! Score and level progression.

use crate::difficulty;
use crate::entities::{EntityKind, GameEvent, GameState};
use crate::spawn;

/// Add `points` to the score and raise a popup next to the player.
pub fn award_score(state: &mut GameState, points: u32) {
    state.score = state.score.saturating_add(points);
    state.emit(GameEvent::ScoreChanged { score: state.score });
    if let Some((x, y)) = state.player.as_ref().map(|p| (p.x, p.y - 20.0)) {
        state.emit(GameEvent::ScorePopup {
            amount: points,
            x,
            y,
        });
    }
}

/// Move to the next level once the boss is down: sweep the remaining
/// projectiles off the field, bump the level and lay out a new formation.
pub fn complete_level(state: &mut GameState) {
    for shot in state.projectiles.clear() {
        state.emit(GameEvent::Destroyed {
            kind: EntityKind::Projectile(shot.owner),
            x: shot.x,
            y: shot.y,
        });
    }

    state.level += 1;
    let level = state.level;
    state.emit(GameEvent::LevelChanged {
        level,
        boss_level: difficulty::is_boss_level(level),
    });
    log::info!("advanced to level {level} with score {}", state.score);

    spawn::build_formation(state);
}
