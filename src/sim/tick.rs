//! Frame orchestration
//!
//! Every frame runs, strictly in order: input, update, render, collision
//! resolution, pickup resolution. Rendering therefore shows the state a
//! death or win is decided on, one frame before its consequences.

use super::board::{Board, Lock};
use super::collision::{resolve_collisions, resolve_pickups};
use super::enemy::build_rows;
use super::hud::{Lives, Score};
use super::player::{AnimationKind, Move};
use super::star::Star;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::renderer::{Canvas, render_scene};

/// One-shot inputs for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional step
    pub step: Option<Move>,
    /// Jump straight to the next level (debug)
    pub advance_level: bool,
}

/// Run one full frame
pub fn frame<C: Canvas>(state: &mut GameState, input: &TickInput, dt: f32, canvas: &mut C) {
    update(state, input, dt);
    render_scene(state, canvas);
    resolve_collisions(state);
    resolve_pickups(state);
}

/// Update pass: input, HUD timers, enemy rows, star, player
pub fn update(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);
    state.frame += 1;

    if input.advance_level {
        log::info!("Skipping to the next level");
        reset_level(state, true);
    }
    if let Some(mv) = input.step {
        let locked = state.lock.is_locked();
        state.player.handle_input(mv, locked);
    }

    state.score.update(dt);
    state.status.update(dt);
    for row in &mut state.enemies {
        row.update(dt);
    }
    state.star.update(dt);

    if let Some(finished) = state.player.update(dt, &state.board, &state.enemies) {
        on_animation_finished(state, finished);
    }
}

fn on_animation_finished(state: &mut GameState, kind: AnimationKind) {
    match kind {
        AnimationKind::Start => log::debug!("Player ready at {:?}", state.player.grid),
        AnimationKind::Death => {
            if state.lives.has_lives() {
                let start = state.level().start;
                state.player.reset(start);
            } else {
                reset_level(state, false);
            }
        }
        AnimationKind::End => reset_level(state, true),
    }
}

/// Rebuild every per-level entity. Restarts the whole game first if the
/// player is out of lives.
pub fn reset_level(state: &mut GameState, advancing: bool) {
    if !state.lives.has_lives() {
        log::info!("Out of lives, restarting");
        state.level_index = 0;
        state.lives = Lives::new(state.start_lives);
        state.score = Score::new();
        state.push_event(GameEvent::GameRestarted);
    }

    if advancing {
        state.level_index = (state.level_index + 1) % state.levels.len();
    }
    if advancing || state.level_index == 0 {
        state
            .status
            .set_text(format!("LEVEL {}", state.level_index + 1), LEVEL_TEXT_TIME);
    }

    let level = &state.levels[state.level_index];
    state.board = Board::from_level(level);
    state.lock = Lock::from_level(level);
    state.enemies = build_rows(&level.enemies);
    state.star = Star::new(state.level_index, &state.board, &mut state.rng);
    state.player.reset(level.start);

    log::info!(
        "Level {} started ({} enemy rows, {})",
        state.level_index + 1,
        state.enemies.len(),
        if state.lock.is_locked() { "locked" } else { "open" }
    );
    let level = state.level_index;
    state.push_event(GameEvent::LevelStarted { level });
}
