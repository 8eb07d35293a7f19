//! Post-render collision and pickup resolution
//!
//! Both run once per frame after the update and render passes, so they see
//! the positions the player just watched being drawn.

use super::board::Cell;
use super::level::RowKind;
use super::player::AnimationKind;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// How the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Hazard,
    Drowned,
}

/// Resolve the goal row, enemy rows and water for a playable player
pub fn resolve_collisions(state: &mut GameState) {
    if !state.player.is_playable() {
        return;
    }

    if state.player.grid.row == PLAYER_WIN_ROW {
        complete_level(state);
        return;
    }

    let hitbox = state.player.hitbox();
    let mut ride = None;
    for (index, row) in state.enemies.iter().enumerate() {
        if !row.has_overlap(&hitbox) {
            continue;
        }
        match row.kind {
            RowKind::Platform => ride = Some(index),
            RowKind::Hazard => {
                kill_player(state, DeathCause::Hazard);
                return;
            }
        }
    }

    if ride != state.player.riding {
        log::debug!("Riding changed: {:?} -> {:?}", state.player.riding, ride);
    }
    state.player.riding = ride;

    let in_water = state
        .level()
        .terrain(state.player.grid.row)
        .is_some_and(|t| t.is_water());
    if in_water && ride.is_none() {
        kill_player(state, DeathCause::Drowned);
    }
}

/// Award the win bonus (boosted if the star is claimed) and start the victory hop
fn complete_level(state: &mut GameState) {
    let player = &mut state.player;
    let star_claimed = state.star.claim_at(player.grid.col);
    let award = if star_claimed { STAR_SCORE } else { WIN_SCORE };
    state.score.add_score(award, player.pos);
    player.riding = None;
    player.play(AnimationKind::End);

    log::info!(
        "Level {} complete (+{}{})",
        state.level_index + 1,
        award,
        if star_claimed { ", star" } else { "" }
    );
    if star_claimed {
        state.push_event(GameEvent::StarClaimed);
    }
    state.push_event(GameEvent::LevelCompleted { award });
}

fn kill_player(state: &mut GameState, cause: DeathCause) {
    let at = state.player.grid;
    state.player.riding = None;
    state.player.play(AnimationKind::Death);
    let last_life = state.lives.lose_life();

    let remaining = state.lives.count();
    log::info!("Player {:?} at {:?}, {} lives left", cause, at, remaining);
    state.push_event(match cause {
        DeathCause::Hazard => GameEvent::PlayerDied { at },
        DeathCause::Drowned => GameEvent::PlayerDrowned { at },
    });
    state.push_event(GameEvent::LifeLost { remaining });
    if last_life {
        log::info!("Last life lost, game restarts after the death animation");
        state.push_event(GameEvent::OutOfLives);
    }
}

/// Collect whatever sits on the player's cell, then try the key
pub fn resolve_pickups(state: &mut GameState) {
    if !state.player.is_playable() {
        return;
    }
    let at = state.player.grid;

    if let Cell::Pickup(kind) = state.board.get(at) {
        state.board.take(at);
        match kind.score() {
            Some(points) => state.score.add_score(points, state.player.pos),
            None => state.lives.gain_life(),
        }
        log::debug!("Collected {:?} at {:?}", kind, at);
        state.push_event(GameEvent::PickupCollected { kind, at });
    }

    if state.lock.try_unlock(at, &mut state.board) {
        log::debug!("Key collected, goal row unlocked");
        state.push_event(GameEvent::KeyCollected);
    }
}
