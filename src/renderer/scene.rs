//! Scene pass: turns a `GameState` into canvas calls
//!
//! Pure reads only. Draw order is terrain, then for each row top to bottom
//! its enemy band, static objects and the player, then the locked-goal
//! overlay, the star and finally the HUD.

use glam::Vec2;

use super::assets::SpriteId;
use super::canvas::{Canvas, TextStyle};
use crate::consts::*;
use crate::sim::{Cell, EnemyRow, GameState, Player};
use crate::{GridPos, grid_to_pixel};

/// Render the whole frame
pub fn render<C: Canvas>(state: &GameState, canvas: &mut C) {
    draw_terrain(state, canvas);

    for row in 0..GRID_ROWS {
        if let Some(enemies) = state.enemy_row_at(row) {
            draw_enemy_row(enemies, canvas);
        }
        for col in 0..GRID_COLS {
            let pos = GridPos::new(col, row);
            if let Some(sprite) = cell_sprite(state.board.get(pos)) {
                canvas.draw_image(sprite, grid_to_pixel(pos));
            }
            if state.player.is_at(col, row) {
                draw_player(&state.player, canvas);
            }
        }
    }

    // Covers everything but the star so the goal row reads as closed
    if state.lock.is_locked() {
        for col in 0..GRID_COLS {
            canvas.draw_image(
                SpriteId::FlagLocked,
                grid_to_pixel(GridPos::new(col, PLAYER_WIN_ROW)),
            );
        }
    }

    if state.star.available {
        canvas.save();
        canvas.set_alpha(state.star.alpha);
        canvas.draw_image(SpriteId::Star, grid_to_pixel(state.star.pos));
        canvas.restore();
    }

    draw_hud(state, canvas);
}

fn draw_terrain<C: Canvas>(state: &GameState, canvas: &mut C) {
    let level = state.level();
    for (row, terrain) in level.rows.iter().enumerate() {
        for col in 0..GRID_COLS {
            canvas.draw_image(terrain.sprite(), grid_to_pixel(GridPos::new(col, row as i32)));
        }
    }
}

fn cell_sprite(cell: Cell) -> Option<SpriteId> {
    match cell {
        Cell::Empty => None,
        Cell::Rock => Some(SpriteId::Rock),
        Cell::Pickup(kind) => Some(kind.sprite()),
        Cell::Key => Some(SpriteId::Key),
    }
}

fn draw_enemy_row<C: Canvas>(row: &EnemyRow, canvas: &mut C) {
    let y = row.row as f32 * CELL_H;
    let mirrored = row.dir.sign() < 0.0;
    for (primary, wrapped) in row.sprite_positions() {
        draw_enemy(row.sprite, Vec2::new(primary, y), mirrored, canvas);
        // Tail of a sprite that has crossed the right edge
        if wrapped + CELL_W >= 0.0 {
            draw_enemy(row.sprite, Vec2::new(wrapped, y), mirrored, canvas);
        }
    }
}

fn draw_enemy<C: Canvas>(sprite: SpriteId, pos: Vec2, mirrored: bool, canvas: &mut C) {
    canvas.save();
    canvas.translate(pos + Vec2::new(SPRITE_HALF_WIDTH, 0.0));
    if mirrored {
        canvas.scale(Vec2::new(-1.0, 1.0));
    }
    canvas.draw_image(sprite, Vec2::new(-SPRITE_HALF_WIDTH, 0.0));
    canvas.restore();
}

fn draw_player<C: Canvas>(player: &Player, canvas: &mut C) {
    let pivot = Vec2::new(SPRITE_HALF_WIDTH, PLAYER_Y_CENTRE);
    canvas.save();
    canvas.translate(player.pos + pivot);
    if player.angle != 0.0 {
        canvas.rotate(player.angle.to_radians());
    }
    canvas.draw_image(SpriteId::Player, -pivot);
    canvas.restore();
}

fn draw_hud<C: Canvas>(state: &GameState, canvas: &mut C) {
    let (x, y) = SCORE_TEXT_POS;
    canvas.fill_text(
        &format!("Score {}", state.score.displayed()),
        Vec2::new(x, y),
        &TextStyle::HUD,
    );
    let (x, y) = LIVES_TEXT_POS;
    canvas.fill_text(
        &format!("Lives {}", state.lives.count()),
        Vec2::new(x, y),
        &TextStyle::HUD,
    );

    for indicator in &state.score.indicators {
        canvas.save();
        canvas.set_alpha(indicator.alpha);
        canvas.fill_text(
            &format!("+{}", indicator.value),
            indicator.pos + Vec2::new(SPRITE_HALF_WIDTH, PLAYER_Y_OFFSET),
            &TextStyle::INDICATOR,
        );
        canvas.restore();
    }

    if state.status.is_visible() {
        let (x, y) = STATUS_TEXT_POS;
        canvas.save();
        canvas.set_alpha(state.status.alpha());
        canvas.fill_text(state.status.text(), Vec2::new(x, y), &TextStyle::BANNER);
        canvas.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::sim::builtin_levels;

    fn drawn(state: &GameState) -> DrawList {
        let mut list = DrawList::new();
        render(state, &mut list);
        list
    }

    fn state() -> GameState {
        GameState::new(5, builtin_levels().unwrap(), START_LIVES).unwrap()
    }

    #[test]
    fn test_terrain_comes_first() {
        let state = state();
        let list = drawn(&state);
        let images: Vec<_> = list.images().collect();
        let tiles = (GRID_COLS * GRID_ROWS) as usize;
        assert_eq!(images[0], (SpriteId::Grass, Vec2::ZERO));
        assert_eq!(images[GRID_COLS as usize].0, SpriteId::Water);
        assert_eq!(images[tiles - 1].0, SpriteId::Flag);
    }

    #[test]
    fn test_hud_text() {
        let state = state();
        let list = drawn(&state);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts, vec!["Score 0", "Lives 5", "LEVEL 1"]);
    }

    #[test]
    fn test_locked_overlay_covers_goal_row() {
        let mut state = state();
        let locked = drawn(&state)
            .images()
            .filter(|(s, _)| *s == SpriteId::FlagLocked)
            .count();
        assert_eq!(locked, GRID_COLS as usize);

        state.lock.locked = false;
        assert!(!drawn(&state).images().any(|(s, _)| s == SpriteId::FlagLocked));
    }

    #[test]
    fn test_left_rows_are_mirrored() {
        let mut state = state();
        state.enemies.retain(|e| e.row == 4);
        let list = drawn(&state);
        assert!(list.commands().contains(&DrawCommand::Scale(Vec2::new(-1.0, 1.0))));

        state.enemies.clear();
        let list = drawn(&state);
        assert!(!list.commands().iter().any(|c| matches!(c, DrawCommand::Scale(_))));
    }

    #[test]
    fn test_wrapped_sprite_drawn_twice() {
        let mut state = state();
        state.enemies.retain(|e| e.row == 2);
        // Bug at column 0 pushed past the right edge
        state.enemies[0].offset = 450.0;
        let bugs = drawn(&state).images().filter(|(s, _)| *s == SpriteId::Bug).count();
        assert_eq!(bugs, 2);

        state.enemies[0].offset = 0.0;
        let bugs = drawn(&state).images().filter(|(s, _)| *s == SpriteId::Bug).count();
        assert_eq!(bugs, 1);
    }

    #[test]
    fn test_player_drawn_above_its_row() {
        let state = state();
        let list = drawn(&state);
        let images: Vec<_> = list.images().map(|(s, _)| s).collect();
        let player = images.iter().position(|s| *s == SpriteId::Player).unwrap();
        // Row 1 lily pads are drawn after the player on row 0
        let first_pad = images.iter().position(|s| *s == SpriteId::Lilypad).unwrap();
        assert!(player < first_pad);
    }

    #[test]
    fn test_star_fades_with_alpha() {
        let mut state = state();
        state.star.alpha = 0.25;
        let list = drawn(&state);
        let cmds = list.commands();
        let star = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::Image { sprite: SpriteId::Star, .. }))
            .unwrap();
        assert_eq!(cmds[star - 1], DrawCommand::Alpha(0.25));

        state.star.available = false;
        assert!(!drawn(&state).images().any(|(s, _)| s == SpriteId::Star));
    }
}
