//! Board geometry: square <-> world position mapping
//!
//! The board is centred on the world origin with rank 1 at the bottom.
//! Z layers keep overlays above pieces and pieces above squares.

use crate::game::types::Square;
use bevy::prelude::*;

pub const Z_SQUARE: f32 = 0.0;
pub const Z_HIGHLIGHT: f32 = 0.5;
pub const Z_PIECE: f32 = 1.0;
pub const Z_HINT: f32 = 2.0;
pub const Z_CHOOSER: f32 = 3.0;
pub const Z_BANNER: f32 = 4.0;

const LIGHT_SQUARE: Color = Color::srgb(0.93, 0.93, 0.82);
const DARK_SQUARE: Color = Color::srgb(0.46, 0.59, 0.34);

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct BoardLayout {
    pub tile_size: f32,
}

impl BoardLayout {
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    /// World-space centre of `square`
    pub fn square_center(&self, square: Square) -> Vec2 {
        Vec2::new(
            (square.file.index() as f32 - 3.5) * self.tile_size,
            (square.rank.index() as f32 - 3.5) * self.tile_size,
        )
    }

    pub fn square_translation(&self, square: Square, z: f32) -> Vec3 {
        self.square_center(square).extend(z)
    }

    /// Square under a world-space point, `None` off the board
    pub fn square_at(&self, world: Vec2) -> Option<Square> {
        let file = (world.x / self.tile_size + 4.0).floor();
        let rank = (world.y / self.tile_size + 4.0).floor();
        if !(0.0..8.0).contains(&file) || !(0.0..8.0).contains(&rank) {
            return None;
        }
        Square::new(file as u8, rank as u8)
    }
}

#[derive(Component)]
pub struct BoardSquare(pub Square);

pub fn spawn_board_squares(mut commands: Commands, layout: Res<BoardLayout>) {
    for square in Square::all() {
        let color = if (square.file.index() + square.rank.index()) % 2 == 0 {
            DARK_SQUARE
        } else {
            LIGHT_SQUARE
        };
        commands.spawn((
            Sprite::from_color(color, Vec2::splat(layout.tile_size)),
            Transform::from_translation(layout.square_translation(square, Z_SQUARE)),
            BoardSquare(square),
            Name::new(format!("Square {}", square)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centre_maps_back_to_square() {
        let layout = BoardLayout::new(80.0);
        for square in Square::all() {
            assert_eq!(layout.square_at(layout.square_center(square)), Some(square));
        }
    }

    #[test]
    fn test_corners() {
        let layout = BoardLayout::new(80.0);
        assert_eq!(
            layout.square_at(Vec2::new(-319.0, -319.0)),
            Some("a1".parse().unwrap())
        );
        assert_eq!(
            layout.square_at(Vec2::new(319.0, 319.0)),
            Some("h8".parse().unwrap())
        );
        assert_eq!(layout.square_at(Vec2::new(321.0, 0.0)), None);
        assert_eq!(layout.square_at(Vec2::new(0.0, -400.0)), None);
    }
}
