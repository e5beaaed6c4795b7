use std::fmt;

/// Discrete grid cell expressed in tile coordinates.
///
/// `+x` points right and `+y` points down, matching screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the tile one step away in `direction`.
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours in [`Direction::ALL`] order.
    pub fn neighbors(self) -> [Tile; 4] {
        Direction::ALL.map(|direction| self.offset(direction))
    }

    /// Center of the tile in continuous coordinates.
    pub fn center(self) -> Position {
        Position::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Continuous actor coordinate in tile units.
///
/// The actor slides between tiles while walking, so its position is
/// fractional most of the time. Integer values sit on tile centers.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Tile the position currently lies in.
    pub fn tile(self) -> Tile {
        Tile::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// Euclidean distance to the center of `tile`.
    pub fn distance_to(self, tile: Tile) -> f32 {
        self.distance_squared_to(tile).sqrt()
    }

    pub fn distance_squared_to(self, tile: Tile) -> f32 {
        let dx = tile.x as f32 - self.x;
        let dy = tile.y as f32 - self.y;
        dx * dx + dy * dy
    }

    /// Moves `step` tiles along `direction`.
    pub fn advanced(self, direction: Direction, step: f32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx as f32 * step, self.y + dy as f32 * step)
    }
}

impl From<Tile> for Position {
    fn from(tile: Tile) -> Self {
        tile.center()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Cardinal facing / walking direction.
///
/// Discriminants follow the facing index the animation table is keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Facing index used to pick direction-specific animations.
    pub const fn index(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_orthogonal() {
        let tile = Tile::new(3, -2);
        let neighbors = tile.neighbors();

        assert_eq!(
            neighbors,
            [
                Tile::new(4, -2),
                Tile::new(2, -2),
                Tile::new(3, -1),
                Tile::new(3, -3)
            ]
        );
    }

    #[test]
    fn position_rounds_to_nearest_tile() {
        assert_eq!(Position::new(1.49, 2.51).tile(), Tile::new(1, 3));
        assert_eq!(Position::new(-0.6, 0.4).tile(), Tile::new(-1, 0));
    }

    #[test]
    fn distance_is_euclidean() {
        let origin = Position::new(0.0, 0.0);
        assert_eq!(origin.distance_to(Tile::new(3, 4)), 5.0);
    }

    #[test]
    fn facing_index_matches_animation_table() {
        assert_eq!(Direction::Up.index(), 0);
        assert_eq!(Direction::Right.index(), 1);
        assert_eq!(Direction::Down.index(), 2);
        assert_eq!(Direction::Left.index(), 3);
    }
}
