//! The dimensions of the variant being played

/// The details which differ between supported variants of the game
///
/// Only the board dimensions vary; the piece set and movement rules are the same on every board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
}

impl GameConfig {
    /// The traditional 8x8 board
    pub const STANDARD: Self = Self {
        width: 8,
        height: 8,
    };

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// The number of squares on the board
    pub const fn squares(self) -> usize {
        self.width * self.height
    }

    /// How many moves the uniform random strategy enumerates before truncating
    pub const fn random_move_capacity(self) -> usize {
        self.squares() * 10
    }

    /// How many moves the colour-preference strategy enumerates before truncating
    pub const fn scored_move_capacity(self) -> usize {
        self.squares() * 32
    }

    /// The FEN at which to start a game, if this variant has a known starting position
    pub fn initial_fen(self) -> Option<&'static str> {
        (self == Self::STANDARD).then_some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w")
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}
