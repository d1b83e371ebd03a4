use std::collections::TryReserveError;

use crate::{Color, GameConfig, Move, Piece, PieceKind};

/// Copying a board failed because the allocator couldn't provide room for the squares
#[derive(Debug, thiserror::Error)]
#[error("failed to allocate a copy of a board with {squares} squares")]
pub struct DuplicateError {
    squares: usize,
    #[source]
    source: TryReserveError,
}

/// A rectangular board storing one optional piece per square
///
/// Squares are stored row-major starting from the top rank, so index 0 is the square at file 0
/// of rank `height - 1`. Ranks count upwards from white's side of the board:
/// ```text
/// index = (height - 1 - rank) * width + file
/// ```
/// Every rule uses this same conversion through [`Board::index_of`] and [`Board::file_rank`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// A board of the given size with no pieces on it
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "boards must have at least one square");
        Self {
            width,
            height,
            squares: vec![None; width * height],
        }
    }

    /// An empty board sized for the given variant
    pub fn from_config(config: GameConfig) -> Self {
        Self::new(config.width, config.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// The dimensions of this board as a variant description
    pub const fn config(&self) -> GameConfig {
        GameConfig::new(self.width, self.height)
    }

    /// The number of squares on the board
    pub fn square_count(&self) -> usize {
        self.squares.len()
    }

    /// The piece on the given square
    ///
    /// Returns `None` for an empty square, and also for an index past the end of the board.
    pub fn get(&self, index: usize) -> Option<Piece> {
        self.squares.get(index).copied().flatten()
    }

    /// Put a piece on (or, with `None`, clear) the given square
    ///
    /// # Panics
    /// If the index is not on the board.
    pub fn set(&mut self, index: usize, piece: Option<Piece>) {
        self.squares[index] = piece;
    }

    /// Whether the index names a square of this board
    pub fn contains(&self, index: usize) -> bool {
        index < self.squares.len()
    }

    /// Convert the `(file, rank)` pair into a square index
    pub const fn index_of(&self, file: usize, rank: usize) -> usize {
        debug_assert!(file < self.width && rank < self.height);
        (self.height - 1 - rank) * self.width + file
    }

    /// Like [`Board::index_of`], but returns `None` for coordinates off the board
    pub fn checked_index_of(&self, file: isize, rank: isize) -> Option<usize> {
        let file = usize::try_from(file).ok()?;
        let rank = usize::try_from(rank).ok()?;
        (file < self.width && rank < self.height).then(|| self.index_of(file, rank))
    }

    /// Convert a square index into its `(file, rank)` pair
    ///
    /// # Panics
    ///
    /// The index must be on the board; see [`Board::contains`].
    pub const fn file_rank(&self, index: usize) -> (usize, usize) {
        (index % self.width, self.height - 1 - index / self.width)
    }

    /// Whether the square is a light one
    ///
    /// The colouring is a checkerboard anchored at index 0 (the top-left square), which is light.
    /// On the standard board this gives the usual colours, with a1 dark and h1 light.
    pub const fn is_light(&self, index: usize) -> bool {
        (index % self.width + index / self.width) % 2 == 0
    }

    /// The rank on which a pawn of the given colour promotes
    pub const fn last_rank(&self, color: Color) -> usize {
        match color {
            Color::White => self.height - 1,
            Color::Black => 0,
        }
    }

    /// The rank from which a pawn of the given colour may advance two squares
    pub const fn pawn_start_rank(&self, color: Color) -> usize {
        match color {
            Color::White => 1,
            Color::Black => self.height.saturating_sub(2),
        }
    }

    /// An iterator over every occupied square and the piece on it, in index order
    pub fn pieces(&self) -> impl Iterator<Item = (usize, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, square)| square.map(|piece| (index, piece)))
    }

    /// An iterator over the squares holding pieces of the given colour, in index order
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (usize, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// The square of the first king of the given colour, if there is one
    pub fn king_square(&self, color: Color) -> Option<usize> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(index, _)| index)
    }

    /// Make a deep copy of this board
    ///
    /// Unlike [`Clone`], this reports allocation failure instead of aborting, so callers that
    /// copy boards for simulation can hand the failure back up.
    pub fn duplicate(&self) -> Result<Self, DuplicateError> {
        let mut squares = Vec::new();
        squares
            .try_reserve_exact(self.squares.len())
            .map_err(|source| DuplicateError {
                squares: self.squares.len(),
                source,
            })?;
        squares.extend_from_slice(&self.squares);
        Ok(Self {
            width: self.width,
            height: self.height,
            squares,
        })
    }

    /// Make the given move, in place, without checking that it's legal
    ///
    /// * The moving piece replaces whatever was on the target square and the source is emptied.
    /// * A pawn landing on its last rank becomes the requested promotion, or a queen if none (or
    ///   a kind pawns can't promote into) was given.
    /// * A king moving two files along its rank castles: if a rook of its colour is in the corner
    ///   on that side, the rook lands on the square the king passed over.
    ///
    /// Moving from an empty square does nothing.
    pub fn play(&mut self, mv: Move) {
        let Some(piece) = self.get(mv.source) else {
            return;
        };
        let (source_file, source_rank) = self.file_rank(mv.source);
        let (target_file, target_rank) = self.file_rank(mv.target);

        let placed = if piece.kind == PieceKind::Pawn && target_rank == self.last_rank(piece.color)
        {
            let kind = mv
                .promotion
                .filter(|kind| kind.is_promotable())
                .unwrap_or(PieceKind::Queen);
            Piece::new(kind, piece.color)
        } else {
            piece
        };

        if piece.kind == PieceKind::King
            && source_rank == target_rank
            && source_file.abs_diff(target_file) == 2
        {
            let (rook_file, crossed_file) = if target_file > source_file {
                (self.width - 1, source_file + 1)
            } else {
                (0, source_file - 1)
            };
            let rook = Piece::new(PieceKind::Rook, piece.color);
            let rook_square = self.index_of(rook_file, source_rank);
            if self.get(rook_square) == Some(rook) {
                self.set(rook_square, None);
                self.set(self.index_of(crossed_file, source_rank), Some(rook));
            }
        }

        self.set(mv.target, Some(placed));
        self.set(mv.source, None);
    }
}
