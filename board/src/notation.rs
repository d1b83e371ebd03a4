//! Long algebraic notation for moves, as used by UCI (`e2e4`, `g7h8q`)
//!
//! Files are lettered from `a` and ranks are numbered from `1`, so boards up to 26 files wide
//! and of any height can be written down.

use core::{fmt, str::FromStr};

use crate::{Board, Move, PieceKind};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("invalid long algebraic notation `{0}`")]
    Invalid(String),
    #[error("`{0}` can't be promoted into")]
    InvalidPromotion(char),
    #[error("square {0} is not on the board")]
    OffBoard(Square),
    #[error("square index {0} is not on the board")]
    NoSuchSquare(usize),
}

/// A square named by its file and rank, independent of any board's dimensions
///
/// Both coordinates are zero-based: `a1` is `Square { file: 0, rank: 0 }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    pub file: usize,
    pub rank: usize,
}
impl Square {
    /// The name of the square with the given index on the board
    ///
    /// # Panics
    ///
    /// The index must be on the board; [`Square::try_of`] checks it instead.
    pub const fn of(board: &Board, index: usize) -> Self {
        let (file, rank) = board.file_rank(index);
        Self { file, rank }
    }

    pub fn try_of(board: &Board, index: usize) -> Result<Self, NotationError> {
        if board.contains(index) {
            Ok(Self::of(board, index))
        } else {
            Err(NotationError::NoSuchSquare(index))
        }
    }

    /// The index of this square on the board, if it fits
    pub fn index_on(self, board: &Board) -> Result<usize, NotationError> {
        if self.file < board.width() && self.rank < board.height() {
            Ok(board.index_of(self.file, self.rank))
        } else {
            Err(NotationError::OffBoard(self))
        }
    }
}
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.file).ok().filter(|file| *file < 26) {
            Some(file) => write!(f, "{}{}", char::from(b'a' + file), self.rank + 1),
            None => write!(f, "?{}", self.rank + 1),
        }
    }
}

/// A move in long algebraic notation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongAlgebraicMove {
    pub source: Square,
    pub target: Square,
    pub promotion: Option<PieceKind>,
}
impl LongAlgebraicMove {
    /// Describe the move made on the given board
    ///
    /// # Panics
    ///
    /// Both squares of the move must be on the board; [`LongAlgebraicMove::try_from_move`]
    /// reports an error instead.
    pub const fn from_move(board: &Board, mv: Move) -> Self {
        Self {
            source: Square::of(board, mv.source),
            target: Square::of(board, mv.target),
            promotion: mv.promotion,
        }
    }

    /// Describe the move made on the given board, if both its squares are on it
    pub fn try_from_move(board: &Board, mv: Move) -> Result<Self, NotationError> {
        Ok(Self {
            source: Square::try_of(board, mv.source)?,
            target: Square::try_of(board, mv.target)?,
            promotion: mv.promotion,
        })
    }

    /// Resolve this notation against the given board
    pub fn to_move(self, board: &Board) -> Result<Move, NotationError> {
        Ok(Move {
            source: self.source.index_on(board)?,
            target: self.target.index_on(board)?,
            promotion: self.promotion,
        })
    }

    /// Parse the given text as a move on the given board
    pub fn parse(board: &Board, text: &str) -> Result<Move, NotationError> {
        text.parse::<Self>()?.to_move(board)
    }
}
impl fmt::Display for LongAlgebraicMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.target)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.fen_letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
impl FromStr for LongAlgebraicMove {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NotationError::Invalid(s.to_owned());
        let mut rest = s;
        let source = take_square(&mut rest).ok_or_else(invalid)?;
        let target = take_square(&mut rest).ok_or_else(invalid)?;
        let mut chars = rest.chars();
        let promotion = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c @ ('q' | 'r' | 'b' | 'n')), None) => PieceKind::from_fen_letter(c),
            (Some(c @ ('p' | 'k')), None) => return Err(NotationError::InvalidPromotion(c)),
            _ => return Err(invalid()),
        };
        Ok(Self {
            source,
            target,
            promotion,
        })
    }
}

/// Pull a square name (a letter then a 1-based rank number) off the front of the string
fn take_square(s: &mut &str) -> Option<Square> {
    let file = match s.as_bytes().first() {
        Some(c @ b'a'..=b'z') => usize::from(c - b'a'),
        _ => return None,
    };
    let digits = s[1..].bytes().take_while(u8::is_ascii_digit).count();
    let rank = s[1..1 + digits].parse::<usize>().ok()?.checked_sub(1)?;
    *s = &s[1 + digits..];
    Some(Square { file, rank })
}
