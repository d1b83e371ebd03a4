//! Reading and writing the piece placement and side to move in FEN
//!
//! Only the first two fields of FEN are meaningful here. Any further fields (castling rights,
//! en passant target, clocks) are accepted and ignored, because none of that state is tracked.
//! Boards of any rectangular size are supported: the number of ranks gives the height and the
//! number of squares in each rank gives the width.

use crate::{Board, Color, Piece};

/// The most squares a single rank may describe
pub const MAX_RANK_LENGTH: usize = 1024;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("FEN has no piece placement field")]
    MissingPlacement,
    #[error("rank {rank} of the FEN describes no squares")]
    EmptyRank { rank: usize },
    #[error("rank {rank} of the FEN describes more than {} squares", MAX_RANK_LENGTH)]
    RankTooLong { rank: usize },
    #[error("rank {rank} of the FEN describes {found} squares, expected {expected}")]
    RaggedRank {
        rank: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown piece letter `{0}` in FEN")]
    UnknownPiece(char),
    #[error("FEN has no side to move field")]
    MissingSideToMove,
    #[error("invalid side to move `{0}` in FEN")]
    InvalidSideToMove(String),
}

/// Parse the board and side to move out of the given FEN
pub fn parse(fen: &str) -> Result<(Board, Color), FenError> {
    let mut terms = fen.split_whitespace();
    let placement = terms.next().ok_or(FenError::MissingPlacement)?;
    let ranks = placement
        .split('/')
        .enumerate()
        .map(|(rank, text)| parse_rank(rank, text))
        .collect::<Result<Vec<_>, _>>()?;
    let width = ranks[0].len();
    if let Some((rank, squares)) = ranks
        .iter()
        .enumerate()
        .find(|(_, squares)| squares.len() != width)
    {
        return Err(FenError::RaggedRank {
            rank,
            found: squares.len(),
            expected: width,
        });
    }

    let mut board = Board::new(width, ranks.len());
    // FEN lists ranks from the top, which is also the order squares are stored in
    for (index, square) in ranks.into_iter().flatten().enumerate() {
        board.set(index, square);
    }

    let side_to_move = match terms.next() {
        Some("w") => Color::White,
        Some("b") => Color::Black,
        Some(other) => return Err(FenError::InvalidSideToMove(other.to_owned())),
        None => return Err(FenError::MissingSideToMove),
    };
    Ok((board, side_to_move))
}

fn parse_rank(rank: usize, text: &str) -> Result<Vec<Option<Piece>>, FenError> {
    let too_long = || FenError::RankTooLong { rank };
    let mut squares = Vec::new();
    let mut skip: usize = 0;
    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            skip = skip
                .checked_mul(10)
                .and_then(|skip| skip.checked_add(digit as usize))
                .filter(|skip| squares.len() + skip <= MAX_RANK_LENGTH)
                .ok_or_else(too_long)?;
            continue;
        }
        squares.extend(std::iter::repeat(None).take(skip));
        skip = 0;
        let piece = Piece::from_fen_letter(c).ok_or(FenError::UnknownPiece(c))?;
        if squares.len() == MAX_RANK_LENGTH {
            return Err(too_long());
        }
        squares.push(Some(piece));
    }
    squares.extend(std::iter::repeat(None).take(skip));
    if squares.is_empty() {
        return Err(FenError::EmptyRank { rank });
    }
    Ok(squares)
}

/// Write the board and side to move as the first two fields of a FEN
pub fn to_fen(board: &Board, side_to_move: Color) -> String {
    let mut fen = String::with_capacity(board.square_count() + board.height() + 2);
    for row in 0..board.height() {
        if row > 0 {
            fen.push('/');
        }
        let mut empty = 0;
        for file in 0..board.width() {
            match board.get(row * board.width() + file) {
                Some(piece) => {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.fen_letter());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
    }
    fen.push(' ');
    fen.push(match side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });
    fen
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{GameConfig, PieceKind};

    #[test]
    fn test_opening_position_round_trip() {
        let fen = GameConfig::STANDARD.initial_fen().unwrap();
        let (board, side_to_move) = parse(fen).unwrap();
        assert_eq!(board.config(), GameConfig::STANDARD);
        assert_eq!(side_to_move, Color::White);
        assert_eq!(to_fen(&board, side_to_move), fen);
    }

    #[test]
    fn test_trailing_fields_ignored() {
        let (board, side_to_move) =
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(side_to_move, Color::White);
        assert_eq!(
            board.get(board.index_of(4, 0)),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.get(board.index_of(3, 7)),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
    }

    #[test]
    fn test_non_standard_dimensions() {
        let fen = "k4/5/2p2/1P3/5/4K b";
        let (board, side_to_move) = parse(fen).unwrap();
        assert_eq!((board.width(), board.height()), (5, 6));
        assert_eq!(side_to_move, Color::Black);
        assert_eq!(
            board.get(board.index_of(1, 2)),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            board.get(board.index_of(2, 3)),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(to_fen(&board, side_to_move), fen);
    }

    #[test]
    fn test_wide_ranks() {
        let (board, _) = parse("r10k/12/K11 w").unwrap();
        assert_eq!((board.width(), board.height()), (12, 3));
        assert_eq!(to_fen(&board, Color::White), "r10k/12/K11 w");
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(""), Err(FenError::MissingPlacement));
        assert_eq!(parse("8/8"), Err(FenError::MissingSideToMove));
        assert_eq!(
            parse("8/7 w"),
            Err(FenError::RaggedRank {
                rank: 1,
                found: 7,
                expected: 8
            })
        );
        assert_eq!(parse("8/7x w"), Err(FenError::UnknownPiece('x')));
        assert_eq!(parse("8//8 w"), Err(FenError::EmptyRank { rank: 1 }));
        assert_eq!(
            parse("8/8 white"),
            Err(FenError::InvalidSideToMove("white".to_owned()))
        );
    }

    #[test]
    fn test_overlong_ranks_rejected() {
        for fen in [
            "99999999999999999999 w",
            "4000000000 w",
            "8/1025 w",
            "1024p w",
            "512p511p w",
        ] {
            let rank = usize::from(fen.starts_with("8/"));
            assert_eq!(parse(fen), Err(FenError::RankTooLong { rank }), "{fen}");
        }
        let (board, _) = parse("1023p w").unwrap();
        assert_eq!(board.width(), MAX_RANK_LENGTH);
    }
}
