//! The rules of chess on a board of any size
//!
//! Everything here is a pure function over a borrowed [`Board`]. The only board this crate ever
//! mutates is a private duplicate made to try a move out, which is why the check-related
//! functions can fail: copying a board needs an allocation.

use core::fmt;

use board::{Board, Color};

mod check;
mod legality;
mod movegen;

pub use crate::check::{attackers_of, is_in_check, would_move_release_check};
pub use crate::legality::is_move_legal;
pub use crate::movegen::{generate_all_moves, generate_moves, has_legal_moves};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("couldn't simulate a move: {0}")]
    Duplicate(#[from] board::DuplicateError),
}

/// Where the game stands for the side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}
impl GameStatus {
    /// Whether the game is over
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }

    pub const fn is_check(self) -> bool {
        matches!(self, GameStatus::Check)
    }
}
impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        })
    }
}

/// Classify the position for the given side to move
pub fn game_status(board: &Board, side_to_move: Color) -> Result<GameStatus> {
    let in_check = is_in_check(board, side_to_move);
    let has_moves = has_legal_moves(board, side_to_move)?;
    Ok(match (in_check, has_moves) {
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (false, true) => GameStatus::Ongoing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::{fen, GameConfig};

    #[track_caller]
    fn status_of(fen: &str) -> GameStatus {
        let (board, side_to_move) = fen::parse(fen).expect("invalid test FEN");
        game_status(&board, side_to_move).unwrap()
    }

    #[test]
    fn test_opening_is_ongoing() {
        assert_eq!(
            status_of(GameConfig::STANDARD.initial_fen().unwrap()),
            GameStatus::Ongoing
        );
    }

    #[test]
    fn test_check() {
        assert_eq!(status_of("4k3/4q3/8/8/8/8/8/4K3 w"), GameStatus::Check);
        assert_eq!(status_of("4k3/8/8/8/8/8/4Q3/4K3 b"), GameStatus::Check);
    }

    #[test]
    fn test_stalemate() {
        assert_eq!(status_of("4k3/8/8/8/8/1q6/8/K7 w"), GameStatus::Stalemate);
        assert_eq!(status_of("7k/8/6Q1/8/8/8/8/4K3 b"), GameStatus::Stalemate);
    }

    #[test]
    fn test_checkmate() {
        assert_eq!(status_of("4k3/8/8/8/8/1q6/2n5/K7 w"), GameStatus::Checkmate);
        assert_eq!(status_of("7k/5N2/6Q1/8/8/8/8/4K3 b"), GameStatus::Checkmate);
    }

    #[test]
    fn test_narrow_board_statuses() {
        assert_eq!(status_of("1r2k/5/5/5/1q3/K4 w"), GameStatus::Checkmate);
        assert_eq!(status_of("1r2k/5/5/5/5/K4 w"), GameStatus::Ongoing);
        assert_eq!(status_of("4k/5/5/5/2q2/K4 w"), GameStatus::Stalemate);
    }

    #[test]
    fn test_fools_mate() {
        assert_eq!(
            status_of("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w"),
            GameStatus::Checkmate
        );
    }

    #[test]
    fn test_scholars_mate() {
        assert_eq!(
            status_of("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b"),
            GameStatus::Checkmate
        );
    }

    #[test]
    fn test_missing_king_is_never_in_check() {
        // Black has no king, so nothing it does can be unsafe and nothing can check it
        assert_eq!(status_of("8/8/8/3p4/8/8/8/R3K3 b"), GameStatus::Ongoing);
        assert_eq!(status_of("8/8/8/8/8/8/8/R3K3 b"), GameStatus::Stalemate);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(GameStatus::Checkmate.is_terminal());
        assert!(GameStatus::Stalemate.is_terminal());
        assert!(!GameStatus::Check.is_terminal());
        assert!(!GameStatus::Ongoing.is_terminal());
        assert_eq!(GameStatus::Checkmate.to_string(), "checkmate");
    }
}
