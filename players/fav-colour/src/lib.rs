//! A strategy with strong opinions about the colours of squares
//!
//! White likes to move pieces off light squares and onto dark ones, and black the reverse. The
//! one exception is a bishop stuck on the wrong colour, which is much happier being offered up
//! to as many enemy pieces as possible.

use std::cmp::Ordering;

use board::{Board, Color, GameConfig, Move, PieceKind};
use players::{candidate_moves, Strategy};
use rand::{seq::SliceRandom, RngCore};
use rules::GameStatus;

/// What each enemy piece able to take a sacrificed bishop is worth
const BISHOP_BOUNTY: i64 = 10_000;

/// Plays whichever move scores highest, picking at random between equally good moves
#[derive(Clone, Copy, Debug, Default)]
pub struct FavColourStrategy;

impl FavColourStrategy {
    pub const NAME: &'static str = "fav_colour";
}

impl Strategy for FavColourStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn choose_move(
        &self,
        config: GameConfig,
        board: &Board,
        side_to_move: Color,
        status: GameStatus,
        rng: &mut dyn RngCore,
    ) -> rules::Result<Option<Move>> {
        let moves = candidate_moves(board, side_to_move, status, config.scored_move_capacity())?;
        let mut best_moves = Vec::new();
        let mut best_score = i64::MIN;
        for mv in moves {
            let score = score(board, mv, side_to_move)?;
            match score.cmp(&best_score) {
                Ordering::Greater => {
                    best_score = score;
                    best_moves.clear();
                    best_moves.push(mv);
                }
                Ordering::Equal => best_moves.push(mv),
                Ordering::Less => {}
            }
        }
        Ok(best_moves.choose(rng).copied())
    }
}

/// How much the side to move likes the given move
fn score(board: &Board, mv: Move, side_to_move: Color) -> rules::Result<i64> {
    let from_light = board.is_light(mv.source);
    let to_light = board.is_light(mv.target);

    // Light squares are the wrong colour for white's bishops, dark squares for black's
    let is_misplaced_bishop = board
        .get(mv.source)
        .is_some_and(|piece| piece.kind == PieceKind::Bishop)
        && from_light == side_to_move.is_white();
    if is_misplaced_bishop {
        let mut after = board.duplicate()?;
        after.play(mv);
        let attackers = rules::attackers_of(&after, mv.target, side_to_move.other()).count();
        return Ok(BISHOP_BOUNTY * attackers as i64);
    }

    let (from_preferred, to_preferred) = match side_to_move {
        Color::White => (from_light, !to_light),
        Color::Black => (!from_light, to_light),
    };
    Ok((3 * i64::from(from_preferred) - 1) + (2 * i64::from(to_preferred) - 1))
}
