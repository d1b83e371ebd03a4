use board::{Board, Color, Move};

use crate::{is_move_legal, Result};

/// An iterator over the squares of the pieces of colour `by` which could move onto `square`
///
/// Moves are judged by [`is_move_legal`], so a piece of colour `by` standing on `square` itself
/// never counts, while a piece of the other colour there is attacked as usual.
pub fn attackers_of(board: &Board, square: usize, by: Color) -> impl Iterator<Item = usize> + '_ {
    board
        .pieces_of(by)
        .map(|(index, _)| index)
        .filter(move |&index| is_move_legal(board, Move::new(index, square)))
}

/// Whether the king of the given colour could be captured by the opponent
///
/// The king looked at is the first one found in square order. A colour without a king is never
/// in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => attackers_of(board, king, color.other()).next().is_some(),
        None => false,
    }
}

/// Whether the mover's king is out of check once the move has been made
///
/// The move is played on a copy of the board, which is thrown away afterwards. A move from an
/// empty square has no mover that could be in check, so it's reported as safe.
pub fn would_move_release_check(board: &Board, mv: Move) -> Result<bool> {
    let Some(piece) = board.get(mv.source) else {
        return Ok(true);
    };
    let mut after = board.duplicate()?;
    after.play(mv);
    Ok(!is_in_check(&after, piece.color))
}
