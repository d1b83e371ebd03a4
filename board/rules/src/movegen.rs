use board::{Board, Color, Move, PieceKind};

use crate::{is_move_legal, would_move_release_check, Result};

/// List the moves the piece on the given square can make, up to `capacity` of them
///
/// Targets are visited in square order. With `in_check` set, only moves which get the mover out
/// of check are kept. A pawn reaching its last rank produces one move per promotion, in the order
/// of [`PieceKind::PROMOTIONS`], and each of those counts towards the capacity. Once the capacity
/// is reached, any remaining moves are silently dropped.
pub fn generate_moves(
    board: &Board,
    square: usize,
    in_check: bool,
    capacity: usize,
) -> Result<Vec<Move>> {
    let mut moves = Vec::new();
    extend_moves(board, square, in_check, capacity, &mut moves)?;
    Ok(moves)
}

/// List the moves all pieces of the given colour can make, up to `capacity` of them in total
///
/// This is [`generate_moves`] for every square holding a piece of that colour, in square order.
/// An empty list means the colour has nothing it can do.
pub fn generate_all_moves(
    board: &Board,
    color: Color,
    in_check: bool,
    capacity: usize,
) -> Result<Vec<Move>> {
    let mut moves = Vec::new();
    for (square, _) in board.pieces_of(color) {
        if moves.len() >= capacity {
            break;
        }
        extend_moves(board, square, in_check, capacity, &mut moves)?;
    }
    Ok(moves)
}

/// Whether the colour has any move which doesn't leave its king in check
///
/// Unlike [`generate_all_moves`], this is never cut short by a capacity.
pub fn has_legal_moves(board: &Board, color: Color) -> Result<bool> {
    for (source, _) in board.pieces_of(color) {
        for target in 0..board.square_count() {
            let mv = Move::new(source, target);
            if is_move_legal(board, mv) && would_move_release_check(board, mv)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn extend_moves(
    board: &Board,
    source: usize,
    in_check: bool,
    capacity: usize,
    moves: &mut Vec<Move>,
) -> Result<()> {
    let Some(piece) = board.get(source) else {
        return Ok(());
    };
    let promotion_rank = board.last_rank(piece.color);
    for target in 0..board.square_count() {
        if moves.len() >= capacity {
            break;
        }
        let mv = Move::new(source, target);
        if !is_move_legal(board, mv) || (in_check && !would_move_release_check(board, mv)?) {
            continue;
        }
        if piece.kind == PieceKind::Pawn && board.file_rank(target).1 == promotion_rank {
            let room = capacity - moves.len();
            moves.extend(
                PieceKind::PROMOTIONS
                    .into_iter()
                    .take(room)
                    .map(|kind| mv.with_promotion(kind)),
            );
        } else {
            moves.push(mv);
        }
    }
    Ok(())
}
