use board::{Board, Color, Move, Piece, PieceKind};

/// The file and rank of both ends of a move, in signed coordinates
#[derive(Clone, Copy, Debug)]
struct Displacement {
    source_file: isize,
    source_rank: isize,
    target_file: isize,
    target_rank: isize,
}

impl Displacement {
    fn of(board: &Board, mv: Move) -> Self {
        let (source_file, source_rank) = board.file_rank(mv.source);
        let (target_file, target_rank) = board.file_rank(mv.target);
        Self {
            source_file: source_file as isize,
            source_rank: source_rank as isize,
            target_file: target_file as isize,
            target_rank: target_rank as isize,
        }
    }

    const fn files(self) -> isize {
        self.target_file - self.source_file
    }

    const fn ranks(self) -> isize {
        self.target_rank - self.source_rank
    }

    /// Whether every square strictly between the source and the target is empty
    ///
    /// Steps one square at a time towards the target, so this is only meaningful for moves along
    /// a rank, file or diagonal.
    fn is_path_clear(self, board: &Board) -> bool {
        let (step_file, step_rank) = (self.files().signum(), self.ranks().signum());
        let (mut file, mut rank) = (self.source_file + step_file, self.source_rank + step_rank);
        while (file, rank) != (self.target_file, self.target_rank) {
            if board
                .checked_index_of(file, rank)
                .and_then(|square| board.get(square))
                .is_some()
            {
                return false;
            }
            file += step_file;
            rank += step_rank;
        }
        true
    }
}

/// Check whether the move obeys the movement rules of the piece being moved
///
/// This checks the geometry of the move, whether anything is in the way, and what is on the
/// target square. It does *not* check whether the move leaves the mover's own king in check;
/// see [`crate::would_move_release_check`] for that.
///
/// Castling (a king moving two files along its rank) only looks at the current placement of
/// pieces: it's allowed whenever a rook of the same colour sits in the corner on that side and
/// every square between the king and the rook is empty. Whether either piece has moved before,
/// or whether the king passes through an attacked square, is never considered.
pub fn is_move_legal(board: &Board, mv: Move) -> bool {
    if mv.source == mv.target || !board.contains(mv.source) || !board.contains(mv.target) {
        return false;
    }
    let Some(piece) = board.get(mv.source) else {
        return false;
    };
    let target = board.get(mv.target);
    if target.is_some_and(|target| target.color == piece.color) {
        return false;
    }
    let displacement = Displacement::of(board, mv);
    match piece.kind {
        PieceKind::Pawn => is_pawn_move_legal(board, displacement, piece.color, target),
        PieceKind::Knight => is_knight_move_legal(displacement),
        PieceKind::Bishop => is_bishop_move_legal(board, displacement),
        PieceKind::Rook => is_rook_move_legal(board, displacement),
        PieceKind::Queen => {
            is_rook_move_legal(board, displacement) || is_bishop_move_legal(board, displacement)
        }
        PieceKind::King => is_king_move_legal(board, displacement, piece.color),
    }
}

fn is_pawn_move_legal(
    board: &Board,
    displacement: Displacement,
    color: Color,
    target: Option<Piece>,
) -> bool {
    let direction = color.pawn_direction();
    let (files, ranks) = (displacement.files(), displacement.ranks());
    if files == 0 && ranks == direction {
        target.is_none()
    } else if files == 0 && ranks == 2 * direction {
        target.is_none()
            && displacement.source_rank == board.pawn_start_rank(color) as isize
            && displacement.is_path_clear(board)
    } else if files.abs() == 1 && ranks == direction {
        // The target can't hold a friendly piece by now, so any piece there is a capture
        target.is_some()
    } else {
        false
    }
}

fn is_knight_move_legal(displacement: Displacement) -> bool {
    matches!(
        (displacement.files().abs(), displacement.ranks().abs()),
        (1, 2) | (2, 1)
    )
}

fn is_bishop_move_legal(board: &Board, displacement: Displacement) -> bool {
    displacement.files().abs() == displacement.ranks().abs() && displacement.is_path_clear(board)
}

fn is_rook_move_legal(board: &Board, displacement: Displacement) -> bool {
    (displacement.files() == 0) != (displacement.ranks() == 0) && displacement.is_path_clear(board)
}

fn is_king_move_legal(board: &Board, displacement: Displacement, color: Color) -> bool {
    let (files, ranks) = (displacement.files(), displacement.ranks());
    if files.abs() <= 1 && ranks.abs() <= 1 {
        return true;
    }
    if files.abs() != 2 || ranks != 0 {
        return false;
    }
    // Castling: a rook of ours must be in the corner we're heading towards
    let rook_file = if files > 0 {
        board.width() as isize - 1
    } else {
        0
    };
    let rook = board
        .checked_index_of(rook_file, displacement.source_rank)
        .and_then(|square| board.get(square));
    if rook != Some(Piece::new(PieceKind::Rook, color)) {
        return false;
    }
    Displacement {
        target_file: rook_file,
        target_rank: displacement.source_rank,
        ..displacement
    }
    .is_path_clear(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::{fen, GameConfig, LongAlgebraicMove};

    #[track_caller]
    fn position(fen: &str) -> Board {
        fen::parse(fen).expect("invalid test FEN").0
    }

    #[track_caller]
    fn legal(board: &Board, notation: &str) -> bool {
        let mv = LongAlgebraicMove::parse(board, notation).expect("invalid test move");
        is_move_legal(board, mv)
    }

    #[test]
    fn test_opening_moves() {
        let board = position(GameConfig::STANDARD.initial_fen().unwrap());
        for notation in ["a2a3", "a2a4", "b1a3", "b1c3", "g8f6", "e7e5", "h7h6"] {
            assert!(legal(&board, notation), "{notation} should be legal");
        }
        for notation in [
            "a2a5", "a2b3", "b1d2", "c1e3", "a1a3", "d1d3", "e1e2", "e1g1", "e1c1", "e2e2",
            "e3e4",
        ] {
            assert!(!legal(&board, notation), "{notation} should be illegal");
        }
    }

    #[test]
    fn test_pawn_moves() {
        let board = position("8/2p5/1P1p4/3P4/4p3/p7/P3p3/8 w");
        // Diagonal steps only onto an enemy piece
        assert!(legal(&board, "b6c7"));
        assert!(!legal(&board, "b6a7"));
        // Blocked forwards, whatever colour is in the way
        assert!(!legal(&board, "d5d6"));
        assert!(!legal(&board, "a2a3"));
        assert!(!legal(&board, "a2a4"));
        // Double step only from the starting rank
        assert!(!legal(&board, "b6b8"));
        assert!(legal(&board, "c7c5"));
        assert!(legal(&board, "c7c6"));
        // Black moves down the board
        assert!(!legal(&board, "c7c8"));
        assert!(legal(&board, "e2e1"));
        assert!(!legal(&board, "d6d5"));
        // No backwards captures
        assert!(!legal(&board, "d5e4"));
        assert!(!legal(&board, "e4d5"));
    }

    #[test]
    fn test_double_step_needs_clear_intermediate() {
        let board = position("8/8/8/8/8/n7/P7/8 w");
        assert!(!legal(&board, "a2a4"));
        let board = position("8/8/8/8/n7/8/P7/8 w");
        assert!(legal(&board, "a2a3"));
        assert!(!legal(&board, "a2a4"));
    }

    #[test]
    fn test_sliding_pieces_blocked() {
        let board = position("8/8/8/3p4/8/1Q3p2/5P2/R3B3 w");
        assert!(legal(&board, "a1a8"));
        assert!(legal(&board, "a1d1"));
        assert!(!legal(&board, "a1f1"));
        assert!(legal(&board, "e1c3"));
        assert!(!legal(&board, "e1f2"));
        assert!(!legal(&board, "e1g3"));
        assert!(legal(&board, "b3f3"));
        assert!(!legal(&board, "b3g3"));
        assert!(legal(&board, "b3d5"));
        assert!(!legal(&board, "b3e6"));
        assert!(!legal(&board, "b3c5"));
        assert!(!legal(&board, "e1e3"));
    }

    #[test]
    fn test_capture_exclusivity() {
        let config = GameConfig::STANDARD;
        for kind in PieceKind::KINDS {
            let mut board = Board::from_config(config);
            let source = board.index_of(3, 3);
            board.set(source, Some(Piece::new(kind, Color::White)));
            let reachable: Vec<usize> = (0..board.square_count())
                .filter(|&target| is_move_legal(&board, Move::new(source, target)))
                .collect();
            assert!(!reachable.is_empty(), "{kind:?} has no moves");
            for target in reachable {
                let mut own = board.clone();
                own.set(target, Some(Piece::new(PieceKind::Knight, Color::White)));
                assert!(
                    !is_move_legal(&own, Move::new(source, target)),
                    "{kind:?} captured its own piece"
                );
            }
        }
    }

    #[test]
    fn test_castling_from_placement() {
        let board = position("r3k2r/8/8/8/8/8/8/R3K2R w");
        assert!(legal(&board, "e1g1"));
        assert!(legal(&board, "e1c1"));
        assert!(legal(&board, "e8g8"));
        assert!(legal(&board, "e8c8"));
    }

    #[test]
    fn test_blocked_castling() {
        let board = position("r2qkb1r/8/8/8/8/8/8/RN2KB1R w");
        assert!(!legal(&board, "e1g1"));
        // The knight on b1 isn't passed over, but is still between king and rook
        assert!(!legal(&board, "e1c1"));
        assert!(!legal(&board, "e8g8"));
        assert!(!legal(&board, "e8c8"));
    }

    #[test]
    fn test_castling_needs_own_rook() {
        let board = position("8/8/8/8/8/8/8/r3K2B w");
        assert!(!legal(&board, "e1g1"));
        assert!(!legal(&board, "e1c1"));
        assert!(legal(&board, "e1d1"));
    }

    #[test]
    fn test_narrow_board() {
        // Five files and six ranks: black's pawns start on rank 5, the corner file is e
        let board = position("rk2r/1p3/5/5/2P2/RKN1R w");
        assert!(legal(&board, "b5b3"));
        assert!(legal(&board, "b5b4"));
        assert!(!legal(&board, "b5b2"));
        assert!(legal(&board, "c2c4"));
        assert!(!legal(&board, "c2c5"));
        // Castling towards the rook on e6, and blocked by the knight on c1
        assert!(legal(&board, "b6d6"));
        assert!(!legal(&board, "b1d1"));
        assert!(legal(&board, "e1d1"));
    }

    #[test]
    fn test_empty_source_and_off_board() {
        let board = position("8/8/8/8/8/8/8/K7 w");
        assert!(!is_move_legal(&board, Move::new(1, 2)));
        assert!(!is_move_legal(&board, Move::new(56, 64)));
        assert!(!is_move_legal(&board, Move::new(56, 56)));
    }
}
