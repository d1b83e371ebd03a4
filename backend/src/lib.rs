//! A game in progress: the board, whose turn it is, and how the game stands

use board::{fen, Board, Color, FenError, GameConfig, LongAlgebraicMove, Move, NotationError};
use fav_colour::FavColourStrategy;
use players::StrategyRegistry;
use random_player::RandomStrategy;
use rules::GameStatus;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("move rejected: {0}")]
    Rejected(#[from] MoveRejected),
    #[error(transparent)]
    Rules(#[from] rules::Error),
    #[error(transparent)]
    Strategy(#[from] players::Error),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Why a move wasn't made
///
/// A rejected move leaves the game exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejected {
    #[error("the game is over")]
    GameOver,
    #[error("there's no piece to move")]
    EmptySource,
    #[error("that piece belongs to the side not on move")]
    NotYourTurn,
    #[error("that piece can't move like that")]
    IllegalGeometry,
    #[error("the move doesn't get the king out of check")]
    MustResolveCheck,
}

/// Register the strategies every session can choose from, in the order they're listed
///
/// The uniform random strategy comes first, so it starts out active.
pub fn register_builtin_strategies(registry: &mut StrategyRegistry) -> players::Result<()> {
    registry.register(Box::new(RandomStrategy))?;
    registry.register(Box::new(FavColourStrategy))?;
    Ok(())
}

/// The state of one game
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    board: Board,
    turn: Color,
    status: GameStatus,
    strategies: StrategyRegistry,
}

impl Session {
    /// Start a game of the given variant, with strategies that play differently each time
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_strategies(config, StrategyRegistry::new())
    }

    /// Start a game of the given variant, with strategies whose choices depend only on `seed`
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_strategies(config, StrategyRegistry::seeded(seed))
    }

    /// Start a game from the position in the given FEN
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut session = Self::new(GameConfig::STANDARD)?;
        session.set_fen(fen)?;
        Ok(session)
    }

    /// Start a game of the given variant, choosing moves with the builtin strategies
    ///
    /// The standard board starts from the usual opening position; any other size starts empty,
    /// ready for [`Session::set_board`]. White moves first either way.
    pub fn with_strategies(config: GameConfig, mut strategies: StrategyRegistry) -> Result<Self> {
        register_builtin_strategies(&mut strategies)?;
        let (board, turn) = match config.initial_fen() {
            Some(initial) => fen::parse(initial)?,
            None => (Board::from_config(config), Color::White),
        };
        let status = rules::game_status(&board, turn)?;
        Ok(Self {
            config,
            board,
            turn,
            status,
            strategies,
        })
    }

    pub const fn config(&self) -> GameConfig {
        self.config
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The colour to move next
    pub const fn turn(&self) -> Color {
        self.turn
    }

    /// How the game stands for the colour to move
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Replace the position entirely
    ///
    /// The variant becomes whatever size the new board is.
    pub fn set_board(&mut self, board: Board, turn: Color) -> Result<()> {
        let status = rules::game_status(&board, turn)?;
        self.config = board.config();
        self.board = board;
        self.turn = turn;
        self.status = status;
        Ok(())
    }

    /// Replace the position with the one in the given FEN
    pub fn set_fen(&mut self, fen: &str) -> Result<()> {
        let (board, turn) = fen::parse(fen)?;
        self.set_board(board, turn)
    }

    /// The current position as FEN
    pub fn fen(&self) -> String {
        fen::to_fen(&self.board, self.turn)
    }

    /// Write a move on this board in long algebraic notation
    ///
    /// Fails with [`NotationError::NoSuchSquare`] if either square is off the board.
    pub fn uci(&self, mv: Move) -> Result<String> {
        Ok(LongAlgebraicMove::try_from_move(&self.board, mv)?.to_string())
    }

    /// Make a move for the side to move
    ///
    /// When the side to move is in check, only moves getting it out of check are accepted. When
    /// it isn't, nothing stops a move from walking into check.
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        if self.status.is_terminal() {
            return Err(MoveRejected::GameOver.into());
        }
        let piece = self.board.get(mv.source).ok_or(MoveRejected::EmptySource)?;
        if piece.color != self.turn {
            return Err(MoveRejected::NotYourTurn.into());
        }
        if !rules::is_move_legal(&self.board, mv)
            || mv.promotion.is_some_and(|kind| !kind.is_promotable())
        {
            return Err(MoveRejected::IllegalGeometry.into());
        }
        if self.status.is_check() && !rules::would_move_release_check(&self.board, mv)? {
            return Err(MoveRejected::MustResolveCheck.into());
        }

        let mut board = self.board.duplicate().map_err(rules::Error::from)?;
        board.play(mv);
        let turn = self.turn.other();
        self.status = rules::game_status(&board, turn)?;
        self.board = board;
        self.turn = turn;
        Ok(())
    }

    /// Make the move written in long algebraic notation, such as `e2e4` or `g7h8q`
    pub fn apply_uci(&mut self, notation: &str) -> Result<Move> {
        let mv = LongAlgebraicMove::parse(&self.board, notation)?;
        self.apply_move(mv)?;
        Ok(mv)
    }

    /// The moves the piece on the given square could make
    ///
    /// While the side to move is in check, these are only the moves which escape it.
    pub fn available_moves(&self, square: usize) -> Result<Vec<Move>> {
        Ok(rules::generate_moves(
            &self.board,
            square,
            self.status.is_check(),
            self.config.random_move_capacity(),
        )?)
    }

    /// Ask the active strategy which move to make, without making it
    ///
    /// Once the game is over there's nothing to choose, so this returns `None`.
    pub fn best_move(&mut self) -> Result<Option<Move>> {
        if self.status.is_terminal() {
            return Ok(None);
        }
        Ok(self
            .strategies
            .get_move(self.config, &self.board, self.turn, self.status)?)
    }

    /// Make whichever move the active strategy chooses
    pub fn play_best_move(&mut self) -> Result<Option<Move>> {
        let mv = self.best_move()?;
        if let Some(mv) = mv {
            self.apply_move(mv)?;
        }
        Ok(mv)
    }

    pub const fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    /// The names of up to `capacity` strategies, in the order they were registered
    pub fn list_strategies(&self, capacity: usize) -> Vec<&str> {
        self.strategies.list(capacity)
    }

    /// Make the named strategy choose the moves from now on
    pub fn select_strategy(&mut self, name: &str) -> Result<()> {
        Ok(self.strategies.select(name)?)
    }

    /// The name of the strategy choosing moves
    pub fn current_strategy(&self) -> Option<&str> {
        self.strategies.current()
    }
}
