//! Traits for an automated player, and a registry to choose between them by name

use board::{Board, Color, GameConfig, Move};
use rand::{rngs::SmallRng, RngCore, SeedableRng};
use rules::GameStatus;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("no strategy named `{0}`")]
    UnknownStrategy(String),
    #[error("a strategy named `{0}` is already registered")]
    DuplicateStrategy(String),
    #[error("no strategies have been registered")]
    NoStrategies,
    #[error(transparent)]
    Rules(#[from] rules::Error),
}

/// A way of deciding which move to make
///
/// Implementations must only ever return a move from [`candidate_moves`] (or a subset of them),
/// and must return `None` exactly when there are no candidates.
pub trait Strategy {
    /// The name this strategy is selected by
    fn name(&self) -> &str;

    /// Pick a move for `side_to_move`, which is in the given status
    ///
    /// Any randomness must come from `rng`, so that a seeded registry plays reproducibly.
    fn choose_move(
        &self,
        config: GameConfig,
        board: &Board,
        side_to_move: Color,
        status: GameStatus,
        rng: &mut dyn RngCore,
    ) -> rules::Result<Option<Move>>;
}

/// The moves a strategy may choose between, up to `capacity` of them
///
/// Moves are only filtered for safety when `status` says the side to move is in check.
pub fn candidate_moves(
    board: &Board,
    side_to_move: Color,
    status: GameStatus,
    capacity: usize,
) -> rules::Result<Vec<Move>> {
    rules::generate_all_moves(board, side_to_move, status.is_check(), capacity)
}

/// The strategies which can be played, in the order they were registered, one of which is active
///
/// The registry owns the random source handed to strategies, so the same seed always gives the
/// same sequence of choices.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
    active: usize,
    rng: SmallRng,
}

impl StrategyRegistry {
    /// Create an empty registry whose randomness is seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Create an empty registry which makes the same choices every time
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            strategies: Vec::new(),
            active: 0,
            rng,
        }
    }

    /// Add a strategy to the end of the registry
    ///
    /// The first strategy registered starts out active.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) -> Result<()> {
        if self.position(strategy.name()).is_some() {
            return Err(Error::DuplicateStrategy(strategy.name().to_owned()));
        }
        self.strategies.push(strategy);
        Ok(())
    }

    /// The names of the first `capacity` strategies, in registration order
    pub fn list(&self, capacity: usize) -> Vec<&str> {
        self.names().take(capacity).collect()
    }

    /// The names of every registered strategy, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.strategies.iter().map(|strategy| strategy.name())
    }

    /// Make the strategy with exactly this name the active one
    ///
    /// If there's no such strategy, the active one stays as it was.
    pub fn select(&mut self, name: &str) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::UnknownStrategy(name.to_owned()))?;
        self.active = index;
        Ok(())
    }

    /// The name of the active strategy
    pub fn current(&self) -> Option<&str> {
        self.strategies
            .get(self.active)
            .map(|strategy| strategy.name())
    }

    /// Ask the active strategy for a move
    ///
    /// Returns `Ok(None)` when the side to move has no moves to choose from.
    pub fn get_move(
        &mut self,
        config: GameConfig,
        board: &Board,
        side_to_move: Color,
        status: GameStatus,
    ) -> Result<Option<Move>> {
        let strategy = self
            .strategies
            .get(self.active)
            .ok_or(Error::NoStrategies)?;
        Ok(strategy.choose_move(config, board, side_to_move, status, &mut self.rng)?)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names().position(|candidate| candidate == name)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names().collect::<Vec<_>>())
            .field("active", &self.current())
            .finish_non_exhaustive()
    }
}
