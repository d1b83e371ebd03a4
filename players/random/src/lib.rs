//! A strategy which makes purely random moves

use board::{Board, Color, GameConfig, Move};
use players::{candidate_moves, Strategy};
use rand::{seq::SliceRandom, RngCore};
use rules::GameStatus;

/// Picks uniformly at random from every move available
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl RandomStrategy {
    pub const NAME: &'static str = "random";
}

impl Strategy for RandomStrategy {
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
        let moves = candidate_moves(board, side_to_move, status, config.random_move_capacity())?;
        Ok(moves.choose(rng).copied())
    }
}
