//! Adversarial search agents: minimax, alpha-beta and expectimax.
//!
//! All three search a fixed number of plies. One ply is a move by Pacman
//! (agent 0, maximizing) followed by one move by each ghost in index order.
//! The depth counter drops by one each time Pacman moves; when it reaches
//! zero, or the game ends, the state is scored with the evaluation function.
//!
//! Pacman never considers `Stop`, which is instead returned as the "no move"
//! sentinel alongside leaf values. Ties keep the first action seen, so the
//! result depends only on the order of `legal_actions`.

use crate::constants::DEFAULT_DEPTH;
use crate::directions::Direction;
use crate::evaluation::{reflex_evaluation, score_evaluation};
use crate::game::{Agent, GameState, next_agent};
use crate::pacman::PacmanState;

/// Static evaluation of a state; higher is better for Pacman.
pub type EvaluationFn<S> = fn(&S) -> f64;

/// Keep `candidate` if it is strictly better than `best` under `better`.
fn keep_if<F>(best: &mut Option<(f64, Direction)>, candidate: (f64, Direction), better: F)
where
    F: Fn(f64, f64) -> bool,
{
    if best.is_none_or(|(v, _)| better(candidate.0, v)) {
        *best = Some(candidate);
    }
}

// =============================================================================
// Minimax
// =============================================================================

/// Plays the move that is best against ghosts that always play their best reply.
pub struct MinimaxAgent<S> {
    depth: usize,
    evaluation: EvaluationFn<S>,
}

impl Default for MinimaxAgent<PacmanState> {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH, score_evaluation)
    }
}

impl<S: GameState> MinimaxAgent<S> {
    pub fn new(depth: usize, evaluation: EvaluationFn<S>) -> Self {
        Self { depth, evaluation }
    }

    /// Minimax value of `state` and the move that achieves it.
    pub fn value(&self, state: &S) -> (f64, Direction) {
        self.max_value(state, self.depth)
    }

    fn max_value(&self, state: &S, depth: usize) -> (f64, Direction) {
        if state.is_over() || depth == 0 {
            return ((self.evaluation)(state), Direction::Stop);
        }

        let mut best = None;
        for action in state.legal_actions(0) {
            if action == Direction::Stop {
                continue;
            }
            let child = state.generate_successor(0, action);
            let value = match next_agent(&child, 0) {
                0 => self.max_value(&child, depth - 1).0,
                ghost => self.min_value(&child, depth - 1, ghost).0,
            };
            keep_if(&mut best, (value, action), |a, b| a > b);
        }
        best.unwrap_or_else(|| ((self.evaluation)(state), Direction::Stop))
    }

    fn min_value(&self, state: &S, depth: usize, agent: usize) -> (f64, Direction) {
        if state.is_over() {
            return ((self.evaluation)(state), Direction::Stop);
        }

        let next = next_agent(state, agent);
        let mut best = None;
        for action in state.legal_actions(agent) {
            let child = state.generate_successor(agent, action);
            let value = if next == 0 {
                self.max_value(&child, depth).0
            } else {
                self.min_value(&child, depth, next).0
            };
            keep_if(&mut best, (value, action), |a, b| a < b);
        }
        best.unwrap_or_else(|| ((self.evaluation)(state), Direction::Stop))
    }
}

impl<S: GameState> Agent<S> for MinimaxAgent<S> {
    fn get_action(&mut self, state: &S) -> Direction {
        self.value(state).1
    }
}

// =============================================================================
// Alpha-beta
// =============================================================================

/// Minimax with alpha-beta pruning. Chooses the same move as [`MinimaxAgent`].
pub struct AlphaBetaAgent<S> {
    depth: usize,
    evaluation: EvaluationFn<S>,
}

impl Default for AlphaBetaAgent<PacmanState> {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH, score_evaluation)
    }
}

impl<S: GameState> AlphaBetaAgent<S> {
    pub fn new(depth: usize, evaluation: EvaluationFn<S>) -> Self {
        Self { depth, evaluation }
    }

    pub fn value(&self, state: &S) -> (f64, Direction) {
        self.max_value(state, self.depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn max_value(&self, state: &S, depth: usize, mut alpha: f64, beta: f64) -> (f64, Direction) {
        if state.is_over() || depth == 0 {
            return ((self.evaluation)(state), Direction::Stop);
        }

        let mut best: Option<(f64, Direction)> = None;
        for action in state.legal_actions(0) {
            if action == Direction::Stop {
                continue;
            }
            let child = state.generate_successor(0, action);
            let value = match next_agent(&child, 0) {
                0 => self.max_value(&child, depth - 1, alpha, beta).0,
                ghost => self.min_value(&child, depth - 1, ghost, alpha, beta).0,
            };
            if best.is_none_or(|(v, _)| value > v) {
                best = Some((value, action));
                alpha = alpha.max(value);
            }
            if value >= beta {
                return (value, action);
            }
        }
        best.unwrap_or_else(|| ((self.evaluation)(state), Direction::Stop))
    }

    fn min_value(
        &self,
        state: &S,
        depth: usize,
        agent: usize,
        alpha: f64,
        mut beta: f64,
    ) -> (f64, Direction) {
        if state.is_over() {
            return ((self.evaluation)(state), Direction::Stop);
        }

        let next = next_agent(state, agent);
        let mut best: Option<(f64, Direction)> = None;
        for action in state.legal_actions(agent) {
            let child = state.generate_successor(agent, action);
            let value = if next == 0 {
                self.max_value(&child, depth, alpha, beta).0
            } else {
                self.min_value(&child, depth, next, alpha, beta).0
            };
            if best.is_none_or(|(v, _)| value < v) {
                best = Some((value, action));
                beta = beta.min(value);
            }
            if value <= alpha {
                return (value, action);
            }
        }
        best.unwrap_or_else(|| ((self.evaluation)(state), Direction::Stop))
    }
}

impl<S: GameState> Agent<S> for AlphaBetaAgent<S> {
    fn get_action(&mut self, state: &S) -> Direction {
        self.value(state).1
    }
}

// =============================================================================
// Expectimax
// =============================================================================

/// Plays against ghosts that pick uniformly at random among their legal moves.
pub struct ExpectimaxAgent<S> {
    depth: usize,
    evaluation: EvaluationFn<S>,
}

impl Default for ExpectimaxAgent<PacmanState> {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH, score_evaluation)
    }
}

impl<S: GameState> ExpectimaxAgent<S> {
    pub fn new(depth: usize, evaluation: EvaluationFn<S>) -> Self {
        Self { depth, evaluation }
    }

    pub fn value(&self, state: &S) -> (f64, Direction) {
        self.max_value(state, self.depth)
    }

    fn max_value(&self, state: &S, depth: usize) -> (f64, Direction) {
        if state.is_over() || depth == 0 {
            return ((self.evaluation)(state), Direction::Stop);
        }

        let mut best = None;
        for action in state.legal_actions(0) {
            if action == Direction::Stop {
                continue;
            }
            let child = state.generate_successor(0, action);
            let value = match next_agent(&child, 0) {
                0 => self.max_value(&child, depth - 1).0,
                ghost => self.chance_value(&child, depth - 1, ghost),
            };
            keep_if(&mut best, (value, action), |a, b| a > b);
        }
        best.unwrap_or_else(|| ((self.evaluation)(state), Direction::Stop))
    }

    /// Mean value over the legal moves of `agent`.
    fn chance_value(&self, state: &S, depth: usize, agent: usize) -> f64 {
        if state.is_over() {
            return (self.evaluation)(state);
        }

        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return (self.evaluation)(state);
        }

        let next = next_agent(state, agent);
        let total: f64 = actions
            .iter()
            .map(|&action| {
                let child = state.generate_successor(agent, action);
                if next == 0 {
                    self.max_value(&child, depth).0
                } else {
                    self.chance_value(&child, depth, next)
                }
            })
            .sum();
        total / actions.len() as f64
    }
}

impl<S: GameState> Agent<S> for ExpectimaxAgent<S> {
    fn get_action(&mut self, state: &S) -> Direction {
        self.value(state).1
    }
}

// =============================================================================
// Reflex and random agents
// =============================================================================

/// Looks one move ahead with [`reflex_evaluation`] and picks randomly among the best.
pub struct ReflexAgent {
    rng: fastrand::Rng,
}

impl ReflexAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Agent<PacmanState> for ReflexAgent {
    fn get_action(&mut self, state: &PacmanState) -> Direction {
        let legal = state.legal_actions(0);
        let scores: Vec<f64> = legal
            .iter()
            .map(|&action| reflex_evaluation(state, action))
            .collect();
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_moves: Vec<Direction> = legal
            .iter()
            .zip(&scores)
            .filter(|&(_, &s)| s == best)
            .map(|(&a, _)| a)
            .collect();

        if best_moves.is_empty() {
            return Direction::Stop;
        }
        best_moves[self.rng.usize(..best_moves.len())]
    }
}

/// A ghost that picks uniformly among its legal moves.
pub struct RandomGhost {
    index: usize,
    rng: fastrand::Rng,
}

impl RandomGhost {
    pub fn new(index: usize, seed: u64) -> Self {
        Self {
            index,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl<S: GameState> Agent<S> for RandomGhost {
    fn get_action(&mut self, state: &S) -> Direction {
        let legal = state.legal_actions(self.index);
        if legal.is_empty() {
            return Direction::Stop;
        }
        legal[self.rng.usize(..legal.len())]
    }
}
