//! Game-state and agent abstractions, and a simple turn scheduler.
//!
//! Agent 0 is always Pacman (the maximizer). Agents `1..n` are ghosts and
//! move in index order after Pacman, then play returns to agent 0.

use log::{debug, info};

use crate::directions::Direction;
use crate::error::{Error, Result};

/// A game position that agents can search over.
pub trait GameState: Clone {
    /// Legal moves for `agent`. Empty once the game is over.
    fn legal_actions(&self, agent: usize) -> Vec<Direction>;

    /// The state after `agent` plays `action`. `action` must be legal.
    fn generate_successor(&self, agent: usize, action: Direction) -> Self;

    fn is_over(&self) -> bool;

    fn num_agents(&self) -> usize;
}

/// An agent that picks one move per turn.
pub trait Agent<S> {
    /// Called once before the first move.
    fn register_initial_state(&mut self, _state: &S) -> Result<()> {
        Ok(())
    }

    fn get_action(&mut self, state: &S) -> Direction;
}

/// Index of the agent that moves after `agent`.
pub fn next_agent<S: GameState>(state: &S, agent: usize) -> usize {
    (agent + 1) % state.num_agents().max(1)
}

/// Run a game to completion or until `max_moves` agent moves have been made.
///
/// `agents[i]` controls agent `i`. An illegal move aborts the game.
pub fn run_game<S: GameState>(
    initial: S,
    agents: &mut [Box<dyn Agent<S>>],
    max_moves: usize,
) -> Result<S> {
    if agents.len() != initial.num_agents() {
        return Err(Error::AgentCount {
            expected: initial.num_agents(),
            got: agents.len(),
        });
    }

    for agent in agents.iter_mut() {
        agent.register_initial_state(&initial)?;
    }

    let mut state = initial;
    let mut moves = 0;
    let mut turn = 0;

    while !state.is_over() && moves < max_moves {
        let action = agents[turn].get_action(&state);
        if !state.legal_actions(turn).contains(&action) {
            return Err(Error::IllegalAction {
                agent: turn,
                action,
            });
        }
        debug!("agent {turn} plays {action}");
        state = state.generate_successor(turn, action);
        moves += 1;
        turn = next_agent(&state, turn);
    }

    info!("game finished after {moves} moves");
    Ok(state)
}
