//! State evaluation functions for the Pacman agents.

use crate::constants::{
    GHOST_NEAR_PENALTY, REFLEX_CLEAR_SCORE, REFLEX_GHOST_PENALTY, REFLEX_STOP_PENALTY,
};
use crate::directions::Direction;
use crate::distance::manhattan;
use crate::grid::Position;
use crate::pacman::PacmanState;

/// The game score.
pub fn score_evaluation(state: &PacmanState) -> f64 {
    state.score()
}

/// Nearest and farthest food by Manhattan distance, if any food is left.
fn food_extremes(from: Position, food: &[Position]) -> Option<(usize, usize)> {
    let dists = food.iter().map(|&f| manhattan(from, f));
    Some((dists.clone().min()?, dists.max()?))
}

/// On the ghost's square or next to it.
fn touching(a: Position, b: Position) -> bool {
    manhattan(a, b) <= 1
}

/// Game score, minus the distance to the nearest and the farthest food,
/// minus a penalty for standing on or next to a ghost that is not scared.
pub fn better_evaluation(state: &PacmanState) -> f64 {
    let pos = state.pacman_position();
    let mut score = state.score();

    if let Some((nearest, farthest)) = food_extremes(pos, &state.food().as_list()) {
        score -= (nearest + farthest) as f64;
    }

    let in_danger = state
        .ghost_states()
        .iter()
        .any(|g| g.scared_timer() == 0 && touching(pos, g.position()));
    if in_danger {
        score -= GHOST_NEAR_PENALTY;
    }

    score
}

/// Score of Pacman playing `action` from `current`, used by the reflex agent.
pub fn reflex_evaluation(current: &PacmanState, action: Direction) -> f64 {
    let next = current.generate_pacman_successor(action);
    let pos = next.pacman_position();
    let food = next.food().as_list();

    if food.is_empty() {
        return REFLEX_CLEAR_SCORE;
    }

    let mut score = 0.0;
    if let Some((nearest, farthest)) = food_extremes(pos, &food) {
        score -= (nearest * farthest) as f64;
    }
    if food.len() < current.food().count() {
        score = 0.0;
    }
    if pos == current.pacman_position() {
        score -= REFLEX_STOP_PENALTY;
    }
    if next.ghost_states().iter().any(|g| touching(pos, g.position())) {
        score -= REFLEX_GHOST_PENALTY;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use crate::layout::{Layout, TINY_SEARCH};

    fn state(text: &str) -> PacmanState {
        PacmanState::new(&text.parse::<Layout>().unwrap())
    }

    #[test]
    fn test_score_evaluation_is_score() {
        let s = state(TINY_SEARCH).generate_pacman_successor(Direction::West);
        assert_eq!(score_evaluation(&s), s.score());
    }

    #[test]
    fn test_better_evaluation_food_distances() {
        // Pacman (2, 3); food at (1, 3) and (1, 1): nearest 1, farthest 3.
        let s = state(TINY_SEARCH);
        assert_eq!(better_evaluation(&s), -4.0);
    }

    #[test]
    fn test_better_evaluation_ghost_penalty() {
        let near = state("%%%%%%\n%PG .%\n%%%%%%");
        let far = state("%%%%%%\n%P .G%\n%%%%%%");
        // Single pellet 3 squares away in the first, 2 in the second.
        assert_eq!(better_evaluation(&near), -6.0 - GHOST_NEAR_PENALTY);
        assert_eq!(better_evaluation(&far), -4.0);
    }

    #[test]
    fn test_better_evaluation_ignores_scared_ghosts() {
        let s = state("%%%%%%%\n%Po G.%\n%%%%%%%");
        let s = s.generate_pacman_successor(Direction::East);
        let s = s.generate_successor(1, Direction::West);
        // Ghost at (3, 1) next to Pacman at (2, 1), but scared.
        assert_eq!(s.ghost_states()[0].position(), (3, 1));
        let expected = s.score() - 6.0;
        assert_eq!(better_evaluation(&s), expected);
    }

    #[test]
    fn test_reflex_prefers_eating() {
        let s = state(TINY_SEARCH);
        let eat = reflex_evaluation(&s, Direction::West);
        let wander = reflex_evaluation(&s, Direction::East);
        let stop = reflex_evaluation(&s, Direction::Stop);
        assert!(eat > wander);
        assert!(wander > stop);
    }

    #[test]
    fn test_reflex_last_pellet() {
        let s = state("%%%%\n%P.%\n%%%%");
        assert_eq!(reflex_evaluation(&s, Direction::East), REFLEX_CLEAR_SCORE);
    }

    #[test]
    fn test_reflex_avoids_ghosts() {
        let s = state("%%%%%%%\n%.P G %\n%%%%%%%");
        let toward = reflex_evaluation(&s, Direction::East);
        assert!(toward <= -REFLEX_GHOST_PENALTY);
    }
}
