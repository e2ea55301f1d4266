//! Agents that plan a whole route with graph search before the game starts.

use std::time::Instant;

use log::{info, warn};

use crate::directions::Direction;
use crate::error::{Error, Result};
use crate::game::{Agent, GameState};
use crate::pacman::PacmanState;
use crate::problems::{
    AnyFoodSearchProblem, CornersProblem, FoodSearchProblem, PositionSearchProblem,
    corners_heuristic, food_heuristic, manhattan_heuristic, stay_east_cost, stay_west_cost,
};
use crate::search::{
    SearchProblem, a_star_search, breadth_first_search, depth_first_search, null_heuristic,
    uniform_cost_search,
};

/// Which graph search to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchAlgorithm {
    #[value(name = "dfs")]
    DepthFirst,
    #[value(name = "bfs")]
    BreadthFirst,
    #[value(name = "ucs")]
    UniformCost,
    #[value(name = "astar")]
    AStar,
}

/// Which problem to build from the game state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ProblemKind {
    /// Reach square (1, 1) with unit step costs.
    Position,
    /// Reach square (1, 1), with steps costing less further east.
    StayEast,
    /// Reach square (1, 1), with steps costing less further west.
    StayWest,
    /// Touch all four corners.
    Corners,
    /// Eat every pellet.
    Food,
}

/// The heuristic A* uses. Ignored by the other algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum HeuristicKind {
    /// Always 0.
    Null,
    /// The heuristic that belongs to the problem (Manhattan, corners or food).
    Problem,
}

/// Result of planning a route.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub actions: Vec<Direction>,
    pub cost: f64,
    pub expanded: usize,
}

type Planner = Box<dyn Fn(&PacmanState) -> Plan>;

fn run<P, H>(problem: &P, algorithm: SearchAlgorithm, heuristic: H) -> Plan
where
    P: SearchProblem<Action = Direction>,
    H: Fn(&P::State, &P) -> f64,
{
    let actions = match algorithm {
        SearchAlgorithm::DepthFirst => depth_first_search(problem),
        SearchAlgorithm::BreadthFirst => breadth_first_search(problem),
        SearchAlgorithm::UniformCost => uniform_cost_search(problem),
        SearchAlgorithm::AStar => a_star_search(problem, heuristic),
    };
    Plan {
        cost: problem.actions_cost(&actions),
        expanded: problem.expanded(),
        actions,
    }
}

/// Plan `kind` on `state` with `algorithm`.
pub fn plan(
    state: &PacmanState,
    kind: ProblemKind,
    algorithm: SearchAlgorithm,
    heuristic: HeuristicKind,
) -> Plan {
    let informed = heuristic == HeuristicKind::Problem;
    match kind {
        ProblemKind::Position | ProblemKind::StayEast | ProblemKind::StayWest => {
            let problem = match kind {
                ProblemKind::StayEast => PositionSearchProblem::with_cost(state, stay_east_cost),
                ProblemKind::StayWest => PositionSearchProblem::with_cost(state, stay_west_cost),
                _ => PositionSearchProblem::from_state(state),
            };
            if informed {
                run(&problem, algorithm, manhattan_heuristic)
            } else {
                run(&problem, algorithm, null_heuristic)
            }
        }
        ProblemKind::Corners => {
            let problem = CornersProblem::from_state(state);
            if informed {
                run(&problem, algorithm, corners_heuristic)
            } else {
                run(&problem, algorithm, null_heuristic)
            }
        }
        ProblemKind::Food => {
            let problem = FoodSearchProblem::from_state(state);
            if informed {
                run(&problem, algorithm, food_heuristic)
            } else {
                run(&problem, algorithm, null_heuristic)
            }
        }
    }
}

/// Plans once in [`Agent::register_initial_state`], then replays the route.
///
/// Plays `Stop` once the route is exhausted.
pub struct SearchAgent {
    planner: Planner,
    actions: Vec<Direction>,
    next: usize,
}

impl SearchAgent {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner,
            actions: Vec::new(),
            next: 0,
        }
    }

    pub fn with_problem(kind: ProblemKind, algorithm: SearchAlgorithm, heuristic: HeuristicKind) -> Self {
        Self::new(Box::new(move |state: &PacmanState| {
            plan(state, kind, algorithm, heuristic)
        }))
    }

    pub fn actions(&self) -> &[Direction] {
        &self.actions
    }
}

impl Agent<PacmanState> for SearchAgent {
    fn register_initial_state(&mut self, state: &PacmanState) -> Result<()> {
        let started = Instant::now();
        let plan = (self.planner)(state);
        info!(
            "Path found with total cost of {} in {:.1} seconds",
            plan.cost,
            started.elapsed().as_secs_f64()
        );
        info!("Search nodes expanded: {}", plan.expanded);

        self.actions = plan.actions;
        self.next = 0;
        Ok(())
    }

    fn get_action(&mut self, _state: &PacmanState) -> Direction {
        match self.actions.get(self.next) {
            Some(&action) => {
                self.next += 1;
                action
            }
            None => Direction::Stop,
        }
    }
}

/// Eats the closest pellet, then the next closest, until the board is clear.
#[derive(Default)]
pub struct ClosestDotSearchAgent {
    actions: Vec<Direction>,
    next: usize,
}

impl ClosestDotSearchAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[Direction] {
        &self.actions
    }

    /// Shortest route to any pellet.
    pub fn find_path_to_closest_dot(&self, state: &PacmanState) -> Vec<Direction> {
        uniform_cost_search(&AnyFoodSearchProblem::from_state(state))
    }
}

impl Agent<PacmanState> for ClosestDotSearchAgent {
    fn register_initial_state(&mut self, state: &PacmanState) -> Result<()> {
        self.actions.clear();
        self.next = 0;

        let mut current = state.clone();
        'plan: while current.food().count() > 0 {
            let segment = self.find_path_to_closest_dot(&current);
            if segment.is_empty() {
                warn!("{} pellets are unreachable", current.food().count());
                break;
            }

            for action in segment {
                if !current.legal_actions(0).contains(&action) {
                    return Err(Error::IllegalAction { agent: 0, action });
                }
                current = current.generate_successor(0, action);
                self.actions.push(action);
                if current.is_over() {
                    break 'plan;
                }
            }
        }

        info!("Path found with cost {}.", self.actions.len());
        Ok(())
    }

    fn get_action(&mut self, _state: &PacmanState) -> Direction {
        match self.actions.get(self.next) {
            Some(&action) => {
                self.next += 1;
                action
            }
            None => Direction::Stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Layout, TINY_CORNERS, TINY_MAZE, TINY_SEARCH};

    fn state(text: &str) -> PacmanState {
        PacmanState::new(&text.parse::<Layout>().unwrap())
    }

    #[test]
    fn test_plan_tiny_maze_all_algorithms() {
        let s = state(TINY_MAZE);
        let bfs = plan(&s, ProblemKind::Position, SearchAlgorithm::BreadthFirst, HeuristicKind::Null);
        let ucs = plan(&s, ProblemKind::Position, SearchAlgorithm::UniformCost, HeuristicKind::Null);
        let astar = plan(&s, ProblemKind::Position, SearchAlgorithm::AStar, HeuristicKind::Problem);
        let dfs = plan(&s, ProblemKind::Position, SearchAlgorithm::DepthFirst, HeuristicKind::Null);

        assert_eq!(bfs.cost, 8.0);
        assert_eq!(ucs.cost, 8.0);
        assert_eq!(astar.cost, 8.0);
        assert!(dfs.cost >= 8.0 && dfs.cost < 999999.0);
        assert!(astar.expanded <= ucs.expanded);
    }

    #[test]
    fn test_stay_west_pays_more_than_stay_east() {
        let s = state(TINY_MAZE);
        let east = plan(&s, ProblemKind::StayEast, SearchAlgorithm::UniformCost, HeuristicKind::Null);
        let west = plan(&s, ProblemKind::StayWest, SearchAlgorithm::UniformCost, HeuristicKind::Null);
        assert!(east.cost < west.cost);
    }

    #[test]
    fn test_corners_plan_with_heuristic() {
        let s = state(TINY_CORNERS);
        let null = plan(&s, ProblemKind::Corners, SearchAlgorithm::AStar, HeuristicKind::Null);
        let informed = plan(&s, ProblemKind::Corners, SearchAlgorithm::AStar, HeuristicKind::Problem);
        assert!(!null.actions.is_empty());
        assert!(informed.expanded <= null.expanded);
        assert_eq!(informed.cost, informed.actions.len() as f64);
    }

    #[test]
    fn test_search_agent_replays_then_stops() {
        let s = state(TINY_SEARCH);
        let mut agent = SearchAgent::with_problem(
            ProblemKind::Food,
            SearchAlgorithm::AStar,
            HeuristicKind::Problem,
        );
        agent.register_initial_state(&s).unwrap();
        assert_eq!(agent.actions().len(), 7);

        let mut current = s;
        for _ in 0..7 {
            let action = agent.get_action(&current);
            current = current.generate_successor(0, action);
        }
        assert!(current.is_win());
        assert_eq!(agent.get_action(&current), Direction::Stop);
    }

    #[test]
    fn test_closest_dot_clears_board() {
        let s = state(TINY_SEARCH);
        let mut agent = ClosestDotSearchAgent::new();
        agent.register_initial_state(&s).unwrap();
        assert_eq!(agent.actions().len(), 7);
        assert_eq!(agent.actions()[0], Direction::West);
    }

    #[test]
    fn test_closest_dot_stops_on_unreachable_food() {
        let s = state("%%%%%%\n%P.%.%\n%%%%%%");
        let mut agent = ClosestDotSearchAgent::new();
        agent.register_initial_state(&s).unwrap();
        assert_eq!(agent.actions(), &[Direction::East]);
    }

    #[test]
    fn test_illegal_plan_is_fatal() {
        // A planner that walks into the wall.
        let s = state(TINY_SEARCH);
        let mut agent = SearchAgent::new(Box::new(|_: &PacmanState| Plan {
            actions: vec![Direction::North],
            cost: 1.0,
            expanded: 0,
        }));
        agent.register_initial_state(&s).unwrap();

        let mut agents: Vec<Box<dyn Agent<PacmanState>>> = vec![Box::new(agent)];
        let err = crate::game::run_game(s, &mut agents, 10).unwrap_err();
        assert!(matches!(err, Error::IllegalAction { agent: 0, action: Direction::North }));
    }
}
