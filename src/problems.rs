//! Concrete search problems on a maze and the heuristics that go with them.
//!
//! Problems borrow the wall grid of the game they were built from. Step costs
//! come from an explicit [`CostFn`] handed to the constructor.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::warn;

use crate::constants::{DEFAULT_GOAL, NO_PATH_COST};
use crate::directions::Direction;
use crate::distance::{manhattan, maze};
use crate::grid::{Grid, Position};
use crate::pacman::PacmanState;
use crate::search::SearchProblem;

/// Cost of stepping onto a square.
pub type CostFn = fn(Position) -> f64;

/// Every step costs 1.
pub fn unit_cost(_pos: Position) -> f64 {
    1.0
}

/// Steps get cheaper further east, so paths drift east.
pub fn stay_east_cost((x, _): Position) -> f64 {
    0.5_f64.powi(x as i32)
}

/// Steps get cheaper further west, so paths drift west.
pub fn stay_west_cost((x, _): Position) -> f64 {
    2.0_f64.powi(x as i32)
}

/// Open squares reachable from `pos` in one move, in [`Direction::CARDINAL`] order.
fn open_moves(walls: &Grid<bool>, pos: Position) -> impl Iterator<Item = (Position, Direction)> + '_ {
    Direction::CARDINAL
        .into_iter()
        .filter_map(move |d| d.apply(pos).map(|next| (next, d)))
        .filter(|&(next, _)| !walls.is_set(next))
}

/// Follow `actions` from `start`, returning the visited squares, or `None`
/// if the walk enters a wall.
fn trace(walls: &Grid<bool>, start: Position, actions: &[Direction]) -> Option<Vec<Position>> {
    let mut pos = start;
    let mut visited = Vec::with_capacity(actions.len());
    for action in actions {
        pos = action.apply(pos).filter(|&p| !walls.is_set(p))?;
        visited.push(pos);
    }
    Some(visited)
}

// =============================================================================
// Position search
// =============================================================================

/// Find a path to one fixed square.
pub struct PositionSearchProblem<'a> {
    walls: &'a Grid<bool>,
    start: Position,
    goal: Position,
    cost_fn: CostFn,
    expanded: Cell<usize>,
}

impl<'a> PositionSearchProblem<'a> {
    pub fn new(walls: &'a Grid<bool>, start: Position, goal: Position, cost_fn: CostFn) -> Self {
        Self {
            walls,
            start,
            goal,
            cost_fn,
            expanded: Cell::new(0),
        }
    }

    /// Path from Pacman to the default goal `(1, 1)` with unit costs.
    pub fn from_state(state: &'a PacmanState) -> Self {
        Self::with_cost(state, unit_cost)
    }

    pub fn with_cost(state: &'a PacmanState, cost_fn: CostFn) -> Self {
        Self::new(state.walls(), state.pacman_position(), DEFAULT_GOAL, cost_fn)
    }

    pub fn goal(&self) -> Position {
        self.goal
    }
}

impl SearchProblem for PositionSearchProblem<'_> {
    type State = Position;
    type Action = Direction;

    fn starting_state(&self) -> Position {
        self.start
    }

    fn is_goal(&self, state: &Position) -> bool {
        *state == self.goal
    }

    fn successor_states(&self, state: &Position) -> Vec<(Position, Direction, f64)> {
        self.expanded.set(self.expanded.get() + 1);
        open_moves(self.walls, *state)
            .map(|(next, d)| (next, d, (self.cost_fn)(next)))
            .collect()
    }

    fn expanded(&self) -> usize {
        self.expanded.get()
    }

    fn actions_cost(&self, actions: &[Direction]) -> f64 {
        match trace(self.walls, self.start, actions) {
            Some(squares) => squares.into_iter().map(self.cost_fn).sum(),
            None => NO_PATH_COST,
        }
    }
}

/// Manhattan distance to the goal of a position search.
pub fn manhattan_heuristic(state: &Position, problem: &PositionSearchProblem<'_>) -> f64 {
    manhattan(*state, problem.goal()) as f64
}

// =============================================================================
// Any food
// =============================================================================

/// Find a path to the nearest food pellet.
pub struct AnyFoodSearchProblem<'a> {
    inner: PositionSearchProblem<'a>,
    food: &'a Grid<bool>,
}

impl<'a> AnyFoodSearchProblem<'a> {
    pub fn new(walls: &'a Grid<bool>, food: &'a Grid<bool>, start: Position) -> Self {
        Self {
            inner: PositionSearchProblem::new(walls, start, start, unit_cost),
            food,
        }
    }

    pub fn from_state(state: &'a PacmanState) -> Self {
        Self::new(state.walls(), state.food(), state.pacman_position())
    }
}

impl SearchProblem for AnyFoodSearchProblem<'_> {
    type State = Position;
    type Action = Direction;

    fn starting_state(&self) -> Position {
        self.inner.starting_state()
    }

    fn is_goal(&self, state: &Position) -> bool {
        self.food.get(*state).copied().unwrap_or(false)
    }

    fn successor_states(&self, state: &Position) -> Vec<(Position, Direction, f64)> {
        self.inner.successor_states(state)
    }

    fn expanded(&self) -> usize {
        self.inner.expanded()
    }

    fn actions_cost(&self, actions: &[Direction]) -> f64 {
        self.inner.actions_cost(actions)
    }
}

// =============================================================================
// Corners
// =============================================================================

/// Position plus which of the four corners have been visited.
pub type CornersState = (Position, [bool; 4]);

/// Find a shortest path that touches all four corners of the maze.
pub struct CornersProblem<'a> {
    walls: &'a Grid<bool>,
    start: Position,
    corners: [Position; 4],
    cost_fn: CostFn,
    expanded: Cell<usize>,
}

impl<'a> CornersProblem<'a> {
    pub fn new(walls: &'a Grid<bool>, food: &Grid<bool>, start: Position, cost_fn: CostFn) -> Self {
        let top = walls.height().saturating_sub(2);
        let right = walls.width().saturating_sub(2);
        let corners = [(1, 1), (1, top), (right, 1), (right, top)];
        for corner in corners {
            if !food.get(corner).copied().unwrap_or(false) {
                warn!("no food in corner {corner:?}");
            }
        }

        Self {
            walls,
            start,
            corners,
            cost_fn,
            expanded: Cell::new(0),
        }
    }

    pub fn from_state(state: &'a PacmanState) -> Self {
        Self::new(state.walls(), state.food(), state.pacman_position(), unit_cost)
    }

    pub fn corners(&self) -> &[Position; 4] {
        &self.corners
    }

    fn mark(&self, pos: Position, visited: [bool; 4]) -> [bool; 4] {
        let mut visited = visited;
        for (seen, corner) in visited.iter_mut().zip(self.corners) {
            if corner == pos {
                *seen = true;
            }
        }
        visited
    }
}

impl SearchProblem for CornersProblem<'_> {
    type State = CornersState;
    type Action = Direction;

    fn starting_state(&self) -> CornersState {
        (self.start, [false; 4])
    }

    fn is_goal(&self, (_, visited): &CornersState) -> bool {
        visited.iter().all(|&v| v)
    }

    fn successor_states(&self, &(pos, visited): &CornersState) -> Vec<(CornersState, Direction, f64)> {
        self.expanded.set(self.expanded.get() + 1);
        open_moves(self.walls, pos)
            .map(|(next, d)| ((next, self.mark(next, visited)), d, (self.cost_fn)(next)))
            .collect()
    }

    fn expanded(&self) -> usize {
        self.expanded.get()
    }

    fn actions_cost(&self, actions: &[Direction]) -> f64 {
        match trace(self.walls, self.start, actions) {
            Some(_) => actions.len() as f64,
            None => NO_PATH_COST,
        }
    }
}

/// Greedy tour length over the unvisited corners.
///
/// Repeatedly walks to the nearest remaining corner by Manhattan distance.
/// This is not guaranteed to be admissible: the greedy chain can be longer
/// than the best ordering of the corners.
pub fn corners_heuristic(&(pos, visited): &CornersState, problem: &CornersProblem<'_>) -> f64 {
    let mut remaining: Vec<Position> = problem
        .corners()
        .iter()
        .zip(visited)
        .filter(|&(_, seen)| !seen)
        .map(|(&c, _)| c)
        .collect();

    let mut here = pos;
    let mut total = 0;
    while !remaining.is_empty() {
        // min_by_key keeps the first of equal minima.
        let (i, dist) = remaining
            .iter()
            .enumerate()
            .map(|(i, &c)| (i, manhattan(here, c)))
            .min_by_key(|&(_, d)| d)
            .unwrap_or((0, 0));
        here = remaining.remove(i);
        total += dist;
    }
    total as f64
}

// =============================================================================
// Eat all food
// =============================================================================

/// Position plus the food still on the board.
pub type FoodSearchState = (Position, Grid<bool>);

/// Find a path that eats every food pellet.
pub struct FoodSearchProblem<'a> {
    walls: &'a Grid<bool>,
    start: FoodSearchState,
    expanded: Cell<usize>,
    maze_cache: RefCell<HashMap<(Position, Position), usize>>,
}

impl<'a> FoodSearchProblem<'a> {
    pub fn new(walls: &'a Grid<bool>, food: Grid<bool>, start: Position) -> Self {
        let mut food = food;
        if food.get(start).copied().unwrap_or(false) {
            food[start] = false;
        }
        Self {
            walls,
            start: (start, food),
            expanded: Cell::new(0),
            maze_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn from_state(state: &'a PacmanState) -> Self {
        Self::new(state.walls(), state.food().clone(), state.pacman_position())
    }

    /// Maze distance, memoised for the lifetime of the problem.
    pub fn maze_distance(&self, a: Position, b: Position) -> usize {
        if let Some(&d) = self.maze_cache.borrow().get(&(a, b)) {
            return d;
        }
        let d = maze(a, b, self.walls);
        self.maze_cache.borrow_mut().insert((a, b), d);
        d
    }
}

impl SearchProblem for FoodSearchProblem<'_> {
    type State = FoodSearchState;
    type Action = Direction;

    fn starting_state(&self) -> FoodSearchState {
        self.start.clone()
    }

    fn is_goal(&self, (_, food): &FoodSearchState) -> bool {
        food.count() == 0
    }

    fn successor_states(&self, (pos, food): &FoodSearchState) -> Vec<(FoodSearchState, Direction, f64)> {
        self.expanded.set(self.expanded.get() + 1);
        open_moves(self.walls, *pos)
            .map(|(next, d)| {
                let mut food = food.clone();
                food[next] = false;
                ((next, food), d, 1.0)
            })
            .collect()
    }

    fn expanded(&self) -> usize {
        self.expanded.get()
    }

    fn actions_cost(&self, actions: &[Direction]) -> f64 {
        match trace(self.walls, self.start.0, actions) {
            Some(_) => actions.len() as f64,
            None => NO_PATH_COST,
        }
    }
}

/// Maze distance to the farthest remaining pellet.
pub fn food_heuristic((pos, food): &FoodSearchState, problem: &FoodSearchProblem<'_>) -> f64 {
    food.as_list()
        .into_iter()
        .map(|pellet| problem.maze_distance(*pos, pellet))
        .max()
        .unwrap_or(0) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Layout, TINY_CORNERS, TINY_MAZE, TINY_SEARCH};
    use crate::search::{a_star_search, breadth_first_search, uniform_cost_search};

    const OPEN_ROOM: &str = "\
%%%%%
%P .%
%   %
%. .%
%%%%%";

    #[test]
    fn test_position_successors_skip_walls() {
        let layout: Layout = TINY_MAZE.parse().unwrap();
        let problem = PositionSearchProblem::new(&layout.walls, (5, 5), (1, 1), unit_cost);
        let succ = problem.successor_states(&(5, 5));
        let moves: Vec<_> = succ.iter().map(|(_, d, _)| *d).collect();
        assert_eq!(moves, vec![Direction::South, Direction::West]);
        assert_eq!(problem.expanded(), 1);
    }

    #[test]
    fn test_position_actions_cost() {
        let layout: Layout = TINY_MAZE.parse().unwrap();
        let problem = PositionSearchProblem::new(&layout.walls, (5, 5), (1, 1), unit_cost);
        assert_eq!(problem.actions_cost(&[Direction::West, Direction::West]), 2.0);
        assert_eq!(problem.actions_cost(&[Direction::North]), NO_PATH_COST);
    }

    #[test]
    fn test_stay_east_prefers_east() {
        assert!(stay_east_cost((5, 1)) < stay_east_cost((1, 1)));
        assert!(stay_west_cost((1, 1)) < stay_west_cost((5, 1)));
    }

    #[test]
    fn test_manhattan_heuristic_astar_is_optimal() {
        let layout: Layout = TINY_MAZE.parse().unwrap();
        let problem = PositionSearchProblem::new(&layout.walls, (5, 5), (1, 1), unit_cost);
        let path = a_star_search(&problem, manhattan_heuristic);
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn test_corner_start_is_not_visited() {
        let layout: Layout = TINY_CORNERS.parse().unwrap();
        let problem = CornersProblem::new(&layout.walls, &layout.food, (1, 1), unit_cost);
        let (_, visited) = problem.starting_state();
        assert_eq!(visited, [false; 4]);
    }

    #[test]
    fn test_corner_start_tour_returns_to_start() {
        // Pacman starts on the top-left corner (1, 3) of an open 3x3 room.
        let layout: Layout = OPEN_ROOM.parse().unwrap();
        assert_eq!(layout.pacman_start, (1, 3));
        let problem = CornersProblem::new(&layout.walls, &layout.food, layout.pacman_start, unit_cost);
        let path = breadth_first_search(&problem);

        // Three corners 2 apart, plus leaving and re-entering the start corner.
        assert_eq!(path.len(), 8);
        let squares = trace(&layout.walls, layout.pacman_start, &path).unwrap();
        assert!(squares.contains(&(1, 3)));
        for corner in problem.corners() {
            assert!(squares.contains(corner), "{corner:?} not visited");
        }
    }

    #[test]
    fn test_corners_heuristic_from_corner_start() {
        let layout: Layout = OPEN_ROOM.parse().unwrap();
        let problem = CornersProblem::new(&layout.walls, &layout.food, layout.pacman_start, unit_cost);
        let optimal = uniform_cost_search(&problem).len() as f64;

        // Start corner at distance 0, then (1, 1), (3, 1), (3, 3) at 2 each.
        let h = corners_heuristic(&problem.starting_state(), &problem);
        assert_eq!(h, 6.0);
        assert!(h <= optimal);
    }

    #[test]
    fn test_corners_layout_geometry() {
        let layout: Layout = TINY_CORNERS.parse().unwrap();
        let problem = CornersProblem::new(&layout.walls, &layout.food, layout.pacman_start, unit_cost);
        assert_eq!(problem.corners(), &[(1, 1), (1, 6), (6, 1), (6, 6)]);
    }

    #[test]
    fn test_corners_bfs_visits_all_corners() {
        let layout: Layout = TINY_CORNERS.parse().unwrap();
        let problem = CornersProblem::new(&layout.walls, &layout.food, layout.pacman_start, unit_cost);
        let path = breadth_first_search(&problem);
        assert!(!path.is_empty());

        let squares = trace(&layout.walls, layout.pacman_start, &path).unwrap();
        for corner in problem.corners() {
            assert!(squares.contains(corner), "{corner:?} not visited");
        }
        assert_eq!(problem.actions_cost(&path), path.len() as f64);
    }

    #[test]
    fn test_corners_heuristic_bounds() {
        let layout: Layout = TINY_CORNERS.parse().unwrap();
        let problem = CornersProblem::new(&layout.walls, &layout.food, layout.pacman_start, unit_cost);
        let optimal = uniform_cost_search(&problem).len() as f64;

        let start = problem.starting_state();
        let h = corners_heuristic(&start, &problem);
        assert_eq!(h, 18.0);
        assert!(h <= optimal);

        assert_eq!(corners_heuristic(&((3, 3), [true; 4]), &problem), 0.0);
    }

    #[test]
    fn test_corners_astar_finds_a_tour() {
        let layout: Layout = TINY_CORNERS.parse().unwrap();
        let problem = CornersProblem::new(&layout.walls, &layout.food, layout.pacman_start, unit_cost);
        let ucs = uniform_cost_search(&problem);
        let astar = a_star_search(&problem, corners_heuristic);
        assert!(astar.len() >= ucs.len());

        let squares = trace(&layout.walls, layout.pacman_start, &astar).unwrap();
        assert!(problem.corners().iter().all(|c| squares.contains(c)));
    }

    #[test]
    fn test_any_food_goal() {
        let layout: Layout = TINY_SEARCH.parse().unwrap();
        let problem = AnyFoodSearchProblem::new(&layout.walls, &layout.food, layout.pacman_start);
        assert_eq!(uniform_cost_search(&problem), vec![Direction::West]);
    }

    #[test]
    fn test_food_heuristic_is_max_maze_distance() {
        let layout: Layout = TINY_SEARCH.parse().unwrap();
        let problem = FoodSearchProblem::new(&layout.walls, layout.food.clone(), layout.pacman_start);
        let start = problem.starting_state();
        assert_eq!(food_heuristic(&start, &problem), 5.0);

        let empty = Grid::new(layout.width(), layout.height(), false);
        assert_eq!(food_heuristic(&(layout.pacman_start, empty), &problem), 0.0);
    }

    #[test]
    fn test_food_search_astar_optimal() {
        let layout: Layout = TINY_SEARCH.parse().unwrap();
        let problem = FoodSearchProblem::new(&layout.walls, layout.food.clone(), layout.pacman_start);
        let astar = a_star_search(&problem, food_heuristic);
        let ucs = uniform_cost_search(&problem);
        assert_eq!(astar.len(), 7);
        assert_eq!(ucs.len(), 7);
    }
}
