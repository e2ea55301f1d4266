//! A compact Pacman game engine implementing [`GameState`].
//!
//! Rules:
//! - every Pacman move (including `Stop`) costs [`TIME_PENALTY`]
//! - eating food scores [`FOOD_REWARD`]; clearing the board adds [`WIN_REWARD`] and wins
//! - eating a capsule scares every ghost for [`SCARED_TIME`] ghost moves
//! - meeting a dangerous ghost costs [`LOSE_PENALTY`] and loses
//! - meeting a scared ghost scores [`GHOST_EAT_REWARD`] and sends it back to its start
//!
//! Pacman may stop; ghosts may not, and only reverse when there is no other way.

use std::fmt;
use std::rc::Rc;

use crate::constants::{
    CAPSULE, EMPTY, FOOD, FOOD_REWARD, GHOST, GHOST_EAT_REWARD, LOSE_PENALTY, PACMAN,
    SCARED_TIME, TIME_PENALTY, WALL, WIN_REWARD,
};
use crate::directions::Direction;
use crate::game::GameState;
use crate::grid::{Grid, Position};
use crate::layout::Layout;

/// Position and status of one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentState {
    start: Position,
    position: Position,
    direction: Direction,
    scared_timer: u32,
}

impl AgentState {
    fn new(start: Position) -> Self {
        Self {
            start,
            position: start,
            direction: Direction::Stop,
            scared_timer: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Ghost moves left before this ghost is dangerous again.
    pub fn scared_timer(&self) -> u32 {
        self.scared_timer
    }
}

/// Full game state. Cloning is cheap apart from the food grid.
#[derive(Clone, Debug)]
pub struct PacmanState {
    walls: Rc<Grid<bool>>,
    food: Grid<bool>,
    capsules: Vec<Position>,
    /// Index 0 is Pacman.
    agents: Vec<AgentState>,
    score: f64,
    win: bool,
    lose: bool,
}

impl PacmanState {
    /// Initial state of `layout` with every ghost it places.
    pub fn new(layout: &Layout) -> Self {
        Self::with_ghost_limit(layout, usize::MAX)
    }

    /// Initial state of `layout` keeping at most `max_ghosts` ghosts.
    pub fn with_ghost_limit(layout: &Layout, max_ghosts: usize) -> Self {
        let agents = std::iter::once(layout.pacman_start)
            .chain(layout.ghost_starts.iter().copied().take(max_ghosts))
            .map(AgentState::new)
            .collect();

        Self {
            walls: Rc::new(layout.walls.clone()),
            food: layout.food.clone(),
            capsules: layout.capsules.clone(),
            agents,
            score: 0.0,
            win: false,
            lose: false,
        }
    }

    pub fn walls(&self) -> &Grid<bool> {
        &self.walls
    }

    pub fn food(&self) -> &Grid<bool> {
        &self.food
    }

    pub fn has_food(&self, pos: Position) -> bool {
        self.food.get(pos).copied().unwrap_or(false)
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn pacman_position(&self) -> Position {
        self.agents[0].position
    }

    pub fn ghost_states(&self) -> &[AgentState] {
        &self.agents[1..]
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_win(&self) -> bool {
        self.win
    }

    pub fn is_lose(&self) -> bool {
        self.lose
    }

    pub fn generate_pacman_successor(&self, action: Direction) -> Self {
        self.generate_successor(0, action)
    }

    /// Where `action` takes an agent standing on `pos`. Walls block the move.
    fn step(&self, pos: Position, action: Direction) -> Position {
        action
            .apply(pos)
            .filter(|&p| !self.walls.is_set(p))
            .unwrap_or(pos)
    }

    fn move_pacman(&mut self, action: Direction) {
        let pos = self.step(self.pacman_position(), action);
        let pacman = &mut self.agents[0];
        pacman.position = pos;
        if action != Direction::Stop {
            pacman.direction = action;
        }

        self.score -= TIME_PENALTY;

        if self.has_food(pos) {
            self.food[pos] = false;
            self.score += FOOD_REWARD;
            if self.food.count() == 0 {
                self.score += WIN_REWARD;
                self.win = true;
            }
        }

        if let Some(i) = self.capsules.iter().position(|&c| c == pos) {
            self.capsules.remove(i);
            for ghost in &mut self.agents[1..] {
                ghost.scared_timer = SCARED_TIME;
            }
        }

        for ghost in 1..self.agents.len() {
            self.check_collision(ghost);
        }
    }

    fn move_ghost(&mut self, index: usize, action: Direction) {
        let pos = self.step(self.agents[index].position, action);
        let ghost = &mut self.agents[index];
        ghost.position = pos;
        ghost.direction = action;
        ghost.scared_timer = ghost.scared_timer.saturating_sub(1);

        self.check_collision(index);
    }

    fn check_collision(&mut self, index: usize) {
        if self.win || self.lose || self.agents[index].position != self.pacman_position() {
            return;
        }

        let ghost = &mut self.agents[index];
        if ghost.scared_timer > 0 {
            ghost.position = ghost.start;
            ghost.direction = Direction::Stop;
            ghost.scared_timer = 0;
            self.score += GHOST_EAT_REWARD;
        } else {
            self.score -= LOSE_PENALTY;
            self.lose = true;
        }
    }

    fn open_directions(&self, pos: Position) -> impl Iterator<Item = Direction> + '_ {
        Direction::CARDINAL
            .into_iter()
            .filter(move |d| d.apply(pos).is_some_and(|p| !self.walls.is_set(p)))
    }
}

impl GameState for PacmanState {
    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.is_over() || agent >= self.agents.len() {
            return Vec::new();
        }

        let state = &self.agents[agent];
        let mut actions: Vec<Direction> = self.open_directions(state.position).collect();

        if agent == 0 {
            actions.push(Direction::Stop);
            return actions;
        }

        let reverse = state.direction.reverse();
        if actions.len() > 1 {
            actions.retain(|&d| d != reverse);
        }
        if actions.is_empty() {
            actions.push(Direction::Stop);
        }
        actions
    }

    fn generate_successor(&self, agent: usize, action: Direction) -> Self {
        let mut next = self.clone();
        if self.is_over() {
            return next;
        }
        if agent == 0 {
            next.move_pacman(action);
        } else {
            next.move_ghost(agent, action);
        }
        next
    }

    fn is_over(&self) -> bool {
        self.win || self.lose
    }

    fn num_agents(&self) -> usize {
        self.agents.len()
    }
}

impl fmt::Display for PacmanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.walls.height()).rev() {
            for x in 0..self.walls.width() {
                let pos = (x, y);
                let ch = if pos == self.pacman_position() {
                    PACMAN
                } else if self.ghost_states().iter().any(|g| g.position == pos) {
                    GHOST
                } else if self.walls[pos] {
                    WALL
                } else if self.food[pos] {
                    FOOD
                } else if self.capsules.contains(&pos) {
                    CAPSULE
                } else {
                    EMPTY
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "Score: {}", self.score)
    }
}
