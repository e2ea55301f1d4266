//! Generic graph search: depth-first, breadth-first, uniform-cost and A*.
//!
//! All four share one loop and differ only in the fringe they use and in how
//! a successor's priority is computed. Each state is expanded at most once;
//! the action path is rebuilt from a predecessor map once a goal is popped.
//!
//! A search that finds no goal returns an empty action list. The same is
//! returned when the start state is already a goal, so callers that need to
//! tell the two apart should test the start state themselves.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::debug;

use crate::fringe::{Fringe, PriorityQueue, Queue, Stack};

/// A search problem: a start state, a goal test and a successor function.
pub trait SearchProblem {
    type State: Clone + Eq + Hash;
    type Action: Clone + Eq + Hash;

    fn starting_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Successors of `state` as `(next state, action, step cost)`.
    fn successor_states(&self, state: &Self::State) -> Vec<(Self::State, Self::Action, f64)>;

    /// Number of states expanded so far, for problems that keep count.
    fn expanded(&self) -> usize {
        0
    }

    /// Total cost of an action sequence from the start state.
    fn actions_cost(&self, actions: &[Self::Action]) -> f64 {
        actions.len() as f64
    }
}

/// A node on the fringe.
struct Node<S, A> {
    state: S,
    action: Option<A>,
    cost: f64,
    parent: Option<(S, Option<A>)>,
}

/// Key of the predecessor map: a state and the action that reached it.
type Link<S, A> = (S, Option<A>);

/// Search the deepest nodes first.
pub fn depth_first_search<P: SearchProblem>(problem: &P) -> Vec<P::Action> {
    graph_search(problem, Stack::new(), |_, _| 0.0)
}

/// Search the shallowest nodes first.
pub fn breadth_first_search<P: SearchProblem>(problem: &P) -> Vec<P::Action> {
    graph_search(problem, Queue::new(), |_, _| 0.0)
}

/// Search the node of least total path cost first.
pub fn uniform_cost_search<P: SearchProblem>(problem: &P) -> Vec<P::Action> {
    graph_search(problem, PriorityQueue::new(), |_, _| 0.0)
}

/// Search the node with the lowest path cost plus heuristic estimate first.
///
/// The result is optimal only if `heuristic` never overestimates.
pub fn a_star_search<P, H>(problem: &P, heuristic: H) -> Vec<P::Action>
where
    P: SearchProblem,
    H: Fn(&P::State, &P) -> f64,
{
    graph_search(problem, PriorityQueue::new(), heuristic)
}

/// The trivial heuristic.
pub fn null_heuristic<S, P>(_state: &S, _problem: &P) -> f64 {
    0.0
}

fn graph_search<P, F, H>(problem: &P, mut fringe: F, heuristic: H) -> Vec<P::Action>
where
    P: SearchProblem,
    F: Fringe<Node<P::State, P::Action>>,
    H: Fn(&P::State, &P) -> f64,
{
    let mut expanded: HashSet<P::State> = HashSet::new();
    let mut predecessors: HashMap<Link<P::State, P::Action>, Option<Link<P::State, P::Action>>> =
        HashMap::new();

    fringe.add(
        Node {
            state: problem.starting_state(),
            action: None,
            cost: 0.0,
            parent: None,
        },
        0.0,
    );

    while let Some(node) = fringe.take() {
        if expanded.contains(&node.state) {
            continue;
        }
        expanded.insert(node.state.clone());
        predecessors.insert((node.state.clone(), node.action.clone()), node.parent.clone());

        if problem.is_goal(&node.state) {
            debug!("goal found after expanding {} states", expanded.len());
            return reconstruct_path(&predecessors, node.action, node.parent);
        }

        for (next, action, step_cost) in problem.successor_states(&node.state) {
            if expanded.contains(&next) {
                continue;
            }
            let cost = node.cost + step_cost;
            let priority = cost + heuristic(&next, problem);
            fringe.add(
                Node {
                    state: next,
                    action: Some(action),
                    cost,
                    parent: Some((node.state.clone(), node.action.clone())),
                },
                priority,
            );
        }
    }

    debug!("no goal reachable; expanded {} states", expanded.len());
    Vec::new()
}

/// Walk the predecessor links back to the start and return actions in order.
fn reconstruct_path<S, A>(
    predecessors: &HashMap<Link<S, A>, Option<Link<S, A>>>,
    goal_action: Option<A>,
    goal_parent: Option<Link<S, A>>,
) -> Vec<A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    let mut path: Vec<A> = goal_action.into_iter().collect();
    let mut link = goal_parent;
    while let Some(key) = link {
        if let Some(action) = &key.1 {
            path.push(action.clone());
        }
        link = predecessors.get(&key).cloned().flatten();
    }
    path.reverse();
    path
}
