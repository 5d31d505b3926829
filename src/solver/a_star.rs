use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;

use fnv::FnvHashMap;
use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

/// Index into the node arena
pub type NodeId = usize;

/// The problem being searched.
///
/// The engine knows nothing about the problem except what these methods tell it.
pub trait SearchDomain {
    type State: Clone + Eq + Hash + Debug;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Successors of `state` with the cost of getting to each of them.
    fn expand(&self, state: &Self::State) -> Vec<(Self::State, u32)>;

    /// Heuristic estimate of the cost to a goal - `&mut` so it can cache.
    fn evaluate(&mut self, state: &Self::State) -> u32;
}

/// Node of the search tree. Nodes are never removed so ids stay valid during the whole search.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    pub id: NodeId,
    pub state: S,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Cost from start
    pub g: u32,
    pub h: u32,
}

impl<S> SearchNode<S> {
    pub fn f(&self) -> u32 {
        self.g.saturating_add(self.h)
    }
}

/// Entries are compared field by field - lower `f` first, ties by lower `h`, then by creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenEntry {
    f: u32,
    h: u32,
    id: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A goal was reached - `path` is available.
    Solved,
    /// One node was expanded.
    Searching,
    /// Nothing left to expand.
    Exhausted,
}

/// A* over a generic [SearchDomain].
///
/// Call `reset` with a start state, then `step` until it returns something else than `Searching`
/// (or use `search` to do that).
///
/// With `goal_on_generation` the goal test is done when a state is generated instead of when
/// it's expanded - it finds solutions faster but they're not guaranteed to be optimal.
pub struct AStar<D: SearchDomain> {
    domain: D,
    goal_on_generation: bool,
    nodes: Vec<SearchNode<D::State>>,
    open: BinaryHeap<Reverse<OpenEntry>>,
    /// The node each known state currently belongs to
    visited: FnvHashMap<D::State, NodeId>,
    goal: Option<NodeId>,
    path: Option<Vec<D::State>>,
    stats: Stats,
}

impl<D: SearchDomain> AStar<D> {
    pub fn new(domain: D, goal_on_generation: bool) -> Self {
        Self {
            domain,
            goal_on_generation,
            nodes: Vec::new(),
            open: BinaryHeap::new(),
            visited: FnvHashMap::default(),
            goal: None,
            path: None,
            stats: Stats::new(),
        }
    }

    /// Throws away any previous search and starts a new one from `start`.
    pub fn reset(&mut self, start: D::State) {
        self.nodes.clear();
        self.open.clear();
        self.visited.clear();
        self.goal = None;
        self.path = None;
        self.stats = Stats::new();

        let root = self.add_node(None, start, 0);
        if self.goal_on_generation && self.domain.is_goal(&self.nodes[root].state) {
            debug!("Start is a goal");
            self.open.clear();
            self.found(root);
        }
    }

    /// Expands the best open node.
    pub fn step(&mut self) -> Step {
        if self.path.is_some() {
            return Step::Solved;
        }

        let cur = match self.open.pop() {
            Some(Reverse(entry)) => entry.id,
            None => return Step::Exhausted,
        };

        if !self.goal_on_generation && self.domain.is_goal(&self.nodes[cur].state) {
            self.found(cur);
            return Step::Solved;
        }

        let cur_g = self.nodes[cur].g;
        self.stats.add_expanded(cur_g);

        let successors = self.domain.expand(&self.nodes[cur].state);
        for (succ, cost) in successors {
            let g = cur_g.saturating_add(cost);

            if self.goal_on_generation && self.domain.is_goal(&succ) {
                let goal = self.add_node(Some(cur), succ, g);
                self.found(goal);
                return Step::Solved;
            }

            if let Some(&old) = self.visited.get(&succ) {
                if self.nodes[old].g <= g {
                    self.stats.add_duplicate(g);
                    continue;
                }
                debug!("Reopening {:?} - cost {} -> {}", succ, self.nodes[old].g, g);
                self.remove_open(old);
                self.stats.add_reopened(g);
            }
            self.add_node(Some(cur), succ, g);
        }

        Step::Searching
    }

    /// Runs until a goal is found or the open set is empty.
    pub fn search(&mut self) -> Step {
        loop {
            match self.step() {
                Step::Searching => {}
                done => return done,
            }
        }
    }

    /// States from start to goal (both inclusive) once solved.
    pub fn path(&self) -> Option<&[D::State]> {
        self.path.as_ref().map(Vec::as_slice)
    }

    pub fn into_path(self) -> Option<Vec<D::State>> {
        self.path
    }

    pub fn goal_node(&self) -> Option<&SearchNode<D::State>> {
        self.goal.map(|id| &self.nodes[id])
    }

    pub fn root(&self) -> Option<&SearchNode<D::State>> {
        self.nodes.first()
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<D::State> {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[SearchNode<D::State>] {
        &self.nodes
    }

    /// Size of the search tree counted by walking it from the root.
    pub fn num_nodes(&self) -> usize {
        let mut count = 0;
        let mut to_visit: Vec<NodeId> = self.root().map(|root| root.id).into_iter().collect();
        while let Some(id) = to_visit.pop() {
            count += 1;
            to_visit.extend(&self.nodes[id].children);
        }
        count
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    pub fn is_open(&self, id: NodeId) -> bool {
        self.open.iter().any(|Reverse(entry)| entry.id == id)
    }

    /// Whether the node is the current best known way to its state.
    pub fn is_current(&self, id: NodeId) -> bool {
        self.visited.get(&self.nodes[id].state) == Some(&id)
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn domain(&self) -> &D {
        &self.domain
    }

    fn add_node(&mut self, parent: Option<NodeId>, state: D::State, g: u32) -> NodeId {
        let h = self.domain.evaluate(&state);
        let id = self.nodes.len();
        let node = SearchNode {
            id,
            state,
            parent,
            children: Vec::new(),
            g,
            h,
        };
        self.open.push(Reverse(OpenEntry { f: node.f(), h, id }));
        self.visited.insert(node.state.clone(), id);
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        self.nodes.push(node);
        if self.stats.add_created(g) {
            debug!("Created new depth: {}", g);
        }
        id
    }

    /// The heap can't remove arbitrary entries so it's rebuilt without the node.
    fn remove_open(&mut self, id: NodeId) {
        let entries: Vec<_> = self
            .open
            .drain()
            .filter(|Reverse(entry)| entry.id != id)
            .collect();
        self.open = BinaryHeap::from(entries);
    }

    fn found(&mut self, goal: NodeId) {
        debug!("Solved, backtracking path");
        self.goal = Some(goal);
        self.path = Some(self.backtrack(goal));
    }

    fn backtrack(&self, last: NodeId) -> Vec<D::State> {
        let mut path = Vec::new();
        let mut cur = Some(last);
        while let Some(id) = cur {
            let node = &self.nodes[id];
            path.push(node.state.clone());
            cur = node.parent;
        }
        path.reverse();
        path
    }
}

impl<D> Debug for AStar<D>
where
    D: SearchDomain + Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AStar")
            .field("domain", &self.domain)
            .field("goal_on_generation", &self.goal_on_generation)
            .field("nodes", &self.nodes.len())
            .field("open", &self.open.len())
            .field("goal", &self.goal)
            .finish()
    }
}

/// Counts by depth (cost from start).
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Stats {
    created: Vec<u32>,
    expanded: Vec<u32>,
    reopened: Vec<u32>,
    duplicates: Vec<u32>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_created(&self) -> u32 {
        self.created.iter().sum()
    }

    pub fn total_expanded(&self) -> u32 {
        self.expanded.iter().sum()
    }

    pub fn total_reopened(&self) -> u32 {
        self.reopened.iter().sum()
    }

    pub fn total_duplicates(&self) -> u32 {
        self.duplicates.iter().sum()
    }

    /// Deepest level anything was expanded at
    pub fn max_expanded_depth(&self) -> Option<usize> {
        self.expanded.iter().rposition(|&cnt| cnt > 0)
    }

    pub fn created(&self) -> &[u32] {
        &self.created
    }

    pub fn expanded(&self) -> &[u32] {
        &self.expanded
    }

    /// Returns true when it's the first node at this depth.
    pub fn add_created(&mut self, depth: u32) -> bool {
        Self::add(&mut self.created, depth)
    }

    pub fn add_expanded(&mut self, depth: u32) -> bool {
        Self::add(&mut self.expanded, depth)
    }

    pub fn add_reopened(&mut self, depth: u32) -> bool {
        Self::add(&mut self.reopened, depth)
    }

    pub fn add_duplicate(&mut self, depth: u32) -> bool {
        Self::add(&mut self.duplicates, depth)
    }

    fn add(counts: &mut Vec<u32>, depth: u32) -> bool {
        let depth = depth as usize;
        let mut ret = false;

        // while because some depths might be skipped with non-unit costs
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn table(&self) -> Table {
        let depths = self
            .created
            .len()
            .max(self.expanded.len())
            .max(self.reopened.len())
            .max(self.duplicates.len());
        let at = |counts: &[u32], depth: usize| counts.get(depth).cloned().unwrap_or(0);

        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Expanded"),
            Cell::new("Reopened"),
            Cell::new("Duplicates"),
        ]));
        for depth in 0..depths {
            table.add_row(Row::new(vec![
                Cell::new(&depth.to_string()),
                Cell::new(&at(&self.created, depth).separated_string()),
                Cell::new(&at(&self.expanded, depth).separated_string()),
                Cell::new(&at(&self.reopened, depth).separated_string()),
                Cell::new(&at(&self.duplicates, depth).separated_string()),
            ]));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created)?;
        writeln!(f, "expanded by depth: {:?}", self.expanded)?;
        writeln!(f, "reopened by depth: {:?}", self.reopened)?;
        writeln!(f, "duplicates by depth: {:?}", self.duplicates)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total expanded: {}", self.total_expanded().separated_string())?;
        writeln!(f, "total reopened: {}", self.total_reopened().separated_string())?;
        writeln!(f, "total duplicates: {}", self.total_duplicates().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.total_created().separated_string())?;
        writeln!(f, "States expanded total: {}", self.total_expanded().separated_string())?;
        writeln!(f, "States reopened total: {}", self.total_reopened().separated_string())?;
        writeln!(f, "Reached duplicates total: {}", self.total_duplicates().separated_string())?;
        writeln!(f)?;
        write!(f, "{}", self.table())
    }
}
