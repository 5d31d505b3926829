use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};
use std::io::{self, Write};

use dot::{self, Edges, GraphWalk, Id, LabelText, Labeller, Nodes, Style};
use fnv::FnvHashSet;

use crate::config::{HeuristicKind, SolverConfig};
use crate::puzzle::Puzzle;
use crate::rules::PuzzleRules;
use crate::solver::a_star::{AStar, NodeId, SearchDomain, Step};
use crate::solver::heuristic;
use crate::solver::SokobanSearch;
use crate::state::State;

type Nd = NodeId;
type Ed = (NodeId, NodeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Type {
    /// On the path to the goal
    Solution,
    /// Replaced by a cheaper node with the same state
    Superseded,
    Open,
    Expanded,
}

/// The search tree of an `AStar` in Graphviz format.
pub struct SearchTree<'a, D: SearchDomain> {
    a_star: &'a AStar<D>,
    label: Box<dyn Fn(&D::State) -> String + 'a>,
    types: Vec<Type>,
    edges: Vec<Ed>,
}

impl<'a, D: SearchDomain> SearchTree<'a, D> {
    pub fn new<F>(a_star: &'a AStar<D>, label: F) -> Self
    where
        F: Fn(&D::State) -> String + 'a,
    {
        let mut solution = FnvHashSet::default();
        let mut cur = a_star.goal_node();
        while let Some(node) = cur {
            solution.insert(node.id);
            cur = node.parent.map(|id| a_star.node(id));
        }

        let types = a_star
            .nodes()
            .iter()
            .map(|node| {
                if solution.contains(&node.id) {
                    Type::Solution
                } else if !a_star.is_current(node.id) {
                    Type::Superseded
                } else if a_star.is_open(node.id) {
                    Type::Open
                } else {
                    Type::Expanded
                }
            })
            .collect();

        let edges = a_star
            .nodes()
            .iter()
            .flat_map(|node| node.children.iter().map(move |&child| (node.id, child)))
            .collect();

        Self {
            a_star,
            label: Box::new(label),
            types,
            edges,
        }
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        dot::render(self, out)
    }
}

impl<D: SearchDomain> Debug for SearchTree<'_, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchTree")
            .field("nodes", &self.types.len())
            .field("edges", &self.edges.len())
            .finish()
    }
}

/// Solves the puzzle and renders whatever the search tree looks like at the end.
pub fn render_search<W: Write>(
    puzzle: &Puzzle,
    heuristic: HeuristicKind,
    config: &SolverConfig,
    out: &mut W,
) -> io::Result<()> {
    let rules = PuzzleRules::new(&puzzle.map);
    let h = heuristic::create(heuristic, &puzzle.map, config.mode);
    let domain = SokobanSearch::new(rules, config.mode, h);
    let mut a_star = AStar::new(domain, config.goal_on_generation);
    a_star.reset(puzzle.state.clone());
    for _ in 0..config.max_iters {
        if a_star.step() != Step::Searching {
            break;
        }
    }

    let map = &puzzle.map;
    let tree = SearchTree::new(&a_star, move |state: &State| map.format_with_state(state).to_string());
    tree.render(out)
}

impl<'a, D: SearchDomain> GraphWalk<'a, Nd, Ed> for SearchTree<'a, D> {
    fn nodes(&'a self) -> Nodes<'a, Nd> {
        (0..self.types.len()).collect()
    }

    fn edges(&'a self) -> Edges<'a, Ed> {
        Cow::from(&self.edges)
    }

    fn source(&'a self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&'a self, e: &Ed) -> Nd {
        e.1
    }
}

impl<'a, D: SearchDomain> Labeller<'a, Nd, Ed> for SearchTree<'a, D> {
    fn graph_id(&'a self) -> Id<'a> {
        Id::new("search_tree").unwrap()
    }

    fn node_id(&'a self, n: &Nd) -> Id<'a> {
        Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&'a self, n: &Nd) -> LabelText<'a> {
        let node = self.a_star.node(*n);
        LabelText::EscStr(
            format!(
                "g: {}, h: {}\nf: {}\n{}",
                node.g,
                node.h,
                node.f(),
                (self.label)(&node.state)
            )
            .into(),
        )
    }

    fn node_style(&'a self, n: &Nd) -> Style {
        if self.types[*n] == Type::Open {
            Style::Solid
        } else {
            Style::Filled
        }
    }

    fn node_color(&'a self, n: &Nd) -> Option<LabelText<'a>> {
        Some(LabelText::LabelStr(
            match self.types[*n] {
                Type::Solution => "red",
                Type::Superseded => "gray",
                Type::Expanded => "lightblue",
                Type::Open => return None,
            }
            .into(),
        ))
    }
}
