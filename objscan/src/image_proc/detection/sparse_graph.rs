//! Explicit sparse graph of foreground cells.
//!
//! Every foreground cell becomes a [`CellNode`] in an arena. Nodes refer to
//! their up/down/left/right foreground neighbors and to the next node in
//! row-major creation order through [`NodeId`] indices, never through owning
//! references, so the whole structure is a plain `Vec` dropped together with
//! the [`CellGraph`] that built it.
//!
//! The graph supports a second detection mode that reports, per region, its
//! area and its boundary cells: nodes with at least one missing link (grid
//! edge or background neighbor).

use ndarray::Array2;
use serde::Serialize;

use crate::image_proc::detection::aabb::BoundingBox;
use crate::image_proc::grid::{BinaryGrid, Cell, Direction};

/// Index of a node inside its [`CellGraph`].
pub type NodeId = usize;

/// Neighbor links of a node; `None` means grid edge or background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Links {
    pub up: Option<NodeId>,
    pub down: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl Links {
    pub fn get(&self, direction: Direction) -> Option<NodeId> {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn set(&mut self, direction: Direction, node: NodeId) {
        let slot = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        *slot = Some(node);
    }

    /// `true` when all four neighbors are present.
    pub fn is_complete(&self) -> bool {
        Direction::ALL.iter().all(|&dir| self.get(dir).is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellNode {
    pub id: NodeId,
    pub cell: Cell,
    pub links: Links,
    /// Next node in row-major creation order.
    pub next: Option<NodeId>,
}

impl CellNode {
    /// Boundary predicate: at least one of the four links is absent.
    pub fn is_boundary(&self) -> bool {
        !self.links.is_complete()
    }
}

/// Visited flags indexed by node identity, shared across one full pass.
#[derive(Debug, Clone)]
pub struct VisitedNodes {
    flags: Vec<bool>,
}

impl VisitedNodes {
    pub fn contains(&self, id: NodeId) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Mark `id` visited. Returns `false` if it already was.
    pub fn insert(&mut self, id: NodeId) -> bool {
        match self.flags.get_mut(id) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&v| v).count()
    }
}

/// Result of walking one connected component of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentTrace {
    /// Cell of the node the walk started from.
    pub seed: Cell,
    /// Number of nodes visited.
    pub area: usize,
    /// Boundary cells in emission order.
    pub boundary: Vec<Cell>,
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    next_direction: usize,
    on_boundary: bool,
}

impl Frame {
    fn new(node: NodeId) -> Self {
        Self {
            node,
            next_direction: 0,
            on_boundary: false,
        }
    }
}

/// Arena of foreground nodes plus a coordinate lookup.
#[derive(Debug, Clone)]
pub struct CellGraph {
    nodes: Vec<CellNode>,
    lookup: Array2<Option<NodeId>>,
}

impl CellGraph {
    /// Build the graph for `grid`.
    ///
    /// Nodes are created in row-major order, so node ids follow the `next`
    /// chain and the first foreground cell is the head.
    pub fn build(grid: &BinaryGrid) -> Self {
        let (rows, cols) = grid.dim();
        let mut lookup = Array2::<Option<NodeId>>::from_elem((rows, cols), None);
        let mut nodes: Vec<CellNode> = Vec::with_capacity(grid.foreground_count());

        for cell in grid.foreground_cells() {
            let id = nodes.len();
            if let Some(prev) = nodes.last_mut() {
                prev.next = Some(id);
            }
            lookup[cell.index()] = Some(id);
            nodes.push(CellNode {
                id,
                cell,
                links: Links::default(),
                next: None,
            });
        }

        for node in nodes.iter_mut() {
            for dir in Direction::ALL {
                let neighbor = dir
                    .step(node.cell, rows, cols)
                    .and_then(|cell| lookup[cell.index()]);
                if let Some(neighbor) = neighbor {
                    node.links.set(dir, neighbor);
                }
            }
        }

        log::debug!(
            "Built cell graph: {} nodes over a {}x{} grid",
            nodes.len(),
            rows,
            cols
        );

        Self { nodes, lookup }
    }

    /// First node of the `next` chain, `None` for an all-background grid.
    pub fn head(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&CellNode> {
        self.nodes.get(id)
    }

    /// Node sitting on `cell`, if that cell is foreground.
    pub fn node_at(&self, cell: Cell) -> Option<NodeId> {
        self.lookup.get(cell.index()).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dimensions of the source grid as (rows, cols).
    pub fn dim(&self) -> (usize, usize) {
        self.lookup.dim()
    }

    /// Walk the `next` chain from the head.
    pub fn chain(&self) -> impl Iterator<Item = &CellNode> + '_ {
        std::iter::successors(self.head().map(|id| &self.nodes[id]), move |node| {
            node.next.map(|id| &self.nodes[id])
        })
    }

    /// Fresh visited set sized for this graph.
    pub fn visited_set(&self) -> VisitedNodes {
        VisitedNodes {
            flags: vec![false; self.nodes.len()],
        }
    }

    /// Depth-first walk of the component containing `seed`.
    ///
    /// Links are followed in up, down, left, right order. A node is appended
    /// to the boundary list once all of its neighbors have been explored, the
    /// same order a recursive walk produces; an explicit frame stack keeps
    /// deep regions off the call stack.
    ///
    /// Returns `None` when `seed` is unknown or already visited.
    pub fn traverse_component(
        &self,
        seed: NodeId,
        visited: &mut VisitedNodes,
    ) -> Option<ComponentTrace> {
        let seed_cell = self.node(seed)?.cell;
        if !visited.insert(seed) {
            return None;
        }

        let mut area = 1;
        let mut bbox = BoundingBox::from_cell(seed_cell);
        let mut boundary = Vec::new();
        let mut stack = vec![Frame::new(seed)];

        while let Some(top) = stack.len().checked_sub(1) {
            let frame = stack[top];
            let Some(&dir) = Direction::ALL.get(frame.next_direction) else {
                stack.pop();
                if frame.on_boundary {
                    boundary.push(self.nodes[frame.node].cell);
                }
                continue;
            };

            stack[top].next_direction += 1;
            match self.nodes[frame.node].links.get(dir) {
                None => stack[top].on_boundary = true,
                Some(neighbor) => {
                    if visited.insert(neighbor) {
                        area += 1;
                        bbox.expand_to_include(self.nodes[neighbor].cell);
                        stack.push(Frame::new(neighbor));
                    }
                }
            }
        }

        Some(ComponentTrace {
            seed: seed_cell,
            area,
            boundary,
            bbox,
        })
    }

    /// Walk the whole `next` chain, tracing every component not yet absorbed
    /// by an earlier one.
    pub fn components(&self) -> Vec<ComponentTrace> {
        let mut visited = self.visited_set();
        let mut traces = Vec::new();

        for node in self.chain() {
            if let Some(trace) = self.traverse_component(node.id, &mut visited) {
                log::debug!(
                    "Component {} seeded at {}: area {}, {} boundary cells",
                    traces.len() + 1,
                    trace.seed,
                    trace.area,
                    trace.boundary.len()
                );
                traces.push(trace);
            }
        }

        traces
    }
}
