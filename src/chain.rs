use tracing::debug;

use crate::animation::{ScaleState, StepProfile, StepStatus};
use crate::config::WidgetConfig;
use crate::geometry::{draw_arrow_node, Surface};

/// Which neighbor becomes active after the current node settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDirection {
    Forward,
    Backward,
}

impl TraversalDirection {
    pub fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Result of a neighbor lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbor {
    Adjacent(usize),
    /// Ran off an end of the chain; the caller stays put
    Boundary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowNode {
    pub index: usize,
    pub state: ScaleState,
}

/// Outcome of one chain tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChainStep {
    Idle,
    Advancing,
    Completed {
        node: usize,
        checkpoint: f32,
        next: usize,
        reversed: bool,
    },
}

/// Fixed-size chain of nodes, one of which is active at a time.
///
/// Nodes live in a flat vector; neighbors are found by index, so traversal
/// needs no links between nodes.
#[derive(Debug, Clone)]
pub struct ArrowChain {
    nodes: Vec<ArrowNode>,
    active: usize,
    direction: TraversalDirection,
}

impl ArrowChain {
    /// Build the chain. A zero count is bumped to one.
    pub fn new(node_count: usize) -> Self {
        let nodes = (0..node_count.max(1))
            .map(|index| ArrowNode {
                index,
                state: ScaleState::default(),
            })
            .collect();
        Self {
            nodes,
            active: 0,
            direction: TraversalDirection::Forward,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &ArrowNode {
        &self.nodes[self.active]
    }

    pub fn direction(&self) -> TraversalDirection {
        self.direction
    }

    #[cfg(test)]
    pub fn node(&self, index: usize) -> Option<&ArrowNode> {
        self.nodes.get(index)
    }

    pub fn neighbor(&self, index: usize, direction: TraversalDirection) -> Neighbor {
        let candidate = match direction {
            TraversalDirection::Backward => index.checked_sub(1),
            TraversalDirection::Forward => Some(index + 1).filter(|i| *i < self.nodes.len()),
        };
        candidate.map_or(Neighbor::Boundary, Neighbor::Adjacent)
    }

    /// Arm the active node. Returns `true` only if it was idle.
    pub fn start_updating(&mut self) -> bool {
        let active = self.active;
        let armed = self.nodes[active].state.start_updating() == StepStatus::Armed;
        if armed {
            debug!(
                node = active,
                direction = self.nodes[active].state.direction,
                "step armed"
            );
        }
        armed
    }

    /// Advance the active node by one frame; on completion hand over to the
    /// neighbor, reversing at either end.
    pub fn update(&mut self, profile: &StepProfile) -> ChainStep {
        let node = self.active;
        match self.nodes[node].state.update(profile) {
            StepStatus::Completed(checkpoint) => {
                let (next, reversed) = match self.neighbor(node, self.direction) {
                    Neighbor::Adjacent(next) => (next, false),
                    Neighbor::Boundary => {
                        self.direction = self.direction.flipped();
                        (node, true)
                    }
                };
                self.active = next;
                ChainStep::Completed {
                    node,
                    checkpoint,
                    next,
                    reversed,
                }
            }
            StepStatus::Advancing | StepStatus::Armed => ChainStep::Advancing,
            StepStatus::Idle => ChainStep::Idle,
        }
    }

    /// Draw every node, head to tail.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, config: &WidgetConfig) {
        for node in &self.nodes {
            draw_arrow_node(surface, node.index, node.state.scale, config);
        }
    }
}
