//! The dungeon map: a floor-indexed grid of encounter nodes.
//!
//! Nodes are stored in an arena indexed by [`NodeId`] (floor, lane) and
//! connections are id lists, never shared references. Connections only
//! point from one floor to the next, the first floor holds only Enemy
//! nodes and the final floor only Boss nodes; movement is legal only
//! along a connection of the current node.

use crate::error::{CommandError, CommandResult};
use crate::rng::Rng;

/// Encounter kind of a map node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A regular enemy fight.
    Enemy,
    /// A scaled-up elite fight.
    Elite,
    /// The final fight of the run.
    Boss,
    /// A rest site offering healing.
    Rest,
    /// A shop (placeholder screen).
    Shop,
    /// A treasure room (routed to the event screen).
    Treasure,
    /// A random event (placeholder screen).
    Event,
}

impl NodeKind {
    /// Short display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            NodeKind::Enemy => "Enemy",
            NodeKind::Elite => "Elite",
            NodeKind::Boss => "Boss",
            NodeKind::Rest => "Rest",
            NodeKind::Shop => "Shop",
            NodeKind::Treasure => "Treasure",
            NodeKind::Event => "Event",
        }
    }

    /// Whether selecting this node starts a combat.
    #[must_use]
    pub const fn is_combat(self) -> bool {
        matches!(self, NodeKind::Enemy | NodeKind::Elite | NodeKind::Boss)
    }
}

/// Arena address of a map node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Floor index, 0 at the bottom.
    pub floor: usize,
    /// Lane index within the floor.
    pub lane: usize,
}

impl NodeId {
    /// Create a node id.
    #[must_use]
    pub const fn new(floor: usize, lane: usize) -> Self {
        Self { floor, lane }
    }
}

/// A single encounter slot in the dungeon.
#[derive(Debug, Clone)]
pub struct MapNode {
    /// Encounter kind.
    pub kind: NodeKind,
    /// This node's arena address.
    pub id: NodeId,
    /// Nodes one floor up reachable from here.
    pub connections: Vec<NodeId>,
    /// Whether the player has entered this node.
    pub visited: bool,
}

/// The generated dungeon for one run.
#[derive(Debug, Clone)]
pub struct DungeonMap {
    floors: Vec<Vec<MapNode>>,
    current: NodeId,
}

impl DungeonMap {
    /// Generate a dungeon with the given dimensions.
    ///
    /// Degenerate dimensions are clamped: at least two floors (an Enemy
    /// floor and a Boss floor) and one lane. The starting node is a
    /// random node on floor 0, already marked visited.
    #[must_use]
    pub fn generate(floor_count: usize, lanes: usize, rng: &mut Rng) -> Self {
        let floor_count = floor_count.max(2);
        let lanes = lanes.max(1);

        let mut floors: Vec<Vec<MapNode>> = Vec::with_capacity(floor_count);
        for floor in 0..floor_count {
            let mut row = Vec::with_capacity(lanes);
            for lane in 0..lanes {
                let kind = if floor == floor_count - 1 {
                    NodeKind::Boss
                } else if floor == 0 {
                    NodeKind::Enemy
                } else {
                    roll_node_kind(rng)
                };
                row.push(MapNode {
                    kind,
                    id: NodeId::new(floor, lane),
                    connections: Vec::new(),
                    visited: false,
                });
            }
            floors.push(row);
        }

        // Each node links to 2-3 distinct nodes one floor up
        for floor in 0..floor_count - 1 {
            for lane in 0..lanes {
                let count = (2 + rng.next_index(2)).min(lanes);
                let mut targets: Vec<usize> = Vec::with_capacity(count);
                while targets.len() < count {
                    let target = rng.next_index(lanes);
                    if !targets.contains(&target) {
                        targets.push(target);
                    }
                }
                floors[floor][lane].connections = targets
                    .into_iter()
                    .map(|target| NodeId::new(floor + 1, target))
                    .collect();
            }
        }

        let start = NodeId::new(0, rng.next_index(lanes));
        floors[start.floor][start.lane].visited = true;

        Self {
            floors,
            current: start,
        }
    }

    /// Number of floors.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// All nodes on one floor, lowest lane first.
    #[must_use]
    pub fn floor(&self, floor: usize) -> &[MapNode] {
        self.floors.get(floor).map_or(&[], Vec::as_slice)
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&MapNode> {
        self.floors.get(id.floor).and_then(|row| row.get(id.lane))
    }

    /// Id of the node the player stands on.
    #[must_use]
    pub const fn current(&self) -> NodeId {
        self.current
    }

    /// The node the player stands on.
    #[must_use]
    pub fn current_node(&self) -> &MapNode {
        &self.floors[self.current.floor][self.current.lane]
    }

    /// Forward connections of the current node.
    #[must_use]
    pub fn connections(&self) -> &[NodeId] {
        &self.current_node().connections
    }

    /// Move to a node connected to the current one.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnreachableNode`] (with no state change)
    /// if `id` is not a connection of the current node.
    pub fn move_to(&mut self, id: NodeId) -> CommandResult<()> {
        if !self.current_node().connections.contains(&id) {
            return Err(CommandError::UnreachableNode);
        }
        self.current = id;
        self.floors[id.floor][id.lane].visited = true;
        Ok(())
    }
}

/// Roll the kind of an interior-floor node.
fn roll_node_kind(rng: &mut Rng) -> NodeKind {
    match rng.percent() {
        0..=59 => NodeKind::Enemy,
        60..=69 => NodeKind::Elite,
        70..=84 => NodeKind::Rest,
        85..=94 => NodeKind::Shop,
        95..=97 => NodeKind::Treasure,
        _ => NodeKind::Event,
    }
}
