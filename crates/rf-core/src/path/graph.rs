//! The anchor traversal graph.
//!
//! Nodes are every anchor in the room, flattened. Edges come from two
//! places: internal paths a primitive declares between its own anchors
//! (directed as declared), and proximity edges between overlapping
//! anchors of different primitives. A proximity edge is dropped when
//! the straight line between its endpoints crosses the obstruction
//! line of any obstructing primitive.

use std::collections::VecDeque;

use crate::geometry::{segments_intersect, Segment, Vec2};
use crate::primitive::PrimitiveId;
use crate::room::Room;

/// Drop every declared internal path whose straight line crosses the
/// obstruction line of a different, obstructing primitive. Pit and
/// water lines rim open traversal space and never sever anything.
/// Returns how many connections were removed.
pub fn remove_intersecting_connections(room: &mut Room) -> usize {
    let blockers: Vec<(PrimitiveId, Segment)> = room
        .primitives()
        .filter(|(_, p)| p.kind.obstructs_connections())
        .flat_map(|(id, p)| p.obstruction_lines.iter().map(move |&line| (id, line)))
        .collect();
    let ids: Vec<PrimitiveId> = room.primitives().map(|(id, _)| id).collect();

    let mut removed = 0;
    for id in ids {
        let keep: Vec<bool> = {
            let p = room.primitive(id);
            p.internal_paths
                .iter()
                .map(|conn| {
                    let a = p.anchors[conn.from].pos;
                    let b = p.anchors[conn.to].pos;
                    !blockers.iter().any(|&(owner, line)| {
                        owner != id && segments_intersect(a, b, line.a, line.b)
                    })
                })
                .collect()
        };
        if keep.iter().all(|&k| k) {
            continue;
        }
        removed += keep.iter().filter(|&&k| !k).count();
        let mut it = keep.into_iter();
        room.primitive_mut(id)
            .internal_paths
            .retain(|_| it.next().unwrap_or(true));
    }
    removed
}

/// A node in the flattened anchor graph.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub owner: PrimitiveId,
    pub anchor_idx: usize,
    pub pos: Vec2,
}

#[derive(Debug, Clone)]
pub struct AnchorGraph {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<usize>>,
}

impl AnchorGraph {
    pub fn build(room: &Room) -> Self {
        let mut nodes = Vec::new();
        let mut first_node = Vec::new();
        for (id, primitive) in room.primitives() {
            first_node.push((id, nodes.len()));
            for (i, anchor) in primitive.anchors.iter().enumerate() {
                nodes.push(Node {
                    owner: id,
                    anchor_idx: i,
                    pos: anchor.pos,
                });
            }
        }
        let base_of = |id: PrimitiveId| {
            first_node
                .iter()
                .find(|(pid, _)| *pid == id)
                .map(|(_, base)| *base)
        };

        let mut adjacency = vec![Vec::new(); nodes.len()];

        // Declared internal paths.
        for (id, primitive) in room.primitives() {
            let Some(base) = base_of(id) else { continue };
            for conn in &primitive.internal_paths {
                adjacency[base + conn.from].push(base + conn.to);
                if conn.bidirectional {
                    adjacency[base + conn.to].push(base + conn.from);
                }
            }
        }

        // Obstruction lines of obstructing primitives only.
        let blockers: Vec<Segment> = room
            .primitives()
            .filter(|(_, p)| p.kind.obstructs_connections())
            .flat_map(|(_, p)| p.obstruction_lines.iter().copied())
            .collect();

        // Proximity edges between different primitives.
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if nodes[i].owner == nodes[j].owner {
                    continue;
                }
                let a = room.primitive(nodes[i].owner).anchors[nodes[i].anchor_idx];
                let b = room.primitive(nodes[j].owner).anchors[nodes[j].anchor_idx];
                if !a.connects_to(&b) {
                    continue;
                }
                let blocked = blockers
                    .iter()
                    .any(|line| segments_intersect(a.pos, b.pos, line.a, line.b));
                if !blocked {
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                }
            }
        }

        Self { nodes, adjacency }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// First node belonging to a primitive, if it has anchors.
    pub fn node_of(&self, owner: PrimitiveId, anchor_idx: usize) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.owner == owner && n.anchor_idx == anchor_idx)
    }

    /// The node whose anchor sits closest to a world position.
    pub fn nearest_node(&self, pos: Vec2) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.pos
                    .distance_to(pos)
                    .partial_cmp(&b.pos.distance_to(pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
    }

    /// Breadth-first shortest path by anchor count. Ties resolve to
    /// the first-enqueued route, so results are stable for a given
    /// insertion order.
    pub fn find_path(&self, start: usize, goal: usize) -> Option<Vec<usize>> {
        if start >= self.nodes.len() || goal >= self.nodes.len() {
            return None;
        }
        if start == goal {
            return Some(vec![start]);
        }
        let mut predecessor: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        seen[start] = true;
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            for &next in &self.adjacency[current] {
                if seen[next] {
                    continue;
                }
                seen[next] = true;
                predecessor[next] = Some(current);
                if next == goal {
                    let mut path = vec![goal];
                    let mut at = goal;
                    while let Some(prev) = predecessor[at] {
                        path.push(prev);
                        at = prev;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(next);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::TraversalCapability;
    use crate::primitive::build::{build_pit, stage_floor, stage_ladder, stage_wall};
    use crate::primitive::{AnchorRole, PrimitiveData};
    use crate::rng::GenRng;
    use crate::room::GridPos;

    #[test]
    fn test_adjacent_floors_connect() {
        let mut room = Room::new(20, 12, 5);
        let a = room.insert(stage_floor(GridPos::new(1, 10), 4)).unwrap();
        let b = room.insert(stage_floor(GridPos::new(5, 10), 4)).unwrap();
        let graph = AnchorGraph::build(&room);

        let start = graph.node_of(a, 0).unwrap();
        let goal = graph.node_of(b, 3).unwrap();
        let path = graph.find_path(start, goal).expect("connected floors");
        assert_eq!(path.len(), 8);
        assert_eq!(path[0], start);
        assert_eq!(*path.last().unwrap(), goal);
        // Simple path: no node repeats.
        let mut seen = path.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), path.len());
    }

    #[test]
    fn test_disconnected_floors_have_no_path() {
        let mut room = Room::new(20, 12, 5);
        let a = room.insert(stage_floor(GridPos::new(1, 10), 3)).unwrap();
        let b = room.insert(stage_floor(GridPos::new(10, 10), 3)).unwrap();
        let graph = AnchorGraph::build(&room);
        assert!(graph
            .find_path(graph.node_of(a, 0).unwrap(), graph.node_of(b, 0).unwrap())
            .is_none());
    }

    #[test]
    fn test_ladder_bridges_levels() {
        let mut room = Room::new(20, 12, 5);
        let low = room.insert(stage_floor(GridPos::new(1, 10), 5)).unwrap();
        let high = room.insert(stage_floor(GridPos::new(1, 4), 5)).unwrap();
        // Ladder from the high floor row down to just above the low
        // floor; its top anchor overlaps the high floor's anchors and
        // its bottom anchor the low floor's.
        let ladder = room.insert(stage_ladder(GridPos::new(6, 4), 7)).unwrap();
        let graph = AnchorGraph::build(&room);

        let from = graph.node_of(low, 4).unwrap();
        let to = graph.node_of(high, 4).unwrap();
        let path = graph.find_path(from, to).expect("ladder route");
        assert!(path
            .iter()
            .any(|&n| graph.node(n).owner == ladder));
    }

    #[test]
    fn test_wall_severs_declared_floor_paths() {
        let mut room = Room::new(20, 12, 5);
        let floor = room.insert(stage_floor(GridPos::new(2, 10), 6)).unwrap();
        assert_eq!(room.primitive(floor).internal_paths.len(), 5);
        // A wall column standing on the floor cuts the hops past it.
        room.insert(stage_wall(GridPos::new(4, 8), 1, 2)).unwrap();

        let removed = remove_intersecting_connections(&mut room);
        assert_eq!(removed, 2);
        assert_eq!(room.primitive(floor).internal_paths.len(), 3);
    }

    #[test]
    fn test_pit_rim_keeps_crossing_paths() {
        let mut room = Room::new(30, 20, 10);
        for y in 10..20 {
            room.insert(stage_floor(GridPos::new(0, y), 30)).unwrap();
        }
        let mut rng = GenRng::new(42);
        let cap = TraversalCapability::default();
        let pit = build_pit(&mut room, &mut rng, &cap, GridPos::new(10, 10)).unwrap();
        let PrimitiveData::Pit { depth, .. } = room.primitive(pit).data else {
            panic!("payload");
        };
        // A ladder descending through the opening; its top-to-bottom
        // path crosses the pit rim but rims never sever.
        let ladder = room
            .insert(stage_ladder(GridPos::new(10, 8), depth + 2))
            .unwrap();
        assert_eq!(room.primitive(ladder).internal_paths.len(), 1);

        remove_intersecting_connections(&mut room);
        assert_eq!(room.primitive(ladder).internal_paths.len(), 1);
    }

    #[test]
    fn test_pit_opening_severs_surface_chain() {
        let mut room = Room::new(30, 20, 10);
        let surface = room.insert(stage_floor(GridPos::new(0, 10), 30)).unwrap();
        // Anchor-free stone beneath, so the only routes are up top.
        room.insert(stage_wall(GridPos::new(0, 11), 30, 9)).unwrap();
        let mut rng = GenRng::new(42);
        let cap = TraversalCapability::default();
        let pit = build_pit(&mut room, &mut rng, &cap, GridPos::new(10, 10)).unwrap();
        let PrimitiveData::Pit { width, .. } = room.primitive(pit).data else {
            panic!("payload");
        };

        // The floor anchors that hovered over the opening went stale
        // with their tiles.
        assert!(room
            .primitive(surface)
            .anchors
            .iter()
            .all(|a| a.cell.x < 10 || a.cell.x >= 10 + width));

        // Crossing the opening means dropping to the pit floor and
        // climbing back out, not walking a phantom floor chain.
        let graph = AnchorGraph::build(&room);
        let last = room.primitive(surface).anchors.len() - 1;
        let from = graph.node_of(surface, 0).unwrap();
        let to = graph.node_of(surface, last).unwrap();
        let path = graph.find_path(from, to).expect("route through the pit");
        assert!(path.iter().any(|&n| {
            let node = graph.node(n);
            node.owner == pit
                && room.primitive(pit).anchors[node.anchor_idx].role == AnchorRole::Bottom
        }));
    }

    #[test]
    fn test_wall_blocks_proximity_edge() {
        let mut room = Room::new(20, 12, 5);
        let a = room.insert(stage_floor(GridPos::new(1, 10), 4)).unwrap();
        let b = room.insert(stage_floor(GridPos::new(5, 10), 4)).unwrap();
        // A wall column rising between them severs the hop.
        room.insert(stage_wall(GridPos::new(4, 10).offset(0, -3), 1, 3))
            .unwrap();
        let graph = AnchorGraph::build(&room);
        let path = graph.find_path(graph.node_of(a, 3).unwrap(), graph.node_of(b, 0).unwrap());
        assert!(path.is_none());
    }
}
