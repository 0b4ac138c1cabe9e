//! Road network graph and shortest-path queries.
//!
//! Waypoints are fixed named nodes; edges are undirected and carry no
//! stored weight — cost is the Euclidean distance between endpoints,
//! computed at query time. The campus graph is connected, so a route
//! exists between any two waypoints; an empty result from
//! `shortest_path` is a recoverable hold-position condition for callers,
//! never a panic.

use sentinel_core::types::Point;

/// Index of a waypoint in the graph's node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WaypointId(pub usize);

/// A named fixed point in the road network.
#[derive(Debug, Clone)]
pub struct Waypoint {
    pub id: WaypointId,
    pub name: &'static str,
    pub position: Point,
}

/// The static road network: waypoints plus undirected adjacency.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    waypoints: Vec<Waypoint>,
    adjacency: Vec<Vec<WaypointId>>,
}

/// (name, x, y) node table for the campus network. The main gate doubles
/// as the north-central crossing.
const CAMPUS_NODES: &[(&str, f64, f64)] = &[
    ("gate", 50.0, 12.0),
    ("n_west_corner", 7.0, 12.0),
    ("n_east_corner", 93.0, 12.0),
    ("e_central_cross", 93.0, 50.0),
    ("s_east_corner", 93.0, 88.0),
    ("s_central_cross", 50.0, 88.0),
    ("s_west_corner", 7.0, 88.0),
    ("w_central_cross", 7.0, 50.0),
    ("center", 50.0, 50.0),
];

/// Undirected edges by node index: the perimeter loop plus the central
/// cross streets.
const CAMPUS_EDGES: &[(usize, usize)] = &[
    // Perimeter loop
    (1, 0),
    (0, 2),
    (2, 3),
    (3, 4),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 1),
    // Central cross
    (0, 8),
    (5, 8),
    (7, 8),
    (3, 8),
];

impl RoadGraph {
    /// Build the fixed campus road network. Connectivity is an invariant
    /// of the static data and is checked here rather than handled at
    /// runtime.
    pub fn campus() -> Self {
        let waypoints = CAMPUS_NODES
            .iter()
            .enumerate()
            .map(|(i, &(name, x, y))| Waypoint {
                id: WaypointId(i),
                name,
                position: Point::new(x, y),
            })
            .collect::<Vec<_>>();

        let mut adjacency = vec![Vec::new(); waypoints.len()];
        for &(u, v) in CAMPUS_EDGES {
            adjacency[u].push(WaypointId(v));
            adjacency[v].push(WaypointId(u));
        }

        let graph = Self {
            waypoints,
            adjacency,
        };
        debug_assert!(graph.is_connected(), "campus road graph must be connected");
        graph
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn position(&self, id: WaypointId) -> Point {
        self.waypoints[id.0].position
    }

    pub fn neighbors(&self, id: WaypointId) -> &[WaypointId] {
        &self.adjacency[id.0]
    }

    /// The waypoint minimizing Euclidean distance to an arbitrary point.
    /// Exact distance ties break to the lowest waypoint id, so the result
    /// is independent of node-table ordering quirks.
    pub fn nearest_waypoint(&self, point: Point) -> WaypointId {
        let mut best = WaypointId(0);
        let mut best_dist = f64::INFINITY;
        for wp in &self.waypoints {
            let dist = point.distance_to(&wp.position);
            if dist < best_dist || (dist == best_dist && wp.id < best) {
                best_dist = dist;
                best = wp.id;
            }
        }
        best
    }

    /// Minimum-cost route between two waypoints via A* with a Euclidean
    /// heuristic. The heuristic is admissible and consistent (edge cost
    /// equals true Euclidean distance), so the result is optimal.
    ///
    /// `from == to` yields the single-element path. An unreachable target
    /// yields an empty path.
    pub fn shortest_path(&self, from: WaypointId, to: WaypointId) -> Vec<WaypointId> {
        if from == to {
            return vec![from];
        }

        let n = self.waypoints.len();
        let goal = self.position(to);

        let mut open = vec![false; n];
        let mut came_from: Vec<Option<WaypointId>> = vec![None; n];
        let mut g_score = vec![f64::INFINITY; n];
        let mut f_score = vec![f64::INFINITY; n];

        open[from.0] = true;
        g_score[from.0] = 0.0;
        f_score[from.0] = self.position(from).distance_to(&goal);

        // The graph is small enough that a linear scan of the open set
        // beats a heap; scanning in id order also makes tie-breaks
        // deterministic.
        loop {
            let mut current: Option<usize> = None;
            let mut min_f = f64::INFINITY;
            for (i, &is_open) in open.iter().enumerate() {
                if is_open && f_score[i] < min_f {
                    min_f = f_score[i];
                    current = Some(i);
                }
            }

            let Some(current) = current else {
                return Vec::new();
            };

            if current == to.0 {
                let mut path = vec![WaypointId(current)];
                let mut cursor = current;
                while let Some(prev) = came_from[cursor] {
                    path.push(prev);
                    cursor = prev.0;
                }
                path.reverse();
                return path;
            }

            open[current] = false;
            let current_pos = self.waypoints[current].position;
            for &neighbor in &self.adjacency[current] {
                let tentative =
                    g_score[current] + current_pos.distance_to(&self.position(neighbor));
                if tentative < g_score[neighbor.0] {
                    came_from[neighbor.0] = Some(WaypointId(current));
                    g_score[neighbor.0] = tentative;
                    f_score[neighbor.0] = tentative + self.position(neighbor).distance_to(&goal);
                    open[neighbor.0] = true;
                }
            }
        }
    }

    /// Sum of Euclidean edge lengths along a path of waypoints.
    pub fn path_length(&self, path: &[WaypointId]) -> f64 {
        path.windows(2)
            .map(|pair| self.position(pair[0]).distance_to(&self.position(pair[1])))
            .sum()
    }

    /// Every waypoint reachable from every other (BFS from node 0).
    pub fn is_connected(&self) -> bool {
        if self.waypoints.is_empty() {
            return true;
        }
        let mut visited = vec![false; self.waypoints.len()];
        let mut queue = vec![WaypointId(0)];
        visited[0] = true;
        while let Some(node) = queue.pop() {
            for &next in &self.adjacency[node.0] {
                if !visited[next.0] {
                    visited[next.0] = true;
                    queue.push(next);
                }
            }
        }
        visited.into_iter().all(|v| v)
    }
}
