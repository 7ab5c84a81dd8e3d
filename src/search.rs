use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
};

use tracing::debug;

use crate::data::*;

/// Paths shared between queue entries: every link points at the link it was extended from.
#[derive(Debug, Default)]
struct Trail(Vec<(StationIdx, Option<usize>)>);

impl Trail {
    fn push(&mut self, station: StationIdx, parent: Option<usize>) -> usize {
        self.0.push((station, parent));
        self.0.len() - 1
    }

    fn path(&self, link: usize) -> Vec<StationIdx> {
        let mut path = Vec::new();
        let mut next = Some(link);
        while let Some(link) = next {
            let (station, parent) = self.0[link];
            path.push(station);
            next = parent;
        }
        path.reverse();
        path
    }
}

impl Network {
    fn endpoints(&self, start_id: &str, goal_id: &str) -> Option<(StationIdx, StationIdx)> {
        match (self.index_of(start_id), self.index_of(goal_id)) {
            (Some(start), Some(goal)) => Some((start, goal)),
            _ => {
                debug!(start_id, goal_id, "unknown station in route query");
                None
            }
        }
    }

    fn resolve(&self, path: Vec<StationIdx>) -> Vec<&Station> {
        path.into_iter().map(|idx| &self.stations()[idx]).collect()
    }

    /// Breadth-first search for the path with the fewest hops. Ties go to the path found
    /// first when neighbours are explored in connection order.
    ///
    /// Returns `None` both for an unknown station id and for an unreachable goal.
    pub fn find_fewest_transfers(
        &self,
        start_id: &str,
        goal_id: &str,
    ) -> Option<Vec<&Station>> {
        let (start, goal) = self.endpoints(start_id, goal_id)?;
        let stations = self.stations();

        let mut trail = Trail::default();
        let mut visited = vec![false; stations.len()];
        visited[start] = true;
        let mut queue = VecDeque::from([(start, trail.push(start, None))]);

        while let Some((current, link)) = queue.pop_front() {
            if current == goal {
                let path = self.resolve(trail.path(link));
                let hops = path.len() - 1;
                debug!(start_id, goal_id, hops, "fewest-transfers route found");
                return Some(path);
            }

            for &(neighbour, _) in stations[current].neighbours() {
                if !visited[neighbour] {
                    visited[neighbour] = true;
                    queue.push_back((neighbour, trail.push(neighbour, Some(link))));
                }
            }
        }

        debug!(start_id, goal_id, "no route");
        None
    }

    /// Dijkstra search for the path with the lowest summed travel time. Entries of equal
    /// cost leave the queue in the order they were pushed.
    pub fn find_fastest_route(
        &self,
        start_id: &str,
        goal_id: &str,
    ) -> Option<(Vec<&Station>, TotalTime)> {
        let (start, goal) = self.endpoints(start_id, goal_id)?;
        let stations = self.stations();

        let mut trail = Trail::default();
        let mut best: Vec<Option<TotalTime>> = vec![None; stations.len()];
        let mut seq: u64 = 0;
        let mut queue = BinaryHeap::from([Reverse((0, seq, start, trail.push(start, None)))]);

        while let Some(Reverse((cost, _, current, link))) = queue.pop() {
            if current == goal {
                let path = self.resolve(trail.path(link));
                let hops = path.len() - 1;
                debug!(start_id, goal_id, minutes = cost, hops, "fastest route found");
                return Some((path, cost));
            }

            // Superseded by a cheaper entry for the same station.
            if best[current].is_some_and(|known| known <= cost) {
                continue;
            }
            best[current] = Some(cost);

            for &(neighbour, time) in stations[current].neighbours() {
                let next = cost + TotalTime::from(time);
                if best[neighbour].map_or(true, |known| next < known) {
                    seq += 1;
                    let link = trail.push(neighbour, Some(link));
                    queue.push(Reverse((next, seq, neighbour, link)));
                }
            }
        }

        debug!(start_id, goal_id, "no route");
        None
    }

    pub fn fewest_transfers_route(&self, start_id: &str, goal_id: &str) -> Option<Route<'_>> {
        let path = self.find_fewest_transfers(start_id, goal_id)?;
        let total_time = self.path_time(&path)?;
        Some(Route::from((path, total_time)))
    }

    pub fn fastest_route(&self, start_id: &str, goal_id: &str) -> Option<Route<'_>> {
        self.find_fastest_route(start_id, goal_id).map(Route::from)
    }
}
