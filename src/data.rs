use itertools::Itertools;
use std::{collections::HashMap, fmt, hash::Hash};
use tracing::trace;

use crate::error::NetworkError;

pub type ID = String;

/// Travel time of a single connection, in minutes.
pub type Time = u32;

/// Summed travel time along a path. Wider than [`Time`] so sums never wrap.
pub type TotalTime = u64;

pub type StationIdx = usize;

/// One line's stop at a physical location. Stations of different lines at the same
/// location are joined by ordinary connections.
#[derive(Debug, Clone, Eq)]
pub struct Station {
    pub id: ID,
    pub name: String,
    pub line: String,
    neighbours: Vec<(StationIdx, Time)>,
}

impl Station {
    fn new(id: ID, name: String, line: String) -> Self {
        Self {
            id,
            name,
            line,
            neighbours: Vec::new(),
        }
    }

    pub fn neighbours(&self) -> &[(StationIdx, Time)] {
        &self.neighbours
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Station {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.id, self.line)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Network {
    stations: Vec<Station>,
    by_id: HashMap<ID, StationIdx>,
    lines: HashMap<String, Vec<StationIdx>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_station(&mut self, id: &str, name: &str, line: &str) {
        if self.by_id.contains_key(id) {
            trace!(station_id = id, "station already present, skipping");
            return;
        }

        let idx = self.stations.len();
        self.stations.push(Station::new(id.to_owned(), name.to_owned(), line.to_owned()));
        self.by_id.insert(id.to_owned(), idx);
        self.lines.entry(line.to_owned()).or_default().push(idx);
    }

    /// Both endpoints are resolved before anything is written, so an unknown id
    /// leaves the network untouched.
    pub fn add_connection(
        &mut self,
        id1: &str,
        id2: &str,
        time: Time,
    ) -> Result<(), NetworkError> {
        let a = self.require(id1)?;
        let b = self.require(id2)?;

        self.stations[a].neighbours.push((b, time));
        self.stations[b].neighbours.push((a, time));
        trace!(from = id1, to = id2, time, "connection added");

        Ok(())
    }

    fn require(&self, id: &str) -> Result<StationIdx, NetworkError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| NetworkError::UnknownStation {
                station_id: id.to_owned(),
            })
    }

    pub fn index_of(&self, id: &str) -> Option<StationIdx> {
        self.by_id.get(id).copied()
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.index_of(id).map(|idx| &self.stations[idx])
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn stations_on_line(&self, line: &str) -> Vec<&Station> {
        self.lines
            .get(line)
            .map(|members| members.iter().map(|&idx| &self.stations[idx]).collect())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.lines.keys().map(String::as_str).sorted().collect()
    }

    pub fn neighbours<'a>(
        &'a self,
        station: &'a Station,
    ) -> impl Iterator<Item = (&'a Station, Time)> + 'a {
        station
            .neighbours
            .iter()
            .map(|&(idx, time)| (&self.stations[idx], time))
    }

    /// Cheapest direct connection between two stations, if any.
    pub fn connection_time(&self, from: &Station, to: &Station) -> Option<Time> {
        self.neighbours(from)
            .filter(|(neighbour, _)| *neighbour == to)
            .map(|(_, time)| time)
            .min()
    }

    /// `None` if two consecutive stations are not connected.
    pub fn path_time(&self, path: &[&Station]) -> Option<TotalTime> {
        path.iter()
            .tuple_windows()
            .try_fold(0 as TotalTime, |acc, (from, to)| {
                Some(acc + TotalTime::from(self.connection_time(from, to)?))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<'a> {
    pub stations: Vec<&'a Station>,
    pub total_time: TotalTime,
}

impl<'a> Route<'a> {
    pub fn station_ids(&self) -> Vec<&'a str> {
        self.stations.iter().map(|station| station.id.as_str()).collect()
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.stations
            .iter()
            .map(|station| station.name.as_str())
            .collect()
    }

    pub fn hops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    pub fn line_changes(&self) -> usize {
        self.stations
            .iter()
            .tuple_windows()
            .filter(|(a, b)| a.line != b.line)
            .count()
    }
}

impl<'a> From<(Vec<&'a Station>, TotalTime)> for Route<'a> {
    fn from(value: (Vec<&'a Station>, TotalTime)) -> Self {
        Self {
            stations: value.0,
            total_time: value.1,
        }
    }
}

impl fmt::Display for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().iter().join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_lines() -> Network {
        let mut network = Network::new();
        network.add_station("K1", "Kizilay", "Red");
        network.add_station("K2", "Ulus", "Red");
        network.add_station("M2", "Kizilay", "Blue");
        network
    }

    #[test]
    fn duplicate_station_is_ignored() {
        let mut network = two_lines();
        network.add_station("K1", "Somewhere else", "Green");

        assert_eq!(network.len(), 3);
        assert_eq!(network.station("K1").unwrap().name, "Kizilay");
        assert!(network.stations_on_line("Green").is_empty());
        assert_eq!(network.stations_on_line("Red").len(), 2);
    }

    #[test]
    fn connection_is_symmetric() {
        let mut network = two_lines();
        network.add_connection("K1", "M2", 2).unwrap();

        let k1 = network.station("K1").unwrap();
        let m2 = network.station("M2").unwrap();
        assert_eq!(network.connection_time(k1, m2), Some(2));
        assert_eq!(network.connection_time(m2, k1), Some(2));
    }

    #[test]
    fn connection_to_unknown_station_fails_without_side_effects() {
        let mut network = two_lines();
        let err = network.add_connection("K1", "X9", 3).unwrap_err();

        assert!(matches!(err, NetworkError::UnknownStation { station_id } if station_id == "X9"));
        assert!(network.station("K1").unwrap().neighbours().is_empty());
    }

    #[test]
    fn lines_are_sorted_and_keep_insertion_order() {
        let network = two_lines();
        assert_eq!(network.lines(), vec!["Blue", "Red"]);

        let ids: Vec<_> = network
            .stations_on_line("Red")
            .iter()
            .map(|station| station.id.as_str())
            .collect();
        assert_eq!(ids, vec!["K1", "K2"]);
    }

    #[test]
    fn route_display_joins_names() {
        let mut network = two_lines();
        network.add_connection("K1", "K2", 4).unwrap();
        let path = vec![network.station("K2").unwrap(), network.station("K1").unwrap()];
        let time = network.path_time(&path).unwrap();
        let route = Route::from((path, time));

        assert_eq!(route.to_string(), "Ulus -> Kizilay");
        assert_eq!(route.total_time, 4);
        assert_eq!(route.hops(), 1);
        assert_eq!(route.line_changes(), 0);
    }

    #[test]
    fn path_time_does_not_wrap() {
        let mut network = two_lines();
        network.add_connection("K2", "K1", Time::MAX).unwrap();
        network.add_connection("K1", "M2", Time::MAX).unwrap();
        let path = vec![
            network.station("K2").unwrap(),
            network.station("K1").unwrap(),
            network.station("M2").unwrap(),
        ];

        assert_eq!(network.path_time(&path), Some(2 * TotalTime::from(Time::MAX)));
    }

    #[test]
    fn path_time_rejects_unconnected_hops() {
        let network = two_lines();
        let path = vec![network.station("K1").unwrap(), network.station("M2").unwrap()];
        assert_eq!(network.path_time(&path), None);
    }
}
