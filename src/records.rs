use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};
use tracing::info;

use crate::{data::*, error::NetworkError};

pub const STATIONS_FILE: &str = "stations.csv";
pub const CONNECTIONS_FILE: &str = "connections.csv";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub station_id: String,
    pub station_name: String,
    pub line_name: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub from_station_id: String,
    pub to_station_id: String,
    pub travel_time: Time,
}

fn deserialize_into<T: serde::de::DeserializeOwned, R: Read>(
    reader: R,
    file: &str,
) -> Result<Vec<T>, NetworkError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect::<Result<_, _>>()
        .map_err(|source| NetworkError::Csv {
            file: file.to_owned(),
            source,
        })
}

fn open(dir: &Path, name: &str) -> Result<File, NetworkError> {
    let path = dir.join(name);
    File::open(&path).map_err(|source| NetworkError::Io {
        file: path.display().to_string(),
        source,
    })
}

impl Network {
    /// Builds a network from a station table and a connection table.
    ///
    /// All stations are added before any connection, so the order of rows in the
    /// connection table does not matter.
    pub fn from_csv_readers<S: Read, C: Read>(
        stations: S,
        connections: C,
    ) -> Result<Self, NetworkError> {
        let stations = deserialize_into::<StationRecord, _>(stations, STATIONS_FILE)?;
        let connections = deserialize_into::<ConnectionRecord, _>(connections, CONNECTIONS_FILE)?;

        let mut network = Network::new();
        network.extend_stations(&stations);
        network.extend_connections(&connections)?;

        info!(
            stations = network.len(),
            connections = connections.len(),
            lines = network.lines().len(),
            "network loaded"
        );
        Ok(network)
    }

    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let dir = dir.as_ref();
        Self::from_csv_readers(open(dir, STATIONS_FILE)?, open(dir, CONNECTIONS_FILE)?)
    }

    pub fn extend_stations(&mut self, records: &[StationRecord]) {
        for record in records {
            self.add_station(&record.station_id, &record.station_name, &record.line_name);
        }
    }

    pub fn extend_connections(&mut self, records: &[ConnectionRecord]) -> Result<(), NetworkError> {
        records.iter().try_for_each(|record| {
            self.add_connection(&record.from_station_id, &record.to_station_id, record.travel_time)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS: &str = "station_id,station_name,line_name
K1,Kizilay,Red Line
K2,Ulus,Red Line
M2,Kizilay,Blue Line
";

    #[test]
    fn loads_stations_and_connections() {
        let connections = "from_station_id,to_station_id,travel_time\nK1,K2,4\nK1, M2, 2\n";
        let network =
            Network::from_csv_readers(STATIONS.as_bytes(), connections.as_bytes()).unwrap();

        assert_eq!(network.len(), 3);
        assert_eq!(network.lines(), vec!["Blue Line", "Red Line"]);
        let k1 = network.station("K1").unwrap();
        assert_eq!(network.neighbours(k1).count(), 2);
    }

    #[test]
    fn unknown_station_in_connections_is_an_error() {
        let connections = "from_station_id,to_station_id,travel_time\nK1,Q7,4\n";
        let err =
            Network::from_csv_readers(STATIONS.as_bytes(), connections.as_bytes()).unwrap_err();

        assert!(matches!(err, NetworkError::UnknownStation { .. }));
    }

    #[test]
    fn negative_travel_time_is_rejected() {
        let connections = "from_station_id,to_station_id,travel_time\nK1,K2,-4\n";
        let err =
            Network::from_csv_readers(STATIONS.as_bytes(), connections.as_bytes()).unwrap_err();

        assert!(matches!(err, NetworkError::Csv { ref file, .. } if file == CONNECTIONS_FILE));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let err = Network::from_dir("does/not/exist").unwrap_err();
        assert!(matches!(err, NetworkError::Io { .. }));
    }
}
