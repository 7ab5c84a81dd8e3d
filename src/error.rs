use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("No such Station {station_id:?} in the Network")]
    UnknownStation { station_id: String },

    #[error("Could not open {file:?}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record in {file:?}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}
