//! Route queries over a multi-line transit network.
//!
//! A [`Network`] owns its stations and answers two independent queries: the path
//! with the fewest hops ([`Network::find_fewest_transfers`]) and the path with the
//! lowest total travel time ([`Network::find_fastest_route`]).

pub mod data;
pub mod error;
pub mod records;
pub mod search;

pub use data::{Network, Route, Station, StationIdx, Time, TotalTime, ID};
pub use error::NetworkError;
pub use records::{ConnectionRecord, StationRecord};
