//! Remote chart computation: canonical payloads, the gateway client, and
//! place resolution.

pub mod gateway;
pub mod geocode;
pub mod normalize;
pub mod types;

pub use gateway::{AstroGateway, ChartProvider, Endpoint};
pub use geocode::{GeocodeOutcome, Geocoder, PlaceResolver};
pub use types::{BirthPayload, ChartSnapshot, Fetched};
