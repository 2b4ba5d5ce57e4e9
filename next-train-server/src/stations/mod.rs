//! Station datasets.
//!
//! Loads each network's stations from GeoJSON once at startup. The resulting
//! sets are immutable and shared by every request.

mod error;
mod loader;
mod table;

pub use error::StationLoadError;
pub use loader::{DescriptionTable, NetworkSchema, load_network, parse_network};
pub use table::{MatchError, description_cells, get_next_after_match};
