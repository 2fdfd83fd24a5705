pub mod error;
pub mod outcome;
pub mod station;
pub mod summary;

pub use error::{ModelError, Result};
pub use outcome::{Coordinate, GeocodeOutcome, accuracy};
pub use station::StationRecord;
pub use summary::{BestPerRecord, VariantSummary};
