pub mod error;
pub mod loader;

pub use error::DatasetError;
pub use loader::{load_blood_banks, parse_blood_banks, LoadReport, REQUIRED_COLUMNS};
