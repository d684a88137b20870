pub mod climate_data;
pub mod schema;

pub use climate_data::*;
