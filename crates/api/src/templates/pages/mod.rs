pub mod errors;
pub mod home;

pub use errors::{empty_range_page, invalid_range_end_page, invalid_range_start_page, invalid_start_page};
pub use home::home_page;
