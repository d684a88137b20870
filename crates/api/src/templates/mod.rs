pub mod pages;

pub use pages::{
    empty_range_page, home_page, invalid_range_end_page, invalid_range_start_page,
    invalid_start_page,
};
