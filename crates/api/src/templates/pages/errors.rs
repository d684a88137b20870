//! Text bodies for rejected date parameters.
//!
//! These are served with status 200 and an HTML content type, unlike the JSON
//! success bodies of the same routes.

use maud::{html, Markup};

use crate::query::CanonicalDate;

pub fn invalid_start_page(token: &str) -> Markup {
    html! {
        "Error: Start date entered is not valid or is outside of the dataset." br;
        "Start Date: " (token)
    }
}

pub fn invalid_range_start_page(token: &str) -> Markup {
    html! {
        "Error: The entered start date is invalid or beyond the dataset's range." br;
        "Start Date: " (token)
    }
}

pub fn invalid_range_end_page(token: &str) -> Markup {
    html! {
        "Error: The entered end date is invalid or beyond the dataset's range." br;
        "End Date: " (token)
    }
}

pub fn empty_range_page(start: &CanonicalDate, end: &CanonicalDate) -> Markup {
    html! {
        "Error: Start date is greater than end date." br;
        "Start date: " (start.to_string()) br;
        "End date: " (end.to_string())
    }
}
