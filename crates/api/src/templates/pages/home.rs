use maud::{html, Markup, DOCTYPE};

use crate::query::CanonicalDate;

pub const DATE_ROUTES: [&str; 2] = ["/api/v1.0/{start date}", "/api/v1.0/{start date}/{end date}"];

pub const DATA_ROUTES: [&str; 3] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
];

/// Listing of the available API routes, with the dataset's date span when known.
pub fn home_page(api_base: &str, span: Option<(CanonicalDate, CanonicalDate)>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Climate API" }
            }
            body {
                "Welcome." br;
                "Below are the available API routes." br;
                "Date parameters should be in 'MMDDYYYY' format." br;
                @if let Some((first, last)) = span {
                    "The dataset ranges from " (first.long_form()) " to " (last.long_form()) "." br;
                }
                @for route in DATA_ROUTES {
                    a href=(format!("{}{}", api_base, route)) { (route) } br;
                }
                @for route in DATE_ROUTES {
                    (route) br;
                }
                a href=(format!("{}/docs", api_base)) { "API Docs" }
            }
        }
    }
}
