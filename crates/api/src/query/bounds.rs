use log::debug;

use super::{normalize, CanonicalDate, QueryError};
use crate::db::{self, ClimateData};

/// Most recent observation date in the dataset.
pub async fn most_recent_date(store: &dyn ClimateData) -> Result<CanonicalDate, QueryError> {
    store
        .latest_observation_date()
        .await?
        .ok_or(QueryError::EmptyDataset)
}

/// First and last observation dates, `None` for an empty dataset.
pub async fn dataset_span(
    store: &dyn ClimateData,
) -> Result<Option<(CanonicalDate, CanonicalDate)>, db::Error> {
    let Some(first) = store.earliest_observation_date().await? else {
        return Ok(None);
    };
    Ok(store.latest_observation_date().await?.map(|last| (first, last)))
}

/// True only when some observation carries exactly this date; falling between
/// the first and last dataset dates is not enough.
pub async fn is_in_range(store: &dyn ClimateData, date: &CanonicalDate) -> Result<bool, db::Error> {
    store.has_observations_on(date).await
}

/// Normalize a caller token and confirm the dataset has observations on it.
///
/// `Ok(None)` covers both a malformed token and a date missing from the
/// dataset; callers are not told which.
pub async fn validate(
    store: &dyn ClimateData,
    token: &str,
) -> Result<Option<CanonicalDate>, db::Error> {
    let date = match normalize(token) {
        Ok(date) => date,
        Err(e) => {
            debug!("{}", e);
            return Ok(None);
        }
    };

    if is_in_range(store, &date).await? {
        Ok(Some(date))
    } else {
        debug!("no observations on {} (token '{}')", date, token);
        Ok(None)
    }
}
