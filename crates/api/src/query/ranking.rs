use log::debug;

use super::QueryError;
use crate::db::{ClimateData, StationCount};

/// Station with the most observation rows.
///
/// Ties are not broken by any rule of ours: among stations sharing the top
/// count, the one the store lists first wins.
pub async fn busiest_station(store: &dyn ClimateData) -> Result<String, QueryError> {
    let counts = store.observation_counts().await?;
    let busiest = pick_busiest(counts).ok_or(QueryError::EmptyDataset)?;
    debug!(
        "busiest station {} with {} observations",
        busiest.station, busiest.observations
    );
    Ok(busiest.station)
}

/// First entry holding the maximum count, in input order.
fn pick_busiest(counts: Vec<StationCount>) -> Option<StationCount> {
    counts.into_iter().fold(None, |best, candidate| match best {
        Some(best) if best.observations >= candidate.observations => Some(best),
        _ => Some(candidate),
    })
}
