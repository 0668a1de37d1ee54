use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use parkanizer_api::{ParkanizerApi, ParkanizerError, SpotZoneMap, SpotZoneMapResponse};
use tracing::debug;

use crate::types::{Spot, SpotState};

/// Lazy per-invocation cache of spot listings, keyed by zone id.
///
/// The cached listing holds the stable id/name pairs only; date-scoped
/// free/busy state goes through [`SpotCache::get_spots_state`], which always
/// hits the service.
pub struct SpotCache {
    api: Arc<dyn ParkanizerApi>,
    spots: HashMap<String, Vec<Spot>>,
}

impl SpotCache {
    /// Create an empty cache over the given service handle.
    pub fn new(api: Arc<dyn ParkanizerApi>) -> Self {
        Self {
            api,
            spots: HashMap::new(),
        }
    }

    fn unwrap_map(response: SpotZoneMapResponse) -> Result<SpotZoneMap, ParkanizerError> {
        response.map_or_null.ok_or_else(|| {
            ParkanizerError::DataFormat("Zone map response carried no map".to_string())
        })
    }

    /// The cached spot listing for a zone, fetched once per zone id.
    pub async fn get_spots(&mut self, zone_id: &str) -> Result<&[Spot], ParkanizerError> {
        if !self.spots.contains_key(zone_id) {
            debug!("Spot cache miss for zone {}, fetching zone map", zone_id);
            let map = Self::unwrap_map(self.api.get_spots_map(zone_id, None).await?)?;
            let spots = map
                .parking_spots
                .into_iter()
                .map(|spot| Spot {
                    id: spot.id,
                    name: spot.name,
                })
                .collect();
            self.spots.insert(zone_id.to_string(), spots);
        }
        Ok(self.spots.get(zone_id).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Look a spot up by display name. `Ok(None)` when not present.
    pub async fn get_by_name(
        &mut self,
        zone_id: &str,
        name: &str,
    ) -> Result<Option<Spot>, ParkanizerError> {
        Ok(self
            .get_spots(zone_id)
            .await?
            .iter()
            .find(|spot| spot.name == name)
            .cloned())
    }

    /// Look a spot up by service id. `Ok(None)` when not present.
    pub async fn get_by_id(
        &mut self,
        zone_id: &str,
        spot_id: &str,
    ) -> Result<Option<Spot>, ParkanizerError> {
        Ok(self
            .get_spots(zone_id)
            .await?
            .iter()
            .find(|spot| spot.id == spot_id)
            .cloned())
    }

    /// Free/busy state per spot for a zone and date.
    ///
    /// Never memoized: every call re-fetches the map scoped to `for_date`,
    /// since the state is only meaningful relative to that date.
    pub async fn get_spots_state(
        &self,
        zone_id: &str,
        for_date: NaiveDate,
    ) -> Result<Vec<SpotState>, ParkanizerError> {
        let map = Self::unwrap_map(self.api.get_spots_map(zone_id, Some(for_date)).await?)?;
        Ok(map
            .parking_spots
            .into_iter()
            .map(|spot| SpotState {
                free: spot.state == "Free",
                id: spot.id,
                name: spot.name,
            })
            .collect())
    }
}
