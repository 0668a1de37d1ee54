use std::sync::Arc;

use parkanizer_api::{ParkanizerApi, ParkanizerError, Zone};
use tracing::debug;

/// Lazy per-invocation cache of the zone listing.
///
/// Populated on the first miss and kept for the lifetime of the owning
/// action; there is no invalidation. Discard the instance when fresher data
/// is needed.
pub struct ZoneCache {
    api: Arc<dyn ParkanizerApi>,
    zones: Option<Vec<Zone>>,
}

impl ZoneCache {
    /// Create an empty cache over the given service handle.
    pub fn new(api: Arc<dyn ParkanizerApi>) -> Self {
        Self { api, zones: None }
    }

    /// The cached zone list, fetched on first use.
    pub async fn get_zones(&mut self) -> Result<&[Zone], ParkanizerError> {
        if self.zones.is_none() {
            debug!("Zone cache miss, fetching zones");
            self.zones = Some(self.api.get_zones().await?);
        }
        Ok(self.zones.as_deref().unwrap_or(&[]))
    }

    /// Look a zone up by display name. `Ok(None)` when not present.
    pub async fn get_by_name(&mut self, name: &str) -> Result<Option<Zone>, ParkanizerError> {
        Ok(self
            .get_zones()
            .await?
            .iter()
            .find(|zone| zone.name == name)
            .cloned())
    }

    /// Look a zone up by service id. `Ok(None)` when not present.
    pub async fn get_by_id(&mut self, zone_id: &str) -> Result<Option<Zone>, ParkanizerError> {
        Ok(self
            .get_zones()
            .await?
            .iter()
            .find(|zone| zone.id == zone_id)
            .cloned())
    }
}
