use std::sync::Arc;

use async_trait::async_trait;
use parkanizer_api::ParkanizerApi;
use tracing::info;

use crate::action::Action;
use crate::events::{EventKind, EventPayload, Listeners};
use crate::spot_cache::SpotCache;
use crate::types::{ActionResult, ShowSpotsRequest, SpotsStateOutcome};
use crate::zone_cache::ZoneCache;

/// Retrieve the per-spot free/busy state of a zone for a single date.
pub struct ShowSpotsState {
    payload: ShowSpotsRequest,
    zones: ZoneCache,
    spots: SpotCache,
    listeners: Listeners,
}

impl ShowSpotsState {
    /// Create the action with its payload and fresh caches.
    pub fn new(api: Arc<dyn ParkanizerApi>, payload: ShowSpotsRequest) -> Self {
        info!("Payload: {:?}", payload);
        Self {
            zones: ZoneCache::new(api.clone()),
            spots: SpotCache::new(api),
            payload,
            listeners: Listeners::default(),
        }
    }

    fn error(&self, request: ShowSpotsRequest, error: String) -> ActionResult {
        self.listeners.notify(EventKind::Error, &EventPayload::Error {
            error: error.clone(),
        });
        ActionResult::ShowSpotsState {
            request,
            result: SpotsStateOutcome::Error { error },
        }
    }

    /// Run the lookup for an arbitrary payload.
    pub async fn run_for_payload(&mut self, payload: &ShowSpotsRequest) -> ActionResult {
        info!("Getting spots state for the payload: {:?}", payload);
        let request = payload.clone();

        let zone = match self.zones.get_by_name(&payload.zone_name).await {
            Ok(Some(zone)) => zone,
            Ok(None) => {
                return self.finish(EventKind::Failure, ActionResult::ShowSpotsState {
                    request,
                    result: SpotsStateOutcome::Failure {
                        message: format!("Zone '{}' not found", payload.zone_name),
                    },
                });
            }
            Err(e) => return self.error(request, e.to_string()),
        };

        match self.spots.get_spots_state(&zone.id, payload.for_date).await {
            Ok(spots) => self.finish(EventKind::Success, ActionResult::ShowSpotsState {
                request,
                result: SpotsStateOutcome::Success {
                    zone: zone.name,
                    for_date: payload.for_date,
                    spots,
                },
            }),
            Err(e) => self.error(request, e.to_string()),
        }
    }
}

#[async_trait]
impl Action for ShowSpotsState {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    async fn run(&mut self) -> ActionResult {
        let payload = self.payload.clone();
        self.run_for_payload(&payload).await
    }
}
