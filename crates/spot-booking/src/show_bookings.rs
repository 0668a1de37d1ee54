use std::sync::Arc;

use async_trait::async_trait;
use parkanizer_api::ParkanizerApi;
use tracing::info;

use crate::action::Action;
use crate::bookings_cache::BookingsCache;
use crate::events::{EventKind, Listeners};
use crate::types::{ActionResult, BookingsOutcome, ShowBookingsRequest};
use crate::zone_cache::ZoneCache;

/// Retrieve the caller's full per-day booking calendar for a zone.
pub struct ShowBookings {
    payload: ShowBookingsRequest,
    zones: ZoneCache,
    bookings: BookingsCache,
    listeners: Listeners,
}

impl ShowBookings {
    /// Create the action with its payload and fresh caches.
    pub fn new(api: Arc<dyn ParkanizerApi>, payload: ShowBookingsRequest) -> Self {
        info!("Payload: {:?}", payload);
        Self {
            zones: ZoneCache::new(api.clone()),
            bookings: BookingsCache::new(api),
            payload,
            listeners: Listeners::default(),
        }
    }
}

#[async_trait]
impl Action for ShowBookings {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    async fn run(&mut self) -> ActionResult {
        info!("Get booking info for: {:?}", self.payload);
        let request = self.payload.clone();

        let (kind, outcome) = match self.zones.get_by_name(&request.zone_name).await {
            Ok(Some(zone)) => match self.bookings.get_bookings(&zone.id).await {
                Ok(bookings) => (
                    EventKind::Success,
                    BookingsOutcome::Success {
                        bookings: bookings.to_vec(),
                        message: "Retrieved booking info successfully".to_string(),
                    },
                ),
                Err(e) => (
                    EventKind::Error,
                    BookingsOutcome::Error {
                        error: e.to_string(),
                    },
                ),
            },
            Ok(None) => (
                EventKind::Failure,
                BookingsOutcome::Failure {
                    message: format!("Zone '{}' not found", request.zone_name),
                },
            ),
            Err(e) => (
                EventKind::Error,
                BookingsOutcome::Error {
                    error: e.to_string(),
                },
            ),
        };

        self.finish(kind, ActionResult::ShowBookings {
            request,
            result: outcome,
        })
    }
}
