use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use parkanizer_api::ParkanizerApi;
use tracing::{debug, info};

use crate::action::Action;
use crate::book_spot::BookSpot;
use crate::events::{EventKind, Listeners};
use crate::show_bookings::ShowBookings;
use crate::types::{
    ActionResult, BookFreeOutcome, BookFreeRequest, BookSpotRequest, BookingsOutcome, DayBooking,
    ShowBookingsRequest,
};

/// Sweep the zone's booking calendar and book every eligible free weekday.
///
/// The calendar comes from a [`ShowBookings`] collaborator; every surviving
/// day is delegated to [`BookSpot::run_for_payload`] with the day substituted
/// into the shared zone/spot preference payload. Individual days may fail
/// without failing the sweep: the overall result is a `success` carrying the
/// ordered per-day outcomes.
pub struct BookFreeSpots {
    api: Arc<dyn ParkanizerApi>,
    payload: BookFreeRequest,
    listeners: Listeners,
}

impl BookFreeSpots {
    /// Create the action with its payload.
    pub fn new(api: Arc<dyn ParkanizerApi>, payload: BookFreeRequest) -> Self {
        info!("Payload: {:?}", payload);
        Self {
            api,
            payload,
            listeners: Listeners::default(),
        }
    }

    /// A day is bookable when it is on or after the cutoff, not already
    /// booked by the caller, a weekday, and has at least one free spot.
    fn bookable(booking: &DayBooking, start_from: NaiveDate) -> bool {
        booking.day >= start_from
            && booking.my_booking.is_none()
            && booking.day.weekday().number_from_monday() <= 5
            && booking.free_spots > 0
    }
}

#[async_trait]
impl Action for BookFreeSpots {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    async fn run(&mut self) -> ActionResult {
        info!("Booking free spots for the payload: {:?}", self.payload);
        let request = self.payload.clone();

        let mut show = ShowBookings::new(self.api.clone(), ShowBookingsRequest {
            zone_name: request.zone_name.clone(),
        });
        let calendar = match show.run().await {
            ActionResult::ShowBookings { result, .. } => result,
            _ => BookingsOutcome::Error {
                error: "Unexpected collaborator result".to_string(),
            },
        };
        let bookings = match calendar {
            BookingsOutcome::Success { bookings, .. } => bookings,
            BookingsOutcome::Failure { message } => {
                return self.finish(EventKind::Failure, ActionResult::BookFreeSpots {
                    request,
                    result: BookFreeOutcome::Failure { message },
                });
            }
            BookingsOutcome::Error { error } => {
                return self.finish(EventKind::Error, ActionResult::BookFreeSpots {
                    request,
                    result: BookFreeOutcome::Error { error },
                });
            }
        };

        let candidates: Vec<NaiveDate> = bookings
            .iter()
            .filter(|booking| Self::bookable(booking, request.start_from))
            .map(|booking| booking.day)
            .collect();
        debug!("Candidate days: {:?}", candidates);

        // one BookSpot for the whole sweep, so its caches carry across days
        let mut book = BookSpot::new(self.api.clone(), BookSpotRequest {
            for_date: request.start_from,
            zone_name: request.zone_name.clone(),
            spot_names: request.spot_names.clone(),
        });

        let mut attempts = Vec::new();
        for day in candidates {
            let payload = BookSpotRequest {
                for_date: day,
                zone_name: request.zone_name.clone(),
                spot_names: request.spot_names.clone(),
            };
            attempts.push(book.run_for_payload(&payload).await);
        }

        self.finish(EventKind::Success, ActionResult::BookFreeSpots {
            request,
            result: BookFreeOutcome::Success { attempts },
        })
    }
}
