use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request structure for booking a spot on a specific date
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookSpotRequest {
    /// Day of the reservation.
    pub for_date: NaiveDate,

    /// Zone to book in, by display name.
    #[validate(length(min = 1, message = "Zone name is required"))]
    pub zone_name: String,

    /// Ordered spot preference list; `"*"` means "any free spot".
    #[validate(length(min = 1, message = "At least one spot preference is required"))]
    pub spot_names: Vec<String>,
}

/// Request structure for releasing a reservation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReleaseSpotRequest {
    /// Day of the reservation to give up.
    pub for_date: NaiveDate,
}

/// Request structure for the booking calendar of a zone
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShowBookingsRequest {
    /// Zone to list, by display name.
    #[validate(length(min = 1, message = "Zone name is required"))]
    pub zone_name: String,
}

/// Request structure for per-spot state on a date
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShowSpotsRequest {
    /// Date of interest.
    pub for_date: NaiveDate,

    /// Zone to inspect, by display name.
    #[validate(length(min = 1, message = "Zone name is required"))]
    pub zone_name: String,
}

/// Request structure for bulk-booking free days
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookFreeRequest {
    /// Zone to book in, by display name.
    #[validate(length(min = 1, message = "Zone name is required"))]
    pub zone_name: String,

    /// Ordered spot preference list applied to every candidate day.
    #[validate(length(min = 1, message = "At least one spot preference is required"))]
    pub spot_names: Vec<String>,

    /// Resolved cutoff: only days on or after this date are considered.
    pub start_from: NaiveDate,
}

/// A spot's stable identity within a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spot {
    /// Service-internal spot identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A spot's free/busy state for one (zone, date) query. The `free` flag is
/// only meaningful for the date it was queried with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotState {
    /// Service-internal spot identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the spot can be booked on the queried date.
    pub free: bool,
}

/// The caller's reserved spot on a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookedSpot {
    /// Service-internal spot identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Zone the spot belongs to.
    pub zone_id: String,
    /// Display name of that zone.
    pub zone_name: String,
}

/// One day of the caller's booking calendar in a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBooking {
    /// The calendar day.
    pub day: NaiveDate,
    /// Number of spots still free that day.
    pub free_spots: i32,
    /// The caller's own reservation, if any.
    pub my_booking: Option<BookedSpot>,
}

/// Outcome of a single-day booking run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookOutcome {
    /// A spot was reserved.
    Success {
        /// Zone display name.
        zone: String,
        /// Name of the granted spot; absent when the service confirmed the
        /// reservation without echoing the spot back.
        #[serde(skip_serializing_if = "Option::is_none")]
        spot: Option<String>,
        /// Day the reservation holds for.
        for_date: NaiveDate,
    },
    /// Every candidate was exhausted without a reservation.
    Failure {
        /// One message per attempted candidate.
        messages: Vec<String>,
    },
}

/// Outcome of a release run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReleaseOutcome {
    /// The service confirmed with an empty body.
    Success {
        /// Human summary of the release.
        message: String,
    },
    /// The service answered with an unexpected, non-empty body.
    Failure {
        /// The body the service sent back.
        message: String,
    },
    /// The call itself failed.
    Error {
        /// What went wrong.
        error: String,
    },
}

/// Outcome of a calendar listing run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingsOutcome {
    /// The calendar was retrieved.
    Success {
        /// One entry per day, sorted by day.
        bookings: Vec<DayBooking>,
        /// Human summary.
        message: String,
    },
    /// The zone name did not resolve.
    Failure {
        /// Why nothing was listed.
        message: String,
    },
    /// The call itself failed.
    Error {
        /// What went wrong.
        error: String,
    },
}

/// Outcome of a spot-state listing run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpotsStateOutcome {
    /// The per-spot state was retrieved.
    Success {
        /// Zone display name.
        zone: String,
        /// The queried date.
        for_date: NaiveDate,
        /// Free/busy state per spot.
        spots: Vec<SpotState>,
    },
    /// The zone name did not resolve.
    Failure {
        /// Why nothing was listed.
        message: String,
    },
    /// The call itself failed.
    Error {
        /// What went wrong.
        error: String,
    },
}

/// Outcome of a bulk booking sweep.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookFreeOutcome {
    /// The sweep ran; individual days may still have failed.
    Success {
        /// One [`ActionResult`] per attempted day, in calendar order.
        attempts: Vec<ActionResult>,
    },
    /// The calendar lookup did not resolve the zone.
    Failure {
        /// Why no day was attempted.
        message: String,
    },
    /// The calendar lookup itself failed.
    Error {
        /// What went wrong.
        error: String,
    },
}

/// Structured result of one action run: the action tag, the request echoed
/// back, and the action-specific outcome. Carries everything a notifier
/// needs to render a message without re-querying the service.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionResult {
    /// Result of a single-day booking attempt.
    BookSpot {
        /// The request as received.
        request: BookSpotRequest,
        /// What happened.
        result: BookOutcome,
    },
    /// Result of releasing a reservation.
    ReleaseSpot {
        /// The request as received.
        request: ReleaseSpotRequest,
        /// What happened.
        result: ReleaseOutcome,
    },
    /// The caller's booking calendar for a zone.
    ShowBookings {
        /// The request as received.
        request: ShowBookingsRequest,
        /// What happened.
        result: BookingsOutcome,
    },
    /// Per-spot state for a zone and date.
    #[serde(rename = "show_spots")]
    ShowSpotsState {
        /// The request as received.
        request: ShowSpotsRequest,
        /// What happened.
        result: SpotsStateOutcome,
    },
    /// Per-day results of a bulk booking sweep.
    #[serde(rename = "book_free")]
    BookFreeSpots {
        /// The request as received.
        request: BookFreeRequest,
        /// What happened.
        result: BookFreeOutcome,
    },
}
