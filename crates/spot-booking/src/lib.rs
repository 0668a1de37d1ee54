//! # Spot Booking
//!
//! The action layer of the Parkanizer client: short-lived caches that
//! translate zone/spot names to service identifiers, the event/listener
//! system shared by all actions, and the five booking operations themselves.

/// The contract shared by all booking actions.
mod action;
/// Bulk booking of free weekdays in a window.
mod book_free_spots;
/// Single-day booking with an ordered preference list.
mod book_spot;
/// Per-invocation cache of the caller's booking calendar.
mod bookings_cache;
/// Event kinds, payloads and the listener registry.
mod events;
/// Releasing a reservation.
mod release_spot;
/// The caller's booking calendar for a zone.
mod show_bookings;
/// Per-spot free/busy state for a date.
mod show_state;
/// Per-invocation cache of spot listings and day-state queries.
mod spot_cache;
/// Request, result and domain types.
mod types;
/// Per-invocation cache of the zone listing.
mod zone_cache;

#[cfg(test)]
pub(crate) mod testing;

pub use action::*;
pub use book_free_spots::*;
pub use book_spot::*;
pub use bookings_cache::*;
pub use events::*;
pub use release_spot::*;
pub use show_bookings::*;
pub use show_state::*;
pub use spot_cache::*;
pub use types::*;
pub use zone_cache::*;
