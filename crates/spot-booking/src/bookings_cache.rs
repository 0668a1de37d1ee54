use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use parkanizer_api::{ParkanizerApi, ParkanizerError, SpotsCalendarResponse};
use tracing::debug;

use crate::types::{BookedSpot, DayBooking};

/// Lazy per-invocation cache of the caller's booking calendar, keyed by
/// zone id. One calendar fetch per zone for the cache's lifetime.
pub struct BookingsCache {
    api: Arc<dyn ParkanizerApi>,
    bookings: HashMap<String, Vec<DayBooking>>,
}

impl BookingsCache {
    /// Create an empty cache over the given service handle.
    pub fn new(api: Arc<dyn ParkanizerApi>) -> Self {
        Self {
            api,
            bookings: HashMap::new(),
        }
    }

    fn flatten_calendar(response: SpotsCalendarResponse) -> Vec<DayBooking> {
        let mut days: Vec<DayBooking> = response
            .weeks
            .into_iter()
            .flat_map(|week| week.week)
            .map(|entry| DayBooking {
                day: entry.day,
                free_spots: entry.free_spots,
                my_booking: entry.reserved_parking_spot_or_null.map(|spot| BookedSpot {
                    id: spot.id,
                    name: spot.name,
                    zone_id: spot.parking_spot_zone_id,
                    zone_name: spot.parking_spot_zone_name,
                }),
            })
            .collect();
        days.sort_by_key(|booking| booking.day);
        days
    }

    /// The calendar for a zone, fetched once per zone id, sorted by day.
    pub async fn get_bookings(&mut self, zone_id: &str) -> Result<&[DayBooking], ParkanizerError> {
        if !self.bookings.contains_key(zone_id) {
            debug!("Bookings cache miss for zone {}, fetching calendar", zone_id);
            let response = self.api.get_spots(zone_id).await?;
            self.bookings
                .insert(zone_id.to_string(), Self::flatten_calendar(response));
        }
        Ok(self
            .bookings
            .get(zone_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// The calendar entry for a day. `Ok(None)` when the day is not listed.
    pub async fn get_by_date(
        &mut self,
        zone_id: &str,
        day: NaiveDate,
    ) -> Result<Option<DayBooking>, ParkanizerError> {
        Ok(self
            .get_bookings(zone_id)
            .await?
            .iter()
            .find(|booking| booking.day == day)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockApi, calendar_day};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn api_with_calendar() -> Arc<MockApi> {
        let mut api = MockApi::with_zones(&[("z1", "Garage")]);
        // out of order on the wire; the cache sorts by day
        api.calendar = vec![
            calendar_day(date(2026, 8, 12), 3, None),
            calendar_day(date(2026, 8, 10), 0, Some(("s1", "A"))),
            calendar_day(date(2026, 8, 11), 1, None),
        ];
        Arc::new(api)
    }

    #[tokio::test]
    async fn calendar_is_flattened_and_sorted() {
        let mut cache = BookingsCache::new(api_with_calendar());

        let bookings = cache.get_bookings("z1").await.unwrap();
        let days: Vec<NaiveDate> = bookings.iter().map(|b| b.day).collect();
        assert_eq!(
            days,
            vec![date(2026, 8, 10), date(2026, 8, 11), date(2026, 8, 12)]
        );

        let own = bookings[0].my_booking.as_ref().unwrap();
        assert_eq!(own.name, "A");
        assert_eq!(own.zone_id, "z1");
    }

    #[tokio::test]
    async fn missing_day_resolves_to_none() {
        let mut cache = BookingsCache::new(api_with_calendar());

        assert_eq!(cache.get_by_date("z1", date(2026, 9, 1)).await.unwrap(), None);
        assert!(
            cache
                .get_by_date("z1", date(2026, 8, 11))
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn calendar_is_fetched_once_per_zone() {
        let api = api_with_calendar();
        let mut cache = BookingsCache::new(api.clone());

        cache.get_bookings("z1").await.unwrap();
        cache.get_by_date("z1", date(2026, 8, 10)).await.unwrap();

        assert_eq!(*api.calendar_fetches.lock().unwrap(), 1);
    }
}
