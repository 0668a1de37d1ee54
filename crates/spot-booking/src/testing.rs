//! Test support: a scriptable, call-recording [`ParkanizerApi`] mock.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use parkanizer_api::{
    CalendarDay, CalendarWeek, Employee, MapSpot, ParkanizerApi, ParkanizerError, ReceivedSpot,
    ReservedSpot, SpotZoneMap, SpotZoneMapResponse, SpotsCalendarResponse, TakeSpotResponse, Zone,
};

/// Scripted reply for one `take_spot` call, consumed front to back.
pub enum TakeSpotReply {
    /// `"Reserved"`, optionally echoing the granted spot name.
    Reserved(Option<&'static str>),
    /// A non-`"Reserved"` status.
    Rejected,
    /// No `status` field in the response at all.
    NoStatus,
    /// Transport failure.
    Fail(&'static str),
}

/// One recorded `take_spot` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TakeSpotCall {
    pub zone_id: String,
    pub spot_id: Option<String>,
    pub day: NaiveDate,
}

/// Call-recording mock of the remote service.
#[derive(Default)]
pub struct MockApi {
    pub zones: Vec<Zone>,
    pub maps: HashMap<String, Vec<MapSpot>>,
    pub calendar: Vec<CalendarDay>,
    pub take_replies: Mutex<VecDeque<TakeSpotReply>>,
    pub release_reply: Mutex<Option<Result<String, String>>>,

    pub zone_fetches: Mutex<u32>,
    pub map_fetches: Mutex<u32>,
    pub calendar_fetches: Mutex<u32>,
    pub take_calls: Mutex<Vec<TakeSpotCall>>,
    pub release_calls: Mutex<Vec<NaiveDate>>,
}

impl MockApi {
    /// Mock with the given (id, name) zones and nothing else.
    pub fn with_zones(zones: &[(&str, &str)]) -> Self {
        Self {
            zones: zones
                .iter()
                .map(|(id, name)| Zone {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Register the zone map served for `zone_id` as (id, name, state) rows.
    pub fn set_map(&mut self, zone_id: &str, spots: &[(&str, &str, &str)]) {
        self.maps.insert(
            zone_id.to_string(),
            spots
                .iter()
                .map(|(id, name, state)| MapSpot {
                    id: id.to_string(),
                    name: name.to_string(),
                    state: state.to_string(),
                })
                .collect(),
        );
    }

    /// Queue replies for successive `take_spot` calls.
    pub fn script_takes(&self, replies: Vec<TakeSpotReply>) {
        *self.take_replies.lock().unwrap() = replies.into();
    }
}

/// Build one calendar day, optionally carrying the caller's own (id, name)
/// reservation in zone `z1`/`Garage`.
pub fn calendar_day(
    day: NaiveDate,
    free_spots: i32,
    my_booking: Option<(&str, &str)>,
) -> CalendarDay {
    CalendarDay {
        day,
        free_spots,
        reserved_parking_spot_or_null: my_booking.map(|(id, name)| ReservedSpot {
            id: id.to_string(),
            name: name.to_string(),
            parking_spot_zone_id: "z1".to_string(),
            parking_spot_zone_name: "Garage".to_string(),
        }),
    }
}

#[async_trait]
impl ParkanizerApi for MockApi {
    async fn get_zones(&self) -> Result<Vec<Zone>, ParkanizerError> {
        *self.zone_fetches.lock().unwrap() += 1;
        Ok(self.zones.clone())
    }

    async fn get_my_reservations(&self) -> Result<Vec<serde_json::Value>, ParkanizerError> {
        Ok(Vec::new())
    }

    async fn get_spots(&self, _zone_id: &str) -> Result<SpotsCalendarResponse, ParkanizerError> {
        *self.calendar_fetches.lock().unwrap() += 1;
        Ok(SpotsCalendarResponse {
            weeks: vec![CalendarWeek {
                week: self.calendar.clone(),
            }],
        })
    }

    async fn get_spots_map(
        &self,
        zone_id: &str,
        _for_date: Option<NaiveDate>,
    ) -> Result<SpotZoneMapResponse, ParkanizerError> {
        *self.map_fetches.lock().unwrap() += 1;
        Ok(SpotZoneMapResponse {
            map_or_null: self.maps.get(zone_id).map(|spots| SpotZoneMap {
                parking_spots: spots.clone(),
            }),
        })
    }

    async fn take_spot(
        &self,
        zone_id: &str,
        spot_id: Option<&str>,
        day: NaiveDate,
    ) -> Result<TakeSpotResponse, ParkanizerError> {
        self.take_calls.lock().unwrap().push(TakeSpotCall {
            zone_id: zone_id.to_string(),
            spot_id: spot_id.map(str::to_string),
            day,
        });

        let reply = self
            .take_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(TakeSpotReply::Rejected);

        match reply {
            TakeSpotReply::Reserved(name) => Ok(TakeSpotResponse {
                status: Some("Reserved".to_string()),
                received_parking_spot_or_null: name.map(|name| ReceivedSpot {
                    id: None,
                    name: name.to_string(),
                }),
            }),
            TakeSpotReply::Rejected => Ok(TakeSpotResponse {
                status: Some("SpotNotAvailable".to_string()),
                received_parking_spot_or_null: None,
            }),
            TakeSpotReply::NoStatus => Ok(TakeSpotResponse {
                status: None,
                received_parking_spot_or_null: None,
            }),
            TakeSpotReply::Fail(message) => Err(ParkanizerError::Network(message.to_string())),
        }
    }

    async fn release_spot(&self, day: NaiveDate) -> Result<String, ParkanizerError> {
        self.release_calls.lock().unwrap().push(day);
        match self.release_reply.lock().unwrap().take() {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(ParkanizerError::Network(message)),
            None => Ok(String::new()),
        }
    }

    async fn get_beneficiaries(
        &self,
        _for_date: NaiveDate,
    ) -> Result<Vec<Employee>, ParkanizerError> {
        Ok(Vec::new())
    }
}
