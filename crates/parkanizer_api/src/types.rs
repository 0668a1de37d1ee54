use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A parking spot zone visible to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Service-internal zone identifier.
    pub id: String,
    /// Display name, used for lookups from the command line.
    pub name: String,
}

/// Response from the zone listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonesResponse {
    /// The zones the caller may book in.
    pub parking_spot_zones: Vec<Zone>,
}

/// The fixed full-day booking window exchanged with every spot endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTimeInterval {
    /// Window start as an ISO-8601 duration token.
    pub from_booking_time: String,
    /// Window end as an ISO-8601 duration token.
    pub to_booking_time: String,
}

impl Default for BookingTimeInterval {
    fn default() -> Self {
        Self {
            from_booking_time: "P0DT00H00M".to_string(),
            to_booking_time: "P1DT00H00M".to_string(),
        }
    }
}

/// Request body for the booking calendar endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSpotsRequest {
    /// Zone to retrieve the calendar for.
    pub parking_spot_zone_id: String,
    /// Always the full-day window.
    pub booking_time_interval: BookingTimeInterval,
}

/// Request body for the zone map endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSpotsMapRequest {
    /// Zone to retrieve the map for.
    pub parking_spot_zone_id: String,
    /// Date the per-spot state is scoped to.
    pub date: NaiveDate,
    /// Always the full-day window.
    pub booking_time_interval: BookingTimeInterval,
}

/// Request body for taking a spot from the marketplace.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeSpotWireRequest {
    /// Day to reserve.
    pub day_to_take: NaiveDate,
    /// Zone to reserve in.
    pub parking_spot_zone_id: String,
    /// Omitted from the payload entirely when `None`: the service then books
    /// any available spot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_spot_id_or_null: Option<String>,
    /// Always the full-day window.
    pub booking_time_interval: BookingTimeInterval,
}

/// Request body for releasing (sharing back) reserved days.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResignWireRequest {
    /// Days the caller gives up.
    pub days_to_share: Vec<NaiveDate>,
    /// Serialized as an explicit `null`: the spot goes back to the pool.
    pub receiving_employee_id_or_null: Option<String>,
}

/// Request body for the beneficiary listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEmployeesRequest {
    /// Days a cancelled reservation would free up.
    pub days_to_share: Vec<NaiveDate>,
}

/// Response from the zone map endpoint. The map may be missing when the
/// zone id is unknown to the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotZoneMapResponse {
    /// The zone map, if the service recognized the zone.
    pub map_or_null: Option<SpotZoneMap>,
}

/// The spots laid out on a zone map.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotZoneMap {
    /// All spots in the zone, with their state for the queried date.
    pub parking_spots: Vec<MapSpot>,
}

/// A spot entry on the zone map.
#[derive(Debug, Clone, Deserialize)]
pub struct MapSpot {
    /// Service-internal spot identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// State for the queried date; `"Free"` means bookable.
    pub state: String,
}

/// Weekly booking calendar from the marketplace spots endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotsCalendarResponse {
    /// Calendar weeks inside the active reservation window.
    #[serde(default)]
    pub weeks: Vec<CalendarWeek>,
}

/// One week of the booking calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarWeek {
    /// The days of this week.
    #[serde(default)]
    pub week: Vec<CalendarDay>,
}

/// One day of the caller's booking calendar.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// The calendar day.
    pub day: NaiveDate,
    /// Number of spots still free that day.
    #[serde(default)]
    pub free_spots: i32,
    /// The caller's own reservation, if any.
    pub reserved_parking_spot_or_null: Option<ReservedSpot>,
}

/// The caller's reserved spot on a calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedSpot {
    /// Service-internal spot identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Zone the spot belongs to.
    pub parking_spot_zone_id: String,
    /// Display name of that zone.
    pub parking_spot_zone_name: String,
}

/// Response from the take-spot endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeSpotResponse {
    /// `"Reserved"` when the booking went through.
    pub status: Option<String>,
    /// The spot the service granted.
    pub received_parking_spot_or_null: Option<ReceivedSpot>,
}

/// The spot granted by a successful take.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceivedSpot {
    /// Service-internal spot identifier.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
}

/// Response from the token refresh endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    /// The fresh token pair, or `null` when the refresh cookie was rejected.
    pub new_token_or_null: Option<NewToken>,
}

/// A freshly issued access token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewToken {
    /// The bearer token for subsequent requests.
    pub access_token: String,
}

/// Response from the reservation listing endpoint. The entries are passed
/// through untyped: nothing in the client consumes their shape.
#[derive(Debug, Clone, Deserialize)]
pub struct MyReservationsResponse {
    /// The caller's current reservations.
    #[serde(default)]
    pub reservations: Vec<serde_json::Value>,
}

/// An employee eligible to receive a cancelled reservation.
#[derive(Debug, Clone, Deserialize)]
pub struct Employee {
    /// Service-internal employee identifier.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

/// Response from the beneficiary listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeesResponse {
    /// Eligible employees, or `null` when there are none.
    pub employees_or_null: Option<Vec<Employee>>,
}
