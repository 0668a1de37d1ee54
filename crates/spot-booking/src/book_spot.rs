use std::sync::Arc;

use async_trait::async_trait;
use parkanizer_api::{ParkanizerApi, ParkanizerError};
use tracing::{debug, info};

use crate::action::Action;
use crate::events::{EventKind, EventPayload, Listeners};
use crate::spot_cache::SpotCache;
use crate::types::{ActionResult, BookOutcome, BookSpotRequest, SpotState};
use crate::zone_cache::ZoneCache;

/// Book a parking spot for a specific date, attempting each preferred spot
/// in order until one succeeds.
pub struct BookSpot {
    api: Arc<dyn ParkanizerApi>,
    payload: BookSpotRequest,
    zones: ZoneCache,
    spots: SpotCache,
    listeners: Listeners,
}

impl BookSpot {
    /// Create the action with its payload and fresh caches.
    pub fn new(api: Arc<dyn ParkanizerApi>, payload: BookSpotRequest) -> Self {
        info!("Payload: {:?}", payload);
        Self {
            zones: ZoneCache::new(api.clone()),
            spots: SpotCache::new(api.clone()),
            api,
            payload,
            listeners: Listeners::default(),
        }
    }

    /// Translate the preference list into spot-id candidates.
    ///
    /// A `"*"` preference becomes a single "let the service choose" entry
    /// and stops the expansion; concrete names are kept only when currently
    /// free, then resolved to ids through the spot cache.
    async fn expand_spot_selection(
        &mut self,
        zone_id: &str,
        preferences: &[String],
        spots_state: &[SpotState],
    ) -> Result<Vec<Option<String>>, ParkanizerError> {
        let available: Vec<&str> = spots_state
            .iter()
            .filter(|spot| spot.free)
            .map(|spot| spot.name.as_str())
            .collect();

        let mut candidates = Vec::new();
        for preference in preferences {
            if preference == "*" {
                candidates.push(None);
                break;
            }
            if available.contains(&preference.as_str()) {
                if let Some(spot) = self.spots.get_by_name(zone_id, preference).await? {
                    candidates.push(Some(spot.id));
                }
            }
        }
        Ok(candidates)
    }

    fn notify_error(&self, error: String) {
        self.listeners
            .notify(EventKind::Error, &EventPayload::Error { error });
    }

    fn fail(&self, request: BookSpotRequest, messages: Vec<String>) -> ActionResult {
        self.listeners
            .notify(EventKind::Failure, &EventPayload::Messages(messages.clone()));
        ActionResult::BookSpot {
            request,
            result: BookOutcome::Failure { messages },
        }
    }

    /// Run the booking flow for an arbitrary payload. Batch callers use this
    /// directly, substituting the date day by day while reusing the caches.
    pub async fn run_for_payload(&mut self, payload: &BookSpotRequest) -> ActionResult {
        info!("Booking a spot for the payload: {:?}", payload);

        let zone = match self.zones.get_by_name(&payload.zone_name).await {
            Ok(zone) => zone,
            Err(e) => {
                self.notify_error(e.to_string());
                return self.fail(payload.clone(), vec![e.to_string()]);
            }
        };
        let Some(zone) = zone else {
            let message = format!("Zone '{}' not found", payload.zone_name);
            return self.fail(payload.clone(), vec![message]);
        };

        let spots_state = match self.spots.get_spots_state(&zone.id, payload.for_date).await {
            Ok(state) => state,
            Err(e) => {
                self.notify_error(e.to_string());
                return self.fail(payload.clone(), vec![e.to_string()]);
            }
        };

        let candidates = match self
            .expand_spot_selection(&zone.id, &payload.spot_names, &spots_state)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                self.notify_error(e.to_string());
                return self.fail(payload.clone(), vec![e.to_string()]);
            }
        };

        debug!("Zone ID: {}; spot candidates: {:?}", zone.id, candidates);

        let mut failures = Vec::new();
        for spot_id in &candidates {
            match self
                .api
                .take_spot(&zone.id, spot_id.as_deref(), payload.for_date)
                .await
            {
                Ok(response) => {
                    if let Some(status) = response.status {
                        if status == "Reserved" {
                            let spot = response
                                .received_parking_spot_or_null
                                .map(|received| received.name);
                            let result = ActionResult::BookSpot {
                                request: payload.clone(),
                                result: BookOutcome::Success {
                                    zone: zone.name.clone(),
                                    spot,
                                    for_date: payload.for_date,
                                },
                            };
                            return self.finish(EventKind::Success, result);
                        }
                        failures.push(format!(
                            "Couldn't reserve spot {} for {}",
                            spot_id.as_deref().unwrap_or("<any>"),
                            payload.for_date
                        ));
                    }
                }
                Err(e) => self.notify_error(e.to_string()),
            }
        }

        self.fail(payload.clone(), failures)
    }
}

#[async_trait]
impl Action for BookSpot {
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

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;
    use crate::events::Listener;
    use crate::testing::{MockApi, TakeSpotReply};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(spots: &[&str]) -> BookSpotRequest {
        BookSpotRequest {
            for_date: date(2026, 8, 10),
            zone_name: "Garage".to_string(),
            spot_names: spots.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn garage_api() -> MockApi {
        let mut api = MockApi::with_zones(&[("z1", "Garage")]);
        api.set_map("z1", &[("s1", "A", "Taken"), ("s2", "B", "Free")]);
        api
    }

    fn event_recorder(log: Arc<Mutex<Vec<EventKind>>>) -> Listener {
        Arc::new(move |kind, _payload| log.lock().unwrap().push(kind))
    }

    #[tokio::test]
    async fn wildcard_attempts_exactly_one_unnamed_take() {
        let api = garage_api();
        api.script_takes(vec![TakeSpotReply::Reserved(Some("B"))]);
        let api = Arc::new(api);

        let mut action = BookSpot::new(api.clone(), request(&["*", "A", "B"]));
        let result = action.run().await;

        let calls = api.take_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].spot_id, None);
        assert_eq!(calls[0].zone_id, "z1");

        match result {
            ActionResult::BookSpot {
                result: BookOutcome::Success { spot, .. },
                ..
            } => assert_eq!(spot.as_deref(), Some("B")),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn busy_preferences_are_filtered_before_any_attempt() {
        let api = garage_api();
        api.script_takes(vec![TakeSpotReply::Reserved(Some("B"))]);
        let api = Arc::new(api);

        // "A" is taken on the queried date, so only "B" may be attempted.
        let mut action = BookSpot::new(api.clone(), request(&["A", "B"]));
        action.run().await;

        let calls = api.take_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].spot_id.as_deref(), Some("s2"));
    }

    #[tokio::test]
    async fn exhausted_candidates_fail_with_one_message_each() {
        let mut api = MockApi::with_zones(&[("z1", "Garage")]);
        api.set_map("z1", &[("s1", "A", "Free"), ("s2", "B", "Free")]);
        api.script_takes(vec![TakeSpotReply::Rejected, TakeSpotReply::Rejected]);
        let api = Arc::new(api);

        let events = Arc::new(Mutex::new(Vec::new()));
        let mut action = BookSpot::new(api.clone(), request(&["A", "B"]));
        action.register_listener(event_recorder(events.clone()), None);
        let result = action.run().await;

        assert_eq!(api.take_calls.lock().unwrap().len(), 2);
        match result {
            ActionResult::BookSpot {
                result: BookOutcome::Failure { messages },
                ..
            } => assert_eq!(messages.len(), 2),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(*events.lock().unwrap(), vec![EventKind::Failure]);
    }

    #[tokio::test]
    async fn an_erroring_candidate_does_not_abort_the_rest() {
        let mut api = MockApi::with_zones(&[("z1", "Garage")]);
        api.set_map("z1", &[("s1", "A", "Free"), ("s2", "B", "Free")]);
        api.script_takes(vec![
            TakeSpotReply::Fail("connection reset"),
            TakeSpotReply::Reserved(Some("B")),
        ]);
        let api = Arc::new(api);

        let events = Arc::new(Mutex::new(Vec::new()));
        let mut action = BookSpot::new(api.clone(), request(&["A", "B"]));
        action.register_listener(event_recorder(events.clone()), None);
        let result = action.run().await;

        assert_eq!(api.take_calls.lock().unwrap().len(), 2);
        assert!(matches!(
            result,
            ActionResult::BookSpot {
                result: BookOutcome::Success { .. },
                ..
            }
        ));
        // the error on the first candidate was reported, then success
        assert_eq!(
            *events.lock().unwrap(),
            vec![EventKind::Error, EventKind::Success]
        );
    }

    #[tokio::test]
    async fn a_status_less_response_records_no_failure_message() {
        let mut api = MockApi::with_zones(&[("z1", "Garage")]);
        api.set_map("z1", &[("s1", "A", "Free"), ("s2", "B", "Free")]);
        api.script_takes(vec![TakeSpotReply::NoStatus, TakeSpotReply::Rejected]);
        let api = Arc::new(api);

        let mut action = BookSpot::new(api.clone(), request(&["A", "B"]));
        let result = action.run().await;

        match result {
            ActionResult::BookSpot {
                result: BookOutcome::Failure { messages },
                ..
            } => assert_eq!(messages.len(), 1),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_zone_fails_without_touching_the_service() {
        let api = Arc::new(garage_api());

        let events = Arc::new(Mutex::new(Vec::new()));
        let mut action = BookSpot::new(
            api.clone(),
            BookSpotRequest {
                for_date: date(2026, 8, 10),
                zone_name: "Rooftop".to_string(),
                spot_names: vec!["A".to_string()],
            },
        );
        action.register_listener(event_recorder(events.clone()), None);
        let result = action.run().await;

        assert!(api.take_calls.lock().unwrap().is_empty());
        assert!(matches!(
            result,
            ActionResult::BookSpot {
                result: BookOutcome::Failure { .. },
                ..
            }
        ));
        assert_eq!(*events.lock().unwrap(), vec![EventKind::Failure]);
    }
}
