use std::sync::Arc;

use async_trait::async_trait;
use parkanizer_api::ParkanizerApi;
use tracing::info;

use crate::action::Action;
use crate::events::{EventKind, Listeners};
use crate::types::{ActionResult, ReleaseOutcome, ReleaseSpotRequest};

/// Give a reserved spot back for one day.
///
/// The service confirms with an empty response body; a non-empty body is
/// treated as a failure carrying whatever the service sent back.
pub struct ReleaseSpot {
    api: Arc<dyn ParkanizerApi>,
    payload: ReleaseSpotRequest,
    listeners: Listeners,
}

impl ReleaseSpot {
    /// Create the action with its payload.
    pub fn new(api: Arc<dyn ParkanizerApi>, payload: ReleaseSpotRequest) -> Self {
        info!("Payload: {:?}", payload);
        Self {
            api,
            payload,
            listeners: Listeners::default(),
        }
    }
}

#[async_trait]
impl Action for ReleaseSpot {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    async fn run(&mut self) -> ActionResult {
        info!("Releasing a spot for the payload: {:?}", self.payload);
        let request = self.payload.clone();

        let (kind, outcome) = match self.api.release_spot(request.for_date).await {
            Ok(body) if body.is_empty() => (
                EventKind::Success,
                ReleaseOutcome::Success {
                    message: format!("Released spot for {} successfully", request.for_date),
                },
            ),
            Ok(body) => (
                EventKind::Failure,
                ReleaseOutcome::Failure {
                    message: format!(
                        "Unexpected response while releasing spot for {}: {}",
                        request.for_date, body
                    ),
                },
            ),
            Err(e) => (
                EventKind::Error,
                ReleaseOutcome::Error {
                    error: e.to_string(),
                },
            ),
        };

        self.finish(kind, ActionResult::ReleaseSpot {
            request,
            result: outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;
    use crate::events::Listener;
    use crate::testing::MockApi;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_recorder(log: Arc<Mutex<Vec<EventKind>>>) -> Listener {
        Arc::new(move |kind, _payload| log.lock().unwrap().push(kind))
    }

    #[tokio::test]
    async fn empty_body_is_success() {
        let api = Arc::new(MockApi::default());
        let events = Arc::new(Mutex::new(Vec::new()));

        let mut action = ReleaseSpot::new(api.clone(), ReleaseSpotRequest {
            for_date: date(2026, 8, 10),
        });
        action.register_listener(event_recorder(events.clone()), None);
        let result = action.run().await;

        assert_eq!(*api.release_calls.lock().unwrap(), vec![date(2026, 8, 10)]);
        assert!(matches!(
            result,
            ActionResult::ReleaseSpot {
                result: ReleaseOutcome::Success { .. },
                ..
            }
        ));
        assert_eq!(*events.lock().unwrap(), vec![EventKind::Success]);
    }

    #[tokio::test]
    async fn non_empty_body_is_failure() {
        let api = MockApi::default();
        *api.release_reply.lock().unwrap() = Some(Ok("{\"reason\":\"NothingToShare\"}".to_string()));
        let api = Arc::new(api);
        let events = Arc::new(Mutex::new(Vec::new()));

        let mut action = ReleaseSpot::new(api, ReleaseSpotRequest {
            for_date: date(2026, 8, 10),
        });
        action.register_listener(event_recorder(events.clone()), None);
        let result = action.run().await;

        match result {
            ActionResult::ReleaseSpot {
                result: ReleaseOutcome::Failure { message },
                ..
            } => assert!(message.contains("NothingToShare")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(*events.lock().unwrap(), vec![EventKind::Failure]);
    }

    #[tokio::test]
    async fn transport_error_is_an_error_event() {
        let api = MockApi::default();
        *api.release_reply.lock().unwrap() = Some(Err("connection reset".to_string()));
        let api = Arc::new(api);
        let events = Arc::new(Mutex::new(Vec::new()));

        let mut action = ReleaseSpot::new(api, ReleaseSpotRequest {
            for_date: date(2026, 8, 10),
        });
        action.register_listener(event_recorder(events.clone()), None);
        let result = action.run().await;

        match result {
            ActionResult::ReleaseSpot {
                result: ReleaseOutcome::Error { error },
                ..
            } => assert!(error.contains("connection reset")),
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(*events.lock().unwrap(), vec![EventKind::Error]);
    }
}
