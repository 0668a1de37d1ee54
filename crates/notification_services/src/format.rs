use spot_booking::{
    ActionResult, BookFreeOutcome, BookOutcome, BookingsOutcome, ReleaseOutcome, SpotsStateOutcome,
};

/// Render an action result as the human-readable notification body.
pub fn format_result(result: &ActionResult) -> String {
    let mut body = String::new();
    match result {
        ActionResult::BookSpot { request, result } => match result {
            BookOutcome::Success {
                zone,
                spot,
                for_date,
            } => {
                body.push_str(&format!(
                    "Spot {} in {} was booked for {}.",
                    spot.as_deref().unwrap_or("(any)"),
                    zone,
                    for_date
                ));
            }
            BookOutcome::Failure { .. } => {
                body.push_str(&format!(
                    "Couldn't book {} for {}!",
                    request.spot_names.join(", "),
                    request.for_date
                ));
            }
        },

        ActionResult::ReleaseSpot { request, result } => match result {
            ReleaseOutcome::Success { .. } => {
                body.push_str(&format!("Spot for {} was released.", request.for_date));
            }
            ReleaseOutcome::Failure { message } => body.push_str(message),
            ReleaseOutcome::Error { error } => {
                body.push_str(&format!(
                    "Couldn't release spot for {}: {}",
                    request.for_date, error
                ));
            }
        },

        ActionResult::ShowBookings { result, .. } => match result {
            BookingsOutcome::Success { bookings, .. } => {
                body.push_str("Retrieved the following bookings:\n\n");
                for booking in bookings {
                    let spot = booking
                        .my_booking
                        .as_ref()
                        .map(|b| b.name.as_str())
                        .unwrap_or("");
                    body.push_str(&format!(
                        "{:<10} | {:>8} |\n",
                        booking.day.to_string(),
                        spot
                    ));
                }
            }
            BookingsOutcome::Failure { message } => body.push_str(message),
            BookingsOutcome::Error { error } => body.push_str(error),
        },

        ActionResult::ShowSpotsState { result, .. } => match result {
            SpotsStateOutcome::Success {
                zone,
                for_date,
                spots,
            } => {
                body.push_str(&format!(
                    "Retrieved the following spots in {} for {}:\n\n",
                    zone, for_date
                ));
                for spot in spots {
                    let state = if spot.free { "free" } else { "" };
                    body.push_str(&format!("{:<8} | {:>8} |\n", spot.name, state));
                }
            }
            SpotsStateOutcome::Failure { message } => body.push_str(message),
            SpotsStateOutcome::Error { error } => body.push_str(error),
        },

        ActionResult::BookFreeSpots { request, result } => match result {
            BookFreeOutcome::Success { attempts } => {
                body.push_str(&format!(
                    "I was looking for free spots from {} and tried to book spots {}.\n\n",
                    request.start_from,
                    request.spot_names.join(", ")
                ));
                if attempts.is_empty() {
                    body.push_str("No free spots found.");
                } else {
                    body.push_str("Bookings:\n");
                    for attempt in attempts {
                        if let ActionResult::BookSpot { request, result } = attempt {
                            let booked = match result {
                                BookOutcome::Success { spot, .. } => {
                                    spot.as_deref().unwrap_or("(any)")
                                }
                                BookOutcome::Failure { .. } => "FAILED",
                            };
                            body.push_str(&format!(
                                "{:<10} | {:>8} |\n",
                                request.for_date.to_string(),
                                booked
                            ));
                        }
                    }
                }
                body.push_str("\n\n");
            }
            BookFreeOutcome::Failure { message } => body.push_str(message),
            BookFreeOutcome::Error { error } => body.push_str(error),
        },
    }
    body
}

/// The error detail of a result, when its outcome is an error.
pub(crate) fn error_text(result: &ActionResult) -> Option<&str> {
    match result {
        ActionResult::ReleaseSpot {
            result: ReleaseOutcome::Error { error },
            ..
        }
        | ActionResult::ShowBookings {
            result: BookingsOutcome::Error { error },
            ..
        }
        | ActionResult::ShowSpotsState {
            result: SpotsStateOutcome::Error { error },
            ..
        }
        | ActionResult::BookFreeSpots {
            result: BookFreeOutcome::Error { error },
            ..
        } => Some(error),
        _ => None,
    }
}
