//! Parkanizer command-line client: book, release and inspect parking spot
//! reservations from the terminal.

mod config;

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, TimeDelta};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use notification_services::{EmailNotifier, GmailEmailService, format_result};
use parkanizer_api::{Session, SessionConfig};
use spot_booking::{
    Action, BookFreeRequest, BookFreeSpots, BookSpot, BookSpotRequest, EventKind, EventPayload,
    Listener, ReleaseSpot, ReleaseSpotRequest, ShowBookings, ShowBookingsRequest, ShowSpotsRequest,
    ShowSpotsState,
};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "parkctl")]
#[command(about = "Manage parking spot reservations on Parkanizer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Book a parking spot for a specific date
    BookSpot {
        /// Date of the reservation in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Name of the spot to book (repeatable; "*" books any free spot)
        #[arg(short, long)]
        spot: Vec<String>,
    },
    /// Release a previously reserved parking spot
    ReleaseSpot {
        /// Date of the reservation in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show all current bookings for your account
    ShowBookings,
    /// Show spot status for a specific date
    ShowSpots {
        /// Date of interest in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Automatically book free weekdays within the configured window
    BookFree {
        /// Start booking from this date (YYYY-MM-DD format)
        #[arg(short = 'f', long, conflicts_with = "look_ahead")]
        start_from: Option<NaiveDate>,

        /// Number of days from today to start booking free spots
        #[arg(short, long)]
        look_ahead: Option<i64>,
    },
}

/// Buffers events raised during an action run so they can be delivered
/// through the async notifier once the run has returned.
#[derive(Default)]
struct EventBuffer {
    events: Mutex<Vec<(EventKind, EventPayload)>>,
}

impl EventBuffer {
    fn listener(self: Arc<Self>) -> Listener {
        Arc::new(move |kind, payload| {
            self.events.lock().unwrap().push((kind, payload.clone()));
        })
    }

    fn drain(&self) -> Vec<(EventKind, EventPayload)> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

/// Listener that traces every event with its payload.
fn log_listener() -> Listener {
    Arc::new(|kind, payload| {
        info!(
            "{}, {}",
            kind,
            serde_json::to_string(payload).unwrap_or_default()
        );
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("configuration error")?;

    let session = Arc::new(Session::new(Some(SessionConfig {
        secrets_path: config.secrets_path.clone(),
        ..SessionConfig::default()
    }))?);
    session
        .login(&config.user, &config.password)
        .await
        .context("failed to authenticate with Parkanizer")?;

    let notifier = config.gmail.as_ref().map(|gmail| {
        EmailNotifier::new(
            Arc::new(GmailEmailService::new(
                gmail.user.clone(),
                gmail.password.clone(),
            )),
            gmail.recipients.clone(),
        )
    });

    let today = Local::now().date_naive();
    let buffer = Arc::new(EventBuffer::default());

    let result = match cli.command {
        Commands::BookSpot { date, spot } => {
            let spot_names = if spot.is_empty() {
                config.spots.clone()
            } else {
                spot
            };
            let payload = BookSpotRequest {
                for_date: date.unwrap_or(today),
                zone_name: config.zone.clone(),
                spot_names,
            };
            payload.validate().context("invalid book-spot request")?;

            let mut action = BookSpot::new(session.clone(), payload);
            action.register_listener(log_listener(), None);
            action.register_listener(buffer.clone().listener(), None);
            action.run().await
        }
        Commands::ReleaseSpot { date } => {
            let payload = ReleaseSpotRequest {
                for_date: date.unwrap_or(today),
            };

            let mut action = ReleaseSpot::new(session.clone(), payload);
            action.register_listener(log_listener(), None);
            action.register_listener(buffer.clone().listener(), None);
            action.run().await
        }
        Commands::ShowBookings => {
            let payload = ShowBookingsRequest {
                zone_name: config.zone.clone(),
            };
            payload.validate().context("invalid show-bookings request")?;

            let mut action = ShowBookings::new(session.clone(), payload);
            action.register_listener(log_listener(), None);
            action.register_listener(buffer.clone().listener(), None);
            action.run().await
        }
        Commands::ShowSpots { date } => {
            let payload = ShowSpotsRequest {
                for_date: date.unwrap_or(today),
                zone_name: config.zone.clone(),
            };
            payload.validate().context("invalid show-spots request")?;

            let mut action = ShowSpotsState::new(session.clone(), payload);
            action.register_listener(log_listener(), None);
            action.register_listener(buffer.clone().listener(), None);
            action.run().await
        }
        Commands::BookFree {
            start_from,
            look_ahead,
        } => {
            let start_from = start_from
                .unwrap_or_else(|| today + TimeDelta::days(look_ahead.unwrap_or(config.look_ahead)));
            let payload = BookFreeRequest {
                zone_name: config.zone.clone(),
                spot_names: config.spots.clone(),
                start_from,
            };
            payload.validate().context("invalid book-free request")?;

            let mut action = BookFreeSpots::new(session.clone(), payload);
            action.register_listener(log_listener(), None);
            action.register_listener(buffer.clone().listener(), None);
            action.run().await
        }
    };

    if let Some(notifier) = &notifier {
        for (kind, payload) in buffer.drain() {
            notifier.notify(kind, &payload).await;
        }
    }

    println!("{}", format_result(&result));
    Ok(())
}
