//! `padel`: court availability, booking and booking history from the terminal.

mod app_state;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use padel_common::logging::level_from_str;
use padel_common::{config_error, PadelError};
use padel_config::load_config;
use padel_db::DbError;
use padel_engine::EngineError;
use padel_playtomic::PlaytomicError;

use crate::app_state::AppState;
use crate::commands::auth::AuthCommand;
use crate::commands::book::BookArgs;
use crate::commands::bookings::BookingsCommand;
use crate::commands::search::{AvailabilityArgs, ClubsArgs, SearchArgs};
use crate::commands::venues::VenuesCommand;
use crate::output::OutputMode;

/// Padel CLI for Playtomic availability
#[derive(Parser, Debug)]
#[command(name = "padel", version)]
struct Args {
    /// Output JSON
    #[arg(long, global = true)]
    json: bool,

    /// Output compact text
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List padel clubs near a location
    Clubs(ClubsArgs),

    /// Show availability for a club on a date
    Availability(AvailabilityArgs),

    /// Search for available courts
    Search(SearchArgs),

    /// Book a court
    Book(BookArgs),

    /// Manage saved venues
    Venues {
        #[command(subcommand)]
        action: VenuesCommand,
    },

    /// Manage bookings history
    Bookings {
        #[command(subcommand)]
        action: BookingsCommand,
    },

    /// Manage authentication
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    run(args).await.map_err(categorize)
}

async fn run(args: Args) -> Result<()> {
    let mode = OutputMode::from_flags(args.json, args.compact)?;

    let config = load_config().map_err(config_error)?;
    padel_common::init_with_level(level_from_str(&config.logging.level));
    let state = AppState::new(config);

    match args.command {
        Command::Clubs(clubs) => commands::search::run_clubs(&state, clubs, mode).await,
        Command::Availability(availability) => {
            commands::search::run_availability(&state, availability, mode).await
        }
        Command::Search(search) => commands::search::run_search(&state, search, mode).await,
        Command::Book(book) => commands::book::run_book(&state, book, mode).await,
        Command::Venues { action } => commands::venues::run_venues(&state, action, mode),
        Command::Bookings { action } => {
            commands::bookings::run_bookings(&state, action, mode).await
        }
        Command::Auth { action } => commands::auth::run_auth(&state, action).await,
    }
}

/// Maps failures from the library crates onto the shared error categories.
/// Errors raised by the CLI itself pass through unchanged.
fn categorize(err: anyhow::Error) -> anyhow::Error {
    let err = match err.downcast::<EngineError>() {
        Ok(err) => return PadelError::from(err).into(),
        Err(err) => err,
    };
    let err = match err.downcast::<DbError>() {
        Ok(err) => return PadelError::from(err).into(),
        Err(err) => err,
    };
    let err = match err.downcast::<PlaytomicError>() {
        Ok(err) => return PadelError::from(err).into(),
        Err(err) => err,
    };
    let err = match err.downcast::<serde_json::Error>() {
        Ok(err) => return PadelError::from(err).into(),
        Err(err) => err,
    };
    match err.downcast::<std::io::Error>() {
        Ok(err) => PadelError::from(err).into(),
        Err(err) => err,
    }
}
