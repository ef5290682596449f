use anyhow::Result;
use chrono::Utc;
use padel_engine::{book_court, BookRequest};

use super::non_empty;
use crate::app_state::AppState;
use crate::output::{self, OutputMode};

#[derive(clap::Args, Debug)]
pub struct BookArgs {
    /// Saved venue alias
    #[arg(long)]
    pub venue: String,
    /// Date (YYYY-MM-DD, today or tomorrow)
    #[arg(long)]
    pub date: String,
    /// Start time (HH:MM), venue-local
    #[arg(long)]
    pub time: String,
    /// Duration in minutes
    #[arg(long)]
    pub duration: Option<i64>,
    /// Court name
    #[arg(long)]
    pub court: Option<String>,
    /// Number of players
    #[arg(long)]
    pub players: Option<u32>,
    /// Payment method code
    #[arg(long)]
    pub payment_method: Option<String>,
}

pub async fn run_book(state: &AppState, args: BookArgs, mode: OutputMode) -> Result<()> {
    let now = Utc::now();
    let (client, credentials) = state.authenticated_client(now)?;
    let venue = state.venues.find(&args.venue)?;
    let store = state.open_bookings().await?;

    let request = BookRequest {
        venue,
        date: args.date,
        time: args.time,
        duration: args
            .duration
            .unwrap_or_else(|| i64::from(state.config.search.default_duration)),
        court: non_empty(args.court),
        players: args.players.unwrap_or(state.config.search.default_players),
        payment_method: non_empty(args.payment_method),
    };

    let receipt = book_court(&client, &store, &state.normalizer, &credentials, &request, now).await?;
    output::print_receipt(&receipt, mode)
}
