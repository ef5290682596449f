//! `clubs`, `availability` and `search`.

use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDate, Utc};
use padel_engine::search::split_aliases;
use padel_engine::time::{next_weekend_dates, parse_date_input, parse_time_range};
use padel_engine::{AvailabilityQuery, CourtSearch, SearchQuery, VenueSelection};

use super::{court_filter, non_empty};
use crate::app_state::AppState;
use crate::output::{self, OutputMode};

#[derive(clap::Args, Debug)]
pub struct ClubsArgs {
    /// Location name or lat,lon
    #[arg(long)]
    pub near: Option<String>,
    /// Search radius in meters
    #[arg(long)]
    pub radius: Option<u32>,
}

#[derive(clap::Args, Debug)]
pub struct AvailabilityArgs {
    /// Club (tenant) ID
    #[arg(long)]
    pub club_id: Option<String>,
    /// Saved venue alias
    #[arg(long)]
    pub venue: Option<String>,
    /// Date (YYYY-MM-DD, today or tomorrow)
    #[arg(long)]
    pub date: String,
    /// Show only outdoor courts
    #[arg(long)]
    pub outdoor: bool,
    /// Show all courts (indoor and outdoor)
    #[arg(long)]
    pub all: bool,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Location name or lat,lon
    #[arg(long)]
    pub location: Option<String>,
    /// Club (tenant) ID
    #[arg(long)]
    pub club_id: Option<String>,
    /// Comma-separated saved venue aliases
    #[arg(long)]
    pub venues: Option<String>,
    /// Date (YYYY-MM-DD, today or tomorrow)
    #[arg(long)]
    pub date: Option<String>,
    /// Time range (HH:MM-HH:MM)
    #[arg(long)]
    pub time: Option<String>,
    /// Search the next Saturday and Sunday
    #[arg(long)]
    pub weekend: bool,
    /// Search radius in meters
    #[arg(long)]
    pub radius: Option<u32>,
    /// Show only outdoor courts
    #[arg(long)]
    pub outdoor: bool,
    /// Show all courts (indoor and outdoor)
    #[arg(long)]
    pub all: bool,
}

pub async fn run_clubs(state: &AppState, args: ClubsArgs, mode: OutputMode) -> Result<()> {
    let near = non_empty(args.near)
        .or_else(|| non_empty(state.config.search.default_location.clone()))
        .ok_or_else(|| anyhow!("--near is required (or set default_location in config)"))?;
    let radius = args.radius.unwrap_or(state.config.search.radius_meters);

    let client = state.client()?;
    let search = CourtSearch::new(&client, &state.normalizer, state.request_delay());
    let clubs = search.list_clubs(&near, radius).await?;
    output::print_clubs(&clubs, mode)
}

pub async fn run_availability(
    state: &AppState,
    args: AvailabilityArgs,
    mode: OutputMode,
) -> Result<()> {
    let club_id = non_empty(args.club_id);
    let alias = non_empty(args.venue);
    let filter = court_filter(args.outdoor, args.all)?;

    let (club_id, venue_timezone) = match (club_id, alias) {
        (Some(_), Some(_)) => bail!("use either --club-id or --venue, not both"),
        (None, None) => bail!("--club-id or --venue is required"),
        (Some(club_id), None) => (club_id, String::new()),
        (None, Some(alias)) => {
            let venue = state.venues.find(&alias)?;
            (venue.id, venue.timezone)
        }
    };

    let client = state.client()?;
    let search = CourtSearch::new(&client, &state.normalizer, state.request_delay());
    let output = search
        .availability(&AvailabilityQuery {
            club_id,
            venue_timezone,
            date: args.date,
            filter,
            now: Utc::now(),
        })
        .await?;
    output::print_availability(&output, mode)
}

pub async fn run_search(state: &AppState, args: SearchArgs, mode: OutputMode) -> Result<()> {
    let club_id = non_empty(args.club_id);
    let aliases = non_empty(args.venues);
    if club_id.is_some() && aliases.is_some() {
        bail!("use either --club-id or --venues, not both");
    }
    let filter = court_filter(args.outdoor, args.all)?;

    let location = if club_id.is_none() && aliases.is_none() {
        Some(
            non_empty(args.location)
                .or_else(|| non_empty(state.config.search.default_location.clone()))
                .ok_or_else(|| {
                    anyhow!("--location is required (or set default_location in config)")
                })?,
        )
    } else {
        None
    };

    let dates = search_dates(args.date.as_deref(), args.weekend, Local::now().date_naive())?;
    let window = non_empty(args.time)
        .map(|range| parse_time_range(&range))
        .transpose()?;

    let venues = if let Some(club_id) = club_id {
        VenueSelection::ClubId(club_id)
    } else if let Some(aliases) = aliases {
        let aliases = split_aliases(&aliases);
        if aliases.is_empty() {
            bail!("--venues must include at least one alias");
        }
        VenueSelection::Saved(state.venues.find_all(&aliases)?)
    } else {
        VenueSelection::Near {
            location: location.unwrap_or_default(),
            radius: args.radius.unwrap_or(state.config.search.radius_meters),
        }
    };

    let client = state.client()?;
    let search = CourtSearch::new(&client, &state.normalizer, state.request_delay());
    let results = search
        .search(&SearchQuery {
            venues,
            dates,
            window,
            filter,
        })
        .await?;
    output::print_search(&results, mode)
}

/// The dates a search covers: the coming weekend, or the one `--date`.
fn search_dates(date: Option<&str>, weekend: bool, today: NaiveDate) -> Result<Vec<NaiveDate>> {
    if weekend {
        return Ok(next_weekend_dates(today).to_vec());
    }
    match date.filter(|date| !date.is_empty()) {
        Some(date) => Ok(vec![parse_date_input(date, today)?]),
        None => bail!("--date is required unless --weekend is set"),
    }
}
