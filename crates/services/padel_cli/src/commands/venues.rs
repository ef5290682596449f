use anyhow::Result;
use clap::Subcommand;
use padel_common::Venue;

use crate::app_state::AppState;
use crate::output::{self, OutputMode};

/// Manage saved venues
#[derive(Subcommand, Debug)]
pub enum VenuesCommand {
    /// List saved venues
    List,
    /// Add a saved venue
    Add {
        /// Venue (tenant) ID
        #[arg(long)]
        id: String,
        /// Short alias
        #[arg(long)]
        alias: String,
        /// Venue name
        #[arg(long)]
        name: String,
        /// Indoor venue
        #[arg(long)]
        indoor: bool,
        /// Venue time zone (IANA); the configured default when omitted
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Remove a saved venue
    Remove {
        /// Alias of the venue to remove
        alias: String,
    },
}

pub fn run_venues(state: &AppState, action: VenuesCommand, mode: OutputMode) -> Result<()> {
    match action {
        VenuesCommand::List => output::print_venues(&state.venues.load()?, mode),
        VenuesCommand::Add {
            id,
            alias,
            name,
            indoor,
            timezone,
        } => {
            let venue = state.venues.add(Venue {
                id: id.trim().to_string(),
                alias,
                name: name.trim().to_string(),
                indoor,
                timezone: timezone.unwrap_or_default().trim().to_string(),
            })?;
            if mode.is_json() {
                return output::print_json(&venue);
            }
            println!("Saved venue {} ({}).", venue.alias, venue.name);
            Ok(())
        }
        VenuesCommand::Remove { alias } => {
            let removed = state.venues.remove(&alias)?;
            if mode.is_json() {
                return output::print_json(&removed);
            }
            println!("Removed venue {}.", removed.alias);
            Ok(())
        }
    }
}
