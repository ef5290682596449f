// --- File: crates/padel_engine/src/timezone.rs ---
//! Venue time-zone resolution.
//!
//! An empty or unknown zone name never fails: it resolves to the configured
//! default zone. The substitution is logged so a misconfigured venue can be
//! spotted in the logs.

use chrono_tz::Tz;
use padel_config::{default_timezone_name, DEFAULT_VENUE_TIMEZONE};
use tracing::{debug, warn};

/// Maps venue zone names to IANA zones, falling back to a configured default.
#[derive(Debug, Clone)]
pub struct TimeZoneResolver {
    default_name: String,
    default_zone: Tz,
}

impl TimeZoneResolver {
    /// Creates a resolver with the given default zone.
    ///
    /// An invalid default is itself replaced by [`DEFAULT_VENUE_TIMEZONE`].
    pub fn new(default_timezone: &str) -> Self {
        let default_name = default_timezone_name(default_timezone);
        let default_zone = default_name
            .parse::<Tz>()
            .unwrap_or(chrono_tz::Europe::Madrid);
        Self {
            default_name,
            default_zone,
        }
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn default_zone(&self) -> Tz {
        self.default_zone
    }

    /// Returns `name` when it is a valid IANA zone, the default otherwise.
    pub fn normalize(&self, name: &str) -> String {
        self.lookup(name)
            .map(|zone| zone.name().to_string())
            .unwrap_or_else(|| self.default_name.clone())
    }

    /// Resolves `name` to a zone, substituting the default.
    pub fn resolve(&self, name: &str) -> Tz {
        self.lookup(name).unwrap_or(self.default_zone)
    }

    /// Picks the zone for a venue: a zone saved in the local registry wins
    /// over the one reported by the remote service.
    pub fn venue_zone(&self, registry_zone: &str, remote_zone: &str) -> String {
        if registry_zone.trim().is_empty() {
            self.normalize(remote_zone)
        } else {
            self.normalize(registry_zone)
        }
    }

    fn lookup(&self, name: &str) -> Option<Tz> {
        if name.trim().is_empty() {
            debug!("No venue time zone given, using {}", self.default_name);
            return None;
        }
        match name.parse::<Tz>() {
            Ok(zone) => Some(zone),
            Err(_) => {
                warn!(
                    "Unknown venue time zone {:?}, falling back to {}",
                    name, self.default_name
                );
                None
            }
        }
    }
}

impl Default for TimeZoneResolver {
    fn default() -> Self {
        Self::new(DEFAULT_VENUE_TIMEZONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names_pass_through() {
        let resolver = TimeZoneResolver::new("Europe/Madrid");
        assert_eq!(resolver.normalize("Europe/London"), "Europe/London");
        assert_eq!(resolver.resolve("America/New_York"), chrono_tz::America::New_York);
    }

    #[test]
    fn empty_and_unknown_names_fall_back_to_default() {
        let resolver = TimeZoneResolver::new("Europe/Lisbon");
        assert_eq!(resolver.normalize(""), "Europe/Lisbon");
        assert_eq!(resolver.normalize("   "), "Europe/Lisbon");
        assert_eq!(resolver.normalize("Mars/Olympus_Mons"), "Europe/Lisbon");
        assert_eq!(resolver.resolve("nonsense"), chrono_tz::Europe::Lisbon);
    }

    #[test]
    fn invalid_default_uses_built_in_zone() {
        let resolver = TimeZoneResolver::new("Not/A_Zone");
        assert_eq!(resolver.default_name(), DEFAULT_VENUE_TIMEZONE);
        assert_eq!(resolver.normalize(""), "Europe/Madrid");
    }

    #[test]
    fn registry_zone_overrides_remote_zone() {
        let resolver = TimeZoneResolver::default();
        assert_eq!(
            resolver.venue_zone("Europe/London", "Europe/Madrid"),
            "Europe/London"
        );
        assert_eq!(resolver.venue_zone("", "Atlantic/Canary"), "Atlantic/Canary");
        assert_eq!(resolver.venue_zone("", ""), "Europe/Madrid");
    }
}
