use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Subcommand;
use inquire::{Password, Text};
use padel_common::PadelError;
use padel_db::Credentials;

use super::non_empty;
use crate::app_state::AppState;

/// Manage authentication
#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Log in and store the access token
    Login {
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Password
        #[arg(long)]
        password: Option<String>,
        /// Load credentials from a file with [username] and [password] sections
        #[arg(long, env = "PADEL_AUTH_FILE")]
        auth_file: Option<PathBuf>,
    },
    /// Check auth status
    Status,
    /// Log out and clear stored credentials
    Logout,
}

pub async fn run_auth(state: &AppState, action: AuthCommand) -> Result<()> {
    match action {
        AuthCommand::Login {
            email,
            password,
            auth_file,
        } => login(state, non_empty(email), non_empty(password), auth_file).await,
        AuthCommand::Status => {
            let credentials = state.credentials.load()?.filter(Credentials::is_logged_in);
            match credentials {
                None => println!("Not logged in."),
                Some(credentials) if credentials.access_token_expired(Utc::now()) => println!(
                    "Token expired for {}. Run 'padel auth login' to re-authenticate.",
                    credentials.email
                ),
                Some(credentials) => {
                    println!("Logged in as {}.", credentials.email);
                    println!("Token expires: {}", credentials.access_token_expiration);
                }
            }
            Ok(())
        }
        AuthCommand::Logout => {
            state.credentials.clear()?;
            println!("Logged out.");
            Ok(())
        }
    }
}

async fn login(
    state: &AppState,
    mut email: Option<String>,
    mut password: Option<String>,
    auth_file: Option<PathBuf>,
) -> Result<()> {
    if let Some(path) = auth_file {
        let (file_email, file_password) = read_auth_file(&path)?;
        email = email.or(file_email);
        password = password.or(file_password);
    }

    let email = match email {
        Some(email) => email,
        None => Text::new("Email:").prompt()?.trim().to_string(),
    };
    let password = match password {
        Some(password) => password,
        None => Password::new("Password:")
            .without_confirmation()
            .prompt()?
            .trim()
            .to_string(),
    };
    if email.is_empty() || password.is_empty() {
        bail!("email and password are required");
    }

    let mut client = state.client()?;
    let response = client.login(&email, &password).await?;
    let credentials = Credentials {
        access_token: response.access_token,
        access_token_expiration: response.access_token_expiration,
        refresh_token: response.refresh_token,
        refresh_token_expiration: response.refresh_token_expiration,
        user_id: response.user_id,
        email,
    };
    state.credentials.save(&credentials)?;

    println!("Logged in as {}.", credentials.email);
    Ok(())
}

fn read_auth_file(path: &Path) -> Result<(Option<String>, Option<String>)> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        PadelError::Storage(format!("read auth file {}: {}", path.display(), err))
    })?;
    Ok(parse_auth_file(&content))
}

/// Reads the line after each `[username]` / `[password]` marker.
fn parse_auth_file(content: &str) -> (Option<String>, Option<String>) {
    let mut email = None;
    let mut password = None;
    let mut lines = content.lines().map(str::trim);
    while let Some(line) = lines.next() {
        let slot = match line {
            "[username]" => &mut email,
            "[password]" => &mut password,
            _ => continue,
        };
        if let Some(value) = lines.next() {
            *slot = Some(value.to_string()).filter(|value| !value.is_empty());
        }
    }
    (email, password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn auth_file_sections_are_read() {
        let content = "# padel\n[username]\n  player@example.com \n\n[password]\nhunter2\n";
        assert_eq!(
            parse_auth_file(content),
            (
                Some("player@example.com".to_string()),
                Some("hunter2".to_string())
            )
        );
    }

    #[test]
    fn missing_sections_stay_empty() {
        assert_eq!(parse_auth_file("[password]\nsecret"), (None, Some("secret".to_string())));
        assert_eq!(parse_auth_file("[username]"), (None, None));
    }

    #[test]
    fn unreadable_auth_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = read_auth_file(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PadelError>(),
            Some(PadelError::Storage(message)) if message.starts_with("read auth file")
        ));
    }
}
