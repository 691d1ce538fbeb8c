use std::path::PathBuf;

use clap::Args;
use dialoguer::Password;
use toolkit_client::{DEFAULT_BASE_URL, RestClient};
use toolkit_operations::providers::{SavedSession, SessionStore};

use crate::error::{CliError, Result};

#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Username to log in with
    #[arg(long)]
    username: String,

    /// Backend base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Path to write the session file to
    #[arg(long, default_value = "toolkit-session.json")]
    session: PathBuf,
}

pub(crate) async fn run(args: LoginArgs) -> Result<()> {
    let password = Password::new()
        .with_prompt(format!("Password for {}", args.username))
        .interact()
        .map_err(CliError::Prompt)?;

    let client = RestClient::new(args.base_url.as_str())?;
    let session = client.login(&args.username, &password).await?;

    SessionStore::new(args.session).save(&SavedSession {
        username: args.username.clone(),
        token: session.token,
        user_id: session.user_id,
    })?;

    println!("logged in as {}", args.username);
    Ok(())
}
