use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use toolkit_client::{DEFAULT_BASE_URL, RestClient};
use toolkit_core::validate_draft;
use toolkit_operations::providers::{RestToolkitApi, SessionStore};
use toolkit_operations::{PublishContext, PublishOperation};

use crate::error::{CliError, Result};
use crate::output::TerminalProgress;

#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Path to the draft JSON file
    #[arg(long)]
    draft: PathBuf,

    /// Backend base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Publish anonymously even when a session file exists
    #[arg(long)]
    anonymous: bool,

    /// Path to the stored session file
    #[arg(long, default_value = "toolkit-session.json")]
    session: PathBuf,
}

pub(crate) async fn run(args: PublishArgs) -> Result<()> {
    let draft = super::validate::load_draft(&args.draft)?;
    let publish_draft = match validate_draft(&draft) {
        Ok(publish_draft) => publish_draft,
        Err(errors) => {
            for issue in &errors.issues {
                eprintln!("invalid: {issue}");
            }
            return Err(CliError::Validation(errors));
        }
    };

    let client = Arc::new(RestClient::new(args.base_url.as_str())?);

    let user_id = if args.anonymous {
        None
    } else {
        match SessionStore::new(args.session.clone()).load()? {
            Some(session) => {
                client.set_token(session.token.clone());
                println!("publishing as {}", session.username);
                session.user_id
            }
            None => None,
        }
    };
    if user_id.is_none() {
        println!("publishing anonymously");
    }

    let api = Arc::new(RestToolkitApi::new(Arc::clone(&client)));
    let operation = PublishOperation::new(PublishContext::new(api, user_id));

    let (result, audit) = operation
        .execute_with_audit(&publish_draft, &TerminalProgress)
        .await;

    match result {
        Ok(toolkit) => {
            println!("published toolkit {} (\"{}\")", toolkit.id, toolkit.title);
            Ok(())
        }
        Err(error) => {
            eprintln!("{}", audit.summary());
            Err(error.into())
        }
    }
}
