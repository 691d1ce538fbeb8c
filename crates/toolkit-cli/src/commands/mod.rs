mod login;
mod publish;
mod toolkits;
mod validate;

use clap::Subcommand;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check that a draft file is publishable
    Validate(validate::ValidateArgs),
    /// Publish a draft to the backend
    Publish(publish::PublishArgs),
    /// Log in and store a session for authenticated publishing
    Login(login::LoginArgs),
    /// List published toolkits
    Toolkits(toolkits::ToolkitsArgs),
}

impl Commands {
    pub(crate) async fn execute(self) -> Result<()> {
        match self {
            Self::Validate(args) => validate::run(&args),
            Self::Publish(args) => publish::run(args).await,
            Self::Login(args) => login::run(args).await,
            Self::Toolkits(args) => toolkits::run(args).await,
        }
    }
}
