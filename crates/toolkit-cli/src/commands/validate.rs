use std::path::{Path, PathBuf};

use clap::Args;
use toolkit_core::{ToolkitDraft, validate_draft};

use crate::error::{CliError, Result};

#[derive(Args)]
pub(crate) struct ValidateArgs {
    /// Path to the draft JSON file
    #[arg(long)]
    pub(crate) draft: PathBuf,
}

pub(crate) fn run(args: &ValidateArgs) -> Result<()> {
    let draft = load_draft(&args.draft)?;

    match validate_draft(&draft) {
        Ok(publish) => {
            println!(
                "draft is publishable: \"{}\" with {} step(s)",
                publish.title(),
                publish.steps().len()
            );
            Ok(())
        }
        Err(errors) => {
            for issue in &errors.issues {
                eprintln!("invalid: {issue}");
            }
            Err(CliError::Validation(errors))
        }
    }
}

pub(crate) fn load_draft(path: &Path) -> Result<ToolkitDraft> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::DraftRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::DraftParse {
        path: path.to_path_buf(),
        source,
    })
}
