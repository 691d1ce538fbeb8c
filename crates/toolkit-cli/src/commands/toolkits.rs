use clap::Args;
use toolkit_client::{DEFAULT_BASE_URL, RestClient};

use crate::error::Result;

#[derive(Args)]
pub(crate) struct ToolkitsArgs {
    /// Backend base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

pub(crate) async fn run(args: ToolkitsArgs) -> Result<()> {
    let client = RestClient::new(args.base_url.as_str())?;
    let toolkits = client.list_toolkits().await?;

    if toolkits.is_empty() {
        println!("no toolkits published yet");
        return Ok(());
    }

    for toolkit in &toolkits {
        println!(
            "#{} {} [{} / {}] {} like(s)",
            toolkit.id, toolkit.title, toolkit.industry, toolkit.project_type, toolkit.likes
        );
        for step in &toolkit.steps {
            println!("    {} ({} subphase(s))", step.name, step.subphases.len());
        }
    }
    Ok(())
}
