//! Tag commands.

use crate::client::ApiClient;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Attach a tag to a project (created if new)
    Add { project_id: i64, name: String },

    /// Detach a tag from a project
    Remove { project_id: i64, name: String },

    /// List all tags with project counts
    List,
}

pub async fn run(client: &ApiClient, command: TagCommand) -> Result<()> {
    match command {
        TagCommand::Add { project_id, name } => {
            let added = client.add_tag(project_id, &name).await?;
            if added {
                println!("Tagged project {} with '{}'", project_id, name.trim().to_lowercase());
            } else {
                println!("Project {} already has tag '{}'", project_id, name.trim().to_lowercase());
            }
        }
        TagCommand::Remove { project_id, name } => {
            client.remove_tag(project_id, &name).await?;
            println!("Removed tag '{}' from project {}", name.trim().to_lowercase(), project_id);
        }
        TagCommand::List => {
            let tags = client.list_tags().await?;
            if tags.is_empty() {
                println!("No tags.");
                return Ok(());
            }
            for tag in &tags {
                println!("{:>4}  {}", tag.project_count, tag.name);
            }
        }
    }
    Ok(())
}
