//! Link commands.

use crate::client::ApiClient;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum LinkCommand {
    /// Attach a URL to a project
    Add {
        project_id: i64,
        url: String,
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List a project's links
    List { project_id: i64 },

    /// Delete a link by id
    Remove { id: i64 },
}

pub async fn run(client: &ApiClient, command: LinkCommand) -> Result<()> {
    match command {
        LinkCommand::Add {
            project_id,
            url,
            title,
        } => {
            let link = client
                .create_link(project_id, &url, title.as_deref())
                .await?;
            println!("Added link {} to project {}", link.id, project_id);
        }
        LinkCommand::List { project_id } => {
            let links = client.list_links(project_id).await?;
            if links.is_empty() {
                println!("No links.");
                return Ok(());
            }
            for link in &links {
                match link.title {
                    Some(ref title) => println!("{:>4}  {} - {}", link.id, title, link.url),
                    None => println!("{:>4}  {}", link.id, link.url),
                }
            }
        }
        LinkCommand::Remove { id } => {
            client.delete_link(id).await?;
            println!("Deleted link {}", id);
        }
    }
    Ok(())
}
