//! Relationship commands.

use crate::client::ApiClient;
use crate::types::Direction;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum RelCommand {
    /// Create a relationship between two projects
    Add {
        source_id: i64,
        /// related_to, depends_on, or part_of
        rel_type: String,
        target_id: i64,
    },

    /// List a project's relationships, outgoing and incoming
    List { project_id: i64 },

    /// Delete a relationship by id
    Remove { id: i64 },
}

pub async fn run(client: &ApiClient, command: RelCommand) -> Result<()> {
    match command {
        RelCommand::Add {
            source_id,
            rel_type,
            target_id,
        } => {
            let rel = client
                .create_relationship(source_id, target_id, &rel_type)
                .await?;
            println!(
                "Created relationship {}: {} {} {}",
                rel.id, source_id, rel.relationship_type, target_id,
            );
        }
        RelCommand::List { project_id } => {
            let rels = client.list_relationships(project_id).await?;
            if rels.is_empty() {
                println!("No relationships.");
                return Ok(());
            }
            for view in &rels {
                match view.direction {
                    Direction::Outgoing => println!(
                        "{:>4}  this {} {} ({})",
                        view.relationship.id,
                        view.relationship.relationship_type,
                        view.peer_project_name,
                        view.relationship.target_project_id,
                    ),
                    Direction::Incoming => println!(
                        "{:>4}  {} ({}) {} this",
                        view.relationship.id,
                        view.peer_project_name,
                        view.relationship.source_project_id,
                        view.relationship.relationship_type,
                    ),
                }
            }
        }
        RelCommand::Remove { id } => {
            client.delete_relationship(id).await?;
            println!("Deleted relationship {}", id);
        }
    }
    Ok(())
}
