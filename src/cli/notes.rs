//! Note commands.

use crate::client::ApiClient;
use anyhow::Result;
use chrono::{TimeZone, Utc};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Add a note to a project
    Add {
        project_id: i64,
        /// Note text; prompted for when omitted
        content: Option<String>,
        /// log, idea, blocker, or reflection
        #[arg(short = 't', long = "type")]
        note_type: Option<String>,
    },

    /// List a project's notes, newest first
    List {
        project_id: i64,
        /// Filter by note type
        #[arg(short = 't', long = "type")]
        note_type: Option<String>,
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Show a single note
    Show { id: i64 },

    /// Delete a note
    Delete { id: i64 },
}

fn format_time(ms: i64) -> String {
    match Utc.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

pub async fn run(client: &ApiClient, command: NoteCommand) -> Result<()> {
    match command {
        NoteCommand::Add {
            project_id,
            content,
            mut note_type,
        } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let content = super::prompt_optional("Note content")?
                        .ok_or_else(|| anyhow::anyhow!("note content cannot be empty"))?;
                    if note_type.is_none() {
                        println!("Type options: log, idea, blocker, reflection");
                        note_type = super::prompt_optional("Type [log]")?;
                    }
                    content
                }
            };
            let note = client
                .create_note(project_id, &content, note_type.as_deref())
                .await?;
            println!("Added {} note {} to project {}", note.note_type, note.id, project_id);
        }
        NoteCommand::List {
            project_id,
            note_type,
            limit,
        } => {
            let mut query: Vec<String> = Vec::new();
            if let Some(ref t) = note_type {
                query.push(format!("note_type={}", urlencoding::encode(t)));
            }
            if let Some(limit) = limit {
                query.push(format!("limit={}", limit));
            }
            let notes = client.list_notes(project_id, &query.join("&")).await?;
            if notes.is_empty() {
                println!("No notes.");
                return Ok(());
            }
            for note in &notes {
                println!(
                    "{:>4}  {}  [{}] {}",
                    note.id,
                    format_time(note.created_at),
                    note.note_type,
                    note.content,
                );
            }
        }
        NoteCommand::Show { id } => {
            let note = client.get_note(id).await?;
            println!("Note {} (project {})", note.id, note.project_id);
            println!("  type:    {}", note.note_type);
            println!("  created: {}", format_time(note.created_at));
            println!("  {}", note.content);
        }
        NoteCommand::Delete { id } => {
            client.delete_note(id).await?;
            println!("Deleted note {}", id);
        }
    }
    Ok(())
}
