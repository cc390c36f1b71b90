//! CLI command definitions.
//!
//! The CLI structure is defined with clap's derive macros. Apart from
//! `serve`, every command talks to a running server through the REST API.

pub mod links;
pub mod notes;
pub mod projects;
pub mod rels;
pub mod stats;
pub mod tags;
pub mod templates;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};

/// Print `label: ` and read one trimmed line; empty input means "skip".
pub(crate) fn prompt_optional(label: &str) -> Result<Option<String>> {
    print!("{}: ", label);
    std::io::stdout().flush()?;
    read_prompt_line(&mut std::io::stdin().lock())
}

fn read_prompt_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();
    Ok(if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    })
}

/// Personal project tracker: REST API server, web UI, and CLI.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the API (overrides config)
    #[arg(short, long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (API + web UI)
    Serve(ServeArgs),

    /// Create a project
    Add(projects::AddArgs),

    /// List projects
    List(projects::ListArgs),

    /// Show a project's details
    Show { id: i64 },

    /// Update project fields
    Update(projects::UpdateArgs),

    /// Delete a project and everything attached to it
    Delete { id: i64 },

    /// Mark a project as worked on right now
    Touch { id: i64 },

    /// Search projects by free text
    Search { query: String },

    /// Write a Markdown roadmap grouped by status
    Roadmap(projects::RoadmapArgs),

    /// Manage project notes
    Note {
        #[command(subcommand)]
        command: notes::NoteCommand,
    },

    /// Manage project tags
    Tag {
        #[command(subcommand)]
        command: tags::TagCommand,
    },

    /// Manage relationships between projects
    Rel {
        #[command(subcommand)]
        command: rels::RelCommand,
    },

    /// Manage project links
    Link {
        #[command(subcommand)]
        command: links::LinkCommand,
    },

    /// Manage project templates
    Template {
        #[command(subcommand)]
        command: templates::TemplateCommand,
    },

    /// Show dashboard totals and streaks
    Stats,

    /// Show the activity heatmap
    Heatmap {
        /// Window size in weeks (max 52)
        #[arg(long)]
        weeks: Option<i64>,
    },
}

/// Arguments for the serve command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to database file (overrides config)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_line_trims_and_skips_empty() {
        let mut input = "  rust web  \n".as_bytes();
        assert_eq!(
            read_prompt_line(&mut input).unwrap(),
            Some("rust web".to_string())
        );

        let mut empty = "\n".as_bytes();
        assert_eq!(read_prompt_line(&mut empty).unwrap(), None);

        let mut blank = "   \n".as_bytes();
        assert_eq!(read_prompt_line(&mut blank).unwrap(), None);
    }
}
