//! Template commands.

use crate::client::ApiClient;
use crate::types::{NewTemplate, ProjectStatus};
use anyhow::{bail, Result};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// List templates
    List,

    /// Show a template's defaults
    Show { name: String },

    /// Create a template
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Default status for projects created from this template
        #[arg(short, long)]
        status: Option<String>,
        #[arg(short = 't', long = "type")]
        project_type: Option<String>,
        #[arg(short = 'l', long)]
        language: Option<String>,
        #[arg(long)]
        stack: Option<String>,
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        goal: Option<String>,
    },

    /// Delete a template
    Delete { name: String },
}

pub async fn run(client: &ApiClient, command: TemplateCommand) -> Result<()> {
    match command {
        TemplateCommand::List => {
            let templates = client.list_templates().await?;
            if templates.is_empty() {
                println!("No templates.");
                return Ok(());
            }
            for template in &templates {
                let desc = template.description.as_deref().unwrap_or("");
                println!("{:<20} {}", template.name, desc);
            }
        }
        TemplateCommand::Show { name } => {
            let t = client.get_template(&name).await?;
            println!("Template '{}'", t.name);
            let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
            println!("  description: {}", opt(&t.description));
            println!(
                "  status:      {}",
                t.status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
            );
            println!("  type:        {}", opt(&t.project_type));
            println!("  language:    {}", opt(&t.primary_language));
            println!("  stack:       {}", opt(&t.stack));
            println!("  scope:       {}", opt(&t.scope_size));
            println!("  goal:        {}", opt(&t.learning_goal));
        }
        TemplateCommand::Create {
            name,
            description,
            status,
            project_type,
            language,
            stack,
            scope,
            goal,
        } => {
            let status = match status.as_deref() {
                Some(s) => match ProjectStatus::parse(s) {
                    Some(status) => Some(status),
                    None => bail!("unknown status '{}'", s),
                },
                None => None,
            };
            let new = NewTemplate {
                name,
                description,
                status,
                project_type,
                primary_language: language,
                stack,
                scope_size: scope,
                learning_goal: goal,
            };
            let template = client.create_template(&new).await?;
            println!("Created template '{}'", template.name);
        }
        TemplateCommand::Delete { name } => {
            client.delete_template(&name).await?;
            println!("Deleted template '{}'", name);
        }
    }
    Ok(())
}
