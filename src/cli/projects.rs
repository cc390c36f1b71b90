//! Project commands.

use super::prompt_optional;
use crate::client::ApiClient;
use crate::types::{NewProject, ProjectDetail, ProjectStatus, ProjectUpdate};
use anyhow::{bail, Result};
use chrono::{TimeZone, Utc};
use clap::Args;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Project name
    pub name: String,

    /// Prompt for each field left unset by flags
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long)]
    pub description: Option<String>,

    /// idea, active, paused, or archived
    #[arg(short, long)]
    pub status: Option<String>,

    /// e.g. web, cli, library, homelab, research
    #[arg(short = 't', long = "type")]
    pub project_type: Option<String>,

    #[arg(short = 'l', long)]
    pub language: Option<String>,

    #[arg(long)]
    pub stack: Option<String>,

    #[arg(long)]
    pub repo: Option<String>,

    #[arg(long)]
    pub path: Option<String>,

    /// tiny, medium, or long-haul
    #[arg(long)]
    pub scope: Option<String>,

    #[arg(long)]
    pub goal: Option<String>,

    /// Fill unset fields from a named template
    #[arg(long)]
    pub template: Option<String>,

    /// Tags to attach, repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(short, long)]
    pub status: Option<String>,

    /// Filter by tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Sort field: name, created_at, last_worked_at, status, progress
    #[arg(long)]
    pub sort_by: Option<String>,

    /// asc or desc
    #[arg(long)]
    pub sort_order: Option<String>,

    #[arg(long)]
    pub limit: Option<i64>,

    #[arg(long)]
    pub offset: Option<i64>,

    /// Include archived projects
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: i64,

    /// Walk through every field, Enter keeps the current value
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub status: Option<String>,

    #[arg(short = 't', long = "type")]
    pub project_type: Option<String>,

    #[arg(short = 'l', long)]
    pub language: Option<String>,

    #[arg(long)]
    pub stack: Option<String>,

    #[arg(long)]
    pub repo: Option<String>,

    #[arg(long)]
    pub path: Option<String>,

    #[arg(long)]
    pub scope: Option<String>,

    #[arg(long)]
    pub goal: Option<String>,

    /// 0..=100
    #[arg(long)]
    pub progress: Option<i32>,

    #[arg(long)]
    pub archive: bool,

    #[arg(long)]
    pub unarchive: bool,
}

#[derive(Args, Debug)]
pub struct RoadmapArgs {
    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Include archived projects
    #[arg(long)]
    pub all: bool,
}

fn parse_status(s: &str) -> Result<ProjectStatus> {
    match ProjectStatus::parse(s) {
        Some(status) => Ok(status),
        None => bail!("unknown status '{}' (expected idea, active, paused, or archived)", s),
    }
}

fn format_day(ms: Option<i64>) -> String {
    match ms.and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "never".to_string(),
    }
}

fn print_project_line(detail: &ProjectDetail) {
    let p = &detail.project;
    let tags = if detail.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", detail.tags.join(", "))
    };
    println!(
        "{:>4}  {:<9} {:<30} {:>4}%  {:<10}{}",
        p.id,
        p.status.as_str(),
        p.name,
        p.progress,
        format_day(p.last_worked_at),
        tags,
    );
}

fn fill_add_prompts(args: &mut AddArgs) -> Result<()> {
    println!("Creating project: {}", args.name);
    if args.description.is_none() {
        args.description = prompt_optional("Description (optional)")?;
    }
    if args.status.is_none() {
        println!("Status options: idea, active, paused, archived");
        args.status = prompt_optional("Status [idea]")?;
    }
    if args.project_type.is_none() {
        println!("Type options: web, cli, library, homelab, research");
        args.project_type = prompt_optional("Type (optional)")?;
    }
    if args.language.is_none() {
        args.language = prompt_optional("Primary language (optional)")?;
    }
    if args.stack.is_none() {
        args.stack = prompt_optional("Stack/tech (optional)")?;
    }
    if args.repo.is_none() {
        args.repo = prompt_optional("Repository URL (optional)")?;
    }
    if args.path.is_none() {
        args.path = prompt_optional("Local path (optional)")?;
    }
    if args.scope.is_none() {
        println!("Scope options: tiny, medium, long-haul");
        args.scope = prompt_optional("Scope (optional)")?;
    }
    if args.goal.is_none() {
        args.goal = prompt_optional("Learning goal (optional)")?;
    }
    Ok(())
}

pub async fn add(client: &ApiClient, mut args: AddArgs) -> Result<()> {
    if args.interactive {
        fill_add_prompts(&mut args)?;
    }
    let status = args.status.as_deref().map(parse_status).transpose()?;
    let new = NewProject {
        name: args.name,
        description: args.description,
        status,
        project_type: args.project_type,
        primary_language: args.language,
        stack: args.stack,
        repo_url: args.repo,
        local_path: args.path,
        scope_size: args.scope,
        learning_goal: args.goal,
        progress: None,
        template: args.template,
    };

    let detail = client.create_project(&new).await?;
    for tag in &args.tags {
        client.add_tag(detail.project.id, tag).await?;
    }
    println!("Created project {} '{}'", detail.project.id, detail.project.name);
    Ok(())
}

pub async fn list(client: &ApiClient, args: ListArgs) -> Result<()> {
    let mut query: Vec<String> = Vec::new();
    if let Some(ref s) = args.status {
        parse_status(s)?;
        query.push(format!("status={}", s));
    }
    if let Some(ref t) = args.tag {
        query.push(format!("tag={}", urlencoding::encode(t)));
    }
    if let Some(ref s) = args.sort_by {
        query.push(format!("sort_by={}", s));
    }
    if let Some(ref s) = args.sort_order {
        query.push(format!("sort_order={}", s));
    }
    if let Some(limit) = args.limit {
        query.push(format!("limit={}", limit));
    }
    if let Some(offset) = args.offset {
        query.push(format!("offset={}", offset));
    }
    if args.all {
        query.push("include_archived=true".to_string());
    }

    let projects = client.list_projects(&query.join("&")).await?;
    if projects.is_empty() {
        println!("No projects.");
        return Ok(());
    }
    for detail in &projects {
        print_project_line(detail);
    }
    Ok(())
}

pub async fn show(client: &ApiClient, id: i64) -> Result<()> {
    let detail = client.get_project(id).await?;
    let p = &detail.project;

    println!("{} ({})", p.name, p.status);
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    println!("  id:          {}", p.id);
    println!("  description: {}", opt(&p.description));
    println!("  type:        {}", opt(&p.project_type));
    println!("  language:    {}", opt(&p.primary_language));
    println!("  stack:       {}", opt(&p.stack));
    println!("  repo:        {}", opt(&p.repo_url));
    println!("  path:        {}", opt(&p.local_path));
    println!("  scope:       {}", opt(&p.scope_size));
    println!("  goal:        {}", opt(&p.learning_goal));
    println!("  progress:    {}%", p.progress);
    println!("  created:     {}", format_day(Some(p.created_at)));
    println!("  last worked: {}", format_day(p.last_worked_at));
    if !detail.tags.is_empty() {
        println!("  tags:        {}", detail.tags.join(", "));
    }

    let notes = client.list_notes(id, "limit=5").await?;
    if !notes.is_empty() {
        println!("  recent notes:");
        for note in &notes {
            println!(
                "    [{}] {} {}",
                note.note_type,
                format_day(Some(note.created_at)),
                note.content,
            );
        }
    }
    Ok(())
}

async fn fill_update_prompts(client: &ApiClient, args: &mut UpdateArgs) -> Result<()> {
    let current = client.get_project(args.id).await?;
    let p = &current.project;
    let shown = |v: &Option<String>| v.clone().unwrap_or_default();

    println!("Updating project: {}", p.name);
    println!("(Press Enter to keep current value)");
    if args.name.is_none() {
        args.name = prompt_optional(&format!("Name [{}]", p.name))?;
    }
    if args.description.is_none() {
        args.description = prompt_optional(&format!("Description [{}]", shown(&p.description)))?;
    }
    if args.status.is_none() {
        println!("Status options: idea, active, paused, archived");
        args.status = prompt_optional(&format!("Status [{}]", p.status))?;
    }
    if args.project_type.is_none() {
        println!("Type options: web, cli, library, homelab, research");
        args.project_type = prompt_optional(&format!("Type [{}]", shown(&p.project_type)))?;
    }
    if args.language.is_none() {
        args.language = prompt_optional(&format!("Language [{}]", shown(&p.primary_language)))?;
    }
    if args.stack.is_none() {
        args.stack = prompt_optional(&format!("Stack [{}]", shown(&p.stack)))?;
    }
    if args.repo.is_none() {
        args.repo = prompt_optional(&format!("Repository [{}]", shown(&p.repo_url)))?;
    }
    if args.path.is_none() {
        args.path = prompt_optional(&format!("Local path [{}]", shown(&p.local_path)))?;
    }
    if args.scope.is_none() {
        println!("Scope options: tiny, medium, long-haul");
        args.scope = prompt_optional(&format!("Scope [{}]", shown(&p.scope_size)))?;
    }
    if args.goal.is_none() {
        args.goal = prompt_optional(&format!("Learning goal [{}]", shown(&p.learning_goal)))?;
    }
    Ok(())
}

pub async fn update(client: &ApiClient, mut args: UpdateArgs) -> Result<()> {
    if args.archive && args.unarchive {
        bail!("--archive and --unarchive are mutually exclusive");
    }
    if args.interactive {
        fill_update_prompts(client, &mut args).await?;
    }

    let status = args.status.as_deref().map(parse_status).transpose()?;
    let update = ProjectUpdate {
        name: args.name,
        description: args.description,
        status,
        project_type: args.project_type,
        primary_language: args.language,
        stack: args.stack,
        repo_url: args.repo,
        local_path: args.path,
        scope_size: args.scope,
        learning_goal: args.goal,
        progress: args.progress,
        is_archived: if args.archive {
            Some(true)
        } else if args.unarchive {
            Some(false)
        } else {
            None
        },
    };

    if update.is_empty() {
        bail!("nothing to update");
    }

    let detail = client.update_project(args.id, &update).await?;
    println!("Updated project {} '{}'", detail.project.id, detail.project.name);
    Ok(())
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<()> {
    client.delete_project(id).await?;
    println!("Deleted project {}", id);
    Ok(())
}

pub async fn touch(client: &ApiClient, id: i64) -> Result<()> {
    let ts = client.touch_project(id).await?;
    println!("Project {} marked worked on at {}", id, format_day(Some(ts)));
    Ok(())
}

pub async fn search(client: &ApiClient, query: &str) -> Result<()> {
    let projects = client
        .list_projects(&format!("q={}", urlencoding::encode(query)))
        .await?;
    if projects.is_empty() {
        println!("No matches.");
        return Ok(());
    }
    for detail in &projects {
        print_project_line(detail);
    }
    Ok(())
}

pub async fn roadmap(client: &ApiClient, args: RoadmapArgs) -> Result<()> {
    let query = if args.all {
        "include_archived=true&limit=100"
    } else {
        "limit=100"
    };
    let projects = client.list_projects(query).await?;

    let mut md = String::from("# Roadmap\n");
    for status in ProjectStatus::ALL {
        let group: Vec<&ProjectDetail> = projects
            .iter()
            .filter(|d| d.project.status == status)
            .collect();
        if group.is_empty() {
            continue;
        }
        md.push_str(&format!("\n## {}\n\n", status));
        for detail in group {
            let p = &detail.project;
            md.push_str(&format!("- **{}** ({}%)", p.name, p.progress));
            if let Some(ref goal) = p.learning_goal {
                md.push_str(&format!(" - {}", goal));
            }
            if !detail.tags.is_empty() {
                md.push_str(&format!(" `{}`", detail.tags.join("` `")));
            }
            md.push('\n');
        }
    }

    match args.output {
        Some(path) => {
            std::fs::write(&path, md)?;
            println!("Roadmap written to {}", path);
        }
        None => print!("{}", md),
    }
    Ok(())
}
