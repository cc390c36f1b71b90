//! Dashboard stats and heatmap commands.

use crate::client::ApiClient;
use anyhow::Result;

pub async fn stats(client: &ApiClient) -> Result<()> {
    let stats = client.dashboard().await?;
    let streaks = client.streaks().await?;

    println!("Projects: {}", stats.total_projects);
    println!("  idea:     {}", stats.idea);
    println!("  active:   {}", stats.active);
    println!("  paused:   {}", stats.paused);
    println!("  archived: {}", stats.archived);
    println!("Notes: {}", stats.total_notes);
    let mut by_type: Vec<_> = stats.notes_by_type.iter().collect();
    by_type.sort();
    for (note_type, count) in by_type {
        println!("  {}: {}", note_type, count);
    }
    println!("Tags: {}", stats.total_tags);
    println!(
        "Streak: {} days (longest {}, {} active days total)",
        streaks.current, streaks.longest, streaks.active_days,
    );

    if !stats.recently_worked.is_empty() {
        println!("Recently worked:");
        for project in &stats.recently_worked {
            println!("  {} ({}%)", project.name, project.progress);
        }
    }
    Ok(())
}

pub async fn heatmap(client: &ApiClient, weeks: Option<i64>) -> Result<()> {
    let days = client.heatmap(weeks).await?;

    // One row per weekday, one column per week, GitHub-style.
    let glyph = |count: i64| match count {
        0 => ' ',
        1..=2 => '.',
        3..=5 => 'o',
        _ => '#',
    };

    for row in 0..7 {
        let line: String = days
            .iter()
            .skip(row)
            .step_by(7)
            .map(|d| glyph(d.count))
            .collect();
        println!("{}", line);
    }

    let total: i64 = days.iter().map(|d| d.count).sum();
    let span = days.first().zip(days.last());
    if let Some((first, last)) = span {
        println!("{} events between {} and {}", total, first.day, last.day);
    }
    Ok(())
}
