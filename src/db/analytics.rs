//! Activity analytics: dashboard totals, heatmap buckets, streaks.

use super::Database;
use crate::db::projects::parse_project_row;
use crate::types::{ActivityDay, DashboardStats, Project, Streaks};
use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use std::collections::HashMap;

impl Database {
    /// Aggregate counts for the dashboard, plus the most recently worked
    /// projects.
    pub fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.with_conn(|conn| {
            let mut stats = DashboardStats::default();

            let mut stmt =
                conn.prepare("SELECT status, COUNT(*) FROM projects GROUP BY status")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            for (status, count) in rows {
                stats.total_projects += count;
                match status.as_str() {
                    "idea" => stats.idea = count,
                    "active" => stats.active = count,
                    "paused" => stats.paused = count,
                    "archived" => stats.archived = count,
                    _ => {}
                }
            }

            let mut stmt =
                conn.prepare("SELECT note_type, COUNT(*) FROM project_notes GROUP BY note_type")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            for (note_type, count) in rows {
                stats.total_notes += count;
                stats.notes_by_type.insert(note_type, count);
            }

            stats.total_tags =
                conn.query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))?;

            let mut stmt = conn.prepare(
                "SELECT * FROM projects
                 WHERE is_archived = 0 AND last_worked_at IS NOT NULL
                 ORDER BY last_worked_at DESC LIMIT 5",
            )?;
            stats.recently_worked = stmt
                .query_map([], parse_project_row)?
                .collect::<rusqlite::Result<Vec<Project>>>()?;

            Ok(stats)
        })
    }

    /// Per-day activity counts (notes written + projects created) over the
    /// last `weeks` weeks, zero-filled and ending today (UTC).
    pub fn activity_heatmap(&self, weeks: i64) -> Result<Vec<ActivityDay>> {
        let weeks = weeks.clamp(1, 52);
        let today = Utc::now().date_naive();
        let start = today - Duration::days(weeks * 7 - 1);

        let counts = self.activity_by_day(Some(start))?;

        let mut days = Vec::with_capacity((weeks * 7) as usize);
        let mut day = start;
        while day <= today {
            let iso = day.format("%Y-%m-%d").to_string();
            let count = counts.get(&iso).copied().unwrap_or(0);
            days.push(ActivityDay { day: iso, count });
            day += Duration::days(1);
        }
        Ok(days)
    }

    /// Current and longest streaks of consecutive active days. The current
    /// streak counts runs ending today or yesterday, so it survives until a
    /// full day passes without activity.
    pub fn streaks(&self) -> Result<Streaks> {
        let counts = self.activity_by_day(None)?;

        let mut days: Vec<NaiveDate> = counts
            .keys()
            .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .collect();
        days.sort();

        let mut longest: i64 = 0;
        let mut run: i64 = 0;
        let mut prev: Option<NaiveDate> = None;
        for day in &days {
            run = match prev {
                Some(p) if *day - p == Duration::days(1) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            prev = Some(*day);
        }

        let today = Utc::now().date_naive();
        let current = match days.last() {
            Some(last) if today - *last <= Duration::days(1) => run,
            _ => 0,
        };

        Ok(Streaks {
            current,
            longest,
            active_days: days.len() as i64,
        })
    }

    /// Distinct-day activity counts (note creation + project creation),
    /// keyed by ISO date, optionally restricted to days on or after `start`.
    fn activity_by_day(&self, start: Option<NaiveDate>) -> Result<HashMap<String, i64>> {
        self.with_conn(|conn| {
            let mut sql = String::from(
                "SELECT day, SUM(n) FROM (
                     SELECT date(created_at / 1000, 'unixepoch') AS day, COUNT(*) AS n
                     FROM project_notes GROUP BY day
                     UNION ALL
                     SELECT date(created_at / 1000, 'unixepoch') AS day, COUNT(*) AS n
                     FROM projects GROUP BY day
                 )",
            );
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
            if let Some(start) = start {
                sql.push_str(" WHERE day >= ?1");
                params_vec.push(Box::new(start.format("%Y-%m-%d").to_string()));
            }
            sql.push_str(" GROUP BY day");

            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|b| b.as_ref()).collect();
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_refs.as_slice(), |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows.into_iter().collect())
        })
    }
}
