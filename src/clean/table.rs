//! Column-wise cleaning of a scraped table.

use super::policy::RangeTable;
use crate::config::TableConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A table as handed over by a scraper: one header per column, one
/// `Option<String>` per cell (`None` when the site rendered nothing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ScrapedTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.rows
            .push(cells.into_iter().map(|c| c.map(Into::into)).collect());
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cells of column `idx`, top to bottom. Short rows yield `None`.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(idx).and_then(|c| c.as_deref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub column: String,
    /// Non-missing cells run through the normalizer.
    pub inspected: usize,
    pub changed: usize,
    /// Left as scraped but still outside every plausible range.
    pub unrecovered: usize,
    /// `None`, empty, or `-`.
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanReport {
    pub columns: Vec<ColumnReport>,
    pub skipped: Vec<String>,
    pub finished_at: DateTime<Utc>,
}

impl CleanReport {
    pub fn total_changed(&self) -> usize {
        self.columns.iter().map(|c| c.changed).sum()
    }

    pub fn total_unrecovered(&self) -> usize {
        self.columns.iter().map(|c| c.unrecovered).sum()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.column == name)
    }
}

/// True for headers that identify a team or a game rather than a statistic.
pub fn is_identity_column(header: &str, config: &TableConfig) -> bool {
    let lower = header.trim().to_lowercase();
    matches!(lower.as_str(), "team" | "conf" | "gp")
        || lower.ends_with("_gp")
        || lower.ends_with(" gp")
        || config
            .skip_keywords
            .iter()
            .any(|k| lower.contains(&k.to_lowercase()))
}

fn is_missing(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text == "-"
}

/// Run every statistic column of `table` through its range policy, in place.
///
/// Identity columns and columns with no policy are left untouched and listed
/// in [`CleanReport::skipped`]. Cells that cannot be repaired stay as scraped.
pub fn clean_table(
    table: &mut ScrapedTable,
    ranges: &RangeTable,
    config: &TableConfig,
) -> CleanReport {
    let normalizer = ranges.normalizer();
    let mut columns = Vec::new();
    let mut skipped = Vec::new();

    for (idx, header) in table.headers.iter().enumerate() {
        let policy = match ranges.policy_for(header) {
            Some(policy) if !is_identity_column(header, config) => policy,
            _ => {
                tracing::debug!(column = %header, "skipping column");
                skipped.push(header.clone());
                continue;
            }
        };

        let mut report = ColumnReport {
            column: header.clone(),
            ..Default::default()
        };

        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            let Some(cell) = row.get_mut(idx) else {
                report.missing += 1;
                continue;
            };
            let raw = match cell.as_deref() {
                Some(text) if !is_missing(text) => text,
                _ => {
                    report.missing += 1;
                    continue;
                }
            };
            report.inspected += 1;

            let recovered = match policy.apply(normalizer, raw) {
                Cow::Owned(fixed) if fixed != raw => {
                    tracing::trace!(column = %header, row = row_idx, raw, cleaned = %fixed, "recovered value");
                    Some(fixed)
                }
                _ => {
                    if !policy.is_plausible(raw) {
                        tracing::trace!(column = %header, row = row_idx, raw, "value left unrecovered");
                        report.unrecovered += 1;
                    }
                    None
                }
            };
            if let Some(fixed) = recovered {
                report.changed += 1;
                *cell = Some(fixed);
            }
        }

        tracing::debug!(
            column = %header,
            inspected = report.inspected,
            changed = report.changed,
            unrecovered = report.unrecovered,
            missing = report.missing,
            "cleaned column"
        );
        columns.push(report);
    }

    CleanReport {
        columns,
        skipped,
        finished_at: Utc::now(),
    }
}
