use std::collections::BTreeMap;
use std::fmt;

use log::warn;

use crate::types::{Counters, Record};

/// Aggregates over the valid entries of a `.bib` source: how many
/// entries per year and how often each field name occurs.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    years: BTreeMap<String, u64>,
    fields: Vec<(String, u64)>, // in order of first appearance
}

impl Statistics {
    pub fn new() -> Statistics {
        Statistics::default()
    }

    /// Account for one valid entry. A `year` only counts if it consists of
    /// digits exclusively.
    pub fn observe(&mut self, record: &Record) {
        if let Some(year) = record.fields.get("year") {
            if !year.is_empty() && year.chars().all(|c| c.is_ascii_digit()) {
                *self.years.entry(year.to_string()).or_insert(0) += 1;
            } else {
                warn!(
                    "invalid year format '{}' in entry '{}', not counting it",
                    year, record.key
                );
            }
        }

        for name in record.fields.names() {
            match self.fields.iter_mut().find(|(n, _)| n == name) {
                Some((_, count)) => *count += 1,
                None => self.fields.push((name.to_string(), 1)),
            }
        }
    }

    /// Number of entries per year, ordered by year
    pub fn year_counts(&self) -> &BTreeMap<String, u64> {
        &self.years
    }

    /// Occurrences of each field name, in order of first appearance
    pub fn field_counts(&self) -> impl Iterator<Item = (&str, u64)> {
        self.fields.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Human-readable summary of a conversion
    pub fn report(&self, counters: Counters) -> Report<'_> {
        Report {
            stats: self,
            counters,
        }
    }
}

/// `Display`able summary of counters and field statistics
pub struct Report<'s> {
    stats: &'s Statistics,
    counters: Counters,
}

impl<'s> fmt::Display for Report<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion statistics:")?;
        writeln!(f, "Total entries processed: {}", self.counters.processed)?;
        writeln!(f, "Valid entries converted: {}", self.counters.valid)?;
        writeln!(
            f,
            "Entries disregarded (parsing errors): {}",
            self.counters.skipped
        )?;
        writeln!(f)?;
        writeln!(f, "Field occurrence percentages (for valid entries):")?;
        for (name, count) in self.stats.field_counts() {
            let percent = if self.counters.valid > 0 {
                count as f64 / self.counters.valid as f64 * 100.0
            } else {
                0.0
            };
            writeln!(f, "  {}: {} ({:.2}%)", name, count, percent)?;
        }
        Ok(())
    }
}

/// Writes `year,count` lines, ordered by year
pub struct YearTable<'s>(pub &'s Statistics);

impl<'s> fmt::Display for YearTable<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "year,count")?;
        for (year, count) in self.0.year_counts() {
            writeln!(f, "{},{}", year, count)?;
        }
        Ok(())
    }
}
