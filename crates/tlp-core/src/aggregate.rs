//! Partitioning entries per ticket and summing their durations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::entry::TimeEntry;
use crate::ticket::{TicketId, TicketMatcher};

/// A partition of the input into ticketless entries and per-ticket groups.
///
/// Every entry lands in exactly one place. Tickets appear in order of first
/// appearance and entries within a group keep input order; only the
/// most-recent `end` is consumed downstream, so ordering is cosmetic, but
/// keeping input order makes the partition easy to reason about.
#[derive(Debug)]
pub struct GroupedEntries<'a> {
    pub ticketless: Vec<&'a TimeEntry>,
    pub groups: Vec<(TicketId, Vec<&'a TimeEntry>)>,
}

/// Total time attributed to one ticket.
#[derive(Debug)]
pub struct TicketTotal {
    pub ticket: TicketId,
    /// Sum of entry durations in minutes, unrounded.
    pub minutes: f64,
    /// Latest `end` among entries with parsable timestamps. `None` when no
    /// entry in the group had usable timestamps.
    pub last_end: Option<DateTime<Utc>>,
    /// Entries dropped from the sum because a timestamp did not parse.
    pub skipped: usize,
}

/// Result of one aggregation pass.
#[derive(Debug)]
pub struct Aggregation {
    pub ticketless_minutes: f64,
    /// Number of entries in the ticketless collection, including skipped ones.
    pub ticketless_count: usize,
    pub ticketless_skipped: usize,
    pub tickets: Vec<TicketTotal>,
}

impl Aggregation {
    /// True when there is nothing to report: no ticketless entries and no
    /// ticket groups at all.
    pub fn is_empty(&self) -> bool {
        self.ticketless_count == 0 && self.tickets.is_empty()
    }
}

/// Partitions entries by the ticket their note refers to.
pub fn group_entries<'a>(
    entries: &'a [TimeEntry],
    matcher: &dyn TicketMatcher,
) -> GroupedEntries<'a> {
    let mut ticketless = Vec::new();
    let mut groups: Vec<(TicketId, Vec<&'a TimeEntry>)> = Vec::new();
    let mut index: HashMap<TicketId, usize> = HashMap::new();

    for entry in entries {
        match matcher.extract(&entry.note) {
            None => ticketless.push(entry),
            Some(ticket) => {
                if let Some(&slot) = index.get(&ticket) {
                    groups[slot].1.push(entry);
                } else {
                    index.insert(ticket.clone(), groups.len());
                    groups.push((ticket, vec![entry]));
                }
            }
        }
    }

    GroupedEntries { ticketless, groups }
}

/// Sums one group's durations, dropping entries whose timestamps do not
/// parse so they can never poison the total.
fn sum_group(entries: &[&TimeEntry]) -> (f64, Option<DateTime<Utc>>, usize) {
    let mut minutes = 0.0;
    let mut last_end: Option<DateTime<Utc>> = None;
    let mut skipped = 0;

    for entry in entries {
        match entry.interval() {
            Ok((start, end)) => {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "interval lengths are far below 2^52 ms"
                )]
                let duration = (end - start).num_milliseconds() as f64 / 60_000.0;
                minutes += duration;
                if last_end.is_none_or(|latest| end > latest) {
                    last_end = Some(end);
                }
            }
            Err(err) => {
                tracing::warn!(%err, "skipping entry with unparsable timestamp");
                skipped += 1;
            }
        }
    }

    (minutes, last_end, skipped)
}

/// Groups entries and computes per-ticket and ticketless totals.
pub fn aggregate(entries: &[TimeEntry], matcher: &dyn TicketMatcher) -> Aggregation {
    let grouped = group_entries(entries, matcher);

    let (ticketless_minutes, _, ticketless_skipped) = sum_group(&grouped.ticketless);

    let tickets = grouped
        .groups
        .into_iter()
        .map(|(ticket, group)| {
            let (minutes, last_end, skipped) = sum_group(&group);
            TicketTotal {
                ticket,
                minutes,
                last_end,
                skipped,
            }
        })
        .collect();

    Aggregation {
        ticketless_minutes,
        ticketless_count: grouped.ticketless.len(),
        ticketless_skipped,
        tickets,
    }
}
