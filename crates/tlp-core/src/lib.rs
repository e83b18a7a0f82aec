//! Core domain logic for the worklog poster.
//!
//! This crate contains the fundamental types and logic for:
//! - Entry parsing: decoding logged time entries from JSON
//! - Ticket matching: extracting ticket identifiers from entry notes
//! - Aggregation: partitioning entries per ticket and summing durations
//! - Formatting: rendering workload strings and Jira timestamps

pub mod aggregate;
pub mod entry;
pub mod format;
pub mod ticket;

pub use aggregate::{Aggregation, GroupedEntries, TicketTotal, aggregate, group_entries};
pub use entry::{TimeEntry, TimestampError, parse_entries};
pub use format::{jira_timestamp, minutes_to_workload};
pub use ticket::{RegexMatcher, TicketId, TicketMatcher, ValidationError};
