//! The posting pipeline: parse, aggregate, report per ticket.

use std::io::Write;

use anyhow::{Context, Result};

use tlp_core::{TicketId, TicketMatcher, aggregate, jira_timestamp, minutes_to_workload, parse_entries};
use tlp_jira::{Client, WorklogError};

use crate::Config;

/// One worklog to create, fully formatted.
#[derive(Debug)]
struct PostJob {
    ticket: TicketId,
    time_spent: String,
    started: String,
}

/// Runs one pass: decode entries, aggregate per ticket, post one worklog
/// per ticket and report each outcome.
///
/// Per-ticket posting failures are printed and isolated; only input and
/// startup problems surface as errors.
pub fn run<W: Write>(
    writer: &mut W,
    input: &str,
    matcher: &dyn TicketMatcher,
    config: &Config,
) -> Result<()> {
    let entries = match parse_entries(input) {
        Ok(entries) => entries,
        Err(err) => {
            // Echo the raw input so the operator can see what was rejected.
            writeln!(writer, "{input}")?;
            writeln!(writer, "Input is not a proper JSON array of time entries")?;
            return Err(err).context("failed to parse input");
        }
    };

    let aggregation = aggregate(&entries, matcher);

    if aggregation.is_empty() {
        writeln!(writer, "No time logged.")?;
        return Ok(());
    }

    if aggregation.ticketless_count > 0 {
        writeln!(
            writer,
            "Time without tickets: {}",
            minutes_to_workload(aggregation.ticketless_minutes)
        )?;
    }

    if aggregation.tickets.is_empty() {
        writeln!(writer, "There are no entries with ticket identifiers")?;
        return Ok(());
    }

    writeln!(writer, "Posting time per ticket:")?;

    let mut jobs = Vec::new();
    for total in aggregation.tickets {
        let Some(last_end) = total.last_end else {
            writeln!(
                writer,
                "Skipping {}: no entries with valid timestamps",
                total.ticket
            )?;
            continue;
        };
        let job = PostJob {
            ticket: total.ticket,
            time_spent: minutes_to_workload(total.minutes),
            started: jira_timestamp(last_end),
        };
        writeln!(
            writer,
            "Posting {}: {} (started {})",
            job.ticket, job.time_spent, job.started
        )?;
        jobs.push(job);
    }

    if jobs.is_empty() {
        return Ok(());
    }

    let client = Client::new(&config.jira_url, &config.authorization_token)
        .context("failed to create tracker client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let outcomes = runtime.block_on(post_all(&client, jobs));

    for (job, result) in outcomes {
        match result {
            Ok(()) => writeln!(writer, "Success posting {}: {}", job.ticket, job.time_spent)?,
            Err(err) => {
                writeln!(writer, "Failure posting {}: {}", job.ticket, job.time_spent)?;
                writeln!(writer, "{err}")?;
            }
        }
    }

    Ok(())
}

/// Dispatches every job and waits for all of them.
///
/// Tickets are independent: each task reads only its own values and a
/// failed or slow post never blocks or aborts the others.
async fn post_all(client: &Client, jobs: Vec<PostJob>) -> Vec<(PostJob, Result<(), WorklogError>)> {
    let mut set = tokio::task::JoinSet::new();
    for job in jobs {
        let client = client.clone();
        set.spawn(async move {
            let result = client
                .post_worklog(&job.ticket, &job.time_spent, &job.started)
                .await;
            (job, result)
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => tracing::error!(%err, "worklog task panicked"),
        }
    }
    outcomes
}
