//! Mark-as-read command flow.

use super::*;

use std::collections::HashSet;
use std::io::{BufRead, Write};

use chrono::Utc;
use feedsweep_core::{ActionItem, FeedService, select_actions};

/// Options for one mark-as-read invocation.
pub struct MarkAsReadOptions {
    pub category: Option<String>,
    pub selection: SelectionParams,
    /// Skip the confirmation prompt.
    pub auto: bool,
    /// Repeat the sweep every this many minutes; 0 runs a single pass.
    pub interval_minutes: u64,
}

/// Run the sweep, repeating on an interval when configured. A failed pass
/// is reported to the console and does not abort the process.
pub async fn mark_as_read<S: FeedService>(
    service: &S,
    options: &MarkAsReadOptions,
    input: &mut impl BufRead,
) {
    loop {
        if let Err(e) = run_pass(service, options, &mut *input).await {
            println!("ERROR: Something went wrong:");
            println!("{e:?}");
        }
        if options.interval_minutes == 0 {
            break;
        }
        println!(
            "Waiting for {} minutes to repeat...",
            options.interval_minutes
        );
        tokio::time::sleep(std::time::Duration::from_secs(
            options.interval_minutes * 60,
        ))
        .await;
    }
}

/// One fetch/select/confirm/mark pass.
pub(crate) async fn run_pass<S: FeedService>(
    service: &S,
    options: &MarkAsReadOptions,
    input: &mut impl BufRead,
) -> Result<()> {
    print_banner(options);

    println!("Retrieving list of unread entries...");
    let entries = service.fetch_unread(options.category.as_deref()).await?;
    println!("{} items fetched!", entries.len());

    println!("Selecting items to mark as read...");
    let actions = select_actions(&entries, Utc::now(), &options.selection);
    if actions.is_empty() {
        println!("No items to mark as read.");
        return Ok(());
    }

    for action in &actions {
        println!(
            "Want to mark as read: {} {} [{}] ({})",
            action.entry.crawled_local().format("%Y-%m-%d %H:%M:%S"),
            action.entry.display_title(),
            action.entry.engagement,
            action.reason
        );
    }

    let approved = options.auto || prompt_approval(input)?;
    if !approved {
        println!("Doing nothing...");
        return Ok(());
    }

    let ids = distinct_ids(&actions);
    println!("Marking as read {} items...", ids.len());
    service.mark_as_read(&ids).await?;
    println!("Done!");
    Ok(())
}

fn print_banner(options: &MarkAsReadOptions) {
    println!("---------------------------------");
    println!("Executing Mark-As-Read command with parameters:");
    println!("Category: '{}'", options.category.as_deref().unwrap_or(""));
    println!(
        "Minimal engagement level: {}",
        match options.selection.minimal_engagement {
            level if level > 0 => level.to_string(),
            _ => "None".to_string(),
        }
    );
    println!("Minimal entry age: {}", options.selection.min_age_days);
    println!("Remove duplicates: {}", options.selection.remove_duplicates);
    println!(
        "Blacklisted words: '{}'",
        options.selection.blacklisted_words.as_deref().unwrap_or("")
    );
    println!("Repeat: every {} minutes", options.interval_minutes);
    println!("Mark as read automatically: {}", options.auto);
    println!("---------------------------------");
}

/// Ask the user to proceed.
fn prompt_approval(input: &mut impl BufRead) -> Result<bool> {
    print!("Proceed? [Y/n]: ");
    std::io::stdout().flush().context("unable to flush stdout")?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("unable to read confirmation")?;
    Ok(is_approval(&line))
}

/// Only an exact `Y` approves.
pub(crate) fn is_approval(line: &str) -> bool {
    line.trim() == "Y"
}

/// Collapse repeated ids before the write call, preserving first-seen
/// order. An entry can match several filters and so appear in the action
/// list more than once.
pub(crate) fn distinct_ids(actions: &[ActionItem]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    actions
        .iter()
        .filter(|action| seen.insert(action.entry.id.as_str()))
        .map(|action| action.entry.id.clone())
        .collect()
}
