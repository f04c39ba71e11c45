//! Selection engine.
//!
//! Composes the low-engagement, duplicate, and blacklist filters into a
//! single ordered action list, each action carrying a human-readable
//! justification.

use super::*;

/// Parameters controlling entry selection.
#[derive(Clone, Debug)]
pub struct SelectionParams {
    /// Entries with engagement strictly below this qualify. `-1` disables
    /// the filter, since no entry has negative engagement.
    pub minimal_engagement: i64,
    /// Only entries crawled more than this many days ago qualify for the
    /// engagement filter.
    pub min_age_days: i64,
    /// Mark all but one member of each exact-title group.
    pub remove_duplicates: bool,
    /// Semicolon-separated title words, matched case-insensitively.
    pub blacklisted_words: Option<String>,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            minimal_engagement: -1,
            min_age_days: 0,
            remove_duplicates: false,
            blacklisted_words: None,
        }
    }
}

/// Split a raw semicolon-separated word list into lowercased tokens.
/// Tokens are trimmed and empty tokens are dropped.
pub fn parse_blacklist(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(';')
        .map(|word| word.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Apply the three filters in order and concatenate the results.
///
/// The duplicate filter skips entries already selected by the engagement
/// filter; the blacklist filter skips nothing, so the same entry can
/// appear more than once with different reasons. Callers issuing the
/// write request collapse repeated ids themselves.
pub fn select_actions(
    entries: &[Entry],
    now: DateTime<Utc>,
    params: &SelectionParams,
) -> Vec<ActionItem> {
    let mut actions: Vec<ActionItem> = Vec::new();

    // Low engagement, oldest first. An age too large to represent pushes
    // the cutoff to the minimum timestamp, so nothing is old enough.
    let cutoff = Duration::try_days(params.min_age_days)
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut stale: Vec<&Entry> = entries
        .iter()
        .filter(|entry| {
            entry.engagement < params.minimal_engagement
                && entry.crawled_utc() < cutoff
        })
        .collect();
    stale.sort_by_key(|entry| entry.crawled);
    let low_engagement: HashSet<&str> =
        stale.iter().map(|entry| entry.id.as_str()).collect();
    actions.extend(stale.iter().map(|entry| {
        ActionItem::new(
            (*entry).clone(),
            format!("Engagement < {}", params.minimal_engagement),
        )
    }));

    if params.remove_duplicates {
        actions.extend(duplicate_actions(entries, &low_engagement));
    }

    let words = parse_blacklist(params.blacklisted_words.as_deref());
    if !words.is_empty() {
        actions.extend(blacklist_actions(entries, &words));
    }

    actions
}

/// Group remaining titled entries by exact title and pick the member with
/// the lowest engagement of each group (first wins on ties) as the one to
/// mark. The reason lists every group member's engagement in entry order.
fn duplicate_actions(
    entries: &[Entry],
    already_selected: &HashSet<&str>,
) -> Vec<ActionItem> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Entry>> = HashMap::new();
    for entry in entries {
        if already_selected.contains(entry.id.as_str()) {
            continue;
        }
        let Some(title) = entry.title.as_deref() else {
            continue;
        };
        groups
            .entry(title)
            .or_insert_with(|| {
                order.push(title);
                Vec::new()
            })
            .push(entry);
    }

    let mut actions = Vec::new();
    for title in order {
        let group = &groups[title];
        if group.len() < 2 {
            continue;
        }
        let mut representative = group[0];
        for entry in group.iter().copied().skip(1) {
            if entry.engagement < representative.engagement {
                representative = entry;
            }
        }
        let engagements = group
            .iter()
            .map(|entry| format!("[{}]", entry.engagement))
            .collect::<Vec<_>>()
            .join("; ");
        actions.push(ActionItem::new(
            representative.clone(),
            format!("Duplicates: {engagements}"),
        ));
    }
    actions
}

/// Any titled entry containing a blacklisted word, independent of the
/// other filters. The reason lists every matching token in parse order.
fn blacklist_actions(entries: &[Entry], words: &[String]) -> Vec<ActionItem> {
    let mut actions = Vec::new();
    for entry in entries {
        let Some(title) = entry.title.as_deref() else {
            continue;
        };
        let title = title.to_lowercase();
        let matched: Vec<&str> = words
            .iter()
            .filter(|word| title.contains(word.as_str()))
            .map(|word| word.as_str())
            .collect();
        if !matched.is_empty() {
            actions.push(ActionItem::new(
                entry.clone(),
                format!("Blacklisted word in title: {}", matched.join("; ")),
            ));
        }
    }
    actions
}
