use super::*;

use chrono::TimeZone;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

fn entry(
    id: &str,
    title: Option<&str>,
    engagement: i64,
    crawled: DateTime<Utc>,
) -> Entry {
    Entry {
        id: id.into(),
        title: title.map(Into::into),
        engagement,
        crawled: crawled.timestamp_millis(),
    }
}

#[test]
fn default_params_select_nothing() {
    let entries = vec![
        entry("1", Some("A"), 0, days_ago(30)),
        entry("2", Some("B"), 100, days_ago(30)),
    ];
    let actions = select_actions(&entries, now(), &SelectionParams::default());
    assert!(actions.is_empty());
}

#[test]
fn engagement_filter_respects_age_and_sorts_by_crawl_time() {
    let entries = vec![
        entry("recent", Some("A"), 3, days_ago(1)),
        entry("older", Some("B"), 5, days_ago(3)),
        entry("oldest", Some("C"), 3, days_ago(5)),
        entry("popular", Some("D"), 20, days_ago(5)),
    ];
    let params = SelectionParams {
        minimal_engagement: 10,
        min_age_days: 2,
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    let ids: Vec<&str> =
        actions.iter().map(|a| a.entry.id.as_str()).collect();
    assert_eq!(ids, ["oldest", "older"]);
    for action in &actions {
        assert_eq!(action.reason, "Engagement < 10");
    }
}

#[test]
fn engagement_filter_age_comparison_is_strict() {
    let entries = vec![entry("exact", Some("A"), 0, days_ago(2))];
    let params = SelectionParams {
        minimal_engagement: 10,
        min_age_days: 2,
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    assert!(actions.is_empty());
}

#[test]
fn engagement_filter_tolerates_extreme_ages() {
    let entries = vec![entry("1", Some("A"), 0, days_ago(30))];
    let params = SelectionParams {
        minimal_engagement: 10,
        min_age_days: i64::MAX,
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    assert!(actions.is_empty());
}

#[test]
fn duplicates_pick_lowest_engagement_representative() {
    let entries = vec![
        entry("1", Some("A"), 5, days_ago(1)),
        entry("2", Some("A"), 2, days_ago(1)),
        entry("3", Some("B"), 9, days_ago(1)),
    ];
    let params = SelectionParams {
        remove_duplicates: true,
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].entry.id, "2");
    assert_eq!(actions[0].reason, "Duplicates: [5]; [2]");
}

#[test]
fn duplicates_break_ties_on_first_entry() {
    let entries = vec![
        entry("1", Some("A"), 2, days_ago(1)),
        entry("2", Some("A"), 2, days_ago(1)),
    ];
    let params = SelectionParams {
        remove_duplicates: true,
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].entry.id, "1");
    assert_eq!(actions[0].reason, "Duplicates: [2]; [2]");
}

#[test]
fn duplicates_skip_engagement_filter_matches() {
    // "1" is taken by the engagement filter, leaving a title group of
    // size one for the duplicate filter.
    let entries = vec![
        entry("1", Some("A"), 1, days_ago(5)),
        entry("2", Some("A"), 7, days_ago(5)),
    ];
    let params = SelectionParams {
        minimal_engagement: 5,
        remove_duplicates: true,
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].entry.id, "1");
    assert_eq!(actions[0].reason, "Engagement < 5");
}

#[test]
fn duplicates_ignore_entries_without_titles() {
    let entries = vec![
        entry("1", None, 1, days_ago(1)),
        entry("2", None, 2, days_ago(1)),
    ];
    let params = SelectionParams {
        remove_duplicates: true,
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    assert!(actions.is_empty());
}

#[test]
fn blacklist_matches_case_insensitive_substrings() {
    let entries = vec![entry("1", Some("Kotlin news"), 50, days_ago(0))];
    let params = SelectionParams {
        blacklisted_words: Some("kotlin;php".into()),
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].reason, "Blacklisted word in title: kotlin");
}

#[test]
fn blacklist_reason_lists_every_matching_token() {
    let entries =
        vec![entry("1", Some("PHP and Kotlin digest"), 0, days_ago(0))];
    let params = SelectionParams {
        blacklisted_words: Some("kotlin; php ;;".into()),
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].reason, "Blacklisted word in title: kotlin; php");
}

#[test]
fn blacklist_does_not_exclude_prior_selections() {
    // An entry taken by the engagement filter still matches the
    // blacklist, producing two actions with distinct reasons.
    let entries = vec![entry("1", Some("Kotlin news"), 1, days_ago(5))];
    let params = SelectionParams {
        minimal_engagement: 5,
        blacklisted_words: Some("kotlin".into()),
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].entry.id, actions[1].entry.id);
    assert_eq!(actions[0].reason, "Engagement < 5");
    assert_eq!(actions[1].reason, "Blacklisted word in title: kotlin");
}

#[test]
fn filters_concatenate_in_fixed_order() {
    let entries = vec![
        entry("stale", Some("Old thing"), 0, days_ago(9)),
        entry("dup1", Some("Same"), 4, days_ago(1)),
        entry("dup2", Some("Same"), 6, days_ago(1)),
        entry("listed", Some("Rails weekly"), 40, days_ago(1)),
    ];
    let params = SelectionParams {
        minimal_engagement: 3,
        remove_duplicates: true,
        blacklisted_words: Some("rails".into()),
        ..SelectionParams::default()
    };
    let actions = select_actions(&entries, now(), &params);
    let ids: Vec<&str> =
        actions.iter().map(|a| a.entry.id.as_str()).collect();
    assert_eq!(ids, ["stale", "dup1", "listed"]);
}

#[test]
fn blacklist_parsing_trims_lowercases_and_drops_empties() {
    assert_eq!(
        parse_blacklist(Some(" Kotlin ;;PHP; ")),
        ["kotlin", "php"]
    );
    assert!(parse_blacklist(Some("")).is_empty());
    assert!(parse_blacklist(Some(" ; ; ")).is_empty());
    assert!(parse_blacklist(None).is_empty());
}

#[test]
fn crawl_time_converts_from_epoch_millis() {
    let crawled = days_ago(3);
    let e = entry("1", Some("A"), 0, crawled);
    assert_eq!(e.crawled_utc(), crawled);
}

#[test]
fn display_title_strips_newlines() {
    let e = entry("1", Some("Two\nlines"), 0, days_ago(0));
    assert_eq!(e.display_title(), "Twolines");
    let untitled = entry("2", None, 0, days_ago(0));
    assert_eq!(untitled.display_title(), "");
}

#[test]
fn stream_contents_tolerates_missing_or_null_items() {
    let stream: StreamContents =
        serde_json::from_str(r#"{"id":"user/u/category/global.all"}"#)
            .unwrap();
    assert!(stream.items.is_none());

    let stream: StreamContents =
        serde_json::from_str(r#"{"id":"s","items":null}"#).unwrap();
    assert!(stream.items.is_none());

    let stream: StreamContents = serde_json::from_str(
        r#"{"id":"s","items":[{"id":"e1","title":"T","engagement":3,"crawled":100}]}"#,
    )
    .unwrap();
    let items = stream.items.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "e1");
    assert_eq!(items[0].engagement, 3);
}

#[test]
fn entries_tolerate_missing_titles() {
    let e: Entry =
        serde_json::from_str(r#"{"id":"e1","engagement":1,"crawled":5}"#)
            .unwrap();
    assert!(e.title.is_none());
}

#[test]
fn stream_id_maps_empty_category_to_all() {
    let client = FeedlyClient::new("u1", "t1");
    assert_eq!(client.stream_id(None), "user/u1/category/global.all");
    assert_eq!(client.stream_id(Some("")), "user/u1/category/global.all");
    assert_eq!(client.stream_id(Some("Tech")), "user/u1/category/Tech");
}

#[tokio::test]
async fn fetch_unread_degrades_server_errors_to_empty() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = std::thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut request = [0u8; 1024];
        let _ = std::io::Read::read(&mut socket, &mut request);
        std::io::Write::write_all(
            &mut socket,
            b"HTTP/1.1 500 Internal Server Error\r\n\
              content-length: 0\r\nconnection: close\r\n\r\n",
        )
        .unwrap();
    });

    let client =
        FeedlyClient::with_base_url(format!("http://{addr}"), "u1", "t1");
    let entries = client.fetch_unread(None).await.unwrap();
    assert!(entries.is_empty());
    server.join().unwrap();
}

#[test]
fn marker_request_serializes_to_the_wire_shape() {
    let ids = vec!["e1".to_string(), "e2".to_string()];
    let body = serde_json::to_value(MarkerRequest {
        kind: "entries",
        entry_ids: &ids,
        action: "markAsRead",
    })
    .unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "type": "entries",
            "entryIds": ["e1", "e2"],
            "action": "markAsRead",
        })
    );
}
