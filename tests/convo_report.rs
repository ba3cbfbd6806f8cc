// tests/convo_report.rs
//
// End-to-end: conversation snapshot → extraction → report/JSON.

use page_scrape::core::dom::Doc;
use page_scrape::report;
use page_scrape::scrape::convo::{self, Conversation, MessageKind};

const GROUPED: &str = r#"
<html><body>
  <div class="profile">
    Maria, 29
    Amateur astronomer
  </div>
  <div class="messages-list__conversation">
    <div class="message message--in"><span>undated hello</span></div>
    <div class="message-group-date"><div class="p-3">Mon,&nbsp;12 Aug</div></div>
    <div class="message message--in"><span>hey there</span></div>
    <div class="message message--out"><span>hi!</span></div>
    <div class="message-group-date"><div class="p-3">Tue, 13 Aug</div></div>
    <div class="message message--out"><span>still around?</span></div>
    <div class="message"><span>system notice</span></div>
  </div>
</body></html>
"#;

fn scrape(html: &str) -> Conversation {
    convo::extract(&Doc::parse(html), false)
}

#[test]
fn dates_follow_the_nearest_preceding_divider() {
    let convo = scrape(GROUPED);
    let dates: Vec<Option<&str>> =
        convo.messages.iter().map(|m| m.date.as_deref()).collect();
    assert_eq!(
        dates,
        vec![
            None,
            Some("Mon, 12 Aug"),
            Some("Mon, 12 Aug"),
            Some("Tue, 13 Aug"),
            Some("Tue, 13 Aug"),
        ]
    );
}

#[test]
fn kinds_come_from_marker_classes() {
    let convo = scrape(GROUPED);
    let kinds: Vec<MessageKind> = convo.messages.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MessageKind::In,
            MessageKind::In,
            MessageKind::Out,
            MessageKind::Out,
            MessageKind::Unknown,
        ]
    );
}

#[test]
fn report_has_profile_then_dated_message_runs() {
    let report = report::to_human_readable(&scrape(GROUPED));
    let expected = "\
=== PROFILE ===
Maria, 29
    Amateur astronomer

=== MESSAGES ===
her << undated hello

--- Mon, 12 Aug ---
her << hey there
 me >> hi!

--- Tue, 13 Aug ---
 me >> still around?
?? system notice";
    assert_eq!(report, expected);
}

#[test]
fn snapshot_without_profile_omits_the_section() {
    let html = r#"<div class="messages-list__conversation">
        <div class="message message--out"><span>alone</span></div>
    </div>"#;
    let convo = scrape(html);
    assert_eq!(convo.profile, None);
    let report = report::to_human_readable(&convo);
    assert!(!report.contains("PROFILE"));
    assert_eq!(report, "=== MESSAGES ===\n me >> alone");
}

#[test]
fn empty_snapshot_degrades_to_empty_output() {
    let convo = scrape("<html><body></body></html>");
    assert_eq!(convo.profile, None);
    assert!(convo.messages.is_empty());
    assert_eq!(report::to_human_readable(&convo), "");
}

#[test]
fn json_round_trip_reconstructs_the_scrape() {
    let convo = scrape(GROUPED);
    let parsed: Conversation = serde_json::from_str(&report::to_json(&convo)).unwrap();
    assert_eq!(parsed, convo);
}

#[test]
fn json_uses_lowercase_type_tags() {
    let convo = scrape(GROUPED);
    let json = report::to_json(&convo);
    assert!(json.contains(r#""type": "in""#));
    assert!(json.contains(r#""type": "out""#));
    assert!(json.contains(r#""type": "unknown""#));
}

#[test]
fn flat_extraction_takes_messages_anywhere_and_skips_dates() {
    let html = r#"
        <section><div class="message message--in"><span>a</span></div></section>
        <aside><div class="message message--out"><span>b</span></div></aside>
    "#;
    let convo = convo::extract(&Doc::parse(html), true);
    assert_eq!(convo.messages.len(), 2);
    assert!(convo.messages.iter().all(|m| m.date.is_none()));
}
