// tests/registration.rs
mod common;

use common::FakePlatform;
use gtube::directory::{ChannelDirectory, Roster};
use gtube::progress::NullProgress;
use gtube::resolver::HandleResolver;
use gtube::store::{Store, Table};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn platform() -> FakePlatform {
    FakePlatform::new()
        .channel("alpha", "UC-alpha", "Alpha")
        .channel("beta", "UC-beta", " Beta TV ")
}

#[test]
fn registering_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let api = platform();
    let resolver = HandleResolver::new(&api);
    let directory = ChannelDirectory::new(Store::new(dir.path()), Roster::Competitor);

    let first = directory
        .register(&resolver, &lines(&["https://www.youtube.com/@alpha"]), &mut NullProgress)
        .unwrap();
    assert_eq!(first.accepted.len(), 1);
    assert_eq!(first.accepted[0].id, "UC-alpha");
    assert_eq!(first.accepted[0].url, "https://www.youtube.com/@alpha");

    let second = directory
        .register(&resolver, &lines(&["https://www.youtube.com/@alpha"]), &mut NullProgress)
        .unwrap();
    assert!(second.accepted.is_empty());
    assert_eq!(second.duplicates, vec!["https://www.youtube.com/@alpha"]);
    assert_eq!(directory.list().unwrap().len(), 1);
}

#[test]
fn buckets_keep_inputs_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let api = platform();
    let directory = ChannelDirectory::new(Store::new(dir.path()), Roster::Benchmark);

    let pasted = "  @beta  \n\nno-at-sign-here\nhttps://m.youtube.com/@ghost\n@alpha\n@beta/videos\n";
    let reg = directory
        .register(&HandleResolver::new(&api), &lines(&[pasted]), &mut NullProgress)
        .unwrap();

    let accepted: Vec<(&str, &str)> = reg.accepted.iter().map(|r| (r.id.as_str(), r.name.as_str())).collect();
    assert_eq!(accepted, vec![("UC-beta", "Beta TV"), ("UC-alpha", "Alpha")]);
    assert_eq!(reg.duplicates, vec!["@beta/videos"]);
    assert_eq!(reg.failed, vec!["no-at-sign-here", "https://m.youtube.com/@ghost"]);

    let listed = directory.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Beta TV");
    assert_eq!(listed[0].url, "https://www.youtube.com/@beta");
    assert_eq!(listed[1].id, "UC-alpha");

    // no search for the line without a handle
    assert_eq!(api.count_calls("search"), 4);
}

#[test]
fn nothing_accepted_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    let api = platform();
    let directory = ChannelDirectory::new(store.clone(), Roster::Competitor);

    let reg = directory
        .register(&HandleResolver::new(&api), &lines(&["@nobody", "   "]), &mut NullProgress)
        .unwrap();
    assert_eq!(reg.failed, vec!["@nobody"]);
    assert!(!store.path(Table::CompetitorChannels).exists());
}

#[test]
fn rosters_are_independent_and_remove_works() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    let api = platform();
    let resolver = HandleResolver::new(&api);
    let competitors = ChannelDirectory::new(store.clone(), Roster::Competitor);
    let benchmarks = ChannelDirectory::new(store.clone(), Roster::Benchmark);

    competitors.register(&resolver, &lines(&["@alpha", "@beta"]), &mut NullProgress).unwrap();
    benchmarks.register(&resolver, &lines(&["@alpha"]), &mut NullProgress).unwrap();

    let removed = competitors.remove("UC-alpha").unwrap().unwrap();
    assert_eq!(removed.name, "Alpha");
    assert_eq!(competitors.remove("UC-alpha").unwrap(), None);

    let ids: Vec<String> = competitors.list().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["UC-beta"]);
    assert_eq!(benchmarks.list().unwrap().len(), 1);
}

#[test]
fn malformed_table_is_replaced_by_next_registration() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    std::fs::write(store.path(Table::CompetitorChannels), "garbage;header\n1;2\n").unwrap();

    let api = platform();
    let directory = ChannelDirectory::new(store.clone(), Roster::Competitor);
    let reg = directory
        .register(&HandleResolver::new(&api), &lines(&["@alpha"]), &mut NullProgress)
        .unwrap();
    assert_eq!(reg.accepted.len(), 1);

    let text = std::fs::read_to_string(store.path(Table::CompetitorChannels)).unwrap();
    assert!(text.starts_with("channel_name,channel_url,channel_id"));
}

#[test]
fn same_channel_twice_in_one_batch_is_stored_once() {
    let dir = tempfile::tempdir().unwrap();
    let api = platform();
    let directory = ChannelDirectory::new(Store::new(dir.path()), Roster::Competitor);

    let reg = directory
        .register(
            &HandleResolver::new(&api),
            &lines(&["@alpha\nhttps://www.youtube.com/@alpha"]),
            &mut NullProgress,
        )
        .unwrap();
    assert_eq!(reg.accepted.len(), 1);
    assert_eq!(reg.duplicates, vec!["https://www.youtube.com/@alpha"]);

    let ids: Vec<String> = directory.list().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["UC-alpha"]);
}
