//! First / single / all queries over list navigators.

use descnav::{DescriptorNav, Host, MemoryHost, MemoryNode, MemoryObject, MemoryValue, NavError, Session};
use descnav_testhelpers::{CountingHost, FaultyHost, RecordingDiagnostics};

fn items(names: &[&str]) -> (MemoryHost, MemoryNode) {
    let mut host = MemoryHost::new();
    let list = host.insert_list(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                MemoryObject::new("item")
                    .with("name", *name)
                    .with("position", i as i32)
                    .into()
            })
            .collect(),
    );
    (host, list)
}

fn names<H: Host>(navs: &[DescriptorNav<'_, H>]) -> Vec<String> {
    navs.iter().map(|nav| nav.get_string("name")).collect()
}

fn is_beta(item: &DescriptorNav<'_, MemoryHost>) -> bool {
    item.get_string("name") == "beta"
}

fn alpha_or_gamma(item: &DescriptorNav<'_, MemoryHost>) -> bool {
    matches!(item.get_string("name").as_str(), "alpha" | "gamma")
}

// ---------------------------------------------------------------------------
// One, several and no matches
// ---------------------------------------------------------------------------

#[test]
fn only_the_middle_item_matches() {
    descnav_testhelpers::setup();

    let (host, list) = items(&["alpha", "beta", "gamma"]);
    let diagnostics = RecordingDiagnostics::new();
    let session = Session::new(host).with_diagnostics(diagnostics.clone());
    let list = session.root_list(list);

    assert_eq!(list.get_first_where(is_beta).get_integer("position"), 1);
    assert_eq!(names(&list.get_all_where(is_beta)), ["beta"]);
    assert_eq!(list.get_single_where(is_beta).get_integer("position"), 1);
    assert!(diagnostics.is_empty());
}

#[test]
fn two_matches_violate_single() {
    descnav_testhelpers::setup();

    let (host, list) = items(&["alpha", "beta", "gamma"]);
    let diagnostics = RecordingDiagnostics::new();
    let session = Session::new(host).with_diagnostics(diagnostics.clone());
    let list = session.root_list(list);

    assert!(list.get_single_where(alpha_or_gamma).is_sentinel());
    assert_eq!(names(&list.get_all_where(alpha_or_gamma)), ["alpha", "gamma"]);
    assert_eq!(list.get_first_where(alpha_or_gamma).get_string("name"), "alpha");

    assert_eq!(diagnostics.multiplicity(), [2]);
    insta::assert_snapshot!(diagnostics.messages().join("\n"), @"expected exactly one match, found 2");

    assert_eq!(
        list.try_single_where(alpha_or_gamma).map(|nav| nav.get_string("name")),
        Err(NavError::Multiplicity { matches: 2 })
    );
}

#[test]
fn no_match_violates_single() {
    descnav_testhelpers::setup();

    let (host, list) = items(&["alpha", "beta"]);
    let diagnostics = RecordingDiagnostics::new();
    let session = Session::new(host).with_diagnostics(diagnostics.clone());
    let list = session.root_list(list);

    assert!(list.get_single_where(|_| false).is_sentinel());
    assert_eq!(diagnostics.multiplicity(), [0]);
}

#[test]
fn empty_list_is_not_a_sentinel() {
    descnav_testhelpers::setup();

    let (host, list) = items(&[]);
    let diagnostics = RecordingDiagnostics::new();
    let session = Session::new(host).with_diagnostics(diagnostics.clone());
    let list = session.root_list(list);

    assert!(!list.is_sentinel());
    assert_eq!(list.get_count(), 0);
    assert!(list.get_all_where(|_| true).is_empty());
    assert!(list.get_first_where(|_| true).is_sentinel());
    assert!(list.get_single_where(|_| true).is_sentinel());
    assert_eq!(diagnostics.multiplicity(), [0]);
}

#[test]
fn single_on_a_sentinel_list_stays_quiet() {
    descnav_testhelpers::setup();

    let (host, _) = items(&["alpha"]);
    let diagnostics = RecordingDiagnostics::new();
    let session = Session::new(host).with_diagnostics(diagnostics.clone());

    let list = session.sentinel_list();
    assert!(list.get_single_where(|_| true).is_sentinel());
    assert_eq!(
        list.try_single_where(|_| true).map(|nav| nav.is_sentinel()),
        Err(NavError::Sentinel)
    );
    assert!(diagnostics.is_empty());
}

// ---------------------------------------------------------------------------
// Laws
// ---------------------------------------------------------------------------

#[test]
fn first_single_and_all_agree() {
    descnav_testhelpers::setup();

    let (host, list) = items(&["alpha", "beta", "gamma", "delta", "epsilon"]);
    let session = Session::new(host);
    let list = session.root_list(list);

    let predicates: [(&str, fn(&str) -> bool); 4] = [
        ("none", |_| false),
        ("one", |name| name == "delta"),
        ("two", |name| name.starts_with('e') || name.starts_with('b')),
        ("all", |_| true),
    ];

    for (label, p) in predicates {
        let all = list.get_all_where(|item| p(&item.get_string("name")));
        let first = list.get_first_where(|item| p(&item.get_string("name")));
        let single = list.get_single_where(|item| p(&item.get_string("name")));

        match all.first() {
            Some(head) => assert_eq!(first.node(), head.node(), "{label}"),
            None => assert!(first.is_sentinel(), "{label}"),
        }
        if all.len() == 1 {
            assert_eq!(single.node(), all[0].node(), "{label}");
        } else {
            assert!(single.is_sentinel(), "{label}");
        }
    }
}

#[test]
fn first_where_stops_at_the_first_match() {
    descnav_testhelpers::setup();

    let (host, list) = items(&["alpha", "beta", "gamma"]);
    let session = Session::new(host);
    let list = session.root_list(list);

    let mut seen = Vec::new();
    let found = list.get_first_where(|item| {
        seen.push(item.get_integer("position"));
        item.get_string("name") == "beta"
    });
    assert_eq!(found.get_string("name"), "beta");
    assert_eq!(seen, [0, 1]);
}

// ---------------------------------------------------------------------------
// Failures inside a scan
// ---------------------------------------------------------------------------

#[test]
fn a_failing_predicate_only_excludes_its_element() {
    descnav_testhelpers::setup();

    let mut host = MemoryHost::new();
    let list = host.insert_list(vec![
        MemoryObject::new("item").with("name", "alpha").into(),
        MemoryObject::new("item").with("label", "no name").into(),
        MemoryObject::new("item").with("name", "avocado").into(),
        MemoryObject::new("item").with("name", "banana").into(),
    ]);
    let session = Session::new(host);
    let list = session.root_list(list);

    let mut calls = 0;
    let matches = list.get_all_where(|item| {
        calls += 1;
        let name = item.try_get::<String>("name")?;
        Ok::<_, NavError>(name.starts_with('a'))
    });
    assert_eq!(calls, 4);
    assert_eq!(names(&matches), ["alpha", "avocado"]);

    let absent = list.where_matches(|item| item.value::<String>("name").map(|n| n.len() > 5));
    assert_eq!(names(&absent.to_result_array()), ["avocado", "banana"]);
}

#[test]
fn unreadable_elements_are_skipped() {
    descnav_testhelpers::setup();

    let (host, list) = items(&["alpha", "beta", "gamma"]);
    let session = Session::new(FaultyHost::new(host).fail_index(1));
    let list = session.root_list(list);

    let mut seen = 0;
    let all = list.get_all_where(|_| {
        seen += 1;
        true
    });
    assert_eq!(seen, 2);
    assert_eq!(names(&all), ["alpha", "gamma"]);
    assert_eq!(list.get_count(), 3);
    assert!(list.get_object(1).is_sentinel());
}

#[test]
fn elements_that_are_not_descriptors_never_reach_predicates() {
    descnav_testhelpers::setup();

    let mut host = MemoryHost::new();
    let list = host.insert_list(vec![
        "loose string".into(),
        MemoryObject::new("item").with("name", "alpha").into(),
        MemoryValue::list([1, 2]),
    ]);
    let session = Session::new(host);
    let list = session.root_list(list);

    let mut seen = 0;
    let all = list.get_all_where(|item| {
        seen += 1;
        !item.is_sentinel()
    });
    assert_eq!(seen, 1);
    assert_eq!(names(&all), ["alpha"]);
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.get_string(0), "loose string");
}

#[test]
fn a_failing_count_reads_as_sentinel() {
    descnav_testhelpers::setup();

    let (host, list) = items(&["alpha"]);
    let session = Session::new(FaultyHost::new(host));
    let list = session.root_list(list);
    assert_eq!(list.get_count(), 1);

    session.host().fail_len();
    assert_eq!(list.get_count(), -1);
    assert!(list.get_all_where(|_| true).is_empty());
    assert!(list.get_object(0).is_sentinel());
}

#[test]
fn queries_read_the_count_once() {
    descnav_testhelpers::setup();

    let (host, list) = items(&["alpha", "beta", "gamma"]);
    let session = Session::new(CountingHost::new(host));
    let list = session.root_list(list);

    list.get_all_where(|_| true);
    assert_eq!(session.host().calls_to("len"), 1);
    assert_eq!(session.host().calls_to("child"), 3);

    session.host().reset();
    list.get_single_where(|item| item.get_string("name") == "beta");
    assert_eq!(session.host().calls_to("len"), 1);
}

#[test]
fn out_of_range_indices_give_sentinels() {
    descnav_testhelpers::setup();

    let (host, list) = items(&["alpha", "beta"]);
    let session = Session::new(host);
    let list = session.root_list(list);

    assert_eq!(list.get_object(1).get_string("name"), "beta");
    assert!(list.get_object(2).is_sentinel());
    assert!(list.get_list(0).is_sentinel());
    assert_eq!(
        list.try_object(9).map(|nav| nav.is_sentinel()),
        Err(NavError::OutOfRange { index: 9, count: 2 })
    );
}
