//! Session entry points: current targets, collections, names, references.

use descnav::{
    Host, MemoryHost, MemoryNode, MemoryObject, NavOptions, NodeShape, ReferenceHandle, Session,
    Slot,
};
use descnav_testhelpers::CountingHost;

fn documents() -> (MemoryHost, MemoryNode) {
    let mut host = MemoryHost::new();
    let docs = host.insert_list(vec![
        MemoryObject::new("document")
            .with("name", "Cover.psd")
            .with("ID", 101)
            .into(),
        MemoryObject::new("document")
            .with("name", "Poster.psd")
            .with("ID", 102)
            .into(),
        MemoryObject::new("document")
            .with("name", " Poster.psd ")
            .with("ID", 103)
            .into(),
    ]);
    host.set_collection("document", docs);
    (host, docs)
}

fn element(host: &MemoryHost, list: MemoryNode, index: usize) -> MemoryNode {
    host.child(&list, Slot::Index(index), NodeShape::Descriptor)
        .unwrap()
}

#[test]
fn selected_resolves_the_current_target() {
    descnav_testhelpers::setup();

    let (mut host, docs) = documents();
    let active = element(&host, docs, 1);
    host.set_target("document", active);
    let session = Session::new(host);

    assert_eq!(session.selected("document").get_integer("ID"), 102);
    assert!(session.selected("layer").is_sentinel());
    assert!(session.selected("").is_sentinel());
}

#[test]
fn collection_lists_every_object_of_a_class() {
    descnav_testhelpers::setup();

    let (host, _) = documents();
    let session = Session::new(host);

    let docs = session.collection("document");
    assert_eq!(docs.get_count(), 3);
    assert_eq!(docs.get_object(0).get_string("name"), "Cover.psd");

    let channels = session.collection("channel");
    assert!(channels.is_sentinel());
    assert_eq!(channels.get_count(), -1);
}

#[test]
fn named_matches_trimmed_names_without_case() {
    descnav_testhelpers::setup();

    let (host, _) = documents();
    let session = Session::new(host);

    assert_eq!(session.named("document", "poster.PSD").get_integer("ID"), 102);
    assert_eq!(session.named("document", "  cover.psd").get_integer("ID"), 101);
    assert!(session.named("document", "missing.psd").is_sentinel());
    assert!(session.named("document", "   ").is_sentinel());
    assert!(session.named("channel", "Red").is_sentinel());
}

#[test]
fn named_with_exact_names() {
    descnav_testhelpers::setup();

    let (host, _) = documents();
    let session = Session::new(host).with_options(NavOptions::new().exact_names());

    assert!(session.named("document", "poster.psd").is_sentinel());
    assert_eq!(session.named("document", "Poster.psd").get_integer("ID"), 102);
    assert_eq!(session.named("document", " Poster.psd ").get_integer("ID"), 103);
}

#[test]
fn resolve_consumes_reference_handles() {
    descnav_testhelpers::setup();

    let (host, _) = documents();
    let session = Session::new(CountingHost::new(host));
    let class = session.host().id("document").unwrap();

    let mut third = ReferenceHandle::new();
    third.put_index(class, 3);
    assert_eq!(session.resolve(third).get_integer("ID"), 103);

    let mut by_name = ReferenceHandle::new();
    by_name.put_name(class, "Cover.psd");
    assert_eq!(session.resolve(by_name).get_integer("ID"), 101);

    let mut by_id = ReferenceHandle::new();
    by_id.put_identifier(class, 102);
    assert_eq!(session.resolve(by_id).get_string("name"), "Poster.psd");

    let mut by_offset = ReferenceHandle::new();
    by_offset.put_offset(class, 1);
    assert!(session.resolve(by_offset).is_sentinel());

    session.host().reset();
    assert!(session.resolve(ReferenceHandle::sentinel().clone()).is_sentinel());
    assert_eq!(session.host().total(), 0);
}

#[test]
fn reference_leaves_can_be_resolved() {
    descnav_testhelpers::setup();

    let (mut host, _) = documents();
    let class = host.id("document").unwrap();
    let mut target = ReferenceHandle::new();
    target.put_index(class, 2);
    let link = host.insert_object(MemoryObject::new("link").with("target", target));
    let session = Session::new(host);

    let reference = session.root(link).get_reference("target");
    assert_eq!(reference.desired_class(), class);
    assert_eq!(reference.index(), 2);
    assert_eq!(session.resolve(reference).get_integer("ID"), 102);
}

#[test]
fn fetch_wraps_any_lookup() {
    descnav_testhelpers::setup();

    let (host, docs) = documents();
    let session = Session::new(host);

    let first = session.fetch(|host| host.child(&docs, Slot::Index(0), NodeShape::Descriptor));
    assert_eq!(first.get_string("name"), "Cover.psd");

    let missing = session.fetch(|host| host.child(&docs, Slot::Index(7), NodeShape::Descriptor));
    assert!(missing.is_sentinel());
}
