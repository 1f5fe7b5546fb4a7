mod common;

use nazim_site::application::admin::{AdminInboxError, InboxSession};
use nazim_site::application::pagination::PageRequest;
use nazim_site::application::repos::InboxQueryFilter;
use nazim_site::domain::types::InboxStatus;

use common::{MemoryStore, inbox_service, message};

#[tokio::test]
async fn opening_a_new_message_marks_it_read() {
    let store = MemoryStore::shared();
    let fresh = message("Amina Yusuf", InboxStatus::New, 0);
    let id = fresh.id;
    store.inbox.lock().await.push(fresh);

    let mut session = InboxSession::new(inbox_service(&store), "office");
    let opened = session.open(id).await.expect("open");
    assert_eq!(opened.status, InboxStatus::Read);

    let stats = inbox_service(&store).stats().await.expect("stats");
    assert_eq!(stats.new, 0);
    assert_eq!(stats.read, 1);
    assert_eq!(store.audit_actions().await, vec!["inbox.status"]);
}

#[tokio::test]
async fn opening_a_read_message_does_not_write() {
    let store = MemoryStore::shared();
    let read = message("Bilal Karimi", InboxStatus::Replied, 0);
    let id = read.id;
    store.inbox.lock().await.push(read);

    let mut session = InboxSession::new(inbox_service(&store), "office");
    let opened = session.open(id).await.expect("open");
    assert_eq!(opened.status, InboxStatus::Replied);
    assert!(store.audit_actions().await.is_empty());
}

#[tokio::test]
async fn archiving_straight_from_new_patches_the_open_view() {
    let store = MemoryStore::shared();
    let first = message("Amina Yusuf", InboxStatus::New, 0);
    let second = message("Hamid Noori", InboxStatus::New, 5);
    let (first_id, second_id) = (first.id, second.id);
    store.inbox.lock().await.extend([first, second]);

    let mut session = InboxSession::new(inbox_service(&store), "office");
    session.open(second_id).await.expect("open");

    let archived = session
        .set_status(second_id, InboxStatus::Archived)
        .await
        .expect("archive");
    assert_eq!(archived.status, InboxStatus::Archived);
    assert_eq!(
        session.current().map(|m| m.status),
        Some(InboxStatus::Archived)
    );

    // Archiving a message that is not open leaves the view alone.
    session
        .set_status(first_id, InboxStatus::Archived)
        .await
        .expect("archive other");
    assert_eq!(session.current().map(|m| m.id), Some(second_id));

    let stats = inbox_service(&store).stats().await.expect("stats");
    assert_eq!(stats.total, 2);
    assert_eq!(stats.archived, 2);
}

#[tokio::test]
async fn replying_stamps_replied_at() {
    let store = MemoryStore::shared();
    let fresh = message("Amina Yusuf", InboxStatus::Read, 0);
    let id = fresh.id;
    store.inbox.lock().await.push(fresh);

    let mut session = InboxSession::new(inbox_service(&store), "office");
    let replied = session
        .set_status(id, InboxStatus::Replied)
        .await
        .expect("reply");
    assert!(replied.replied_at.is_some());
}

#[tokio::test]
async fn deleting_the_open_message_closes_the_view() {
    let store = MemoryStore::shared();
    let fresh = message("Amina Yusuf", InboxStatus::New, 0);
    let id = fresh.id;
    store.inbox.lock().await.push(fresh);

    let mut session = InboxSession::new(inbox_service(&store), "office");
    session.open(id).await.expect("open");
    session.delete(id).await.expect("delete");

    assert!(session.current().is_none());
    assert!(store.inbox.lock().await.is_empty());
    assert_eq!(
        store.audit_actions().await,
        vec!["inbox.status", "inbox.delete"]
    );
}

#[tokio::test]
async fn failed_mutation_keeps_view_unchanged() {
    let store = MemoryStore::shared();
    let fresh = message("Amina Yusuf", InboxStatus::Read, 0);
    let id = fresh.id;
    store.inbox.lock().await.push(fresh);

    let mut session = InboxSession::new(inbox_service(&store), "office");
    session.open(id).await.expect("open");
    store.inbox.lock().await.clear();

    let err = session
        .set_status(id, InboxStatus::Archived)
        .await
        .expect_err("message vanished");
    assert!(matches!(err, AdminInboxError::NotFound(missing) if missing == id));
    assert_eq!(session.current().map(|m| m.status), Some(InboxStatus::Read));
}

#[tokio::test]
async fn list_filters_by_status_and_search_newest_first() {
    let store = MemoryStore::shared();
    store.inbox.lock().await.extend([
        message("Amina Yusuf", InboxStatus::New, 0),
        message("Hamid Noori", InboxStatus::New, 10),
        message("Bilal Karimi", InboxStatus::Archived, 20),
    ]);
    let service = inbox_service(&store);

    let new_only = service
        .list(
            &InboxQueryFilter {
                status: Some(InboxStatus::New),
                search: None,
            },
            PageRequest::new(1, 20),
        )
        .await
        .expect("list");
    let names: Vec<_> = new_only.data.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Hamid Noori", "Amina Yusuf"]);
    assert_eq!(new_only.total, 2);

    let searched = service
        .list(
            &InboxQueryFilter {
                status: None,
                search: Some("bilal".into()),
            },
            PageRequest::new(1, 20),
        )
        .await
        .expect("list");
    assert_eq!(searched.data.len(), 1);
    assert_eq!(searched.data[0].name, "Bilal Karimi");
}

#[tokio::test]
async fn stats_partition_every_message() {
    let store = MemoryStore::shared();
    store.inbox.lock().await.extend([
        message("A", InboxStatus::New, 0),
        message("B", InboxStatus::Read, 1),
        message("C", InboxStatus::Replied, 2),
        message("D", InboxStatus::Archived, 3),
        message("E", InboxStatus::New, 4),
    ]);

    let stats = inbox_service(&store).stats().await.expect("stats");
    assert_eq!(stats.total, 5);
    assert_eq!(
        stats.new + stats.read + stats.replied + stats.archived,
        stats.total
    );
    assert_eq!(stats.new, 2);
}
