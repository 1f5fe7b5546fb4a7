mod common;

use nazim_site::application::access::{Permission, Principal};
use nazim_site::application::admin::AdminSeoError;
use nazim_site::domain::seo::{SeoMetadata, SeoQuery, SeoStatusFilter, SeoTypeFilter};
use nazim_site::domain::types::SeoItemType;

use common::{MemoryStore, page, post, seo_service};

async fn seeded_store() -> std::sync::Arc<MemoryStore> {
    let store = MemoryStore::shared();
    store.pages.lock().await.extend([
        page("about", "About us", Some("About"), Some("Who we are")),
        page("admissions", "Admissions", Some("Admissions"), None),
    ]);
    let mut welcome = post("welcome", "Welcome back", Some("Welcome"), Some("Term starts"));
    welcome.seo_image_path = Some("posts/welcome.jpg".into());
    store.posts.lock().await.push(welcome);
    store
}

#[tokio::test]
async fn coverage_counts_items_with_complete_metadata() {
    let store = seeded_store().await;
    for page in store.pages.lock().await.iter_mut() {
        page.seo_image_path = Some("pages/cover.jpg".into());
    }

    let report = seo_service(&store)
        .audit(&Principal::operator("auditor"), &SeoQuery::default())
        .await
        .expect("audit");

    assert_eq!(report.stats.total, 3);
    assert_eq!(report.stats.complete, 2);
    assert_eq!(report.stats.needs_attention, 1);
    assert_eq!(report.stats.coverage, 67);
    assert_eq!(report.items.len(), 3);
}

#[tokio::test]
async fn filters_narrow_items_but_not_stats() {
    let store = seeded_store().await;
    let query = SeoQuery {
        search: String::new(),
        item_type: SeoTypeFilter::Page,
        status: SeoStatusFilter::NeedsAttention,
    };

    let report = seo_service(&store)
        .audit(&Principal::operator("auditor"), &query)
        .await
        .expect("audit");

    assert_eq!(report.stats.total, 3);
    assert_eq!(report.items.len(), 2);
    assert!(
        report
            .items
            .iter()
            .all(|item| item.item_type == SeoItemType::Page && item.needs_attention())
    );
}

#[tokio::test]
async fn search_matches_slug_case_insensitively() {
    let store = seeded_store().await;
    let query = SeoQuery {
        search: "ADMISS".into(),
        ..SeoQuery::default()
    };

    let report = seo_service(&store)
        .audit(&Principal::operator("auditor"), &query)
        .await
        .expect("audit");

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].slug, "admissions");
}

#[tokio::test]
async fn collections_without_read_permission_are_audited_as_empty() {
    let store = seeded_store().await;
    let principal = Principal::new("editor", [Permission::PostsRead]);

    let report = seo_service(&store)
        .audit(&principal, &SeoQuery::default())
        .await
        .expect("audit");

    assert_eq!(report.stats.total, 1);
    assert!(
        report
            .items
            .iter()
            .all(|item| item.item_type == SeoItemType::Post)
    );
}

#[tokio::test]
async fn empty_site_reports_zero_coverage() {
    let store = MemoryStore::shared();

    let report = seo_service(&store)
        .audit(&Principal::operator("auditor"), &SeoQuery::default())
        .await
        .expect("audit");

    assert_eq!(report.stats.total, 0);
    assert_eq!(report.stats.coverage, 0);
    assert!(report.items.is_empty());
}

#[tokio::test]
async fn filling_page_metadata_moves_it_to_complete() {
    let store = seeded_store().await;
    let admissions = store.pages.lock().await[1].id;
    let service = seo_service(&store);
    let needs = SeoQuery {
        status: SeoStatusFilter::NeedsAttention,
        ..SeoQuery::default()
    };

    let before = service
        .audit(&Principal::operator("auditor"), &needs)
        .await
        .expect("audit");
    assert!(before.items.iter().any(|item| item.id == admissions));

    let page = service
        .update_page(
            "editor@alnoor",
            admissions,
            SeoMetadata {
                seo_title: Some(" Admissions 2026 ".into()),
                seo_description: Some("How to apply".into()),
                seo_image_path: Some("pages/admissions.jpg".into()),
            },
        )
        .await
        .expect("update");
    assert_eq!(page.seo_title.as_deref(), Some("Admissions 2026"));

    let after = service
        .audit(&Principal::operator("auditor"), &needs)
        .await
        .expect("audit");
    assert!(after.items.iter().all(|item| item.id != admissions));
    assert_eq!(after.stats.complete, before.stats.complete + 1);

    let audit = store.audit.lock().await;
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].action, "page.seo");
    assert_eq!(audit[0].actor, "editor@alnoor");
    assert_eq!(audit[0].entity_id, Some(admissions.to_string()));
}

#[tokio::test]
async fn blank_post_metadata_clears_fields() {
    let store = seeded_store().await;
    let welcome = store.posts.lock().await[0].id;

    let post = seo_service(&store)
        .update_post(
            "editor@alnoor",
            welcome,
            SeoMetadata {
                seo_title: Some("Welcome".into()),
                seo_description: Some("   ".into()),
                seo_image_path: None,
            },
        )
        .await
        .expect("update");

    assert!(post.seo_description.is_none());
    assert!(post.seo_image_path.is_none());
    assert_eq!(store.audit_actions().await, vec!["post.seo".to_string()]);
}

#[tokio::test]
async fn unknown_page_is_not_found_and_not_audited() {
    let store = seeded_store().await;

    let err = seo_service(&store)
        .update_page("editor@alnoor", uuid::Uuid::new_v4(), SeoMetadata::default())
        .await
        .expect_err("missing page");

    assert!(matches!(err, AdminSeoError::NotFound(SeoItemType::Page, _)));
    assert!(store.audit.lock().await.is_empty());
}

#[tokio::test]
async fn overlong_title_is_rejected_before_writing() {
    let store = seeded_store().await;
    let about = store.pages.lock().await[0].id;

    let err = seo_service(&store)
        .update_page(
            "editor@alnoor",
            about,
            SeoMetadata {
                seo_title: Some("x".repeat(300)),
                ..SeoMetadata::default()
            },
        )
        .await
        .expect_err("too long");

    match err {
        AdminSeoError::Validation(domain) => assert_eq!(domain.field(), Some("seo_title")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(store.pages.lock().await[0].seo_title.as_deref(), Some("About"));
}

