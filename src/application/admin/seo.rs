use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::access::{Permission, Principal};
use crate::application::admin::audit::AdminAuditService;
use crate::application::repos::{ContentScope, ContentSeoWriteRepo, PagesRepo, PostsRepo, RepoError};
use crate::domain::entities::{PageRecord, PostRecord};
use crate::domain::error::DomainError;
use crate::domain::seo::{SeoMetadata, SeoQuery, SeoReport};
use crate::domain::types::SeoItemType;

#[derive(Debug, Error)]
pub enum AdminSeoError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("{kind} `{1}` not found", kind = .0.as_str())]
    NotFound(SeoItemType, Uuid),
    #[error(transparent)]
    Repo(RepoError),
}

impl AdminSeoError {
    fn from_repo(item_type: SeoItemType, id: Uuid, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound(item_type, id),
            other => Self::Repo(other),
        }
    }
}

impl From<RepoError> for AdminSeoError {
    fn from(err: RepoError) -> Self {
        Self::Repo(err)
    }
}

/// SEO completeness audit across every page and post, plus metadata edits.
#[derive(Clone)]
pub struct AdminSeoService {
    pages: Arc<dyn PagesRepo>,
    posts: Arc<dyn PostsRepo>,
    writer: Arc<dyn ContentSeoWriteRepo>,
    audit: AdminAuditService,
}

impl AdminSeoService {
    pub fn new(
        pages: Arc<dyn PagesRepo>,
        posts: Arc<dyn PostsRepo>,
        writer: Arc<dyn ContentSeoWriteRepo>,
        audit: AdminAuditService,
    ) -> Self {
        Self {
            pages,
            posts,
            writer,
            audit,
        }
    }

    /// Collections the principal may not read are audited as empty.
    pub async fn audit(
        &self,
        principal: &Principal,
        query: &SeoQuery,
    ) -> Result<SeoReport, RepoError> {
        let load_pages = async {
            if principal.can(Permission::PagesRead) {
                self.pages.list_pages(ContentScope::All).await
            } else {
                Ok(Vec::new())
            }
        };
        let load_posts = async {
            if principal.can(Permission::PostsRead) {
                self.posts.list_posts(ContentScope::All).await
            } else {
                Ok(Vec::new())
            }
        };

        let (pages, posts) = tokio::try_join!(load_pages, load_posts)?;
        Ok(SeoReport::build(&pages, &posts, query))
    }

    pub async fn update_page(
        &self,
        actor: &str,
        id: Uuid,
        metadata: SeoMetadata,
    ) -> Result<PageRecord, AdminSeoError> {
        let metadata = metadata.normalized()?;
        let page = self
            .writer
            .update_page_seo(id, &metadata)
            .await
            .map_err(|err| AdminSeoError::from_repo(SeoItemType::Page, id, err))?;

        let entity_id = id.to_string();
        self.audit
            .record(actor, "page.seo", "page", Some(&entity_id), Some(&metadata))
            .await?;
        Ok(page)
    }

    pub async fn update_post(
        &self,
        actor: &str,
        id: Uuid,
        metadata: SeoMetadata,
    ) -> Result<PostRecord, AdminSeoError> {
        let metadata = metadata.normalized()?;
        let post = self
            .writer
            .update_post_seo(id, &metadata)
            .await
            .map_err(|err| AdminSeoError::from_repo(SeoItemType::Post, id, err))?;

        let entity_id = id.to_string();
        self.audit
            .record(actor, "post.seo", "post", Some(&entity_id), Some(&metadata))
            .await?;
        Ok(post)
    }
}
