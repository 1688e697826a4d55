//! Thin per-table DAOs for the public marketing content. Each one leans on
//! [`DaoBase`] for CRUD and adds only the lookups its routes need.

use sea_orm::{ColumnTrait, DatabaseConnection, Order, QueryFilter, Set};

use super::{DaoBase, DaoResult};
use crate::db::entities::{
    certification, contact_message, job_posting, news_article, page, project, review, site_setting,
    team_member,
};

macro_rules! content_dao {
    ($name:ident, $entity:ty) => {
        #[derive(Clone)]
        pub struct $name {
            db: DatabaseConnection,
        }

        impl DaoBase for $name {
            type Entity = $entity;

            fn new(db: &DatabaseConnection) -> Self {
                Self { db: db.clone() }
            }

            fn db(&self) -> &DatabaseConnection {
                &self.db
            }
        }
    };
}

content_dao!(PageDao, page::Entity);
content_dao!(NewsArticleDao, news_article::Entity);
content_dao!(ProjectDao, project::Entity);
content_dao!(TeamMemberDao, team_member::Entity);
content_dao!(ReviewDao, review::Entity);
content_dao!(CertificationDao, certification::Entity);
content_dao!(JobPostingDao, job_posting::Entity);
content_dao!(SiteSettingDao, site_setting::Entity);
content_dao!(ContactMessageDao, contact_message::Entity);

impl PageDao {
    pub async fn list_published(&self) -> DaoResult<Vec<page::Model>> {
        self.find_all(None, |query| {
            query.filter(page::Column::IsPublished.eq(true))
        })
        .await
    }

    pub async fn find_published_by_slug(&self, slug: &str) -> DaoResult<Option<page::Model>> {
        let slug = slug.to_string();
        self.find(1, 1, None, move |query| {
            query
                .filter(page::Column::Slug.eq(slug))
                .filter(page::Column::IsPublished.eq(true))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }
}

impl NewsArticleDao {
    pub async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> DaoResult<Option<news_article::Model>> {
        let slug = slug.to_string();
        self.find(1, 1, None, move |query| {
            query
                .filter(news_article::Column::Slug.eq(slug))
                .filter(news_article::Column::IsPublished.eq(true))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    pub async fn list_published(&self) -> DaoResult<Vec<news_article::Model>> {
        self.find_all(
            Some((news_article::Column::PublishedAt, Order::Desc)),
            |query| query.filter(news_article::Column::IsPublished.eq(true)),
        )
        .await
    }
}

impl ProjectDao {
    pub async fn find_published_by_slug(&self, slug: &str) -> DaoResult<Option<project::Model>> {
        let slug = slug.to_string();
        self.find(1, 1, None, move |query| {
            query
                .filter(project::Column::Slug.eq(slug))
                .filter(project::Column::IsPublished.eq(true))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    pub async fn list_published(&self) -> DaoResult<Vec<project::Model>> {
        self.find_all(Some((project::Column::Year, Order::Desc)), |query| {
            query.filter(project::Column::IsPublished.eq(true))
        })
        .await
    }
}

impl TeamMemberDao {
    pub async fn list_active(&self) -> DaoResult<Vec<team_member::Model>> {
        self.find_all(
            Some((team_member::Column::SortOrder, Order::Asc)),
            |query| query.filter(team_member::Column::IsActive.eq(true)),
        )
        .await
    }
}

impl ReviewDao {
    pub async fn list_published(&self) -> DaoResult<Vec<review::Model>> {
        self.find_all(None, |query| {
            query.filter(review::Column::IsPublished.eq(true))
        })
        .await
    }
}

impl CertificationDao {
    pub async fn list_all(&self) -> DaoResult<Vec<certification::Model>> {
        self.find_all(
            Some((certification::Column::SortOrder, Order::Asc)),
            |query| query,
        )
        .await
    }
}

impl JobPostingDao {
    pub async fn find_open_by_slug(&self, slug: &str) -> DaoResult<Option<job_posting::Model>> {
        let slug = slug.to_string();
        self.find(1, 1, None, move |query| {
            query
                .filter(job_posting::Column::Slug.eq(slug))
                .filter(job_posting::Column::IsOpen.eq(true))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    pub async fn list_open(&self) -> DaoResult<Vec<job_posting::Model>> {
        self.find_all(None, |query| {
            query.filter(job_posting::Column::IsOpen.eq(true))
        })
        .await
    }
}

impl SiteSettingDao {
    pub async fn list_all(&self) -> DaoResult<Vec<site_setting::Model>> {
        self.find_all(Some((site_setting::Column::Key, Order::Asc)), |query| query)
            .await
    }

    pub async fn find_by_key(&self, key: &str) -> DaoResult<Option<site_setting::Model>> {
        let key = key.to_string();
        self.find(1, 1, None, move |query| {
            query.filter(site_setting::Column::Key.eq(key))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    /// Insert-or-update by key. Settings are few; the read-then-write race is
    /// acceptable for an admin-only surface.
    pub async fn upsert(
        &self,
        key: &str,
        value: serde_json::Value,
    ) -> DaoResult<site_setting::Model> {
        match self.find_by_key(key).await? {
            Some(existing) => {
                self.update(existing.id, move |active| {
                    active.value = Set(value);
                })
                .await
            }
            None => {
                let model = site_setting::ActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value),
                    ..Default::default()
                };
                self.create(model).await
            }
        }
    }
}

impl ContactMessageDao {
    pub async fn create_message(
        &self,
        name: &str,
        email: &str,
        phone: Option<String>,
        message: &str,
    ) -> DaoResult<contact_message::Model> {
        let model = contact_message::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            phone: Set(phone),
            message: Set(message.to_string()),
            handled: Set(false),
            ..Default::default()
        };
        self.create(model).await
    }
}
