//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, JoinType, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use quill_core::domain::{Comment, Post, Tag};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, TagRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag;
use super::entity::tag::{self, Entity as TagEntity};

/// The one place the reader-visibility predicate is written down. Every
/// anonymous read path goes through this scope.
fn published() -> Select<PostEntity> {
    PostEntity::find().filter(post::Column::Status.eq(post::PostStatus::Published))
}

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Attach the tag association to a batch of post models.
    async fn with_tags(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        let tags = models
            .load_many_to_many(TagEntity, post_tag::Entity, &self.db)
            .await
            .map_err(query_err)?;

        Ok(models
            .into_iter()
            .zip(tags)
            .map(|(model, tag_models)| {
                let mut post: Post = model.into();
                post.tags = tag_models.into_iter().map(Tag::from).collect();
                post
            })
            .collect())
    }

    async fn one_with_tags(&self, model: Option<post::Model>) -> Result<Option<Post>, RepoError> {
        let Some(model) = model else {
            return Ok(None);
        };

        let tag_models = model
            .find_related(TagEntity)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let mut post: Post = model.into();
        post.tags = tag_models.into_iter().map(Tag::from).collect();
        Ok(Some(post))
    }

    /// Published scope narrowed to one tag slug via the junction table.
    fn published_with_tag(slug: &str) -> Select<PostEntity> {
        published()
            .join(JoinType::InnerJoin, post_tag::Relation::Post.def().rev())
            .join(JoinType::InnerJoin, post_tag::Relation::Tag.def())
            .filter(tag::Column::Slug.eq(slug))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let model = published()
            .filter(post::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        self.one_with_tags(model).await
    }

    async fn find_published_by_date_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        // An impossible date cannot name a post.
        let Some(day_start): Option<DateTime<Utc>> =
            Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
        else {
            return Ok(None);
        };
        let next_day = day_start + Duration::days(1);

        let model = published()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Publish.gte(day_start))
            .filter(post::Column::Publish.lt(next_day))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        self.one_with_tags(model).await
    }

    async fn count_published(&self, tag_slug: Option<&str>) -> Result<u64, RepoError> {
        let query = match tag_slug {
            Some(slug) => Self::published_with_tag(slug),
            None => published(),
        };

        query.count(&self.db).await.map_err(query_err)
    }

    async fn list_published(
        &self,
        tag_slug: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let query = match tag_slug {
            Some(slug) => Self::published_with_tag(slug),
            None => published(),
        };

        let models = query
            .order_by_desc(post::Column::Publish)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        self.with_tags(models).await
    }

    async fn find_sharing_tags(
        &self,
        tag_ids: &[Uuid],
        exclude_post: Uuid,
    ) -> Result<Vec<Post>, RepoError> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = published()
            .join(JoinType::InnerJoin, post_tag::Relation::Post.def().rev())
            .filter(post_tag::Column::TagId.is_in(tag_ids.iter().copied()))
            .filter(post::Column::Id.ne(exclude_post))
            .distinct()
            .all(&self.db)
            .await
            .map_err(query_err)?;

        self.with_tags(models).await
    }

    async fn search_published(&self, query: &str) -> Result<Vec<Post>, RepoError> {
        // Native Postgres full-text matching over title and body; ordering is
        // the store's own rank, no scoring of ours on top.
        let matches = Expr::cust_with_values(
            "to_tsvector('english', title || ' ' || body) @@ plainto_tsquery('english', $1)",
            [query.to_owned()],
        );
        let rank = Expr::cust_with_values(
            "ts_rank(to_tsvector('english', title || ' ' || body), plainto_tsquery('english', $1))",
            [query.to_owned()],
        );

        let models = published()
            .filter(matches)
            .order_by_desc(rank)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        self.with_tags(models).await
    }
}

/// PostgreSQL comment repository.
pub struct PostgresCommentRepository {
    db: DbConn,
}

impl PostgresCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_active(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let models = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let active_model: comment::ActiveModel = comment.into();
        let model = active_model.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Comment already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(model.into())
    }
}

/// PostgreSQL tag repository.
pub struct PostgresTagRepository {
    db: DbConn,
}

impl PostgresTagRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let model = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(model.map(Into::into))
    }
}
