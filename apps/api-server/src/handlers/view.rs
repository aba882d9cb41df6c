//! Mapping from domain objects to the view DTOs handlers render.

use quill_core::domain::{Comment, Post, Tag};
use quill_core::pagination::PageWindow;
use quill_core::validation::FormSchema;
use quill_shared::dto::{CommentView, FormView, PageMeta, PostSummary, PostView, TagView};

pub fn tag_view(tag: &Tag) -> TagView {
    TagView {
        name: tag.name.clone(),
        slug: tag.slug.clone(),
    }
}

pub fn post_summary(post: &Post, site_base_url: &str) -> PostSummary {
    PostSummary {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        publish: post.publish,
        url: format!("{}{}", site_base_url, post.canonical_path()),
        tags: post.tags.iter().map(tag_view).collect(),
    }
}

pub fn post_view(post: &Post, site_base_url: &str) -> PostView {
    PostView {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        body: post.body.clone(),
        publish: post.publish,
        url: format!("{}{}", site_base_url, post.canonical_path()),
        tags: post.tags.iter().map(tag_view).collect(),
    }
}

pub fn comment_view(comment: &Comment) -> CommentView {
    CommentView {
        id: comment.id,
        name: comment.name.clone(),
        body: comment.body.clone(),
        created_at: comment.created_at,
    }
}

pub fn form_view(schema: &FormSchema) -> FormView {
    FormView {
        fields: schema.field_names(),
    }
}

pub fn page_meta(window: &PageWindow) -> PageMeta {
    PageMeta {
        number: window.number,
        total_pages: window.total_pages,
        total_items: window.total_items,
        page_size: window.page_size,
        has_previous: window.has_previous,
        has_next: window.has_next,
    }
}
