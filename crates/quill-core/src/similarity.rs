//! Tag-overlap similarity ranker.
//!
//! Ranks candidate posts by how many tags they share with a source post,
//! most recent first among ties. The repository supplies the candidates
//! (published posts sharing at least one tag); the ranking itself is pure.

use crate::domain::Post;

/// Maximum number of related posts attached to a detail view.
pub const RELATED_LIMIT: usize = 4;

/// Rank `candidates` by descending shared-tag count with `source`, breaking
/// ties by descending publish time, truncated to `limit`.
///
/// The source post itself and candidates with no tag overlap are dropped.
/// No overlap anywhere is not an error: the result is simply empty.
pub fn rank_related(source: &Post, candidates: Vec<Post>, limit: usize) -> Vec<Post> {
    let source_tags = source.tag_ids();

    let mut scored: Vec<(usize, Post)> = candidates
        .into_iter()
        .filter(|candidate| candidate.id != source.id)
        .filter_map(|candidate| {
            let shared = candidate
                .tags
                .iter()
                .filter(|tag| source_tags.contains(&tag.id))
                .count();
            (shared > 0).then_some((shared, candidate))
        })
        .collect();

    scored.sort_by(|(shared_a, a), (shared_b, b)| {
        shared_b
            .cmp(shared_a)
            .then_with(|| b.publish.cmp(&a.publish))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(_, post)| post)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::domain::{PostStatus, Tag};

    fn tag(name: &str) -> Tag {
        Tag::new(name.to_string(), name.to_string())
    }

    fn post(title: &str, tags: Vec<Tag>, hours_ago: i64) -> Post {
        let mut post = Post::new(
            Uuid::new_v4(),
            title.to_string(),
            title.to_lowercase(),
            format!("{title} body"),
        );
        post.status = PostStatus::Published;
        post.publish = Utc::now() - Duration::hours(hours_ago);
        post.tags = tags;
        post
    }

    #[test]
    fn ranks_by_shared_tag_count_then_recency() {
        let a = tag("a");
        let b = tag("b");

        let x = post("X", vec![a.clone(), b.clone()], 3);
        let y = post("Y", vec![a.clone()], 2);
        let z = post("Z", vec![a.clone(), b.clone()], 1);

        let related = rank_related(&x, vec![y.clone(), z.clone()], RELATED_LIMIT);
        let titles: Vec<&str> = related.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Z", "Y"]);
    }

    #[test]
    fn recency_breaks_equal_overlap() {
        let a = tag("a");

        let source = post("source", vec![a.clone()], 5);
        let older = post("older", vec![a.clone()], 4);
        let newer = post("newer", vec![a.clone()], 1);

        let related = rank_related(&source, vec![older, newer], RELATED_LIMIT);
        assert_eq!(related[0].title, "newer");
        assert_eq!(related[1].title, "older");
    }

    #[test]
    fn never_includes_the_source_post() {
        let a = tag("a");
        let source = post("source", vec![a.clone()], 1);

        let related = rank_related(&source, vec![source.clone()], RELATED_LIMIT);
        assert!(related.is_empty());
    }

    #[test]
    fn drops_candidates_without_overlap() {
        let source = post("source", vec![tag("a")], 1);
        let unrelated = post("unrelated", vec![tag("b")], 2);

        assert!(rank_related(&source, vec![unrelated], RELATED_LIMIT).is_empty());
    }

    #[test]
    fn truncates_to_the_limit() {
        let a = tag("a");
        let source = post("source", vec![a.clone()], 10);
        let candidates: Vec<Post> = (0..6)
            .map(|i| post(&format!("c{i}"), vec![a.clone()], i))
            .collect();

        let related = rank_related(&source, candidates, RELATED_LIMIT);
        assert_eq!(related.len(), RELATED_LIMIT);
    }

    #[test]
    fn no_candidates_is_not_an_error() {
        let source = post("source", vec![tag("a")], 1);
        assert!(rank_related(&source, Vec::new(), RELATED_LIMIT).is_empty());
    }
}
