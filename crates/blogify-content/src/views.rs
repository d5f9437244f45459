//! Derived views over a post collection.
//!
//! Everything here is a pure function of a slice of posts plus a query. No
//! function mutates or reorders its input; orderings return new vectors of
//! references.

use std::cmp::Reverse;
use std::collections::HashMap;

use blogify_types::{Category, Post};

/// Case-insensitive substring match of `query` against title, excerpt, and
/// tags. An empty query matches every post.
pub fn matches_text(post: &Post, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    post.title.to_lowercase().contains(&needle)
        || post.excerpt.to_lowercase().contains(&needle)
        || post.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// Posts matching a text search, in collection order.
pub fn search<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    posts.iter().filter(|p| matches_text(p, query)).collect()
}

/// Posts in `category`, in collection order.
pub fn by_category(posts: &[Post], category: Category) -> Vec<&Post> {
    posts.iter().filter(|p| p.category == category).collect()
}

/// Posts carrying `tag` (case-insensitive equality), in collection order.
pub fn by_tag<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.has_tag(tag.trim())).collect()
}

/// A combined filter: every set criterion must match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PostQuery {
    pub text: String,
    pub category: Option<Category>,
    pub tag: Option<String>,
}

impl PostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns `true` if no criterion is set.
    pub fn is_unfiltered(&self) -> bool {
        self.text.trim().is_empty() && self.category.is_none() && self.tag.is_none()
    }

    pub fn matches(&self, post: &Post) -> bool {
        matches_text(post, &self.text)
            && self.category.map_or(true, |c| post.category == c)
            && self.tag.as_deref().map_or(true, |t| post.has_tag(t.trim()))
    }

    /// Matching posts, in collection order.
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Posts split by their `featured` flag, each side in collection order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeaturedPartition<'a> {
    pub featured: Vec<&'a Post>,
    pub regular: Vec<&'a Post>,
}

pub fn partition_featured<'a, I>(posts: I) -> FeaturedPartition<'a>
where
    I: IntoIterator<Item = &'a Post>,
{
    let (featured, regular): (Vec<&Post>, Vec<&Post>) =
        posts.into_iter().partition(|p| p.featured);
    FeaturedPartition { featured, regular }
}

/// Up to `limit` posts, newest `published_at` first. Ties keep collection
/// order.
pub fn most_recent(posts: &[Post], limit: usize) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by_key(|p| Reverse(p.published_at));
    sorted.truncate(limit);
    sorted
}

/// Up to `limit` posts, highest view count first. Ties keep collection
/// order.
pub fn most_viewed(posts: &[Post], limit: usize) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by_key(|p| Reverse(p.views));
    sorted.truncate(limit);
    sorted
}

/// Post count for every category, in [`Category::ALL`] order, including
/// empty ones.
pub fn category_counts(posts: &[Post]) -> Vec<(Category, usize)> {
    Category::ALL
        .iter()
        .map(|&c| (c, posts.iter().filter(|p| p.category == c).count()))
        .collect()
}

/// Tags grouped case-insensitively with their post counts, most used first
/// and then alphabetically. The first spelling seen is the one reported.
pub fn tag_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut spelling: HashMap<String, String> = HashMap::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        let mut seen_in_post = Vec::new();
        for tag in &post.tags {
            let folded = tag.to_lowercase();
            if seen_in_post.contains(&folded) {
                continue;
            }
            spelling.entry(folded.clone()).or_insert_with(|| tag.clone());
            *counts.entry(folded.clone()).or_default() += 1;
            seen_in_post.push(folded);
        }
    }

    let mut grouped: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(folded, n)| (spelling.remove(&folded).unwrap_or(folded), n))
        .collect();
    grouped.sort_by(|(a, na), (b, nb)| {
        nb.cmp(na)
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
    });
    grouped
}
