//! Typed post input and its validation.
//!
//! A [`PostDraft`] is the full field set submitted to create a post; a
//! [`PostPatch`] is the subset submitted to update one. Both validate into
//! either a usable value or a [`ValidationErrors`] list naming every
//! offending field.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use blogify_types::{Category, Post, PostId};

/// A required text field of a post.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Content,
    Excerpt,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Excerpt => "excerpt",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn required(field: Field) -> Self {
        Self {
            field,
            message: format!("{field} is required"),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every field error found in one draft or patch, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns `true` if `field` is among the failures.
    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn require(&mut self, field: Field, value: &str) {
        if value.trim().is_empty() {
            self.0.push(FieldError::required(field));
        }
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Split comma-separated tag input into tags, trimming each and dropping
/// empty entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn normalize_image(image: Option<String>) -> Option<String> {
    image
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// The unsaved field set submitted to create a post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub author_email: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub featured: bool,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        excerpt: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.author = name.into();
        self.author_email = email.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Check the required text fields, collecting every failure.
    ///
    /// On success, tags are trimmed (empty ones dropped) and a blank image
    /// URL becomes `None`.
    pub fn validate(self) -> Result<ValidDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.require(Field::Title, &self.title);
        errors.require(Field::Content, &self.content);
        errors.require(Field::Excerpt, &self.excerpt);
        errors.into_result()?;

        Ok(ValidDraft(PostDraft {
            tags: normalize_tags(self.tags),
            image: normalize_image(self.image),
            ..self
        }))
    }
}

/// A draft that passed [`PostDraft::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidDraft(PostDraft);

impl ValidDraft {
    pub fn draft(&self) -> &PostDraft {
        &self.0
    }

    /// Turn the draft into a fresh post with zeroed counters.
    pub fn into_post(self, id: PostId, published_at: DateTime<Utc>) -> Post {
        let d = self.0;
        Post {
            id,
            title: d.title,
            content: d.content,
            excerpt: d.excerpt,
            author: d.author,
            author_email: d.author_email,
            category: d.category,
            tags: d.tags,
            image: d.image,
            published_at,
            updated_at: None,
            likes: 0,
            views: 0,
            featured: d.featured,
        }
    }
}

/// The fields an update may change. `None` leaves a field untouched.
///
/// Identity, authorship, `published_at` and the counters are not patchable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    /// `Some(None)` clears the image.
    pub image: Option<Option<String>>,
    pub featured: Option<bool>,
}

impl PostPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn image(mut self, url: Option<String>) -> Self {
        self.image = Some(url);
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Returns `true` if the patch changes no field.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A patch may not blank out a required text field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(title) = &self.title {
            errors.require(Field::Title, title);
        }
        if let Some(content) = &self.content {
            errors.require(Field::Content, content);
        }
        if let Some(excerpt) = &self.excerpt {
            errors.require(Field::Excerpt, excerpt);
        }
        errors.into_result()
    }

    /// Merge the patch into `post` and stamp `updated_at`, even when no
    /// value actually changes.
    pub fn apply(self, post: &mut Post, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(tags) = self.tags {
            post.tags = normalize_tags(tags);
        }
        if let Some(image) = self.image {
            post.image = normalize_image(image);
        }
        if let Some(featured) = self.featured {
            post.featured = featured;
        }
        post.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> PostDraft {
        PostDraft::new("Title", "Excerpt", "# Body")
            .with_author("Jane", "jane@example.com")
            .with_category(Category::Design)
            .with_tags([" UI ", "", "Design"])
            .with_image("   ")
            .featured(true)
    }

    #[test]
    fn valid_draft_normalizes_optional_fields() {
        let valid = full_draft().validate().unwrap();
        assert_eq!(valid.draft().tags, vec!["UI", "Design"]);
        assert_eq!(valid.draft().image, None);
        assert!(valid.draft().featured);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = PostDraft::new("", " ", "").validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(Field::Title));
        assert!(errors.contains(Field::Content));
        assert!(errors.contains(Field::Excerpt));
        assert_eq!(
            errors.to_string(),
            "title is required; content is required; excerpt is required"
        );
    }

    #[test]
    fn single_missing_field() {
        let errors = PostDraft::new("T", "", "C").validate().unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::required(Field::Excerpt)]);
    }

    #[test]
    fn into_post_zeroes_counters() {
        let now = Utc::now();
        let post = full_draft()
            .validate()
            .unwrap()
            .into_post(PostId::from("x"), now);
        assert_eq!(post.likes, 0);
        assert_eq!(post.views, 0);
        assert_eq!(post.published_at, now);
        assert!(post.updated_at.is_none());
        assert_eq!(post.author_email, "jane@example.com");
    }

    #[test]
    fn parse_tags_trims_and_drops_empties() {
        assert_eq!(
            parse_tags("React, JavaScript ,, Web Development,"),
            vec!["React", "JavaScript", "Web Development"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn patch_rejects_blank_required_field() {
        let errors = PostPatch::new().title("  ").validate().unwrap_err();
        assert!(errors.contains(Field::Title));
        assert!(PostPatch::new().category(Category::Tech).validate().is_ok());
    }

    #[test]
    fn patch_apply_touches_only_given_fields() {
        let now = Utc::now();
        let mut post = full_draft()
            .validate()
            .unwrap()
            .into_post(PostId::from("x"), now);
        let before = post.clone();

        let later = now + chrono::Duration::seconds(5);
        PostPatch::new().title("New").apply(&mut post, later);

        assert_eq!(post.title, "New");
        assert_eq!(post.updated_at, Some(later));
        assert_eq!(post.content, before.content);
        assert_eq!(post.tags, before.tags);
        assert_eq!(post.published_at, before.published_at);
    }

    #[test]
    fn empty_patch_still_stamps_updated_at() {
        let now = Utc::now();
        let mut post = full_draft()
            .validate()
            .unwrap()
            .into_post(PostId::from("x"), now);
        let patch = PostPatch::new();
        assert!(patch.is_empty());
        patch.apply(&mut post, now);
        assert_eq!(post.updated_at, Some(now));
    }

    #[test]
    fn patch_can_clear_image() {
        let now = Utc::now();
        let mut post = PostDraft::new("T", "E", "C")
            .with_image("https://img")
            .validate()
            .unwrap()
            .into_post(PostId::from("x"), now);
        assert_eq!(post.image.as_deref(), Some("https://img"));
        PostPatch::new().image(None).apply(&mut post, now);
        assert_eq!(post.image, None);
    }
}
