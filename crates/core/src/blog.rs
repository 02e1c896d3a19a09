//! Blog post validation and slug generation.

use crate::error::CoreError;

/// Maximum length of a blog post title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a blog post body.
pub const MAX_CONTENT_LEN: usize = 100_000;

/// Maximum number of tags on one post.
pub const MAX_TAGS: usize = 10;

/// Generate a URL-safe slug from a post title.
///
/// Lowercases, maps every non-alphanumeric character to a hyphen, collapses
/// runs of hyphens, and trims hyphens from both ends.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = true;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Validate a post title (non-empty, <= 200 chars, must yield a slug).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if generate_slug(title).is_empty() {
        return Err(CoreError::Validation(
            "Title must contain at least one letter or digit".into(),
        ));
    }
    Ok(())
}

/// Validate post content length.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.len() > MAX_CONTENT_LEN {
        return Err(CoreError::Validation(format!(
            "Content must be at most {MAX_CONTENT_LEN} characters"
        )));
    }
    Ok(())
}

/// Normalize tags: trim, lowercase, drop blanks and duplicates.
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, CoreError> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let t = tag.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    if out.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "A maximum of {MAX_TAGS} tags is allowed"
        )));
    }
    Ok(out)
}
