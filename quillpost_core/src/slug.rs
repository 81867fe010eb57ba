//! Slug derivation for blogs.
//!
//! A blog's slug is computed exactly once, when the blog is created, and is never
//! re-derived afterwards (renaming a blog keeps its slug). The base slug comes from
//! [`slugify_blog_name`]; if it is already taken, the caller walks through
//! [`slug_candidate`] with increasing attempt numbers (`base`, `base-2`, `base-3`, ...)
//! until it finds a free one.

/// Maximum length of a blog slug, in bytes (slugs are always ASCII).
pub const MAXIMUM_SLUG_LENGTH: usize = 50;

/// Used when a name contains nothing that survives slugification.
const FALLBACK_SLUG: &str = "blog";

/// Slugs that collide with fixed routes under `/blogs`.
/// A blog with one of these slugs could never be fetched by slug.
const RESERVED_SLUGS: [&str; 3] = ["paginated", "search", "order"];


/// Derives the base slug for a blog name: transliterated to ASCII, lowercased,
/// with every run of other characters collapsed into a single `-`,
/// and truncated to [`MAXIMUM_SLUG_LENGTH`].
pub fn slugify_blog_name(name: &str) -> String {
    let slugified = slug::slugify(name);

    let truncated = truncate_slug(&slugified, MAXIMUM_SLUG_LENGTH);
    if truncated.is_empty() {
        return FALLBACK_SLUG.to_string();
    }

    truncated.to_string()
}

/// Returns the slug to try on the given attempt (starting at 1).
///
/// The first attempt is the base slug itself, every following one appends
/// `-{attempt}`, shortening the base when needed so that the result still fits
/// into [`MAXIMUM_SLUG_LENGTH`].
pub fn slug_candidate(base_slug: &str, attempt: u32) -> String {
    if attempt <= 1 {
        return truncate_slug(base_slug, MAXIMUM_SLUG_LENGTH).to_string();
    }

    let suffix = format!("-{}", attempt);
    let available_base_length = MAXIMUM_SLUG_LENGTH.saturating_sub(suffix.len());

    let shortened_base = truncate_slug(base_slug, available_base_length);
    if shortened_base.is_empty() {
        return format!("{}{}", FALLBACK_SLUG, suffix);
    }

    format!("{}{}", shortened_base, suffix)
}

/// Whether the slug is reserved by a fixed route and must never be given out.
pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}


fn truncate_slug(slug: &str, maximum_length: usize) -> &str {
    let cut_index = slug
        .char_indices()
        .map(|(index, character)| index + character.len_utf8())
        .take_while(|end_index| *end_index <= maximum_length)
        .last()
        .unwrap_or(0);

    slug[..cut_index].trim_end_matches('-')
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slugifies_simple_names() {
        assert_eq!(slugify_blog_name("Hello World"), "hello-world");
        assert_eq!(slugify_blog_name("  Rust -- in   Production! "), "rust-in-production");
        assert_eq!(slugify_blog_name("Čez drn in strn"), "cez-drn-in-strn");
    }

    #[test]
    fn falls_back_when_nothing_survives() {
        assert_eq!(slugify_blog_name("!!!"), "blog");
        assert_eq!(slugify_blog_name(""), "blog");
    }

    #[test]
    fn truncates_long_names_without_trailing_separator() {
        let name = format!("{} {}", "a".repeat(49), "bcd");
        let slug = slugify_blog_name(&name);

        assert_eq!(slug, "a".repeat(49));
        assert!(slug.len() <= MAXIMUM_SLUG_LENGTH);
    }

    #[test]
    fn builds_numbered_candidates() {
        assert_eq!(slug_candidate("hello-world", 1), "hello-world");
        assert_eq!(slug_candidate("hello-world", 2), "hello-world-2");
        assert_eq!(slug_candidate("hello-world", 13), "hello-world-13");

        let long_base = "x".repeat(MAXIMUM_SLUG_LENGTH);
        let candidate = slug_candidate(&long_base, 2);

        assert_eq!(candidate.len(), MAXIMUM_SLUG_LENGTH);
        assert!(candidate.ends_with("x-2"));
    }

    #[test]
    fn recognizes_reserved_slugs() {
        assert!(is_reserved_slug("paginated"));
        assert!(is_reserved_slug("search"));
        assert!(is_reserved_slug("order"));
        assert!(!is_reserved_slug("ordering"));
    }
}
