use quillpost_core::slug::{is_reserved_slug, slug_candidate, slugify_blog_name};
use quillpost_database::{DatabaseTransaction, QueryError, QueryResult};


/// Finds a free slug for a new blog with the given name
/// (`hello-world`, then `hello-world-2`, `hello-world-3`, ...).
pub(super) async fn generate_unique_blog_slug(
    transaction: &mut dyn DatabaseTransaction,
    blog_name: &str,
) -> QueryResult<String> {
    let base_slug = slugify_blog_name(blog_name);

    for attempt in 1..=u32::MAX {
        let candidate_slug = slug_candidate(&base_slug, attempt);

        if is_reserved_slug(&candidate_slug) {
            continue;
        }

        if !transaction.blog_exists_by_slug(&candidate_slug).await? {
            return Ok(candidate_slug);
        }
    }

    Err(QueryError::database_inconsistency(format!(
        "ran out of slug candidates for base slug \"{}\"",
        base_slug
    )))
}
