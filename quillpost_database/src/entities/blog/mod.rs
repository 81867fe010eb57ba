/// Selects blogs together with the name of their (optional) category.
///
/// Columns line up with [`InternalBlogModel`]; the blog table is aliased as `blog`
/// and the category table as `category`, so callers can append
/// `WHERE`, `ORDER BY` and similar clauses.
macro_rules! select_blogs_with_category {
    () => {
        "SELECT \
            blog.id, blog.name, blog.slug, blog.description, blog.created_at, \
            blog.category_id, category.name AS category_name \
        FROM quillpost.blog AS blog \
        LEFT JOIN quillpost.category AS category \
            ON category.id = blog.category_id"
    };
}

mod model;
mod mutation;
mod query;

pub use model::Model as BlogModel;
pub(crate) use model::InternalModel as InternalBlogModel;
pub use mutation::*;
pub use query::*;
