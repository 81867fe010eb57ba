mod endpoints;
use actix_web::web;
pub use endpoints::*;
mod model_impls;
mod slugs;


/// Routes under `/blogs`.
///
/// The fixed routes (`/paginated`, `/search` and `/order`) must be registered
/// before `/{slug}`, otherwise they would be treated as slugs.
#[rustfmt::skip]
pub fn blogs_router() -> actix_web::Scope {
    web::scope("/blogs")
        .service(get_all_blogs)
        .service(create_blog)
        .service(get_blog_page)
        .service(search_blogs)
        .service(get_ordered_blogs)
        .service(get_specific_blog)
        .service(update_specific_blog)
        .service(delete_specific_blog)
}

#[rustfmt::skip]
pub fn blog_router() -> actix_web::Scope {
    web::scope("/blog")
        .service(set_blog_category)
}
