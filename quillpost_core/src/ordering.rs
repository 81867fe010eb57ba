//! The allow-list of fields blogs can be ordered by.
//!
//! Field names arrive as free-form strings from the `order_by` query parameter,
//! so they are parsed into a closed set of variants here and never reach the
//! database as raw input.

use std::str::FromStr;

use thiserror::Error;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlogOrderingField {
    Id,
    Name,
    Slug,
    Description,
}

impl BlogOrderingField {
    pub const fn name(&self) -> &'static str {
        match self {
            BlogOrderingField::Id => "id",
            BlogOrderingField::Name => "name",
            BlogOrderingField::Slug => "slug",
            BlogOrderingField::Description => "description",
        }
    }

    pub fn from_name(field_name: &str) -> Option<Self> {
        match field_name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "slug" => Some(Self::Slug),
            "description" => Some(Self::Description),
            _ => None,
        }
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OrderingDirection {
    Ascending,
    Descending,
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BlogOrdering {
    pub field: BlogOrderingField,
    pub direction: OrderingDirection,
}

impl BlogOrdering {
    pub const fn ascending(field: BlogOrderingField) -> Self {
        Self {
            field,
            direction: OrderingDirection::Ascending,
        }
    }
}

impl Default for BlogOrdering {
    fn default() -> Self {
        Self::ascending(BlogOrderingField::Name)
    }
}


#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("\"{field}\" is not a field blogs can be ordered by")]
pub struct InvalidBlogOrderingError {
    pub field: String,
}

impl FromStr for BlogOrdering {
    type Err = InvalidBlogOrderingError;

    /// Parses `field` (ascending) or `-field` (descending).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let (direction, field_name) = match trimmed.strip_prefix('-') {
            Some(field_name) => (OrderingDirection::Descending, field_name),
            None => (OrderingDirection::Ascending, trimmed),
        };

        let field =
            BlogOrderingField::from_name(field_name).ok_or_else(|| InvalidBlogOrderingError {
                field: s.to_string(),
            })?;

        Ok(Self { field, direction })
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_allowed_fields() {
        assert_eq!(
            "name".parse::<BlogOrdering>().unwrap(),
            BlogOrdering::ascending(BlogOrderingField::Name)
        );

        assert_eq!(
            "-description".parse::<BlogOrdering>().unwrap(),
            BlogOrdering {
                field: BlogOrderingField::Description,
                direction: OrderingDirection::Descending,
            }
        );

        assert_eq!(
            "slug".parse::<BlogOrdering>().unwrap().field,
            BlogOrderingField::Slug
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let error = "category_id; DROP TABLE blog"
            .parse::<BlogOrdering>()
            .unwrap_err();

        assert_eq!(error.field, "category_id; DROP TABLE blog");

        assert!("".parse::<BlogOrdering>().is_err());
        assert!("--name".parse::<BlogOrdering>().is_err());
        assert!("Name".parse::<BlogOrdering>().is_err());
    }

    #[test]
    fn defaults_to_ascending_name() {
        assert_eq!(
            BlogOrdering::default(),
            BlogOrdering::ascending(BlogOrderingField::Name)
        );
    }
}
