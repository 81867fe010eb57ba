use std::str::FromStr;

use serde::{Deserialize, Serialize};


macro_rules! impl_transparent_display_for_newtype_struct {
    ($struct_type:ty) => {
        impl std::fmt::Display for $struct_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}



/// Identifier of a category. Assigned by the database (serial).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub(crate) i32);

impl CategoryId {
    #[inline]
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FromStr for CategoryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(i32::from_str(s)?))
    }
}

impl_transparent_display_for_newtype_struct!(CategoryId);



/// Identifier of a blog. Randomly generated (UUIDv4) when the blog is created.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(pub(crate) uuid::Uuid);

impl BlogId {
    #[inline]
    pub fn new(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    #[inline]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    #[inline]
    pub fn into_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl FromStr for BlogId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(uuid::Uuid::from_str(s)?))
    }
}

impl_transparent_display_for_newtype_struct!(BlogId);



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn category_id_serializes_as_plain_integer() {
        let category_id = CategoryId::new(42);

        assert_eq!(serde_json::to_string(&category_id).unwrap(), "42");
        assert_eq!(
            serde_json::from_str::<CategoryId>("7").unwrap(),
            CategoryId::new(7)
        );
    }

    #[test]
    fn generated_blog_ids_are_random_v4_uuids() {
        let first = BlogId::generate();
        let second = BlogId::generate();

        assert_ne!(first, second);
        assert_eq!(first.into_uuid().get_version_num(), 4);

        let round_tripped = BlogId::from_str(&first.to_string()).unwrap();
        assert_eq!(round_tripped, first);
    }
}
