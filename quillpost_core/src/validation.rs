//! Checks applied to incoming payloads before anything touches the database.

use thiserror::Error;

/// Maximum length of category and blog names, in characters.
pub const MAXIMUM_NAME_LENGTH: usize = 100;


#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    #[error("name must not be blank")]
    Blank,

    #[error("name must be at most {maximum_length} characters long (got {actual_length})")]
    TooLong {
        maximum_length: usize,
        actual_length: usize,
    },
}


/// Ensures a category or blog name is non-blank and fits
/// into [`MAXIMUM_NAME_LENGTH`] characters.
pub fn validate_name(name: &str) -> Result<(), NameValidationError> {
    if name.trim().is_empty() {
        return Err(NameValidationError::Blank);
    }

    let actual_length = name.chars().count();
    if actual_length > MAXIMUM_NAME_LENGTH {
        return Err(NameValidationError::TooLong {
            maximum_length: MAXIMUM_NAME_LENGTH,
            actual_length,
        });
    }

    Ok(())
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_regular_names() {
        assert_eq!(validate_name("Travel"), Ok(()));
        assert_eq!(validate_name(&"č".repeat(100)), Ok(()));
    }

    #[test]
    fn rejects_blank_and_overlong_names() {
        assert_eq!(validate_name(""), Err(NameValidationError::Blank));
        assert_eq!(validate_name("   \t"), Err(NameValidationError::Blank));

        assert_eq!(
            validate_name(&"a".repeat(101)),
            Err(NameValidationError::TooLong {
                maximum_length: 100,
                actual_length: 101
            })
        );
    }
}
