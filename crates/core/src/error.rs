#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `key` describes how the entity was looked up, e.g. `slug=ias-smo`.
    #[error("Entity not found: {entity} with {key}")]
    NotFound { entity: &'static str, key: String },

    /// A request parameter was present but malformed.
    #[error("Parameter '{0}' is not valid")]
    InvalidParameter(&'static str),

    /// An operation was called without a parameter it cannot work without.
    /// Raised for call-site bugs, not for user input.
    #[error("None of the parameters specified ({0})")]
    MissingParameter(&'static str),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_includes_entity_and_key() {
        let err = CoreError::not_found("Thesaurus", "slug=ias-smo");
        assert_eq!(
            err.to_string(),
            "Entity not found: Thesaurus with slug=ias-smo"
        );
    }

    #[test]
    fn invalid_parameter_message_names_the_parameter() {
        let err = CoreError::InvalidParameter("actual_to");
        assert_eq!(err.to_string(), "Parameter 'actual_to' is not valid");
    }

    #[test]
    fn missing_parameter_message() {
        let err = CoreError::MissingParameter("code and value");
        assert_eq!(
            err.to_string(),
            "None of the parameters specified (code and value)"
        );
    }
}
