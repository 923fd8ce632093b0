use crate::locale::MessageKey;
use crate::types::DbId;

/// Local failures raised before any request leaves the process.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No items to submit: add at least one product with a positive quantity")]
    EmptyItemList,

    #[error("Select a product")]
    MissingProduct,

    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    #[error("Product {product_id} has no dimensions")]
    MissingDimensions { product_id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Preference storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Translation key for the user-facing toast.
    pub fn message_key(&self) -> MessageKey {
        match self {
            CoreError::EmptyItemList => MessageKey::EmptyItemList,
            CoreError::MissingProduct => MessageKey::SelectProduct,
            CoreError::NonPositiveQuantity(_) => MessageKey::QuantityMustBePositive,
            CoreError::MissingDimensions { .. } => MessageKey::MissingDimensions,
            CoreError::Validation(_) => MessageKey::InvalidInput,
            CoreError::Storage(_) => MessageKey::GenericError,
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_errors_map_to_message_keys() {
        assert_eq!(
            CoreError::EmptyItemList.message_key(),
            MessageKey::EmptyItemList
        );
        assert_eq!(
            CoreError::NonPositiveQuantity(0).message_key(),
            MessageKey::QuantityMustBePositive
        );
        assert_eq!(
            CoreError::MissingDimensions { product_id: 3 }.message_key(),
            MessageKey::MissingDimensions
        );
    }

    #[test]
    fn display_includes_context() {
        let err = CoreError::MissingDimensions { product_id: 42 };
        assert_eq!(err.to_string(), "Product 42 has no dimensions");
    }
}
