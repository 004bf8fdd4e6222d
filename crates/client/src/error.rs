//! Error types for the backend client.

use thiserror::Error;

/// Errors that can occur when talking to the Orderly backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, when readable.
        message: String,
    },

    /// Response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The requested order was not found.
    #[error("order not found: {0}")]
    OrderNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: 422,
            message: "quantity exceeds available stock".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error: 422 - quantity exceeds available stock"
        );
    }

    #[test]
    fn test_order_not_found_display() {
        let err = ClientError::OrderNotFound("gid://shopify/Order/1".to_string());
        assert_eq!(err.to_string(), "order not found: gid://shopify/Order/1");
    }
}
