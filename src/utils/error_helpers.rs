//! Helper functions for standardizing reqwest error conversions.
//! Each failure stage maps onto its own ApiError variant.

use crate::error::ApiError;

/// Convert a send failure to ApiError with endpoint context
pub fn convert_request_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert a body read failure to ApiError with endpoint context
pub fn convert_read_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    ApiError::ReadBody {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert a request body serialization failure
pub fn convert_marshal_error(error: serde_json::Error, endpoint: &str) -> ApiError {
    ApiError::Marshal {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert a response decoding failure; `what` names the payload
pub fn convert_json_error(error: serde_json::Error, what: &str, endpoint: &str) -> ApiError {
    ApiError::Parse {
        what: what.to_string(),
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Helper macro for standardizing map_err patterns on send
#[macro_export]
macro_rules! map_api_error {
    ($result:expr, $endpoint:expr) => {
        $result.map_err(|e| $crate::utils::error_helpers::convert_request_error(e, $endpoint))
    };
}

/// Helper macro for JSON parsing errors
#[macro_export]
macro_rules! map_json_error {
    ($result:expr, $what:expr, $endpoint:expr) => {
        $result.map_err(|e| $crate::utils::error_helpers::convert_json_error(e, $what, $endpoint))
    };
}
