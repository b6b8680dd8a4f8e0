//! Success/error envelope for handing results to presentation layers.

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, ValuationError};

/// Error body of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&OrderError> for ApiError {
    fn from(err: &OrderError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// `{success: true, data}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Export to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<T, E> From<Result<T, E>> for ApiResponse<T>
where
    E: Into<ApiError>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::err(err.into()),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self::from(&err)
    }
}

impl From<&ValuationError> for ApiError {
    fn from(err: &ValuationError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<ValuationError> for ApiError {
    fn from(err: ValuationError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::ok(42);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 42}));
    }

    #[test]
    fn test_error_envelope() {
        let response: ApiResponse<()> = Err::<(), _>(OrderError::InvalidQuantity).into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": {
                    "code": "INVALID_QUANTITY",
                    "message": "Quantity must be a positive number"
                }
            })
        );
    }

    #[test]
    fn test_valuation_error_envelope() {
        let response: ApiResponse<()> = Err::<(), _>(ValuationError::Overflow).into();
        let error = response.error.unwrap();

        assert!(!response.success);
        assert_eq!(error.code, "VALUATION_OVERFLOW");
        assert_eq!(
            error.message,
            "Arithmetic overflow: result is outside the decimal range"
        );
    }
}
