//! Response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// `{ "success": bool, "data"?: T, "errors"?: [string] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,

    /// Payload; omitted when there is nothing to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Failure messages; omitted on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(data: T) -> Self {
        Self::maybe(Some(data))
    }

    /// Successful response whose payload may be absent.
    pub fn maybe(data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            errors: None,
        }
    }

    /// Failed response.
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors: Some(errors),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with no payload.
    pub fn empty() -> Self {
        Self::maybe(None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let value = serde_json::to_value(ApiResponse::success(5)).unwrap();
        assert_eq!(value, json!({"success": true, "data": 5}));
    }

    #[test]
    fn test_absent_data_is_omitted() {
        let value = serde_json::to_value(ApiResponse::<u64>::maybe(None)).unwrap();
        assert_eq!(value, json!({"success": true}));
        assert_eq!(
            serde_json::to_value(ApiResponse::empty()).unwrap(),
            json!({"success": true})
        );
    }

    #[test]
    fn test_failure_shape() {
        let value =
            serde_json::to_value(ApiResponse::<()>::failure(vec!["User not found".into()]))
                .unwrap();
        assert_eq!(value, json!({"success": false, "errors": ["User not found"]}));
    }

    #[test]
    fn test_deserialize_payload_without_default() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Named {
            name: String,
        }

        let full: ApiResponse<Named> =
            serde_json::from_value(json!({"success": true, "data": {"name": "Ada"}})).unwrap();
        assert_eq!(full.data.unwrap().name, "Ada");

        let bare: ApiResponse<Named> = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(bare.success);
        assert!(bare.data.is_none());
        assert!(bare.errors.is_none());
    }
}
