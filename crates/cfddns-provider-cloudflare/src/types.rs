//! Cloudflare API v4 wire types

use serde::Deserialize;

/// Envelope around every Cloudflare API response
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
}

/// One entry of the `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

impl<T> CloudflareResponse<T> {
    /// `errors` joined for log and error messages
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "no error detail".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("{} {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfddns_core::traits::Zone;

    #[test]
    fn test_envelope_without_errors_field() {
        let resp: CloudflareResponse<Vec<Zone>> = serde_json::from_value(serde_json::json!({
            "success": true,
            "result": [{ "id": "z1", "name": "example.com", "status": "active" }]
        }))
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.result.unwrap()[0].id, "z1");
    }

    #[test]
    fn test_error_summary() {
        let resp: CloudflareResponse<()> = serde_json::from_value(serde_json::json!({
            "success": false,
            "result": null,
            "errors": [
                { "code": 9109, "message": "Invalid access token" },
                { "code": 1000, "message": "other" }
            ]
        }))
        .unwrap();
        assert_eq!(resp.error_summary(), "9109 Invalid access token; 1000 other");
    }
}
