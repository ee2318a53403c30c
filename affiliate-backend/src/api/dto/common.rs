// affiliate-backend/src/api/dto/common.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// 統一レスポンスエンベロープ
///
/// `type=0` が成功。ドメインレベルの失敗は `isSuccess=false` と
/// 非ゼロの `type` で、HTTPステータスは200のまま伝える。
/// 呼び出し側はトランスポートのステータスではなく `isSuccess` で
/// 分岐する取り決め
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    #[serde(rename = "isSuccess")]
    pub is_success: bool,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: i32,
}

impl<T> ApiEnvelope<T> {
    /// 成功レスポンスを作成
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            is_success: true,
            message: None,
            kind: 0,
        }
    }

    /// メッセージ付き成功レスポンスを作成
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            is_success: true,
            message: Some(message.into()),
            kind: 0,
        }
    }

    /// ドメインレベルの失敗（HTTP 200のまま返す）
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            is_success: false,
            message: Some(message.into()),
            kind: 1,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiEnvelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let envelope = ApiEnvelope::ok(vec![1, 2, 3]);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["type"], 0);
        assert!(json["message"].is_null());
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope: ApiEnvelope<()> = ApiEnvelope::failure("Campaign not found");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["isSuccess"], false);
        assert_eq!(json["type"], 1);
        assert_eq!(json["message"], "Campaign not found");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = ApiEnvelope::ok_with_message("payload", "Tracking link already exists.");
        let json = serde_json::to_string(&envelope).unwrap();
        let back: ApiEnvelope<String> = serde_json::from_str(&json).unwrap();

        assert!(back.is_success);
        assert_eq!(back.kind, 0);
        assert_eq!(back.data.as_deref(), Some("payload"));
        assert_eq!(
            back.message.as_deref(),
            Some("Tracking link already exists.")
        );
    }
}
