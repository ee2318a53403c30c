// affiliate-backend/src/api/dto/link_dto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// リンク発行リクエスト
///
/// influencerID は外部API互換のため文字列で受ける
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateLinkRequest {
    #[serde(rename = "influencerID")]
    pub influencer_id: String,
    #[serde(rename = "influencerName")]
    pub influencer_name: String,
    #[serde(rename = "campaignID")]
    pub campaign_id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratedLinkData {
    #[serde(rename = "campaignID")]
    pub campaign_id: i32,
    pub name: String,
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
    pub url: String,
}

/// クリック解決のレスポンスデータ（リダイレクト先）
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackData {
    #[serde(rename = "campaignID")]
    pub campaign_id: Option<i32>,
    #[serde(rename = "influencerID")]
    pub influencer_id: Option<i32>,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_link_request_field_names() {
        let body = serde_json::json!({
            "influencerID": "7",
            "influencerName": "jane_doe",
            "campaignID": 3
        });
        let request: GenerateLinkRequest = serde_json::from_value(body).unwrap();

        assert_eq!(request.influencer_id, "7");
        assert_eq!(request.influencer_name, "jane_doe");
        assert_eq!(request.campaign_id, 3);
    }

    #[test]
    fn test_track_data_field_names() {
        let data = TrackData {
            campaign_id: Some(3),
            influencer_id: Some(7),
            url: Some("https://example.com/landing".to_string()),
        };
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["campaignID"], 3);
        assert_eq!(json["influencerID"], 7);
        assert_eq!(json["url"], "https://example.com/landing");
    }
}
