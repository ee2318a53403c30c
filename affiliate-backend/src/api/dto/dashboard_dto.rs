// affiliate-backend/src/api/dto/dashboard_dto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::activity_log_model;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryResponse {
    pub active_campaigns: u64,
    pub total_clicks: i64,
    pub total_sales: i64,
    pub total_commission: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ActivityOut {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

impl From<activity_log_model::Model> for ActivityOut {
    fn from(log: activity_log_model::Model) -> Self {
        Self {
            activity_type: log.activity_type,
            label: log.label,
            timestamp: log.timestamp,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub company_id: Option<i32>,
}
