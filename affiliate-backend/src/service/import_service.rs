// affiliate-backend/src/service/import_service.rs

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter, Set, TransactionTrait,
};
use tracing::{info, warn};

use crate::api::dto::common::ApiEnvelope;
use crate::api::dto::import_dto::{
    ImportRequest, ImportResultData, MlinkCampaignItem, MlinkProductItem,
};
use crate::db::DbPool;
use crate::domain::user_model::UserRole;
use crate::domain::{campaign_model, product_model};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::repository::campaign_repository::CampaignRepository;
use crate::repository::user_repository::UserRepository;
use crate::utils::date::parse_ddmmyyyy;

/// 外部フィード由来レコードの出所タグ
const SOURCE_MLINK: &str = "mlink";

#[derive(Clone)]
pub struct ImportService {
    db: DbPool,
    campaign_repo: Arc<CampaignRepository>,
    user_repo: Arc<UserRepository>,
}

impl ImportService {
    pub fn new(
        db: DbPool,
        campaign_repo: Arc<CampaignRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            db,
            campaign_repo,
            user_repo,
        }
    }

    /// 外部フィードのキャンペーン配列をローカルへマージする
    ///
    /// replace ではなく upsert-merge。同じフィードを繰り返し
    /// 流し込んでも安全（冪等）で、ローカルで追加した商品は
    /// 消えない。バッチ全体がひとつのユニットオブワークで、
    /// 途中の失敗は全件ロールバックする
    pub async fn import_campaigns(
        &self,
        auth: &AuthenticatedUser,
        query_company_id: Option<i32>,
        request: ImportRequest,
    ) -> AppResult<ApiEnvelope<ImportResultData>> {
        if !matches!(auth.role, UserRole::Admin | UserRole::Company) {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        // 会社ロールは自社に固定。管理者はクエリで対象を指定する
        let company_id = if auth.role == UserRole::Company {
            let user = self
                .user_repo
                .find_by_id(auth.user_id)
                .await?
                .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
            user.company_id
        } else {
            query_company_id
        };
        let company_id =
            company_id.ok_or_else(|| AppError::BadRequest("company_id is required".to_string()))?;

        let txn = self.db.begin().await?;
        let now = Utc::now();
        let mut imported = 0usize;

        for raw in &request.data {
            let item: MlinkCampaignItem = match serde_json::from_value(raw.clone()) {
                Ok(item) => item,
                Err(e) => {
                    warn!(error = %e, "Skipping malformed feed item");
                    continue;
                }
            };

            // 外部IDのない要素はマージのしようがないので飛ばす
            let Some(mlink_id) = item.external_id() else {
                continue;
            };

            let existing = self
                .campaign_repo
                .find_by_mlink_and_company(&txn, &mlink_id, company_id)
                .await?;

            let campaign = match existing {
                Some(existing) => {
                    let mut campaign = existing.into_active_model();
                    // 空の名前は既存値を保持する
                    if let Some(name) = item.name.as_ref().filter(|n| !n.is_empty()) {
                        campaign.name = Set(name.clone());
                    }
                    apply_feed_fields(&mut campaign, &item);
                    if let Some(branding) = resolve_branding_image(&item) {
                        campaign.branding_image = Set(Some(branding));
                    }
                    campaign.source = Set(SOURCE_MLINK.to_string());
                    campaign.source_payload_json = Set(Some(raw.clone()));
                    campaign.last_synced_at = Set(Some(now));

                    self.campaign_repo.update(&txn, campaign).await?
                }
                None => {
                    let mut campaign = campaign_model::ActiveModel {
                        mlink_id: Set(Some(mlink_id.clone())),
                        company_id: Set(Some(company_id)),
                        name: Set(item.name.clone().unwrap_or_default()),
                        branding_image: Set(resolve_branding_image(&item)),
                        source: Set(SOURCE_MLINK.to_string()),
                        source_payload_json: Set(Some(raw.clone())),
                        last_synced_at: Set(Some(now)),
                        start_date: Set(now),
                        created_at: Set(now),
                        ..Default::default()
                    };
                    apply_feed_fields(&mut campaign, &item);

                    self.campaign_repo.create(&txn, campaign).await?
                }
            };

            self.merge_products(&txn, campaign.id, &item.products).await?;
            imported += 1;
        }

        txn.commit().await?;

        info!(company_id = company_id, count = imported, "Campaign feed imported");

        Ok(ApiEnvelope::ok_with_message(
            ImportResultData { count: imported },
            format!("Imported/updated {} campaign(s).", imported),
        ))
    }

    /// 商品のマージ: 名前の和集合。既存商品は消しも上書きもしない
    async fn merge_products<C: ConnectionTrait>(
        &self,
        conn: &C,
        campaign_id: i32,
        products_in: &[MlinkProductItem],
    ) -> AppResult<()> {
        if products_in.is_empty() {
            return Ok(());
        }

        let mut existing_names: HashSet<String> = product_model::Entity::find()
            .filter(product_model::Column::CampaignId.eq(campaign_id))
            .all(conn)
            .await?
            .into_iter()
            .map(|product| product.name)
            .collect();

        for product in products_in {
            // 名前のない商品は識別できないので飛ばす
            let Some(name) = product.name.as_ref().filter(|n| !n.is_empty()) else {
                continue;
            };
            if existing_names.contains(name) {
                continue;
            }

            let new_product = product_model::ActiveModel {
                campaign_id: Set(Some(campaign_id)),
                name: Set(name.clone()),
                image: Set(product.image.clone()),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            product_model::Entity::insert(new_product)
                .exec_without_returning(conn)
                .await?;

            existing_names.insert(name.clone());
        }

        Ok(())
    }
}

/// 上書きが仕様のフィールド群を反映する
///
/// brief・各レート・終了日は入ってきた値で無条件に上書きする。
/// 終了日のパース不能は欠損（None）として扱い、エラーにしない
fn apply_feed_fields(campaign: &mut campaign_model::ActiveModel, item: &MlinkCampaignItem) {
    campaign.brief = Set(item.brief.clone());
    campaign.brand_commission_rate = Set(item.brand_campaign_commission_rate);
    campaign.influencer_commission_rate = Set(item.influencer_commission_rate);
    campaign.other_costs_rate = Set(item.other_costs_rate);
    campaign.end_date = Set(item.end_date.as_deref().and_then(parse_ddmmyyyy));
}

/// ブランディング画像の解決順: 明示指定、なければ先頭商品の画像、
/// それもなければ変更しない（None）
fn resolve_branding_image(item: &MlinkCampaignItem) -> Option<String> {
    if let Some(image) = item.branding_image.as_ref().filter(|s| !s.is_empty()) {
        return Some(image.clone());
    }
    item.products
        .first()
        .and_then(|product| product.image.clone())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::AccessTokenClaims;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

    fn service(db: DatabaseConnection) -> ImportService {
        ImportService::new(
            db.clone(),
            Arc::new(CampaignRepository::new(db.clone())),
            Arc::new(UserRepository::new(db)),
        )
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(
            1,
            UserRole::Admin,
            AccessTokenClaims {
                sub: "1".to_string(),
                role: "admin".to_string(),
                purpose: None,
                iat: 0,
                exp: i64::MAX,
                jti: "test".to_string(),
            },
        )
    }

    fn item(json: serde_json::Value) -> MlinkCampaignItem {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_resolve_branding_image_prefers_explicit() {
        let item = item(serde_json::json!({
            "brandingImage": "banner.png",
            "products": [{"name": "Shirt", "image": "a.png"}]
        }));
        assert_eq!(resolve_branding_image(&item).as_deref(), Some("banner.png"));
    }

    #[test]
    fn test_resolve_branding_image_falls_back_to_first_product() {
        let item = item(serde_json::json!({
            "products": [{"name": "Shirt", "image": "a.png"}, {"name": "Hat", "image": "b.png"}]
        }));
        assert_eq!(resolve_branding_image(&item).as_deref(), Some("a.png"));
    }

    #[test]
    fn test_resolve_branding_image_empty_values_mean_unchanged() {
        let item = item(serde_json::json!({
            "brandingImage": "",
            "products": [{"name": "Shirt", "image": ""}]
        }));
        assert!(resolve_branding_image(&item).is_none());

        let item = item(serde_json::json!({"products": []}));
        assert!(resolve_branding_image(&item).is_none());
    }

    #[test]
    fn test_apply_feed_fields_unparseable_end_date_becomes_null() {
        let mut campaign = campaign_model::ActiveModel::default();
        let item = item(serde_json::json!({"endDate": "not-a-date"}));

        apply_feed_fields(&mut campaign, &item);
        assert_eq!(campaign.end_date, Set(None));

        let mut campaign = campaign_model::ActiveModel::default();
        let item = item(serde_json::json!({"endDate": "31.12.2025"}));

        apply_feed_fields(&mut campaign, &item);
        match &campaign.end_date {
            sea_orm::ActiveValue::Set(Some(end)) => {
                assert_eq!(end.format("%d.%m.%Y").to_string(), "31.12.2025");
            }
            other => panic!("end_date not set: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_import_rejects_influencer_role() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db);

        let auth = AuthenticatedUser::new(
            42,
            UserRole::Influencer,
            AccessTokenClaims {
                sub: "42".to_string(),
                role: "influencer".to_string(),
                purpose: None,
                iat: 0,
                exp: i64::MAX,
                jti: "test".to_string(),
            },
        );
        let result = service
            .import_campaigns(&auth, Some(5), ImportRequest { data: vec![] })
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_import_requires_company_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db);

        let result = service
            .import_campaigns(&admin(), None, ImportRequest { data: vec![] })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_import_skips_items_without_external_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db);

        let request = ImportRequest {
            data: vec![
                serde_json::json!({"name": "No id"}),
                serde_json::json!({"id": null, "name": "Null id"}),
            ],
        };
        let envelope = service
            .import_campaigns(&admin(), Some(5), request)
            .await
            .unwrap();

        assert!(envelope.is_success);
        assert_eq!(envelope.data.unwrap().count, 0);
    }

    #[tokio::test]
    async fn test_import_appends_only_missing_products() {
        let now = Utc::now();
        let existing_campaign = campaign_model::Model {
            id: 11,
            company_id: Some(5),
            name: "Summer".to_string(),
            brief: None,
            brand_commission_rate: None,
            influencer_commission_rate: None,
            other_costs_rate: None,
            start_date: now,
            end_date: None,
            branding_image: None,
            mlink_id: Some("ext-1".to_string()),
            source: "mlink".to_string(),
            source_payload_json: None,
            last_synced_at: None,
            created_at: now,
        };
        let mut updated_campaign = existing_campaign.clone();
        updated_campaign.last_synced_at = Some(now);

        let existing_product = product_model::Model {
            id: 21,
            campaign_id: Some(11),
            name: "Shirt".to_string(),
            image: Some("a.png".to_string()),
            mlink_id: None,
            source: "mlink".to_string(),
            source_payload_json: None,
            last_synced_at: None,
            created_at: now,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // 既存キャンペーンの照合
            .append_query_results([vec![existing_campaign]])
            // 更新のRETURNING
            .append_query_results([vec![updated_campaign]])
            // 既存商品の名前集合
            .append_query_results([vec![existing_product]])
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 22,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service(db.clone());
        let request = ImportRequest {
            data: vec![serde_json::json!({
                "id": "ext-1",
                "name": "Summer",
                "endDate": "31.12.2025",
                "products": [
                    {"name": "Shirt", "image": "a.png"},
                    {"name": "Hat", "image": "b.png"}
                ]
            })],
        };

        let envelope = service
            .import_campaigns(&admin(), Some(5), request)
            .await
            .unwrap();

        assert!(envelope.is_success);
        assert_eq!(envelope.data.unwrap().count, 1);
        assert_eq!(
            envelope.message.as_deref(),
            Some("Imported/updated 1 campaign(s).")
        );

        // 発行されたSQLを確認: 既存の "Shirt" は挿入されず "Hat" だけ追加
        let log = db.into_transaction_log();
        let statements = format!("{:?}", log);
        assert!(statements.contains("Hat"));
        assert!(!statements.contains("\"Shirt\""));
    }
}
