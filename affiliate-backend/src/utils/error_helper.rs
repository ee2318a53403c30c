// affiliate-backend/src/utils/error_helper.rs

//! ログ付きエラー変換ヘルパー

use crate::error::AppError;
use tracing::error;

/// 内部サーバーエラーをログ付きで生成
///
/// 元のエラー詳細はサーバーログにのみ残し、クライアントには
/// 汎用メッセージを返す
pub fn internal_server_error(
    error: impl std::fmt::Display,
    context: &str,
    message: &str,
) -> AppError {
    error!(context = %context, error = %error, "Internal server error");
    AppError::InternalServerError(message.to_string())
}
