// affiliate-backend/src/utils/email.rs

//! パスワードリセットメールの送信
//!
//! 配送失敗は常に握りつぶす。メール送信はトリガー元の書き込みを
//! ロールバックさせてはならない

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info, warn};

use crate::config::SmtpConfig;

/// パスワードリセットメールを送信（非致命）
pub async fn send_password_reset_email(smtp: &SmtpConfig, to_email: &str, reset_url: &str) {
    if !smtp.is_configured() {
        warn!(to = %to_email, "SMTP not configured, skipping password reset mail");
        return;
    }

    let body = format!(
        "Merhaba,\n\n\
         Hesabınızı etkinleştirmek için aşağıdaki bağlantıya tıklayarak şifrenizi belirleyin:\n\n\
         {}\n\n\
         Teşekkürler.",
        reset_url
    );

    let message = match Message::builder()
        .from(match smtp.from.parse() {
            Ok(from) => from,
            Err(e) => {
                error!(error = %e, "Invalid SMTP_FROM address");
                return;
            }
        })
        .to(match to_email.parse() {
            Ok(to) => to,
            Err(e) => {
                error!(error = %e, to = %to_email, "Invalid recipient address");
                return;
            }
        })
        .subject("Şifrenizi Belirleyin")
        .header(ContentType::TEXT_PLAIN)
        .body(body)
    {
        Ok(message) => message,
        Err(e) => {
            error!(error = %e, "Failed to build password reset mail");
            return;
        }
    };

    let host = smtp.host.as_deref().unwrap_or_default();
    let mailer = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host) {
        Ok(builder) => builder
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.user.clone().unwrap_or_default(),
                smtp.password.clone().unwrap_or_default(),
            ))
            .build(),
        Err(e) => {
            error!(error = %e, "Failed to create SMTP transport");
            return;
        }
    };

    match mailer.send(message).await {
        Ok(_) => info!(to = %to_email, "Password reset mail sent"),
        Err(e) => error!(error = %e, to = %to_email, "Failed to send password reset mail"),
    }
}
