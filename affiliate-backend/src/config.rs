// affiliate-backend/src/config.rs

use std::env;

/// 外部パートナー（MLink）接続設定
#[derive(Clone, Debug)]
pub struct MlinkConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

/// SMTP設定（未設定の場合はメール送信をスキップ）
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

impl SmtpConfig {
    /// 送信に必要な値がすべて揃っているか
    pub fn is_configured(&self) -> bool {
        self.host.is_some() && self.user.is_some() && self.password.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub frontend_url: String,
    pub mlink: MlinkConfig,
    pub smtp: SmtpConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            environment,
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| "Invalid PORT value")?,
            database_url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            jwt_secret: env::var("JWT_SECRET")
                .or_else(|_| env::var("SECRET_KEY"))
                .map_err(|_| "JWT_SECRET or SECRET_KEY must be set")?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            mlink: MlinkConfig {
                base_url: env::var("MLINK_BASE_URL")
                    .unwrap_or_else(|_| "https://api.mlink.com.tr".to_string()),
                username: env::var("MLINK_USERNAME").unwrap_or_default(),
                password: env::var("MLINK_PASSWORD").unwrap_or_default(),
            },
            smtp: SmtpConfig {
                host: env::var("SMTP_HOST").ok(),
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .map_err(|_| "Invalid SMTP_PORT value")?,
                user: env::var("SMTP_USER").ok(),
                password: env::var("SMTP_PASS").ok(),
                from: env::var("SMTP_FROM").unwrap_or_else(|_| "no-reply@example.com".to_string()),
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_config_is_configured() {
        let mut smtp = SmtpConfig {
            host: Some("smtp.example.com".to_string()),
            port: 587,
            user: Some("user".to_string()),
            password: Some("pass".to_string()),
            from: "no-reply@example.com".to_string(),
        };
        assert!(smtp.is_configured());

        smtp.password = None;
        assert!(!smtp.is_configured());
    }
}
