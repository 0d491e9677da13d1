// src/services/email.rs
//! Outbound email transport (AWS SESv2) and message templates

use aws_config::BehaviorVersion;
use aws_sdk_sesv2::config::{Credentials, Region};
use aws_sdk_sesv2::Client as SesClient;
use std::env;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::common::safe_email_log;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email transport not configured")]
    NotConfigured,

    #[error("SES operation failed: {0}")]
    SESError(String),
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub from_email: String,
}

/// SES-backed email sender. The rest of the service only sees
/// `send(to, subject, body) -> ok/fail`.
pub struct EmailService {
    config: Option<EmailConfig>,
}

impl EmailService {
    /// Read SES credentials from the environment. A missing configuration
    /// is not fatal at startup; sends fail with `NotConfigured` instead.
    pub fn from_env() -> Self {
        let config = match (
            env::var("AWS_ACCESS_KEY_ID"),
            env::var("AWS_SECRET_ACCESS_KEY"),
            env::var("AWS_SES_FROM_EMAIL"),
        ) {
            (Ok(access_key_id), Ok(secret_access_key), Ok(from_email)) => Some(EmailConfig {
                access_key_id,
                secret_access_key,
                region: env::var("AWS_SES_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                from_email,
            }),
            _ => {
                warn!("SES credentials not configured; outbound email disabled");
                None
            }
        };

        Self { config }
    }

    async fn get_ses_client(&self) -> Result<(SesClient, &EmailConfig), EmailError> {
        let config = self.config.as_ref().ok_or(EmailError::NotConfigured)?;

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "env",
        );

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        Ok((SesClient::new(&aws_config), config))
    }

    /// Send a single HTML email via SES
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let (client, config) = self.get_ses_client().await?;

        use aws_sdk_sesv2::types::{Body as SesBody, Content, Destination, EmailContent, Message};

        let destination = Destination::builder().to_addresses(to).build();

        let subject_content = Content::builder()
            .data(subject)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError::SESError(format!("Failed to build subject: {}", e)))?;

        let body_content = Content::builder()
            .data(body)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError::SESError(format!("Failed to build body: {}", e)))?;

        let ses_body = SesBody::builder().html(body_content).build();

        let message = Message::builder()
            .subject(subject_content)
            .body(ses_body)
            .build();

        let email_content = EmailContent::builder().simple(message).build();

        let result = client
            .send_email()
            .from_email_address(&config.from_email)
            .destination(destination)
            .content(email_content)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, to = %safe_email_log(to), "Failed to send email via SES");
                EmailError::SESError(format!("Send failed: {}", e))
            })?;

        info!(
            to = %safe_email_log(to),
            message_id = ?result.message_id(),
            "Email sent successfully via SES"
        );

        Ok(())
    }
}

/// HTML body for the account-verification OTP email
pub fn verification_otp_email(name: &str, code: i64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .code {{ font-size: 32px; letter-spacing: 8px; text-align: center; padding: 20px; background-color: #f4f4f5; border-radius: 8px; }}
        .footer {{ padding: 20px; text-align: center; font-size: 12px; color: #666; }}
    </style>
</head>
<body>
    <div class="container">
        <p>Hi {},</p>
        <p>Use this one-time passcode to verify your account. It expires in 5 minutes.</p>
        <div class="code">{}</div>
        <p>If you did not request this code, you can safely ignore this email.</p>
        <div class="footer">
            <p>This is an automated message. Please do not reply directly to this email.</p>
        </div>
    </div>
</body>
</html>"#,
        name, code
    )
}

/// HTML body for the password-recovery link email
pub fn recovery_link_email(name: &str, link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .button {{ display: inline-block; padding: 12px 24px; background-color: #4F46E5; color: white; text-decoration: none; border-radius: 5px; margin: 10px 0; }}
        .footer {{ padding: 20px; text-align: center; font-size: 12px; color: #666; }}
    </style>
</head>
<body>
    <div class="container">
        <p>Hi {},</p>
        <p>We received a request to reset your password. Click the link below to choose a new one.</p>
        <p><a class="button" href="{}">Reset your password</a></p>
        <p>This link stops working as soon as the password is changed, or when a newer recovery request is made.</p>
        <div class="footer">
            <p>If you did not request a password reset, no action is needed.</p>
        </div>
    </div>
</body>
</html>"#,
        name, link
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_email_contains_code() {
        let body = verification_otp_email("Ann", 123456);
        assert!(body.contains("123456"));
        assert!(body.contains("Ann"));
        assert!(body.contains("5 minutes"));
    }

    #[test]
    fn test_recovery_email_contains_link() {
        let link = "http://localhost:3000/#/account/change-password?token=abc";
        let body = recovery_link_email("Ann", link);
        assert!(body.contains(link));
    }
}
