use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, info};

use shared_config::AppConfig;

#[derive(Error, Debug)]
pub enum SmsError {
    #[error("Invalid recipient number {0:?}")]
    InvalidRecipient(String),

    #[error("SMS gateway not configured")]
    NotConfigured,

    #[error("SMS provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SMS provider rejected the message: {0}")]
    Rejected(String),
}

/// Client for the bulk SMS provider. Dispatch failures are reported to the
/// caller as an error value and logged; the booking flow folds them into a
/// status flag rather than failing the request.
#[derive(Debug, Clone)]
pub struct SmsClient {
    client: Client,
    api_url: String,
    usercode: String,
    password: String,
    header: String,
}

impl SmsClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.sms_api_url.clone(),
            usercode: config.sms_usercode.clone(),
            password: config.sms_password.clone(),
            header: config.sms_header.clone(),
        }
    }

    /// Send one text message to a single recipient. The recipient may arrive
    /// in any local formatting; it is normalized to the provider's expected
    /// ten-digit form first.
    pub async fn send(&self, recipient: &str, message: &str) -> Result<(), SmsError> {
        if self.usercode.is_empty() || self.password.is_empty() {
            return Err(SmsError::NotConfigured);
        }

        let gsmno = normalize_msisdn(recipient)
            .ok_or_else(|| SmsError::InvalidRecipient(recipient.to_string()))?;

        debug!("Dispatching SMS to {} via {}", gsmno, self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .form(&[
                ("usercode", self.usercode.as_str()),
                ("password", self.password.as_str()),
                ("gsmno", gsmno.as_str()),
                ("message", message),
                ("msgheader", self.header.as_str()),
                // Turkish character set so diacritics survive the wire.
                ("dil", "TR"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("SMS provider returned HTTP {}: {}", status, body);
            return Err(SmsError::Rejected(format!("HTTP {}", status)));
        }

        // The provider answers with a numeric result code; 00/01/02 mean the
        // message was accepted for delivery.
        let code = body.split_whitespace().next().unwrap_or("");
        if matches!(code, "00" | "01" | "02") {
            info!("SMS accepted for {} (code {})", gsmno, code);
            Ok(())
        } else {
            error!("SMS provider rejected message for {}: {}", gsmno, body);
            Err(SmsError::Rejected(body))
        }
    }
}

/// Reduce a free-form phone number to the ten-digit local form the provider
/// expects: strip separators, one `90` country prefix and one leading `0`
/// trunk digit.
pub fn normalize_msisdn(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let digits = match digits {
        d if d.len() == 12 && d.starts_with("90") => d[2..].to_string(),
        d if d.len() == 13 && d.starts_with("090") => d[3..].to_string(),
        d => d,
    };
    let digits = match digits {
        d if d.len() == 11 && d.starts_with('0') => d[1..].to_string(),
        d => d,
    };

    if digits.len() == 10 {
        Some(digits)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_msisdn;

    #[test]
    fn strips_separators_and_country_prefix() {
        assert_eq!(
            normalize_msisdn("+90 (532) 123-45-67").as_deref(),
            Some("5321234567")
        );
        assert_eq!(normalize_msisdn("905321234567").as_deref(), Some("5321234567"));
    }

    #[test]
    fn strips_leading_trunk_zero() {
        assert_eq!(normalize_msisdn("05321234567").as_deref(), Some("5321234567"));
        assert_eq!(normalize_msisdn("0 532 123 45 67").as_deref(), Some("5321234567"));
    }

    #[test]
    fn passes_through_already_local_numbers() {
        assert_eq!(normalize_msisdn("5321234567").as_deref(), Some("5321234567"));
    }

    #[test]
    fn rejects_numbers_that_do_not_reduce_to_ten_digits() {
        assert_eq!(normalize_msisdn("12345"), None);
        assert_eq!(normalize_msisdn(""), None);
        assert_eq!(normalize_msisdn("not a number"), None);
    }
}
