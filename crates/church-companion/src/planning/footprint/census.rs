//! Census Bureau ACS client used for ZIP-level (ZCTA) lookups.

use super::{DemographicProvider, ProviderError};
use crate::config::CensusConfig;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

/// Maximum length for error response bodies carried in errors.
const MAX_ERROR_BODY_LENGTH: usize = 300;

/// Clone shares the underlying connection pool.
#[derive(Clone)]
pub struct CensusClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for CensusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CensusClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl CensusClient {
    pub fn new(config: &CensusConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl DemographicProvider for CensusClient {
    async fn fetch_row(
        &self,
        zip: &str,
        variables: &[&str],
    ) -> Result<Vec<String>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingCredential);
        };

        debug!(zip, variables = variables.len(), "querying census provider");
        let geography = format!("zip code tabulation area:{zip}");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("get", variables.join(",").as_str()),
                ("for", geography.as_str()),
                ("key", api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Err(ProviderError::MissingRecord(zip.to_string()));
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        parse_table(zip, &body, variables.len())
    }
}

/// The API answers with a JSON table: a header row followed by data rows, each
/// data row holding the requested variables first and geography columns after.
fn parse_table(zip: &str, body: &str, width: usize) -> Result<Vec<String>, ProviderError> {
    if body.trim().is_empty() {
        return Err(ProviderError::MissingRecord(zip.to_string()));
    }

    let table: Vec<Vec<Value>> = serde_json::from_str(body)
        .map_err(|err| ProviderError::MalformedResponse(err.to_string()))?;

    let row = table
        .get(1)
        .ok_or_else(|| ProviderError::MissingRecord(zip.to_string()))?;

    if row.len() < width {
        return Err(ProviderError::MalformedResponse(format!(
            "expected {width} values, got {}",
            row.len()
        )));
    }

    row.iter()
        .take(width)
        .map(|cell| match cell {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => Ok(number.to_string()),
            other => Err(ProviderError::MalformedResponse(format!(
                "unexpected cell {other}"
            ))),
        })
        .collect()
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parses_first_data_row() {
        let body = r#"[["B01003_001E","B01002_001E","B19013_001E","zip code tabulation area"],
                       ["23114","31.4","48210","74104"]]"#;
        let row = parse_table("74104", body, 3).expect("row parses");
        assert_eq!(row, vec!["23114", "31.4", "48210"]);
    }

    #[test]
    fn header_only_table_is_missing_record() {
        let body = r#"[["B01003_001E","zip code tabulation area"]]"#;
        assert!(matches!(
            parse_table("00000", body, 1),
            Err(ProviderError::MissingRecord(_))
        ));
        assert!(matches!(
            parse_table("00000", "", 1),
            Err(ProviderError::MissingRecord(_))
        ));
    }

    #[test]
    fn null_cells_and_garbage_are_malformed() {
        let body = r#"[["B01003_001E","zip"],[null,"74104"]]"#;
        assert!(matches!(
            parse_table("74104", body, 1),
            Err(ProviderError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_table("74104", "<html>error</html>", 1),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(1000);
        let truncated = truncate_body(&body);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with("(truncated, 1000 total bytes)"));
    }

    #[tokio::test]
    async fn missing_credential_short_circuits_without_network() {
        let config = CensusConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_millis(50),
        };
        let client = CensusClient::new(&config).expect("client builds");
        assert!(!client.has_credential());
        let err = client
            .fetch_row("74104", &["B01003_001E"])
            .await
            .expect_err("no credential");
        assert!(matches!(err, ProviderError::MissingCredential));
    }
}
