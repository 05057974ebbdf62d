use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::DEFAULT_BASE_URL,
    error::LookupError,
    model::{City, FindResponse},
};

use super::CityLookup;

/// City search backed by OpenWeatherMap's `find` endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherLookup {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherLookup {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn find_url(&self) -> String {
        format!("{}/find", self.base_url)
    }
}

#[async_trait]
impl CityLookup for OpenWeatherLookup {
    async fn find(&self, query: &str) -> Result<Vec<City>, LookupError> {
        let url = self.find_url();
        tracing::debug!(%url, query, "Searching cities");

        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: FindResponse = serde_json::from_str(&body)?;
        let cities = parsed.list.unwrap_or_default();

        tracing::debug!(query, matches = cities.len(), "City search finished");
        Ok(cities)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
