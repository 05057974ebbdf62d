use crate::{Config, City, LookupError, lookup::openweather::OpenWeatherLookup};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Minimum number of characters before a lookup is worth issuing.
pub const MIN_QUERY_CHARS: usize = 2;

/// A remote city search.
#[async_trait]
pub trait CityLookup: Send + Sync + Debug {
    /// Return the cities matching `query`. A response that carries no match
    /// list yields an empty vector rather than an error.
    async fn find(&self, query: &str) -> Result<Vec<City>, LookupError>;
}

/// Construct the OpenWeather lookup from config.
pub fn lookup_from_config(config: &Config) -> anyhow::Result<Arc<dyn CityLookup>> {
    let api_key = config.resolve_api_key()?;
    let lookup = OpenWeatherLookup::with_base_url(api_key, config.base_url());

    Ok(Arc::new(lookup))
}
