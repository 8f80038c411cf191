//! Network constants for the CoinMarketCap listings endpoint.

/// Default listings endpoint.
pub const DEFAULT_LISTINGS_URL: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "CMC_API_KEY";

/// Largest `limit` the endpoint accepts.
pub const UPSTREAM_MAX_LIMIT: u32 = 5000;
