//! HTTP client for the repository, price, and quote endpoints.

use std::collections::HashMap;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::{tlog_debug, Error, Result};

pub const MAX_REPOS: usize = 5;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Repo {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Quote {
    pub quote: String,
    pub author: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    pub usd: f64,
    pub brl: f64,
}

/// Response of the price endpoint: asset id -> currency code -> price.
pub type PriceTable = HashMap<String, HashMap<String, f64>>;

/// Extract one asset's USD and BRL prices. An absent asset or currency is
/// `Error::MissingData`, distinct from transport failures.
pub fn price_from_table(table: &PriceTable, asset: &str) -> Result<Price> {
    let quotes = table
        .get(asset)
        .ok_or_else(|| Error::MissingData(asset.to_string()))?;
    let currency = |code: &str| {
        quotes
            .get(code)
            .copied()
            .ok_or_else(|| Error::MissingData(format!("{asset}/{code}")))
    };
    Ok(Price {
        usd: currency("usd")?,
        brl: currency("brl")?,
    })
}

pub struct RemoteClient {
    http: reqwest::Client,
    github_api: String,
    price_api: String,
    quote_api: String,
}

impl RemoteClient {
    /// Build a client whose every request is bounded by the configured timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("termfolio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            github_api: config.github_api().to_string(),
            price_api: config.price_api().to_string(),
            quote_api: config.quote_api().to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        tlog_debug!("RemoteClient::fetch url={} status={}", response.url(), status);
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn repos(&self, user: &str) -> Result<Vec<Repo>> {
        let url = format!("{}/users/{}/repos", self.github_api, user);
        let request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .query(&[("sort", "updated"), ("per_page", "5")]);
        let mut repos: Vec<Repo> = self.fetch(request).await?;
        repos.truncate(MAX_REPOS);
        Ok(repos)
    }

    pub async fn price(&self, asset: &str) -> Result<Price> {
        let url = format!("{}/simple/price", self.price_api);
        let request = self
            .http
            .get(url)
            .query(&[("ids", asset), ("vs_currencies", "usd,brl")]);
        let table: PriceTable = self.fetch(request).await?;
        price_from_table(&table, asset)
    }

    pub async fn quote(&self) -> Result<Quote> {
        let url = format!("{}/quotes/random", self.quote_api);
        self.fetch(self.http.get(url)).await
    }
}
