#![cfg(feature = "web")]
#![cfg(not(tarpaulin_include))]

use crate::records::ApartmentRecord;
use std::env;
use std::error::Error;

/// Where the three data shapes come from. Each entry is either an
/// `http(s)://` endpoint or a local file path; the exporter publishes the
/// same JSON/CSV either way.
#[derive(Clone, Debug)]
pub struct DataSources {
    pub grid_csv: String,
    pub fvs_list: String,
    pub records: String,
}

impl DataSources {
    /// Read source locations from the environment, with local-file
    /// defaults for development.
    pub fn from_env() -> Self {
        DataSources {
            grid_csv: env::var("FVS_GRID_URL").unwrap_or_else(|_| "data/plan.csv".to_string()),
            fvs_list: env::var("FVS_LIST_URL").unwrap_or_else(|_| "data/fvs_list.json".to_string()),
            records: env::var("FVS_RECORDS_URL")
                .unwrap_or_else(|_| "data/records.json".to_string()),
        }
    }
}

/// Fetch one source as text, remote or local.
pub async fn fetch_text(source: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::get(source).await?.error_for_status()?;
        Ok(response.text().await?)
    } else {
        Ok(tokio::fs::read_to_string(source).await?)
    }
}

/// Fetch the inspection-set list: a JSON array of identifiers.
pub async fn fetch_fvs_list(source: &str) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
    let text = fetch_text(source).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Fetch the full apartment-record list, all inspection sets flattened.
pub async fn fetch_records(
    source: &str,
) -> Result<Vec<ApartmentRecord>, Box<dyn Error + Send + Sync>> {
    let text = fetch_text(source).await?;
    Ok(serde_json::from_str(&text)?)
}
