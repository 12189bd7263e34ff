use crate::adapters::source::{dataset_url, DEFAULT_DATASET_PATH};
use crate::core::content::ContentPolicy;
use crate::core::context::RenderOptions;
use crate::core::popup::ClickPolicy;
use crate::domain::model::{MapView, TileLayer};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "facility-map")]
#[command(about = "Load a facility CSV, render it onto a map scene and replay UI events")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file; replaces the source/render flags")]
    pub config: Option<String>,

    #[arg(long, default_value = "http://localhost:8080")]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    pub dataset: String,

    #[arg(long, help = "Read the dataset from a local file instead of HTTP")]
    pub file: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "JSON array of UI events to replay after rendering")]
    pub events: Option<String>,

    #[arg(long, help = "Render markers only, without the table panel")]
    pub no_table: bool,

    #[arg(long, default_value = "toggle", value_parser = parse_click_policy)]
    pub click_policy: ClickPolicy,

    #[arg(long, help = "Insert dataset text into popups and cells without escaping")]
    pub raw_content: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

fn parse_click_policy(value: &str) -> std::result::Result<ClickPolicy, String> {
    match value {
        "toggle" => Ok(ClickPolicy::Toggle),
        "always-pin" | "always_pin" => Ok(ClickPolicy::AlwaysPin),
        other => Err(format!("unknown click policy '{}', expected toggle or always-pin", other)),
    }
}

impl ConfigProvider for CliConfig {
    fn dataset_url(&self) -> Result<Option<Url>> {
        if self.file.is_some() {
            return Ok(None);
        }
        dataset_url(&self.base_url, &self.dataset).map(Some)
    }

    fn dataset_file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn initial_view(&self) -> MapView {
        MapView::default()
    }

    fn tile_layer(&self) -> TileLayer {
        TileLayer::default()
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            click_policy: self.click_policy,
            content_policy: if self.raw_content {
                ContentPolicy::Raw
            } else {
                ContentPolicy::Escape
            },
            table_enabled: !self.no_table,
            ..RenderOptions::default()
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.file {
            Some(file) => validation::validate_path("file", file)?,
            None => validation::validate_url("base_url", &self.base_url)?,
        }
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(events) = &self.events {
            validation::validate_path("events", events)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::MapError;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["facility-map"]);
        assert_eq!(
            config.dataset_url().unwrap().map(String::from).as_deref(),
            Some("http://localhost:8080/hospitals.csv")
        );
        assert_eq!(config.render_options(), RenderOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_map_to_render_options() {
        let config = CliConfig::parse_from([
            "facility-map",
            "--file",
            "data.csv",
            "--no-table",
            "--click-policy",
            "always-pin",
            "--raw-content",
        ]);
        assert!(config.dataset_url().unwrap().is_none());
        assert_eq!(config.dataset_file(), Some("data.csv"));

        let options = config.render_options();
        assert!(!options.table_enabled);
        assert_eq!(options.click_policy, ClickPolicy::AlwaysPin);
        assert_eq!(options.content_policy, ContentPolicy::Raw);
    }

    #[test]
    fn test_unparsable_base_url_is_reported() {
        let config = CliConfig::parse_from(["facility-map", "--base-url", "not a url"]);
        assert!(matches!(config.dataset_url(), Err(MapError::Url(_))));
    }

    #[test]
    fn test_unknown_click_policy_is_rejected() {
        assert!(CliConfig::try_parse_from(["facility-map", "--click-policy", "sticky"]).is_err());
    }
}
