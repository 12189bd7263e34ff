use crate::adapters::source::{dataset_url, DEFAULT_DATASET_PATH};
use crate::core::content::ContentPolicy;
use crate::core::context::RenderOptions;
use crate::core::popup::ClickPolicy;
use crate::core::table::DEFAULT_EXCLUDED_COLUMNS;
use crate::domain::model::{LatLng, MapView, TileLayer};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MapError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub map: MapSection,
    #[serde(default)]
    pub tiles: TileSection,
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub dataset_path: Option<String>,
    /// Local file; takes precedence over `base_url`.
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSection {
    pub center: [f64; 2],
    pub zoom: u8,
    pub focus_zoom: u8,
}

impl Default for MapSection {
    fn default() -> Self {
        let view = MapView::default();
        Self {
            center: [view.center.lat, view.center.lng],
            zoom: view.zoom,
            focus_zoom: RenderOptions::default().focus_zoom,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSection {
    pub url_template: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub detect_retina: bool,
}

impl Default for TileSection {
    fn default() -> Self {
        let tiles = TileLayer::default();
        Self {
            url_template: tiles.url_template,
            min_zoom: tiles.min_zoom,
            max_zoom: tiles.max_zoom,
            detect_retina: tiles.detect_retina,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    #[serde(default)]
    pub click_policy: ClickPolicy,
    #[serde(default)]
    pub content: ContentPolicy,
    #[serde(default = "default_true")]
    pub table: bool,
    pub excluded_columns: Option<Vec<String>>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            click_policy: ClickPolicy::default(),
            content: ContentPolicy::default(),
            table: true,
            excluded_columns: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MapError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        match (&self.source.file, &self.source.base_url) {
            (Some(file), _) => validation::validate_path("source.file", file)?,
            (None, Some(base_url)) => validation::validate_url("source.base_url", base_url)?,
            (None, None) => {
                return Err(MapError::MissingConfig {
                    field: "source.base_url or source.file".to_string(),
                })
            }
        }

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_range("map.center[0]", self.map.center[0], -90.0, 90.0)?;
        validation::validate_range("map.center[1]", self.map.center[1], -180.0, 180.0)?;
        validation::validate_zoom_bounds("tiles", self.tiles.min_zoom, self.tiles.max_zoom)?;
        validation::validate_range("map.zoom", self.map.zoom, self.tiles.min_zoom, self.tiles.max_zoom)?;
        validation::validate_range(
            "map.focus_zoom",
            self.map.focus_zoom,
            self.tiles.min_zoom,
            self.tiles.max_zoom,
        )?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn dataset_url(&self) -> Result<Option<Url>> {
        let base_url = match (&self.source.file, &self.source.base_url) {
            (None, Some(base_url)) => base_url,
            _ => return Ok(None),
        };
        let path = self.source.dataset_path.as_deref().unwrap_or(DEFAULT_DATASET_PATH);
        dataset_url(base_url, path).map(Some)
    }

    fn dataset_file(&self) -> Option<&str> {
        self.source.file.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn initial_view(&self) -> MapView {
        MapView {
            center: LatLng::new(self.map.center[0], self.map.center[1]),
            zoom: self.map.zoom,
        }
    }

    fn tile_layer(&self) -> TileLayer {
        TileLayer {
            url_template: self.tiles.url_template.clone(),
            min_zoom: self.tiles.min_zoom,
            max_zoom: self.tiles.max_zoom,
            detect_retina: self.tiles.detect_retina,
        }
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            focus_zoom: self.map.focus_zoom,
            click_policy: self.presentation.click_policy,
            content_policy: self.presentation.content,
            table_enabled: self.presentation.table,
            excluded_columns: self.presentation.excluded_columns.clone().unwrap_or_else(|| {
                DEFAULT_EXCLUDED_COLUMNS.iter().map(|c| c.to_string()).collect()
            }),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
