use crate::domain::model::{LatLng, MapView, MarkerId, PopupSpec, RowId, TileLayer};
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// Where the raw dataset text comes from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
    async fn fetch_text(&self) -> Result<String>;
}

#[async_trait]
impl<S: DatasetSource + ?Sized> DatasetSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn fetch_text(&self) -> Result<String> {
        (**self).fetch_text().await
    }
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// The mapping widget.
pub trait MapSurface {
    fn set_view(&mut self, view: MapView);
    fn add_tile_layer(&mut self, layer: &TileLayer);
    fn add_marker(&mut self, position: LatLng, popup: PopupSpec) -> MarkerId;
    fn open_popup(&mut self, marker: MarkerId);
    fn close_popup(&mut self, marker: MarkerId);
    /// A popup not bound to any marker; replaces the previous one.
    fn show_popup_at(&mut self, position: LatLng, content: &str);
    /// The container was resized and the map must recompute its layout.
    fn invalidate_size(&mut self);
}

/// The page around the map: table panel and viewport helpers.
pub trait PageSurface {
    fn set_table_header(&mut self, columns: &[String]);
    fn append_table_row(&mut self, cells: &[String]) -> RowId;
    fn set_row_highlight(&mut self, row: RowId, highlighted: bool);
    fn set_panel_collapsed(&mut self, collapsed: bool);
    /// Value of the `--vh` custom property, in pixels.
    fn set_viewport_unit(&mut self, px: f64);
}

pub trait ConfigProvider: Send + Sync {
    /// `None` when the dataset is read from a file or no base URL is set.
    fn dataset_url(&self) -> Result<Option<Url>>;
    fn dataset_file(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn initial_view(&self) -> MapView;
    fn tile_layer(&self) -> TileLayer;
    fn render_options(&self) -> crate::core::context::RenderOptions;
}
