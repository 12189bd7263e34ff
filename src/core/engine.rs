use crate::core::context::AppContext;
use crate::core::loader::DatasetLoader;
use crate::domain::model::{LoadReport, MapView, TileLayer};
use crate::domain::ports::{DatasetSource, MapSurface, PageSurface};
use crate::utils::error::Result;

/// Runs the one-shot fetch-and-render pass.
pub struct MapEngine<S: DatasetSource> {
    loader: DatasetLoader<S>,
    view: MapView,
    tiles: TileLayer,
}

impl<S: DatasetSource> MapEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            loader: DatasetLoader::new(source),
            view: MapView::default(),
            tiles: TileLayer::default(),
        }
    }

    pub fn with_view(mut self, view: MapView, tiles: TileLayer) -> Self {
        self.view = view;
        self.tiles = tiles;
        self
    }

    /// Initializes the map, loads the dataset and renders it. On a fetch
    /// failure the map stays initialized with no markers.
    pub async fn run<M: MapSurface, P: PageSurface>(
        &self,
        context: &mut AppContext<M, P>,
    ) -> Result<LoadReport> {
        context.initialize(self.view.clone(), &self.tiles);

        tracing::info!("Loading dataset from {}", self.loader.source().describe());
        let dataset = match self.loader.load().await {
            Ok(dataset) => dataset,
            Err(e) => {
                tracing::error!("Dataset load failed: {}", e);
                return Err(e);
            }
        };

        if dataset.report.skipped > 0 {
            tracing::debug!("Skipped {} malformed lines", dataset.report.skipped);
        }

        context.render(&dataset);
        Ok(dataset.report)
    }
}
