use crate::core::content::ContentPolicy;
use crate::core::marker::MarkerPresenter;
use crate::core::popup::{ClickPolicy, PopupAction, PopupEvent};
use crate::core::table::{TablePresenter, DEFAULT_EXCLUDED_COLUMNS};
use crate::domain::model::{Dataset, LatLng, MapView, MarkerId, RowId, TileLayer};
use crate::domain::ports::{MapSurface, PageSurface};
use crate::utils::error::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Zoom used when the view is recentered on a marker.
    pub focus_zoom: u8,
    pub click_policy: ClickPolicy,
    pub content_policy: ContentPolicy,
    pub table_enabled: bool,
    /// Header labels left out of the table, matched exactly.
    pub excluded_columns: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            focus_zoom: 13,
            click_policy: ClickPolicy::default(),
            content_policy: ContentPolicy::default(),
            table_enabled: true,
            excluded_columns: DEFAULT_EXCLUDED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// A user interaction with the map or the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    MarkerPointerEnter { marker: MarkerId },
    MarkerPointerLeave { marker: MarkerId },
    MarkerClicked { marker: MarkerId },
    PopupClosed { marker: MarkerId },
    RowClicked { row: RowId },
    TogglePanel,
    MapClicked { at: LatLng },
    ViewportResized { height: f64 },
}

/// Owns the surfaces and every presenter for one rendered dataset.
pub struct AppContext<M: MapSurface, P: PageSurface> {
    map: M,
    page: P,
    options: RenderOptions,
    markers: Vec<MarkerPresenter>,
    table: Option<TablePresenter>,
}

impl<M: MapSurface, P: PageSurface> AppContext<M, P> {
    pub fn new(map: M, page: P, options: RenderOptions) -> Self {
        let table = options.table_enabled.then(TablePresenter::new);
        Self {
            map,
            page,
            options,
            markers: Vec::new(),
            table,
        }
    }

    pub fn initialize(&mut self, view: MapView, tiles: &TileLayer) {
        tracing::debug!("Initial view {} at zoom {}", view.center, view.zoom);
        self.map.set_view(view);
        self.map.add_tile_layer(tiles);
    }

    /// Places one marker per record and, in the table variant, the header
    /// and one linked row per record.
    pub fn render(&mut self, dataset: &Dataset) {
        let policy = self.options.content_policy;

        if let Some(table) = &self.table {
            table.render_header(&mut self.page, &dataset.headers, &self.options.excluded_columns);
        }

        for record in &dataset.records {
            let marker = MarkerPresenter::place(&mut self.map, record, policy);
            if let Some(table) = &mut self.table {
                table.append_row(&mut self.page, record, marker.id(), policy);
            }
            self.markers.push(marker);
        }

        tracing::info!("Rendered {} markers", self.markers.len());
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        tracing::debug!(?event, "Dispatching UI event");
        match event {
            UiEvent::MarkerPointerEnter { marker } => {
                self.marker_event(marker, PopupEvent::PointerEnter)?;
            }
            UiEvent::MarkerPointerLeave { marker } => {
                self.marker_event(marker, PopupEvent::PointerLeave)?;
            }
            UiEvent::MarkerClicked { marker } => {
                let action = self.marker_event(marker, PopupEvent::Click)?;
                // A toggle-click that closes the popup leaves the row cleared.
                if action != Some(PopupAction::Close) {
                    if let Some(table) = &mut self.table {
                        if let Some(row) = table.row_for(marker) {
                            table.highlight(&mut self.page, row);
                        }
                    }
                }
            }
            UiEvent::PopupClosed { marker } => {
                self.marker_event(marker, PopupEvent::Close)?;
                self.clear_linked_row(marker);
            }
            UiEvent::RowClicked { row } => self.row_clicked(row)?,
            UiEvent::TogglePanel => {
                if let Some(table) = &mut self.table {
                    table.toggle_panel(&mut self.page, &mut self.map);
                }
            }
            UiEvent::MapClicked { at } => {
                self.map
                    .show_popup_at(at, &format!("You clicked the map at {}", at));
            }
            UiEvent::ViewportResized { height } => {
                self.page.set_viewport_unit(height * 0.01);
            }
        }
        Ok(())
    }

    /// Routes `event` to the marker's popup. Whenever the popup ends up
    /// closed, the linked row loses its highlight.
    fn marker_event(&mut self, marker: MarkerId, event: PopupEvent) -> Result<Option<PopupAction>> {
        let presenter = self
            .markers
            .iter_mut()
            .find(|m| m.id() == marker)
            .ok_or(MapError::UnknownMarker(marker.0))?;
        let action = presenter.handle(
            &mut self.map,
            event,
            self.options.click_policy,
            self.options.focus_zoom,
        );
        if action == Some(PopupAction::Close) {
            self.clear_linked_row(marker);
        }
        Ok(action)
    }

    fn clear_linked_row(&mut self, marker: MarkerId) {
        if let Some(table) = &mut self.table {
            if let Some(row) = table.row_for(marker) {
                table.clear_highlight(&mut self.page, row);
            }
        }
    }

    fn row_clicked(&mut self, row: RowId) -> Result<()> {
        let table = self.table.as_mut().ok_or(MapError::UnknownRow(row.0))?;
        let marker = table.marker_for(row).ok_or(MapError::UnknownRow(row.0))?;
        let presenter = self
            .markers
            .iter_mut()
            .find(|m| m.id() == marker)
            .ok_or(MapError::UnknownMarker(marker.0))?;

        presenter.focus(&mut self.map, self.options.focus_zoom);
        presenter.handle(
            &mut self.map,
            PopupEvent::Reveal,
            self.options.click_policy,
            self.options.focus_zoom,
        );
        table.highlight(&mut self.page, row);
        Ok(())
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn markers(&self) -> &[MarkerPresenter] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&MarkerPresenter> {
        self.markers.iter().find(|m| m.id() == id)
    }

    pub fn table(&self) -> Option<&TablePresenter> {
        self.table.as_ref()
    }

    pub fn into_surfaces(self) -> (M, P) {
        (self.map, self.page)
    }
}
