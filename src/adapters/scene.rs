//! In-memory surfaces that record what the map and page were told to show.

use crate::domain::model::{LatLng, MapView, MarkerId, PopupSpec, RowId, TileLayer};
use crate::domain::ports::{MapSurface, PageSurface};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneMarker {
    pub id: MarkerId,
    pub position: LatLng,
    pub popup: PopupSpec,
    pub popup_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePopup {
    pub position: LatLng,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SceneMap {
    pub view: Option<MapView>,
    pub tile_layers: Vec<TileLayer>,
    pub markers: Vec<SceneMarker>,
    pub standalone_popup: Option<ScenePopup>,
    pub size_invalidations: usize,
}

impl SceneMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&SceneMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn open_popups(&self) -> Vec<MarkerId> {
        self.markers.iter().filter(|m| m.popup_open).map(|m| m.id).collect()
    }

    fn marker_mut(&mut self, id: MarkerId) -> Option<&mut SceneMarker> {
        self.markers.iter_mut().find(|m| m.id == id)
    }
}

impl MapSurface for SceneMap {
    fn set_view(&mut self, view: MapView) {
        self.view = Some(view);
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.tile_layers.push(layer.clone());
    }

    fn add_marker(&mut self, position: LatLng, popup: PopupSpec) -> MarkerId {
        let id = MarkerId(self.markers.len());
        self.markers.push(SceneMarker {
            id,
            position,
            popup,
            popup_open: false,
        });
        id
    }

    fn open_popup(&mut self, marker: MarkerId) {
        if let Some(m) = self.marker_mut(marker) {
            m.popup_open = true;
        }
    }

    fn close_popup(&mut self, marker: MarkerId) {
        if let Some(m) = self.marker_mut(marker) {
            m.popup_open = false;
        }
    }

    fn show_popup_at(&mut self, position: LatLng, content: &str) {
        self.standalone_popup = Some(ScenePopup {
            position,
            content: content.to_string(),
        });
    }

    fn invalidate_size(&mut self) {
        self.size_invalidations += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneRow {
    pub id: RowId,
    pub cells: Vec<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenePage {
    pub header: Vec<String>,
    pub rows: Vec<SceneRow>,
    pub panel_collapsed: bool,
    pub viewport_unit_px: Option<f64>,
}

impl ScenePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted_rows(&self) -> Vec<RowId> {
        self.rows.iter().filter(|r| r.highlighted).map(|r| r.id).collect()
    }
}

impl PageSurface for ScenePage {
    fn set_table_header(&mut self, columns: &[String]) {
        self.header = columns.to_vec();
    }

    fn append_table_row(&mut self, cells: &[String]) -> RowId {
        let id = RowId(self.rows.len());
        self.rows.push(SceneRow {
            id,
            cells: cells.to_vec(),
            highlighted: false,
        });
        id
    }

    fn set_row_highlight(&mut self, row: RowId, highlighted: bool) {
        if let Some(r) = self.rows.iter_mut().find(|r| r.id == row) {
            r.highlighted = highlighted;
        }
    }

    fn set_panel_collapsed(&mut self, collapsed: bool) {
        self.panel_collapsed = collapsed;
    }

    fn set_viewport_unit(&mut self, px: f64) {
        self.viewport_unit_px = Some(px);
    }
}

/// Both surfaces, as written to `scene.json`.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot<'a> {
    pub map: &'a SceneMap,
    pub page: &'a ScenePage,
}
