use crate::core::content::ContentPolicy;
use crate::domain::model::{LocationRecord, MarkerId, RowId};
use crate::domain::ports::{MapSurface, PageSurface};
use std::collections::BTreeMap;

pub const DEFAULT_EXCLUDED_COLUMNS: [&str; 2] = ["Latitude", "Longitude"];

/// Table rows linked one-to-one with markers, plus the single highlighted row.
#[derive(Debug, Clone, Default)]
pub struct TablePresenter {
    row_to_marker: BTreeMap<RowId, MarkerId>,
    marker_to_row: BTreeMap<MarkerId, RowId>,
    highlighted: Option<RowId>,
    collapsed: bool,
}

impl TablePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the header row, leaving out columns whose text exactly matches
    /// an entry of `excluded`.
    pub fn render_header<P: PageSurface>(&self, page: &mut P, headers: &[String], excluded: &[String]) {
        let columns: Vec<String> = headers
            .iter()
            .filter(|h| !excluded.iter().any(|e| e == h.trim()))
            .cloned()
            .collect();
        page.set_table_header(&columns);
    }

    /// Appends the row for `record` and links it to `marker`.
    pub fn append_row<P: PageSurface>(
        &mut self,
        page: &mut P,
        record: &LocationRecord,
        marker: MarkerId,
        policy: ContentPolicy,
    ) -> RowId {
        let cells = [
            policy.apply(&record.name).into_owned(),
            policy.apply(&record.equipment.join(", ")).into_owned(),
            policy.apply(&record.contact).into_owned(),
        ];
        let row = page.append_table_row(&cells);
        self.row_to_marker.insert(row, marker);
        self.marker_to_row.insert(marker, row);
        row
    }

    pub fn marker_for(&self, row: RowId) -> Option<MarkerId> {
        self.row_to_marker.get(&row).copied()
    }

    pub fn row_for(&self, marker: MarkerId) -> Option<RowId> {
        self.marker_to_row.get(&marker).copied()
    }

    pub fn highlighted(&self) -> Option<RowId> {
        self.highlighted
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn len(&self) -> usize {
        self.row_to_marker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_to_marker.is_empty()
    }

    /// Clears every row, then highlights `row`.
    pub fn highlight<P: PageSurface>(&mut self, page: &mut P, row: RowId) {
        for other in self.row_to_marker.keys() {
            page.set_row_highlight(*other, false);
        }
        page.set_row_highlight(row, true);
        self.highlighted = Some(row);
    }

    pub fn clear_highlight<P: PageSurface>(&mut self, page: &mut P, row: RowId) {
        page.set_row_highlight(row, false);
        if self.highlighted == Some(row) {
            self.highlighted = None;
        }
    }

    /// Collapses or expands the panel; the map is told its container changed.
    pub fn toggle_panel<P: PageSurface, M: MapSurface>(&mut self, page: &mut P, map: &mut M) {
        self.collapsed = !self.collapsed;
        page.set_panel_collapsed(self.collapsed);
        map.invalidate_size();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scene::{SceneMap, ScenePage};

    fn record(name: &str) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            latitude: 1.0,
            longitude: 2.0,
            equipment: vec!["MRI".to_string(), "CT".to_string()],
            contact: "Dr. <X>".to_string(),
        }
    }

    fn excluded() -> Vec<String> {
        DEFAULT_EXCLUDED_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_header_drops_coordinate_columns_by_exact_text() {
        let mut page = ScenePage::new();
        let headers: Vec<String> = ["Name", "Latitude", "Longitude", "Equipment", "latitude"]
            .iter()
            .map(|h| h.to_string())
            .collect();

        TablePresenter::new().render_header(&mut page, &headers, &excluded());
        assert_eq!(page.header, vec!["Name", "Equipment", "latitude"]);
    }

    #[test]
    fn test_rows_link_both_ways_and_join_equipment() {
        let mut page = ScenePage::new();
        let mut table = TablePresenter::new();

        let row = table.append_row(&mut page, &record("A"), MarkerId(7), ContentPolicy::Escape);

        assert_eq!(table.marker_for(row), Some(MarkerId(7)));
        assert_eq!(table.row_for(MarkerId(7)), Some(row));
        assert_eq!(page.rows[0].cells, vec!["A", "MRI, CT", "Dr. &lt;X&gt;"]);
    }

    #[test]
    fn test_highlight_is_exclusive() {
        let mut page = ScenePage::new();
        let mut table = TablePresenter::new();
        let rows: Vec<RowId> = (0..3)
            .map(|i| table.append_row(&mut page, &record("R"), MarkerId(i), ContentPolicy::Raw))
            .collect();

        table.highlight(&mut page, rows[0]);
        table.highlight(&mut page, rows[2]);
        assert_eq!(page.highlighted_rows(), vec![rows[2]]);
        assert_eq!(table.highlighted(), Some(rows[2]));

        table.clear_highlight(&mut page, rows[2]);
        assert!(page.highlighted_rows().is_empty());
        assert_eq!(table.highlighted(), None);
    }

    #[test]
    fn test_toggle_panel_invalidates_map_size() {
        let mut page = ScenePage::new();
        let mut map = SceneMap::new();
        let mut table = TablePresenter::new();

        table.toggle_panel(&mut page, &mut map);
        assert!(page.panel_collapsed);
        assert_eq!(map.size_invalidations, 1);

        table.toggle_panel(&mut page, &mut map);
        assert!(!table.is_collapsed());
        assert_eq!(map.size_invalidations, 2);
    }
}
