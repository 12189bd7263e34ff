use crate::core::content::ContentPolicy;
use crate::core::popup::{ClickPolicy, PopupAction, PopupEvent, PopupMachine, PopupState};
use crate::domain::model::{LatLng, LocationRecord, MapView, MarkerId, PopupSpec};
use crate::domain::ports::MapSurface;

/// A placed marker together with its popup state.
#[derive(Debug, Clone)]
pub struct MarkerPresenter {
    id: MarkerId,
    position: LatLng,
    popup: PopupMachine,
}

impl MarkerPresenter {
    /// Adds the marker and its popup for `record` to the map.
    pub fn place<M: MapSurface>(map: &mut M, record: &LocationRecord, policy: ContentPolicy) -> Self {
        let popup = PopupSpec {
            content: popup_content(record, policy),
            auto_close: false,
            close_on_click: false,
        };
        let position = record.position();
        let id = map.add_marker(position, popup);

        Self {
            id,
            position,
            popup: PopupMachine::default(),
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn popup_state(&self) -> PopupState {
        self.popup.state()
    }

    /// Feeds one event to the popup machine and applies the result to the map.
    /// Clicks also recenter the view on the marker at `focus_zoom`.
    pub fn handle<M: MapSurface>(
        &mut self,
        map: &mut M,
        event: PopupEvent,
        policy: ClickPolicy,
        focus_zoom: u8,
    ) -> Option<PopupAction> {
        let action = self.popup.dispatch(event, policy);
        match action {
            Some(PopupAction::Open) => map.open_popup(self.id),
            Some(PopupAction::Close) => map.close_popup(self.id),
            None => {}
        }

        if event == PopupEvent::Click {
            self.focus(map, focus_zoom);
        }
        action
    }

    pub fn focus<M: MapSurface>(&self, map: &mut M, zoom: u8) {
        map.set_view(MapView {
            center: self.position,
            zoom,
        });
    }
}

/// Bold name, italic contact, then one list item per piece of equipment.
pub fn popup_content(record: &LocationRecord, policy: ContentPolicy) -> String {
    let items: String = record
        .equipment
        .iter()
        .map(|item| format!("<li>{}</li>", policy.apply(item)))
        .collect();

    format!(
        "<b>{}</b><br><i>{}</i><br><ul>{}</ul>",
        policy.apply(&record.name),
        policy.apply(&record.contact),
        items
    )
}
