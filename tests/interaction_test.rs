use facility_map::core::content::ContentPolicy;
use facility_map::core::loader::parse_dataset;
use facility_map::core::popup::{ClickPolicy, PopupState};
use facility_map::core::{LatLng, MarkerId, RowId};
use facility_map::{AppContext, MapError, RenderOptions, SceneMap, ScenePage, UiEvent};

const DATASET: &str = "Name,Latitude,Longitude,Equipment,Contact
North,55.0,-2.0,MRI,Dr. A
Middle,53.0,-2.5,CT,Dr. B
South,51.0,-1.0,\"<img src=x>\",Dr. C
";

fn rendered(options: RenderOptions) -> AppContext<SceneMap, ScenePage> {
    let mut ctx = AppContext::new(SceneMap::new(), ScenePage::new(), options);
    ctx.render(&parse_dataset(DATASET).unwrap());
    ctx
}

fn click_marker(ctx: &mut AppContext<SceneMap, ScenePage>, id: usize) {
    ctx.dispatch(UiEvent::MarkerClicked {
        marker: MarkerId(id),
    })
    .unwrap();
}

fn popup_open(ctx: &AppContext<SceneMap, ScenePage>, id: usize) -> bool {
    ctx.map().marker(MarkerId(id)).unwrap().popup_open
}

#[test]
fn test_hover_opens_and_leave_closes_unpinned_popup() {
    let mut ctx = rendered(RenderOptions::default());

    ctx.dispatch(UiEvent::MarkerPointerEnter { marker: MarkerId(0) })
        .unwrap();
    assert!(popup_open(&ctx, 0));

    ctx.dispatch(UiEvent::MarkerPointerLeave { marker: MarkerId(0) })
        .unwrap();
    assert!(!popup_open(&ctx, 0));
    assert!(ctx.map().view.is_none());
}

#[test]
fn test_click_pins_popup_and_recenters() {
    let mut ctx = rendered(RenderOptions::default());

    click_marker(&mut ctx, 1);
    ctx.dispatch(UiEvent::MarkerPointerLeave { marker: MarkerId(1) })
        .unwrap();

    assert!(popup_open(&ctx, 1));
    assert_eq!(
        ctx.marker(MarkerId(1)).unwrap().popup_state(),
        PopupState::Pinned
    );
    let view = ctx.map().view.as_ref().unwrap();
    assert_eq!(view.zoom, 13);
    assert_eq!(view.center, LatLng::new(53.0, -2.5));
}

#[test]
fn test_close_control_unpins() {
    let mut ctx = rendered(RenderOptions::default());

    click_marker(&mut ctx, 0);
    ctx.dispatch(UiEvent::PopupClosed { marker: MarkerId(0) })
        .unwrap();
    assert!(!popup_open(&ctx, 0));
    assert_eq!(
        ctx.marker(MarkerId(0)).unwrap().popup_state(),
        PopupState::Closed
    );

    ctx.dispatch(UiEvent::MarkerPointerEnter { marker: MarkerId(0) })
        .unwrap();
    ctx.dispatch(UiEvent::MarkerPointerLeave { marker: MarkerId(0) })
        .unwrap();
    assert!(!popup_open(&ctx, 0));
}

#[test]
fn test_toggle_and_always_pin_policies() {
    let mut toggle = rendered(RenderOptions::default());
    click_marker(&mut toggle, 2);
    click_marker(&mut toggle, 2);
    assert!(!popup_open(&toggle, 2));

    let mut always = rendered(RenderOptions {
        click_policy: ClickPolicy::AlwaysPin,
        ..RenderOptions::default()
    });
    click_marker(&mut always, 2);
    click_marker(&mut always, 2);
    assert!(popup_open(&always, 2));
}

#[test]
fn test_row_highlight_follows_last_row_or_marker_click() {
    let mut ctx = rendered(RenderOptions::default());

    ctx.dispatch(UiEvent::RowClicked { row: RowId(0) }).unwrap();
    assert_eq!(ctx.page().highlighted_rows(), vec![RowId(0)]);
    assert!(popup_open(&ctx, 0));
    assert_eq!(ctx.map().view.as_ref().unwrap().center, LatLng::new(55.0, -2.0));

    ctx.dispatch(UiEvent::RowClicked { row: RowId(2) }).unwrap();
    assert_eq!(ctx.page().highlighted_rows(), vec![RowId(2)]);

    click_marker(&mut ctx, 1);
    assert_eq!(ctx.page().highlighted_rows(), vec![RowId(1)]);
    assert_eq!(ctx.table().unwrap().highlighted(), Some(RowId(1)));
}

#[test]
fn test_popup_close_clears_linked_row() {
    let mut ctx = rendered(RenderOptions::default());

    ctx.dispatch(UiEvent::RowClicked { row: RowId(1) }).unwrap();
    ctx.dispatch(UiEvent::PopupClosed { marker: MarkerId(1) })
        .unwrap();

    assert!(ctx.page().highlighted_rows().is_empty());
}

#[test]
fn test_every_popup_close_clears_linked_row() {
    let mut ctx = rendered(RenderOptions::default());

    ctx.dispatch(UiEvent::RowClicked { row: RowId(0) }).unwrap();
    click_marker(&mut ctx, 0);
    assert!(!popup_open(&ctx, 0));
    assert!(ctx.page().highlighted_rows().is_empty());
    assert_eq!(ctx.table().unwrap().highlighted(), None);

    ctx.dispatch(UiEvent::MarkerPointerEnter { marker: MarkerId(0) })
        .unwrap();
    ctx.dispatch(UiEvent::MarkerPointerLeave { marker: MarkerId(0) })
        .unwrap();
    assert!(ctx.map().open_popups().is_empty());
    assert!(ctx.page().highlighted_rows().is_empty());
}

#[test]
fn test_hover_close_keeps_other_rows_highlight() {
    let mut ctx = rendered(RenderOptions::default());

    ctx.dispatch(UiEvent::RowClicked { row: RowId(1) }).unwrap();
    ctx.dispatch(UiEvent::MarkerPointerEnter { marker: MarkerId(2) })
        .unwrap();
    ctx.dispatch(UiEvent::MarkerPointerLeave { marker: MarkerId(2) })
        .unwrap();

    assert_eq!(ctx.page().highlighted_rows(), vec![RowId(1)]);
}

#[test]
fn test_toggle_panel_recalculates_map_layout() {
    let mut ctx = rendered(RenderOptions::default());

    ctx.dispatch(UiEvent::TogglePanel).unwrap();
    assert!(ctx.page().panel_collapsed);
    assert_eq!(ctx.map().size_invalidations, 1);
}

#[test]
fn test_map_click_and_viewport_resize() {
    let mut ctx = rendered(RenderOptions::default());

    ctx.dispatch(UiEvent::MapClicked {
        at: LatLng::new(52.25, -1.5),
    })
    .unwrap();
    let popup = ctx.map().standalone_popup.as_ref().unwrap();
    assert_eq!(popup.content, "You clicked the map at LatLng(52.25, -1.5)");

    ctx.dispatch(UiEvent::ViewportResized { height: 800.0 })
        .unwrap();
    assert_eq!(ctx.page().viewport_unit_px, Some(8.0));
}

#[test]
fn test_content_policy_controls_escaping() {
    let escaped = rendered(RenderOptions::default());
    let popup = &escaped.map().marker(MarkerId(2)).unwrap().popup.content;
    assert!(popup.contains("<li>&lt;img src=x&gt;</li>"));

    let raw = rendered(RenderOptions {
        content_policy: ContentPolicy::Raw,
        ..RenderOptions::default()
    });
    let popup = &raw.map().marker(MarkerId(2)).unwrap().popup.content;
    assert!(popup.contains("<li><img src=x></li>"));
}

#[test]
fn test_unknown_ids_are_errors() {
    let mut ctx = rendered(RenderOptions::default());

    assert!(matches!(
        ctx.dispatch(UiEvent::MarkerClicked { marker: MarkerId(99) }),
        Err(MapError::UnknownMarker(99))
    ));
    assert!(matches!(
        ctx.dispatch(UiEvent::RowClicked { row: RowId(42) }),
        Err(MapError::UnknownRow(42))
    ));
}

#[test]
fn test_events_deserialize_from_script() {
    let script = r#"[
        {"type": "marker_clicked", "marker": 0},
        {"type": "row_clicked", "row": 2},
        {"type": "toggle_panel"},
        {"type": "map_clicked", "at": {"lat": 1.0, "lng": 2.0}}
    ]"#;

    let events: Vec<UiEvent> = serde_json::from_str(script).unwrap();
    assert_eq!(events[0], UiEvent::MarkerClicked { marker: MarkerId(0) });
    assert_eq!(events[2], UiEvent::TogglePanel);

    let mut ctx = rendered(RenderOptions::default());
    for event in events {
        ctx.dispatch(event).unwrap();
    }
    assert_eq!(ctx.page().highlighted_rows(), vec![RowId(2)]);
}
