mod common;

use common::{response, FakeAssistant};
use std::sync::Arc;
use urban_assistant::AssistantError;
use urban_overlays::{AssetState, PromptCatalogue, PromptCategory};
use urban_state::{
    AssistantPane, MapCoordinator, PromptPolicy, SessionConfig, SessionError, StateError, Tab,
};
use urban_types::{
    resolve_neighborhood, LatLon, MessageKind, NeighborhoodId, PointOfInterest, Recommendation,
    DEFAULT_NEIGHBORHOOD_CENTER,
};

fn coordinator(fake: FakeAssistant) -> MapCoordinator {
    MapCoordinator::new(Arc::new(fake), SessionConfig::default()).with_points(vec![
        PointOfInterest::new(
            "space-needle",
            LatLon::new(47.6205, -122.3493),
            "Space Needle",
            "Observation tower",
        ),
    ])
}

fn catalogue() -> AssetState<PromptCatalogue> {
    AssetState::Ready(PromptCatalogue {
        categories: vec![PromptCategory {
            name: "Housing".into(),
            description: "Residential development".into(),
            prompts: vec!["Where should I develop 200 houses?".into()],
        }],
    })
}

#[tokio::test]
async fn test_recommendations_replace_store() {
    let recs = vec![
        Recommendation::new("4").with_score(4.2).with_density(5123.7),
        Recommendation::new("11").with_advice("Mid-rise near transit"),
        Recommendation::new("999"),
    ];
    let fake = FakeAssistant::new().reply(Ok(response("Here are three areas.", recs)));
    let mut map = coordinator(fake);

    let installed = map.send_prompt("Where should I build?").await.unwrap();

    assert_eq!(installed, 3);
    let points = map.store().points();
    assert_eq!(points.len(), 3);
    assert!(points.iter().all(|p| p.is_ai_recommendation));
    assert!(map.store().get("space-needle").is_none());

    let four = map.store().get("ai-4").unwrap();
    assert_eq!(four.center, resolve_neighborhood(&NeighborhoodId::new("4")));
    assert_eq!(four.density_label().as_deref(), Some("5124 people/km²"));
    assert_eq!(map.store().get("ai-11").unwrap().description, "Mid-rise near transit");
    assert_eq!(map.store().get("ai-999").unwrap().center, DEFAULT_NEIGHBORHOOD_CENTER);

    assert_eq!(map.store().recommendation_log().len(), 3);
    assert!(!map.session().is_loading());

    let last = map.session().history().last().unwrap();
    assert_eq!(last.kind, MessageKind::Assistant);
    assert_eq!(last.confidence_percent(), Some(87));
}

#[tokio::test]
async fn test_empty_recommendations_keep_store() {
    let fake = FakeAssistant::new().reply(Ok(response("Hello!", vec![])));
    let mut map = coordinator(fake);

    assert_eq!(map.send_prompt("hi").await.unwrap(), 0);

    assert!(map.store().get("space-needle").is_some());
    assert_eq!(map.session().history().len(), 2);
}

#[tokio::test]
async fn test_failed_prompt_appends_error() {
    let fake = FakeAssistant::new().reply(Err(AssistantError::Unreachable("refused".into())));
    let mut map = coordinator(fake);

    map.send_prompt("hi").await.unwrap();

    let history = map.session().history();
    assert_eq!(history.count_of(MessageKind::User), 1);
    assert_eq!(history.last().unwrap().kind, MessageKind::Error);
    assert!(history.last().unwrap().text.contains("can't reach"));
    assert!(map.store().get("space-needle").is_some());
    assert!(!map.session().is_loading());
}

#[tokio::test]
async fn test_blank_prompt_does_nothing() {
    let fake = Arc::new(FakeAssistant::new());
    let mut map = MapCoordinator::new(fake.clone(), SessionConfig::default());

    let err = map.send_prompt("  ").await.unwrap_err();

    assert_eq!(err, SessionError::EmptyPrompt);
    assert!(map.session().history().is_empty());
    assert!(fake.prompts().is_empty());
}

#[tokio::test]
async fn test_history_is_capped() {
    let mut map = coordinator(FakeAssistant::new());

    for i in 0..30 {
        map.send_prompt(&format!("question {}", i)).await.unwrap();
    }

    let history = map.session().history();
    assert_eq!(history.len(), 50);
    // 60 messages were appended, the first ten were dropped
    assert_eq!(history.iter().next().unwrap().text, "question 5");
}

#[tokio::test]
async fn test_clear_history_clears_locally_even_on_failure() {
    for fake in [FakeAssistant::new(), FakeAssistant::new().failing_clear()] {
        let mut map = coordinator(fake);
        map.send_prompt("hi").await.unwrap();

        map.clear_history().await;

        assert!(map.session().history().is_empty());
    }
}

#[tokio::test]
async fn test_check_connection() {
    let mut online = coordinator(FakeAssistant::new());
    assert!(online.check_connection().await);

    let mut offline = coordinator(FakeAssistant::offline());
    assert!(!offline.check_connection().await);
    assert!(offline.session().history().is_empty());
}

#[tokio::test]
async fn test_focus_survives_bulk_replace() {
    let fake = FakeAssistant::new().reply(Ok(response("ok", vec![Recommendation::new("2")])));
    let mut map = coordinator(fake);

    map.focus_point("space-needle", Some(700.0)).unwrap();
    map.send_prompt("anything").await.unwrap();

    let focus = map.focus().focused().unwrap();
    assert_eq!(focus.point.title, "Space Needle");
    assert!(map.store().get("space-needle").is_none());
    assert_eq!(map.focus().panel_width(), 676);
}

#[test]
fn test_unknown_focus_is_a_no_op() {
    let mut map = coordinator(FakeAssistant::new());

    let err = map.focus_point("nowhere", Some(10.0)).unwrap_err();

    assert_eq!(err, StateError::PointNotFound("nowhere".into()));
    assert!(!map.focus().is_panel_open());
}

#[tokio::test]
async fn test_reset_ai_recommendations() {
    let fake = FakeAssistant::new().reply(Ok(response(
        "ok",
        vec![Recommendation::new("7"), Recommendation::new("8")],
    )));
    let mut map = coordinator(fake);
    map.send_prompt("anything").await.unwrap();
    map.focus_point("ai-7", None).unwrap();

    map.reset_ai_recommendations();

    assert!(map.store().is_empty());
    assert!(map.store().recommendation_log().is_empty());
    assert!(!map.focus().is_panel_open());
}

#[test]
fn test_reset_keeps_manual_focus() {
    let mut map = coordinator(FakeAssistant::new());
    map.focus_point("space-needle", None).unwrap();

    map.reset_ai_recommendations();

    assert!(map.focus().is_panel_open());
    assert!(map.store().get("space-needle").is_some());
}

#[tokio::test]
async fn test_activate_recommendation() {
    let fake = FakeAssistant::new().reply(Ok(response("ok", vec![Recommendation::new("15")])));
    let mut map = coordinator(fake);
    map.select_tab(Tab::Assistant);
    map.send_prompt("anything").await.unwrap();

    map.activate_recommendation("ai-15").unwrap();

    assert_eq!(map.focus().focused().unwrap().point.id, "ai-15");
    assert_eq!(map.focus().panel_width(), 420);
    assert_eq!(map.tabs().active(), Tab::None);

    assert!(map.activate_recommendation("ai-3").is_err());
    assert_eq!(map.focus().focused().unwrap().point.id, "ai-15");
}

#[tokio::test]
async fn test_activate_recommendation_without_neighborhood_id() {
    let mut unnamed = Recommendation::new("");
    unnamed.neighborhood_id = None;
    let recs = vec![Recommendation::new("15"), unnamed];
    let fake = FakeAssistant::new().reply(Ok(response("ok", recs.clone())));
    let mut map = coordinator(fake);
    map.send_prompt("anything").await.unwrap();

    let point_id = recs[1].point_id(1);
    assert_eq!(point_id, "ai-1");
    map.activate_recommendation(&point_id).unwrap();

    let focused = &map.focus().focused().unwrap().point;
    assert_eq!(focused.id, "ai-1");
    assert_eq!(focused.center, DEFAULT_NEIGHBORHOOD_CENTER);
}

#[tokio::test]
async fn test_pick_prompt_submits_when_connected() {
    let fake = Arc::new(FakeAssistant::new());
    let mut map = MapCoordinator::new(fake.clone(), SessionConfig::default());
    map.set_catalogue(catalogue());
    map.check_connection().await;

    map.select_category(0).unwrap();
    let ticket = map.pick_prompt(0).unwrap().unwrap();

    assert_eq!(ticket.message, "Where should I develop 200 houses?");
    assert_eq!(map.tabs().pane(), AssistantPane::Chat);
    assert!(map.prompts().selected_category().is_none());
    assert!(map.session().is_loading());

    let outcome = ticket.dispatch(map.client()).await;
    map.apply_chat_outcome(outcome);
    assert_eq!(fake.prompts(), vec!["Where should I develop 200 houses?"]);
    assert_eq!(map.session().recent_prompt(), Some("Where should I develop 200 houses?"));
}

#[test]
fn test_pick_prompt_fills_input_when_offline() {
    let mut map = MapCoordinator::new(Arc::new(FakeAssistant::offline()), SessionConfig::default());
    map.set_catalogue(catalogue());

    map.select_category(0).unwrap();
    assert!(map.pick_prompt(0).unwrap().is_none());

    assert_eq!(map.session().input(), "Where should I develop 200 houses?");
    assert!(!map.session().is_loading());
}

#[tokio::test]
async fn test_supersede_cancels_in_flight_prompt() {
    let config = SessionConfig::new().with_policy(PromptPolicy::Supersede);
    let fake = Arc::new(FakeAssistant::new());
    let mut map = MapCoordinator::new(fake.clone(), config);

    let first = map.begin_prompt("hang forever").unwrap();
    let pending = tokio::spawn(first.dispatch(map.client()));
    let second = map.begin_prompt("second").unwrap();

    let stale = pending.await.unwrap();
    assert!(matches!(stale.result, Err(AssistantError::Cancelled)));
    assert_eq!(map.apply_chat_outcome(stale), 0);
    assert!(map.session().is_loading());

    let outcome = second.dispatch(map.client()).await;
    map.apply_chat_outcome(outcome);

    let texts: Vec<_> = map.session().history().iter().map(|m| m.text.clone()).collect();
    assert_eq!(texts, vec!["hang forever", "second", "echo: second"]);
}

#[test]
fn test_filters_and_tabs_through_snapshot() {
    let mut map = coordinator(FakeAssistant::new());
    map.set_filter(urban_types::OverlayCategory::PopulationDensity, true);
    map.set_filter(urban_types::OverlayCategory::WaterQuality, true);
    map.select_tab(Tab::Filters);

    let snapshot = map.snapshot();

    assert_eq!(snapshot.active_tab, Tab::None);
    assert_eq!(snapshot.filters.iter().filter(|f| f.enabled).count(), 2);
    assert_eq!(snapshot.layers.len(), 1);
    assert_eq!(snapshot.layers[0].features, 0);
    assert_eq!(snapshot.points.len(), 1);
    assert!(snapshot.ai_points.is_empty());
    assert!(snapshot.recommendation_log.is_empty());
}

#[tokio::test]
async fn test_snapshot_lists_ai_points_and_full_log() {
    let fake = FakeAssistant::new()
        .reply(Ok(response("first", vec![Recommendation::new("4"), Recommendation::new("7")])))
        .reply(Ok(response("second", vec![Recommendation::new("4")])));
    let mut map = coordinator(fake);

    let snapshot = map.snapshot();
    assert_eq!(snapshot.points.len(), 1);
    assert!(snapshot.ai_points.is_empty());

    map.send_prompt("one").await.unwrap();
    map.send_prompt("two").await.unwrap();

    let snapshot = map.snapshot();
    let ids: Vec<&str> = snapshot.ai_points.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["ai-4"]);
    assert_eq!(snapshot.recommendation_log.len(), 3);

    map.reset_ai_recommendations();
    let snapshot = map.snapshot();
    assert!(snapshot.ai_points.is_empty());
    assert!(snapshot.recommendation_log.is_empty());
}
