mod common;

use common::{response, FakeAssistant};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use urban_overlays::DirAssetSource;
use urban_state::{
    EventLoop, LoadStatus, MapCoordinator, PromptPolicy, SessionConfig, Tab, UiEvent, ViewSnapshot,
};
use urban_types::{MessageKind, OverlayCategory, Recommendation, ScreenPoint};

async fn wait_for(
    rx: &mut watch::Receiver<ViewSnapshot>,
    condition: impl Fn(&ViewSnapshot) -> bool,
) -> ViewSnapshot {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if condition(&snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("snapshot condition not reached")
}

fn spawn(fake: FakeAssistant, config: SessionConfig) -> urban_state::CoordinatorHandle {
    EventLoop::new(MapCoordinator::new(Arc::new(fake), config)).spawn()
}

#[tokio::test]
async fn test_prompt_round_trip() {
    let fake = FakeAssistant::new().reply(Ok(response(
        "Try **Capitol Hill**.",
        vec![Recommendation::new("2").with_reasons(vec!["Transit".into()])],
    )));
    let handle = spawn(fake, SessionConfig::default());
    let mut rx = handle.subscribe();

    wait_for(&mut rx, |s| s.connected).await;

    handle.send(UiEvent::InputChanged("Where to build?".into())).await.unwrap();
    handle.send(UiEvent::PromptSubmitted).await.unwrap();

    let snapshot = wait_for(&mut rx, |s| s.messages.len() == 2 && !s.loading).await;
    assert_eq!(snapshot.messages[0].kind, MessageKind::User);
    assert_eq!(snapshot.messages[1].text, "Try **Capitol Hill**.");
    assert_eq!(snapshot.points.len(), 1);
    assert_eq!(snapshot.points[0].id, "ai-2");
    assert_eq!(snapshot.recent_prompt.as_deref(), Some("Where to build?"));
    assert_eq!(snapshot.input, "");

    handle
        .send(UiEvent::PointHovered {
            id: "ai-2".into(),
            cursor: ScreenPoint::new(100.0, 100.0),
        })
        .await
        .unwrap();
    let snapshot = wait_for(&mut rx, |s| s.popup.is_some()).await;
    let popup = snapshot.popup.unwrap();
    assert_eq!(popup.anchor, ScreenPoint::new(110.0, 90.0));
    assert_eq!(popup.reasons, vec!["Transit".to_string()]);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reject_policy_keeps_first_prompt() {
    let handle = spawn(FakeAssistant::new(), SessionConfig::default());
    let mut rx = handle.subscribe();

    handle.send(UiEvent::InputChanged("hang on".into())).await.unwrap();
    handle.send(UiEvent::PromptSubmitted).await.unwrap();
    handle.send(UiEvent::InputChanged("second".into())).await.unwrap();
    handle.send(UiEvent::PromptSubmitted).await.unwrap();

    let snapshot = wait_for(&mut rx, |s| s.input == "second").await;
    assert!(snapshot.loading);
    assert_eq!(snapshot.messages.len(), 1);
    assert_eq!(snapshot.messages[0].text, "hang on");

    handle.send(UiEvent::CancelPrompt).await.unwrap();
    let snapshot = wait_for(&mut rx, |s| !s.loading).await;
    assert_eq!(snapshot.messages.len(), 1);

    let coordinator = handle.shutdown().await.unwrap();
    assert!(!coordinator.session().is_loading());
}

#[tokio::test]
async fn test_supersede_policy_replaces_prompt() {
    let config = SessionConfig::new().with_policy(PromptPolicy::Supersede);
    let handle = spawn(FakeAssistant::new(), config);
    let mut rx = handle.subscribe();

    handle.send(UiEvent::InputChanged("hang on".into())).await.unwrap();
    handle.send(UiEvent::PromptSubmitted).await.unwrap();
    handle.send(UiEvent::InputChanged("second".into())).await.unwrap();
    handle.send(UiEvent::PromptSubmitted).await.unwrap();

    let snapshot = wait_for(&mut rx, |s| !s.loading && s.messages.len() == 3).await;
    let texts: Vec<_> = snapshot.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["hang on", "second", "echo: second"]);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_offline_and_clear_history() {
    let handle = spawn(
        FakeAssistant::offline().failing_clear(),
        SessionConfig::default(),
    );
    let mut rx = handle.subscribe();

    handle.send(UiEvent::InputChanged("hello".into())).await.unwrap();
    handle.send(UiEvent::PromptSubmitted).await.unwrap();
    wait_for(&mut rx, |s| s.messages.len() == 2).await;

    handle.send(UiEvent::ClearHistory).await.unwrap();
    let snapshot = wait_for(&mut rx, |s| s.messages.is_empty()).await;
    assert!(!snapshot.connected);

    handle.send(UiEvent::RetryConnection).await.unwrap();
    handle.send(UiEvent::TabSelected(Tab::Assistant)).await.unwrap();
    let snapshot = wait_for(&mut rx, |s| s.active_tab == Tab::Assistant).await;
    assert!(!snapshot.connected);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_assets_load_and_prompt_pick() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("sample_prompts.json"),
        json!({
            "categories": [{
                "name": "Transit",
                "prompts": ["Which neighborhoods lack transit?"]
            }]
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("seattle_population_density.json"),
        json!({"data": [{"lat": 47.61, "lng": -122.33, "size": 3000}]}).to_string(),
    )
    .unwrap();

    let fake = Arc::new(FakeAssistant::new());
    let handle = EventLoop::new(MapCoordinator::new(fake.clone(), SessionConfig::default()))
        .with_assets(Arc::new(DirAssetSource::new(dir.path())))
        .spawn();
    let mut rx = handle.subscribe();

    wait_for(&mut rx, |s| s.connected && s.catalogue == LoadStatus::Ready).await;

    handle
        .send(UiEvent::FilterToggled {
            category: OverlayCategory::PopulationDensity,
            enabled: true,
        })
        .await
        .unwrap();
    handle
        .send(UiEvent::FilterToggled {
            category: OverlayCategory::AirQuality,
            enabled: true,
        })
        .await
        .unwrap();
    let snapshot = wait_for(&mut rx, |s| {
        s.layers.len() == 2 && s.layers.iter().all(|l| l.status != LoadStatus::Loading)
    })
    .await;
    assert_eq!(snapshot.layers[0].status, LoadStatus::Ready);
    assert_eq!(snapshot.layers[0].features, 1);
    assert_eq!(snapshot.layers[1].status, LoadStatus::Unavailable);

    handle.send(UiEvent::CategorySelected(0)).await.unwrap();
    handle.send(UiEvent::PromptPicked(0)).await.unwrap();

    let snapshot = wait_for(&mut rx, |s| s.messages.len() == 2 && !s.loading).await;
    assert_eq!(snapshot.messages[1].text, "echo: Which neighborhoods lack transit?");
    assert!(snapshot.selected_category.is_none());
    assert_eq!(fake.prompts(), vec!["Which neighborhoods lack transit?"]);

    handle.shutdown().await.unwrap();
}
