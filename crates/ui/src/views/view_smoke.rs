use std::sync::Arc;

use lingua_core::model::UserSettingsDraft;

use super::test_harness::{
    ScriptedApi, ViewKind, ai, services_over, services_with, setup_view_harness,
};
use crate::views::{ChatIntent, SettingsIntent};
use crate::vm::SettingsField;

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_overview() {
    let services = services_with(ScriptedApi::default()).await;
    let mut harness = setup_view_harness(ViewKind::Dashboard, services);
    harness.rebuild();
    let html = harness.render();

    for tab in ["Overview", "Concepts", "Time Analysis", "Learning Path"] {
        assert!(html.contains(tab), "missing tab {tab} in {html}");
    }
    assert!(html.contains("Performance Trend"), "missing chart in {html}");
    assert!(html.contains("Concept Mastery Overview"), "missing radar in {html}");
    assert!(html.contains("polyline"), "missing svg series in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_view_smoke_renders_transcript() {
    let services = services_with(ScriptedApi::replying(&["**Hola**", "**Hola**, Ana"])).await;
    services
        .settings()
        .save(UserSettingsDraft {
            name: "Ana".to_string(),
            native_language: "Spanish".to_string(),
            target_language: "English".to_string(),
            proficiency_level: "B2".to_string(),
        })
        .await
        .expect("save settings");
    services
        .chat()
        .send("Hola", |_| {})
        .await
        .expect("send message");

    let mut harness = setup_view_harness(ViewKind::Chat, services);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Ana"), "missing learner label in {html}");
    assert!(html.contains("Teacher"), "missing tutor label in {html}");
    assert!(
        html.contains("<strong>Hola</strong>, Ana"),
        "missing rendered reply in {html}"
    );
    assert!(!html.contains("streaming-cursor"), "reply still streaming in {html}");
    assert!(!html.contains("disabled"), "submit should be enabled in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_view_smoke_disables_submit_while_streaming() {
    let services = services_with(ScriptedApi::default()).await;
    services.chat().submit("Hola").await.expect("submit");

    let mut harness = setup_view_harness(ViewKind::Chat, services);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("streaming-cursor"), "missing cursor in {html}");
    assert!(html.contains("disabled"), "submit should be disabled in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_dialog_smoke_renders_current_values() {
    let services = services_with(ScriptedApi::default()).await;
    let mut harness = setup_view_harness(ViewKind::Settings { open: true }, services);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("User Settings"), "missing title in {html}");
    for label in ["Name", "Native Language", "Target Language", "Proficiency Level"] {
        assert!(html.contains(label), "missing {label} in {html}");
    }
    assert!(html.contains("value=\"Spanish\""), "missing target language in {html}");
    assert!(html.contains("Save") && html.contains("Cancel"), "missing actions in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_dialog_smoke_starts_closed() {
    let services = services_with(ScriptedApi::default()).await;
    let mut harness = setup_view_harness(ViewKind::Settings { open: false }, services);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Settings"), "missing open button in {html}");
    assert!(!html.contains("dialog-title"), "dialog should be closed in {html}");
    assert!(harness.services.settings().load().is_ok());
}

#[tokio::test(flavor = "current_thread")]
async fn settings_cancel_discards_the_draft() {
    let services = services_with(ScriptedApi::default()).await;
    let mut harness = setup_view_harness(ViewKind::Settings { open: true }, services);
    harness.rebuild();

    let dispatch = harness.handles.settings.dispatch();
    dispatch.call(SettingsIntent::Edit(SettingsField::Name, "Zoe".to_string()));
    harness.drive();
    assert!(harness.render().contains("value=\"Zoe\""));

    dispatch.call(SettingsIntent::Cancel);
    harness.drive();
    let html = harness.render();
    assert!(!html.contains("dialog-title"), "dialog should be closed in {html}");
    assert_eq!(harness.handles.settings.draft().read().name, "You");

    dispatch.call(SettingsIntent::Open);
    harness.drive();
    let html = harness.render();
    assert!(html.contains("value=\"You\""), "draft should be reset in {html}");
    assert!(!html.contains("Zoe"), "cancelled edit leaked into {html}");
    assert_eq!(harness.services.settings().load().unwrap().name(), "You");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_blank_field_blocks_save() {
    let services = services_with(ScriptedApi::default()).await;
    let mut harness = setup_view_harness(ViewKind::Settings { open: true }, services);
    harness.rebuild();

    let dispatch = harness.handles.settings.dispatch();
    dispatch.call(SettingsIntent::Edit(SettingsField::TargetLanguage, "  ".to_string()));
    dispatch.call(SettingsIntent::Save);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("dialog-title"), "dialog should stay open in {html}");
    assert!(html.contains("target language cannot be empty"), "missing error in {html}");
    assert_eq!(
        harness.services.settings().load().unwrap().target_language(),
        "Spanish"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn settings_save_replaces_profile_and_closes() {
    let services = services_with(ScriptedApi::default()).await;
    let mut harness = setup_view_harness(ViewKind::Settings { open: true }, services);
    harness.rebuild();

    let dispatch = harness.handles.settings.dispatch();
    dispatch.call(SettingsIntent::Edit(SettingsField::Name, " Ana ".to_string()));
    dispatch.call(SettingsIntent::Save);
    harness.drive_async().await;

    let html = harness.render();
    assert!(!html.contains("dialog-title"), "dialog should be closed in {html}");
    assert_eq!(harness.services.settings().load().unwrap().name(), " Ana ");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_blank_submit_shows_inline_error() {
    let api = Arc::new(ScriptedApi::default());
    let services = services_over(Arc::clone(&api)).await;
    let mut harness = setup_view_harness(ViewKind::Chat, services);
    harness.rebuild();

    let dispatch = harness.handles.chat.dispatch();
    dispatch.call(ChatIntent::Edit("   ".to_string()));
    dispatch.call(ChatIntent::Submit);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Message cannot be empty"), "missing error in {html}");
    assert!(harness.services.store().messages().unwrap().is_empty());
    assert_eq!(api.runs_started(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn chat_submit_streams_reply_into_view() {
    let services = services_with(ScriptedApi::replying(&["Ho", "Hola"])).await;
    let mut harness = setup_view_harness(ViewKind::Chat, services);
    harness.rebuild();

    let dispatch = harness.handles.chat.dispatch();
    dispatch.call(ChatIntent::Edit("Hi".to_string()));
    dispatch.call(ChatIntent::Submit);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Hola"), "missing reply in {html}");
    assert!(!html.contains("streaming-cursor"), "reply still streaming in {html}");
    assert!(!html.contains("disabled"), "submit should be enabled in {html}");
    assert!(!html.contains("value=\"Hi\""), "draft should be cleared in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_reply_keeps_streaming_after_leaving_chat() {
    let (api, gate) = ScriptedApi::gated();
    let services = services_with(api).await;
    let mut harness = setup_view_harness(ViewKind::Chat, services);
    harness.rebuild();

    let dispatch = harness.handles.chat.dispatch();
    dispatch.call(ChatIntent::Edit("Hola".to_string()));
    dispatch.call(ChatIntent::Submit);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("streaming-cursor"), "missing cursor in {html}");
    assert!(html.contains("disabled"), "submit should be disabled in {html}");

    harness.navigate(ViewKind::Dashboard);
    gate.unbounded_send(ai("¡Hola, Ana!")).unwrap();
    drop(gate);
    harness.drive_async().await;

    let messages = harness.services.store().messages().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content(), "¡Hola, Ana!");
    assert!(!messages[1].is_streaming());

    harness.navigate(ViewKind::Chat);
    let html = harness.render();
    assert!(html.contains("¡Hola, Ana!"), "missing finished reply in {html}");
    assert!(!html.contains("disabled"), "submit should be enabled in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_rapid_double_submit_sends_once() {
    let (api, gate) = ScriptedApi::gated();
    let api = Arc::new(api);
    let services = services_over(Arc::clone(&api)).await;
    let mut harness = setup_view_harness(ViewKind::Chat, services);
    harness.rebuild();

    let dispatch = harness.handles.chat.dispatch();
    dispatch.call(ChatIntent::Edit("uno".to_string()));
    dispatch.call(ChatIntent::Submit);
    dispatch.call(ChatIntent::Edit("dos".to_string()));
    dispatch.call(ChatIntent::Submit);
    harness.drive_async().await;

    assert_eq!(harness.services.store().messages().unwrap().len(), 2);
    assert_eq!(api.runs_started(), 1);

    drop(gate);
    harness.drive_async().await;
    let messages = harness.services.store().messages().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content(), "uno");
    assert!(!messages[1].is_streaming());
}
