use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use futures::channel::mpsc;
use futures::{StreamExt, stream};
use lingua_core::model::ThreadId;
use lingua_core::time::fixed_clock;
use serde_json::{Value, json};
use services::{AgentApi, AgentError, AppServices, ChunkStream, RunRequest};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::routes::{use_chat_session_provider, use_settings_provider};
use crate::views::chat::ChatTestHandles;
use crate::views::settings::SettingsTestHandles;
use crate::views::{ChatView, DashboardView, SettingsDialog};

/// Replays canned runs; every thread gets the same id.
///
/// A gated api streams whatever is pushed into its sender until the sender is
/// dropped.
#[derive(Default)]
pub struct ScriptedApi {
    runs: Mutex<VecDeque<Vec<Value>>>,
    gate: Mutex<Option<mpsc::UnboundedReceiver<Value>>>,
    runs_started: AtomicUsize,
}

impl ScriptedApi {
    pub fn replying(texts: &[&str]) -> Self {
        let run = texts.iter().map(|text| ai(text)).collect();
        Self {
            runs: Mutex::new(VecDeque::from([run])),
            ..Self::default()
        }
    }

    pub fn gated() -> (Self, mpsc::UnboundedSender<Value>) {
        let (tx, rx) = mpsc::unbounded();
        let api = Self {
            gate: Mutex::new(Some(rx)),
            ..Self::default()
        };
        (api, tx)
    }

    pub fn runs_started(&self) -> usize {
        self.runs_started.load(Ordering::SeqCst)
    }
}

pub fn ai(text: &str) -> Value {
    json!({ "data": [{ "content": text, "type": "ai" }] })
}

#[async_trait::async_trait]
impl AgentApi for ScriptedApi {
    async fn create_thread(&self) -> Result<ThreadId, AgentError> {
        Ok(ThreadId::new("thread-test"))
    }

    async fn stream_run(
        &self,
        _thread_id: &ThreadId,
        _request: RunRequest,
    ) -> Result<ChunkStream, AgentError> {
        self.runs_started.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = self.gate.lock().unwrap().take() {
            return Ok(gate.map(Ok).boxed());
        }
        let run = self.runs.lock().unwrap().pop_front().unwrap_or_default();
        Ok(stream::iter(run.into_iter().map(Ok)).boxed())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Chat,
    Settings { open: bool },
}

/// Hooks into the mounted views, filled in as they render.
#[derive(Clone, Default)]
pub(crate) struct HarnessHandles {
    pub(crate) chat: ChatTestHandles,
    pub(crate) settings: SettingsTestHandles,
    view: Rc<RefCell<Option<Signal<ViewKind>>>>,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let view = use_signal(|| props.view);
    use_context_provider(|| view);
    use_context_provider(|| props.handles.chat.clone());
    use_context_provider(|| props.handles.settings.clone());
    *props.handles.view.borrow_mut() = Some(view);
    use_settings_provider();
    use_chat_session_provider();
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<Signal<ViewKind>>();
    match view() {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Chat => rsx! { ChatView {} },
        ViewKind::Settings { open } => rsx! { SettingsDialog { open_initially: open } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: Arc<AppServices>,
    pub(crate) handles: HarnessHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn drive(&mut self) {
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    /// Swap the mounted view, unmounting the current one.
    pub fn navigate(&mut self, view: ViewKind) {
        let mut signal = (*self.handles.view.borrow()).expect("harness view registered");
        signal.set(view);
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn services_with(api: ScriptedApi) -> Arc<AppServices> {
    services_over(Arc::new(api)).await
}

pub async fn services_over(api: Arc<ScriptedApi>) -> Arc<AppServices> {
    let services = AppServices::from_parts(&Storage::in_memory(), fixed_clock(), api, "agent")
        .await
        .expect("build services");
    Arc::new(services)
}

/// Build the DOM over `services`; call after seeding state so the view
/// reads it on first render.
pub fn setup_view_harness(view: ViewKind, services: Arc<AppServices>) -> ViewHarness {
    let handles = HarnessHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&services),
            view,
            handles: handles.clone(),
        },
    );
    ViewHarness {
        dom,
        services,
        handles,
    }
}
