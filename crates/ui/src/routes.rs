use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use lingua_core::model::{Transcript, UserSettings};

use crate::context::AppContext;
use crate::views::{ChatSession, ChatView, DashboardView, SettingsDialog};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/chat", ChatView)] Chat {},
}

/// Share the current profile with every view under the layout.
pub fn use_settings_provider() -> Signal<UserSettings> {
    let ctx = use_context::<AppContext>();
    let settings = use_signal(move || {
        ctx.settings().load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not read settings");
            UserSettings::default()
        })
    });
    use_context_provider(|| settings)
}

/// Mirror the stored transcript for the chat; lives as long as the layout.
pub fn use_chat_session_provider() -> ChatSession {
    let ctx = use_context::<AppContext>();
    let transcript = use_signal(move || {
        ctx.store()
            .snapshot()
            .map(|state| state.transcript)
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "could not read transcript");
                Transcript::default()
            })
    });
    let in_flight = use_signal(|| false);
    let error = use_signal(|| None);
    use_context_provider(|| ChatSession::new(transcript, in_flight, error))
}

#[component]
fn Layout() -> Element {
    use_settings_provider();
    use_chat_session_provider();

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Lingua" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Chat {}, "Chat" } }
            }
            SettingsDialog {}
        }
    }
}
