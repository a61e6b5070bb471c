use dioxus::prelude::*;
use lingua_core::model::{UserSettings, UserSettingsDraft};

use crate::context::AppContext;
use crate::views::{SaveState, ViewError};
use crate::vm::{SettingsField, field_error};

/// What the settings dialog can ask for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsIntent {
    Open,
    Edit(SettingsField, String),
    Save,
    Cancel,
}

/// Profile editor opened from the sidebar.
///
/// Edits live in a local draft until Save; Cancel or closing drops them.
#[component]
pub fn SettingsDialog(#[props(default)] open_initially: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let mut settings = use_context::<Signal<UserSettings>>();
    let service = ctx.settings();

    let mut open = use_signal(|| open_initially);
    let mut draft = use_signal(|| UserSettingsDraft::from_settings(&settings.read()));
    let mut show_errors = use_signal(|| false);
    let mut save_state = use_signal(|| SaveState::Idle);

    let dispatch = use_callback(move |intent: SettingsIntent| match intent {
        SettingsIntent::Open => {
            let current = service
                .load()
                .unwrap_or_else(|_| settings.peek().clone());
            draft.set(UserSettingsDraft::from_settings(&current));
            show_errors.set(false);
            save_state.set(SaveState::Idle);
            open.set(true);
        }
        SettingsIntent::Edit(field, value) => {
            draft.with_mut(|current| field.set(current, value));
        }
        SettingsIntent::Save => {
            if !draft.peek().errors().is_empty() {
                show_errors.set(true);
                return;
            }
            let service = service.clone();
            let value = draft.peek().clone();
            save_state.set(SaveState::Saving);
            spawn(async move {
                match service.save(value).await {
                    Ok(saved) => {
                        settings.set(saved);
                        save_state.set(SaveState::Idle);
                        open.set(false);
                    }
                    Err(err) => save_state.set(SaveState::Error(ViewError::from(err))),
                }
            });
        }
        SettingsIntent::Cancel => {
            draft.set(UserSettingsDraft::from_settings(&settings.peek()));
            show_errors.set(false);
            open.set(false);
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SettingsTestHandles>() {
                handles.register(dispatch, draft);
            }
        }
    }

    let saving = save_state() == SaveState::Saving;
    let inputs: Vec<(SettingsField, String, Option<String>)> = {
        let current = draft.read();
        SettingsField::ALL
            .into_iter()
            .map(|field| {
                let error = if show_errors() {
                    field_error(&current, field)
                } else {
                    None
                };
                (field, field.value(&current).to_string(), error)
            })
            .collect()
    };

    rsx! {
        button {
            class: "btn btn-icon",
            title: "User Settings",
            onclick: move |_| dispatch.call(SettingsIntent::Open),
            "Settings"
        }

        if open() {
            div {
                class: "dialog-backdrop",
                onclick: move |_| dispatch.call(SettingsIntent::Cancel),
                div {
                    class: "dialog",
                    role: "dialog",
                    onclick: move |evt| evt.stop_propagation(),
                    h2 { class: "dialog-title", "User Settings" }

                    for (field, value, error) in inputs {
                        SettingsInput {
                            key: "{field.id()}",
                            field,
                            value,
                            error,
                            on_edit: move |value| dispatch.call(SettingsIntent::Edit(field, value)),
                        }
                    }

                    if let SaveState::Error(err) = save_state() {
                        p { class: "field-error", "{err.message()}" }
                    }

                    div { class: "dialog-footer",
                        button {
                            class: "btn",
                            onclick: move |_| dispatch.call(SettingsIntent::Cancel),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-primary",
                            disabled: saving,
                            onclick: move |_| dispatch.call(SettingsIntent::Save),
                            "Save"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SettingsInput(
    field: SettingsField,
    value: String,
    error: Option<String>,
    on_edit: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "field",
            label { r#for: field.id(), "{field.label()}" }
            input {
                id: field.id(),
                r#type: "text",
                value: "{value}",
                oninput: move |evt| on_edit.call(evt.value()),
            }
            if let Some(message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SettingsTestHandles {
    dispatch: std::rc::Rc<std::cell::RefCell<Option<Callback<SettingsIntent>>>>,
    draft: std::rc::Rc<std::cell::RefCell<Option<Signal<UserSettingsDraft>>>>,
}

#[cfg(test)]
impl SettingsTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<SettingsIntent>,
        draft: Signal<UserSettingsDraft>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.draft.borrow_mut() = Some(draft);
    }

    pub(crate) fn dispatch(&self) -> Callback<SettingsIntent> {
        (*self.dispatch.borrow()).expect("settings dispatch registered")
    }

    pub(crate) fn draft(&self) -> Signal<UserSettingsDraft> {
        (*self.draft.borrow()).expect("settings draft registered")
    }
}
