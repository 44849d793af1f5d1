use api::types::PasswordChange;
use dioxus::prelude::*;

use super::{ErrorBanner, SignInPrompt};
use crate::core::auth::session;
use crate::core::client::{api_client, error_banner};
use crate::core::hooks::{use_auth, use_request_scope};
use crate::forms::{validate_password_change, Field, FieldErrors, PasswordChangeForm};
use crate::routes;
use crate::t;

#[component]
pub fn Settings() -> Element {
    let auth = use_auth();
    let scope = use_request_scope();
    let mut form = use_signal(PasswordChangeForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut banner = use_signal(|| None::<Result<String, String>>);
    let mut submitting = use_signal(|| false);

    // Refresh the cached profile once per visit.
    {
        let scope = scope.clone();
        use_effect(move || {
            if !auth.peek().is_authenticated {
                return;
            }
            let scope = scope.clone();
            spawn(async move {
                let client = api_client();
                match scope.run(client.me()).await {
                    Ok(profile) => session().update_profile(profile),
                    // Only the expired-session side effect matters here.
                    Err(err) => {
                        error_banner(&err);
                    }
                }
            });
        });
    }

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let current = form();
        let found = validate_password_change(&current);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        submitting.set(true);
        banner.set(None);
        let scope = scope.clone();
        spawn(async move {
            let request = PasswordChange {
                current_password: current.current,
                new_password: current.new_password,
            };
            let client = api_client();
            match scope.run(client.change_password(&request)).await {
                Ok(_) => {
                    form.set(PasswordChangeForm::default());
                    banner.set(Some(Ok(t!("settings-password-changed"))));
                }
                Err(err) => {
                    if let Some(message) = error_banner(&err) {
                        banner.set(Some(Err(message)));
                    }
                }
            }
            submitting.set(false);
        });
    };

    let on_logout = move |_| {
        session().logout();
        navigator().push(routes::HOME);
    };

    if !auth().is_authenticated {
        return rsx! { SignInPrompt {} };
    }

    let profile = auth().user.unwrap_or_default();
    let field_error = move |field: Field| errors.read().message(field);

    rsx! {
        section { class: "page page-settings",
            h1 { {t!("settings-title")} }

            div { class: "card settings__profile",
                h2 { "{profile.nickname}" }
                p { class: "card__meta", {t!("home-points", points = profile.points)} }
                if profile.vip_level > 0 {
                    span { class: "tag", {t!("settings-vip", level = profile.vip_level)} }
                }
            }

            h2 { {t!("settings-password-title")} }
            if let Some(Ok(message)) = banner() {
                p { class: "banner banner--success", "{message}" }
            } else if let Some(Err(message)) = banner() {
                ErrorBanner { message }
            }

            form { class: "form", onsubmit: on_submit,
                label { class: "form__field",
                    span { {t!("field-current-password")} }
                    input {
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{form.read().current}",
                        oninput: move |evt| form.write().current = evt.value(),
                    }
                    if let Some(message) = field_error(Field::CurrentPassword) {
                        span { class: "form__error", "{message}" }
                    }
                }
                label { class: "form__field",
                    span { {t!("field-new-password")} }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{form.read().new_password}",
                        oninput: move |evt| form.write().new_password = evt.value(),
                    }
                    if let Some(message) = field_error(Field::NewPassword) {
                        span { class: "form__error", "{message}" }
                    }
                }
                label { class: "form__field",
                    span { {t!("field-confirm")} }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{form.read().confirm}",
                        oninput: move |evt| form.write().confirm = evt.value(),
                    }
                    if let Some(message) = field_error(Field::Confirm) {
                        span { class: "form__error", "{message}" }
                    }
                }
                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: submitting(),
                    {t!("settings-password-submit")}
                }
            }

            button {
                r#type: "button",
                class: "button button--ghost settings__logout",
                onclick: on_logout,
                {t!("settings-logout")}
            }
        }
    }
}
