use api::types::RegisterRequest;
use dioxus::prelude::*;

use super::ErrorBanner;
use crate::core::auth::session;
use crate::core::client::{api_client, error_banner};
use crate::core::hooks::use_request_scope;
use crate::forms::{validate_registration, Field, FieldErrors, RegistrationForm};
use crate::routes;
use crate::t;

#[component]
pub fn Register() -> Element {
    let scope = use_request_scope();
    let mut form = use_signal(RegistrationForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut banner = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let current = form();
        let found = validate_registration(&current);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        submitting.set(true);
        banner.set(None);
        let scope = scope.clone();
        spawn(async move {
            let request = RegisterRequest {
                nickname: current.nickname.trim().to_string(),
                account: current.account.trim().to_string(),
                password: current.password,
            };
            let client = api_client();
            match scope.run(client.register(&request)).await {
                Ok(auth) => {
                    session().login(auth.token, auth.user);
                    navigator().push(routes::HOME);
                }
                Err(err) => {
                    if let Some(message) = error_banner(&err) {
                        banner.set(Some(message));
                    }
                }
            }
            submitting.set(false);
        });
    };

    let field_error = move |field: Field| errors.read().message(field);

    rsx! {
        section { class: "page page-auth",
            h1 { {t!("register-title")} }

            if let Some(message) = banner() {
                ErrorBanner { message }
            }

            form { class: "form", onsubmit: on_submit,
                label { class: "form__field",
                    span { {t!("field-nickname")} }
                    input {
                        r#type: "text",
                        value: "{form.read().nickname}",
                        oninput: move |evt| form.write().nickname = evt.value(),
                    }
                    if let Some(message) = field_error(Field::Nickname) {
                        span { class: "form__error", "{message}" }
                    }
                }
                label { class: "form__field",
                    span { {t!("field-account")} }
                    input {
                        r#type: "text",
                        autocomplete: "username",
                        placeholder: t!("field-account-hint"),
                        value: "{form.read().account}",
                        oninput: move |evt| form.write().account = evt.value(),
                    }
                    if let Some(message) = field_error(Field::Account) {
                        span { class: "form__error", "{message}" }
                    }
                }
                label { class: "form__field",
                    span { {t!("field-password")} }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{form.read().password}",
                        oninput: move |evt| form.write().password = evt.value(),
                    }
                    if let Some(message) = field_error(Field::Password) {
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
                    {t!("register-submit")}
                }
            }

            p { class: "form__switch",
                Link { to: routes::LOGIN, {t!("register-to-login")} }
            }
        }
    }
}
