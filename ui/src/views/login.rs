use api::types::LoginRequest;
use dioxus::prelude::*;

use super::ErrorBanner;
use crate::core::auth::session;
use crate::core::client::{api_client, error_banner};
use crate::core::hooks::use_request_scope;
use crate::forms::{validate_login, Field, FieldErrors, LoginForm};
use crate::routes;
use crate::t;

#[component]
pub fn Login() -> Element {
    let scope = use_request_scope();
    let mut form = use_signal(LoginForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut banner = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let current = form();
        let found = validate_login(&current);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        submitting.set(true);
        banner.set(None);
        let scope = scope.clone();
        spawn(async move {
            let request = LoginRequest {
                account: current.account.trim().to_string(),
                password: current.password,
            };
            let client = api_client();
            match scope.run(client.login(&request)).await {
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
            h1 { {t!("login-title")} }

            if let Some(message) = banner() {
                ErrorBanner { message }
            }

            form { class: "form", onsubmit: on_submit,
                label { class: "form__field",
                    span { {t!("field-account")} }
                    input {
                        r#type: "text",
                        autocomplete: "username",
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
                        autocomplete: "current-password",
                        value: "{form.read().password}",
                        oninput: move |evt| form.write().password = evt.value(),
                    }
                    if let Some(message) = field_error(Field::Password) {
                        span { class: "form__error", "{message}" }
                    }
                }
                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: submitting(),
                    {t!("login-submit")}
                }
            }

            p { class: "form__switch",
                Link { to: routes::REGISTER, {t!("login-to-register")} }
            }
        }
    }
}
