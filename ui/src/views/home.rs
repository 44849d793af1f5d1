use dioxus::prelude::*;

use crate::components::toast::{use_toaster, ToastHost};
use crate::core::client::{api_client, error_banner};
use crate::core::hooks::{use_auth, use_request_scope};
use crate::routes;
use crate::t;

#[component]
pub fn Home() -> Element {
    // Re-render on language change.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_current = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let auth = use_auth();
    let scope = use_request_scope();
    let toaster = use_toaster();
    let mut checking_in = use_signal(|| false);
    let mut streak = use_signal(|| None::<u32>);

    let on_check_in = move |_| {
        if checking_in() {
            return;
        }
        checking_in.set(true);
        let scope = scope.clone();
        spawn(async move {
            let client = api_client();
            match scope.run(client.check_in()).await {
                Ok(result) => {
                    tracing::info!(points = result.points_awarded, "checked in");
                    streak.set(Some(result.streak_days));
                    toaster.success(t!("checkin-success", points = result.points_awarded));

                    let session = crate::core::auth::session();
                    if let Some(mut user) = session.user() {
                        user.points = result.total_points;
                        session.update_profile(user);
                    }
                }
                Err(err) => {
                    if let Some(message) = error_banner(&err) {
                        toaster.error(message);
                    }
                }
            }
            checking_in.set(false);
        });
    };

    let state = auth();
    let points = state.user.as_ref().map(|u| u.points).unwrap_or_default();
    let nickname = state.user.as_ref().map(|u| u.nickname.clone()).unwrap_or_default();

    rsx! {
        div { style: "display:none", "{_lang_current}" }
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            p { {t!("home-tagline")} }

            if state.is_authenticated {
                div { class: "card page-home__checkin",
                    p { {t!("home-greeting", name = nickname)} }
                    p { class: "page-home__points", {t!("home-points", points = points)} }
                    if let Some(days) = streak() {
                        p { class: "card__meta", {t!("checkin-streak", days = days)} }
                    }
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: checking_in(),
                        onclick: on_check_in,
                        {t!("checkin-button")}
                    }
                }
            } else {
                div { class: "card",
                    p { {t!("home-signed-out")} }
                    Link { class: "button button--primary", to: routes::LOGIN, {t!("nav-login")} }
                }
            }

            ul { class: "page-home__features",
                li { Link { to: routes::PLAZA, {t!("home-feature-plaza")} } }
                li { Link { to: routes::ACHIEVEMENTS, {t!("home-feature-achievements")} } }
                li { Link { to: routes::INVITE, {t!("home-feature-invite")} } }
            }
        }
        ToastHost { toaster }
    }
}
