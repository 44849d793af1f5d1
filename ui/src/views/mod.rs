mod achievements;
mod home;
mod invite;
mod login;
mod plaza;
mod register;
mod report;
mod settings;

pub use achievements::Achievements;
pub use home::Home;
pub use invite::Invite;
pub use login::Login;
pub use plaza::Plaza;
pub use register::Register;
pub use report::Report;
pub use settings::Settings;

use dioxus::prelude::*;

use crate::routes;

/// Shown in place of views that need a session.
#[component]
fn SignInPrompt() -> Element {
    rsx! {
        section { class: "page page-signin",
            p { {crate::t!("auth-required")} }
            Link { class: "button button--primary", to: routes::LOGIN, {crate::t!("nav-login")} }
        }
    }
}

#[component]
fn ErrorBanner(message: String) -> Element {
    rsx! {
        p { class: "banner banner--error", role: "alert", "⚠️ {message}" }
    }
}
