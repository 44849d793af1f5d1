use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Achievements, Home, Invite, Login, Plaza, Register, Report, Settings};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/plaza")]
    Plaza {},
    #[route("/report/:session_id")]
    Report { session_id: String },
    #[route("/achievements")]
    Achievements {},
    #[route("/invite")]
    Invite {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/settings")]
    Settings {},
}

const MAIN_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_plaza(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Plaza {},
        "{label}"
    })
}
fn nav_achievements(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Achievements {},
        "{label}"
    })
}
fn nav_invite(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Invite {},
        "{label}"
    })
}
fn nav_settings(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Settings {},
        "{label}"
    })
}
fn nav_login(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Login {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    {
        ui::i18n::init();
        register_nav(NavBuilder {
            home: nav_home,
            plaza: nav_plaza,
            achievements: nav_achievements,
            invite: nav_invite,
            settings: nav_settings,
            login: nav_login,
        });
    }

    let lang_code = use_signal(|| "zh-CN".to_string());
    use_context_provider(|| lang_code);

    rsx! {
        document::Style { "{MAIN_CSS}" }

        Router::<Route> {}
    }
}

/// Web layout: shared navbar above the routed outlet.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
