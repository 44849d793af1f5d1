use api::types::TrainingReport;
use dioxus::prelude::*;

use super::ErrorBanner;
use crate::components::share_modal::{ShareModal, ShareTarget};
use crate::core::auth::session;
use crate::core::client::{api_client, error_banner};
use crate::core::config::config;
use crate::core::format::format_date;
use crate::core::hooks::use_load_slot;
use crate::poster::{PosterContent, PosterPayload, ReportPoster};
use crate::t;

fn share_target(report: &TrainingReport) -> ShareTarget {
    let nickname = session().user().map(|u| u.nickname).unwrap_or_default();
    ShareTarget {
        content_id: Some(report.session_id.clone()),
        link: config().share_link("report", &report.session_id),
        poster: PosterPayload::new(
            report.scenario_title.clone(),
            nickname,
            PosterContent::Report(ReportPoster::from(report)),
        ),
    }
}

#[component]
pub fn Report(session_id: ReadOnlySignal<String>) -> Element {
    let loads = use_load_slot();
    let mut report = use_signal(|| None::<TrainingReport>);
    let mut error = use_signal(|| None::<String>);
    let mut sharing = use_signal(|| false);

    use_effect(move || {
        let id = session_id();
        let scope = loads.restart();
        report.set(None);
        error.set(None);
        spawn(async move {
            let client = api_client();
            match scope.run(client.training_report(&id)).await {
                Ok(loaded) => report.set(Some(loaded)),
                Err(err) => {
                    if let Some(message) = error_banner(&err) {
                        error.set(Some(message));
                    }
                }
            }
        });
    });

    let Some(current) = report() else {
        return rsx! {
            section { class: "page page-report",
                if let Some(message) = error() {
                    ErrorBanner { message }
                } else {
                    p { class: "page__placeholder", {t!("loading")} }
                }
            }
        };
    };

    let target = share_target(&current);

    rsx! {
        section { class: "page page-report",
            h1 { "{current.scenario_title}" }
            if let Some(created) = &current.created_at {
                p { class: "card__meta", {format_date(created)} }
            }

            div { class: "card report__score",
                span { class: "report__score-value", "{current.score}" }
                span { class: "report__score-label", {t!("report-score")} }
            }

            ul { class: "report__dimensions",
                for dimension in current.dimensions.iter() {
                    li { key: "{dimension.name}", class: "report__dimension",
                        span { "{dimension.name}" }
                        div { class: "report__bar",
                            div {
                                class: "report__bar-fill",
                                style: "width: {dimension.score.min(100)}%",
                            }
                        }
                        span { "{dimension.score}" }
                    }
                }
            }

            if !current.summary.is_empty() {
                p { class: "report__summary", "{current.summary}" }
            }

            button {
                r#type: "button",
                class: "button button--primary",
                onclick: move |_| sharing.set(true),
                {t!("action-share")}
            }
        }

        if sharing() {
            ShareModal { target, on_close: move |_| sharing.set(false) }
        }
    }
}
