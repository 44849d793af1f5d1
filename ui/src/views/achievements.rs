use api::types::Achievement;
use dioxus::prelude::*;

use super::{ErrorBanner, SignInPrompt};
use crate::components::share_modal::{ShareModal, ShareTarget};
use crate::core::client::{api_client, error_banner};
use crate::core::config::config;
use crate::core::format::format_date;
use crate::core::hooks::{use_auth, use_request_scope};
use crate::poster::{AchievementPoster, PosterContent, PosterPayload};
use crate::t;

fn card_class(unlocked: bool) -> &'static str {
    if unlocked {
        "card achievement"
    } else {
        "card achievement achievement--locked"
    }
}

#[component]
pub fn Achievements() -> Element {
    let auth = use_auth();
    let scope = use_request_scope();
    let mut items = use_signal(|| None::<Vec<Achievement>>);
    let mut error = use_signal(|| None::<String>);
    let mut sharing = use_signal(|| None::<ShareTarget>);

    use_effect(move || {
        if !auth().is_authenticated {
            return;
        }
        let scope = scope.clone();
        spawn(async move {
            let client = api_client();
            match scope.run(client.achievements()).await {
                Ok(list) => items.set(Some(list)),
                Err(err) => {
                    if let Some(message) = error_banner(&err) {
                        error.set(Some(message));
                    }
                }
            }
        });
    });

    if !auth().is_authenticated {
        return rsx! { SignInPrompt {} };
    }

    let nickname = auth().user.map(|u| u.nickname).unwrap_or_default();
    let list = items().unwrap_or_default();
    let unlocked = list.iter().filter(|a| a.unlocked).count();

    rsx! {
        section { class: "page page-achievements",
            h1 { {t!("achievements-title")} }
            p { class: "card__meta", {t!("achievements-progress", unlocked = unlocked, total = list.len())} }

            if let Some(message) = error() {
                ErrorBanner { message }
            } else if items().is_none() {
                p { class: "page__placeholder", {t!("loading")} }
            }

            ul { class: "achievements__grid",
                for achievement in list {
                    li {
                        key: "{achievement.id}",
                        class: card_class(achievement.unlocked),
                        span { class: "achievement__icon", "{achievement.icon}" }
                        h3 { "{achievement.name}" }
                        p { "{achievement.description}" }
                        if let Some(at) = &achievement.unlocked_at {
                            p { class: "card__meta", {t!("achievements-unlocked-on", date = format_date(at))} }
                        }
                        if achievement.unlocked {
                            button {
                                r#type: "button",
                                class: "button button--ghost",
                                onclick: {
                                    let target = ShareTarget {
                                        content_id: Some(achievement.id.clone()),
                                        link: config().share_link("achievement", &achievement.id),
                                        poster: PosterPayload::new(
                                            t!("achievements-poster-title"),
                                            nickname.clone(),
                                            PosterContent::Achievement(AchievementPoster::from(&achievement)),
                                        ),
                                    };
                                    move |_| sharing.set(Some(target.clone()))
                                },
                                {t!("action-share")}
                            }
                        }
                    }
                }
            }
        }

        if let Some(target) = sharing() {
            ShareModal { target, on_close: move |_| sharing.set(None) }
        }
    }
}
