use api::types::ScenarioSummary;
use dioxus::prelude::*;

use super::ErrorBanner;
use crate::core::client::{api_client, error_banner};
use crate::core::config::config;
use crate::core::format::format_play_count;
use crate::core::hooks::use_request_scope;
use crate::feed::{LoadMode, PagedList};
use crate::t;

#[component]
pub fn Plaza() -> Element {
    let scope = use_request_scope();
    let feed = use_signal(|| PagedList::<ScenarioSummary>::new(config().plaza_page_size));

    let load = {
        let scope = scope.clone();
        move |mode: LoadMode| {
            let mut feed = feed;
            let Some(ticket) = feed.write().begin(mode) else {
                return;
            };
            let page_size = feed.peek().page_size();
            let scope = scope.clone();
            spawn(async move {
                let client = api_client();
                match scope.run(client.plaza(ticket.page, page_size)).await {
                    Ok(page) => {
                        feed.write().apply(ticket, page);
                    }
                    Err(err) => match error_banner(&err) {
                        Some(message) => {
                            feed.write().fail(ticket, message);
                        }
                        None => feed.write().abandon(ticket),
                    },
                }
            });
        }
    };

    {
        let load = load.clone();
        use_effect(move || load(LoadMode::Replace));
    }

    let list = feed.read();
    let first_load = list.is_loading() && list.is_empty();

    rsx! {
        section { class: "page page-plaza",
            div { class: "page__header",
                h1 { {t!("plaza-title")} }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: list.is_loading(),
                    onclick: {
                        let load = load.clone();
                        move |_| load(LoadMode::Replace)
                    },
                    {t!("action-refresh")}
                }
            }

            if let Some(message) = list.error() {
                ErrorBanner { message: message.to_string() }
            }

            if first_load {
                p { class: "page__placeholder", {t!("loading")} }
            } else if list.is_empty() && list.error().is_none() {
                p { class: "page__placeholder", {t!("plaza-empty")} }
            }

            ul { class: "plaza__list",
                for scenario in list.items() {
                    li { key: "{scenario.id}", class: "card plaza__item",
                        h3 { "{scenario.title}" }
                        p { class: "card__meta",
                            span { class: "tag", "{scenario.category}" }
                            if let Some(level) = &scenario.difficulty {
                                span { class: "tag", {t!("plaza-difficulty", level = level.clone())} }
                            }
                            span { {t!("plaza-plays", count = format_play_count(scenario.play_count))} }
                        }
                        if !scenario.author_nickname.is_empty() {
                            p { class: "card__meta", {t!("plaza-author", name = scenario.author_nickname.clone())} }
                        }
                    }
                }
            }

            if list.has_more() && !list.is_empty() {
                button {
                    r#type: "button",
                    class: "button plaza__more",
                    disabled: list.is_loading_more() || list.is_loading(),
                    onclick: {
                        let load = load.clone();
                        move |_| load(LoadMode::Append)
                    },
                    if list.is_loading_more() { {t!("loading")} } else { {t!("plaza-load-more")} }
                }
            } else if !list.is_empty() {
                p { class: "page__placeholder", {t!("plaza-end")} }
            }
        }
    }
}
