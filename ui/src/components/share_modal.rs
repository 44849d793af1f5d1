use api::types::{ShareChannel, ShareEvent};
use dioxus::prelude::*;

use super::share_poster_modal::SharePosterModal;
use crate::core::client::api_client;
use crate::core::platform::spawn_future;
use crate::poster::{export, PosterPayload};
use crate::t;

/// What is being shared: the public link and the poster that represents it.
#[derive(Clone, Debug, PartialEq)]
pub struct ShareTarget {
    pub content_id: Option<String>,
    pub link: String,
    pub poster: PosterPayload,
}

impl ShareTarget {
    pub fn event(&self, channel: ShareChannel) -> ShareEvent {
        ShareEvent {
            channel,
            content_type: self.poster.kind().as_str().to_string(),
            content_id: self.content_id.clone(),
        }
    }
}

const CHANNELS: [ShareChannel; 4] = [
    ShareChannel::WeChat,
    ShareChannel::Moments,
    ShareChannel::CopyLink,
    ShareChannel::Poster,
];

fn channel_icon(channel: ShareChannel) -> &'static str {
    match channel {
        ShareChannel::WeChat => "💬",
        ShareChannel::Moments => "🌐",
        ShareChannel::CopyLink => "🔗",
        ShareChannel::Poster => "🖼️",
    }
}

fn channel_label(channel: ShareChannel) -> String {
    match channel {
        ShareChannel::WeChat => t!("share-wechat"),
        ShareChannel::Moments => t!("share-moments"),
        ShareChannel::CopyLink => t!("share-copy-link"),
        ShareChannel::Poster => t!("share-poster"),
    }
}

/// Best-effort analytics; failures end up in the log only.
pub fn track_share(event: ShareEvent) {
    spawn_future(async move {
        if let Err(err) = api_client().track_share(&event).await {
            tracing::warn!(%err, channel = ?event.channel, "share analytics not recorded");
        }
    });
}

#[component]
pub fn ShareModal(target: ReadOnlySignal<ShareTarget>, on_close: EventHandler<()>) -> Element {
    let hint = use_signal(|| None::<String>);
    let mut poster_open = use_signal(|| false);

    let choose = move |channel: ShareChannel| {
        let mut hint = hint;
        let mut poster_open = poster_open;
        let target = target();
        track_share(target.event(channel));

        match channel {
            ShareChannel::WeChat | ShareChannel::Moments => {
                hint.set(Some(t!("share-paste-hint")));
            }
            ShareChannel::CopyLink => {
                let link = target.link.clone();
                spawn(async move {
                    match export::copy_text(link.clone()).await {
                        Ok(()) => hint.set(Some(t!("share-link-copied"))),
                        Err(err) => {
                            tracing::warn!(%err, "link copy failed");
                            hint.set(Some(t!("share-link-manual", link = link)));
                        }
                    }
                });
            }
            ShareChannel::Poster => poster_open.set(true),
        }
    };

    if poster_open() {
        return rsx! {
            SharePosterModal {
                payload: target().poster,
                on_close: move |_| poster_open.set(false),
            }
        };
    }

    rsx! {
        div { class: "modal-backdrop", onclick: move |_| on_close.call(()),
            div {
                class: "modal share-modal",
                role: "dialog",
                onclick: move |evt| evt.stop_propagation(),

                div { class: "modal__header",
                    h2 { {t!("share-title")} }
                    button {
                        r#type: "button",
                        class: "modal__close",
                        aria_label: t!("action-close"),
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }

                div { class: "share-modal__channels",
                    for channel in CHANNELS {
                        button {
                            key: "{channel_icon(channel)}",
                            r#type: "button",
                            class: "share-modal__channel",
                            onclick: move |_| choose(channel),
                            span { class: "share-modal__icon", "{channel_icon(channel)}" }
                            span { class: "share-modal__label", {channel_label(channel)} }
                        }
                    }
                }

                if let Some(message) = hint() {
                    p { class: "share-modal__hint", "{message}" }
                }
            }
        }
    }
}
