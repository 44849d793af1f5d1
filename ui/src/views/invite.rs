use api::types::InviteCode;
use dioxus::prelude::*;

use super::{ErrorBanner, SignInPrompt};
use crate::components::share_modal::{ShareModal, ShareTarget};
use crate::core::client::{api_client, error_banner};
use crate::core::config::config;
use crate::core::hooks::{use_auth, use_request_scope};
use crate::poster::{export, InvitePoster, PosterContent, PosterPayload};
use crate::t;

fn invite_link(invite: &InviteCode) -> String {
    invite
        .share_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| config().invite_link(&invite.code))
}

#[component]
pub fn Invite() -> Element {
    let auth = use_auth();
    let scope = use_request_scope();
    let mut invite = use_signal(|| None::<InviteCode>);
    let mut error = use_signal(|| None::<String>);
    let mut copied = use_signal(|| None::<String>);
    let mut sharing = use_signal(|| false);

    use_effect(move || {
        if !auth().is_authenticated {
            return;
        }
        let scope = scope.clone();
        spawn(async move {
            let client = api_client();
            match scope.run(client.invite_code()).await {
                Ok(code) => invite.set(Some(code)),
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

    let Some(current) = invite() else {
        return rsx! {
            section { class: "page page-invite",
                h1 { {t!("invite-title")} }
                if let Some(message) = error() {
                    ErrorBanner { message }
                } else {
                    p { class: "page__placeholder", {t!("loading")} }
                }
            }
        };
    };

    let link = invite_link(&current);
    let nickname = auth().user.map(|u| u.nickname).unwrap_or_default();
    let target = ShareTarget {
        content_id: None,
        link: link.clone(),
        poster: PosterPayload::new(
            t!("invite-poster-title"),
            nickname,
            PosterContent::Invite(InvitePoster {
                invite_code: current.code.clone(),
            }),
        ),
    };

    let copy_code = {
        let code = current.code.clone();
        move |_| {
            let code = code.clone();
            spawn(async move {
                match export::copy_text(code.clone()).await {
                    Ok(()) => copied.set(Some(t!("invite-code-copied"))),
                    Err(err) => {
                        tracing::warn!(%err, "invite code copy failed");
                        copied.set(Some(t!("share-link-manual", link = code)));
                    }
                }
            });
        }
    };

    rsx! {
        section { class: "page page-invite",
            h1 { {t!("invite-title")} }
            p { {t!("invite-intro")} }

            div { class: "card invite__code",
                span { class: "invite__code-value", "{current.code}" }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: copy_code,
                    {t!("invite-copy-code")}
                }
            }
            p { class: "card__meta", {t!("invite-count", count = current.invited_count)} }
            p { class: "card__meta invite__link", "{link}" }

            if let Some(message) = copied() {
                p { class: "banner banner--success", "{message}" }
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
