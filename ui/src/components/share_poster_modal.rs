use dioxus::prelude::*;

use crate::core::config::config;
use crate::poster::export::{self, ExportArtifact};
use crate::poster::{PosterError, PosterPayload, RenderSurface};
use crate::t;

#[derive(Clone, Debug, PartialEq)]
enum ActionStatus {
    Idle,
    Saved(Option<String>),
    Copied,
    /// Clipboard refused the image; the user is told to save it instead.
    CopyFallback,
    Failed(String),
}

/// Draw `payload` and derive the preview/export artifact.
fn generate(payload: &PosterPayload) -> Result<ExportArtifact, PosterError> {
    let surface = RenderSurface::rendered(&payload.normalized());
    export::derive_artifact(&surface).inspect_err(|err| {
        tracing::warn!(%err, kind = payload.kind().as_str(), "poster generation failed");
    })
}

/// Poster preview with download and copy actions. The surface and artifact
/// live only while the modal is open and are rebuilt when `payload` changes.
#[component]
pub fn SharePosterModal(payload: ReadOnlySignal<PosterPayload>, on_close: EventHandler<()>) -> Element {
    let artifact = use_memo(move || generate(&payload()));
    let status = use_signal(|| ActionStatus::Idle);
    let generating = use_signal(|| false);

    let download_handler = {
        let mut status_signal = status;
        let mut generating_signal = generating;
        move |_| {
            if generating_signal() {
                return;
            }
            let Ok(artifact) = artifact() else {
                return;
            };
            generating_signal.set(true);
            spawn(async move {
                let filename = export::poster_filename(&config().poster_prefix);
                match export::download(&artifact, &filename).await {
                    Ok(path) => status_signal.set(ActionStatus::Saved(path)),
                    Err(err) => status_signal.set(ActionStatus::Failed(err.to_string())),
                }
                generating_signal.set(false);
            });
        }
    };

    let copy_handler = {
        let mut status_signal = status;
        let mut generating_signal = generating;
        move |_| {
            if generating_signal() {
                return;
            }
            let Ok(artifact) = artifact() else {
                return;
            };
            generating_signal.set(true);
            spawn(async move {
                match export::copy_to_clipboard(&artifact).await {
                    Ok(()) => status_signal.set(ActionStatus::Copied),
                    Err(err) => {
                        tracing::warn!(%err, "poster clipboard write failed");
                        status_signal.set(ActionStatus::CopyFallback);
                    }
                }
                generating_signal.set(false);
            });
        }
    };

    let feedback = match status() {
        ActionStatus::Idle => None,
        ActionStatus::Saved(Some(path)) => Some(("poster-modal__status--success", t!("poster-saved-to", path = path))),
        ActionStatus::Saved(None) => Some(("poster-modal__status--success", t!("poster-saved"))),
        ActionStatus::Copied => Some(("poster-modal__status--success", t!("poster-copied"))),
        ActionStatus::CopyFallback => Some(("poster-modal__status--warning", t!("poster-copy-fallback"))),
        ActionStatus::Failed(err) => Some(("poster-modal__status--error", err)),
    };

    let busy = generating();
    let preview = artifact.read().as_ref().ok().map(ExportArtifact::data_url);
    let ready = preview.is_some();

    rsx! {
        div { class: "modal-backdrop", onclick: move |_| on_close.call(()),
            div {
                class: "modal poster-modal",
                role: "dialog",
                onclick: move |evt| evt.stop_propagation(),

                div { class: "modal__header",
                    h2 { {t!("poster-title")} }
                    button {
                        r#type: "button",
                        class: "modal__close",
                        aria_label: t!("action-close"),
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }

                div { class: "poster-modal__preview",
                    if let Some(url) = preview {
                        img {
                            class: "poster-modal__image",
                            src: "{url}",
                            alt: t!("poster-title"),
                        }
                    } else {
                        div { class: "poster-modal__overlay",
                            p { {t!("poster-generation-failed")} }
                        }
                    }
                }

                div { class: "poster-modal__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: busy || !ready,
                        onclick: download_handler,
                        if busy { {t!("poster-generating")} } else { {t!("poster-download")} }
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: busy || !ready,
                        onclick: copy_handler,
                        {t!("poster-copy")}
                    }
                }

                if let Some((modifier, message)) = feedback {
                    p { class: "poster-modal__status {modifier}", "{message}" }
                }
            }
        }
    }
}
