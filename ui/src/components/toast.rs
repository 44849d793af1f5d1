use dioxus::prelude::*;

use crate::core::config::config;
use crate::core::timing::sleep_ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastTone {
    #[default]
    Success,
    Error,
}

impl ToastTone {
    fn class(&self) -> &'static str {
        match self {
            ToastTone::Success => "toast toast--success",
            ToastTone::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub text: String,
    pub tone: ToastTone,
}

/// The one toast currently on screen. A newer toast replaces the old one and
/// the old one's timer must not dismiss it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastSlot {
    current: Option<ToastMessage>,
    next_id: u64,
}

impl ToastSlot {
    pub fn show(&mut self, text: impl Into<String>, tone: ToastTone) -> u64 {
        self.next_id += 1;
        self.current = Some(ToastMessage {
            id: self.next_id,
            text: text.into(),
            tone,
        });
        self.next_id
    }

    /// Remove toast `id` if it is still the visible one.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|toast| toast.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&ToastMessage> {
        self.current.as_ref()
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    slot: Signal<ToastSlot>,
}

impl Toaster {
    /// Show `text` and schedule its removal after `AppConfig::toast_ms`.
    pub fn show(&self, text: impl Into<String>, tone: ToastTone) {
        let mut slot = self.slot;
        let id = slot.write().show(text, tone);
        spawn(async move {
            sleep_ms(config().toast_ms).await;
            slot.write().dismiss(id);
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text, ToastTone::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text, ToastTone::Error);
    }

    pub fn current(&self) -> Option<ToastMessage> {
        self.slot.read().current().cloned()
    }
}

/// Toasts owned by the calling component; timers stop when it unmounts.
pub fn use_toaster() -> Toaster {
    let slot = use_signal(ToastSlot::default);
    Toaster { slot }
}

#[component]
pub fn ToastHost(toaster: Toaster) -> Element {
    rsx! {
        if let Some(toast) = toaster.current() {
            div {
                key: "{toast.id}",
                class: toast.tone.class(),
                role: "status",
                "{toast.text}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_timer_keeps_newer_toast() {
        let mut slot = ToastSlot::default();
        let first = slot.show("+5 points", ToastTone::Success);
        let second = slot.show("+10 points", ToastTone::Success);

        assert!(!slot.dismiss(first));
        assert_eq!(slot.current().map(|t| t.text.as_str()), Some("+10 points"));

        assert!(slot.dismiss(second));
        assert!(slot.current().is_none());
    }
}
