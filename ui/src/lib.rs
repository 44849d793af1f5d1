//! Shared UI crate for Pitchcraft. Views, components, the poster renderer
//! and the client-side session live here; the launchers only add routing.

pub mod core;
pub mod feed;
pub mod forms;
pub mod i18n;
pub mod poster;
pub mod routes;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub mod share_modal;
    pub mod share_poster_modal;
    pub mod toast;

    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
    pub use share_modal::{ShareModal, ShareTarget};
    pub use share_poster_modal::SharePosterModal;
    pub use toast::{ToastHost, Toaster};
}
