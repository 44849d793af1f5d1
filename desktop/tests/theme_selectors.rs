#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Critical selectors used by the shared views (share and poster modals, toasts,
forms, feed cards) must stay in the unified theme at `ui/assets/theme/main.css`.
A plain substring check is enough as an early warning.

When a component's markup renames a class, adjust REQUIRED_SELECTORS too.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".page__placeholder",
    ".card {",
    ".card__meta",
    ".banner--error",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    // Forms
    ".form__field",
    ".form__error",
    // Feed and detail views
    ".plaza__list",
    ".plaza__more",
    ".report__score",
    ".report__bar-fill",
    ".achievement--locked",
    ".invite__code-value",
    // Modals
    ".modal-backdrop",
    ".modal__header",
    ".share-modal__channels",
    ".share-modal__hint",
    ".poster-modal__preview",
    ".poster-modal__overlay",
    ".poster-modal__actions",
    ".poster-modal__status--warning",
    // Toasts
    ".toast--success",
    ".toast--error",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars); \
         did the file get truncated or the path change?"
    );
}

#[test]
fn poster_status_modifiers_are_paired() {
    for modifier in ["success", "warning", "error"] {
        let selector = format!(".poster-modal__status--{modifier}");
        assert!(THEME_CSS.contains(&selector), "missing {selector}");
    }
}
