//! Application settings.
//!
//! Resolution order per value: runtime environment variable (native builds
//! only), the same variable captured at compile time, then the built-in
//! default.

use once_cell::sync::Lazy;

const DEFAULT_API_BASE: &str = "https://api.pitchcraft.app";
const DEFAULT_SHARE_BASE: &str = "https://pitchcraft.app";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend origin for REST calls.
    pub api_base: String,
    /// Public web origin used in share links.
    pub share_base: String,
    /// Prefix of exported poster filenames.
    pub poster_prefix: String,
    /// How long transient toasts stay on screen.
    pub toast_ms: u64,
    /// Page size of the scenario plaza.
    pub plaza_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            share_base: DEFAULT_SHARE_BASE.to_string(),
            poster_prefix: "pitchcraft-poster".to_string(),
            toast_ms: 2_500,
            plaza_page_size: 10,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: lookup("PITCHCRAFT_API_BASE", option_env!("PITCHCRAFT_API_BASE"))
                .unwrap_or(defaults.api_base),
            share_base: lookup("PITCHCRAFT_SHARE_BASE", option_env!("PITCHCRAFT_SHARE_BASE"))
                .unwrap_or(defaults.share_base),
            ..defaults
        }
    }

    /// Public link for a shared item, e.g. `/share/report/abc`.
    pub fn share_link(&self, kind: &str, id: &str) -> String {
        format!("{}/share/{kind}/{id}", self.share_base.trim_end_matches('/'))
    }

    pub fn invite_link(&self, code: &str) -> String {
        format!("{}/invite?code={code}", self.share_base.trim_end_matches('/'))
    }
}

fn lookup(name: &str, compiled: Option<&'static str>) -> Option<String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(value) = std::env::var(name) {
            if !value.trim().is_empty() {
                return Some(value);
            }
        }
    }
    #[cfg(target_arch = "wasm32")]
    let _ = name;

    compiled
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_strip_trailing_slash() {
        let config = AppConfig {
            share_base: "https://example.com/".into(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.share_link("report", "s-42"),
            "https://example.com/share/report/s-42"
        );
        assert_eq!(
            config.invite_link("AB12CD"),
            "https://example.com/invite?code=AB12CD"
        );
    }

    #[test]
    fn compiled_value_used_when_runtime_missing() {
        assert_eq!(
            lookup("PITCHCRAFT_TEST_UNSET_VARIABLE", Some("http://compiled")),
            Some("http://compiled".to_string())
        );
        assert_eq!(lookup("PITCHCRAFT_TEST_UNSET_VARIABLE", Some("  ")), None);
    }
}
