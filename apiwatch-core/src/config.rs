use crate::view::ViewSpec;
use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend collector endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_clear_url")]
    pub clear_url: String,
}

/// Streaming connection behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// A closed connection stays closed unless this is set.
    #[serde(default)]
    pub auto_reconnect: bool,
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,
    /// 0 = retry forever. Only meaningful with `auto_reconnect`.
    #[serde(default)]
    pub max_reconnect_attempts: u32,
}

/// View-state defaults and window sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Capacity of the rolling duration and history windows.
    #[serde(default = "default_stats_window")]
    pub stats_window: usize,
    /// Initial filter + sort selection.
    #[serde(default)]
    pub view: ViewSpec,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_ws_url() -> String { "ws://127.0.0.1:8080/ws".into() }
fn default_auth_url() -> String { "http://127.0.0.1:8080/auth".into() }
fn default_clear_url() -> String { "http://127.0.0.1:8080/api/clear".into() }
fn default_reconnect_delay() -> u64 { 1000 }
fn default_stats_window() -> usize { 20 }

// ── Impls ─────────────────────────────────────────────────────

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            collector: CollectorConfig::default(),
            stream: StreamConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            auth_url: default_auth_url(),
            clear_url: default_clear_url(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            auto_reconnect: false,
            reconnect_delay_ms: default_reconnect_delay(),
            max_reconnect_attempts: 0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            stats_window: default_stats_window(),
            view: ViewSpec::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from YAML file + env overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: DashboardConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("APIWATCH_").split("__"))
            .extract()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{SortDir, SortKey, StatusFilter};
    use std::io::Write;

    // ── Default values ────────────────────────────────────────────

    #[test]
    fn default_collector_config_has_expected_values() {
        let cfg = CollectorConfig::default();
        assert_eq!(cfg.ws_url, "ws://127.0.0.1:8080/ws");
        assert_eq!(cfg.auth_url, "http://127.0.0.1:8080/auth");
        assert_eq!(cfg.clear_url, "http://127.0.0.1:8080/api/clear");
    }

    #[test]
    fn default_stream_config_does_not_reconnect() {
        let cfg = StreamConfig::default();
        assert!(!cfg.auto_reconnect);
        assert_eq!(cfg.reconnect_delay_ms, 1000);
        assert_eq!(cfg.max_reconnect_attempts, 0);
    }

    #[test]
    fn default_ui_config_has_twenty_sample_window() {
        let cfg = UiConfig::default();
        assert_eq!(cfg.stats_window, 20);
        assert_eq!(cfg.view.sort_key, SortKey::Time);
        assert_eq!(cfg.view.sort_dir, SortDir::Desc);
    }

    #[test]
    fn dashboard_config_default_builds_without_panic() {
        let cfg = DashboardConfig::default();
        // Ensure nested defaults compose correctly
        assert_eq!(cfg.collector.ws_url, "ws://127.0.0.1:8080/ws");
        assert_eq!(cfg.ui.stats_window, 20);
        assert!(!cfg.stream.auto_reconnect);
    }

    // ── DashboardConfig::load() ───────────────────────────────────

    #[test]
    fn load_from_valid_yaml_overrides_defaults() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmpfile,
            "collector:\n  ws_url: \"ws://collector:9000/ws\"\nui:\n  stats_window: 50\n"
        )
        .unwrap();
        let cfg = DashboardConfig::load(tmpfile.path()).unwrap();
        assert_eq!(cfg.collector.ws_url, "ws://collector:9000/ws");
        assert_eq!(cfg.ui.stats_window, 50);
        // Defaults still apply for unspecified fields
        assert_eq!(cfg.collector.auth_url, "http://127.0.0.1:8080/auth");
    }

    #[test]
    fn load_yaml_with_reconnect_policy() {
        let yaml = r#"
stream:
  auto_reconnect: true
  reconnect_delay_ms: 250
  max_reconnect_attempts: 5
"#;
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "{yaml}").unwrap();
        let cfg = DashboardConfig::load(tmpfile.path()).unwrap();
        assert!(cfg.stream.auto_reconnect);
        assert_eq!(cfg.stream.reconnect_delay_ms, 250);
        assert_eq!(cfg.stream.max_reconnect_attempts, 5);
    }

    #[test]
    fn load_yaml_with_view_defaults() {
        let yaml = r#"
ui:
  view:
    status_filter: 4xx
    method_filter: GET
    sort_key: duration
    sort_dir: asc
"#;
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "{yaml}").unwrap();
        let cfg = DashboardConfig::load(tmpfile.path()).unwrap();
        assert_eq!(cfg.ui.view.status_filter, StatusFilter::ClientError);
        assert_eq!(cfg.ui.view.sort_key, SortKey::Duration);
        assert_eq!(cfg.ui.view.sort_dir, SortDir::Asc);
        assert!(!cfg.ui.view.fast_path_prepend());
    }

    #[test]
    fn config_survives_yaml_roundtrip() {
        let cfg = DashboardConfig::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let back: DashboardConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.collector.ws_url, cfg.collector.ws_url);
        assert_eq!(back.ui.stats_window, cfg.ui.stats_window);
    }
}
