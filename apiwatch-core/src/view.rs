use serde::{Deserialize, Serialize};

/// Status-class filter over the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    #[serde(rename = "2xx")]
    Success,
    #[serde(rename = "3xx")]
    Redirect,
    #[serde(rename = "4xx")]
    ClientError,
    #[serde(rename = "5xx")]
    ServerError,
}

impl StatusFilter {
    /// Hundreds bucket this filter selects; `None` for `All`.
    pub fn bucket(self) -> Option<u16> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Success => Some(2),
            StatusFilter::Redirect => Some(3),
            StatusFilter::ClientError => Some(4),
            StatusFilter::ServerError => Some(5),
        }
    }
}

/// Method filter: exact case-sensitive match, or everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MethodFilter {
    #[default]
    All,
    Method(String),
}

impl From<String> for MethodFilter {
    fn from(s: String) -> Self {
        if s == "all" {
            MethodFilter::All
        } else {
            MethodFilter::Method(s)
        }
    }
}

impl From<MethodFilter> for String {
    fn from(f: MethodFilter) -> Self {
        match f {
            MethodFilter::All => "all".to_string(),
            MethodFilter::Method(m) => m,
        }
    }
}

/// Sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Time,
    Duration,
    Status,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// The active filter + sort selection. Pure configuration — no
/// lifecycle beyond the current UI state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub method_filter: MethodFilter,
    #[serde(default = "default_sort_key")]
    pub sort_key: SortKey,
    #[serde(default = "default_sort_dir")]
    pub sort_dir: SortDir,
}

fn default_sort_key() -> SortKey {
    SortKey::Time
}

fn default_sort_dir() -> SortDir {
    SortDir::Desc
}

impl Default for ViewSpec {
    fn default() -> Self {
        Self {
            status_filter: StatusFilter::All,
            method_filter: MethodFilter::All,
            sort_key: default_sort_key(),
            sort_dir: default_sort_dir(),
        }
    }
}

impl ViewSpec {
    /// True only for time-descending: a single new arrival may then be
    /// prepended to the rendered view as-is, because insertion order
    /// already matches the sort. Any other sort forces a full
    /// recompute on arrival.
    pub fn fast_path_prepend(&self) -> bool {
        self.sort_key == SortKey::Time && self.sort_dir == SortDir::Desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ────────────────────────────────────────────────

    #[test]
    fn default_spec_is_all_all_time_desc() {
        let spec = ViewSpec::default();
        assert_eq!(spec.status_filter, StatusFilter::All);
        assert_eq!(spec.method_filter, MethodFilter::All);
        assert_eq!(spec.sort_key, SortKey::Time);
        assert_eq!(spec.sort_dir, SortDir::Desc);
    }

    #[test]
    fn default_spec_takes_fast_path() {
        assert!(ViewSpec::default().fast_path_prepend());
    }

    #[test]
    fn any_other_sort_disables_fast_path() {
        let mut spec = ViewSpec::default();
        spec.sort_dir = SortDir::Asc;
        assert!(!spec.fast_path_prepend());

        spec.sort_key = SortKey::Duration;
        spec.sort_dir = SortDir::Desc;
        assert!(!spec.fast_path_prepend());

        spec.sort_key = SortKey::Status;
        assert!(!spec.fast_path_prepend());
    }

    // ── Serde ───────────────────────────────────────────────────

    #[test]
    fn status_filter_serializes_to_bucket_labels() {
        assert_eq!(serde_json::to_string(&StatusFilter::All).unwrap(), "\"all\"");
        assert_eq!(serde_json::to_string(&StatusFilter::Success).unwrap(), "\"2xx\"");
        assert_eq!(serde_json::to_string(&StatusFilter::ServerError).unwrap(), "\"5xx\"");
    }

    #[test]
    fn status_filter_roundtrip() {
        for f in &[
            StatusFilter::All,
            StatusFilter::Success,
            StatusFilter::Redirect,
            StatusFilter::ClientError,
            StatusFilter::ServerError,
        ] {
            let s = serde_json::to_string(f).unwrap();
            let back: StatusFilter = serde_json::from_str(&s).unwrap();
            assert_eq!(*f, back);
        }
    }

    #[test]
    fn method_filter_from_string() {
        assert_eq!(MethodFilter::from("all".to_string()), MethodFilter::All);
        assert_eq!(
            MethodFilter::from("GET".to_string()),
            MethodFilter::Method("GET".to_string())
        );
        // Case-sensitive: lowercase "get" is a distinct method label
        assert_eq!(
            MethodFilter::from("get".to_string()),
            MethodFilter::Method("get".to_string())
        );
    }

    #[test]
    fn method_filter_deserializes_from_plain_string() {
        let f: MethodFilter = serde_json::from_str("\"DELETE\"").unwrap();
        assert_eq!(f, MethodFilter::Method("DELETE".to_string()));
        let f: MethodFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(f, MethodFilter::All);
    }

    #[test]
    fn status_filter_buckets() {
        assert_eq!(StatusFilter::All.bucket(), None);
        assert_eq!(StatusFilter::Success.bucket(), Some(2));
        assert_eq!(StatusFilter::Redirect.bucket(), Some(3));
        assert_eq!(StatusFilter::ClientError.bucket(), Some(4));
        assert_eq!(StatusFilter::ServerError.bucket(), Some(5));
    }
}
