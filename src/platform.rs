//! Platform detection and the supported-platform directory.
//!
//! Detection is advisory and purely cosmetic: ordered, case-sensitive
//! substring checks against hostname fragments. No URL parsing, no scheme
//! validation — the label is derived on every input change and never stored
//! as authoritative state.

use rustc_hash::FxHashMap;

use crate::api::{PlatformInfo, PlatformList};

/// Label returned when no fragment matches.
pub const UNKNOWN_PLATFORM: &str = "Unknown";

/// Ordered fragment table; the first match wins.
const PLATFORM_FRAGMENTS: &[(&str, &str)] = &[
    ("youtube.com", "YouTube"),
    ("youtu.be", "YouTube"),
    ("tiktok.com", "TikTok"),
    ("instagram.com", "Instagram"),
    ("twitter.com", "Twitter/X"),
    ("x.com", "Twitter/X"),
    ("facebook.com", "Facebook"),
];

/// Advisory platform label for a raw URL string.
pub fn detect_platform(url: &str) -> &'static str {
    PLATFORM_FRAGMENTS
        .iter()
        .find(|(fragment, _)| url.contains(fragment))
        .map_or(UNKNOWN_PLATFORM, |&(_, label)| label)
}

/// Directory of platforms advertised by the service.
///
/// Built once from the startup supported-platforms fetch; empty when that
/// fetch fails (non-fatal by contract). Name lookup is case-insensitive;
/// iteration preserves the order the service listed.
#[derive(Debug, Clone, Default)]
pub struct PlatformDirectory {
    entries: Vec<PlatformInfo>,
    by_name: FxHashMap<String, usize>,
}

impl PlatformDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from the endpoint response.
    /// A duplicated platform name keeps the last entry, in its first slot.
    pub fn from_list(list: PlatformList) -> Self {
        let mut directory = Self::default();
        for info in list.platforms {
            directory.insert(info);
        }
        directory
    }

    fn insert(&mut self, info: PlatformInfo) {
        let key = info.name.to_lowercase();
        if let Some(&slot) = self.by_name.get(&key) {
            self.entries[slot] = info;
        } else {
            self.by_name.insert(key, self.entries.len());
            self.entries.push(info);
        }
    }

    /// Look up a platform by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&PlatformInfo> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&slot| &self.entries[slot])
    }

    /// Check if the service advertises a platform.
    pub fn supports(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Feature labels for a platform; empty when it is not advertised.
    pub fn features(&self, name: &str) -> &[String] {
        self.get(name).map_or(&[], |info| &info.features)
    }

    /// Iterate platforms in listed order.
    pub fn iter(&self) -> impl Iterator<Item = &PlatformInfo> {
        self.entries.iter()
    }

    /// Number of advertised platforms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_platforms() {
        assert_eq!(detect_platform("https://www.youtube.com/watch?v=1"), "YouTube");
        assert_eq!(detect_platform("https://youtu.be/abc"), "YouTube");
        assert_eq!(detect_platform("https://www.tiktok.com/@u/video/1"), "TikTok");
        assert_eq!(detect_platform("https://instagram.com/reel/x"), "Instagram");
        assert_eq!(detect_platform("https://twitter.com/u/status/1"), "Twitter/X");
        assert_eq!(detect_platform("https://x.com/y"), "Twitter/X");
        assert_eq!(detect_platform("https://facebook.com/watch?v=2"), "Facebook");
    }

    #[test]
    fn test_detect_unknown_platform() {
        assert_eq!(detect_platform("https://vimeo.com/x"), UNKNOWN_PLATFORM);
        assert_eq!(detect_platform(""), UNKNOWN_PLATFORM);
    }

    #[test]
    fn test_detection_is_case_sensitive() {
        // Substring containment on the raw string, by design.
        assert_eq!(detect_platform("https://YOUTUBE.COM/watch"), UNKNOWN_PLATFORM);
    }

    #[test]
    fn test_detection_order_first_match_wins() {
        // Both fragments present: the earlier table entry decides.
        assert_eq!(
            detect_platform("https://youtube.com/?next=tiktok.com"),
            "YouTube"
        );
    }

    fn sample_list() -> PlatformList {
        PlatformList {
            platforms: vec![
                PlatformInfo {
                    name: "YouTube".into(),
                    features: vec!["video".into(), "audio".into()],
                },
                PlatformInfo {
                    name: "TikTok".into(),
                    features: vec!["watermark removal".into()],
                },
            ],
        }
    }

    #[test]
    fn test_directory_lookup_is_case_insensitive() {
        let directory = PlatformDirectory::from_list(sample_list());
        assert_eq!(directory.len(), 2);
        assert!(directory.supports("youtube"));
        assert!(directory.supports("YouTube"));
        assert!(!directory.supports("Vimeo"));
        assert_eq!(directory.features("tiktok"), &["watermark removal".to_string()]);
        assert!(directory.features("vimeo").is_empty());
    }

    #[test]
    fn test_directory_duplicate_name_keeps_last() {
        let mut list = sample_list();
        list.platforms.push(PlatformInfo {
            name: "youtube".into(),
            features: vec!["live".into()],
        });
        let directory = PlatformDirectory::from_list(list);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.features("YouTube"), &["live".to_string()]);
    }

    #[test]
    fn test_directory_iteration_preserves_order() {
        let directory = PlatformDirectory::from_list(sample_list());
        let names: Vec<_> = directory.iter().map(|info| info.name.as_str()).collect();
        assert_eq!(names, vec!["YouTube", "TikTok"]);
    }

    #[test]
    fn test_empty_directory() {
        let directory = PlatformDirectory::new();
        assert!(directory.is_empty());
        assert_eq!(directory.len(), 0);
        assert!(!directory.supports("YouTube"));
    }
}
