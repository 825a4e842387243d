use serde::{Deserialize, Serialize};

/// Application settings stored in TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Reconciliation loop configuration
    #[serde(default)]
    pub reconcile: ReconcileSettings,
    /// Outbound HTTP configuration
    #[serde(default)]
    pub http: HttpSettings,
    /// Feed URLs per provider and quality
    #[serde(default)]
    pub feeds: FeedSettings,
    /// Download-queue service
    #[serde(default)]
    pub downloader: DownloaderSettings,
    /// Destination path prefixes
    #[serde(default)]
    pub paths: PathSettings,
    /// Notification channel
    #[serde(default)]
    pub telegram: TelegramSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileSettings {
    /// Seconds between ticks
    #[serde(default = "ReconcileSettings::default_interval_secs")]
    pub interval_secs: u64,
    /// Seconds added to the publish time of a normal match before the next check
    #[serde(default = "ReconcileSettings::default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Treat recaps already dispatched in this cooldown window as no-match
    #[serde(default)]
    pub skip_repeat_recaps: bool,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            interval_secs: Self::default_interval_secs(),
            cooldown_secs: Self::default_cooldown_secs(),
            skip_repeat_recaps: false,
        }
    }
}

impl ReconcileSettings {
    fn default_interval_secs() -> u64 {
        600
    }

    fn default_cooldown_secs() -> u64 {
        7 * 24 * 60 * 60
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Timeout applied to every outbound request
    #[serde(default = "HttpSettings::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl HttpSettings {
    fn default_timeout_secs() -> u64 {
        30
    }
}

/// Feed URLs. An empty URL disables that provider/quality pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "FeedSettings::default_erai_raws_1080p")]
    pub erai_raws_1080p: String,
    #[serde(default = "FeedSettings::default_erai_raws_720p")]
    pub erai_raws_720p: String,
    #[serde(default = "FeedSettings::default_erai_raws_480p")]
    pub erai_raws_480p: String,
    /// animeworld only publishes 720p
    #[serde(default = "FeedSettings::default_anime_world")]
    pub anime_world: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            erai_raws_1080p: Self::default_erai_raws_1080p(),
            erai_raws_720p: Self::default_erai_raws_720p(),
            erai_raws_480p: Self::default_erai_raws_480p(),
            anime_world: Self::default_anime_world(),
        }
    }
}

impl FeedSettings {
    fn default_erai_raws_1080p() -> String {
        "https://www.erai-raws.info/feed/?res=1080p&type=magnet".to_string()
    }

    fn default_erai_raws_720p() -> String {
        "https://www.erai-raws.info/feed/?res=720p&type=magnet".to_string()
    }

    fn default_erai_raws_480p() -> String {
        "https://www.erai-raws.info/feed/?res=SD&type=magnet".to_string()
    }

    fn default_anime_world() -> String {
        "https://www.animeworld.so/rss/episodes".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloaderSettings {
    /// Download-queue base URL; requests go to `<url>/add`
    #[serde(default = "DownloaderSettings::default_url")]
    pub url: String,
}

impl Default for DownloaderSettings {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
        }
    }
}

impl DownloaderSettings {
    fn default_url() -> String {
        "http://localhost:8090".to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Prefix for magnet/torrent downloads
    #[serde(default)]
    pub torrent_prefix: String,
    /// Prefix for direct video downloads
    #[serde(default)]
    pub direct_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramSettings {
    #[serde(default = "TelegramSettings::default_api_url")]
    pub api_url: String,
    /// Notifications are skipped while empty
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: i64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_url: Self::default_api_url(),
            bot_token: String::new(),
            chat_id: 0,
        }
    }
}

impl TelegramSettings {
    fn default_api_url() -> String {
        "https://api.telegram.org".to_string()
    }

    pub fn is_enabled(&self) -> bool {
        !self.bot_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.reconcile.interval_secs, 600);
        assert_eq!(settings.reconcile.cooldown_secs, 604800);
        assert!(!settings.reconcile.skip_repeat_recaps);
        assert!(!settings.telegram.is_enabled());
    }

    #[test]
    fn test_partial_sections() {
        let settings: Settings = toml::from_str(
            r#"
            [reconcile]
            interval_secs = 60

            [paths]
            torrent_prefix = "/srv/torrent/"

            [telegram]
            bot_token = "123:abc"
            chat_id = 42
            "#,
        )
        .unwrap();

        assert_eq!(settings.reconcile.interval_secs, 60);
        assert_eq!(settings.reconcile.cooldown_secs, 604800);
        assert_eq!(settings.paths.torrent_prefix, "/srv/torrent/");
        assert_eq!(settings.paths.direct_prefix, "");
        assert!(settings.telegram.is_enabled());
        assert_eq!(settings.telegram.api_url, "https://api.telegram.org");
    }

    #[test]
    fn test_round_trip_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
