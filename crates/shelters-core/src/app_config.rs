/// Optional behaviors of the availability view.
///
/// All enabled by default; each can be switched off independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCapabilities {
    pub filtering: bool,
    pub distance_sort: bool,
    pub map_links: bool,
}

impl Default for ViewCapabilities {
    fn default() -> Self {
        Self {
            filtering: true,
            distance_sort: true,
            map_links: true,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub geocoder_base_url: String,
    pub maps_api_key: Option<String>,
    pub map_search_url: String,
    pub capabilities: ViewCapabilities,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("geocoder_base_url", &self.geocoder_base_url)
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("map_search_url", &self.map_search_url)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
