use shared::constants::DEFAULT_LANGUAGE;
use shared::slot_session::PlayerIdentity;
use web_sys::window;

const API_BASE_URL_KEY: &str = "api_base_url";

/// Reads a key from local storage, falling back to session storage.
pub fn storage_item(key: &str) -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(key).ok().flatten())
        .or_else(|| window()
            .and_then(|w| w.session_storage().ok().flatten())
            .and_then(|s| s.get_item(key).ok().flatten()))
        .filter(|value| !value.is_empty())
}

pub fn get_api_base_url() -> String {
    // An explicit override wins, e.g. when the portal is embedded elsewhere
    if let Some(base) = storage_item(API_BASE_URL_KEY) {
        return base.trim_end_matches('/').to_string();
    }

    if let Some(window) = window() {
        if let Ok(host) = window.location().host() {
            let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
            return format!("{}//{}", protocol, host);
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:3000".to_string()
}

pub fn get_asset_url(path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{}{}", get_api_base_url(), path)
    }
}

pub fn get_auth_token() -> Option<String> {
    storage_item("token")
}

/// Identity of the logged-in player, as stored by the surrounding portal.
pub fn player_identity() -> PlayerIdentity {
    PlayerIdentity {
        server_id: storage_item("server_id").unwrap_or_default(),
        account_id: storage_item("account_id").unwrap_or_default(),
        character_id: storage_item("character_id").unwrap_or_default(),
        token: get_auth_token().unwrap_or_default(),
    }
}

pub fn language() -> String {
    storage_item("language")
        .or_else(|| window()
            .and_then(|w| w.navigator().language())
            .and_then(|lang| lang.split('-').next().map(str::to_string)))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}
