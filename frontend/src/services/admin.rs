use std::collections::BTreeMap;

use gloo_net::http::Request;
use shared::SlotError;

use super::{bearer, network_error, read_error};
use crate::config::{get_api_base_url, get_auth_token};

pub const TELEPORT_ENDPOINT: &str = "/api/admin/teleports";
pub const ADVERTISING_ENDPOINT: &str = "/api/admin/advertising";

/// Posts an already validated dashboard form.
pub async fn submit_form(endpoint: &str, values: &BTreeMap<String, String>) -> Result<(), SlotError> {
    let auth = bearer(&get_auth_token().unwrap_or_default())?;

    let response = Request::post(&format!("{}{}", get_api_base_url(), endpoint))
        .header("Authorization", &auth)
        .json(values)
        .map_err(network_error)?
        .send()
        .await
        .map_err(network_error)?;

    if response.ok() {
        log::info!("Saved form to {}", endpoint);
        Ok(())
    } else {
        Err(read_error(response).await)
    }
}
