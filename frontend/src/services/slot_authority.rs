use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use shared::constants::{BALANCE_ENDPOINT, CLAIM_ENDPOINT, EXCHANGE_ENDPOINT};
use shared::exchange::ExchangeRequest;
use shared::shared_slot_game::{BalanceResponse, ClaimRequest, ClaimResponse};
use shared::slot_session::{PlayerIdentity, SlotAuthority, Ticker};
use shared::SlotError;

use super::{bearer, network_error, read_error};

#[derive(Serialize)]
struct ExchangeBody<'a> {
    #[serde(flatten)]
    identity: &'a PlayerIdentity,
    #[serde(flatten)]
    request: &'a ExchangeRequest,
}

/// Slot authority reached over the portal's REST API.
pub struct HttpAuthority {
    base_url: String,
}

impl HttpAuthority {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

impl SlotAuthority for HttpAuthority {
    fn get_balance<'a>(&'a self, identity: &'a PlayerIdentity) -> LocalBoxFuture<'a, Result<i64, SlotError>> {
        async move {
            let auth = bearer(&identity.token)?;
            let url = format!(
                "{}?server_id={}&account_id={}",
                self.url(BALANCE_ENDPOINT),
                encode(&identity.server_id),
                encode(&identity.account_id)
            );

            let response = Request::get(&url)
                .header("Authorization", &auth)
                .send()
                .await
                .map_err(network_error)?;
            if !response.ok() {
                return Err(read_error(response).await);
            }

            let body = response
                .json::<BalanceResponse>()
                .await
                .map_err(|e| SlotError::Decode(e.to_string()))?;
            Ok(body.whole_credits())
        }
        .boxed_local()
    }

    fn claim<'a>(
        &'a self,
        identity: &'a PlayerIdentity,
        language: &'a str,
    ) -> LocalBoxFuture<'a, Result<ClaimResponse, SlotError>> {
        async move {
            let auth = bearer(&identity.token)?;
            let body = ClaimRequest {
                server_id: identity.server_id.clone(),
                account_id: identity.account_id.clone(),
                character_id: identity.character_id.clone(),
                language: language.to_string(),
            };

            let response = Request::post(&self.url(CLAIM_ENDPOINT))
                .header("Authorization", &auth)
                .json(&body)
                .map_err(network_error)?
                .send()
                .await
                .map_err(network_error)?;
            if !response.ok() {
                return Err(read_error(response).await);
            }

            response
                .json::<ClaimResponse>()
                .await
                .map_err(|e| SlotError::Decode(e.to_string()))
        }
        .boxed_local()
    }

    fn exchange<'a>(
        &'a self,
        identity: &'a PlayerIdentity,
        request: &'a ExchangeRequest,
    ) -> LocalBoxFuture<'a, Result<(), SlotError>> {
        async move {
            let auth = bearer(&identity.token)?;
            let response = Request::post(&self.url(EXCHANGE_ENDPOINT))
                .header("Authorization", &auth)
                .json(&ExchangeBody { identity, request })
                .map_err(network_error)?
                .send()
                .await
                .map_err(network_error)?;

            if response.ok() {
                Ok(())
            } else {
                Err(read_error(response).await)
            }
        }
        .boxed_local()
    }
}

/// Browser timers for the reel animation and claim timeout.
pub struct GlooTicker;

impl Ticker for GlooTicker {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        TimeoutFuture::new(ms).boxed_local()
    }
}
