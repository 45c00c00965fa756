use shared::slot_session::SlotSession;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::{get_api_base_url, language, player_identity};
use crate::services::slot_authority::{GlooTicker, HttpAuthority};

pub type PortalSlotSession = SlotSession<HttpAuthority, GlooTicker>;

/// Owns the slot session for the lifetime of the calling component: the
/// balance is fetched on mount and any running spin is cancelled on unmount.
#[hook]
pub fn use_slot_session() -> PortalSlotSession {
    let update = use_force_update();

    let session = use_memo((), move |_| {
        SlotSession::new(
            HttpAuthority::new(get_api_base_url()),
            GlooTicker,
            player_identity(),
            &language(),
        )
        .on_change(move || update.force_update())
    });

    {
        let session = (*session).clone();
        use_effect_with((), move |_| {
            let loader = session.clone();
            spawn_local(async move {
                if let Err(err) = loader.load_balance().await {
                    log::warn!("Initial balance unavailable: {}", err);
                }
            });

            move || session.cancel()
        });
    }

    (*session).clone()
}
