use shared::shared_slot_game::RewardDescriptor;
use yew::prelude::*;

use crate::components::ModalFrame;
use crate::config::get_asset_url;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct WinModalProps {
    pub reward: RewardDescriptor,
    pub on_close: Callback<MouseEvent>,
}

/// Shows the authority's reward exactly as it was sent.
#[function_component(WinModal)]
pub fn win_modal(props: &WinModalProps) -> Html {
    let reward = &props.reward;

    let footer = html! {
        <button type="button" class={styles::BUTTON_PRIMARY} onclick={props.on_close.clone()}>
            {"Collect"}
        </button>
    };

    html! {
        <ModalFrame title="You won!" on_close={props.on_close.clone()} {footer}>
            <div class="flex flex-col items-center text-center space-y-3">
                if let Some(logo) = &reward.logo_url {
                    <img
                        src={get_asset_url(logo)}
                        alt={reward.name.clone()}
                        class="w-24 h-24 object-contain select-none"
                        draggable="false"
                    />
                }
                <div class="text-xl font-bold text-yellow-400">{reward.name.clone()}</div>
                <div class="text-xs uppercase tracking-wide text-gray-400">{reward.kind.clone()}</div>
                <p class="text-gray-300">{reward.message.clone()}</p>
            </div>
        </ModalFrame>
    }
}
