mod exchange_modal;
mod reel_display;
mod slot_utils;
mod win_modal;

use shared::exchange::ExchangeKind;
use shared::shared_slot_game::{SpinPhase, SPIN_COST};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_slot_session::use_slot_session;
use crate::styles;
use exchange_modal::ExchangeModal;
use reel_display::ReelDisplay;
use slot_utils::{ResultDisplay, SpinButton};
use win_modal::WinModal;

#[function_component(SlotMachineGame)]
pub fn slot_machine_game() -> Html {
    let session = use_slot_session();
    let state = session.snapshot();
    let form = session.exchange_form();

    let on_spin = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            // None means the click was dropped by the spin guard
            if let Some(cycle) = session.spin() {
                spawn_local(async move {
                    let phase = cycle.await;
                    log::debug!("Spin cycle finished in {:?}", phase);
                });
            }
        })
    };

    let on_close_reward = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.close_modal())
    };

    let on_open_exchange = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.open_exchange(ExchangeKind::Voting))
    };

    let on_kind = {
        let session = session.clone();
        Callback::from(move |kind: ExchangeKind| session.set_exchange_kind(kind))
    };

    let on_amount = {
        let session = session.clone();
        Callback::from(move |raw: String| session.set_exchange_amount(raw))
    };

    let on_submit = {
        let session = session.clone();
        Callback::from(move |_: ()| {
            let session = session.clone();
            spawn_local(async move {
                if let Err(err) = session.submit_exchange().await {
                    log::debug!("Exchange not completed: {}", err);
                }
            });
        })
    };

    let on_close_exchange = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.close_exchange())
    };

    html! {
        <div class="container mx-auto px-4 py-8">
            <h1 class="text-3xl font-bold mb-6 text-center text-gray-900 dark:text-white">
                <span class="bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 to-orange-500">{"Lucky Slots"}</span>
            </h1>

            <div class={styles::SLOT_CABINET}>
                <div class="flex items-center justify-between mb-6">
                    <span class={styles::BALANCE_BADGE}>{format!("{} credits", state.balance)}</span>
                    <button type="button" class={styles::BUTTON_SECONDARY} onclick={on_open_exchange}>
                        {"Get credits"}
                    </button>
                </div>

                <ReelDisplay symbols={state.symbols} spinning={state.spinning} />

                <div class="flex justify-center mt-8">
                    <div class="w-full max-w-[300px]">
                        <SpinButton
                            is_spinning={state.spinning}
                            has_enough_balance={state.balance >= SPIN_COST}
                            onclick={on_spin}
                        />
                    </div>
                </div>

                <ResultDisplay outcome={state.last_outcome.clone()} />

                <div class="mt-8 text-center bg-gray-50 dark:bg-gray-700/30 p-6 rounded-xl shadow-sm">
                    <h3 class="font-bold text-lg mb-3 text-gray-800 dark:text-gray-200">{"How to Play"}</h3>
                    <p class="text-gray-700 dark:text-gray-300">
                        {format!("Each spin costs {} credit. Line up three symbols to win a prize for your character. Exchange voting points or gold for more credits.", SPIN_COST)}
                    </p>
                </div>
            </div>

            if state.phase() == SpinPhase::WinDialogOpen {
                if let Some(reward) = state.pending_reward.clone() {
                    <WinModal {reward} on_close={on_close_reward} />
                }
            }

            if form.open {
                <ExchangeModal
                    form={form.clone()}
                    {on_kind}
                    {on_amount}
                    {on_submit}
                    on_close={on_close_exchange}
                />
            }
        </div>
    }
}
