use shared::exchange::{ExchangeForm, ExchangeKind};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::slot_utils::format_credits;
use crate::components::ModalFrame;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ExchangeModalProps {
    pub form: ExchangeForm,
    pub on_kind: Callback<ExchangeKind>,
    pub on_amount: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(ExchangeModal)]
pub fn exchange_modal(props: &ExchangeModalProps) -> Html {
    let form = &props.form;

    let oninput = {
        let on_amount = props.on_amount.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_amount.emit(input.value());
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let rate_hint = match form.kind {
        ExchangeKind::Voting => "1 voting point = 1 credit",
        ExchangeKind::Gold => "1000 gold = 1 credit",
    };

    let footer = html! {
        <>
            <button
                type="submit"
                form="exchange-form"
                disabled={form.submitting}
                class={classes!(styles::BUTTON_PRIMARY, "w-full", "sm:ml-3", "sm:w-auto")}
            >
                {if form.submitting { "Processing..." } else { "Exchange" }}
            </button>
            <button
                type="button"
                disabled={form.submitting}
                onclick={props.on_close.clone()}
                class={classes!(styles::BUTTON_SECONDARY, "mt-3", "w-full", "sm:mt-0", "sm:w-auto")}
            >
                {"Cancel"}
            </button>
        </>
    };

    html! {
        <ModalFrame title="Exchange for credits" on_close={props.on_close.clone()} {footer}>
            <form id="exchange-form" class={styles::FORM} {onsubmit}>
                <div class="flex gap-2">
                    {for ExchangeKind::ALL.iter().map(|kind| {
                        let kind = *kind;
                        let on_kind = props.on_kind.clone();
                        html! {
                            <button
                                type="button"
                                onclick={move |_| on_kind.emit(kind)}
                                class={classes!(
                                    "flex-1", "px-4", "py-2", "rounded-lg", "transition-all",
                                    if form.kind == kind {
                                        "bg-blue-500 text-white"
                                    } else {
                                        "bg-gray-700 text-gray-300"
                                    }
                                )}
                            >
                                {kind.label()}
                            </button>
                        }
                    })}
                </div>

                <div>
                    <label for="exchange-amount" class="block text-sm font-medium text-white">{"Amount"}</label>
                    <input
                        id="exchange-amount"
                        type="number"
                        min="0"
                        step="any"
                        value={form.amount_input.clone()}
                        class={if form.field_error.is_some() { styles::INPUT_ERROR } else { styles::INPUT }}
                        {oninput}
                    />
                    if let Some(error) = &form.field_error {
                        <p class={styles::TEXT_ERROR}>{error.clone()}</p>
                    }
                    <p class={styles::TEXT_HINT}>{rate_hint}</p>
                </div>

                if let Some(credits) = form.preview_credits() {
                    <p class="text-gray-300">
                        {format!("You will receive {} credits", format_credits(credits))}
                    </p>
                }

                if let Some(error) = &form.submit_error {
                    <div class="p-4 bg-red-500/10 border border-red-500/20 rounded-lg">
                        <p class="text-red-500">{error.clone()}</p>
                    </div>
                }
            </form>
        </ModalFrame>
    }
}
