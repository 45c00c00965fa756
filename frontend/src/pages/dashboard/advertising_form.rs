use shared::validation::error_message;
use shared::validation::validate_field;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use super::constraints::advertising_constraints;
use crate::components::FormField;
use crate::hooks::{use_form_state, use_validated_form};
use crate::services::admin::{submit_form, ADVERTISING_ENDPOINT};
use crate::styles;

#[function_component(AdvertisingForm)]
pub fn advertising_form() -> Html {
    let table = use_memo((), |_| advertising_constraints());
    let form = use_validated_form(table.clone());
    let state = use_form_state();

    let on_description = {
        let on_input = form.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            on_input.emit(("description".to_string(), area.value()));
        })
    };

    // Live check while typing, independent of the touched state
    let description_error = table
        .get("description")
        .and_then(|rules| validate_field("description", &form.value("description"), rules).err())
        .map(|e| error_message(&e));

    let onsubmit = {
        let form = form.clone();
        let state = state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !form.validation.is_valid {
                form.reveal_errors.emit(());
                return;
            }

            let values = form.values.clone();
            let reset = form.reset.clone();
            let state = state.clone();
            state.handle_start.emit(());
            spawn_local(async move {
                match submit_form(ADVERTISING_ENDPOINT, &values).await {
                    Ok(()) => {
                        reset.emit(());
                        state.handle_success.emit("Realm advertisement saved".to_string());
                    }
                    Err(err) => state.handle_error.emit(err.user_message()),
                }
            });
        })
    };

    html! {
        <div class={styles::CARD}>
            <h2 class={styles::TEXT_H2}>{"Advertised realm"}</h2>
            <form class={styles::FORM} {onsubmit}>
                <FormField name="realm_name" label="Realm name" value={form.value("realm_name")}
                    error={form.visible_error("realm_name")} on_input={form.on_input.clone()} />
                <FormField name="website" label="Website" value={form.value("website")}
                    placeholder="https://" error={form.visible_error("website")}
                    on_input={form.on_input.clone()} />
                <FormField name="discord" label="Discord invite" value={form.value("discord")}
                    placeholder="https://discord.gg/" error={form.visible_error("discord")}
                    on_input={form.on_input.clone()} />
                <FormField name="rate_multiplier" label="XP rate" input_type="number"
                    value={form.value("rate_multiplier")} hint="Between 1 and 1000"
                    error={form.visible_error("rate_multiplier")} on_input={form.on_input.clone()} />

                <div>
                    <label for="description" class={styles::TEXT_LABEL}>{"Description"}</label>
                    <textarea
                        id="description"
                        rows="4"
                        value={form.value("description")}
                        class={if description_error.is_some() { styles::INPUT_ERROR } else { styles::INPUT }}
                        oninput={on_description}
                    />
                    <p class={if description_error.is_some() { styles::TEXT_ERROR } else { styles::TEXT_HINT }}>
                        {description_error.unwrap_or_else(|| format!("{}/500", form.value("description").chars().count()))}
                    </p>
                </div>

                if !state.error.is_empty() {
                    <div class={styles::ALERT_ERROR}>{state.error.clone()}</div>
                }
                if !state.success.is_empty() {
                    <div class={styles::ALERT_SUCCESS}>{state.success.clone()}</div>
                }

                <button type="submit" class={styles::BUTTON_PRIMARY} disabled={state.submitting}>
                    {if state.submitting { "Saving..." } else { "Save realm" }}
                </button>
            </form>
        </div>
    }
}
