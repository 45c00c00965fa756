use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::constraints::teleport_constraints;
use crate::components::FormField;
use crate::hooks::{use_form_state, use_validated_form};
use crate::services::admin::{submit_form, TELEPORT_ENDPOINT};
use crate::styles;

#[function_component(TeleportForm)]
pub fn teleport_form() -> Html {
    let table = use_memo((), |_| teleport_constraints());
    let form = use_validated_form(table);
    let state = use_form_state();

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
                match submit_form(TELEPORT_ENDPOINT, &values).await {
                    Ok(()) => {
                        reset.emit(());
                        state.handle_success.emit("Teleport saved".to_string());
                    }
                    Err(err) => state.handle_error.emit(err.user_message()),
                }
            });
        })
    };

    html! {
        <div class={styles::CARD}>
            <h2 class={styles::TEXT_H2}>{"Teleport"}</h2>
            <form class={styles::FORM} {onsubmit}>
                <FormField name="name" label="Name" value={form.value("name")}
                    error={form.visible_error("name")} on_input={form.on_input.clone()} />
                <FormField name="map_id" label="Map" value={form.value("map_id")}
                    placeholder="dalaran_square" hint="Lowercase letters, digits and underscores"
                    error={form.visible_error("map_id")} on_input={form.on_input.clone()} />
                <div class="grid grid-cols-3 gap-3">
                    {for ["x", "y", "z"].into_iter().map(|axis| html! {
                        <FormField name={axis} label={axis.to_uppercase()} input_type="number"
                            value={form.value(axis)} error={form.visible_error(axis)}
                            on_input={form.on_input.clone()} />
                    })}
                </div>
                <FormField name="preview_url" label="Preview image URL" value={form.value("preview_url")}
                    placeholder="https://" error={form.visible_error("preview_url")}
                    on_input={form.on_input.clone()} />

                if !state.error.is_empty() {
                    <div class={styles::ALERT_ERROR}>{state.error.clone()}</div>
                }
                if !state.success.is_empty() {
                    <div class={styles::ALERT_SUCCESS}>{state.success.clone()}</div>
                }

                <button type="submit" class={styles::BUTTON_PRIMARY} disabled={state.submitting}>
                    {if state.submitting { "Saving..." } else { "Save teleport" }}
                </button>
            </form>
        </div>
    }
}
