mod advertising_form;
mod constraints;
mod teleport_form;

use yew::prelude::*;

use crate::base::Base;
use crate::styles;
use advertising_form::AdvertisingForm;
use teleport_form::TeleportForm;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    html! {
        <Base>
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6 space-y-6">
                <h1 class={styles::TEXT_H1}>{"Admin dashboard"}</h1>
                <p class={styles::TEXT_BODY}>{"Manage teleport destinations and advertised realms."}</p>
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <TeleportForm />
                    <AdvertisingForm />
                </div>
            </div>
        </Base>
    }
}
