mod slot_machine;

use yew::prelude::*;

use crate::base::Base;
use slot_machine::SlotMachineGame;

#[function_component(Games)]
pub fn games() -> Html {
    html! {
        <Base>
            <SlotMachineGame />
        </Base>
    }
}
