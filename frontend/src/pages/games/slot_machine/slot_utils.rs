use shared::shared_slot_game::{OutcomeKind, SpinOutcome, SPIN_COST};
use yew::prelude::*;

pub fn format_credits(credits: f64) -> String {
    if credits.fract() == 0.0 {
        format!("{:.0}", credits)
    } else {
        format!("{}", credits)
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub outcome: Option<SpinOutcome>,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    let Some(outcome) = &props.outcome else {
        return html! {};
    };

    let (gradient_classes, animation_class) = match outcome.kind {
        OutcomeKind::Win => ("from-yellow-400 to-orange-600 border-yellow-300", "animate-bounce"),
        OutcomeKind::Loss => ("from-violet-400 to-violet-600 border-violet-300", ""),
        OutcomeKind::Error => ("from-red-500 to-red-700 border-red-300", ""),
    };

    html! {
        <div class="mt-8 mb-4 flex justify-center">
            <div class={classes!(
                "px-6",
                "py-4",
                "rounded-xl",
                "bg-gradient-to-r",
                "text-white",
                "font-bold",
                "text-lg",
                "shadow-lg",
                "border-2",
                animation_class,
                gradient_classes
            )}>
                {outcome.message.clone()}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub has_enough_balance: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning {
        "Spinning...".to_string()
    } else if !props.has_enough_balance {
        "Not enough credits".to_string()
    } else {
        format!("Spin ({} credit)", SPIN_COST)
    };

    let is_disabled = props.is_spinning || !props.has_enough_balance;

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let spin_icon_class = if props.is_spinning {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <div class={classes!("relative", "overflow-hidden", "rounded-full", "w-full", button_class)}>
            <button
                onclick={props.onclick.clone()}
                disabled={is_disabled}
                class="relative w-full px-8 py-4 font-bold text-lg transition-all duration-300 border-2 border-transparent hover:border-white focus:outline-none focus:ring-4 focus:ring-yellow-300 focus:ring-opacity-50 bg-transparent"
            >
                <div class="flex items-center justify-center">
                    <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                        <circle cx="12" cy="12" r="10" />
                        <path d="M12 6v6l4 2" />
                    </svg>
                    <span>{button_text}</span>
                </div>
            </button>
        </div>
    }
}
