use web_sys::{HtmlInputElement, InputEvent};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub name: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub hint: Option<AttrValue>,
    pub on_input: Callback<(String, String)>,
}

#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let oninput = {
        let name = props.name.to_string();
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit((name.clone(), input.value()));
        })
    };

    html! {
        <div>
            <label for={props.name.clone()} class={styles::TEXT_LABEL}>{props.label.clone()}</label>
            <input
                id={props.name.clone()}
                name={props.name.clone()}
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                class={if props.error.is_some() { styles::INPUT_ERROR } else { styles::INPUT }}
                {oninput}
            />
            {
                match (&props.error, &props.hint) {
                    (Some(error), _) => html! { <p class={styles::TEXT_ERROR}>{error.clone()}</p> },
                    (None, Some(hint)) => html! { <p class={styles::TEXT_HINT}>{hint.clone()}</p> },
                    (None, None) => html! {},
                }
            }
        </div>
    }
}
