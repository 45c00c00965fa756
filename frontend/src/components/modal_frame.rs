use yew::prelude::*;
use web_sys::MouseEvent;

#[derive(Properties, PartialEq)]
pub struct ModalFrameProps {
    pub title: AttrValue,
    pub on_close: Callback<MouseEvent>,
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub footer: Html,
}

/// Dimmed overlay with a centered panel. Clicking outside the panel closes it.
#[function_component(ModalFrame)]
pub fn modal_frame(props: &ModalFrameProps) -> Html {
    html! {
        <div
            class="fixed inset-0 z-[1100] bg-black/90 backdrop-blur-md overflow-y-auto"
            onclick={props.on_close.clone()}
        >
            <div class="flex min-h-full items-end justify-center p-4 text-center sm:items-center sm:p-0">
                <div
                    onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                    class="relative transform overflow-hidden rounded-lg bg-gray-900 text-left shadow-xl transition-all sm:my-8 sm:w-full sm:max-w-lg"
                >
                    <div class="p-6">
                        <h3 class="text-2xl font-semibold text-white mb-4">{props.title.clone()}</h3>
                        {props.children.clone()}
                    </div>
                    <div class="bg-gray-800 px-4 py-3 sm:flex sm:flex-row-reverse sm:px-6">
                        {props.footer.clone()}
                    </div>
                </div>
            </div>
        </div>
    }
}
