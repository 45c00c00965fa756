use web_sys::window;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{styles, Route};

const THEME_KEY: &str = "theme";

#[derive(Properties, PartialEq)]
pub struct BaseProps {
    pub children: Html,
}

fn stored_dark_mode() -> bool {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(THEME_KEY).ok().flatten())
        .map_or(true, |theme| theme == "dark")
}

fn apply_theme(dark_mode: bool) {
    let theme = if dark_mode { "dark" } else { "light" };
    let Some(window) = window() else { return };

    if let Some(html) = window.document().and_then(|d| d.document_element()) {
        html.set_class_name(theme);
    }
    if let Some(storage) = window.local_storage().ok().flatten() {
        if storage.set_item(THEME_KEY, theme).is_err() {
            log::warn!("Could not persist theme preference");
        }
    }
}

#[function_component(Base)]
pub fn base(props: &BaseProps) -> Html {
    let dark_mode = use_state(stored_dark_mode);

    {
        let dark_mode = *dark_mode;
        use_effect_with(dark_mode, move |dark_mode| {
            apply_theme(*dark_mode);
            || ()
        });
    }

    let toggle_theme = {
        let dark_mode = dark_mode.clone();
        Callback::from(move |_: MouseEvent| dark_mode.set(!*dark_mode))
    };

    html! {
        <div class={if *dark_mode { "dark min-h-screen bg-gray-900" } else { "min-h-screen bg-gray-50" }}>
            <nav class={styles::NAV}>
                <div class={styles::NAV_INNER}>
                    <div class={styles::NAV_CONTENT}>
                        <Link<Route> to={Route::Home} classes={styles::NAV_BRAND}>{"Realm Portal"}</Link<Route>>
                        <div class={styles::NAV_ITEMS}>
                            <Link<Route> to={Route::Home} classes={styles::NAV_LINK}>{"Slots"}</Link<Route>>
                            <Link<Route> to={Route::Dashboard} classes={styles::NAV_LINK}>{"Dashboard"}</Link<Route>>
                            <button type="button" class={styles::NAV_LINK} onclick={toggle_theme}>
                                {if *dark_mode { "Light" } else { "Dark" }}
                            </button>
                        </div>
                    </div>
                </div>
            </nav>
            <main class="pt-16">
                {props.children.clone()}
            </main>
        </div>
    }
}
