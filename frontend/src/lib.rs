pub mod base;
pub mod components;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod services;
pub mod styles;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::base::Base;
use crate::pages::{dashboard::Dashboard, games::Games};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen w-full">
                <Switch<Route> render={switch} />
            </div>
        </BrowserRouter>
    }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Games /> },
        Route::Dashboard => html! { <Dashboard /> },
        Route::NotFound => html! {
            <Base>
                <div class="max-w-7xl mx-auto px-4 py-16 text-center">
                    <h1 class={styles::TEXT_H1}>{"Page not found"}</h1>
                    <Link<Route> to={Route::Home} classes={styles::NAV_LINK}>{"Back to the slots"}</Link<Route>>
                </div>
            </Base>
        },
    }
}
