use shared::shared_slot_game::{all_same, Reels};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ReelDisplayProps {
    pub symbols: Reels,
    pub spinning: bool,
}

#[function_component(ReelDisplay)]
pub fn reel_display(props: &ReelDisplayProps) -> Html {
    let jackpot = !props.spinning && all_same(&props.symbols) && props.symbols[0].is_winning();

    html! {
        <div class={styles::REEL_WINDOW}>
            {for props.symbols.iter().map(|symbol| {
                html! {
                    <div
                        class={classes!(
                            styles::REEL,
                            props.spinning.then_some(styles::REEL_SPINNING),
                            jackpot.then_some(styles::REEL_WINNING)
                        )}
                        aria-label={format!("{:?}", symbol)}
                    >
                        {symbol.glyph()}
                    </div>
                }
            })}
        </div>
    }
}
