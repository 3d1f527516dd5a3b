use yew::prelude::*;

use crate::engine::progress::{contiguous, split_words};
use crate::engine::{OutputRange, ScrollOffsets, SegmentStyle};
use crate::hooks::use_segment_reveal;

#[derive(Properties, PartialEq)]
pub struct ScrollRevealProps {
    pub text: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Heading whose words brighten one after another as it rises from 90% to
/// 25% of the viewport.
#[function_component(ScrollReveal)]
pub fn scroll_reveal(props: &ScrollRevealProps) -> Html {
    let target = use_node_ref();
    let words = use_memo(|text| split_words(text), props.text.clone());
    let segments = use_memo(|count| contiguous(*count), words.len());
    let reveal = use_segment_reveal(
        target.clone(),
        segments,
        OutputRange::DIMMED_OPACITY,
        SegmentStyle::Opacity,
        ScrollOffsets::HEADING_REVEAL,
    );

    html! {
        <h2 ref={target} class={classes!("scroll-reveal", props.class.clone())}>
            <style>
                {r#"
                    .scroll-reveal {
                        display: flex;
                        flex-wrap: wrap;
                        column-gap: 0.3em;
                        row-gap: 0.5rem;
                    }
                    .scroll-reveal__word {
                        position: relative;
                        display: inline-block;
                    }
                    .scroll-reveal__ghost {
                        position: absolute;
                        opacity: 0.1;
                    }
                "#}
            </style>
            { for words.iter().enumerate().map(|(i, word)| html! {
                <span class="scroll-reveal__word">
                    <span class="scroll-reveal__ghost">{ word.clone() }</span>
                    <span
                        ref={reveal.node(i)}
                        style={SegmentStyle::Opacity.inline(reveal.value(i))}
                    >
                        { word.clone() }
                    </span>
                </span>
            }) }
        </h2>
    }
}
