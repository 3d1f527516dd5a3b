use yew::prelude::*;

use crate::engine::progress::{contiguous, split_words};
use crate::engine::{OutputRange, ScrollOffsets, SegmentStyle};
use crate::hooks::use_segment_reveal;

#[derive(Properties, PartialEq)]
pub struct TextRevealProps {
    pub text: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// A 200vh block with a sticky paragraph; words light up across the whole
/// time the block stays pinned.
#[function_component(TextRevealByWord)]
pub fn text_reveal_by_word(props: &TextRevealProps) -> Html {
    let target = use_node_ref();
    let words = use_memo(|text| split_words(text), props.text.clone());
    let segments = use_memo(|count| contiguous(*count), words.len());
    let reveal = use_segment_reveal(
        target.clone(),
        segments,
        OutputRange::UNIT,
        SegmentStyle::Opacity,
        ScrollOffsets::PINNED,
    );

    html! {
        <div ref={target} class={classes!("text-reveal", props.class.clone())}>
            <style>
                {r#"
                    .text-reveal {
                        position: relative;
                        z-index: 0;
                        height: 200vh;
                    }
                    .text-reveal__sticky {
                        position: sticky;
                        top: 0;
                        height: 50%;
                        max-width: 56rem;
                        margin: 0 auto;
                        display: flex;
                        align-items: center;
                        padding: 5rem 1rem;
                    }
                    .text-reveal__text {
                        display: flex;
                        flex-wrap: wrap;
                        font-size: clamp(1.5rem, 4vw, 3rem);
                        font-weight: 700;
                        color: var(--text-faint);
                    }
                    .text-reveal__word {
                        position: relative;
                        margin: 0 0.25rem;
                    }
                    .text-reveal__ghost {
                        position: absolute;
                        opacity: 0.3;
                    }
                    .text-reveal__ink {
                        color: var(--text-strong);
                    }
                "#}
            </style>
            <div class="text-reveal__sticky">
                <p class="text-reveal__text">
                    { for words.iter().enumerate().map(|(i, word)| html! {
                        <span class="text-reveal__word">
                            <span class="text-reveal__ghost">{ word.clone() }</span>
                            <span
                                ref={reveal.node(i)}
                                class="text-reveal__ink"
                                style={SegmentStyle::Opacity.inline(reveal.value(i))}
                            >
                                { word.clone() }
                            </span>
                        </span>
                    }) }
                </p>
            </div>
        </div>
    }
}
