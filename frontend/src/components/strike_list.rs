use yew::prelude::*;

use crate::engine::progress::staggered;
use crate::engine::{OutputRange, ScrollOffsets, SegmentStyle};
use crate::hooks::use_segment_reveal;

/// Spacing between consecutive items' strike ranges.
const STAGGER: f64 = 0.18;
const STRIKE_WIDTH: f64 = 0.22;

#[derive(Properties, PartialEq)]
pub struct StrikeListProps {
    pub items: Vec<AttrValue>,
}

/// Numbered list whose items get struck through one by one as it scrolls up.
#[function_component(StrikeList)]
pub fn strike_list(props: &StrikeListProps) -> Html {
    let target = use_node_ref();
    let segments = use_memo(
        |count| staggered(*count, STAGGER, STRIKE_WIDTH),
        props.items.len(),
    );
    let reveal = use_segment_reveal(
        target.clone(),
        segments,
        OutputRange::UNIT,
        SegmentStyle::ScaleX,
        ScrollOffsets::LIST_STRIKE,
    );

    html! {
        <div ref={target} class="strike-list">
            <style>
                {r#"
                    .strike-list__item {
                        position: relative;
                        cursor: default;
                    }
                    .strike-list__row {
                        display: flex;
                        align-items: center;
                        gap: 1.5rem;
                        padding: 1.5rem 0;
                        border-bottom: 1px solid rgba(255, 255, 255, 0.05);
                    }
                    .strike-list__index {
                        width: 3rem;
                        height: 3rem;
                        flex-shrink: 0;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        border-radius: 50%;
                        font-family: monospace;
                        color: #71717a;
                    }
                    .strike-list__text {
                        font-size: 1.5rem;
                        font-weight: 300;
                        color: #a1a1aa;
                        margin: 0;
                    }
                    .strike-list__line {
                        position: absolute;
                        left: 4rem;
                        right: 0;
                        top: 50%;
                        height: 1px;
                        background: #ef4444;
                        opacity: 0.5;
                        transform-origin: left;
                    }
                "#}
            </style>
            { for props.items.iter().enumerate().map(|(i, item)| html! {
                <div class="strike-list__item">
                    <div class="strike-list__row">
                        <div class="strike-list__index">{ format!("{:02}", i + 1) }</div>
                        <h3 class="strike-list__text">{ item.clone() }</h3>
                    </div>
                    <div
                        ref={reveal.node(i)}
                        class="strike-list__line"
                        style={SegmentStyle::ScaleX.inline(reveal.value(i))}
                    />
                </div>
            }) }
        </div>
    }
}
