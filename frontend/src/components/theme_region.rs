use yew::prelude::*;

use crate::hooks::use_theme_region;

#[derive(Properties, PartialEq)]
pub struct ThemeRegionProps {
    pub id: AttrValue,
}

/// Invisible marker covering its positioned parent. While it crosses the
/// detection band the page switches to the dark theme.
#[function_component(ThemeRegion)]
pub fn theme_region(props: &ThemeRegionProps) -> Html {
    let node = use_node_ref();
    use_theme_region(props.id.clone(), node.clone());

    html! {
        <div
            ref={node}
            class="theme-region"
            data-region={props.id.clone()}
            aria-hidden="true"
            style="position: absolute; inset: 0; pointer-events: none;"
        />
    }
}
