use yew::prelude::*;

use crate::hooks::{use_active_regions, use_scrolled_past, use_theme};

/// Scroll distance after which the header condenses.
const CONDENSE_AFTER_PX: f64 = 50.0;

/// Nav label and the theme region that marks its section as current.
const SECTIONS: [(&str, Option<&str>); 4] = [
    ("Solutions", Some("system-services")),
    ("Industries", Some("how-it-works")),
    ("Testimonials", Some("social-proof")),
    ("FAQ", None),
];

#[function_component(Header)]
pub fn header() -> Html {
    let theme = use_theme();
    let scrolled = use_scrolled_past(CONDENSE_AFTER_PX);
    let active = use_active_regions();

    html! {
        <header class={classes!("site-header", theme.as_str(), scrolled.then(|| "scrolled"))}>
            <style>
                {r#"
                    .site-header {
                        position: sticky;
                        top: 0;
                        z-index: 100;
                        padding: 1.25rem 0;
                        transition: background-color 0.4s, padding 0.3s, border-color 0.3s;
                        background: #ffffff;
                        border-bottom: 1px solid transparent;
                    }
                    .site-header.dark {
                        background: transparent;
                    }
                    .site-header.scrolled {
                        padding: 0.75rem 0;
                        background: rgba(255, 255, 255, 0.8);
                        backdrop-filter: blur(8px);
                        border-bottom-color: rgba(228, 228, 231, 0.5);
                    }
                    .site-header.dark.scrolled {
                        background: rgba(0, 0, 0, 0.9);
                        border-bottom-color: rgba(255, 255, 255, 0.1);
                    }
                    .site-header__content {
                        max-width: 80rem;
                        margin: 0 auto;
                        padding: 0 2rem;
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                    }
                    .site-header__logo {
                        font-weight: 700;
                        font-size: 1.25rem;
                        color: var(--text-strong);
                        text-decoration: none;
                    }
                    .site-header__links {
                        display: flex;
                        gap: 2rem;
                    }
                    .site-header__links a {
                        color: var(--text-muted);
                        text-decoration: none;
                        font-size: 0.875rem;
                        border-bottom: 2px solid transparent;
                        transition: color 0.3s, border-color 0.3s;
                    }
                    .site-header__links a.current {
                        color: var(--text-strong);
                        border-bottom-color: currentColor;
                    }
                    @media (max-width: 768px) {
                        .site-header__links { display: none; }
                    }
                "#}
            </style>
            <div class="site-header__content">
                <a href="#" class="site-header__logo">{"Scaleon"}</a>
                <nav class="site-header__links">
                    { for SECTIONS.iter().map(|(label, region)| {
                        let current = region.map_or(false, |region| active.contains(region));
                        html! {
                            <a
                                href={format!("#{}", label.to_lowercase())}
                                class={classes!(current.then(|| "current"))}
                            >
                                { *label }
                            </a>
                        }
                    }) }
                    <a href="#contact">{"Contact Us"}</a>
                </nav>
            </div>
        </header>
    }
}
