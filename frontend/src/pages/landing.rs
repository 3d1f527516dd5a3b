use yew::prelude::*;

use crate::components::scroll_reveal::ScrollReveal;
use crate::components::strike_list::StrikeList;
use crate::components::text_reveal::TextRevealByWord;
use crate::components::theme_region::ThemeRegion;

const PROBLEM: &str = "Most teams lose hours every week to work a system could do for them. \
    Leads slip, follow-ups stall and nobody owns the handoff.";

const PHILOSOPHY: &str = "We build small, dependable systems that remove manual work, \
    then we stay around to make sure they keep working.";

const SERVICES: [(&str, &str); 3] = [
    ("Lead capture", "Every enquiry lands in one place with the context attached."),
    ("Follow-up automation", "Reminders and replies go out on time without anyone chasing."),
    ("Reporting", "One weekly view of what moved and what got stuck."),
];

const STEPS: [(&str, &str); 3] = [
    ("Map", "We sit with the team and write down the manual way."),
    ("Build", "We automate the slowest step first and ship it."),
    ("Hand over", "You get docs, training and a system you understand."),
];

const NEGATIVES: [&str; 4] = [
    "We don\u{2019}t sell generic software.",
    "We don\u{2019}t force unnecessary tools.",
    "We don\u{2019}t disappear after delivery.",
    "We don\u{2019}t build systems you can\u{2019}t understand.",
];

const TESTIMONIALS: [(&str, &str); 2] = [
    ("Our follow-ups went from days to minutes.", "Operations lead, logistics"),
    ("It replaced three spreadsheets and a whiteboard.", "Founder, clinic group"),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    let negatives: Vec<AttrValue> = NEGATIVES.iter().map(|item| AttrValue::from(*item)).collect();

    html! {
        <main class="landing">
            <style>
                {r#"
                    .landing section {
                        position: relative;
                        padding: 8rem 2rem;
                    }
                    .landing .inner {
                        max-width: 56rem;
                        margin: 0 auto;
                        position: relative;
                        z-index: 1;
                    }
                    .hero h1 {
                        font-size: clamp(2.5rem, 6vw, 4.5rem);
                        line-height: 1.1;
                        color: var(--text-strong);
                        margin: 0 0 1.5rem;
                    }
                    .hero p, .section-lead {
                        color: var(--text-muted);
                        font-size: 1.25rem;
                    }
                    .problem .scroll-reveal {
                        font-size: clamp(1.75rem, 4vw, 3rem);
                        color: var(--text-strong);
                    }
                    .card-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr));
                        gap: 1.5rem;
                        margin-top: 3rem;
                    }
                    .card {
                        padding: 2rem;
                        border-radius: 1.5rem;
                        border: 1px solid var(--border);
                    }
                    .card h3 {
                        color: var(--text-strong);
                        margin-top: 0;
                    }
                    .card p {
                        color: var(--text-muted);
                        margin-bottom: 0;
                    }
                    .landing h2 {
                        color: var(--text-strong);
                        font-size: clamp(2rem, 5vw, 3.5rem);
                        margin: 0 0 1rem;
                    }
                    .manifesto-tag {
                        display: inline-block;
                        margin-bottom: 1.5rem;
                        padding: 0.375rem 1rem;
                        border-radius: 999px;
                        border: 1px solid rgba(127, 29, 29, 0.3);
                        color: #f87171;
                        font-size: 0.75rem;
                        font-weight: 700;
                        letter-spacing: 0.1em;
                        text-transform: uppercase;
                    }
                    blockquote {
                        margin: 0;
                        font-size: 1.5rem;
                        color: var(--text-strong);
                    }
                    blockquote footer {
                        margin-top: 1rem;
                        font-size: 0.875rem;
                        color: var(--text-muted);
                    }
                    .site-footer {
                        padding: 4rem 2rem;
                        text-align: center;
                        color: var(--text-muted);
                    }
                "#}
            </style>

            <section class="hero">
                <div class="inner">
                    <h1>{"Systems that do the busywork, so your team does not have to."}</h1>
                    <p>{"Automation and growth engines for service businesses."}</p>
                </div>
            </section>

            <section class="problem">
                <div class="inner">
                    <ScrollReveal text={PROBLEM} />
                </div>
            </section>

            <section id="solutions" class="services">
                <ThemeRegion id="system-services" />
                <div class="inner">
                    <h2>{"What we build"}</h2>
                    <div class="card-grid">
                        { for SERVICES.iter().map(|(title, body)| html! {
                            <div class="card">
                                <h3>{ *title }</h3>
                                <p>{ *body }</p>
                            </div>
                        }) }
                    </div>
                </div>
            </section>

            <section class="growth-engines">
                <ThemeRegion id="growth-engines" />
                <TextRevealByWord text={PHILOSOPHY} />
            </section>

            <section id="industries" class="how-it-works">
                <ThemeRegion id="how-it-works" />
                <div class="inner">
                    <h2>{"How it works"}</h2>
                    <div class="card-grid">
                        { for STEPS.iter().enumerate().map(|(i, (title, body))| html! {
                            <div class="card">
                                <p class="section-lead">{ format!("{:02}", i + 1) }</p>
                                <h3>{ *title }</h3>
                                <p>{ *body }</p>
                            </div>
                        }) }
                    </div>
                </div>
            </section>

            <section class="what-we-dont-do">
                <ThemeRegion id="what-we-dont-do" />
                <div class="inner">
                    <span class="manifesto-tag">{"Our Anti-Manifesto"}</span>
                    <h2>{"What We Don\u{2019}t Do"}</h2>
                    <StrikeList items={negatives} />
                </div>
            </section>

            <section id="testimonials" class="social-proof">
                <ThemeRegion id="social-proof" />
                <div class="inner card-grid">
                    { for TESTIMONIALS.iter().map(|(quote, who)| html! {
                        <blockquote class="card">
                            { *quote }
                            <footer>{ *who }</footer>
                        </blockquote>
                    }) }
                </div>
            </section>

            <section id="faq" class="faq">
                <div class="inner">
                    <h2>{"Questions"}</h2>
                    <p class="section-lead">{"Most projects ship their first automation within four weeks."}</p>
                </div>
            </section>

            <footer id="contact" class="site-footer">
                {"\u{a9} Scaleon Technologies"}
            </footer>
        </main>
    }
}
