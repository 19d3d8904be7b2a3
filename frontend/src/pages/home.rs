use yew::prelude::*;

use crate::components::orbital_timeline::OrbitalTimeline;
use crate::timeline::TimelineItem;

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub timeline_data: Vec<TimelineItem>,
}

#[function_component(Home)]
pub fn home(props: &HomeProps) -> Html {
    // Scroll to top only on initial mount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div class="landing-page">
            <style>
                {r#"
                    .landing-page {
                        width: 100%;
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        background: #000;
                        color: #fff;
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                    }
                    .hero {
                        max-width: 1280px;
                        margin: 0 auto;
                        padding: 144px 24px 96px;
                        display: flex;
                        flex-direction: column;
                        gap: 24px;
                    }
                    .hero-badge {
                        display: inline-flex;
                        align-self: flex-start;
                        gap: 8px;
                        padding: 6px 12px;
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        border-radius: 999px;
                        background: rgba(255, 255, 255, 0.05);
                        font-size: 12px;
                    }
                    .hero h1 { max-width: 672px; font-size: 64px; font-weight: 200; line-height: 1.05; margin: 0; }
                    .hero-subtitle { max-width: 576px; color: rgba(255, 255, 255, 0.75); font-weight: 300; }
                    .hero-cta-row { display: flex; gap: 12px; }
                    .hero-cta {
                        padding: 12px 20px;
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        border-radius: 16px;
                        color: rgba(255, 255, 255, 0.8);
                        text-decoration: none;
                        font-size: 14px;
                    }
                    .hero-cta.primary { background: rgba(255, 255, 255, 0.1); color: #fff; }
                    .hero-details { display: flex; gap: 24px; padding: 0; list-style: none; font-size: 12px; color: rgba(255, 255, 255, 0.6); }
                    .timeline-section h2 { text-align: center; font-size: 30px; font-weight: 200; margin-bottom: 16px; }
                    .timeline-section p { text-align: center; max-width: 576px; margin: 0 auto 48px; color: rgba(255, 255, 255, 0.6); }
                "#}
            </style>

            // Hero Section
            <section class="hero">
                <div class="hero-badge">
                    <span>{"NEW"}</span>
                    <span>{"Generative Surfaces"}</span>
                </div>
                <h1>{"Where algorithms become art."}</h1>
                <p class="hero-subtitle">
                    {"A minimal hero with a quiet orbit below: crisp, elegant, and gently in motion."}
                </p>
                <div class="hero-cta-row">
                    <a class="hero-cta primary" href="#timeline">{"Get started"}</a>
                </div>
                <ul class="hero-details">
                    <li>{"Low-weight font"}</li>
                    <li>{"Tight tracking"}</li>
                    <li>{"Subtle motion"}</li>
                </ul>
            </section>

            // Timeline Section
            <section id="timeline" class="timeline-section">
                <h2>{"Project Timeline"}</h2>
                <p>{"Track progress through our orbital visualization. Click on nodes to explore details."}</p>
                <OrbitalTimeline timeline_data={props.timeline_data.clone()} />
            </section>
        </div>
    }
}
