use gloo_timers::callback::Interval;
use log::{debug, info};
use wasm_bindgen::JsValue;
use web_sys::{EventTarget, MouseEvent};
use yew::prelude::*;

use crate::config::OrbitConfig;
use crate::orbit::{NodeLayout, OrbitEngine};
use crate::timeline::TimelineItem;

#[derive(Properties, PartialEq)]
pub struct OrbitalTimelineProps {
    pub timeline_data: Vec<TimelineItem>,
}

const ORBIT_STYLES: &str = r#"
    .orbital-timeline {
        position: relative;
        width: 100%;
        height: 600px;
        background: #000;
        overflow: hidden;
        color: #fff;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
    }
    .orbit-layer {
        position: absolute;
        top: 50%;
        left: 50%;
        width: 0;
        height: 0;
    }
    .orbit-ring {
        position: absolute;
        top: 50%;
        left: 50%;
        transform: translate(-50%, -50%);
        border-radius: 50%;
    }
    .orbit-ring.outer { width: 400px; height: 400px; border: 1px solid rgba(255, 255, 255, 0.1); }
    .orbit-ring.middle { width: 300px; height: 300px; border: 1px solid rgba(255, 255, 255, 0.05); }
    .orbit-ring.inner { width: 200px; height: 200px; border: 1px solid rgba(255, 255, 255, 0.05); }
    .orbit-hub {
        position: absolute;
        width: 16px;
        height: 16px;
        margin: -8px 0 0 -8px;
        border-radius: 50%;
        background: #fff;
        box-shadow: 0 0 20px rgba(255, 255, 255, 0.5);
    }
    .orbit-node {
        position: absolute;
        margin: -24px 0 0 -24px;
        cursor: pointer;
        transition: all 0.7s;
    }
    .orbit-spoke {
        position: absolute;
        top: 50%;
        left: 50%;
        height: 1px;
        transform-origin: left center;
        background: linear-gradient(to right, rgba(255, 255, 255, 0.2), transparent);
        transition: opacity 0.5s;
    }
    .spoke-lit { opacity: 1; }
    .spoke-dim { opacity: 0.3; }
    .orbit-node-circle {
        position: relative;
        width: 48px;
        height: 48px;
        border-radius: 50%;
        border: 2px solid rgba(255, 255, 255, 0.3);
        display: flex;
        align-items: center;
        justify-content: center;
        transition: all 0.3s;
    }
    .node-idle { background: #000; }
    .node-idle:hover { border-color: rgba(255, 255, 255, 0.6); }
    .node-related { transform: scale(1.1); background: rgba(255, 255, 255, 0.2); border-color: rgba(255, 255, 255, 0.5); }
    .node-expanded { transform: scale(1.25); background: #fff; color: #000; border-color: #fff; }
    @keyframes pulse { 50% { opacity: 0.5; } }
    @keyframes ping { 75%, 100% { transform: scale(2); opacity: 0; } }
    .node-pulse { animation: pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite; }
    .orbit-node-ping {
        position: absolute;
        inset: 0;
        border-radius: 50%;
        border: 2px solid #fff;
        animation: ping 1s cubic-bezier(0, 0, 0.2, 1) infinite;
    }
    .orbit-node-label {
        position: absolute;
        top: 56px;
        left: 50%;
        transform: translateX(-50%);
        white-space: nowrap;
        font-size: 12px;
        color: rgba(255, 255, 255, 0.6);
    }
    .label-active { color: #fff; }
    .orbit-card {
        position: absolute;
        left: 64px;
        top: 50%;
        transform: translateY(-50%);
        width: 288px;
        padding: 16px;
        background: rgba(0, 0, 0, 0.9);
        border: 1px solid rgba(255, 255, 255, 0.15);
        border-radius: 12px;
        backdrop-filter: blur(16px);
        cursor: default;
    }
    .orbit-card-meta { display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px; }
    .orbit-card-date { font-size: 12px; color: rgba(255, 255, 255, 0.6); }
    .orbit-card-title { margin: 0 0 8px; font-size: 18px; }
    .orbit-card-content { font-size: 14px; color: rgba(255, 255, 255, 0.6); }
    .status-badge { font-size: 11px; padding: 2px 8px; border-radius: 6px; border: 1px solid; }
    .status-completed { color: #000; background: #fff; border-color: #fff; }
    .status-in-progress { color: #fff; background: #000; border-color: #fff; }
    .status-pending { color: rgba(255, 255, 255, 0.6); background: rgba(255, 255, 255, 0.1); border-color: rgba(255, 255, 255, 0.3); }
    .energy-header { display: flex; justify-content: space-between; font-size: 12px; }
    .energy-label { color: rgba(255, 255, 255, 0.6); }
    .energy-track { height: 6px; margin-top: 4px; background: rgba(255, 255, 255, 0.1); border-radius: 999px; overflow: hidden; }
    .energy-fill { height: 100%; background: linear-gradient(to right, rgba(255, 255, 255, 0.5), #fff); border-radius: 999px; transition: width 0.5s; }
    .connected { margin-top: 12px; padding-top: 8px; border-top: 1px solid rgba(255, 255, 255, 0.15); }
    .connected-header { font-size: 12px; color: rgba(255, 255, 255, 0.6); margin-bottom: 8px; }
    .connected-list { display: flex; flex-wrap: wrap; gap: 4px; }
    .connected-button {
        height: 28px;
        padding: 0 8px;
        font-size: 12px;
        color: rgba(255, 255, 255, 0.6);
        background: transparent;
        border: none;
        border-radius: 6px;
        cursor: pointer;
    }
    .connected-button:hover { color: #fff; background: rgba(255, 255, 255, 0.1); }
    .connected-arrow { margin-left: 4px; }
"#;

pub enum OrbitalTimelineMsg {
    Tick,
    NodeClicked(u32),
    BackgroundClicked,
}

pub struct OrbitalTimeline {
    engine: OrbitEngine,
    ticker: Option<Interval>,
    container_ref: NodeRef,
    orbit_ref: NodeRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TickerAction {
    Start,
    Stop,
    Keep,
}

/// What to do with the rotation timer given whether one is running and
/// whether the orbit should be turning.
fn ticker_action(running: bool, auto_rotate: bool) -> TickerAction {
    match (running, auto_rotate) {
        (false, true) => TickerAction::Start,
        (true, false) => TickerAction::Stop,
        _ => TickerAction::Keep,
    }
}

/// True when the click landed on one of the backdrop layers itself and not
/// on anything drawn inside them.
fn hits_backdrop(target: Option<EventTarget>, layers: &[&NodeRef]) -> bool {
    let Some(target) = target else {
        return false;
    };
    let target = JsValue::from(target);
    layers
        .iter()
        .filter_map(|layer| layer.get())
        .any(|node| JsValue::from(node) == target)
}

impl OrbitalTimeline {
    /// Keeps the rotation timer running exactly while the engine auto-rotates.
    /// A stopped timer is dropped, and a fresh one is scheduled on resume.
    fn sync_ticker(&mut self, ctx: &Context<Self>) {
        match ticker_action(self.ticker.is_some(), self.engine.auto_rotate()) {
            TickerAction::Start => {
                let tick = ctx.link().callback(|_: ()| OrbitalTimelineMsg::Tick);
                let period = self.engine.config().tick_ms;
                self.ticker = Some(Interval::new(period, move || tick.emit(())));
                debug!("rotation timer started ({}ms)", period);
            }
            TickerAction::Stop => {
                self.ticker = None; // Dropping the interval clears it
                debug!("rotation timer stopped");
            }
            TickerAction::Keep => {}
        }
    }

    fn view_node(&self, ctx: &Context<Self>, item: &TimelineItem, node: &NodeLayout) -> Html {
        let id = item.id;
        let onclick = ctx.link().callback(move |e: MouseEvent| {
            e.stop_propagation();
            OrbitalTimelineMsg::NodeClicked(id)
        });

        let position = &node.position;
        let node_style = format!(
            "transform: translate({:.3}px, {:.3}px); z-index: {}; opacity: {:.3};",
            position.x,
            position.y,
            node.z_index(),
            node.opacity()
        );
        let spoke_style = format!(
            "width: {:.3}px; transform: rotate({:.5}rad);",
            position.spoke_length(),
            position.spoke_rotation()
        );

        let spoke_class = classes!(
            "orbit-spoke",
            if node.expanded || node.related { "spoke-lit" } else { "spoke-dim" }
        );
        let circle_class = classes!(
            "orbit-node-circle",
            if node.expanded {
                "node-expanded"
            } else if node.related {
                "node-related"
            } else {
                "node-idle"
            },
            node.pulsing.then(|| "node-pulse")
        );
        let label_class = classes!("orbit-node-label", node.expanded.then(|| "label-active"));

        html! {
            <div key={id} class="orbit-node" style={node_style} {onclick}>
                <div class={spoke_class} style={spoke_style}></div>
                <div class={circle_class}>
                    <span class="orbit-node-icon">{item.icon.glyph()}</span>
                    {
                        if node.pulsing {
                            html! { <div class="orbit-node-ping"></div> }
                        } else {
                            html! {}
                        }
                    }
                </div>
                <div class={label_class}>{&item.title}</div>
                {
                    if node.expanded {
                        self.view_card(ctx, item)
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }

    fn view_card(&self, ctx: &Context<Self>, item: &TimelineItem) -> Html {
        let energy_style = format!("width: {}%;", item.energy);
        let related = self.engine.related_items(item.id);

        html! {
            <div class="orbit-card">
                <div class="orbit-card-header">
                    <div class="orbit-card-meta">
                        <span class={item.status.badge_class()}>{item.status.badge_label()}</span>
                        <span class="orbit-card-date">{&item.date}</span>
                    </div>
                    <h3 class="orbit-card-title">{&item.title}</h3>
                </div>
                <div class="orbit-card-body">
                    <p class="orbit-card-content">{&item.content}</p>
                    <div class="energy">
                        <div class="energy-header">
                            <span class="energy-label">{"\u{26A1} Energy Level"}</span>
                            <span class="energy-value">{format!("{}%", item.energy)}</span>
                        </div>
                        <div class="energy-track">
                            <div class="energy-fill" style={energy_style}></div>
                        </div>
                    </div>
                    {
                        if related.is_empty() {
                            html! {}
                        } else {
                            html! {
                                <div class="connected">
                                    <div class="connected-header">{"\u{1F517} Connected Nodes"}</div>
                                    <div class="connected-list">
                                        { for related.iter().map(|&related_id| self.view_connection(ctx, related_id)) }
                                    </div>
                                </div>
                            }
                        }
                    }
                </div>
            </div>
        }
    }

    fn view_connection(&self, ctx: &Context<Self>, related_id: u32) -> Html {
        let title = self
            .engine
            .item(related_id)
            .map(|related| related.title.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let onclick = ctx.link().callback(move |e: MouseEvent| {
            e.stop_propagation();
            OrbitalTimelineMsg::NodeClicked(related_id)
        });

        html! {
            <button key={related_id} class="connected-button" {onclick}>
                {title}
                <span class="connected-arrow">{"\u{2192}"}</span>
            </button>
        }
    }
}

impl Component for OrbitalTimeline {
    type Message = OrbitalTimelineMsg;
    type Properties = OrbitalTimelineProps;

    fn create(ctx: &Context<Self>) -> Self {
        let items = ctx.props().timeline_data.clone();
        info!("Mounting orbital timeline with {} items", items.len());

        let mut timeline = Self {
            engine: OrbitEngine::new(items, OrbitConfig::default()),
            ticker: None,
            container_ref: NodeRef::default(),
            orbit_ref: NodeRef::default(),
        };
        timeline.sync_ticker(ctx);
        timeline
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            OrbitalTimelineMsg::Tick => self.engine.tick(),
            OrbitalTimelineMsg::NodeClicked(id) => {
                self.engine.toggle(id);
                self.sync_ticker(ctx);
                true
            }
            OrbitalTimelineMsg::BackgroundClicked => {
                self.engine.reset();
                self.sync_ticker(ctx);
                true
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().timeline_data == old_props.timeline_data {
            return false;
        }
        info!("Timeline data changed, rebuilding orbit");
        self.engine = OrbitEngine::new(ctx.props().timeline_data.clone(), *self.engine.config());
        self.sync_ticker(ctx);
        true
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        // No ticks may land after unmount
        self.ticker = None;
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let container_ref = self.container_ref.clone();
        let orbit_ref = self.orbit_ref.clone();
        let onclick = ctx.link().batch_callback(move |e: MouseEvent| {
            hits_backdrop(e.target(), &[&container_ref, &orbit_ref])
                .then_some(OrbitalTimelineMsg::BackgroundClicked)
        });

        let offset = self.engine.center_offset();
        let hub_style = format!("transform: translate({}px, {}px);", offset.x, offset.y);
        let layout = self.engine.layout();

        html! {
            <div class="orbital-timeline" ref={self.container_ref.clone()} {onclick}>
                <style>
                    {ORBIT_STYLES}
                </style>
                <div class="orbit-layer" ref={self.orbit_ref.clone()}>
                    <div class="orbit-ring outer"></div>
                    <div class="orbit-ring middle"></div>
                    <div class="orbit-ring inner"></div>
                    <div class="orbit-hub" style={hub_style}></div>
                    {
                        for self.engine.items().iter().zip(layout.iter())
                            .map(|(item, node)| self.view_node(ctx, item, node))
                    }
                </div>
            </div>
        }
    }
}
