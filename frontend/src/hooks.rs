use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use yew::prelude::*;

use crate::config;
use crate::engine::{
    ActiveSet, GeometrySource, OutputRange, ProgressMapper, Rect, RegionId, ScrollOffsets, Segment,
    SegmentStyle, SegmentWriter, Theme, UpdateStrategy, Viewport, VisibilityDelta,
};
use crate::web::dom::{self, NodeStyleSink};
use crate::web::ScrollEngine;

fn node_geometry(node: NodeRef) -> GeometrySource {
    Rc::new(move |viewport: &Viewport| dom::document_rect(&node, viewport))
}

/// Shared engine from the nearest provider, if any.
#[hook]
pub fn use_scroll_engine() -> Option<ScrollEngine> {
    use_context::<ScrollEngine>()
}

/// Committed page theme, light outside a provider.
#[hook]
pub fn use_theme() -> Theme {
    use_context::<Theme>().unwrap_or_default()
}

/// Creates the page's engine once, attaches it for the lifetime of the
/// calling component and mirrors its committed theme into state.
#[hook]
pub fn use_engine_root() -> (ScrollEngine, Theme) {
    let engine = use_state(|| ScrollEngine::new(config::load(), dom::current_capability()));
    let theme = use_state(|| engine.theme());

    {
        let engine = (*engine).clone();
        let theme = theme.setter();
        use_effect_with_deps(
            move |_| {
                let subscription = engine.subscribe_theme(Rc::new(move |next: Theme| {
                    debug!("theme -> {}", next.as_str());
                    theme.set(next);
                }));
                if let Err(err) = engine.attach() {
                    warn!("scroll effects disabled: {}", err);
                }
                move || {
                    drop(subscription);
                    engine.detach();
                }
            },
            (),
        );
    }

    ((*engine).clone(), *theme)
}

/// True once the page has scrolled more than `threshold` pixels. Sampled by
/// the engine so it shares the frame throttle with everything else.
#[hook]
pub fn use_scrolled_past(threshold: f64) -> bool {
    let engine = use_scroll_engine();
    let scrolled = use_state_eq(|| false);

    {
        let scrolled = scrolled.setter();
        use_effect_with_deps(
            move |(engine, threshold)| {
                // a one pixel marker whose top edge sits at the threshold
                let marker = Rect::new(*threshold, *threshold + 1.0);
                let registration = engine.as_ref().map(|engine| {
                    engine.track_progress(
                        ScrollOffsets::PAST_TOP,
                        Rc::new(move |_: &Viewport| Some(marker)),
                        Rc::new(move |progress: f64| scrolled.set(progress >= 1.0)),
                    )
                });
                move || drop(registration)
            },
            (engine, threshold),
        );
    }

    *scrolled
}

impl Reducible for ActiveSet {
    type Action = VisibilityDelta;

    fn reduce(self: Rc<Self>, delta: VisibilityDelta) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(&delta);
        Rc::new(next)
    }
}

/// Regions currently in the detection band, kept in sync from deltas.
#[hook]
pub fn use_active_regions() -> UseReducerHandle<ActiveSet> {
    let engine = use_scroll_engine();
    let active = use_reducer_eq(ActiveSet::default);

    {
        let dispatcher = active.dispatcher();
        use_effect_with_deps(
            move |engine| {
                let subscription = engine.as_ref().map(|engine| {
                    engine.subscribe_visibility(Rc::new(move |delta: &VisibilityDelta| {
                        dispatcher.dispatch(delta.clone())
                    }))
                });
                move || drop(subscription)
            },
            engine,
        );
    }

    active
}

/// Marks `node` as a dark region for as long as the component is mounted.
#[hook]
pub fn use_theme_region(id: AttrValue, node: NodeRef) {
    let engine = use_scroll_engine();
    use_effect_with_deps(
        move |(engine, id)| {
            let registration = engine.as_ref().and_then(|engine| {
                engine
                    .track_region(RegionId::from(id.to_string()), node_geometry(node))
                    .map_err(|err| warn!("{}", err))
                    .ok()
            });
            move || drop(registration)
        },
        (engine, id),
    );
}

/// Per-segment display values for one scroll-driven reveal.
pub struct SegmentReveal {
    values: Vec<f64>,
    nodes: Rc<Vec<NodeRef>>,
    rest: f64,
}

impl SegmentReveal {
    /// Value to render inline. Under direct writes this stays at the resting
    /// value and the node's style is patched in place.
    pub fn value(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(self.rest)
    }

    pub fn node(&self, index: usize) -> NodeRef {
        self.nodes.get(index).cloned().unwrap_or_default()
    }
}

enum RevealOutput {
    State(UseStateSetter<Vec<f64>>),
    Direct(SegmentWriter<NodeStyleSink>),
}

impl RevealOutput {
    fn apply(&mut self, values: &[f64]) {
        match self {
            RevealOutput::State(setter) => setter.set(values.to_vec()),
            RevealOutput::Direct(writer) => {
                writer.apply(values);
            }
        }
    }
}

/// Tracks `target` through `offsets` and maps its progress onto `segments`.
///
/// The update strategy is picked once at mount from the engine's capability
/// and kept for the component's lifetime.
#[hook]
pub fn use_segment_reveal(
    target: NodeRef,
    segments: Rc<Vec<Segment>>,
    output: OutputRange,
    style: SegmentStyle,
    offsets: ScrollOffsets,
) -> SegmentReveal {
    let engine = use_scroll_engine();
    let rest = output.map(0.0);
    let count = segments.len();

    let nodes = use_memo(
        |count| (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>(),
        count,
    );
    let values = use_state(|| vec![rest; count]);
    let strategy = {
        let engine = engine.clone();
        *use_state(move || {
            engine
                .map(|engine| engine.high_frequency_strategy())
                .unwrap_or(UpdateStrategy::StateTriggered)
        })
    };

    {
        let values = values.setter();
        let nodes = nodes.clone();
        use_effect_with_deps(
            move |(engine, segments)| {
                let registration = engine.as_ref().map(|engine| {
                    let output_to = match strategy {
                        UpdateStrategy::StateTriggered => RevealOutput::State(values),
                        UpdateStrategy::DirectWrite => RevealOutput::Direct(SegmentWriter::new(
                            NodeStyleSink::new(nodes.to_vec()),
                            style,
                            nodes.len(),
                        )),
                    };
                    let state = RefCell::new((ProgressMapper::new(segments.to_vec(), output), output_to));
                    engine.track_progress(
                        offsets,
                        node_geometry(target),
                        Rc::new(move |progress: f64| {
                            let mut state = state.borrow_mut();
                            let (mapper, output_to) = &mut *state;
                            output_to.apply(mapper.update(progress));
                        }),
                    )
                });
                move || drop(registration)
            },
            (engine, segments),
        );
    }

    SegmentReveal {
        values: (*values).clone(),
        nodes,
        rest,
    }
}
