//! Reading session that wires the overscroll controller to its collaborators.

use std::time::Duration;

use overscroll_nav_config::{Animations, Config};

use crate::animation::Clock;
use crate::article::{ArticleSequence, ArticleSequenceMut};
use crate::input::{HandledTouch, TouchEvent, TouchInput};
use crate::overscroll::{NavContext, NavigationRequest, Options, OverscrollNav, RenderOutputs};
use crate::policy::{ContentMode, GesturePolicy, Viewport};
use crate::scroll::ScrollOracle;

/// Receives the target index of every committed navigation.
pub trait NavigationSink {
    fn navigate(&mut self, target: usize);
}

impl<F: FnMut(usize)> NavigationSink for F {
    fn navigate(&mut self, target: usize) {
        self(target)
    }
}

pub struct Reader<A, S, N> {
    articles: A,
    scroll: S,
    sink: N,
    nav: OverscrollNav,
    clock: Clock,
    policy: GesturePolicy,
    viewport: Viewport,
    mode: ContentMode,
}

impl<A, S, N> Reader<A, S, N>
where
    A: ArticleSequenceMut,
    S: ScrollOracle,
    N: NavigationSink,
{
    pub fn new(articles: A, scroll: S, sink: N, config: &Config) -> Self {
        let clock = Clock::default();
        apply_animation_config(&clock, &config.animations);

        let nav = OverscrollNav::new(clock.clone(), Options::from_config(config));

        Self {
            articles,
            scroll,
            sink,
            nav,
            clock,
            policy: GesturePolicy::from_config(config),
            viewport: Viewport {
                width: 0.,
                is_touch: true,
            },
            mode: ContentMode::Summary,
        }
    }

    pub fn update_config(&mut self, config: &Config) {
        apply_animation_config(&self.clock, &config.animations);
        self.nav.update_options(Options::from_config(config));
        self.policy = GesturePolicy::from_config(config);
        self.update_disabled();
    }

    /// Advances animations to `time` and delivers a settled navigation.
    pub fn frame(&mut self, time: Duration) -> Option<NavigationRequest> {
        self.clock.set_unadjusted(time);

        let request = self.nav.advance_animations()?;
        self.sink.navigate(request.target);
        self.apply_index(request.target);
        Some(request)
    }

    /// Navigates without a gesture, for example from the previous/next buttons.
    ///
    /// Returns whether the current article changed.
    pub fn navigate_to(&mut self, idx: usize) -> bool {
        self.apply_index(idx)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.update_disabled();
    }

    pub fn set_content_mode(&mut self, mode: ContentMode) {
        self.mode = mode;
        self.update_disabled();
    }

    pub fn context(&self) -> NavContext {
        NavContext {
            at_top: self.scroll.is_at_top(),
            at_bottom: self.scroll.is_at_bottom(),
            has_prev: self.articles.has_prev(),
            has_next: self.articles.has_next(),
            current_index: self.articles.current_index(),
        }
    }

    pub fn render(&self) -> RenderOutputs {
        self.nav.render()
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.nav.are_animations_ongoing()
    }

    pub fn nav(&self) -> &OverscrollNav {
        &self.nav
    }

    pub fn articles(&self) -> &A {
        &self.articles
    }

    pub fn scroll(&self) -> &S {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut S {
        &mut self.scroll
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    fn apply_index(&mut self, idx: usize) -> bool {
        let changed = self.articles.set_current(idx);
        if changed {
            self.nav.on_index_changed(self.articles.current_index());
        }
        changed
    }

    fn update_disabled(&mut self) {
        let disabled = self.policy.is_disabled(self.viewport, self.mode);
        self.nav.set_disabled(disabled);
    }
}

impl<A, S, N> TouchInput for Reader<A, S, N>
where
    A: ArticleSequenceMut,
    S: ScrollOracle,
    N: NavigationSink,
{
    fn on_touch_start(&mut self, evt: &TouchEvent) -> HandledTouch {
        let ctx = self.context();
        self.nav.on_touch_start(evt, &ctx)
    }

    fn on_touch_move(&mut self, evt: &TouchEvent) -> HandledTouch {
        let ctx = self.context();
        self.nav.on_touch_move(evt, &ctx)
    }

    fn on_touch_end(&mut self, evt: &TouchEvent) -> HandledTouch {
        let ctx = self.context();
        self.nav.on_touch_end(evt, &ctx)
    }

    fn on_touch_cancel(&mut self, evt: &TouchEvent) -> HandledTouch {
        self.nav.on_touch_cancel(evt)
    }
}

fn apply_animation_config(clock: &Clock, animations: &Animations) {
    let slowdown = animations.slowdown.get();

    clock.set_complete_instantly(animations.off || slowdown == 0.);
    if slowdown > 0. {
        clock.set_rate(1. / slowdown);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::article::Articles;
    use crate::input::InputEvent;
    use crate::scroll::ScrollMetrics;

    type TestReader = Reader<Articles<&'static str>, Cell<ScrollMetrics>, Box<dyn FnMut(usize)>>;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn reader(config: &Config) -> (TestReader, Rc<RefCell<Vec<usize>>>) {
        let mut articles = Articles::new(vec!["a", "b", "c", "d", "e"]);
        articles.set_current(2);

        let scroll = Cell::new(ScrollMetrics {
            scroll_top: 0.,
            client_height: 600.,
            scroll_height: 2000.,
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            Box::new(move |idx| seen.borrow_mut().push(idx)) as Box<dyn FnMut(usize)>
        };

        (Reader::new(articles, scroll, sink, config), seen)
    }

    fn pull(reader: &mut TestReader, distance: f64) {
        reader.on_touch_start(&TouchEvent::single(100., ms(0)));
        reader.on_touch_move(&TouchEvent::single(100. + distance / 2., ms(16)));
        reader.on_touch_move(&TouchEvent::single(100. + distance, ms(32)));
        reader.on_touch_end(&TouchEvent::new(ms(48)));
    }

    #[test]
    fn commit_updates_sequence_and_notifies_sink() {
        let (mut reader, seen) = reader(&Config::default());
        pull(&mut reader, 150.);

        assert_eq!(reader.frame(ms(100)), None);
        assert!(seen.borrow().is_empty());

        assert_eq!(reader.frame(ms(400)), Some(NavigationRequest { target: 1 }));
        assert_eq!(*seen.borrow(), [1]);
        assert_eq!(reader.articles().current(), Some(&"b"));
        assert!(!reader.are_animations_ongoing());

        reader.frame(ms(1000));
        assert_eq!(*seen.borrow(), [1]);
    }

    #[test]
    fn scrolled_content_does_not_overscroll() {
        let (mut reader, seen) = reader(&Config::default());
        reader.scroll().set(ScrollMetrics {
            scroll_top: 500.,
            client_height: 600.,
            scroll_height: 2000.,
        });

        pull(&mut reader, 150.);
        reader.frame(ms(1000));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn external_navigation_resets_gesture() {
        let (mut reader, seen) = reader(&Config::default());
        pull(&mut reader, 150.);
        assert!(reader.nav().is_committing());

        assert!(reader.navigate_to(4));
        assert!(!reader.nav().is_animating());

        reader.frame(ms(1000));
        assert!(seen.borrow().is_empty());
        assert_eq!(reader.articles().current_index(), 4);

        assert!(!reader.navigate_to(4));
        assert!(!reader.navigate_to(10));
    }

    #[test]
    fn original_mode_disables_gesture() {
        let (mut reader, seen) = reader(&Config::default());
        reader.set_content_mode(ContentMode::Original);
        assert!(reader.nav().is_disabled());

        pull(&mut reader, 150.);
        reader.frame(ms(1000));
        assert!(seen.borrow().is_empty());

        reader.set_content_mode(ContentMode::Summary);
        assert!(!reader.nav().is_disabled());
    }

    #[test]
    fn desktop_viewport_disables_gesture() {
        let (mut reader, _) = reader(&Config::default());
        reader.set_viewport(Viewport {
            width: 1440.,
            is_touch: true,
        });
        assert!(reader.nav().is_disabled());
    }

    #[test]
    fn slowdown_stretches_settle() {
        let mut config = Config::default();
        config.animations.slowdown.0 = 2.;
        let (mut reader, _) = reader(&config);

        pull(&mut reader, 150.);
        assert_eq!(reader.frame(ms(400)), None);
        assert_eq!(reader.frame(ms(700)), Some(NavigationRequest { target: 1 }));
    }

    #[test]
    fn animations_off_complete_on_next_frame() {
        let mut config = Config::default();
        config.animations.off = true;
        let (mut reader, _) = reader(&config);

        pull(&mut reader, 150.);
        assert!(reader.nav().is_committing());
        assert_eq!(reader.frame(ms(48)), Some(NavigationRequest { target: 1 }));
    }

    #[test]
    fn dispatches_input_events() {
        let (mut reader, _) = reader(&Config::default());

        reader.process_input_event(&InputEvent::TouchStart(TouchEvent::single(100., ms(0))));
        let handled =
            reader.process_input_event(&InputEvent::TouchMove(TouchEvent::single(200., ms(16))));
        assert!(handled.prevent_default);

        let handled = reader.process_input_event(&InputEvent::TouchCancel(TouchEvent::new(ms(32))));
        assert!(handled.prevent_default);
        assert!(reader.nav().is_animating());
        assert!(!reader.nav().is_committing());
    }
}
