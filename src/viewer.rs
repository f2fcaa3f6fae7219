//! Event-driven runtime model of the rendered page.
//!
//! Every external stimulus (a playback progress sample, a manual scroll, a
//! search keystroke) is an explicit [`Event`] dispatched through a single
//! [`Viewer`], which owns both runtime engines and one logical clock.
//! Handlers run to completion and report their observable outcomes as
//! [`Effect`]s, so the ordering and debounce contracts can be tested
//! without a rendering surface. The embedded page script mirrors this
//! logic one-to-one.

use crate::cues::Cue;
use crate::search::SearchEngine;
use crate::sync::{ActiveChange, SyncEngine};

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A sample of the playback clock, in seconds.
    TimeUpdate(f64),
    /// The user scrolled the transcript themselves.
    ManualScroll,
    /// Playback jumped to a new position.
    Seek(f64),
    Pause,
    SetAutoScroll(bool),
    /// The search query changed (re-issued on every keystroke).
    QueryChanged(String),
    SearchNext,
    SearchPrev,
}

/// Observable outcome of handling one event. Cue emphasis and search-match
/// emphasis are distinct kinds; the page composes them on the same node
/// instead of one overwriting the other.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    EmphasizeCue(usize),
    ClearCueEmphasis(usize),
    ScrollToCue(usize),
    ScrollToMatch(usize),
    /// New search status readout; `None` clears it entirely.
    SetSearchStatus(Option<String>),
}

pub struct Viewer {
    clock: f64,
    sync: SyncEngine,
    search: SearchEngine,
}

impl Viewer {
    pub fn new(cues: &[Cue]) -> Self {
        Self {
            clock: 0.0,
            sync: SyncEngine::new(cues.iter().map(|cue| cue.start).collect()),
            search: SearchEngine::new(cues.iter().map(|cue| cue.text.clone()).collect()),
        }
    }

    pub fn now(&self) -> f64 {
        self.clock
    }

    pub fn sync(&self) -> &SyncEngine {
        &self.sync
    }

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    /// Advance the logical clock, firing any due scheduled work (the
    /// manual-scroll quiet period).
    pub fn advance(&mut self, dt: f64) {
        self.clock += dt;
        self.sync.tick(self.clock);
    }

    /// Handle one event to completion.
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::TimeUpdate(t) => active_change_effects(self.sync.handle_time_update(t)),
            Event::ManualScroll => {
                self.sync.handle_manual_scroll(self.clock);
                Vec::new()
            }
            Event::Seek(t) => {
                self.sync.handle_seek();
                active_change_effects(self.sync.handle_time_update(t))
            }
            Event::Pause => active_change_effects(self.sync.handle_pause()),
            Event::SetAutoScroll(enabled) => {
                self.sync.set_auto_scroll(enabled);
                Vec::new()
            }
            Event::QueryChanged(query) => {
                self.search.set_query(&query);
                let mut effects = vec![Effect::SetSearchStatus(self.search.status())];
                if let Some(current) = self.search.current() {
                    effects.push(Effect::ScrollToMatch(current));
                }
                effects
            }
            Event::SearchNext => self.navigation_effects(SearchEngine::next),
            Event::SearchPrev => self.navigation_effects(SearchEngine::prev),
        }
    }

    /// Drain a batch of queued events in arrival order.
    pub fn dispatch_all(&mut self, events: impl IntoIterator<Item = Event>) -> Vec<Effect> {
        events
            .into_iter()
            .flat_map(|event| self.dispatch(event))
            .collect()
    }

    fn navigation_effects(
        &mut self,
        step: impl FnOnce(&mut SearchEngine) -> Option<usize>,
    ) -> Vec<Effect> {
        match step(&mut self.search) {
            Some(current) => vec![
                Effect::ScrollToMatch(current),
                Effect::SetSearchStatus(self.search.status()),
            ],
            None => Vec::new(),
        }
    }
}

fn active_change_effects(change: Option<ActiveChange>) -> Vec<Effect> {
    match change {
        Some(ActiveChange::Activated { previous, current }) => {
            let mut effects = Vec::new();
            if let Some(previous) = previous {
                effects.push(Effect::ClearCueEmphasis(previous));
            }
            effects.push(Effect::EmphasizeCue(current));
            effects.push(Effect::ScrollToCue(current));
            effects
        }
        Some(ActiveChange::Cleared { previous }) => vec![Effect::ClearCueEmphasis(previous)],
        None => Vec::new(),
    }
}
