//! Playback synchronization: decides which cue is currently being spoken
//! and arbitrates between auto-scroll and a user browsing the transcript.
//!
//! The engine is a small stateful struct driven by discrete events; time is
//! always passed in, never read from a wall clock, so tests advance it
//! deterministically.

/// Quiet period after the last manual scroll before auto-scroll resumes.
pub const SCROLL_QUIET_SECS: f64 = 2.0;

/// Outcome of a time update that changed the Active-Cue Pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum ActiveChange {
    /// A new cue became active; `previous` emphasis (if any) must be cleared
    /// and the new cue scrolled into view.
    Activated {
        previous: Option<usize>,
        current: usize,
    },
    /// No cue is active any more (playback is before the first cue, or
    /// paused); `previous` emphasis must be cleared.
    Cleared { previous: usize },
}

pub struct SyncEngine {
    /// Ordered cue start times, as rendered in the document.
    starts: Vec<f64>,
    active: Option<usize>,
    auto_scroll: bool,
    user_scrolling: bool,
    /// Logical-clock deadline at which `user_scrolling` expires.
    quiet_deadline: Option<f64>,
}

impl SyncEngine {
    pub fn new(starts: Vec<f64>) -> Self {
        Self {
            starts,
            active: None,
            auto_scroll: true,
            user_scrolling: false,
            quiet_deadline: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.auto_scroll = enabled;
    }

    /// Expire the manual-scroll quiet period if its deadline has passed.
    pub fn tick(&mut self, now: f64) {
        if let Some(deadline) = self.quiet_deadline {
            if now >= deadline {
                self.user_scrolling = false;
                self.quiet_deadline = None;
            }
        }
    }

    /// React to a playback time sample. The active cue is the latest cue
    /// whose start time is `<= t`, found by scanning the timeline in
    /// reverse; when several cues share a start time the most recently
    /// started one wins.
    pub fn handle_time_update(&mut self, t: f64) -> Option<ActiveChange> {
        if !self.auto_scroll || self.user_scrolling {
            return None;
        }
        let selected = self.starts.iter().rposition(|&start| start <= t);
        if selected == self.active {
            return None;
        }
        let previous = self.active;
        self.active = selected;
        match (selected, previous) {
            (Some(current), _) => Some(ActiveChange::Activated { previous, current }),
            // t precedes every cue
            (None, Some(previous)) => Some(ActiveChange::Cleared { previous }),
            (None, None) => None,
        }
    }

    /// A manual scroll while auto-scroll is on suppresses tracking and
    /// (re)arms the quiet-period deadline.
    pub fn handle_manual_scroll(&mut self, now: f64) {
        if !self.auto_scroll {
            return;
        }
        self.user_scrolling = true;
        self.quiet_deadline = Some(now + SCROLL_QUIET_SECS);
    }

    /// Pausing playback clears the Active-Cue Pointer; nothing is "being
    /// spoken" while stopped.
    pub fn handle_pause(&mut self) -> Option<ActiveChange> {
        self.active
            .take()
            .map(|previous| ActiveChange::Cleared { previous })
    }

    /// An explicit seek cancels the quiet period outright so tracking
    /// resumes at the new position instead of waiting out the debounce.
    pub fn handle_seek(&mut self) {
        self.user_scrolling = false;
        self.quiet_deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SyncEngine {
        SyncEngine::new(vec![0.0, 10.0, 20.0])
    }

    #[test]
    fn picks_most_recently_started_cue() {
        let mut sync = engine();
        assert_eq!(
            sync.handle_time_update(15.0),
            Some(ActiveChange::Activated {
                previous: None,
                current: 1
            })
        );
        assert_eq!(sync.active(), Some(1));
    }

    #[test]
    fn no_cue_before_the_first_start() {
        let mut sync = engine();
        assert_eq!(sync.handle_time_update(-1.0), None);
        assert_eq!(sync.active(), None);
    }

    #[test]
    fn shared_start_times_resolve_to_the_last() {
        let mut sync = SyncEngine::new(vec![0.0, 5.0, 5.0, 9.0]);
        assert_eq!(
            sync.handle_time_update(5.0),
            Some(ActiveChange::Activated {
                previous: None,
                current: 2
            })
        );
    }

    #[test]
    fn unchanged_active_cue_reports_nothing() {
        let mut sync = engine();
        sync.handle_time_update(12.0);
        assert_eq!(sync.handle_time_update(13.0), None);
    }

    #[test]
    fn rewinding_before_all_cues_clears_the_pointer() {
        let mut sync = engine();
        sync.handle_time_update(12.0);
        assert_eq!(
            sync.handle_time_update(-5.0),
            Some(ActiveChange::Cleared { previous: 1 })
        );
        assert_eq!(sync.active(), None);
    }

    #[test]
    fn manual_scroll_suppresses_tracking_until_quiet() {
        let mut sync = engine();
        sync.handle_manual_scroll(100.0);
        assert_eq!(sync.handle_time_update(15.0), None);
        // still within the quiet window
        sync.tick(101.9);
        assert_eq!(sync.handle_time_update(15.0), None);
        sync.tick(102.0);
        assert!(sync.handle_time_update(15.0).is_some());
    }

    #[test]
    fn repeated_scrolls_extend_the_quiet_window() {
        let mut sync = engine();
        sync.handle_manual_scroll(100.0);
        sync.handle_manual_scroll(101.5);
        sync.tick(102.5);
        assert_eq!(sync.handle_time_update(15.0), None);
        sync.tick(103.5);
        assert!(sync.handle_time_update(15.0).is_some());
    }

    #[test]
    fn seek_cancels_the_quiet_window() {
        let mut sync = engine();
        sync.handle_manual_scroll(100.0);
        sync.handle_seek();
        assert!(sync.handle_time_update(15.0).is_some());
    }

    #[test]
    fn pause_clears_the_active_cue() {
        let mut sync = engine();
        sync.handle_time_update(12.0);
        assert_eq!(
            sync.handle_pause(),
            Some(ActiveChange::Cleared { previous: 1 })
        );
        assert_eq!(sync.active(), None);
        assert_eq!(sync.handle_pause(), None);
    }

    #[test]
    fn disabled_auto_scroll_suspends_tracking() {
        let mut sync = engine();
        sync.set_auto_scroll(false);
        assert_eq!(sync.handle_time_update(15.0), None);
        sync.set_auto_scroll(true);
        assert!(sync.handle_time_update(15.0).is_some());
    }

    #[test]
    fn scrolling_while_auto_scroll_is_off_does_not_arm_the_timer() {
        let mut sync = engine();
        sync.set_auto_scroll(false);
        sync.handle_manual_scroll(100.0);
        sync.set_auto_scroll(true);
        // no quiet window to wait out
        assert!(sync.handle_time_update(15.0).is_some());
    }
}
