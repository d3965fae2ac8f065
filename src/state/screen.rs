/// Screen state machine for the image grid
///
/// The screen's state is an explicit immutable value advanced by a pure
/// reducer: `apply` consumes the current state plus one event and returns the
/// next state plus the effect the caller must execute. The iced update loop
/// feeds events in; every transition stays testable without a rendering
/// framework.

use super::data::ImageItem;
use crate::ui::grid;

/// Display phase of the screen
///
/// Ready and Failed are terminal: once the one list request has settled the
/// screen never loads again without being recreated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Created but not yet activated
    #[default]
    Idle,
    /// The list request is outstanding
    Loading,
    /// The list arrived and the grid is shown
    Ready,
    /// The list request failed
    Failed,
}

/// Events the screen reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The screen became active
    Mounted,
    /// The list request settled with a parsed body
    FetchSucceeded(Vec<ImageItem>),
    /// The list request settled with any kind of failure
    FetchFailed,
    /// The grid container was measured at this width
    LayoutMeasured(f32),
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to execute
    None,
    /// Issue the list request
    StartFetch,
}

/// Complete screen state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Screen {
    phase: Phase,
    list: Vec<ImageItem>,
    item_height: f32,
    fetch_in_flight: bool,
}

impl Screen {
    /// Advance the state machine by one event
    ///
    /// Returns the next state and the effect the caller must execute.
    pub fn apply(mut self, event: Event) -> (Self, Effect) {
        match event {
            Event::Mounted => {
                // One request per mount, and never a second one while the
                // first is still outstanding. The in-flight flag is the
                // guard; the Loading phase only drives the display.
                if self.fetch_in_flight || self.phase != Phase::Idle {
                    return (self, Effect::None);
                }
                self.phase = Phase::Loading;
                self.fetch_in_flight = true;
                (self, Effect::StartFetch)
            }
            Event::FetchSucceeded(list) => {
                // A settlement arriving in a terminal phase belongs to a
                // request that was already superseded or discarded.
                if self.phase != Phase::Loading {
                    return (self, Effect::None);
                }
                self.phase = Phase::Ready;
                self.list = list;
                self.fetch_in_flight = false;
                (self, Effect::None)
            }
            Event::FetchFailed => {
                if self.phase != Phase::Loading {
                    return (self, Effect::None);
                }
                self.phase = Phase::Failed;
                self.list = Vec::new();
                self.fetch_in_flight = false;
                (self, Effect::None)
            }
            Event::LayoutMeasured(width) => {
                // Layout passes interleave freely with fetch settlement;
                // each one recomputes the row height from scratch.
                self.item_height = grid::item_height(width);
                (self, Effect::None)
            }
        }
    }

    /// Current display phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The fetched image list, in the order the service returned it
    pub fn list(&self) -> &[ImageItem] {
        &self.list
    }

    /// Row height of the grid, derived from the measured width
    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    /// True while the list request is outstanding
    pub fn loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// True once the list request has failed
    pub fn error(&self) -> bool {
        self.phase == Phase::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[&str]) -> Vec<ImageItem> {
        ids.iter().map(|id| ImageItem { id: id.to_string() }).collect()
    }

    #[test]
    fn test_mount_starts_single_fetch() {
        let (screen, effect) = Screen::default().apply(Event::Mounted);
        assert_eq!(effect, Effect::StartFetch);
        assert!(screen.loading());
        assert!(!screen.error());
        assert!(screen.list().is_empty());

        // A second activation must not issue another request while the
        // first one is outstanding.
        let (screen, effect) = screen.apply(Event::Mounted);
        assert_eq!(effect, Effect::None);
        assert!(screen.loading());
        assert_eq!(screen.phase(), Phase::Loading);
    }

    #[test]
    fn test_fetch_success_populates_list() {
        let (screen, _) = Screen::default().apply(Event::Mounted);
        let fetched = items(&["0", "1", "2"]);
        let (screen, effect) = screen.apply(Event::FetchSucceeded(fetched.clone()));

        assert_eq!(effect, Effect::None);
        assert_eq!(screen.phase(), Phase::Ready);
        assert_eq!(screen.list(), fetched.as_slice());
        assert!(!screen.loading());
        assert!(!screen.error());
    }

    #[test]
    fn test_fetch_failure_clears_list() {
        let (screen, _) = Screen::default().apply(Event::Mounted);
        let (screen, effect) = screen.apply(Event::FetchFailed);

        assert_eq!(effect, Effect::None);
        assert!(screen.error());
        assert!(!screen.loading());
        assert!(screen.list().is_empty());
    }

    #[test]
    fn test_ready_is_terminal() {
        let (screen, _) = Screen::default().apply(Event::Mounted);
        let (screen, _) = screen.apply(Event::FetchSucceeded(items(&["7"])));

        // Neither a stale failure nor a remount may disturb a settled screen.
        let (screen, effect) = screen.apply(Event::FetchFailed);
        assert_eq!(effect, Effect::None);
        assert_eq!(screen.phase(), Phase::Ready);
        assert_eq!(screen.list().len(), 1);

        let (screen, effect) = screen.apply(Event::Mounted);
        assert_eq!(effect, Effect::None);
        assert_eq!(screen.phase(), Phase::Ready);
    }

    #[test]
    fn test_failed_is_terminal() {
        let (screen, _) = Screen::default().apply(Event::Mounted);
        let (screen, _) = screen.apply(Event::FetchFailed);

        let (screen, effect) = screen.apply(Event::FetchSucceeded(items(&["7"])));
        assert_eq!(effect, Effect::None);
        assert!(screen.error());
        assert!(screen.list().is_empty());

        let (screen, effect) = screen.apply(Event::Mounted);
        assert_eq!(effect, Effect::None);
        assert!(screen.error());
    }

    #[test]
    fn test_layout_derives_quarter_width() {
        let (screen, effect) = Screen::default().apply(Event::LayoutMeasured(400.0));
        assert_eq!(effect, Effect::None);
        assert_eq!(screen.item_height(), 100.0);

        // A later pass (rotation, resize) recomputes from the new width.
        let (screen, _) = screen.apply(Event::LayoutMeasured(600.0));
        assert_eq!(screen.item_height(), 150.0);
    }

    #[test]
    fn test_layout_and_settlement_commute() {
        let fetched = items(&["a", "b"]);

        let (screen, _) = Screen::default().apply(Event::Mounted);
        let (screen, _) = screen.apply(Event::LayoutMeasured(400.0));
        let (measured_first, _) = screen.apply(Event::FetchSucceeded(fetched.clone()));

        let (screen, _) = Screen::default().apply(Event::Mounted);
        let (screen, _) = screen.apply(Event::FetchSucceeded(fetched));
        let (settled_first, _) = screen.apply(Event::LayoutMeasured(400.0));

        assert_eq!(measured_first, settled_first);
    }

    #[test]
    fn test_layout_applies_in_every_phase() {
        let (screen, _) = Screen::default().apply(Event::Mounted);
        let (screen, _) = screen.apply(Event::FetchFailed);
        let (screen, _) = screen.apply(Event::LayoutMeasured(200.0));
        assert_eq!(screen.item_height(), 50.0);
        assert!(screen.error());
    }
}
