//! Area lifecycle state machine
//!
//! ```text
//!   Empty --generate--> Generated --show--> Shown <--show/hide--> Hidden
//!     ^                     |                 |                      |
//!     +------release--------+--------+--------+----------------------+
//!                                    |  (pinned residency)
//!                                    v
//!                                  Pinned --show--> Shown
//! ```
//!
//! Release sends an evictable Area back to `Empty`. A pinned Area keeps
//! its data and rests in `Pinned` instead; it can never reach `Empty` again.
//! Transitions that do not apply to the current state are no-ops.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AreaState {
    /// No layout data
    #[default]
    Empty,
    /// Layout data only, nothing in the scene
    Generated,
    /// Scene objects exist and are active
    Shown,
    /// Scene objects exist but are deactivated
    Hidden,
    /// Released while pinned: layout data kept, scene objects gone
    Pinned,
}

/// Whether release may discard an Area's data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Residency {
    #[default]
    Evictable,
    /// Holds quest content; layout data is kept for the Area's lifetime
    Pinned,
}

/// What a release did to the Area's data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Nothing was generated
    Ignored,
    /// Layout data must be dropped
    Evicted,
    /// Scene objects go, layout data stays
    Retained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lifecycle {
    state: AreaState,
    residency: Residency,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AreaState {
        self.state
    }

    pub fn residency(&self) -> Residency {
        self.residency
    }

    pub fn is_generated(&self) -> bool {
        self.state != AreaState::Empty
    }

    /// Scene objects exist, active or not
    pub fn is_created(&self) -> bool {
        matches!(self.state, AreaState::Shown | AreaState::Hidden)
    }

    pub fn is_hidden(&self) -> bool {
        self.state == AreaState::Hidden
    }

    pub fn is_pinned(&self) -> bool {
        self.residency == Residency::Pinned
    }

    /// Empty -> Generated
    pub fn mark_generated(&mut self) -> bool {
        if self.state != AreaState::Empty {
            return false;
        }
        self.state = AreaState::Generated;
        true
    }

    /// Generated, Hidden or Pinned -> Shown
    pub fn mark_shown(&mut self) -> bool {
        match self.state {
            AreaState::Generated | AreaState::Hidden | AreaState::Pinned => {
                self.state = AreaState::Shown;
                true
            }
            AreaState::Empty | AreaState::Shown => false,
        }
    }

    /// Shown -> Hidden
    pub fn mark_hidden(&mut self) -> bool {
        if self.state != AreaState::Shown {
            return false;
        }
        self.state = AreaState::Hidden;
        true
    }

    /// Pin the Area for the rest of its lifetime
    pub fn pin(&mut self) {
        self.residency = Residency::Pinned;
    }

    /// Any generated state -> Empty, or -> Pinned for a pinned Area
    pub fn release(&mut self) -> ReleaseOutcome {
        if self.state == AreaState::Empty {
            return ReleaseOutcome::Ignored;
        }
        match self.residency {
            Residency::Evictable => {
                self.state = AreaState::Empty;
                ReleaseOutcome::Evicted
            }
            Residency::Pinned => {
                self.state = AreaState::Pinned;
                ReleaseOutcome::Retained
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_evictable_cycle() {
        let mut lc = Lifecycle::new();
        assert_eq!(lc.state(), AreaState::Empty);
        assert!(lc.mark_generated());
        assert!(lc.is_generated() && !lc.is_created());
        assert!(lc.mark_shown());
        assert!(lc.is_created() && !lc.is_hidden());
        assert!(lc.mark_hidden());
        assert!(lc.is_hidden());
        assert!(lc.mark_shown());
        assert!(lc.mark_hidden());
        assert_eq!(lc.release(), ReleaseOutcome::Evicted);
        assert_eq!(lc.state(), AreaState::Empty);
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut lc = Lifecycle::new();
        assert!(!lc.mark_hidden());
        assert!(!lc.mark_shown());
        assert_eq!(lc.release(), ReleaseOutcome::Ignored);
        assert_eq!(lc.state(), AreaState::Empty);

        lc.mark_generated();
        assert!(!lc.mark_generated());
        assert!(!lc.mark_hidden());
        assert_eq!(lc.state(), AreaState::Generated);

        lc.mark_shown();
        assert!(!lc.mark_shown());
        lc.mark_hidden();
        assert!(!lc.mark_hidden());
        assert_eq!(lc.state(), AreaState::Hidden);
    }

    #[test]
    fn test_pinned_never_returns_to_empty() {
        let mut lc = Lifecycle::new();
        lc.mark_generated();
        lc.pin();
        for _ in 0..3 {
            assert_eq!(lc.release(), ReleaseOutcome::Retained);
            assert_eq!(lc.state(), AreaState::Pinned);
            assert!(lc.is_generated());
            assert!(!lc.is_created());
        }
        assert!(lc.mark_shown());
        assert_eq!(lc.release(), ReleaseOutcome::Retained);
        assert_eq!(lc.state(), AreaState::Pinned);
        assert_eq!(lc.residency(), Residency::Pinned);
    }

    #[test]
    fn test_release_from_shown() {
        let mut lc = Lifecycle::new();
        lc.mark_generated();
        lc.mark_shown();
        assert_eq!(lc.release(), ReleaseOutcome::Evicted);
        assert!(!lc.is_generated());
    }
}
