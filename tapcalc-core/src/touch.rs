//! Touch sample debouncing
//!
//! The touch controller is polled every loop iteration and reports a
//! sample for as long as the panel is held. Without edge detection one
//! physical press would fire its button on every poll.
//!
//! State transitions:
//! Idle -> Holding(i)        on contact over button i       (Press(i))
//! Holding(i) -> Holding(j)  on contact over another button (Press(j))
//! Holding(i) -> Idle        on contact over empty space    (Release(i))
//! Holding(i) -> Idle        on lift                        (Release(i))

use crate::layout::Keypad;

/// One poll of the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Panel is being touched
    pub present: bool,
    /// X coordinate, valid only when `present`
    pub x: u16,
    /// Y coordinate, valid only when `present`
    pub y: u16,
}

impl TouchSample {
    /// A sample reporting contact at `(x, y)`
    pub const fn pressed(x: u16, y: u16) -> Self {
        Self {
            present: true,
            x,
            y,
        }
    }

    /// A sample reporting no contact
    pub const fn released() -> Self {
        Self {
            present: false,
            x: 0,
            y: 0,
        }
    }

    /// Coordinates if the panel is touched
    pub fn point(&self) -> Option<(u16, u16)> {
        self.present.then_some((self.x, self.y))
    }
}

/// Edge produced by the debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEdge {
    /// Contact started over this button; fire its action
    Press(usize),
    /// This button is no longer held; restore its visual only
    Release(usize),
}

/// Press/release edge detector over hit-tested touch samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    active: Option<usize>,
}

impl Debouncer {
    /// Create a debouncer with no button held
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Feed one raw sample, hit testing it against the keypad
    pub fn update(&mut self, sample: &TouchSample, keypad: &Keypad) -> Option<TouchEdge> {
        match sample.point() {
            Some((x, y)) => self.contact(keypad.hit_test(x, y)),
            None => self.lift(),
        }
    }

    /// Contact reported; `hit` is the button under the finger, if any
    pub fn contact(&mut self, hit: Option<usize>) -> Option<TouchEdge> {
        if hit == self.active {
            return None;
        }

        let previous = self.active;
        self.active = hit;

        match (hit, previous) {
            (Some(index), _) => Some(TouchEdge::Press(index)),
            (None, Some(index)) => Some(TouchEdge::Release(index)),
            (None, None) => None,
        }
    }

    /// No contact reported
    pub fn lift(&mut self) -> Option<TouchEdge> {
        self.active.take().map(TouchEdge::Release)
    }

    /// Button currently held, if any
    pub fn active(&self) -> Option<usize> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeypadConfig;
    use proptest::prelude::*;

    fn keypad() -> Keypad {
        Keypad::new(KeypadConfig::default()).unwrap()
    }

    #[test]
    fn test_single_press_while_held() {
        let keypad = keypad();
        let mut debouncer = Debouncer::new();
        let on_seven = TouchSample::pressed(30, 110);

        assert_eq!(debouncer.update(&on_seven, &keypad), Some(TouchEdge::Press(0)));
        for _ in 0..10 {
            assert_eq!(debouncer.update(&on_seven, &keypad), None);
        }
        assert_eq!(
            debouncer.update(&TouchSample::released(), &keypad),
            Some(TouchEdge::Release(0))
        );
        assert_eq!(debouncer.update(&TouchSample::released(), &keypad), None);
        assert_eq!(debouncer.active(), None);
    }

    #[test]
    fn test_jitter_inside_button_does_not_refire() {
        let keypad = keypad();
        let mut debouncer = Debouncer::new();
        assert_eq!(
            debouncer.update(&TouchSample::pressed(10, 95), &keypad),
            Some(TouchEdge::Press(0))
        );
        assert_eq!(debouncer.update(&TouchSample::pressed(55, 128), &keypad), None);
        assert_eq!(debouncer.update(&TouchSample::pressed(31, 111), &keypad), None);
    }

    #[test]
    fn test_slide_to_another_button_presses_it() {
        let keypad = keypad();
        let mut debouncer = Debouncer::new();
        debouncer.update(&TouchSample::pressed(30, 110), &keypad);
        assert_eq!(
            debouncer.update(&TouchSample::pressed(90, 110), &keypad),
            Some(TouchEdge::Press(1))
        );
        assert_eq!(debouncer.active(), Some(1));
    }

    #[test]
    fn test_slide_onto_empty_space_releases_without_press() {
        let keypad = keypad();
        let mut debouncer = Debouncer::new();
        debouncer.update(&TouchSample::pressed(30, 110), &keypad);
        assert_eq!(
            debouncer.update(&TouchSample::pressed(100, 40), &keypad),
            Some(TouchEdge::Release(0))
        );
        assert_eq!(debouncer.active(), None);
        // Sliding back onto the same button is a new contact episode
        assert_eq!(
            debouncer.update(&TouchSample::pressed(30, 110), &keypad),
            Some(TouchEdge::Press(0))
        );
    }

    #[test]
    fn test_touch_on_empty_space_is_silent() {
        let keypad = keypad();
        let mut debouncer = Debouncer::new();
        assert_eq!(debouncer.update(&TouchSample::pressed(100, 40), &keypad), None);
        assert_eq!(debouncer.update(&TouchSample::released(), &keypad), None);
    }

    proptest! {
        #[test]
        fn prop_one_press_per_hold(holds in 1usize..200, x in 6u16..=60, y in 90u16..=131) {
            let keypad = keypad();
            let mut debouncer = Debouncer::new();
            let sample = TouchSample::pressed(x, y);

            let presses = (0..holds)
                .filter_map(|_| debouncer.update(&sample, &keypad))
                .filter(|edge| matches!(edge, TouchEdge::Press(_)))
                .count();
            prop_assert_eq!(presses, 1);
            prop_assert_eq!(
                debouncer.update(&TouchSample::released(), &keypad),
                Some(TouchEdge::Release(0))
            );
        }
    }
}
