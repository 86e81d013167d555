//! Interaction loop
//!
//! A `Session` owns the touch source, the display, the keypad and the
//! calculator state. Each `poll` is one iteration: read the panel, feed the
//! debouncer, dispatch a press, then redraw whatever changed.

use tapcalc_core::{Action, Debouncer, Dispatch, Engine, Keypad, Rect, TouchEdge, TouchSample};

use crate::backend::{Color, DisplayError, DisplaySink};
use crate::input::TouchSource;
use crate::render::RenderCoordinator;
use crate::screen::TextPanel;

/// Outcome of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Edge reported by the debouncer
    pub edge: Option<TouchEdge>,
    /// Action fired by a press, and what the engine did with it
    pub action: Option<(Action, Dispatch)>,
    /// The text panel was redrawn
    pub text_redrawn: bool,
    /// Button redrawn this iteration and whether it was drawn pressed
    pub button_redrawn: Option<(usize, bool)>,
}

#[cfg(feature = "defmt")]
fn log_dispatch(label: &str, action: Action, outcome: Dispatch, engine: &Engine) {
    match outcome {
        Dispatch::Rejected => defmt::warn!("{} rejected while in error", action),
        _ if engine.is_error() => defmt::warn!("Divide by zero, press C to clear"),
        _ => defmt::debug!("Button {}: {} -> {}", label, action, outcome),
    }
}

/// Single-owner calculator session
pub struct Session<T: TouchSource, D: DisplaySink> {
    touch: T,
    display: D,
    keypad: Keypad,
    engine: Engine,
    debouncer: Debouncer,
    coordinator: RenderCoordinator,
    last_sample: TouchSample,
    halted: bool,
}

impl<T: TouchSource, D: DisplaySink> Session<T, D> {
    /// Bring up the touch controller and draw the first frame
    ///
    /// A touch init failure is not an error here: the failure message is
    /// drawn and the session stays halted, ignoring every later poll.
    pub fn start(mut touch: T, mut display: D, keypad: Keypad) -> Result<Self, DisplayError> {
        let config = *keypad.config();
        display.fill_rect(
            Rect::new(0, 0, config.screen_width, config.screen_height),
            Color::Gray,
        )?;

        let coordinator = RenderCoordinator::default();
        let halted = match touch.init() {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Touch controller initialized");
                false
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Touch init failed: {:?}", _e);
                coordinator.draw_halted(&mut display)?;
                true
            }
        };

        let mut session = Self {
            touch,
            display,
            keypad,
            engine: Engine::new(),
            debouncer: Debouncer::new(),
            coordinator,
            last_sample: TouchSample::released(),
            halted,
        };

        if !halted {
            session.redraw_text()?;
            session
                .coordinator
                .draw_keypad(&mut session.display, &session.keypad)?;
        }

        Ok(session)
    }

    /// Run one loop iteration
    pub fn poll(&mut self) -> Result<Tick, DisplayError> {
        let mut tick = Tick::default();
        if self.halted {
            return Ok(tick);
        }

        let sample = self.touch.poll_touch();
        self.last_sample = sample;

        tick.edge = self.debouncer.update(&sample, &self.keypad);
        if let Some(TouchEdge::Press(index)) = tick.edge {
            if let Some(button) = self.keypad.get(index) {
                let action = button.action;
                let outcome = self.engine.dispatch(action);
                self.coordinator.mark_dirty();
                tick.action = Some((action, outcome));

                #[cfg(feature = "defmt")]
                log_dispatch(button.label, action, outcome, &self.engine);
            }
        }

        tick.text_redrawn = self.redraw_text()?;

        tick.button_redrawn = self.coordinator.next_button_redraw(self.debouncer.active());
        if let Some((index, pressed)) = tick.button_redrawn {
            if let Some(button) = self.keypad.get(index) {
                self.coordinator
                    .draw_button(&mut self.display, button, pressed)?;
            }
        }

        Ok(tick)
    }

    /// Poll forever, logging display errors and carrying on
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(_e) = self.poll() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Display error: {:?}", _e);
            }
        }
    }

    /// Redraw the text panel if its content or the dirty flag calls for it
    fn redraw_text(&mut self) -> Result<bool, DisplayError> {
        let panel = TextPanel::derive(&self.engine, &self.last_sample);
        if !self.coordinator.should_redraw_text(&panel) {
            return Ok(false);
        }
        self.coordinator
            .draw_panel(&mut self.display, self.keypad.config(), &panel)?;
        Ok(true)
    }

    /// Check if touch bring-up failed
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Calculator state
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Button layout
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Display sink
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Most recent touch sample
    pub fn last_sample(&self) -> TouchSample {
        self.last_sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FontMetrics;
    use crate::input::TouchError;
    use std::collections::VecDeque;
    use tapcalc_core::{KeypadConfig, Operator};

    struct ScriptedTouch {
        init_result: Result<(), TouchError>,
        samples: VecDeque<TouchSample>,
    }

    impl ScriptedTouch {
        fn new(samples: impl IntoIterator<Item = TouchSample>) -> Self {
            Self {
                init_result: Ok(()),
                samples: samples.into_iter().collect(),
            }
        }

        fn failing() -> Self {
            Self {
                init_result: Err(TouchError::InitFailed),
                samples: VecDeque::new(),
            }
        }
    }

    impl TouchSource for ScriptedTouch {
        fn init(&mut self) -> Result<(), TouchError> {
            self.init_result
        }

        fn poll_touch(&mut self) -> TouchSample {
            self.samples.pop_front().unwrap_or_default()
        }
    }

    #[derive(Default)]
    struct Recorder {
        fills: Vec<(Rect, Color)>,
        outlines: usize,
        texts: Vec<std::string::String>,
    }

    impl DisplaySink for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
            self.fills.push((rect, color));
            Ok(())
        }

        fn draw_rect_outline(&mut self, _rect: Rect, _color: Color) -> Result<(), DisplayError> {
            self.outlines += 1;
            Ok(())
        }

        fn draw_text(
            &mut self,
            _x: u16,
            _y: u16,
            text: &str,
            _font: &FontMetrics,
            _fg: Color,
            _bg: Color,
        ) -> Result<(), DisplayError> {
            self.texts.push(text.into());
            Ok(())
        }
    }

    struct BrokenDisplay;

    impl DisplaySink for BrokenDisplay {
        fn fill_rect(&mut self, _rect: Rect, _color: Color) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }

        fn draw_rect_outline(&mut self, _rect: Rect, _color: Color) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }

        fn draw_text(
            &mut self,
            _x: u16,
            _y: u16,
            _text: &str,
            _font: &FontMetrics,
            _fg: Color,
            _bg: Color,
        ) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }
    }

    fn keypad() -> Keypad {
        Keypad::new(KeypadConfig::default()).unwrap()
    }

    /// Sample touching the centre of the button labelled `label`
    fn tap(label: &str) -> TouchSample {
        let keypad = keypad();
        let button = keypad.buttons().iter().find(|b| b.label == label).unwrap();
        TouchSample::pressed(
            button.rect.x + button.rect.width / 2,
            button.rect.y + button.rect.height / 2,
        )
    }

    /// Press and release each label in turn
    fn taps(labels: &[&str]) -> Vec<TouchSample> {
        labels
            .iter()
            .flat_map(|label| [tap(label), TouchSample::released()])
            .collect()
    }

    fn start(touch: ScriptedTouch) -> Session<ScriptedTouch, Recorder> {
        Session::start(touch, Recorder::default(), keypad()).unwrap()
    }

    fn run_script(session: &mut Session<ScriptedTouch, Recorder>, polls: usize) -> Vec<Tick> {
        (0..polls).map(|_| session.poll().unwrap()).collect()
    }

    #[test]
    fn test_start_draws_first_frame() {
        let session = start(ScriptedTouch::new([]));
        let display = session.display();

        assert!(!session.is_halted());
        assert_eq!(display.fills[0], (Rect::new(0, 0, 240, 320), Color::Gray));
        assert_eq!(display.outlines, tapcalc_core::BUTTON_COUNT);
        assert_eq!(&display.texts[..3], ["Ready", "Op: none", "Touch: ---"]);
    }

    #[test]
    fn test_one_action_per_hold() {
        let seven = tap("7");
        let mut session = start(ScriptedTouch::new([seven, seven, seven, seven]));

        let ticks = run_script(&mut session, 4);

        assert_eq!(ticks[0].action, Some((Action::Digit('7'), Dispatch::Applied)));
        assert!(ticks[1..].iter().all(|t| t.action.is_none()));
        assert_eq!(session.engine().input().as_str(), "7");
    }

    #[test]
    fn test_pressed_visual_drawn_then_restored() {
        let mut session = start(ScriptedTouch::new([tap("5"), TouchSample::released()]));
        let ticks = run_script(&mut session, 3);

        assert_eq!(ticks[0].button_redrawn, Some((5, true)));
        assert_eq!(ticks[1].edge, Some(TouchEdge::Release(5)));
        assert_eq!(ticks[1].button_redrawn, Some((5, false)));
        assert_eq!(ticks[2].button_redrawn, None);
    }

    #[test]
    fn test_chained_expression_via_touches() {
        let script = taps(&["2", "+", "3", "*", "4", "="]);
        let polls = script.len();
        let mut session = start(ScriptedTouch::new(script));

        run_script(&mut session, polls);

        let engine = session.engine();
        assert_eq!(engine.accumulator(), 20.0);
        assert_eq!(engine.pending_operator(), None);
        assert!(engine.input().is_empty());
        assert!(session
            .display()
            .texts
            .iter()
            .any(|t| t == "Result: 20"));
    }

    #[test]
    fn test_divide_by_zero_latches_until_clear() {
        let script = taps(&["1", "/", "0", "=", "5", "C", "6"]);
        let polls = script.len();
        let mut session = start(ScriptedTouch::new(script));

        let ticks = run_script(&mut session, polls);

        // "5" at index 8 is rejected, "C" clears, "6" lands in a fresh input
        assert_eq!(ticks[8].action, Some((Action::Digit('5'), Dispatch::Rejected)));
        assert_eq!(ticks[10].action, Some((Action::Clear, Dispatch::Applied)));
        assert!(!session.engine().is_error());
        assert_eq!(session.engine().input().as_str(), "6");
        assert!(session
            .display()
            .texts
            .iter()
            .any(|t| t == "Error: invalid op"));
    }

    #[test]
    fn test_text_redrawn_only_on_change() {
        let mut session = start(ScriptedTouch::new([]));
        let ticks = run_script(&mut session, 3);
        assert!(ticks.iter().all(|t| !t.text_redrawn));
    }

    #[test]
    fn test_rejected_press_still_redraws_text() {
        let script = taps(&["1", "/", "0", "="]);
        let polls = script.len();
        let mut session = start(ScriptedTouch::new(script));
        run_script(&mut session, polls);

        let mut session_ticks = Vec::new();
        for sample in [tap("9"), TouchSample::released()] {
            session.touch.samples.push_back(sample);
            session_ticks.push(session.poll().unwrap());
        }
        assert_eq!(
            session_ticks[0].action,
            Some((Action::Digit('9'), Dispatch::Rejected))
        );
        assert!(session_ticks[0].text_redrawn);
    }

    #[test]
    fn test_touch_on_empty_space_fires_nothing() {
        // Inside the text panel
        let mut session = start(ScriptedTouch::new([TouchSample::pressed(100, 40)]));
        let ticks = run_script(&mut session, 1);

        assert_eq!(ticks[0].edge, None);
        assert_eq!(ticks[0].action, None);
        // Touch line changed
        assert!(ticks[0].text_redrawn);
        assert!(session.display().texts.iter().any(|t| t == "Touch: 100, 40"));
    }

    #[test]
    fn test_init_failure_halts() {
        let mut session = start(ScriptedTouch::failing());

        assert!(session.is_halted());
        assert_eq!(session.display().texts, ["Touch init failed"]);
        assert_eq!(session.display().fills.len(), 1);

        session.touch.samples.push_back(tap("7"));
        let tick = session.poll().unwrap();
        assert_eq!(tick, Tick::default());
        assert!(session.engine().input().is_empty());
    }

    #[test]
    fn test_display_error_propagates() {
        let result = Session::start(ScriptedTouch::new([]), BrokenDisplay, keypad());
        assert_eq!(result.err(), Some(DisplayError::Communication));
    }

    #[test]
    fn test_operator_line_follows_engine() {
        let script = taps(&["8", "-"]);
        let polls = script.len();
        let mut session = start(ScriptedTouch::new(script));
        run_script(&mut session, polls);

        assert_eq!(session.engine().pending_operator(), Some(Operator::Subtract));
        assert!(session.display().texts.iter().any(|t| t == "Op: -"));
    }
}
