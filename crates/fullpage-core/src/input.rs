//! Input normalizer: wheel, touch and keyboard reduced to logical signals.

use serde::{Deserialize, Serialize};

/// Logical request produced by any input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Advance,
    Retreat,
    /// Jump to section 1
    First,
    /// Jump to the last section
    Last,
    /// Jump to a 1-based section
    GoTo(usize),
}

/// Keys the keyboard channel understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Space,
    Home,
    End,
    Other,
}

/// Element holding keyboard focus when a key arrives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    #[default]
    Document,
    TextInput,
    TextArea,
}

impl FocusTarget {
    #[inline]
    pub fn is_text_entry(&self) -> bool {
        matches!(self, FocusTarget::TextInput | FocusTarget::TextArea)
    }
}

/// Raw event from one of the three capture channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawInput {
    /// Negative delta means scrolling down
    Wheel { delta_y: f64 },
    TouchStart { x: f64, y: f64 },
    TouchMove { x: f64, y: f64 },
    TouchEnd,
    Key {
        key: Key,
        #[serde(default)]
        focus: FocusTarget,
    },
}

/// Signal plus whether the host must suppress the native default action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Normalized {
    pub signal: Option<Signal>,
    pub prevent_default: bool,
}

impl Normalized {
    const PASS: Normalized = Normalized {
        signal: None,
        prevent_default: false,
    };

    fn handled(signal: Option<Signal>) -> Self {
        Self {
            signal,
            prevent_default: true,
        }
    }
}

/// Every wheel event is one discrete step, whatever its magnitude
pub fn normalize_wheel(delta_y: f64) -> Normalized {
    let signal = if delta_y < 0.0 {
        Some(Signal::Advance)
    } else if delta_y > 0.0 {
        Some(Signal::Retreat)
    } else {
        None
    };
    Normalized::handled(signal)
}

pub fn normalize_key(key: Key, focus: FocusTarget) -> Normalized {
    if focus.is_text_entry() {
        return Normalized::PASS;
    }
    let signal = match key {
        Key::ArrowUp | Key::PageUp => Signal::Retreat,
        Key::ArrowDown | Key::PageDown | Key::Space => Signal::Advance,
        Key::Home => Signal::First,
        Key::End => Signal::Last,
        Key::Other => return Normalized::PASS,
    };
    Normalized::handled(Some(signal))
}

/// Tracks one touch drag and turns vertical swipes into steps.
///
/// After each emitted step the start point moves to the current point, so a
/// long drag can emit several steps.
#[derive(Debug, Clone)]
pub struct TouchTracker {
    threshold: f64,
    start: Option<(f64, f64)>,
}

impl TouchTracker {
    pub fn new(threshold_px: u32) -> Self {
        Self {
            threshold: f64::from(threshold_px),
            start: None,
        }
    }

    pub fn start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> Normalized {
        let Some((start_x, start_y)) = self.start else {
            return Normalized::PASS;
        };

        let dx = x - start_x;
        let dy = y - start_y;
        if dy.abs() <= dx.abs() || dy.abs() < self.threshold {
            return Normalized::PASS;
        }

        self.start = Some((x, y));
        // Dragging up moves content towards the next section
        let signal = if dy < 0.0 {
            Signal::Advance
        } else {
            Signal::Retreat
        };
        Normalized::handled(Some(signal))
    }

    pub fn end(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

/// The three channels behind one entry point
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    touch: TouchTracker,
}

impl InputNormalizer {
    pub fn new(swipe_threshold_px: u32) -> Self {
        Self {
            touch: TouchTracker::new(swipe_threshold_px),
        }
    }

    pub fn normalize(&mut self, input: &RawInput) -> Normalized {
        match *input {
            RawInput::Wheel { delta_y } => normalize_wheel(delta_y),
            RawInput::TouchStart { x, y } => {
                self.touch.start(x, y);
                Normalized::PASS
            }
            RawInput::TouchMove { x, y } => self.touch.move_to(x, y),
            RawInput::TouchEnd => {
                self.touch.end();
                Normalized::PASS
            }
            RawInput::Key { key, focus } => normalize_key(key, focus),
        }
    }

    /// Drop any half-finished gesture
    pub fn reset(&mut self) {
        self.touch.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_direction() {
        assert_eq!(normalize_wheel(-3.0).signal, Some(Signal::Advance));
        assert_eq!(normalize_wheel(-500.0).signal, Some(Signal::Advance));
        assert_eq!(normalize_wheel(0.5).signal, Some(Signal::Retreat));
        assert_eq!(normalize_wheel(0.0).signal, None);
        assert!(normalize_wheel(0.0).prevent_default);
    }

    #[test]
    fn test_keys() {
        let doc = FocusTarget::Document;
        assert_eq!(normalize_key(Key::ArrowUp, doc).signal, Some(Signal::Retreat));
        assert_eq!(normalize_key(Key::PageUp, doc).signal, Some(Signal::Retreat));
        assert_eq!(normalize_key(Key::ArrowDown, doc).signal, Some(Signal::Advance));
        assert_eq!(normalize_key(Key::PageDown, doc).signal, Some(Signal::Advance));
        assert_eq!(normalize_key(Key::Space, doc).signal, Some(Signal::Advance));
        assert_eq!(normalize_key(Key::Home, doc).signal, Some(Signal::First));
        assert_eq!(normalize_key(Key::End, doc).signal, Some(Signal::Last));
        assert!(normalize_key(Key::End, doc).prevent_default);

        let other = normalize_key(Key::Other, doc);
        assert_eq!(other, Normalized::default());
    }

    #[test]
    fn test_keys_ignored_in_text_entry() {
        for focus in [FocusTarget::TextInput, FocusTarget::TextArea] {
            let result = normalize_key(Key::Space, focus);
            assert_eq!(result.signal, None);
            assert!(!result.prevent_default);
        }
    }

    #[test]
    fn test_swipe_threshold() {
        let mut touch = TouchTracker::new(50);
        touch.start(100.0, 400.0);

        assert_eq!(touch.move_to(100.0, 360.0).signal, None);
        let swipe = touch.move_to(105.0, 340.0);
        assert_eq!(swipe.signal, Some(Signal::Advance));
        assert!(swipe.prevent_default);
    }

    #[test]
    fn test_swipe_resets_start_point() {
        let mut touch = TouchTracker::new(50);
        touch.start(0.0, 0.0);

        assert_eq!(touch.move_to(0.0, 60.0).signal, Some(Signal::Retreat));
        // Measured from y=60 now
        assert_eq!(touch.move_to(0.0, 100.0).signal, None);
        assert_eq!(touch.move_to(0.0, 120.0).signal, Some(Signal::Retreat));
    }

    #[test]
    fn test_horizontal_drag_ignored() {
        let mut touch = TouchTracker::new(50);
        touch.start(0.0, 0.0);
        let result = touch.move_to(200.0, -80.0);
        assert_eq!(result.signal, None);
        assert!(!result.prevent_default);
    }

    #[test]
    fn test_move_without_start_ignored() {
        let mut normalizer = InputNormalizer::new(50);
        let result = normalizer.normalize(&RawInput::TouchMove { x: 0.0, y: -300.0 });
        assert_eq!(result.signal, None);

        normalizer.normalize(&RawInput::TouchStart { x: 0.0, y: 0.0 });
        normalizer.normalize(&RawInput::TouchEnd);
        let result = normalizer.normalize(&RawInput::TouchMove { x: 0.0, y: -300.0 });
        assert_eq!(result.signal, None);
    }

    #[test]
    fn test_raw_input_json() {
        let input: RawInput =
            serde_json::from_str(r#"{"kind":"key","key":"page_down"}"#).unwrap();
        assert_eq!(
            input,
            RawInput::Key {
                key: Key::PageDown,
                focus: FocusTarget::Document
            }
        );
    }
}
