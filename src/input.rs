//! Normalized input for a single tick
//!
//! Raw sampling and debouncing happen outside the core. The driver hands the
//! core one `InputSnapshot` per tick; edge sets are only valid for that tick.

use glam::Vec2;

/// Buttons the core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Confirm / jump / launch
    A,
    /// Back / cancel
    B,
    X,
    Y,
    /// Select (pause)
    Sel,
    Up,
    Down,
    Left,
    Right,
}

const BUTTON_COUNT: usize = 9;

impl Button {
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::Sel,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    const fn index(self) -> usize {
        match self {
            Button::A => 0,
            Button::B => 1,
            Button::X => 2,
            Button::Y => 3,
            Button::Sel => 4,
            Button::Up => 5,
            Button::Down => 6,
            Button::Left => 7,
            Button::Right => 8,
        }
    }
}

/// Per-button flag set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ButtonSet {
    bits: [bool; BUTTON_COUNT],
}

impl ButtonSet {
    fn set(&mut self, button: Button, value: bool) {
        self.bits[button.index()] = value;
    }

    fn get(&self, button: Button) -> bool {
        self.bits[button.index()]
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    axis: Vec2,
    held: ButtonSet,
    pressed: ButtonSet,
    released: ButtonSet,
}

impl InputSnapshot {
    /// Empty snapshot: stick centered, nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Stick position in [-1, 1] on both axes, dead zone already applied.
    /// Positive y is up.
    pub fn axis(&self) -> Vec2 {
        self.axis
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.held.get(button)
    }

    pub fn was_just_pressed(&self, button: Button) -> bool {
        self.pressed.get(button)
    }

    pub fn was_just_released(&self, button: Button) -> bool {
        self.released.get(button)
    }

    pub fn with_axis(mut self, x: f32, y: f32) -> Self {
        self.axis = Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
        self
    }

    /// Button went down this tick (also counts as held)
    pub fn with_press(mut self, button: Button) -> Self {
        self.pressed.set(button, true);
        self.held.set(button, true);
        self
    }

    /// Button went up this tick
    pub fn with_release(mut self, button: Button) -> Self {
        self.released.set(button, true);
        self.held.set(button, false);
        self
    }

    pub fn with_held(mut self, button: Button) -> Self {
        self.held.set(button, true);
        self
    }
}

/// Derives edge sets from consecutive level samples.
#[derive(Debug, Clone, Default)]
pub struct ButtonTracker {
    previous: ButtonSet,
}

impl ButtonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the snapshot for this tick from the currently held buttons.
    pub fn sample(&mut self, axis: Vec2, held: &[Button]) -> InputSnapshot {
        let mut current = ButtonSet::default();
        for &button in held {
            current.set(button, true);
        }

        let mut snapshot = InputSnapshot::new().with_axis(axis.x, axis.y);
        for button in Button::ALL {
            let now = current.get(button);
            let before = self.previous.get(button);
            if now && !before {
                snapshot = snapshot.with_press(button);
            } else if !now && before {
                snapshot = snapshot.with_release(button);
            } else if now {
                snapshot = snapshot.with_held(button);
            }
        }
        self.previous = current;
        snapshot
    }
}

/// Dead zone and response curve applied to a raw normalized stick reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisShaping {
    pub dead_zone: f32,
    /// Exponent of the response curve (1.0 = linear)
    pub sensitivity: f32,
}

impl Default for AxisShaping {
    fn default() -> Self {
        Self {
            dead_zone: 0.15,
            sensitivity: 1.0,
        }
    }
}

impl AxisShaping {
    pub fn new(dead_zone: f32, sensitivity: f32) -> Self {
        Self {
            dead_zone,
            sensitivity,
        }
    }

    pub fn apply(&self, raw: Vec2) -> Vec2 {
        Vec2::new(self.shape(raw.x), self.shape(raw.y))
    }

    fn shape(&self, v: f32) -> f32 {
        let v = v.clamp(-1.0, 1.0);
        if v.abs() < self.dead_zone {
            return 0.0;
        }
        if self.sensitivity == 1.0 {
            return v;
        }
        v.abs().powf(self.sensitivity).copysign(v)
    }

    /// Directional flags as the menu screens read them
    pub fn directions(&self, shaped: Vec2) -> [(Button, bool); 4] {
        [
            (Button::Up, shaped.y > self.dead_zone),
            (Button::Down, shaped.y < -self.dead_zone),
            (Button::Left, shaped.x < -self.dead_zone),
            (Button::Right, shaped.x > self.dead_zone),
        ]
    }
}
