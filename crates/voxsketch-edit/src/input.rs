//! Pointer input: drag tracking and named actions.
//!
//! These are platform-neutral: a host (browser glue, a windowing backend,
//! a test) translates its native events into [`PointerEvent`]s and named
//! triggers, and the editor reacts through the types here.

use std::collections::HashMap;

use voxsketch_core::Point;

// ---------------------------------------------------------------------------
// Pointer events
// ---------------------------------------------------------------------------

/// A pointer action on the sketch surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerAction {
    /// Primary button pressed.
    Press,
    /// Primary button released.
    Release,
    /// Pointer moved.
    Move,
    /// Pointer left the surface.
    Leave,
}

/// A pointer action at a grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pos: Point,
}

impl PointerEvent {
    pub const fn new(action: PointerAction, pos: Point) -> Self {
        Self { action, pos }
    }

    pub const fn press(pos: Point) -> Self {
        Self::new(PointerAction::Press, pos)
    }

    pub const fn release(pos: Point) -> Self {
        Self::new(PointerAction::Release, pos)
    }

    pub const fn moved(pos: Point) -> Self {
        Self::new(PointerAction::Move, pos)
    }

    pub const fn leave(pos: Point) -> Self {
        Self::new(PointerAction::Leave, pos)
    }
}

/// A drag gesture step reported by [`DragTracker`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Drag {
    /// The button went down at this position.
    Begin(Point),
    /// The pointer moved to this position with the button held.
    Continue(Point),
    /// The button was released or the pointer left the surface.
    End,
}

/// Tracks the primary button so that moves are only reported as drags
/// while it is held.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DragTracker {
    pressed: bool,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the button is currently held.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one pointer event, returning the drag step it produces.
    pub fn handle(&mut self, ev: PointerEvent) -> Option<Drag> {
        match ev.action {
            PointerAction::Press => {
                self.pressed = true;
                Some(Drag::Begin(ev.pos))
            }
            PointerAction::Move if self.pressed => Some(Drag::Continue(ev.pos)),
            PointerAction::Release | PointerAction::Leave if self.pressed => {
                self.pressed = false;
                Some(Drag::End)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Named actions
// ---------------------------------------------------------------------------

/// Where an action comes from: a control and the event it fires on.
///
/// Purely descriptive; the registry never inspects it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionBinding {
    pub source: String,
    pub event: String,
}

impl ActionBinding {
    pub fn new(source: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            event: event.into(),
        }
    }
}

type Handler<E> = Box<dyn FnMut(&E)>;

struct Action<E> {
    binding: ActionBinding,
    handlers: Vec<Handler<E>>,
}

/// Named actions with attached handlers.
///
/// An alias must be [`register`](Self::register)ed before handlers can be
/// attached with [`on`](Self::on); [`trigger`](Self::trigger) then runs
/// every handler of the alias in attachment order.
pub struct ActionRegistry<E> {
    actions: HashMap<String, Action<E>>,
}

impl<E> ActionRegistry<E> {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register `alias`. Re-registering replaces the binding and keeps the
    /// handlers already attached.
    pub fn register(&mut self, alias: impl Into<String>, binding: ActionBinding) -> &mut Self {
        let alias = alias.into();
        match self.actions.get_mut(&alias) {
            Some(action) => action.binding = binding,
            None => {
                self.actions.insert(
                    alias,
                    Action {
                        binding,
                        handlers: Vec::new(),
                    },
                );
            }
        }
        self
    }

    /// Attach `handler` to `alias`. Unknown aliases are logged and the
    /// handler is dropped.
    pub fn on<H>(&mut self, alias: &str, handler: H) -> &mut Self
    where
        H: FnMut(&E) + 'static,
    {
        match self.actions.get_mut(alias) {
            Some(action) => action.handlers.push(Box::new(handler)),
            None => log::warn!("no action registered for alias \u{201c}{alias}\u{201d}"),
        }
        self
    }

    /// Run every handler attached to `alias` with `event`. Returns how many
    /// ran (0 for unknown aliases).
    pub fn trigger(&mut self, alias: &str, event: &E) -> usize {
        let Some(action) = self.actions.get_mut(alias) else {
            return 0;
        };
        for handler in action.handlers.iter_mut() {
            handler(event);
        }
        action.handlers.len()
    }

    /// The binding registered for `alias`.
    pub fn binding(&self, alias: &str) -> Option<&ActionBinding> {
        self.actions.get(alias).map(|a| &a.binding)
    }

    /// Whether `alias` is registered.
    pub fn contains(&self, alias: &str) -> bool {
        self.actions.contains_key(alias)
    }

    /// Number of handlers attached to `alias`.
    pub fn handler_count(&self, alias: &str) -> usize {
        self.actions.get(alias).map_or(0, |a| a.handlers.len())
    }
}

impl<E> Default for ActionRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
