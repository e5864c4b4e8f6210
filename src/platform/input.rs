//! Input events and sources

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use glam::Vec2;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Escape,
}

/// Mouse event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Move,
    Down,
    Up,
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer event at a position in screen coordinates
    Mouse { action: MouseAction, pos: Vec2 },
    /// Window closed or quit requested
    Quit,
}

/// Source of pending input events
pub trait InputSource {
    /// Take every event that arrived since the last poll
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// FIFO event queue; clones share the same queue
///
/// Browser listeners push into one handle while the frame loop polls another.
#[derive(Debug, Clone, Default)]
pub struct QueuedInput {
    queue: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: InputEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    pub fn extend(&self, events: impl IntoIterator<Item = InputEvent>) {
        self.queue.borrow_mut().extend(events);
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl InputSource for QueuedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

/// Routes input events to registered handlers
///
/// Handlers are plain copyable tags resolved by the owner, so registration
/// holds no borrows. Each list keeps registration order.
#[derive(Debug, Clone)]
pub struct Dispatcher<H: Copy> {
    key_down: HashMap<Key, Vec<H>>,
    key_up: HashMap<Key, Vec<H>>,
    mouse: Vec<H>,
}

impl<H: Copy> Default for Dispatcher<H> {
    fn default() -> Self {
        Self {
            key_down: HashMap::new(),
            key_up: HashMap::new(),
            mouse: Vec::new(),
        }
    }
}

impl<H: Copy> Dispatcher<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key_down(&mut self, key: Key, handler: H) {
        self.key_down.entry(key).or_default().push(handler);
    }

    pub fn on_key_up(&mut self, key: Key, handler: H) {
        self.key_up.entry(key).or_default().push(handler);
    }

    pub fn on_mouse(&mut self, handler: H) {
        self.mouse.push(handler);
    }

    /// Unregister every mouse handler
    pub fn clear_mouse(&mut self) {
        self.mouse.clear();
    }

    /// Handlers registered for `event`, in registration order
    pub fn handlers_for(&self, event: &InputEvent) -> Vec<H> {
        match event {
            InputEvent::KeyDown(key) => self.key_down.get(key).cloned().unwrap_or_default(),
            InputEvent::KeyUp(key) => self.key_up.get(key).cloned().unwrap_or_default(),
            InputEvent::Mouse { .. } => self.mouse.clone(),
            InputEvent::Quit => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_routes_by_event_kind() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.on_key_down(Key::Left, 1);
        dispatcher.on_key_down(Key::Left, 2);
        dispatcher.on_key_up(Key::Left, 3);
        dispatcher.on_mouse(4);

        assert_eq!(dispatcher.handlers_for(&InputEvent::KeyDown(Key::Left)), vec![1, 2]);
        assert_eq!(dispatcher.handlers_for(&InputEvent::KeyUp(Key::Left)), vec![3]);
        assert!(dispatcher.handlers_for(&InputEvent::KeyDown(Key::Right)).is_empty());

        let click = InputEvent::Mouse {
            action: MouseAction::Down,
            pos: Vec2::ZERO,
        };
        assert_eq!(dispatcher.handlers_for(&click), vec![4]);
        dispatcher.clear_mouse();
        assert!(dispatcher.handlers_for(&click).is_empty());
        assert!(dispatcher.handlers_for(&InputEvent::Quit).is_empty());
    }

    #[test]
    fn test_queue_is_shared_between_clones() {
        let mut source = QueuedInput::new();
        let producer = source.clone();

        producer.push(InputEvent::KeyDown(Key::Left));
        producer.push(InputEvent::KeyUp(Key::Left));
        assert_eq!(source.len(), 2);

        let events = source.poll_events();
        assert_eq!(
            events,
            vec![InputEvent::KeyDown(Key::Left), InputEvent::KeyUp(Key::Left)]
        );
        assert!(producer.is_empty());
    }
}
