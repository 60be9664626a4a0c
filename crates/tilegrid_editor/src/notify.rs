//! Change notification

use std::sync::mpsc::{channel, Receiver, Sender};

use tilegrid_core::{AreaId, PaletteId, TileId};

/// One cell whose rendered content changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePositionUpdate {
    pub x: i32,
    pub y: i32,
    pub layer: i32,
    /// `None` when the cell became empty
    pub tile: Option<(TileId, PaletteId)>,
}

/// An observable change to the editing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Specific cells changed; renderers patch in place
    TilePositionsChanged {
        area_id: AreaId,
        updates: Vec<TilePositionUpdate>,
    },
    /// Layer structure changed (layer added/removed, area resized);
    /// renderers re-sync the whole area
    LayersChanged { area_id: AreaId },
    /// The selection changed
    SelectionChanged,
}

/// Session-owned change fan-out.
///
/// Subscribers receive events over `mpsc` channels, so the session never
/// holds borrowed callbacks and tears the whole thing down with its own
/// lifetime. Disconnected subscribers are pruned on send.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Sender<ChangeEvent>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to change events
    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send an event to every live subscriber
    pub fn notify(&mut self, event: ChangeEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_receive_events() {
        let mut notifier = ChangeNotifier::new();
        let rx1 = notifier.subscribe();
        let rx2 = notifier.subscribe();

        notifier.notify(ChangeEvent::SelectionChanged);

        assert_eq!(rx1.try_recv().unwrap(), ChangeEvent::SelectionChanged);
        assert_eq!(rx2.try_recv().unwrap(), ChangeEvent::SelectionChanged);
        assert!(rx1.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut notifier = ChangeNotifier::new();
        let rx = notifier.subscribe();
        drop(notifier.subscribe());
        assert_eq!(notifier.subscriber_count(), 2);

        notifier.notify(ChangeEvent::LayersChanged { area_id: 1 });
        assert_eq!(notifier.subscriber_count(), 1);
        assert!(rx.try_recv().is_ok());
    }
}
