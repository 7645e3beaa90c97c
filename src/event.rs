use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{trace, warn};

use crate::animation::FrameScheduler;

/// Application-level events
#[derive(Debug, Clone)]
pub enum Event {
    /// User key press
    Key(KeyEvent),
    /// Mouse button pressed
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// A scheduled render pass is due
    Redraw,
}

/// Handles event collection from the terminal.
///
/// Uses crossterm's async `EventStream` (via `futures::StreamExt`) instead of
/// blocking `event::poll()` / `event::read()`, so no tokio worker thread is
/// ever blocked.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    /// Create a new event handler. Spawns the background input task.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));

        // Async input task — uses crossterm's EventStream (non-blocking)
        let input_tx = tx.clone();
        let input_stop = stop.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let maybe_event = reader.next().await;
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let event = match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Some(Ok(CrosstermEvent::Mouse(mouse)))
                        if matches!(mouse.kind, MouseEventKind::Down(_)) =>
                    {
                        Event::Mouse(mouse)
                    }
                    Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                    Some(Err(_)) | None => {
                        // Stream ended or errored — exit gracefully
                        return;
                    }
                    _ => continue,
                };
                if input_tx.send(event).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx, stop }
    }

    /// Get a clone of the sender for scheduling redraws
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Signal the background input task to stop
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Turns redraw requests into delayed [`Event::Redraw`] messages.
///
/// Each request spawns a short-lived timer task. Requests made while one is
/// already pending are folded into it; the flag clears when the render pass
/// starts.
#[derive(Debug, Clone)]
pub struct EventScheduler {
    tx: mpsc::UnboundedSender<Event>,
    pending: Arc<AtomicBool>,
}

impl EventScheduler {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            tx,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Relaxed)
    }
}

impl FrameScheduler for EventScheduler {
    fn request_redraw(&mut self, delay: Duration) {
        if self.pending.swap(true, Ordering::Relaxed) {
            trace!(?delay, "redraw already pending");
            return;
        }
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if tx.send(Event::Redraw).is_err() {
                warn!("redraw dropped: event loop is gone");
            }
        });
    }

    fn frame_started(&mut self) {
        self.pending.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scheduler_delivers_redraw() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = EventScheduler::new(tx);

        scheduler.request_redraw(Duration::from_millis(5));
        assert!(scheduler.is_pending());

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap();
        assert!(matches!(event, Some(Event::Redraw)));
    }

    #[tokio::test]
    async fn test_scheduler_coalesces_pending_requests() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = EventScheduler::new(tx);

        scheduler.request_redraw(Duration::ZERO);
        scheduler.request_redraw(Duration::ZERO);
        scheduler.request_redraw(Duration::from_millis(1));

        assert!(matches!(rx.recv().await, Some(Event::Redraw)));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_frame_start_rearms_scheduler() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = EventScheduler::new(tx);

        scheduler.request_redraw(Duration::ZERO);
        assert!(matches!(rx.recv().await, Some(Event::Redraw)));
        scheduler.frame_started();
        assert!(!scheduler.is_pending());

        scheduler.request_redraw(Duration::ZERO);
        assert!(matches!(rx.recv().await, Some(Event::Redraw)));
    }

    #[tokio::test]
    async fn test_closed_loop_is_not_an_error() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut scheduler = EventScheduler::new(tx);
        scheduler.request_redraw(Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
