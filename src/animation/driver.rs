use std::time::Duration;

use tracing::debug;

/// Anything able to schedule a future redraw of the widget.
pub trait FrameScheduler {
    /// Ask for another render pass once `delay` has elapsed.
    fn request_redraw(&mut self, delay: Duration);

    /// Called at the start of every render pass.
    fn frame_started(&mut self) {}
}

/// Scheduler for off-screen rendering: redraw requests go nowhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl FrameScheduler for Headless {
    fn request_redraw(&mut self, _delay: Duration) {}
}

/// Keeps the redraw loop alive while a step is running.
///
/// Every render pass calls [`AnimationDriver::animate`]; while animating that
/// runs one tick and schedules the next frame, so the loop sustains itself
/// until the tick calls [`AnimationDriver::stop`].
#[derive(Debug)]
pub struct AnimationDriver<S> {
    scheduler: S,
    animating: bool,
    frame_delay: Duration,
}

impl<S: FrameScheduler> AnimationDriver<S> {
    pub fn new(scheduler: S, frame_delay: Duration) -> Self {
        Self {
            scheduler,
            animating: false,
            frame_delay,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn start(&mut self) {
        if !self.animating {
            self.animating = true;
            debug!("animation started");
            self.scheduler.request_redraw(Duration::ZERO);
        }
    }

    pub fn stop(&mut self) {
        if self.animating {
            self.animating = false;
            debug!("animation stopped");
        }
    }

    pub fn begin_frame(&mut self) {
        self.scheduler.frame_started();
    }

    /// Repaint as soon as possible without touching the animation state.
    pub fn request_redraw(&mut self) {
        self.scheduler.request_redraw(Duration::ZERO);
    }

    /// Run one tick if animating, then queue the next frame.
    pub fn animate<F>(&mut self, tick: F)
    where
        F: FnOnce(&mut Self),
    {
        if self.animating {
            tick(self);
            let delay = self.frame_delay;
            self.scheduler.request_redraw(delay);
        }
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
