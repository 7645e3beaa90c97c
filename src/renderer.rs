use tracing::{debug, info};

use crate::animation::{AnimationDriver, FrameScheduler};
use crate::chain::{ArrowChain, ChainStep};
use crate::config::WidgetConfig;
use crate::geometry::Surface;

/// Wires the chain and the animation driver to draw and tap events.
#[derive(Debug)]
pub struct ArrowRenderer<S> {
    config: WidgetConfig,
    chain: ArrowChain,
    driver: AnimationDriver<S>,
    frames: u64,
}

impl<S: FrameScheduler> ArrowRenderer<S> {
    pub fn new(config: WidgetConfig, scheduler: S) -> Self {
        let chain = ArrowChain::new(config.nodes);
        let driver = AnimationDriver::new(scheduler, config.frame_delay);
        Self {
            config,
            chain,
            driver,
            frames: 0,
        }
    }

    /// One render pass: clear, draw every node, then advance the animation.
    pub fn render<T: Surface + ?Sized>(&mut self, surface: &mut T) {
        self.frames = self.frames.wrapping_add(1);
        self.driver.begin_frame();
        surface.clear(self.config.background);
        self.chain.draw(surface, &self.config);

        let chain = &mut self.chain;
        let step = &self.config.step;
        self.driver.animate(|driver| {
            if let ChainStep::Completed {
                node,
                checkpoint,
                next,
                reversed,
            } = chain.update(step)
            {
                debug!(node, checkpoint, next, reversed, "step completed");
                driver.stop();
            }
        });
    }

    /// Arm the next step if the active node is idle.
    pub fn handle_tap(&mut self) -> bool {
        if self.chain.start_updating() {
            info!(node = self.chain.active_index(), "tap: step started");
            self.driver.start();
            true
        } else {
            false
        }
    }

    /// Ask for a repaint without advancing anything.
    pub fn request_redraw(&mut self) {
        self.driver.request_redraw();
    }

    pub fn chain(&self) -> &ArrowChain {
        &self.chain
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &S {
        self.driver.scheduler()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::driver::tests::RecordingScheduler;
    use crate::chain::TraversalDirection;
    use crate::geometry::{CommandRecorder, DrawCommand};

    fn renderer() -> ArrowRenderer<RecordingScheduler> {
        ArrowRenderer::new(WidgetConfig::default(), RecordingScheduler::default())
    }

    fn frame(renderer: &mut ArrowRenderer<RecordingScheduler>) -> CommandRecorder {
        let mut surface = CommandRecorder::new(600.0, 1200.0);
        renderer.render(&mut surface);
        surface
    }

    #[test]
    fn test_render_clears_then_draws_all_nodes() {
        let mut renderer = renderer();
        let surface = frame(&mut renderer);

        assert_eq!(
            surface.commands()[0],
            DrawCommand::Clear {
                color: WidgetConfig::default().background
            }
        );
        assert_eq!(surface.lines().count(), 20);
        assert!(!renderer.is_animating());
        assert!(renderer.scheduler().requests.is_empty());
    }

    #[test]
    fn test_tap_starts_driver_once() {
        let mut renderer = renderer();
        assert!(renderer.handle_tap());
        assert!(renderer.is_animating());

        // Re-entrant taps are ignored while the step runs
        assert!(!renderer.handle_tap());
        frame(&mut renderer);
        assert!(!renderer.handle_tap());
        assert_eq!(renderer.chain().active().state.direction, 1.0);
    }

    #[test]
    fn test_tap_to_completion() {
        let mut renderer = renderer();
        renderer.handle_tap();
        assert_eq!(renderer.scheduler().requests, vec![Duration::ZERO]);

        let mut frames = 0;
        while renderer.is_animating() {
            frame(&mut renderer);
            frames += 1;
            assert!(frames < 1000, "animation never stopped");
        }

        let first = renderer.chain().node(0).unwrap();
        assert_eq!(first.state.scale, 1.0);
        assert_eq!(first.state.previous, 1.0);
        assert_eq!(first.state.direction, 0.0);
        assert_eq!(renderer.chain().active_index(), 1);
        assert_eq!(renderer.chain().direction(), TraversalDirection::Forward);

        // One immediate request from the tap, one delayed request per tick
        let requests = &renderer.scheduler().requests;
        assert_eq!(requests.len(), frames + 1);
        assert!(requests[1..]
            .iter()
            .all(|d| *d == Duration::from_millis(50)));
        assert_eq!(renderer.scheduler().frames, frames);
    }

    #[test]
    fn test_frames_after_completion_do_not_tick() {
        let mut renderer = renderer();
        renderer.handle_tap();
        while renderer.is_animating() {
            frame(&mut renderer);
        }
        let requests = renderer.scheduler().requests.len();
        let state = renderer.chain().active().state;

        frame(&mut renderer);

        assert_eq!(renderer.scheduler().requests.len(), requests);
        assert_eq!(renderer.chain().active().state, state);
    }

    #[test]
    fn test_completed_node_is_drawn_turned() {
        let mut renderer = renderer();
        renderer.handle_tap();
        while renderer.is_animating() {
            frame(&mut renderer);
        }
        let surface = frame(&mut renderer);
        // Node 0 settled at scale 1 and is rotated a quarter turn
        assert!(surface
            .commands()
            .contains(&DrawCommand::Rotate { degrees: 90.0 }));
    }

    #[test]
    fn test_request_redraw_is_immediate() {
        let mut renderer = renderer();
        renderer.request_redraw();
        assert_eq!(renderer.scheduler().requests, vec![Duration::ZERO]);
        assert!(!renderer.is_animating());
    }
}
