//! The driving loop.
//!
//! A [`Driver`] runs one tick per display refresh: it smooths the pointer
//! toward the latest target, advances the [`Ecosystem`] and hands back the
//! frame to render. Cancellation is checked before every tick; once a
//! [`CancelToken`] fires, the driver tears the ecosystem down and never
//! ticks again.
//!
//! ```ignore
//! let mut driver = Driver::new(Ecosystem::initialize(config)?);
//! let target = driver.pointer_target();   // give this to the input layer
//! let cancel = driver.cancel_token();     // and this to whoever closes the window
//!
//! while let Some(frame) = driver.frame()? {
//!     renderer.upload(&frame);
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ecosystem::{Ecosystem, Frame};
use crate::error::SimulationError;
use crate::pointer::{PointerSmoother, PointerTarget};
use crate::time::FrameClock;

/// Cloneable cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that no further ticks run.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Owns the ecosystem and runs it tick by tick.
pub struct Driver {
    ecosystem: Ecosystem,
    smoother: PointerSmoother,
    target: PointerTarget,
    cancel: CancelToken,
    clock: FrameClock,
}

impl Driver {
    /// Wrap an initialized ecosystem.
    pub fn new(ecosystem: Ecosystem) -> Self {
        let smoother = PointerSmoother::new(ecosystem.config().pointer);
        Self {
            ecosystem,
            smoother,
            target: PointerTarget::new(),
            cancel: CancelToken::new(),
            clock: FrameClock::new(),
        }
    }

    /// Handle for input callbacks to write the raw pointer into.
    pub fn pointer_target(&self) -> PointerTarget {
        self.target.clone()
    }

    /// Handle that stops the loop.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run one tick.
    ///
    /// Returns `Ok(None)` once cancelled; the ecosystem is torn down on the
    /// first such call.
    pub fn frame(&mut self) -> Result<Option<Frame<'_>>, SimulationError> {
        if self.cancel.is_cancelled() {
            self.ecosystem.teardown();
            return Ok(None);
        }

        if self.clock.update() {
            log::debug!(
                "frame {}: {:.1} fps, {} line segments",
                self.clock.frame(),
                self.clock.fps(),
                self.ecosystem.line_buffer().segment_count()
            );
        }

        let pointer = self.smoother.step(self.target.get());
        self.ecosystem.tick(pointer).map(Some)
    }

    /// Run up to `ticks` ticks without a window. Stops early if cancelled
    /// and returns the number of ticks actually run.
    pub fn run_for(&mut self, ticks: u64) -> Result<u64, SimulationError> {
        let mut ran = 0;
        while ran < ticks {
            if self.frame()?.is_none() {
                break;
            }
            ran += 1;
        }
        Ok(ran)
    }

    /// Cancel and tear down immediately.
    pub fn shutdown(&mut self) {
        self.cancel.cancel();
        self.ecosystem.teardown();
    }

    pub fn ecosystem(&self) -> &Ecosystem {
        &self.ecosystem
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Smoothed pointer as of the last tick.
    pub fn pointer_world(&self) -> glam::Vec3 {
        self.smoother.world()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EcosystemConfig;
    use glam::Vec2;

    fn driver(count: i64) -> Driver {
        let config = EcosystemConfig::new().with_particle_count(count).with_seed(8);
        Driver::new(Ecosystem::initialize(config).unwrap())
    }

    #[test]
    fn test_run_for() {
        let mut d = driver(12);
        assert_eq!(d.run_for(5).unwrap(), 5);
        assert_eq!(d.ecosystem().tick_count(), 5);
        assert_eq!(d.clock().frame(), 5);
    }

    #[test]
    fn test_cancel_stops_ticks_and_tears_down() {
        let mut d = driver(12);
        let cancel = d.cancel_token();
        d.run_for(2).unwrap();
        cancel.cancel();

        assert!(d.frame().unwrap().is_none());
        assert!(d.ecosystem().is_torn_down());
        assert_eq!(d.run_for(10).unwrap(), 0);
        assert_eq!(d.ecosystem().tick_count(), 2);
    }

    #[test]
    fn test_pointer_updates_coalesce() {
        let mut d = driver(3);
        let target = d.pointer_target();
        target.set(Vec2::new(-1.0, -1.0));
        target.set(Vec2::new(0.3, 0.0));
        target.set(Vec2::new(1.0, 0.5));
        d.frame().unwrap();

        // One smoothing step toward the last write only
        let p = d.pointer_world();
        assert!((p.x - 2.5).abs() < 1e-6);
        assert!((p.y - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_shutdown() {
        let mut d = driver(3);
        d.shutdown();
        assert!(d.cancel_token().is_cancelled());
        assert!(d.ecosystem().is_torn_down());
        assert!(d.frame().unwrap().is_none());
    }
}
