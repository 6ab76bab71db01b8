use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::context::GraphicsContext;
use crate::error::RenderError;
use crate::scene::StateProvider;
use crate::time::FrameCounter;

use super::{FrameRequest, Renderer, RendererConfig, Scheduler, Surfaces, is_debug_frame};

/// Type-erased loop operations the registry needs from a renderer.
trait FrameLoop {
    fn schedule(&mut self);
    fn cancel(&mut self);
    fn accept(&mut self, request: FrameRequest) -> bool;
    fn run_frame(&mut self) -> Result<(), RenderError>;
}

impl<G: GraphicsContext> FrameLoop for Renderer<G> {
    fn schedule(&mut self) {
        Renderer::schedule(self);
    }

    fn cancel(&mut self) {
        Renderer::cancel(self);
    }

    fn accept(&mut self, request: FrameRequest) -> bool {
        Renderer::accept(self, request)
    }

    fn run_frame(&mut self) -> Result<(), RenderError> {
        self.step().map(|_| ())
    }
}

struct Active {
    renderer: Rc<RefCell<dyn FrameLoop>>,
    typed: Rc<dyn Any>,
    frames: FrameCounter,
}

thread_local! {
    // Rendering is single-threaded; each thread has its own slot.
    static ACTIVE: RefCell<Option<Active>> = const { RefCell::new(None) };
}

/// Non-owning handle to an installed renderer.
///
/// Becomes invalid as soon as the renderer is destroyed.
pub struct RendererHandle<G> {
    inner: Weak<RefCell<Renderer<G>>>,
}

impl<G> Clone for RendererHandle<G> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<G: GraphicsContext> RendererHandle<G> {
    /// False once the renderer has been destroyed.
    pub fn is_active(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Runs `f` against the renderer. `None` when it has been destroyed or
    /// is busy running a frame.
    pub fn with<R>(&self, f: impl FnOnce(&mut Renderer<G>) -> R) -> Option<R> {
        let renderer = self.inner.upgrade()?;
        let mut guard = renderer.try_borrow_mut().ok()?;
        Some(f(&mut guard))
    }
}

/// Installs a renderer with the default configuration and schedules its
/// first frame.
pub fn initialize<G: GraphicsContext + 'static>(
    surfaces: Surfaces<G>,
    state: Box<dyn StateProvider>,
    scheduler: Box<dyn Scheduler>,
) -> Result<RendererHandle<G>, RenderError> {
    initialize_with_config(surfaces, state, scheduler, RendererConfig::default())
}

/// Installs a renderer and schedules its first frame.
///
/// Fails with [`RenderError::AlreadyInitialized`] while another renderer is
/// installed; call [`destroy`] first.
pub fn initialize_with_config<G: GraphicsContext + 'static>(
    surfaces: Surfaces<G>,
    state: Box<dyn StateProvider>,
    scheduler: Box<dyn Scheduler>,
    config: RendererConfig,
) -> Result<RendererHandle<G>, RenderError> {
    if is_active() {
        return Err(RenderError::AlreadyInitialized);
    }

    let renderer = Rc::new(RefCell::new(Renderer::new(surfaces, state, scheduler, config)));
    let frames = renderer.borrow().frame_counter();
    let handle = RendererHandle { inner: Rc::downgrade(&renderer) };

    let erased: Rc<RefCell<dyn FrameLoop>> = renderer.clone();
    ACTIVE.with(|slot| {
        *slot.borrow_mut() = Some(Active { renderer: erased, typed: renderer.clone(), frames });
    });

    renderer.borrow_mut().schedule();
    log::info!("renderer initialized");
    Ok(handle)
}

/// Cancels the pending refresh and uninstalls the renderer.
///
/// Calling it with no renderer installed does nothing.
pub fn destroy() {
    let Some(active) = ACTIVE.with(|slot| slot.borrow_mut().take()) else {
        return;
    };

    match active.renderer.try_borrow_mut() {
        Ok(mut renderer) => renderer.cancel(),
        // Called from inside a frame: `refresh` sees the renderer is gone and
        // does not reschedule.
        Err(_) => log::debug!("destroy() during a frame; the loop stops after it"),
    }
    log::info!("renderer destroyed after {} frame(s)", active.frames.get());
}

/// Entry point for the host scheduler: runs one loop iteration.
///
/// Returns `Ok(false)` when `request` is stale (cancelled, superseded or for
/// a destroyed renderer) and nothing ran. A faulted frame is logged and
/// returned; the loop is rescheduled either way.
pub fn refresh(request: FrameRequest) -> Result<bool, RenderError> {
    let Some(renderer) = ACTIVE.with(|slot| slot.borrow().as_ref().map(|a| a.renderer.clone())) else {
        log::trace!("ignoring {request:?}: no active renderer");
        return Ok(false);
    };

    let result = {
        let Ok(mut guard) = renderer.try_borrow_mut() else {
            return Err(RenderError::Reentrant);
        };
        if !guard.accept(request) {
            log::trace!("ignoring stale {request:?}");
            return Ok(false);
        }
        guard.run_frame()
    };

    if let Err(e) = &result {
        log::error!("frame failed: {e}");
    }

    // The frame may have destroyed or replaced the renderer.
    if is_current(&renderer) {
        renderer.borrow_mut().schedule();
    }

    result.map(|()| true)
}

/// Typed handle to the installed renderer, if it uses backend `G`.
pub fn instance<G: GraphicsContext + 'static>() -> Option<RendererHandle<G>> {
    let typed = ACTIVE.with(|slot| slot.borrow().as_ref().map(|a| a.typed.clone()))?;
    let renderer = typed.downcast::<RefCell<Renderer<G>>>().ok()?;
    Some(RendererHandle { inner: Rc::downgrade(&renderer) })
}

pub fn is_active() -> bool {
    ACTIVE.with(|slot| slot.borrow().is_some())
}

/// Frame counter of the installed renderer.
pub fn frame_count() -> Option<u64> {
    ACTIVE.with(|slot| slot.borrow().as_ref().map(|a| a.frames.get()))
}

/// True on frames where `frame_count % interval == 0`, for throttled
/// diagnostics. False with no renderer installed or `interval == 0`.
pub fn debug(interval: u64) -> bool {
    frame_count().is_some_and(|n| is_debug_frame(n, interval))
}

fn is_current(renderer: &Rc<RefCell<dyn FrameLoop>>) -> bool {
    ACTIVE.with(|slot| {
        slot.borrow()
            .as_ref()
            .is_some_and(|a| Rc::ptr_eq(&a.renderer, renderer))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RecordingContext;
    use crate::coords::{Camera, Vec2, Viewport};
    use crate::primitives::BatchKind;
    use crate::renderer::ManualScheduler;
    use crate::scene::{Location, LocationId, Planet, PlanetKind, SceneState};

    fn scene() -> Box<SceneState> {
        let mut state = SceneState::new(Camera::default());
        state.locations.push(Location {
            id: LocationId(1),
            coords: Vec2::zero(),
            planet: Planet::new(PlanetKind::Planet, 1, 4.0),
        });
        Box::new(state)
    }

    fn start(scheduler: &ManualScheduler) -> Result<RendererHandle<RecordingContext>, RenderError> {
        let surfaces = Surfaces::new(RecordingContext::new(Viewport::new(640.0, 480.0)));
        initialize(surfaces, scene(), Box::new(scheduler.clone()))
    }

    #[test]
    fn initialize_installs_and_schedules_first_frame() {
        let scheduler = ManualScheduler::new();
        let handle = start(&scheduler).unwrap();

        assert!(is_active());
        assert!(handle.is_active());
        assert_eq!(frame_count(), Some(0));
        assert!(debug(120));
        assert_eq!(scheduler.pending().len(), 1);

        destroy();
    }

    #[test]
    fn second_initialize_is_refused() {
        let first = ManualScheduler::new();
        let handle = start(&first).unwrap();

        let second = ManualScheduler::new();
        assert!(matches!(start(&second), Err(RenderError::AlreadyInitialized)));
        assert!(second.pending().is_empty());
        assert!(handle.is_active());
        assert_eq!(first.pending().len(), 1);

        destroy();
    }

    #[test]
    fn destroy_cancels_and_is_idempotent() {
        let scheduler = ManualScheduler::new();
        let handle = start(&scheduler).unwrap();
        let request = scheduler.pending()[0];

        destroy();
        assert!(!is_active());
        assert!(!handle.is_active());
        assert!(handle.with(|r| r.frame_count()).is_none());
        assert!(scheduler.pending().is_empty());
        assert_eq!(scheduler.cancelled(), vec![request]);

        destroy();
        assert!(!is_active());
        assert_eq!(frame_count(), None);
        assert!(!debug(1));
    }

    #[test]
    fn reinitialize_after_destroy_starts_fresh() {
        let scheduler = ManualScheduler::new();
        start(&scheduler).unwrap();
        scheduler.run_next().unwrap().unwrap();
        scheduler.run_next().unwrap().unwrap();
        assert_eq!(frame_count(), Some(2));
        destroy();

        let fresh = ManualScheduler::new();
        let handle = start(&fresh).unwrap();
        assert_eq!(frame_count(), Some(0));
        assert_eq!(fresh.pending().len(), 1);
        assert_eq!(handle.with(|r| r.frame_count()), Some(0));

        destroy();
    }

    #[test]
    fn each_refresh_runs_one_frame_and_reschedules() {
        let scheduler = ManualScheduler::new();
        let handle = start(&scheduler).unwrap();

        for expected in 1..=3 {
            assert_eq!(scheduler.run_next().unwrap().unwrap(), true);
            assert_eq!(frame_count(), Some(expected));
            assert_eq!(scheduler.pending().len(), 1);
        }
        assert_eq!(handle.with(|r| r.context().context().presents()), Some(3));
        assert_eq!(handle.with(|r| r.last_stats().frame), Some(3));

        destroy();
    }

    #[test]
    fn stale_requests_are_ignored() {
        let scheduler = ManualScheduler::new();
        start(&scheduler).unwrap();
        let first = scheduler.next().unwrap();
        refresh(first).unwrap();

        // Delivering the same token twice does nothing the second time.
        assert_eq!(refresh(first).unwrap(), false);
        assert_eq!(frame_count(), Some(1));
        assert_eq!(scheduler.pending().len(), 1);

        destroy();
        assert_eq!(refresh(FrameRequest::new(99)).unwrap(), false);
    }

    #[test]
    fn faulted_frame_is_reported_and_loop_continues() {
        let scheduler = ManualScheduler::new();
        let handle = start(&scheduler).unwrap();
        handle.with(|r| r.context_mut().context_mut().fail_next_draw(BatchKind::Planet));

        assert!(matches!(scheduler.run_next(), Some(Err(RenderError::Backend(_)))));
        assert_eq!(scheduler.pending().len(), 1);
        assert_eq!(handle.with(|r| r.pending_commands()), Some(0));

        assert_eq!(scheduler.run_next().unwrap().unwrap(), true);
        assert_eq!(frame_count(), Some(2));

        destroy();
    }

    #[test]
    fn debug_is_true_on_interval_multiples() {
        let scheduler = ManualScheduler::new();
        start(&scheduler).unwrap();
        let mut hits = Vec::new();
        for _ in 0..240 {
            scheduler.run_next().unwrap().unwrap();
            if debug(120) {
                hits.push(frame_count().unwrap());
            }
        }
        assert_eq!(hits, vec![120, 240]);

        destroy();
    }

    #[test]
    fn instance_returns_a_typed_handle() {
        let scheduler = ManualScheduler::new();
        start(&scheduler).unwrap();
        let handle = instance::<RecordingContext>().unwrap();
        assert_eq!(handle.with(|r| r.context().viewport()), Some(Viewport::new(640.0, 480.0)));
        destroy();
        assert!(instance::<RecordingContext>().is_none());
        assert!(!handle.is_active());
    }
}
