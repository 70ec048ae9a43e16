/// RenderContext - explicit rendering context for frame sessions
///
/// Owns the backend renderer and the per-context session state. Everything
/// that would otherwise be ambient ("current renderer", "current shader") is
/// reached through this object, which the application passes around.

use std::cell::{Cell, RefCell};
use crate::error::{Error, Result};
use crate::flow::{Command, CommandQueue, FrameSession};
use crate::renderer::{
    RenderBackend, DrawableDesc, DrawableHandle, ShaderDesc, ShaderHandle,
};

/// Counters for one flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Commands fully executed
    pub commands_executed: usize,
    /// Draw calls issued
    pub draw_calls: usize,
    /// Uniform values pushed
    pub uniforms_set: usize,
    /// Commands not executed because the flush aborted
    pub commands_dropped: usize,
}

/// Rendering context: one backend, at most one open frame session
///
/// # Example
///
/// ```ignore
/// let context = RenderContext::new(backend.renderer);
/// context.render_flow(|flow| {
///     flow.bind_and_parameterize(shader, |p| {
///         p.set_mat4("u_MVP", mvp);
///         p.set_vec4("u_Color", Vec4::ONE);
///     })?;
///     flow.submit(cube)
/// })?;
/// ```
pub struct RenderContext {
    backend: RefCell<Box<dyn RenderBackend>>,
    session_open: Cell<bool>,
    frames_flushed: Cell<u64>,
    last_stats: Cell<FrameStats>,
}

impl RenderContext {
    pub fn new(backend: Box<dyn RenderBackend>) -> Self {
        Self {
            backend: RefCell::new(backend),
            session_open: Cell::new(false),
            frames_flushed: Cell::new(0),
            last_stats: Cell::new(FrameStats::default()),
        }
    }

    pub fn from_backend<R: RenderBackend + 'static>(backend: R) -> Self {
        Self::new(Box::new(backend))
    }

    pub fn backend_name(&self) -> String {
        self.backend.borrow().name().to_string()
    }

    // ===== FRAME SESSIONS =====

    /// Begin a frame session
    ///
    /// # Errors
    ///
    /// `Error::SessionAlreadyOpen` if a session is already open on this context.
    /// The open session is left untouched.
    pub fn open(&self) -> Result<FrameSession<'_>> {
        if self.session_open.get() {
            crate::engine_warn!(
                "artifact::RenderContext",
                "open() while frame {} is still recording", self.frames_flushed.get()
            );
            return Err(Error::SessionAlreadyOpen);
        }
        self.session_open.set(true);
        crate::engine_trace!("artifact::RenderContext", "Opened frame {}", self.frames_flushed.get());
        Ok(FrameSession::new(self, self.frames_flushed.get()))
    }

    /// Scoped session: open, record with `record`, always close
    ///
    /// A recording error takes precedence over a flush error; the flush error
    /// is then only logged.
    pub fn render_flow<F>(&self, record: F) -> Result<()>
    where
        F: FnOnce(&mut FrameSession<'_>) -> Result<()>,
    {
        let mut session = self.open()?;
        let recorded = record(&mut session);
        let flushed = session.close();

        match (recorded, flushed) {
            (Err(record_error), Err(flush_error)) => {
                crate::engine_error!(
                    "artifact::RenderContext",
                    "Flush failed after recording error '{}': {}", record_error, flush_error
                );
                Err(record_error)
            }
            (Err(record_error), Ok(())) => Err(record_error),
            (Ok(()), flushed) => flushed,
        }
    }

    pub fn is_session_open(&self) -> bool {
        self.session_open.get()
    }

    /// Number of flushes performed (successful or aborted)
    pub fn frames_flushed(&self) -> u64 {
        self.frames_flushed.get()
    }

    pub fn last_frame_stats(&self) -> FrameStats {
        self.last_stats.get()
    }

    pub(crate) fn release_session(&self) {
        self.session_open.set(false);
    }

    /// Execute `queue` against the backend in recorded order
    ///
    /// The first backend failure aborts the flush; the remaining commands are
    /// dropped and the failure is returned as `Error::BackendError`.
    pub(crate) fn flush(&self, mut queue: CommandQueue) -> Result<()> {
        let total = queue.len();
        let frame = self.frames_flushed.get();
        let mut stats = FrameStats::default();

        let result = {
            let mut backend = self.backend.borrow_mut();
            backend.begin_frame()
                .and_then(|_| Self::execute(backend.as_mut(), &mut queue, &mut stats))
                .and_then(|_| backend.end_frame())
        };
        self.frames_flushed.set(frame + 1);

        match result {
            Ok(()) => {
                crate::engine_debug!(
                    "artifact::RenderContext",
                    "Flushed frame {}: {} command(s), {} draw call(s), {} uniform(s)",
                    frame, stats.commands_executed, stats.draw_calls, stats.uniforms_set
                );
                self.last_stats.set(stats);
                Ok(())
            }
            Err(error) => {
                stats.commands_dropped = total - stats.commands_executed;
                crate::engine_error!(
                    "artifact::RenderContext",
                    "Frame {} flush aborted: {} ({} command(s) dropped)",
                    frame, error, stats.commands_dropped
                );
                self.last_stats.set(stats);
                Err(match error {
                    Error::BackendError(msg) => Error::BackendError(msg),
                    other => Error::BackendError(other.to_string()),
                })
            }
        }
    }

    fn execute(
        backend: &mut dyn RenderBackend,
        queue: &mut CommandQueue,
        stats: &mut FrameStats,
    ) -> Result<()> {
        for command in queue.drain() {
            match &command {
                Command::BindAndParameterize { target, params } => {
                    backend.activate_shader(*target)?;
                    for (name, value) in params.entries() {
                        backend.set_uniform(*target, name, value)?;
                        stats.uniforms_set += 1;
                    }
                }
                Command::Submit { target } => {
                    backend.draw_indexed(*target)?;
                    stats.draw_calls += 1;
                }
            }
            stats.commands_executed += 1;
        }
        Ok(())
    }

    // ===== RESOURCES =====

    /// Validate `desc` and create the shader on the backend
    pub fn create_shader(&self, desc: &ShaderDesc) -> Result<ShaderHandle> {
        desc.validate()?;
        let handle = self.backend.borrow_mut().create_shader(desc)?;
        crate::engine_debug!("artifact::RenderContext", "Created shader '{}' ({:?})", desc.name, handle);
        Ok(handle)
    }

    /// Validate `desc` and upload the geometry on the backend
    pub fn create_drawable(&self, desc: &DrawableDesc) -> Result<DrawableHandle> {
        desc.validate()?;
        let handle = self.backend.borrow_mut().create_drawable(desc)?;
        crate::engine_debug!(
            "artifact::RenderContext",
            "Created drawable '{}' ({} vertices, {} indices)",
            desc.name, desc.vertex_count(), desc.index_count()
        );
        Ok(handle)
    }

    /// Release a shader on the backend
    ///
    /// # Errors
    ///
    /// - `Error::SessionAlreadyOpen` while a frame session is recording; the
    ///   queued commands may reference the handle
    /// - `Error::UnknownHandle` if the backend does not know `shader`
    pub fn destroy_shader(&self, shader: ShaderHandle) -> Result<()> {
        self.ensure_no_session("shader", shader)?;
        if !self.has_shader(shader) {
            return Err(Error::UnknownHandle(format!("shader {:?}", shader)));
        }
        self.backend.borrow_mut().destroy_shader(shader)
    }

    /// Release a drawable on the backend; same rules as `destroy_shader`
    pub fn destroy_drawable(&self, drawable: DrawableHandle) -> Result<()> {
        self.ensure_no_session("drawable", drawable)?;
        if !self.has_drawable(drawable) {
            return Err(Error::UnknownHandle(format!("drawable {:?}", drawable)));
        }
        self.backend.borrow_mut().destroy_drawable(drawable)
    }

    fn ensure_no_session(&self, kind: &str, handle: impl std::fmt::Debug) -> Result<()> {
        if self.session_open.get() {
            crate::engine_warn!(
                "artifact::RenderContext",
                "Refusing to destroy {} {:?} while frame {} is recording",
                kind, handle, self.frames_flushed.get()
            );
            return Err(Error::SessionAlreadyOpen);
        }
        Ok(())
    }

    pub fn has_shader(&self, shader: ShaderHandle) -> bool {
        self.backend.borrow().has_shader(shader)
    }

    pub fn has_drawable(&self, drawable: DrawableHandle) -> bool {
        self.backend.borrow().has_drawable(drawable)
    }
}
