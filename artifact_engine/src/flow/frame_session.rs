/// FrameSession - scoped command recording for one tick

use crate::error::{Error, Result};
use crate::flow::{Command, CommandQueue, ParameterSet, RenderContext};
use crate::renderer::{DrawableHandle, ShaderHandle};

/// Records the commands of one frame and flushes them when closed
///
/// Obtained from `RenderContext::open()`. Recording calls only validate
/// handles and append to the queue; nothing reaches the graphics API until
/// `close()`. Dropping an unclosed session closes it, so the queue is flushed
/// on every exit path including `?` and panics.
pub struct FrameSession<'ctx> {
    context: &'ctx RenderContext,
    /// `None` once closed
    queue: Option<CommandQueue>,
    frame_index: u64,
}

impl<'ctx> FrameSession<'ctx> {
    pub(crate) fn new(context: &'ctx RenderContext, frame_index: u64) -> Self {
        Self {
            context,
            queue: Some(CommandQueue::new()),
            frame_index,
        }
    }

    fn active_queue(&mut self) -> Result<&mut CommandQueue> {
        self.queue.as_mut().ok_or(Error::NoActiveSession)
    }

    /// Record "activate `shader` and push the parameters built by `configure`"
    ///
    /// `configure` runs against a fresh `ParameterSet`.
    ///
    /// # Errors
    ///
    /// - `Error::NoActiveSession` if the session is closed
    /// - `Error::UnknownHandle` if the backend does not know `shader`
    pub fn bind_and_parameterize<F>(&mut self, shader: ShaderHandle, configure: F) -> Result<()>
    where
        F: FnOnce(&mut ParameterSet),
    {
        let mut params = ParameterSet::new();
        configure(&mut params);
        self.bind(shader, params)
    }

    /// Record a bind with a prebuilt parameter set
    pub fn bind(&mut self, shader: ShaderHandle, params: ParameterSet) -> Result<()> {
        let context = self.context;
        let queue = self.active_queue()?;
        if !context.has_shader(shader) {
            return Err(Error::UnknownHandle(format!("shader {:?}", shader)));
        }
        queue.push(Command::BindAndParameterize { target: shader, params });
        Ok(())
    }

    /// Record a draw of `drawable`
    ///
    /// # Errors
    ///
    /// - `Error::NoActiveSession` if the session is closed
    /// - `Error::UnknownHandle` if the backend does not know `drawable`
    pub fn submit(&mut self, drawable: DrawableHandle) -> Result<()> {
        let context = self.context;
        let queue = self.active_queue()?;
        if !context.has_drawable(drawable) {
            return Err(Error::UnknownHandle(format!("drawable {:?}", drawable)));
        }
        queue.push(Command::Submit { target: drawable });
        Ok(())
    }

    /// Flush the queue to the backend and end the session
    ///
    /// Idempotent: only the first call flushes.
    pub fn close(&mut self) -> Result<()> {
        let Some(queue) = self.queue.take() else {
            return Ok(());
        };
        let _release = SessionRelease(self.context);
        self.context.flush(queue)
    }

    pub fn is_open(&self) -> bool {
        self.queue.is_some()
    }

    /// Recorded, not yet flushed commands
    pub fn len(&self) -> usize {
        self.queue.as_ref().map_or(0, |q| q.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the frame this session records
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Recorded commands in order (empty once closed)
    pub fn commands(&self) -> &[Command] {
        match &self.queue {
            Some(queue) => queue.commands(),
            None => &[],
        }
    }
}

/// Clears the context's open-session flag when dropped, even if the flush unwinds
struct SessionRelease<'ctx>(&'ctx RenderContext);

impl Drop for SessionRelease<'_> {
    fn drop(&mut self) {
        self.0.release_session();
    }
}

impl Drop for FrameSession<'_> {
    fn drop(&mut self) {
        if self.queue.is_some() {
            if let Err(error) = self.close() {
                crate::engine_error!(
                    "artifact::FrameSession",
                    "Frame {} failed to flush on drop: {}", self.frame_index, error
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "frame_session_tests.rs"]
mod tests;
