/// RenderBackend trait - the narrow interface the pipeline drives

use crate::error::Result;
use crate::flow::ParameterValue;
use crate::input::InputSource;
use crate::renderer::{DrawableHandle, ShaderHandle, ShaderDesc, DrawableDesc};
use std::rc::Rc;

/// Rendering backend interface
///
/// Implemented by backend crates (headless, OpenGL, ...). The pipeline never
/// touches graphics state directly: every activation, uniform upload and draw
/// call goes through this trait, in the order the frame recorded them.
pub trait RenderBackend {
    /// Backend name (for logs)
    fn name(&self) -> &str;

    /// Compile and link a shader program
    ///
    /// # Arguments
    ///
    /// * `desc` - Validated shader descriptor
    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderHandle>;

    /// Release a shader program; the handle becomes unknown
    fn destroy_shader(&mut self, shader: ShaderHandle) -> Result<()>;

    /// Upload geometry
    ///
    /// # Arguments
    ///
    /// * `desc` - Validated drawable descriptor
    fn create_drawable(&mut self, desc: &DrawableDesc) -> Result<DrawableHandle>;

    /// Release geometry; the handle becomes unknown
    fn destroy_drawable(&mut self, drawable: DrawableHandle) -> Result<()>;

    /// Whether `shader` refers to a live shader
    fn has_shader(&self, shader: ShaderHandle) -> bool;

    /// Whether `drawable` refers to live geometry
    fn has_drawable(&self, drawable: DrawableHandle) -> bool;

    /// Make `shader` the active program
    fn activate_shader(&mut self, shader: ShaderHandle) -> Result<()>;

    /// Push one named uniform value to `shader`
    fn set_uniform(&mut self, shader: ShaderHandle, name: &str, value: &ParameterValue) -> Result<()>;

    /// Issue an indexed draw for `drawable` with the currently active state
    fn draw_indexed(&mut self, drawable: DrawableHandle) -> Result<()>;

    /// Prepare per-frame state before the first command of a flush
    fn begin_frame(&mut self) -> Result<()> {
        Ok(())
    }

    /// Present the frame after a successful flush
    fn end_frame(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A resolved backend: renderer plus the input source sharing its window
pub struct Backend {
    pub renderer: Box<dyn RenderBackend>,
    pub input: Rc<dyn InputSource>,
}

impl Backend {
    pub fn new<R: RenderBackend + 'static>(renderer: R, input: Rc<dyn InputSource>) -> Self {
        Self {
            renderer: Box::new(renderer),
            input,
        }
    }
}
