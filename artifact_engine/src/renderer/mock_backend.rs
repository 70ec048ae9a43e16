/// Mock backend and input source for unit tests
///
/// The mock records every backend call into a shared log so tests can inspect
/// the exact call sequence after the backend has been boxed into a
/// `RenderContext`. It can be told to fail after a number of calls to simulate
/// a lost context mid-flush.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::flow::ParameterValue;
use crate::input::{InputSource, Key};
use crate::renderer::{
    RenderBackend, DrawableDesc, DrawableHandle, ShaderDesc, ShaderHandle,
};

// ============================================================================
// Recorded calls
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    ActivateShader(ShaderHandle),
    SetUniform(ShaderHandle, String, ParameterValue),
    DrawIndexed(DrawableHandle),
    EndFrame,
}

// ============================================================================
// Mock Backend
// ============================================================================

pub struct MockBackend {
    /// Every activate/set/draw/end call in execution order
    pub calls: Rc<RefCell<Vec<BackendCall>>>,
    /// Fail every call once this many calls have succeeded
    pub fail_after: Rc<Cell<Option<usize>>>,
    /// Panic inside `draw_indexed` instead of returning
    pub panic_on_draw: Rc<Cell<bool>>,
    shaders: SlotMap<ShaderHandle, String>,
    drawables: SlotMap<DrawableHandle, String>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            fail_after: Rc::new(Cell::new(None)),
            panic_on_draw: Rc::new(Cell::new(false)),
            shaders: SlotMap::with_key(),
            drawables: SlotMap::with_key(),
        }
    }

    fn record(&mut self, call: BackendCall) -> Result<()> {
        let mut calls = self.calls.borrow_mut();
        if let Some(limit) = self.fail_after.get() {
            if calls.len() >= limit {
                return Err(Error::BackendError("mock context lost".to_string()));
            }
        }
        calls.push(call);
        Ok(())
    }
}

impl RenderBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderHandle> {
        Ok(self.shaders.insert(desc.name.clone()))
    }

    fn destroy_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.shaders
            .remove(shader)
            .map(|_| ())
            .ok_or_else(|| Error::UnknownHandle(format!("{:?}", shader)))
    }

    fn create_drawable(&mut self, desc: &DrawableDesc) -> Result<DrawableHandle> {
        Ok(self.drawables.insert(desc.name.clone()))
    }

    fn destroy_drawable(&mut self, drawable: DrawableHandle) -> Result<()> {
        self.drawables
            .remove(drawable)
            .map(|_| ())
            .ok_or_else(|| Error::UnknownHandle(format!("{:?}", drawable)))
    }

    fn has_shader(&self, shader: ShaderHandle) -> bool {
        self.shaders.contains_key(shader)
    }

    fn has_drawable(&self, drawable: DrawableHandle) -> bool {
        self.drawables.contains_key(drawable)
    }

    fn activate_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.record(BackendCall::ActivateShader(shader))
    }

    fn set_uniform(&mut self, shader: ShaderHandle, name: &str, value: &ParameterValue) -> Result<()> {
        self.record(BackendCall::SetUniform(shader, name.to_string(), *value))
    }

    fn draw_indexed(&mut self, drawable: DrawableHandle) -> Result<()> {
        if self.panic_on_draw.get() {
            panic!("mock driver crash drawing {:?}", drawable);
        }
        self.record(BackendCall::DrawIndexed(drawable))
    }

    fn end_frame(&mut self) -> Result<()> {
        self.record(BackendCall::EndFrame)
    }
}

// ============================================================================
// Mock Input
// ============================================================================

#[derive(Default)]
pub struct MockInput {
    pressed: RefCell<FxHashSet<Key>>,
    queries: Cell<usize>,
    fail: Cell<bool>,
}

impl MockInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: Key) {
        self.pressed.borrow_mut().insert(key);
    }

    pub fn release(&self, key: Key) {
        self.pressed.borrow_mut().remove(&key);
    }

    pub fn release_all(&self) {
        self.pressed.borrow_mut().clear();
    }

    /// Make every subsequent query fail
    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }

    pub fn query_count(&self) -> usize {
        self.queries.get()
    }
}

impl InputSource for MockInput {
    fn is_key_pressed(&self, key: Key) -> Result<bool> {
        self.queries.set(self.queries.get() + 1);
        if self.fail.get() {
            return Err(Error::BackendError("mock input device lost".to_string()));
        }
        Ok(self.pressed.borrow().contains(&key))
    }
}
