/// HeadlessBackend - RenderBackend implementation without a GPU
///
/// Keeps live shaders and drawables in slot maps, tracks the active program the
/// way a GL context would, and counts what every frame did. Statistics are kept
/// behind a shared handle so they stay readable after the backend has been
/// boxed into a `RenderContext`.

use std::cell::RefCell;
use std::rc::Rc;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use artifact_engine::artifact::{
    Error, Result, WindowConfig,
    flow::ParameterValue,
    render::{RenderBackend, DrawableDesc, DrawableHandle, ShaderDesc, ShaderHandle},
};
use artifact_engine::{engine_bail, engine_debug, engine_trace};

// ============================================================================
// Statistics
// ============================================================================

/// Counters for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessFrameStats {
    pub shader_binds: u32,
    pub uniform_uploads: u32,
    pub uniform_bytes: usize,
    pub draw_calls: u32,
    pub triangles: u64,
}

/// Accumulated backend statistics
#[derive(Debug, Clone, Default)]
pub struct HeadlessStats {
    /// Frames that reached `end_frame`
    pub frames_presented: u64,
    pub total_draw_calls: u64,
    pub total_triangles: u64,
    /// Counters of the last presented frame
    pub last_frame: HeadlessFrameStats,
    /// Draw calls issued per drawable
    pub draws_by_drawable: FxHashMap<DrawableHandle, u64>,
}

impl HeadlessStats {
    /// Draw calls issued for `drawable` since the backend was created
    pub fn draws_of(&self, drawable: DrawableHandle) -> u64 {
        self.draws_by_drawable.get(&drawable).copied().unwrap_or(0)
    }
}

/// Shared, read-only view on a backend's statistics
#[derive(Debug, Clone)]
pub struct HeadlessStatsHandle {
    inner: Rc<RefCell<HeadlessStats>>,
}

impl HeadlessStatsHandle {
    pub fn snapshot(&self) -> HeadlessStats {
        self.inner.borrow().clone()
    }

    pub fn frames_presented(&self) -> u64 {
        self.inner.borrow().frames_presented
    }
}

// ============================================================================
// Resources
// ============================================================================

struct HeadlessShader {
    name: String,
    /// Last value uploaded per uniform
    uniforms: FxHashMap<String, ParameterValue>,
}

struct HeadlessDrawable {
    name: String,
    vertex_count: usize,
    index_count: usize,
}

// ============================================================================
// Backend
// ============================================================================

pub struct HeadlessBackend {
    window: WindowConfig,
    shaders: SlotMap<ShaderHandle, HeadlessShader>,
    drawables: SlotMap<DrawableHandle, HeadlessDrawable>,
    active_shader: Option<ShaderHandle>,
    frame: HeadlessFrameStats,
    /// Every call fails once this many frames have been presented
    lose_device_at_frame: Option<u64>,
    stats: Rc<RefCell<HeadlessStats>>,
}

impl HeadlessBackend {
    pub fn new(window: WindowConfig) -> Self {
        Self {
            window,
            shaders: SlotMap::with_key(),
            drawables: SlotMap::with_key(),
            active_shader: None,
            frame: HeadlessFrameStats::default(),
            lose_device_at_frame: None,
            stats: Rc::new(RefCell::new(HeadlessStats::default())),
        }
    }

    /// Simulate a lost device after `frames` presented frames
    pub fn with_device_lost_at(mut self, frames: Option<u64>) -> Self {
        self.lose_device_at_frame = frames;
        self
    }

    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    pub fn stats(&self) -> HeadlessStatsHandle {
        HeadlessStatsHandle {
            inner: self.stats.clone(),
        }
    }

    /// Last value uploaded to `name` on `shader`
    pub fn uniform(&self, shader: ShaderHandle, name: &str) -> Option<ParameterValue> {
        self.shaders.get(shader)?.uniforms.get(name).copied()
    }

    pub fn active_shader(&self) -> Option<ShaderHandle> {
        self.active_shader
    }

    fn check_device(&self) -> Result<()> {
        if let Some(limit) = self.lose_device_at_frame {
            let presented = self.stats.borrow().frames_presented;
            if presented >= limit {
                engine_bail!("artifact::headless", "Device lost after {} frame(s)", presented);
            }
        }
        Ok(())
    }
}

fn check_entry_point(shader: &str, stage: &str, source: &str) -> Result<()> {
    if !source.contains("main") {
        return Err(Error::InvalidResource(format!(
            "shader '{}': {} stage has no 'main' entry point", shader, stage
        )));
    }
    Ok(())
}

impl RenderBackend for HeadlessBackend {
    fn name(&self) -> &str {
        "headless"
    }

    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderHandle> {
        self.check_device()?;
        check_entry_point(&desc.name, "vertex", &desc.vertex_source)?;
        check_entry_point(&desc.name, "fragment", &desc.fragment_source)?;

        let handle = self.shaders.insert(HeadlessShader {
            name: desc.name.clone(),
            uniforms: FxHashMap::default(),
        });
        engine_debug!("artifact::headless", "Linked shader '{}' as {:?}", desc.name, handle);
        Ok(handle)
    }

    fn destroy_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        let removed = self.shaders
            .remove(shader)
            .ok_or_else(|| Error::UnknownHandle(format!("shader {:?}", shader)))?;
        if self.active_shader == Some(shader) {
            self.active_shader = None;
        }
        engine_debug!("artifact::headless", "Destroyed shader '{}'", removed.name);
        Ok(())
    }

    fn create_drawable(&mut self, desc: &DrawableDesc) -> Result<DrawableHandle> {
        self.check_device()?;
        let handle = self.drawables.insert(HeadlessDrawable {
            name: desc.name.clone(),
            vertex_count: desc.vertex_count(),
            index_count: desc.index_count(),
        });
        engine_debug!(
            "artifact::headless",
            "Uploaded drawable '{}': {} vertices, {} indices",
            desc.name, desc.vertex_count(), desc.index_count()
        );
        Ok(handle)
    }

    fn destroy_drawable(&mut self, drawable: DrawableHandle) -> Result<()> {
        let removed = self.drawables
            .remove(drawable)
            .ok_or_else(|| Error::UnknownHandle(format!("drawable {:?}", drawable)))?;
        engine_debug!(
            "artifact::headless",
            "Destroyed drawable '{}' ({} vertices)", removed.name, removed.vertex_count
        );
        Ok(())
    }

    fn has_shader(&self, shader: ShaderHandle) -> bool {
        self.shaders.contains_key(shader)
    }

    fn has_drawable(&self, drawable: DrawableHandle) -> bool {
        self.drawables.contains_key(drawable)
    }

    fn begin_frame(&mut self) -> Result<()> {
        self.check_device()?;
        self.frame = HeadlessFrameStats::default();
        self.active_shader = None;
        Ok(())
    }

    fn activate_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.check_device()?;
        let Some(program) = self.shaders.get(shader) else {
            engine_bail!("artifact::headless", "Activate of unknown shader {:?}", shader);
        };
        engine_trace!("artifact::headless", "Activate shader '{}'", program.name);
        self.active_shader = Some(shader);
        self.frame.shader_binds += 1;
        Ok(())
    }

    fn set_uniform(&mut self, shader: ShaderHandle, name: &str, value: &ParameterValue) -> Result<()> {
        self.check_device()?;
        if self.active_shader != Some(shader) {
            engine_bail!("artifact::headless", "Uniform '{}' set on inactive shader {:?}", name, shader);
        }
        let Some(program) = self.shaders.get_mut(shader) else {
            engine_bail!("artifact::headless", "Uniform '{}' set on unknown shader {:?}", name, shader);
        };

        engine_trace!("artifact::headless", "Set '{}' = {:?} on '{}'", name, value, program.name);
        program.uniforms.insert(name.to_string(), *value);
        self.frame.uniform_uploads += 1;
        self.frame.uniform_bytes += value.as_bytes().len();
        Ok(())
    }

    fn draw_indexed(&mut self, drawable: DrawableHandle) -> Result<()> {
        self.check_device()?;
        if self.active_shader.is_none() {
            engine_bail!("artifact::headless", "Draw of {:?} without an active shader", drawable);
        }
        let Some(geometry) = self.drawables.get(drawable) else {
            engine_bail!("artifact::headless", "Draw of unknown drawable {:?}", drawable);
        };

        engine_trace!(
            "artifact::headless",
            "Draw '{}' ({} indices)", geometry.name, geometry.index_count
        );
        self.frame.draw_calls += 1;
        self.frame.triangles += (geometry.index_count / 3) as u64;
        *self.stats
            .borrow_mut()
            .draws_by_drawable
            .entry(drawable)
            .or_insert(0) += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.check_device()?;
        let mut stats = self.stats.borrow_mut();
        stats.frames_presented += 1;
        stats.total_draw_calls += self.frame.draw_calls as u64;
        stats.total_triangles += self.frame.triangles;
        stats.last_frame = self.frame;

        engine_debug!(
            "artifact::headless",
            "Presented frame {} ({}x{}): {} draw call(s), {} triangle(s)",
            stats.frames_presented - 1, self.window.width, self.window.height,
            self.frame.draw_calls, self.frame.triangles
        );
        Ok(())
    }
}
