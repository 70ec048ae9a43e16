//! Integration tests for HeadlessBackend
//!
//! These tests drive the headless backend through a RenderContext, the same
//! path an application takes. No GPU or window required.
//!
//! Run with: cargo test --test headless_backend_tests

use artifact_engine::artifact::{AppConfig, Error, RenderApi, WindowConfig};
use artifact_engine::artifact::flow::{ParameterValue, RenderContext};
use artifact_engine::artifact::input::{InputSource, Key};
use artifact_engine::artifact::render::{
    BackendRegistry, BufferLayout, DataType, DrawableDesc, DrawableHandle, RenderBackend,
    ShaderDesc, ShaderHandle,
};
use artifact_engine_renderer_headless::{HeadlessBackend, HeadlessOptions, HeadlessStatsHandle};
use glam::{Mat4, Vec4};
use serial_test::serial;

const VERTEX_SRC: &str = "#version 330 core\nvoid main() { gl_Position = vec4(0.0); }";
const FRAGMENT_SRC: &str = "#version 330 core\nout vec4 color;\nvoid main() { color = vec4(1.0); }";

// ============================================================================
// HELPERS
// ============================================================================

fn quad_desc(name: &str) -> DrawableDesc {
    DrawableDesc::new(
        name,
        vec![
            -0.5, -0.5, 0.0,
             0.5, -0.5, 0.0,
             0.5,  0.5, 0.0,
            -0.5,  0.5, 0.0,
        ],
        vec![0, 1, 2, 2, 3, 0],
        BufferLayout::new().with(DataType::Vec3, "a_Position"),
    )
}

fn headless_context(lost_at: Option<u64>) -> (RenderContext, HeadlessStatsHandle) {
    let backend = HeadlessBackend::new(WindowConfig::new(320, 240, "Headless Test"))
        .with_device_lost_at(lost_at);
    let stats = backend.stats();
    (RenderContext::from_backend(backend), stats)
}

fn scene(context: &RenderContext) -> (ShaderHandle, DrawableHandle) {
    let shader = ShaderDesc::new("flat", VERTEX_SRC, FRAGMENT_SRC).create(context).unwrap();
    let quad = quad_desc("quad").create(context).unwrap();
    (shader, quad)
}

// ============================================================================
// RESOURCE TESTS
// ============================================================================

#[test]
fn test_headless_create_and_destroy_resources() {
    let (context, _stats) = headless_context(None);
    let (shader, quad) = scene(&context);

    assert!(context.has_shader(shader));
    assert!(context.has_drawable(quad));

    context.destroy_drawable(quad).unwrap();
    context.destroy_shader(shader).unwrap();
    assert!(!context.has_shader(shader));
    assert!(!context.has_drawable(quad));

    assert!(matches!(context.destroy_shader(shader), Err(Error::UnknownHandle(_))));
}

#[test]
fn test_headless_rejects_shader_without_entry_point() {
    let (context, _stats) = headless_context(None);
    let result = ShaderDesc::new("broken", "void vs() {}", FRAGMENT_SRC).create(&context);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

// ============================================================================
// FRAME TESTS
// ============================================================================

#[test]
fn test_headless_counts_frame() {
    let (context, stats) = headless_context(None);
    let (shader, quad) = scene(&context);

    context.render_flow(|flow| {
        flow.bind_and_parameterize(shader, |p| {
            p.set_mat4("u_MVP", Mat4::IDENTITY);
            p.set_vec4("u_Color", Vec4::new(1.0, 0.5, 0.25, 1.0));
        })?;
        flow.submit(quad)?;
        flow.submit(quad)
    }).unwrap();

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.frames_presented, 1);
    assert_eq!(snapshot.last_frame.shader_binds, 1);
    assert_eq!(snapshot.last_frame.uniform_uploads, 2);
    // mat4 + vec4 as f32
    assert_eq!(snapshot.last_frame.uniform_bytes, (16 + 4) * 4);
    assert_eq!(snapshot.last_frame.draw_calls, 2);
    assert_eq!(snapshot.last_frame.triangles, 4);
    assert_eq!(snapshot.draws_of(quad), 2);
}

#[test]
fn test_headless_draw_counts_are_per_handle() {
    let (context, stats) = headless_context(None);
    let (shader, first) = scene(&context);
    let second = quad_desc("quad").create(&context).unwrap();

    context.render_flow(|flow| {
        flow.bind_and_parameterize(shader, |_| {})?;
        flow.submit(first)?;
        flow.submit(second)?;
        flow.submit(second)
    }).unwrap();

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.draws_of(first), 1);
    assert_eq!(snapshot.draws_of(second), 2);
    assert_eq!(snapshot.draws_by_drawable.len(), 2);
}

#[test]
fn test_headless_frame_counters_reset_each_frame() {
    let (context, stats) = headless_context(None);
    let (shader, quad) = scene(&context);

    for _ in 0..3 {
        context.render_flow(|flow| {
            flow.bind_and_parameterize(shader, |p| {
                p.set_float("u_Time", 0.5);
            })?;
            flow.submit(quad)
        }).unwrap();
    }

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.frames_presented, 3);
    assert_eq!(snapshot.total_draw_calls, 3);
    assert_eq!(snapshot.total_triangles, 6);
    assert_eq!(snapshot.last_frame.draw_calls, 1);
}

#[test]
fn test_headless_empty_frame_is_presented() {
    let (context, stats) = headless_context(None);
    context.render_flow(|_flow| Ok(())).unwrap();
    assert_eq!(stats.frames_presented(), 1);
    assert_eq!(stats.snapshot().last_frame.draw_calls, 0);
}

#[test]
fn test_headless_submit_without_bind_fails_flush() {
    let (context, stats) = headless_context(None);
    let (_shader, quad) = scene(&context);

    let result = context.render_flow(|flow| flow.submit(quad));

    assert!(matches!(result, Err(Error::BackendError(_))));
    assert_eq!(stats.frames_presented(), 0);
    assert_eq!(context.last_frame_stats().commands_dropped, 1);
}

#[test]
fn test_headless_active_shader_does_not_leak_across_frames() {
    let (context, stats) = headless_context(None);
    let (shader, quad) = scene(&context);

    context.render_flow(|flow| {
        flow.bind_and_parameterize(shader, |_| {})?;
        flow.submit(quad)
    }).unwrap();

    // Next frame draws without binding: backend state was reset
    let result = context.render_flow(|flow| flow.submit(quad));
    assert!(matches!(result, Err(Error::BackendError(_))));
    assert_eq!(stats.frames_presented(), 1);
}

#[test]
fn test_headless_uniform_values_are_stored() {
    let mut backend = HeadlessBackend::new(WindowConfig::default());
    let shader = backend
        .create_shader(&ShaderDesc::new("flat", VERTEX_SRC, FRAGMENT_SRC))
        .unwrap();

    backend.begin_frame().unwrap();
    backend.activate_shader(shader).unwrap();
    backend.set_uniform(shader, "u_Color", &ParameterValue::Vec4(Vec4::ONE)).unwrap();

    assert_eq!(backend.active_shader(), Some(shader));
    assert_eq!(backend.uniform(shader, "u_Color"), Some(ParameterValue::Vec4(Vec4::ONE)));
    assert_eq!(backend.uniform(shader, "u_MVP"), None);
}

#[test]
fn test_headless_uniform_on_inactive_shader_fails() {
    let mut backend = HeadlessBackend::new(WindowConfig::default());
    let shader = backend
        .create_shader(&ShaderDesc::new("flat", VERTEX_SRC, FRAGMENT_SRC))
        .unwrap();

    let result = backend.set_uniform(shader, "u_Color", &ParameterValue::Float(1.0));
    assert!(matches!(result, Err(Error::BackendError(_))));
}

// ============================================================================
// DEVICE LOSS TESTS
// ============================================================================

#[test]
fn test_headless_device_loss_aborts_flush() {
    let (context, stats) = headless_context(Some(2));
    let (shader, quad) = scene(&context);

    let draw = || context.render_flow(|flow| {
        flow.bind_and_parameterize(shader, |p| {
            p.set_float("u_Time", 1.0);
        })?;
        flow.submit(quad)
    });

    assert!(draw().is_ok());
    assert!(draw().is_ok());
    assert!(matches!(draw(), Err(Error::BackendError(_))));
    assert!(matches!(draw(), Err(Error::BackendError(_))));

    assert_eq!(stats.frames_presented(), 2);
    assert_eq!(context.frames_flushed(), 4);
    assert_eq!(context.last_frame_stats().commands_dropped, 2);
    assert!(!context.is_session_open());
}

// ============================================================================
// REGISTRY TESTS
// ============================================================================

#[test]
#[serial]
fn test_headless_registers_under_headless_tag() {
    let mut registry = BackendRegistry::new();
    artifact_engine_renderer_headless::register(&mut registry);

    assert!(registry.contains(RenderApi::Headless));
    assert!(!registry.contains(RenderApi::OpenGl));

    let backend = registry.create(&AppConfig::default()).unwrap();
    assert_eq!(backend.renderer.name(), "headless");
}

#[test]
#[serial]
fn test_headless_scripted_input_through_registry() {
    let mut registry = BackendRegistry::new();
    artifact_engine_renderer_headless::register_with(
        &mut registry,
        HeadlessOptions::default().with_key_press(Key::LeftControl.with(Key::Q), 1, 1),
    );

    let backend = registry.create(&AppConfig::default()).unwrap();
    let input = backend.input;

    assert!(!input.is_key_pressed(Key::Q).unwrap());
    input.begin_tick(1).unwrap();
    assert!(input.is_key_pressed(Key::LeftControl).unwrap());
    assert!(input.is_key_pressed(Key::Q).unwrap());
    input.begin_tick(2).unwrap();
    assert!(!input.is_key_pressed(Key::Q).unwrap());
}
