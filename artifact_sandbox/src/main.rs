/// Sandbox - cube demo on the headless backend
///
/// Renders one cube per tick through a frame session and quits on Ctrl+Q,
/// which the headless input script presses after a few seconds' worth of ticks.
///
/// Set `ARTIFACT_LOG=debug` (or `trace`) for per-frame output.

use std::process::ExitCode;
use artifact_engine::artifact::{
    AppConfig, RenderApi, Result, WindowConfig,
    app::{AppContext, Application, Runner},
    input::{Key, KeyActionMap},
    log::LogSeverity,
    render::{BackendRegistry, BufferLayout, DataType, DrawableDesc, DrawableHandle, ShaderDesc, ShaderHandle},
};
use artifact_engine::{engine_error, engine_info, engine_warn};
use artifact_engine_renderer_headless::HeadlessOptions;
use glam::{Mat4, Vec3, Vec4};

const TICKS_PER_SECOND: u64 = 60;

const CUBE_VERTEX_SOURCE: &str = r#"#version 330 core

layout(location = 0) in vec3 a_Position;

uniform vec4 u_Color;
uniform mat4 u_MVP;

out vec4 v_Color;
out vec3 v_Position;

void main() {
    gl_Position = u_MVP * vec4(a_Position, 1.0);
    v_Color = u_Color;
    v_Position = a_Position;
}
"#;

const CUBE_FRAGMENT_SOURCE: &str = r#"#version 330 core

layout(location = 0) out vec4 color;

in vec3 v_Position;

void main() {
    color = vec4(v_Position * 0.5 + 0.5, 1.0);
}
"#;

/// 12 triangles, 3 unshared vertices each
#[rustfmt::skip]
const CUBE_VERTICES: [f32; 108] = [
    -1.0, -1.0, -1.0,   -1.0, -1.0,  1.0,   -1.0,  1.0,  1.0,
     1.0,  1.0, -1.0,   -1.0, -1.0, -1.0,   -1.0,  1.0, -1.0,
     1.0, -1.0,  1.0,   -1.0, -1.0, -1.0,    1.0, -1.0, -1.0,
     1.0,  1.0, -1.0,    1.0, -1.0, -1.0,   -1.0, -1.0, -1.0,
    -1.0, -1.0, -1.0,   -1.0,  1.0,  1.0,   -1.0,  1.0, -1.0,
     1.0, -1.0,  1.0,   -1.0, -1.0,  1.0,   -1.0, -1.0, -1.0,
    -1.0,  1.0,  1.0,   -1.0, -1.0,  1.0,    1.0, -1.0,  1.0,
     1.0,  1.0,  1.0,    1.0, -1.0, -1.0,    1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,    1.0,  1.0,  1.0,    1.0, -1.0,  1.0,
     1.0,  1.0,  1.0,    1.0,  1.0, -1.0,   -1.0,  1.0, -1.0,
     1.0,  1.0,  1.0,   -1.0,  1.0, -1.0,   -1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,   -1.0,  1.0,  1.0,    1.0, -1.0,  1.0,
];

#[derive(Default)]
struct Sandbox {
    keys: Option<KeyActionMap>,
    cube: Option<(ShaderHandle, DrawableHandle)>,
    projection: Mat4,
}

impl Application for Sandbox {
    fn init(&mut self, context: &mut AppContext) -> Result<()> {
        engine_info!("sandbox", "Sandbox init");

        let shader = ShaderDesc::new("cube", CUBE_VERTEX_SOURCE, CUBE_FRAGMENT_SOURCE)
            .create(&context.render)?;
        let cube = DrawableDesc::new(
            "cube",
            CUBE_VERTICES.to_vec(),
            (0..36).collect(),
            BufferLayout::new().with(DataType::Vec3, "a_Position"),
        )
        .create(&context.render)?;
        self.cube = Some((shader, cube));

        let mut keys = KeyActionMap::new(context.input.clone());
        let close = context.close.clone();
        keys.bind(Key::LeftControl.with(Key::Q), move || close.request());
        self.keys = Some(keys);

        self.projection = Mat4::perspective_rh_gl(
            45f32.to_radians(),
            context.config.window.aspect_ratio(),
            0.1,
            100.0,
        );
        Ok(())
    }

    fn update(&mut self, context: &mut AppContext) -> Result<()> {
        if let Some(keys) = &self.keys {
            keys.poll()?;
        }
        let Some((shader, cube)) = self.cube else {
            return Ok(());
        };

        let view = Mat4::look_at_rh(Vec3::new(4.0, 3.0, 3.0), Vec3::ZERO, Vec3::Y);
        let model = Mat4::IDENTITY;
        let mvp = self.projection * view * model;

        context.render.render_flow(|flow| {
            flow.bind_and_parameterize(shader, |params| {
                params.set_mat4("u_MVP", mvp);
                params.set_vec4("u_Color", Vec4::ONE);
            })?;
            flow.submit(cube)
        })
    }

    fn shutdown(&mut self, context: &mut AppContext) {
        if let Some((shader, cube)) = self.cube.take() {
            let released = context.render
                .destroy_drawable(cube)
                .and_then(|()| context.render.destroy_shader(shader));
            if let Err(error) = released {
                engine_warn!("sandbox", "Failed to release cube resources: {}", error);
            }
        }
        engine_info!("sandbox", "Sandbox shutdown");
    }
}

fn log_level_from_env() -> LogSeverity {
    match std::env::var("ARTIFACT_LOG") {
        Ok(value) => value.parse().unwrap_or_else(|error| {
            engine_warn!("sandbox", "Ignoring ARTIFACT_LOG: {}", error);
            LogSeverity::Info
        }),
        Err(_) => LogSeverity::Info,
    }
}

fn main() -> ExitCode {
    let config = AppConfig::default()
        .with_app_name("Sandbox")
        .with_render_api(RenderApi::Headless)
        .with_window(WindowConfig::new(854, 480, "Sandbox"))
        .with_log_level(log_level_from_env())
        .with_max_ticks(30 * TICKS_PER_SECOND);

    // Headless stand-in for the user pressing Ctrl+Q after 5 seconds
    let mut registry = BackendRegistry::new();
    artifact_engine_renderer_headless::register_with(
        &mut registry,
        HeadlessOptions::default().with_key_press(
            Key::LeftControl.with(Key::Q),
            5 * TICKS_PER_SECOND,
            1,
        ),
    );

    let result = Runner::new(config, &registry)
        .and_then(|mut runner| runner.run(&mut Sandbox::default()));

    match result {
        Ok(summary) => {
            engine_info!(
                "sandbox",
                "Exited after {} tick(s), {} frame(s) skipped", summary.ticks, summary.frames_skipped
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            engine_error!("sandbox", "Sandbox failed: {}", error);
            ExitCode::FAILURE
        }
    }
}
