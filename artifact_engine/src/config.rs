/// Application configuration

use std::fmt;
use crate::log::LogSeverity;

/// Rendering API tag used to pick a backend from the `BackendRegistry`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderApi {
    OpenGl,
    Vulkan,
    /// No GPU; calls are validated and logged only
    Headless,
}

impl fmt::Display for RenderApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderApi::OpenGl => write!(f, "OpenGL"),
            RenderApi::Vulkan => write!(f, "Vulkan"),
            RenderApi::Headless => write!(f, "Headless"),
        }
    }
}

/// Window parameters handed to the backend factory
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl WindowConfig {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self { width, height, title: title.into() }
    }

    /// Width over height, for projection matrices
    ///
    /// Returns 1.0 for a zero-height window.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(854, 480, "Sandbox")
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application name (used in logs)
    pub app_name: String,
    /// Backend to resolve from the registry
    pub render_api: RenderApi,
    pub window: WindowConfig,
    /// Minimum severity forwarded to the logger
    pub log_level: LogSeverity,
    /// Stop the run loop after this many ticks (`None` = until closed)
    pub max_ticks: Option<u64>,
    /// End the run loop on the first fatal flush error instead of skipping the frame
    pub stop_on_backend_error: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "Artifact Application".to_string(),
            render_api: RenderApi::Headless,
            window: WindowConfig::default(),
            log_level: LogSeverity::Info,
            max_ticks: None,
            stop_on_backend_error: false,
        }
    }
}

impl AppConfig {
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    pub fn with_render_api(mut self, api: RenderApi) -> Self {
        self.render_api = api;
        self
    }

    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    pub fn with_log_level(mut self, level: LogSeverity) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    pub fn with_stop_on_backend_error(mut self, stop: bool) -> Self {
        self.stop_on_backend_error = stop;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
