/// Named, typed shader parameters for one bind command

use glam::{Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;

// ===== PARAMETER VALUES =====

/// A typed uniform value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// Kind tag of a `ParameterValue`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Float(_) => ParameterKind::Float,
            ParameterValue::Vec2(_) => ParameterKind::Vec2,
            ParameterValue::Vec3(_) => ParameterKind::Vec3,
            ParameterValue::Vec4(_) => ParameterKind::Vec4,
            ParameterValue::Mat4(_) => ParameterKind::Mat4,
        }
    }

    /// Raw native-endian f32 bytes (matrices column-major)
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ParameterValue::Float(v) => bytemuck::bytes_of(v),
            ParameterValue::Vec2(v) => bytemuck::bytes_of(v),
            ParameterValue::Vec3(v) => bytemuck::bytes_of(v),
            ParameterValue::Vec4(v) => bytemuck::bytes_of(v),
            ParameterValue::Mat4(v) => bytemuck::bytes_of(v),
        }
    }
}

impl From<f32> for ParameterValue {
    fn from(v: f32) -> Self {
        ParameterValue::Float(v)
    }
}

impl From<Vec2> for ParameterValue {
    fn from(v: Vec2) -> Self {
        ParameterValue::Vec2(v)
    }
}

impl From<Vec3> for ParameterValue {
    fn from(v: Vec3) -> Self {
        ParameterValue::Vec3(v)
    }
}

impl From<Vec4> for ParameterValue {
    fn from(v: Vec4) -> Self {
        ParameterValue::Vec4(v)
    }
}

impl From<Mat4> for ParameterValue {
    fn from(v: Mat4) -> Self {
        ParameterValue::Mat4(v)
    }
}

// ===== PARAMETER SET =====

/// Uniform name to value mapping
///
/// Names are unique. Re-setting a name overwrites its value in place, so the
/// entry keeps the position of its first insertion and only the last value is
/// ever pushed to the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    params: Vec<(String, ParameterValue)>,
    param_names: FxHashMap<String, usize>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the binding for `name`
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.param_names.get(&name) {
            Some(&index) => self.params[index].1 = value,
            None => {
                self.param_names.insert(name.clone(), self.params.len());
                self.params.push((name, value));
            }
        }
        self
    }

    pub fn set_float(&mut self, name: impl Into<String>, value: f32) -> &mut Self {
        self.set(name, value)
    }

    pub fn set_vec2(&mut self, name: impl Into<String>, value: Vec2) -> &mut Self {
        self.set(name, value)
    }

    pub fn set_vec3(&mut self, name: impl Into<String>, value: Vec3) -> &mut Self {
        self.set(name, value)
    }

    pub fn set_vec4(&mut self, name: impl Into<String>, value: Vec4) -> &mut Self {
        self.set(name, value)
    }

    pub fn set_mat4(&mut self, name: impl Into<String>, value: Mat4) -> &mut Self {
        self.set(name, value)
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.param_names.get(name).map(|&index| &self.params[index].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.param_names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// (name, value) pairs in first-insertion order
    ///
    /// Borrowing iterator: call again to restart.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ParameterValue)> + '_ {
        self.params.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
