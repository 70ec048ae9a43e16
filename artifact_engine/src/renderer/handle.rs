/// Backend-owned resource handles
///
/// Handles are slot-map keys minted by the backend that owns the resource.
/// The pipeline only copies them around; validity is checked against the
/// backend at recording time.

use slotmap::new_key_type;

new_key_type! {
    /// Reference to a compiled and linked shader program
    pub struct ShaderHandle;

    /// Reference to uploaded geometry (vertex + index state)
    pub struct DrawableHandle;
}
