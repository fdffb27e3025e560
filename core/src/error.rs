//! Error types for mesh generation, merging and export

/// Result type for meshforge operations
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Errors raised by generators, the merge engine and the export codec
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// Out-of-range or structurally impossible parameters (raised before allocation)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation attempted on a mesh or document that cannot support it
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Underlying file read/write failed
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// glTF document could not be imported
    #[error("glTF import failed: {0}")]
    Gltf(#[from] gltf::Error),

    /// glTF JSON could not be serialized
    #[error("glTF JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ForgeError {
    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub(crate) fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }
}

/// Fail with `InvalidParameter` unless `value > 0.0`
pub(crate) fn ensure_positive(name: &str, value: f32) -> ForgeResult<()> {
    // NaN fails this check too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ForgeError::invalid_parameter(format!(
            "{name} must be > 0.0, got {value}"
        )))
    }
}

/// Fail with `InvalidParameter` unless `value >= min`
pub(crate) fn ensure_at_least(name: &str, value: u32, min: u32) -> ForgeResult<()> {
    if value >= min {
        Ok(())
    } else {
        Err(ForgeError::invalid_parameter(format!(
            "{name} must be at least {min}, got {value}"
        )))
    }
}

/// Fail with `InvalidParameter` when `vertex_count` vertices cannot be
/// addressed by `u32` triangle indices
pub(crate) fn ensure_indexable(what: &str, vertex_count: u64) -> ForgeResult<u32> {
    u32::try_from(vertex_count).map_err(|_| {
        ForgeError::invalid_parameter(format!(
            "{what} needs {vertex_count} vertices, more than u32 indices can address"
        ))
    })
}
