//! Runtime knobs for the MMI resource.
//!
//! This core owns exactly one tunable: the per-stream fragment cap. Adapter
//! or slot configuration is the transport layer's concern (see the Non-goals
//! in the MMI resource documentation) and does not belong here.

/// Default per-stream fragment accumulation cap, in bytes.
///
/// A pathological or hostile CAM could otherwise fragment a menu/list/
/// subtitle object indefinitely; 64 KiB comfortably covers any legitimate
/// MMI screen while bounding worst-case memory use per stream.
pub const DEFAULT_MAX_FRAGMENT_BYTES: usize = 64 * 1024;

/// Configuration for an [`crate::MmiResource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceConfig {
    max_fragment_bytes: usize,
}

impl ResourceConfig {
    /// Starts a configuration with the default fragment cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_fragment_bytes: DEFAULT_MAX_FRAGMENT_BYTES,
        }
    }

    /// Sets the per-stream fragment accumulation cap.
    #[must_use]
    pub fn with_max_fragment_bytes(mut self, max_fragment_bytes: usize) -> Self {
        self.max_fragment_bytes = max_fragment_bytes;
        self
    }

    #[must_use]
    pub fn max_fragment_bytes(&self) -> usize {
        self.max_fragment_bytes
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self::new()
    }
}
