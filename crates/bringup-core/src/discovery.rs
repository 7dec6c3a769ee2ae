//! Device discovery seam.

/// Source of candidate board device nodes.
///
/// Discovery is inherently racy with hot-plug events, so callers
/// re-enumerate before each session instead of caching results.
pub trait DeviceSource {
    /// List device paths matching `pattern`, in sorted order.
    ///
    /// Never errors: an empty list means no board is attached (or the
    /// device directory does not exist at all).
    fn list_devices(&self, pattern: &str) -> Vec<String>;
}
