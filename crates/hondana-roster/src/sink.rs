//! Presentation sink seam
//!
//! The roster core does not render anything itself. It calls into a
//! [`PresentationSink`] — the collaborator that owns DOM nodes, SVG layers,
//! animations, whatever the surface is — through this trait.

use hondana_core::{SinkError, VisitorId, VisitorProfile};

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// The rendering surface the roster mirrors into
///
/// Handles are opaque to the roster: it stores what `create` returns and
/// passes it back on `update`, `begin_exit` and `destroy`. `destroy` takes
/// the handle by value, so a handle can be released at most once.
///
/// Implementations must be safe against being driven for a representation
/// that already disappeared underneath them (a detached node, a reused
/// slot): such calls should no-op, not panic.
pub trait PresentationSink {
    /// Opaque reference to one rendered representation
    type Handle;

    /// Build a new visual representation, playing any entrance effect
    fn create(&mut self, key: &VisitorId, profile: &VisitorProfile) -> SinkResult<Self::Handle>;

    /// Refresh an existing representation's content in place
    ///
    /// Must not recreate the representation; position and animation state
    /// are preserved.
    fn update(&mut self, handle: &mut Self::Handle, profile: &VisitorProfile) -> SinkResult<()>;

    /// Start the exit effect for an explicitly removed entry
    ///
    /// Purely cosmetic; the entry is already gone from the roster by the
    /// time this runs. Default is a no-op for surfaces without animation.
    fn begin_exit(&mut self, _handle: &mut Self::Handle) -> SinkResult<()> {
        Ok(())
    }

    /// Tear the representation down for good
    fn destroy(&mut self, handle: Self::Handle) -> SinkResult<()>;
}
