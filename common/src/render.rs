//! Render state tracking for coalesced redraws.
//!
//! Event handlers never draw. They only mark what changed, and the host
//! redraws at most once per frame when something is dirty:
//!
//! | Change | Marks |
//! |--------|-------|
//! | Tick (new angles) | face |
//! | Bitmap variant, hidden flag, layer frame | layers |
//! | First frame, page switch back to the face | everything |
//!
//! The face and the layers share one framebuffer, so any dirty flag causes a
//! full recomposition; the split only records why a redraw happened.

/// Tracks pending redraw requests between frames.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RenderState {
    /// Hand angles changed since the last frame.
    face_dirty: bool,

    /// Icon layer bitmap, visibility or frame changed since the last frame.
    layers_dirty: bool,

    /// Whether this is the first frame (need full redraw).
    first_frame: bool,

    /// Whether the display was cleared externally (e.g., page switch).
    display_cleared: bool,
}

impl RenderState {
    /// Create a new render state for first frame.
    pub const fn new() -> Self {
        Self {
            face_dirty: false,
            layers_dirty: false,
            first_frame: true,
            display_cleared: false,
        }
    }

    #[inline]
    pub const fn mark_face_dirty(&mut self) { self.face_dirty = true; }

    #[inline]
    pub const fn mark_layers_dirty(&mut self) { self.layers_dirty = true; }

    /// Mark that the display was cleared externally.
    ///
    /// Hosts call this when leaving another page so the face is redrawn even
    /// if nothing changed meanwhile.
    #[inline]
    pub const fn mark_display_cleared(&mut self) { self.display_cleared = true; }

    #[inline]
    pub const fn is_face_dirty(&self) -> bool { self.face_dirty }

    #[inline]
    pub const fn are_layers_dirty(&self) -> bool { self.layers_dirty }

    #[inline]
    pub const fn is_first_frame(&self) -> bool { self.first_frame }

    /// Whether the next frame has to be drawn at all.
    #[inline]
    pub const fn needs_redraw(&self) -> bool {
        self.first_frame || self.display_cleared || self.face_dirty || self.layers_dirty
    }

    /// Call at end of frame to reset per-frame state.
    pub const fn end_frame(&mut self) {
        self.first_frame = false;
        self.display_cleared = false;
        self.face_dirty = false;
        self.layers_dirty = false;
    }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
