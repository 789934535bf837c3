//! Font metrics in pixels for one rasterized string.

/// Vertical metrics of a rasterized string, in pixels.
///
/// `ascender`/`descender` come from the face header at the requested pixel
/// size. `internal_leading` (>= 0) and `external_leading` (<= 0) widen them
/// when a rendered glyph rises above or drops below the header values.
/// The baseline sits `internal_leading + ascender` rows from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontMetrics {
    base_line: i32,
    internal_leading: i32,
    ascender: i32,
    descender: i32,
    external_leading: i32,
}

impl FontMetrics {
    pub fn new(
        base_line: i32,
        internal_leading: i32,
        ascender: i32,
        descender: i32,
        external_leading: i32,
    ) -> Self {
        debug_assert!(internal_leading >= 0, "internal leading must be >= 0");
        debug_assert!(external_leading <= 0, "external leading must be <= 0");
        Self {
            base_line,
            internal_leading,
            ascender,
            descender,
            external_leading,
        }
    }

    pub fn base_line(&self) -> i32 {
        self.base_line
    }

    pub fn internal_leading(&self) -> i32 {
        self.internal_leading
    }

    pub fn ascender(&self) -> i32 {
        self.ascender
    }

    pub fn descender(&self) -> i32 {
        self.descender
    }

    pub fn external_leading(&self) -> i32 {
        self.external_leading
    }

    /// Total height in pixels: everything from the top leading to the
    /// bottom leading.
    pub fn total(&self) -> i32 {
        self.internal_leading + self.ascender - self.descender - self.external_leading
    }

    pub(crate) fn set_internal_leading(&mut self, value: i32) {
        self.internal_leading = value;
    }

    pub(crate) fn set_external_leading(&mut self, value: i32) {
        self.external_leading = value;
    }

    pub(crate) fn set_base_line(&mut self, value: i32) {
        self.base_line = value;
    }

    /// Whether a glyph bitmap with the given top bearing and row count pokes
    /// out above the ascender or below the descender.
    pub fn exceeded_by(&self, bitmap_top: i32, rows: i32) -> bool {
        bitmap_top > self.ascender || bitmap_top - rows < self.descender
    }

    /// Metrics widened to hold a glyph bitmap with the given top bearing and
    /// row count. Leadings only ever grow.
    #[must_use]
    pub fn widened_for(&self, bitmap_top: i32, rows: i32) -> Self {
        let mut widened = *self;
        widened.set_internal_leading(self.internal_leading.max(bitmap_top - self.ascender));
        widened.set_external_leading(
            self.external_leading
                .min(bitmap_top - rows - self.descender),
        );
        widened.set_base_line(widened.internal_leading + widened.ascender);
        widened
    }
}
