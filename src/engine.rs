//! Engine session: the process-wide scaler context and reusable shaping buffer.
//!
//! `Engine::new()` stands up both engines once; every `FontManager` holds a
//! clone of the same `Engine`. Shaping and glyph rendering mutate the session,
//! so it lives behind a mutex: concurrent `get_texture` calls on managers that
//! share a session are serialized rather than interleaved.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use rustybuzz::UnicodeBuffer;
use swash::scale::ScaleContext;

use crate::error::{TextError, TextResult};

/// Mutable engine state shared by every font handle.
///
/// Field order is drop order: the shaping buffer goes before the scaler.
pub struct Session {
    /// Shaping buffer, taken for the duration of a shape and handed back cleared.
    buffer: Option<UnicodeBuffer>,
    /// Rasterizer context, reused across glyphs and faces.
    scale_context: ScaleContext,
    /// Number of shaping passes run through this session.
    shape_passes: u64,
}

impl Session {
    fn new() -> Self {
        Self {
            buffer: Some(UnicodeBuffer::new()),
            scale_context: ScaleContext::new(),
            shape_passes: 0,
        }
    }

    /// Borrow the shaping buffer. Pair with `restore_buffer`.
    pub fn take_buffer(&mut self) -> UnicodeBuffer {
        self.buffer.take().unwrap_or_else(UnicodeBuffer::new)
    }

    /// Hand a cleared buffer back for the next shape.
    pub fn restore_buffer(&mut self, buffer: UnicodeBuffer) {
        self.buffer = Some(buffer);
    }

    /// Rasterizer context for building scalers.
    pub fn scale_context(&mut self) -> &mut ScaleContext {
        &mut self.scale_context
    }

    /// Number of shaping passes run so far.
    pub fn shape_passes(&self) -> u64 {
        self.shape_passes
    }

    pub(crate) fn record_shape_pass(&mut self) {
        self.shape_passes += 1;
    }
}

/// Shared owner of the engine session.
#[derive(Clone)]
pub struct Engine {
    session: Arc<Mutex<Session>>,
}

impl Engine {
    /// Initialize the rasterizer context and shaping buffer.
    pub fn new() -> Self {
        log::info!("engine: session initialized");
        Self {
            session: Arc::new(Mutex::new(Session::new())),
        }
    }

    /// Lock the session for a shape-and-rasterize pass.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock()
    }

    /// Number of live handles to this session (this one included).
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.session)
    }

    /// Tear down the session.
    ///
    /// Fails if other handles (usually font managers) still hold it; the
    /// session is then released when the last of them drops.
    pub fn terminate(self) -> TextResult<()> {
        match Arc::try_unwrap(self.session) {
            Ok(session) => {
                drop(session.into_inner());
                log::info!("engine: session terminated");
                Ok(())
            }
            Err(shared) => {
                let handles = Arc::strong_count(&shared) - 1;
                log::warn!("engine: terminate with {handles} live handle(s)");
                Err(TextError::EngineInUse { handles })
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
