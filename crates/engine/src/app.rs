//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, ContentProvider, VoicePort};
use crate::infrastructure::speech::VoiceClipStore;
use crate::use_cases::turn::TurnController;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub turns: Arc<TurnController>,
    /// Latest synthesised child line, fetched by the client for playback
    pub voice_clips: Arc<VoiceClipStore>,
}

impl App {
    pub fn new(
        content: Arc<dyn ContentProvider>,
        voice: Arc<dyn VoicePort>,
        clock: Arc<dyn ClockPort>,
        voice_clips: Arc<VoiceClipStore>,
    ) -> Self {
        Self {
            turns: Arc::new(TurnController::new(content, voice, clock)),
            voice_clips,
        }
    }
}
