//! Fire-and-forget narration of child dialogue.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::infrastructure::ports::{VoiceLine, VoicePort};

/// Speaks child lines in the background, one at a time.
///
/// Failures are logged and dropped; callers never wait on playback.
#[derive(Clone)]
pub struct VoiceNarrator {
    voice: Arc<dyn VoicePort>,
    playback: Arc<Mutex<()>>,
}

impl VoiceNarrator {
    pub fn new(voice: Arc<dyn VoicePort>) -> Self {
        Self {
            voice,
            playback: Arc::new(Mutex::new(())),
        }
    }

    /// Queue a line for playback. Blank lines are ignored.
    ///
    /// Must be called from within a tokio runtime.
    pub fn narrate(&self, line: VoiceLine) -> Option<JoinHandle<()>> {
        if line.text.trim().is_empty() {
            return None;
        }

        let voice = self.voice.clone();
        let playback = self.playback.clone();
        Some(tokio::spawn(async move {
            let _playing = playback.lock().await;
            let chars = line.text.chars().count();
            if let Err(e) = voice.speak(line).await {
                tracing::warn!(error = %e, chars, "Voice playback failed");
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockVoicePort, VoiceError};
    use async_trait::async_trait;
    use growtogether_domain::{Age, ChildGender};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn line(text: &str) -> VoiceLine {
        VoiceLine {
            text: text.to_string(),
            age: Age::new(4),
            gender: ChildGender::Boy,
            emotion: None,
        }
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let mut voice = MockVoicePort::new();
        voice
            .expect_speak()
            .times(1)
            .returning(|_| Err(VoiceError::SynthesisFailed("decoder".to_string())));
        let narrator = VoiceNarrator::new(Arc::new(voice));

        let handle = narrator.narrate(line("妈妈!")).unwrap();
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn blank_lines_are_not_spoken() {
        let mut voice = MockVoicePort::new();
        voice.expect_speak().never();
        let narrator = VoiceNarrator::new(Arc::new(voice));
        assert!(narrator.narrate(line("   ")).is_none());
    }

    /// Tracks how many utterances are playing at once.
    struct SlowVoice {
        playing: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl VoicePort for SlowVoice {
        async fn speak(&self, _line: VoiceLine) -> Result<(), VoiceError> {
            let now = self.playing.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.playing.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn utterances_never_overlap() {
        let voice = Arc::new(SlowVoice {
            playing: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let narrator = VoiceNarrator::new(voice.clone());

        let handles: Vec<_> = ["一", "二", "三"]
            .into_iter()
            .filter_map(|text| narrator.narrate(line(text)))
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(voice.peak.load(Ordering::SeqCst), 1);
    }
}
