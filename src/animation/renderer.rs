//! Renderers consuming planned timelines

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{Timeline, Transition};

/// A drawing surface that plays timelines
///
/// Rendering is fire-and-forget: a new timeline may interrupt one that is
/// still playing, and the store never waits on the renderer.
pub trait Renderer: Send {
    fn render(&mut self, timeline: &Timeline);
}

/// Writes each transition to the log at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRenderer;

impl Renderer for TracingRenderer {
    fn render(&mut self, timeline: &Timeline) {
        for transition in timeline.iter() {
            match transition {
                Transition::Pour { color, .. } => debug!(%color, "pour"),
                Transition::StrawWiggle { repeats, .. } => debug!(repeats, "straw wiggle"),
                Transition::Enter {
                    element,
                    delay_secs,
                    ..
                } => debug!(%element, delay_secs, "enter"),
                Transition::Fall {
                    element,
                    from,
                    to,
                    ..
                } => debug!(%element, from, to, "fall"),
                Transition::FadeOut { element, .. } => debug!(%element, "fade out"),
            }
        }
    }
}

/// Keeps every timeline it is given
///
/// Clones share the same log, so a test can hand one clone to a builder and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    log: Arc<Mutex<Vec<Timeline>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All timelines rendered so far, oldest first
    pub fn timelines(&self) -> Vec<Timeline> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The most recent timeline
    pub fn last(&self) -> Option<Timeline> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, timeline: &Timeline) {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(timeline.clone());
    }
}
