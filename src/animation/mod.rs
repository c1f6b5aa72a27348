//! Animation Planning
//!
//! Turns store events into timelines of visual transitions. Planning is
//! pure: it never looks at a drawing surface, and the store is already in
//! its final state by the time a timeline exists. A [`Renderer`] decides
//! what to do with the result.

mod renderer;

pub use renderer::{RecordingRenderer, Renderer, TracingRenderer};

use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::cup::{Color, CupEvent, DrainOutcome, FillOutcome, ResetOutcome};

/// Id of the drawing element for slot `index`
///
/// The cup drawing numbers its bands from the floor up, `Fill-1` being the
/// lowest, so slot `capacity - 1` maps to `Fill-1`.
pub fn layer_element_id(index: usize, capacity: usize) -> String {
    format!("Fill-{}", capacity.saturating_sub(index))
}

/// A single visual transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    /// Liquid stream above the cup, faded in then out in the pour color
    Pour {
        color: Color,
        fade_in_secs: f64,
        fade_out_secs: f64,
    },
    /// Straw rocking back and forth while liquid pours
    StrawWiggle {
        rotation_deg: f64,
        duration_secs: f64,
        repeats: u32,
    },
    /// A new band growing in from the bottom of its slot
    Enter {
        index: usize,
        element: String,
        delay_secs: f64,
        duration_secs: f64,
    },
    /// A band dropping from `from` to `to` after a drain
    Fall {
        from: usize,
        to: usize,
        element: String,
        /// Starting offset above the final position
        offset_px: f64,
        duration_secs: f64,
    },
    /// A band fading away on reset
    FadeOut {
        index: usize,
        element: String,
        duration_secs: f64,
    },
}

impl Transition {
    /// Time from timeline start until this transition has finished
    pub fn end_secs(&self) -> f64 {
        match self {
            Transition::Pour {
                fade_in_secs,
                fade_out_secs,
                ..
            } => fade_in_secs + fade_out_secs,
            Transition::StrawWiggle {
                duration_secs,
                repeats,
                ..
            } => {
                // yoyo: the initial swing plus one per repeat
                duration_secs * f64::from(repeats + 1)
            }
            Transition::Enter {
                delay_secs,
                duration_secs,
                ..
            } => delay_secs + duration_secs,
            Transition::Fall { duration_secs, .. } | Transition::FadeOut { duration_secs, .. } => {
                *duration_secs
            }
        }
    }
}

/// Ordered transitions produced by one operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub transitions: Vec<Transition>,
}

impl Timeline {
    /// Check if there is nothing to animate
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Number of transitions
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Time until the last transition has finished
    pub fn total_duration_secs(&self) -> f64 {
        self.transitions
            .iter()
            .map(Transition::end_secs)
            .fold(0.0, f64::max)
    }

    /// Iterate over transitions in order
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }
}

/// Plan the pour for a fill
///
/// The stream and straw always play, even when the cup was already full.
/// New bands appear one after another starting with the lowest one.
pub fn plan_fill(outcome: &FillOutcome, capacity: usize, config: &AnimationConfig) -> Timeline {
    let mut transitions = vec![
        Transition::Pour {
            color: outcome.color,
            fade_in_secs: config.pour_fade_in_secs,
            fade_out_secs: config.pour_fade_out_secs,
        },
        Transition::StrawWiggle {
            rotation_deg: config.straw_rotation_deg,
            duration_secs: config.straw_wiggle_secs,
            repeats: config.straw_repeats,
        },
    ];

    let mut indices = outcome.filled.clone();
    indices.sort_unstable_by(|a, b| b.cmp(a));

    transitions.extend(indices.into_iter().enumerate().map(|(position, index)| {
        Transition::Enter {
            index,
            element: layer_element_id(index, capacity),
            delay_secs: position as f64 * config.enter_stagger_secs,
            duration_secs: config.enter_duration_secs,
        }
    }));

    Timeline { transitions }
}

/// Plan the falling bands after a drain
pub fn plan_drain(outcome: &DrainOutcome, capacity: usize, config: &AnimationConfig) -> Timeline {
    let transitions = outcome
        .moved
        .iter()
        .map(|slot_move| Transition::Fall {
            from: slot_move.from,
            to: slot_move.to,
            element: layer_element_id(slot_move.to, capacity),
            offset_px: slot_move.distance() as f64 * config.slot_height_px,
            duration_secs: config.fall_duration_secs,
        })
        .collect();

    Timeline { transitions }
}

/// Plan the fade-out after a reset
pub fn plan_reset(outcome: &ResetOutcome, capacity: usize, config: &AnimationConfig) -> Timeline {
    let transitions = outcome
        .cleared
        .iter()
        .map(|&index| Transition::FadeOut {
            index,
            element: layer_element_id(index, capacity),
            duration_secs: config.fade_out_secs,
        })
        .collect();

    Timeline { transitions }
}

/// Plan any store event
pub fn plan(event: &CupEvent, capacity: usize, config: &AnimationConfig) -> Timeline {
    match event {
        CupEvent::Filled(outcome) => plan_fill(outcome, capacity, config),
        CupEvent::Drained(outcome) => plan_drain(outcome, capacity, config),
        CupEvent::Reset(outcome) => plan_reset(outcome, capacity, config),
    }
}
