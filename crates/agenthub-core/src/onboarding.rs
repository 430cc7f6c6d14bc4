use std::collections::HashMap;

use serde::Serialize;

/// Key of the "has the user finished the tour" flag.
pub const TUTORIAL_COMPLETED_KEY: &str = "agenthub-tutorial-completed";

/// Opaque key-value storage for client flags.
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Flag store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    values: HashMap<String, String>,
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Whether the tour should be offered.
pub fn should_show(store: &dyn FlagStore) -> bool {
    store.get(TUTORIAL_COMPLETED_KEY).is_none()
}

fn mark_completed(store: &mut dyn FlagStore) {
    store.set(TUTORIAL_COMPLETED_KEY, "true");
}

/// One page of the onboarding tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TourStep {
    pub title: &'static str,
    pub highlight: &'static str,
}

pub const TOUR_STEPS: [TourStep; 6] = [
    TourStep {
        title: "Welcome to AgentHub",
        highlight: "Enterprise-grade AI agent platform",
    },
    TourStep {
        title: "Agent Dashboard",
        highlight: "Monitor every agent from a single view",
    },
    TourStep {
        title: "Host an Agent",
        highlight: "Step-by-step deployment wizard",
    },
    TourStep {
        title: "Playground Testing",
        highlight: "Try prompts before they reach production",
    },
    TourStep {
        title: "Cost Management",
        highlight: "Track spend against budget",
    },
    TourStep {
        title: "Incident Management",
        highlight: "Diagnose failures and roll back safely",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourAdvance {
    Moved(usize),
    /// `next()` on the last page.
    Finished,
}

/// Page cursor for the onboarding tour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnboardingTour {
    current: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TourView {
    pub show: bool,
    pub current_index: usize,
    pub total_steps: usize,
    pub progress_percent: f64,
    pub step: TourStep,
}

impl OnboardingTour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn step(&self) -> TourStep {
        TOUR_STEPS[self.current]
    }

    pub fn next(&mut self) -> TourAdvance {
        if self.current + 1 < TOUR_STEPS.len() {
            self.current += 1;
            TourAdvance::Moved(self.current)
        } else {
            TourAdvance::Finished
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to a page, clamped into range.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.current = index.min(TOUR_STEPS.len() - 1);
        self.current
    }

    pub fn progress_percent(&self) -> f64 {
        (self.current + 1) as f64 / TOUR_STEPS.len() as f64 * 100.0
    }

    /// Finish the tour and persist the flag.
    pub fn finish(&mut self, store: &mut dyn FlagStore) {
        tracing::info!(page = self.current, "onboarding tour finished");
        mark_completed(store);
        self.current = 0;
    }

    /// Dismiss the tour early; persisted the same way as finishing.
    pub fn skip(&mut self, store: &mut dyn FlagStore) {
        tracing::info!(page = self.current, "onboarding tour skipped");
        mark_completed(store);
        self.current = 0;
    }

    pub fn snapshot(&self, store: &dyn FlagStore) -> TourView {
        TourView {
            show: should_show(store),
            current_index: self.current,
            total_steps: TOUR_STEPS.len(),
            progress_percent: self.progress_percent(),
            step: self.step(),
        }
    }
}
