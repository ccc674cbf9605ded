//! Thread-local context tracking for crash reports.
//!
//! Each command records which stage of the analysis it is in and which
//! input file it is reading. Guards restore the previous context on drop.

use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<AnalysisContext> = const { RefCell::new(AnalysisContext::new()) };
}

/// Context snapshot for the current operation.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub phase: Option<AnalysisPhase>,
    /// Export file currently being read
    pub current_input: Option<PathBuf>,
}

impl AnalysisContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_input: None,
        }
    }
}

/// Stages of a single analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    /// Reading config and export files
    Loading,
    /// Header resolution and row normalization
    Normalizing,
    /// Conflict grouping and risk classification
    Grouping,
    /// Comparison against the production baseline
    RegressionCheck,
    /// Per-developer story status
    DeveloperViews,
    OutputGeneration,
}

impl std::fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Normalizing => write!(f, "normalizing"),
            Self::Grouping => write!(f, "grouping"),
            Self::RegressionCheck => write!(f, "regression_check"),
            Self::DeveloperViews => write!(f, "developer_views"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// RAII guard that restores the previous context on drop.
pub struct ContextGuard {
    previous: AnalysisContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current analysis phase until the guard drops.
#[must_use]
pub fn set_phase(phase: AnalysisPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

/// Record the input file being read until the guard drops.
#[must_use]
pub fn set_current_input(path: impl Into<PathBuf>) -> ContextGuard {
    let path = path.into();
    update(move |ctx| ctx.current_input = Some(path))
}

/// Snapshot used by the panic hook.
#[must_use]
pub fn get_current_context() -> AnalysisContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn update(apply: impl FnOnce(&mut AnalysisContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}
