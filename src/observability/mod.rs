//! Crash reports and diagnostic logging.
//!
//! - **Tracing**: `init_tracing` installs a stderr subscriber whose level
//!   follows `-v` flags unless `RUST_LOG` is set
//! - **Panic Hook**: structured crash report naming the analysis phase
//! - **Context Tracking**: thread-local phase guards
//!
//! ```ignore
//! use conflictmap::observability::{install_panic_hook, init_tracing, set_phase, AnalysisPhase};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_tracing(0);
//!     let _phase = set_phase(AnalysisPhase::Grouping);
//! }
//! ```

pub mod context;
pub mod panic_hook;
mod tracing;

pub use self::context::{
    get_current_context, set_current_input, set_phase, AnalysisContext, AnalysisPhase,
    ContextGuard,
};
pub use self::panic_hook::install_panic_hook;
pub use self::tracing::{init_tracing, level_for_verbosity};
