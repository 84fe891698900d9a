mod branch_distance;
mod trace;

pub use branch_distance::{
    branch_distance, normalize, RelationalOperator, BRANCH_DISTANCE_TIE_BREAK,
};
pub use trace::{paths_match, ExecutionTrace, TraceKind, TraceLocation, TraceRecord};
