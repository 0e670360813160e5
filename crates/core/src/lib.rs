pub mod assemble;
pub mod buffer;
pub mod classify;
pub mod error;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod scan;
pub mod sort;
pub mod template;

pub use assemble::{
    assemble, assemble_bundle, assemble_name_list, Assembly, Bundle, ContentSource,
    FsContentSource,
};
pub use buffer::{OutputBuffer, INITIAL_CAPACITY};
pub use classify::{extract_order_number, Buckets};
pub use error::{ReadStage, SortError};
pub use model::{BucketKind, Cutoff, Entry, DEFAULT_CUTOFF, ORDERED_PREFIX, SKIP_PREFIX};
pub use options::{OutputMode, SortOptions};
pub use pipeline::{plan_directory, run, run_with_source, RunOutput};
pub use scan::{is_candidate, scan_directory};
pub use sort::{compare_entries, sort_bucket, Plan};
pub use template::{
    bundle_debug_epilogue, bundle_debug_prologue, InitTemplate, ELAPSED_VAR, TIMER_EXPR,
};
