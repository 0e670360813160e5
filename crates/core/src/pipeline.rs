use tracing::debug;

use crate::assemble::{assemble, ContentSource, FsContentSource};
use crate::classify::Buckets;
use crate::error::SortError;
use crate::options::SortOptions;
use crate::scan::scan_directory;
use crate::sort::Plan;

pub struct RunOutput {
    pub plan: Plan,
    pub output: Vec<u8>,
    pub skipped: Vec<SortError>,
}

pub fn plan_directory(options: &SortOptions) -> Result<Plan, SortError> {
    let entries = scan_directory(&options.directory)?;
    let buckets = Buckets::partition(entries, options.cutoff);
    debug!(
        "partitioned at cutoff {}: lower={} unordered={} upper={}",
        options.cutoff.get(),
        buckets.lower.len(),
        buckets.unordered.len(),
        buckets.upper.len()
    );
    Ok(Plan::from_buckets(buckets))
}

pub fn run(options: &SortOptions) -> Result<RunOutput, SortError> {
    run_with_source(options, &FsContentSource)
}

pub fn run_with_source(
    options: &SortOptions,
    source: &dyn ContentSource,
) -> Result<RunOutput, SortError> {
    let plan = plan_directory(options)?;
    let assembly = assemble(&plan, options, source)?;
    Ok(RunOutput {
        plan,
        output: assembly.output,
        skipped: assembly.skipped,
    })
}
