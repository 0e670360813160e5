use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use crate::buffer::OutputBuffer;
use crate::error::{ReadStage, SortError};
use crate::model::Entry;
use crate::options::{OutputMode, SortOptions};
use crate::sort::Plan;
use crate::template::{bundle_debug_epilogue, bundle_debug_prologue, InitTemplate};

/// Where bundle mode gets file contents from.
pub trait ContentSource {
    fn read(&self, directory: &Path, entry: &Entry) -> Result<Vec<u8>, SortError>;
}

pub struct FsContentSource;

impl ContentSource for FsContentSource {
    fn read(&self, directory: &Path, entry: &Entry) -> Result<Vec<u8>, SortError> {
        let path = directory.join(entry.name());
        let fail = |stage, source| SortError::FileRead {
            path: path.clone(),
            stage,
            source,
        };

        let mut file = File::open(&path).map_err(|err| fail(ReadStage::Open, err))?;
        let size = file
            .metadata()
            .map_err(|err| fail(ReadStage::Stat, err))?
            .len();

        let mut contents = reserve_contents(&path, size)?;
        file.read_to_end(&mut contents)
            .map_err(|err| fail(ReadStage::Read, err))?;
        Ok(contents)
    }
}

/// A file too large to hold in memory is a read failure for that file only;
/// the output buffer is the only allocation whose failure ends the run.
fn reserve_contents(path: &Path, size: u64) -> Result<Vec<u8>, SortError> {
    let too_large = || SortError::FileRead {
        path: path.to_path_buf(),
        stage: ReadStage::Read,
        source: io::ErrorKind::OutOfMemory.into(),
    };

    let capacity = usize::try_from(size).map_err(|_| too_large())?;
    let mut contents = Vec::new();
    contents
        .try_reserve_exact(capacity)
        .map_err(|_| too_large())?;
    Ok(contents)
}

pub struct Assembly {
    pub output: Vec<u8>,
    pub skipped: Vec<SortError>,
}

pub struct Bundle {
    pub buffer: OutputBuffer,
    pub included: usize,
    pub skipped: Vec<SortError>,
}

pub fn assemble_name_list(plan: &Plan, joiner: u8) -> Result<OutputBuffer, SortError> {
    let mut buffer = OutputBuffer::with_capacity(plan.total_name_bytes() + plan.len())?;
    for entry in plan.entries() {
        buffer.push(entry.name_bytes())?;
        buffer.push_byte(joiner)?;
    }
    Ok(buffer)
}

pub fn assemble_bundle(
    plan: &Plan,
    directory: &Path,
    source: &dyn ContentSource,
) -> Result<Bundle, SortError> {
    let mut buffer = OutputBuffer::new()?;
    let (included, skipped) = append_bundle(&mut buffer, plan, directory, source)?;
    Ok(Bundle {
        buffer,
        included,
        skipped,
    })
}

/// Appends every readable file plus a newline separator to `buffer`.
/// Returns the number of files included and the per-file failures.
fn append_bundle(
    buffer: &mut OutputBuffer,
    plan: &Plan,
    directory: &Path,
    source: &dyn ContentSource,
) -> Result<(usize, Vec<SortError>), SortError> {
    let mut included = 0_usize;
    let mut skipped = Vec::new();

    for entry in plan.entries() {
        match source.read(directory, entry) {
            Ok(contents) => {
                buffer.push(&contents)?;
                buffer.push_byte(b'\n')?;
                included += 1;
            }
            Err(err) if !err.is_fatal() => {
                debug!("bundle skipped {}: {}", entry.name().to_string_lossy(), err);
                skipped.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        "bundle assembled: {} file(s), {} skipped, {} byte(s)",
        included,
        skipped.len(),
        buffer.len()
    );
    Ok((included, skipped))
}

/// Renders the final stdout payload for the selected mode.
pub fn assemble(
    plan: &Plan,
    options: &SortOptions,
    source: &dyn ContentSource,
) -> Result<Assembly, SortError> {
    match options.mode {
        OutputMode::NameList => {
            let names = assemble_name_list(plan, options.joiner())?;
            let output = if options.init {
                InitTemplate {
                    names: names.as_bytes(),
                    directory: options.directory.as_os_str(),
                    debug: options.debug,
                }
                .render()?
                .into_bytes()
            } else {
                names.into_bytes()
            };
            Ok(Assembly {
                output,
                skipped: Vec::new(),
            })
        }
        OutputMode::Bundle => {
            let mut out = OutputBuffer::new()?;
            if options.debug {
                out.push_str(&bundle_debug_prologue())?;
            }
            let (included, skipped) = append_bundle(&mut out, plan, &options.directory, source)?;
            if included > 0 {
                out.push_byte(b'\n')?;
            }
            if options.debug {
                out.push_str(&bundle_debug_epilogue())?;
            }
            Ok(Assembly {
                output: out.into_bytes(),
                skipped,
            })
        }
    }
}
