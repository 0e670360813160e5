use std::path::PathBuf;

use crate::model::Cutoff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    NameList,
    Bundle,
}

#[derive(Debug, Clone)]
pub struct SortOptions {
    pub directory: PathBuf,
    pub mode: OutputMode,
    /// Wrap the name list in the sourceable template. Ignored in bundle mode.
    pub init: bool,
    pub debug: bool,
    pub cutoff: Cutoff,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            mode: OutputMode::NameList,
            init: false,
            debug: false,
            cutoff: Cutoff::default(),
        }
    }
}

impl SortOptions {
    pub fn joiner(&self) -> u8 {
        if self.init {
            b' '
        } else {
            b'\n'
        }
    }
}
