use std::ffi::OsStr;

use crate::buffer::OutputBuffer;
use crate::error::SortError;

/// Shell expression that yields epoch milliseconds via `ms`, or `0` when the
/// helper is not on `PATH`.
pub const TIMER_EXPR: &str = "$(command 2>&1 >/dev/null -v ms && ms || printf '0')";
pub const ELAPSED_VAR: &str = "SCRIPTSORT_ELAPSED";

const DEBUG_START: &str = "    printf \"Sourcing \\\"${scriptpath}\\\"...\"\n";
const DEBUG_START_QUIET: &str = "\n";
const DEBUG_END: &str = "    printf \"done\\n\"\n";

const INIT_TEMPLATE: &str = r##"pjoin() {
  local -a parts

  if [[ "${#}" -lt 1 ]]; then
    printf "\x1b[1;35mpjoin\x1b[22;39m <path> <part> ...\n\n"
    printf "Example:\n"
    printf "  pjoin \$HOME .zshrc\n"
    printf "  \x1b[3m/Users/${USER}/.zshrc\x1b[33m\n"
    return 0
  fi

  for part in "${@}"; do
    parts+=( "${part}" "/" )
  done

  printf "$(realpath $(printf "${parts// /}"))"
}

includeScripts() {
  local -a scripts
  local -a timings
  local directory="${1:-${HOME}/.zsh.scripts}"
  local scriptpath=""
  local timer
  local now
  local elapsed

  scripts=( @@NAMES@@ )
  for script in "${scripts[@]}"; do
    timer=@@TIMER@@
    scriptpath=$(pjoin "${directory}" "${script}")
@@DEBUG_START@@    source "${scriptpath}"
    if [ $timer ]; then
      now=@@TIMER@@
      elapsed=$(($now-$timer))

      timings+=( "${elapsed}ms:${scriptpath}" )
    fi
@@DEBUG_END@@  done
}

includeScripts "@@DIRECTORY@@"
unset -f includeScripts
"##;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Names,
    Timer,
    DebugStart,
    DebugEnd,
    Directory,
}

const SLOTS: [(&str, Slot); 5] = [
    ("@@NAMES@@", Slot::Names),
    ("@@TIMER@@", Slot::Timer),
    ("@@DEBUG_START@@", Slot::DebugStart),
    ("@@DEBUG_END@@", Slot::DebugEnd),
    ("@@DIRECTORY@@", Slot::Directory),
];

/// Values substituted into the init template.
#[derive(Debug, Clone, Copy)]
pub struct InitTemplate<'a> {
    pub names: &'a [u8],
    pub directory: &'a OsStr,
    pub debug: bool,
}

impl InitTemplate<'_> {
    pub fn render(&self) -> Result<OutputBuffer, SortError> {
        let directory = escape_double_quoted(self.directory.as_encoded_bytes());
        let mut out = OutputBuffer::with_capacity(
            INIT_TEMPLATE.len() + self.names.len() + directory.len(),
        )?;

        let mut rest = INIT_TEMPLATE;
        while let Some((offset, marker, slot)) = next_slot(rest) {
            out.push_str(&rest[..offset])?;
            match slot {
                Slot::Names => out.push(self.names)?,
                Slot::Timer => out.push_str(TIMER_EXPR)?,
                Slot::DebugStart => out.push_str(if self.debug {
                    DEBUG_START
                } else {
                    DEBUG_START_QUIET
                })?,
                Slot::DebugEnd => {
                    if self.debug {
                        out.push_str(DEBUG_END)?;
                    }
                }
                Slot::Directory => out.push(&directory)?,
            }
            rest = &rest[offset + marker.len()..];
        }
        out.push_str(rest)?;
        Ok(out)
    }
}

fn next_slot(text: &str) -> Option<(usize, &'static str, Slot)> {
    SLOTS
        .iter()
        .filter_map(|(marker, slot)| text.find(marker).map(|offset| (offset, *marker, *slot)))
        .min_by_key(|(offset, _, _)| *offset)
}

/// Line emitted before a debug bundle.
pub fn bundle_debug_prologue() -> String {
    format!("local start_time={TIMER_EXPR}\n")
}

/// Lines emitted after a debug bundle.
pub fn bundle_debug_epilogue() -> String {
    format!(
        "local end_time={TIMER_EXPR}\nexport {ELAPSED_VAR}=$(($end_time - $start_time))\n"
    )
}

fn escape_double_quoted(raw: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(raw.len());
    for &byte in raw {
        if matches!(byte, b'\\' | b'"' | b'$' | b'`') {
            escaped.push(b'\\');
        }
        escaped.push(byte);
    }
    escaped
}
