//! Prints milliseconds since the Unix epoch. Scripts generated by
//! `scriptsort --init` or `--bundle --debug` call it when it is on `PATH`.

use std::io::{self, Write};

use chrono::Utc;

fn main() {
    // A closed stdout leaves the caller with no value; the generated scripts
    // already fall back to 0, so the write error is dropped.
    let _ = write_millis(&mut io::stdout().lock(), Utc::now().timestamp_millis());
}

fn write_millis(out: &mut impl Write, millis: i64) -> io::Result<()> {
    writeln!(out, "{millis}")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::write_millis;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn writes_decimal_millis_line() {
        let mut out = Vec::new();
        write_millis(&mut out, 1_700_000_000_123).expect("write");
        assert_eq!(out, b"1700000000123\n".to_vec());
    }

    #[test]
    fn closed_stdout_is_an_error_not_a_panic() {
        let err = write_millis(&mut ClosedPipe, 42).expect_err("broken pipe");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
