//! Parses the course-material text format for LS-8 programs: one binary
//! literal per line (e.g. `10000010`), an optional `#`-prefixed comment
//! after whitespace, and blank lines ignored.
//!
//! This loader is kept out of `Machine`'s own API surface and only ever
//! reaches the core through [`crate::Machine::load_program`] -- the
//! core never reaches into a source text format itself.

use crate::VmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("line {0}: {1:?} is not an 8-bit binary literal")]
    MalformedLine(usize, String),
    #[error(transparent)]
    Vm(#[from] VmError),
}

/// Parses `source` into a byte image, ignoring blank lines and
/// `#`-comments, then loads it into `machine`.
pub fn load_into<O: crate::OutputSink>(
    machine: &mut crate::Machine<O>,
    source: &str,
) -> Result<(), LoaderError> {
    let image = parse(source)?;
    machine.load_program(&image).map_err(LoaderError::from)
}

/// Parses the text format into a raw byte image without touching a
/// machine.
pub fn parse(source: &str) -> Result<Vec<u8>, LoaderError> {
    let mut image = Vec::new();

    for (number, raw_line) in source.lines().enumerate() {
        let line_number = number + 1;
        let before_comment = raw_line.split('#').next().unwrap_or("").trim();

        if before_comment.is_empty() {
            continue;
        }

        if before_comment.len() != 8 || !before_comment.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(LoaderError::MalformedLine(
                line_number,
                before_comment.to_string(),
            ));
        }

        let byte = u8::from_str_radix(before_comment, 2)
            .map_err(|_| LoaderError::MalformedLine(line_number, before_comment.to_string()))?;
        image.push(byte);
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_binary_literals_and_comments() {
        let source = "\
            # print 8\n\
            10000010 # LDI\n\
            00000000\n\
            00001000\n\
            \n\
            00000001 # HLT\n\
        ";
        let image = parse(source).unwrap();
        assert_eq!(image, vec![0b10000010, 0, 0b00001000, 0b00000001]);
    }

    #[test]
    fn rejects_a_non_binary_line() {
        let err = parse("1234abcd").unwrap_err();
        assert!(matches!(err, LoaderError::MalformedLine(1, _)));
    }

    #[test]
    fn rejects_a_line_of_the_wrong_length() {
        let err = parse("101").unwrap_err();
        assert!(matches!(err, LoaderError::MalformedLine(1, _)));
    }

    #[test]
    fn propagates_an_oversized_program() {
        let source = "00000000\n".repeat(257);
        let err = parse(&source).unwrap();
        assert_eq!(err.len(), 257);

        let mut machine = crate::Machine::new();
        let result = load_into(&mut machine, &source);
        assert!(matches!(
            result,
            Err(LoaderError::Vm(VmError::ProgramTooLarge(257)))
        ));
    }
}
