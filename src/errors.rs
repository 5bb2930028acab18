use thiserror::Error;

/// Fatal errors that can escape [`crate::Machine::step`] or
/// [`crate::Machine::run`]. Both variants are unrecoverable: the core
/// does not retry, and the machine is left halted once either surfaces.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    #[error("undefined opcode {0:#04X} at PC {1:#04X}")]
    UndefinedOpcode(u8, u8),
    #[error("division by zero")]
    DivisionByZero,
    #[error("program image of {0} bytes exceeds the 256-byte address space")]
    ProgramTooLarge(usize),
}
