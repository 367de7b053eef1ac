//! The failures a `VirtualMachine` can report. Every variant is terminal to the call that
//! raised it; the machine itself is always left reusable.

use std::io;

use thiserror::Error;

use crate::tape::CellValue;

pub type VmResult<T> = Result<T, VmError>;

#[derive(Debug, Error)]
pub enum VmError {
  /// The cursor was moved below the start of the tape.
  #[error("memory out of bounds: moving the cursor from {cursor} by {delta} leaves the tape")]
  MemoryOutOfBounds {
    cursor : usize,
    delta  : CellValue
  },

  /// A command that is not one of the six primitives.
  #[error("invalid command `{command}`")]
  InvalidCommand {
    command : String,
    #[source]
    source  : strum::ParseError
  },

  /// `load` was called while a program is running.
  #[error("cannot load a program while another is executing")]
  ConcurrentExecution,

  /// A branch offset would move the program counter before the first instruction.
  #[error("program counter out of bounds: branching from {program_counter} by {offset}")]
  ProgramCounterOutOfBounds {
    program_counter : usize,
    offset          : CellValue
  },

  /// The bound input or output stream failed.
  #[error("i/o error: {0}")]
  Io(#[from] io::Error),

  /// Malformed assembly listing.
  #[error("assembly error on line {line}: {message}")]
  Assembly {
    line    : usize,
    message : String
  },
}
