//! Memory and I/O constants of the machine, and the `Config` bundle that carries them into a
//! `VirtualMachine`.

use crate::tape::CellValue;

/// Number of zeroed cells in a freshly loaded tape.
pub const INITIAL_MEMORY_SIZE: usize = 32;
/// Lower bound on the number of cells added by a single growth step.
pub const MAX_ALLOCATION: usize = 1024;
/// Value stored by `get` when the input is exhausted, unless the caller says otherwise.
pub const DEFAULT_EOF: CellValue = 0;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Config {
  pub initial_memory_size : usize,
  pub max_allocation      : usize,
  pub eof                 : CellValue,
}

impl Config {
  pub fn with_eof(eof: CellValue) -> Config {
    Config{ eof, ..Config::default() }
  }
}

impl Default for Config {
  fn default() -> Config {
    Config{
      initial_memory_size :  INITIAL_MEMORY_SIZE,
      max_allocation      :  MAX_ALLOCATION,
      eof                 :  DEFAULT_EOF,
    }
  }
}
