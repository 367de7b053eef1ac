/*!
  A virtual machine for a tape-based esoteric language.

  The machine executes an already decoded instruction stream of six primitives over a tape of
  integer cells that grows on demand:

  ```text
  change_value(delta)      tape[cursor] += delta
  change_pointer(delta)    cursor += delta
  get(count)               tape[cursor] = last of `count` bytes read
  put(count)               write tape[cursor] mod 256, `count` times
  branch_if_zero(offset)   pc += offset if tape[cursor] == 0
  branch_not_zero(offset)  pc += offset if tape[cursor] != 0
  ```

  Turning source text into instructions is the job of a front-end outside this crate. Programs
  can also be written directly in the assembly listing understood by `parse_assembly`.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod bytecode;
pub mod config;
pub mod error;
pub mod tape;
mod vm;

pub use bytecode::{decode_program, parse_assembly, write_assembly, Instruction, Opcode};
pub use config::Config;
pub use error::{VmError, VmResult};
pub use tape::CellValue;
pub use vm::{State, VirtualMachine};
