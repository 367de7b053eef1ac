/*!
  Instructions of the virtual machine and their textual assembly form.

  An instruction is an opcode paired with a single signed argument. Instructions reach the
  machine already decoded: a front-end turns the language's source text into
  `(name, argument)` pairs, and `decode_program` or `parse_assembly` turns those into
  `Instruction` values. An unknown name is rejected at that point, so the dispatch loop only
  ever sees the six valid opcodes.
*/

mod assembly;
mod instruction;

pub use assembly::{parse_assembly, write_assembly};
pub use instruction::{decode_program, Instruction, Opcode};
