use std::fmt::{Display, Formatter};
use std::str::FromStr;

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

use crate::error::{VmError, VmResult};
use crate::tape::CellValue;

/**
  Opcodes of the virtual machine. The textual names are the snake case forms, e.g.
  `ChangeValue` is written `change_value`.

  What the argument of an instruction means depends on its opcode:
  ```text
  ChangeValue, ChangePointer  -> signed delta
  Get, Put                    -> repeat count
  BranchIfZero, BranchNotZero -> offset relative to the branch itself
  ```
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter,
  Clone,        Copy,          Eq,         PartialEq, Debug, Hash
)]
#[strum(serialize_all = "snake_case")]
pub enum Opcode {
  ChangeValue,      // change_value( delta )
  ChangePointer,    // change_pointer( delta )
  Get,              // get( count )
  Put,              // put( count )
  BranchIfZero,     // branch_if_zero( offset )
  BranchNotZero,    // branch_not_zero( offset )
}

impl Opcode {
  pub fn name(&self) -> &'static str {
    (*self).into()
  }

  /// Decodes an opcode name, reporting an unknown name as `VmError::InvalidCommand`.
  pub fn decode(name: &str) -> VmResult<Opcode> {
    Opcode::from_str(name).map_err(|source| {
      VmError::InvalidCommand{ command: name.to_string(), source }
    })
  }
}

/// A decoded `(opcode, argument)` pair.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Instruction {
  pub opcode   : Opcode,
  pub argument : CellValue
}

impl Instruction {
  pub fn new(opcode: Opcode, argument: CellValue) -> Instruction {
    Instruction{ opcode, argument }
  }

  pub fn decode(name: &str, argument: CellValue) -> VmResult<Instruction> {
    Ok(Instruction::new(Opcode::decode(name)?, argument))
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}({})", self.opcode, self.argument)
  }
}

impl From<(Opcode, CellValue)> for Instruction {
  fn from(pair: (Opcode, CellValue)) -> Instruction {
    Instruction::new(pair.0, pair.1)
  }
}

/**
  Decodes a sequence of `(name, argument)` pairs, the form in which a front-end hands over a
  program. Stops at the first unknown name.
*/
pub fn decode_program<'a, I>(pairs: I) -> VmResult<Vec<Instruction>>
  where I: IntoIterator<Item = (&'a str, CellValue)>
{
  pairs.into_iter()
       .map(|(name, argument)| Instruction::decode(name, argument))
       .collect()
}
