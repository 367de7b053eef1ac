/*!
  The human readable textual form of an instruction stream is called assembly. Each line holds
  at most one instruction written `name(argument)`, where `name` is the snake case opcode name
  and `argument` a signed decimal integer. A `%` starts a comment that runs to the end of the
  line, and blank lines are ignored:

  ```text
  change_value(5)    % counter
  branch_if_zero(3)
  change_value( -1 )
  branch_not_zero(-1)
  ```

  Assembly is a view of already decoded instructions. It has nothing to do with the source
  syntax of the language the instructions were compiled from.
*/

use nom::{
  IResult,
  branch::alt,
  bytes::complete::take_while1,
  character::complete::{
    char as one_char,
    digit1,
    space0
  },
  combinator::{all_consuming, map_res, opt, recognize},
  sequence::{
    delimited,
    pair,
    preceded,
    terminated,
    tuple
  }
};

use crate::bytecode::Instruction;
use crate::error::{VmError, VmResult};
use crate::tape::CellValue;

const COMMENT_CHAR: char = '%';

fn name_p(input: &str) -> IResult<&str, &str> {
  take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn argument_p(input: &str) -> IResult<&str, CellValue> {
  map_res(
    recognize(pair(opt(alt((one_char('-'), one_char('+')))), digit1)),
    |text: &str| text.parse::<CellValue>()
  )(input)
}

fn instruction_p(input: &str) -> IResult<&str, (&str, CellValue)> {
  tuple((
    preceded(space0, name_p),
    delimited(
      delimited(space0, one_char('('), space0),
      argument_p,
      preceded(space0, one_char(')')),
    )
  ))(input)
}

fn strip_comment(line: &str) -> &str {
  match line.find(COMMENT_CHAR) {
    Some(idx) => &line[..idx],
    None      => line
  }
}

/**
  Parses an assembly listing into instructions.

  Syntax errors are reported as `VmError::Assembly` with the 1-based line number. A well formed
  line naming an unknown operation is reported as `VmError::InvalidCommand`.
*/
pub fn parse_assembly(text: &str) -> VmResult<Vec<Instruction>> {
  let mut instructions = Vec::new();

  for (idx, raw_line) in text.lines().enumerate() {
    let line = strip_comment(raw_line);
    if line.trim().is_empty() {
      continue;
    }

    match all_consuming(terminated(instruction_p, space0))(line) {

      Ok((_rest, (name, argument))) => {
        instructions.push(Instruction::decode(name, argument)?);
      }

      Err(_e) => {
        return Err(VmError::Assembly{
          line: idx + 1,
          message: format!("expected `name(argument)`, found `{}`", line.trim())
        });
      }

    }
  }

  Ok(instructions)
}

/// Writes instructions as an assembly listing, one per line.
pub fn write_assembly(instructions: &[Instruction]) -> String {
  instructions.iter()
              .map(|i| format!("{}\n", i))
              .collect()
}
