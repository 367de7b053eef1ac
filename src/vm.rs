//! The virtual machine: a tape of integer cells, a cursor into the tape, and a program counter
//! into a list of decoded instructions.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::io::{self, Read, Write};

use prettytable::{format as TableFormat, Table};

use crate::bytecode::{Instruction, Opcode};
use crate::config::Config;
use crate::error::{VmError, VmResult};
use crate::tape::{CellValue, Tape};

/// Largest single write made by `put`.
const PUT_BUFFER_SIZE: usize = 4096;

/**
  Executes a loaded program against a pair of byte streams bound for the machine's lifetime.

  Use is two-phase. `load` installs a program and resets memory, `execute` runs it to
  completion. `execute` always returns the machine to idle, whether or not the run failed, so
  a new program may be loaded after any outcome. A program that is loaded but not yet executed
  does not block another `load`.

  Every operation computes its own next program counter. Non-branching operations advance by
  one, branches by their offset when taken.
*/
pub struct VirtualMachine<R, W> {
  input  : R,
  output : W,
  config : Config,

  // Program //
  program         : Vec<Instruction>,
  program_counter : usize,

  // Memory //
  tape   : Tape,
  cursor : usize,

  /// Set for the duration of `execute`.
  executing : bool,
}

/// A read-only view of the machine's registers and memory.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct State<'a> {
  pub executing       : bool,
  pub program_counter : usize,
  pub cursor          : usize,
  pub tape            : &'a [CellValue],
  pub current_value   : CellValue,
}

impl<R: Read, W: Write> VirtualMachine<R, W> {

  // region Construction and accessors

  /// `eof` is the value `get` stores once `input` is exhausted.
  pub fn new(input: R, output: W, eof: CellValue) -> VirtualMachine<R, W> {
    VirtualMachine::with_config(input, output, Config::with_eof(eof))
  }

  pub fn with_config(input: R, output: W, config: Config) -> VirtualMachine<R, W> {
    VirtualMachine{
      input,
      output,
      config,
      program         :  vec![],
      program_counter :  0,
      tape            :  Tape::new(config.initial_memory_size, config.max_allocation),
      cursor          :  0,
      executing       :  false,
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn program(&self) -> &[Instruction] {
    &self.program
  }

  pub fn input_mut(&mut self) -> &mut R {
    &mut self.input
  }

  pub fn output(&self) -> &W {
    &self.output
  }

  pub fn output_mut(&mut self) -> &mut W {
    &mut self.output
  }

  /// Releases the bound streams.
  pub fn into_inner(self) -> (R, W) {
    (self.input, self.output)
  }

  pub fn state(&self) -> State<'_> {
    State{
      executing       :  self.executing,
      program_counter :  self.program_counter,
      cursor          :  self.cursor,
      tape            :  self.tape.cells(),
      current_value   :  self.current_value(),
    }
  }

  fn current_value(&self) -> CellValue {
    self.tape[self.cursor]
  }

  // endregion

  // region Loading and execution

  /**
    Installs `instructions` as the current program and resets the program counter, the cursor,
    and the tape. Fails with `VmError::ConcurrentExecution` while a program is executing.
  */
  pub fn load<I>(&mut self, instructions: I) -> VmResult<()>
    where I: IntoIterator<Item = Instruction>
  {
    if self.executing {
      return Err(VmError::ConcurrentExecution);
    }

    self.program_counter = 0;
    self.cursor          = 0;
    self.program         = instructions.into_iter().collect();
    self.tape            = Tape::new(self.config.initial_memory_size, self.config.max_allocation);
    Ok(())
  }

  /// Runs the loaded program until the program counter passes its last instruction.
  pub fn execute(&mut self) -> VmResult<()> {
    self.executing = true;
    let result = self.run();
    self.executing = false;
    result
  }

  fn run(&mut self) -> VmResult<()> {
    #[cfg(feature = "trace_computation")] eprintln!("{}", self.state());

    while self.program_counter < self.program.len() {
      let instruction = self.program[self.program_counter];
      #[cfg(feature = "trace_computation")]
        eprintln!("{:>6}: {}", self.program_counter, instruction);

      self.program_counter = self.dispatch(instruction)?;

      #[cfg(feature = "trace_computation")] eprintln!("{}", self.state());
    }

    self.output.flush()?;
    Ok(())
  }

  /// Performs `instruction` and returns the next program counter.
  fn dispatch(&mut self, instruction: Instruction) -> VmResult<usize> {
    let argument = instruction.argument;
    match instruction.opcode {
      Opcode::ChangeValue   => self.change_value(argument),
      Opcode::ChangePointer => self.change_pointer(argument),
      Opcode::Get           => self.get(argument),
      Opcode::Put           => self.put(argument),
      Opcode::BranchIfZero  => self.branch_if_zero(argument),
      Opcode::BranchNotZero => self.branch_not_zero(argument),
    }
  }

  // endregion

  // region VM instruction methods

  fn change_value(&mut self, delta: CellValue) -> VmResult<usize> {
    let cursor = self.cursor;
    self.tape[cursor] = self.tape[cursor].wrapping_add(delta);
    Ok(self.program_counter + 1)
  }

  /**
    Moves the cursor by `delta`, growing the tape if the cursor passes its end.

    Moving below the first cell fails with `VmError::MemoryOutOfBounds` and leaves the cursor
    where it was.
  */
  fn change_pointer(&mut self, delta: CellValue) -> VmResult<usize> {
    let target = self.cursor as i128 + delta as i128;
    let out_of_bounds = VmError::MemoryOutOfBounds{ cursor: self.cursor, delta };

    if target < 0 {
      return Err(out_of_bounds);
    }
    let target = match usize::try_from(target) {
      Ok(target) => target,
      Err(_e)    => return Err(out_of_bounds)
    };

    self.tape.ensure_index(target);
    self.cursor = target;
    Ok(self.program_counter + 1)
  }

  /**
    Reads `count` times and stores the last read in the current cell. Each read yields the next
    byte, or `eof` if the input is exhausted at that moment. A `count` of zero or less reads
    nothing and leaves the cell alone.
  */
  fn get(&mut self, count: CellValue) -> VmResult<usize> {
    let mut value = None;

    for _ in 0..count.max(0) {
      value = match self.read_byte()? {
        Some(byte) => Some(byte as CellValue),
        None       => Some(self.config.eof)
      };
    }

    if let Some(value) = value {
      let cursor = self.cursor;
      self.tape[cursor] = value;
    }
    Ok(self.program_counter + 1)
  }

  fn read_byte(&mut self) -> VmResult<Option<u8>> {
    let mut buffer = [0u8; 1];
    loop {
      match self.input.read(&mut buffer) {
        Ok(0)  => return Ok(None),
        Ok(_)  => return Ok(Some(buffer[0])),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
        Err(e) => return Err(e.into())
      }
    }
  }

  /// Writes the current cell, modulo 256, `count` times.
  fn put(&mut self, count: CellValue) -> VmResult<usize> {
    if count > 0 {
      let byte      = self.current_value().rem_euclid(256) as u8;
      let buffer    = [byte; PUT_BUFFER_SIZE];
      let mut count = count as u64;
      while count > 0 {
        let chunk = count.min(PUT_BUFFER_SIZE as u64) as usize;
        self.output.write_all(&buffer[..chunk])?;
        count -= chunk as u64;
      }
    }
    Ok(self.program_counter + 1)
  }

  fn branch_if_zero(&mut self, offset: CellValue) -> VmResult<usize> {
    match self.current_value() == 0 {
      true  => self.jump(offset),
      false => Ok(self.program_counter + 1)
    }
  }

  fn branch_not_zero(&mut self, offset: CellValue) -> VmResult<usize> {
    match self.current_value() == 0 {
      true  => Ok(self.program_counter + 1),
      false => self.jump(offset)
    }
  }

  /// The program counter `offset` instructions away from the current one.
  fn jump(&self, offset: CellValue) -> VmResult<usize> {
    let target = self.program_counter as i128 + offset as i128;
    let out_of_bounds = VmError::ProgramCounterOutOfBounds{
      program_counter: self.program_counter,
      offset
    };

    if target < 0 {
      return Err(out_of_bounds);
    }
    usize::try_from(target).map_err(|_e| out_of_bounds)
  }

  // endregion

}


// region Display methods

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

fn make_tape_table(cells: &[CellValue], highlight: usize) -> Table {
  let mut table = Table::new();

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Address", ubl->"Contents"]);

  for (i, cell) in cells.iter().enumerate() {
    match i == highlight {

      true  => {
        table.add_row(row![r->format!("* --> T[{}] =", i), format!("{}", cell)]);
      }

      false => {
        table.add_row(row![r->format!("T[{}] =", i), format!("{}", cell)]);
      }

    }
  }
  table
}

impl<'a> State<'a> {
  /// The cells worth printing: everything up to the cursor or the last nonzero cell.
  fn shown_len(&self) -> usize {
    let last_used = self.tape
                        .iter()
                        .rposition(|c| *c != 0)
                        .unwrap_or(0);
    (last_used.max(self.cursor) + 1).min(self.tape.len())
  }
}

impl<'a> Display for State<'a> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut registers = Table::new();
    registers.set_format(*TABLE_DISPLAY_FORMAT);
    registers.set_titles(row![ubr->"Register", ubl->"Contents"]);
    registers.add_row(row![r->"pc =",     self.program_counter]);
    registers.add_row(row![r->"cursor =", self.cursor]);
    registers.add_row(row![r->"value =",  self.current_value]);

    let shown      = self.shown_len();
    let tape_table = make_tape_table(&self.tape[..shown], self.cursor);

    let mut combined_table = table!([registers, tape_table]);
    combined_table.set_titles(row![ub->"Registers", ub->"Tape"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    let status = match self.executing {
      true  => "Executing.",
      false => "Idle."
    };

    write!(f, "{}\n{}", status, combined_table)?;
    if shown < self.tape.len() {
      write!(f, "({} more zero cells)", self.tape.len() - shown)?;
    }
    Ok(())
  }
}

// endregion
