/*!
  The tape is the machine's only data memory: a zero-initialized run of integer cells that
  grows to the right on demand and never shrinks.

  Growth happens in single steps of `max(max_allocation, len)` cells, so the tape at least
  doubles each time it grows while small tapes still grow by a useful amount. A growth step is
  repeated until the requested index fits.
*/

use std::ops::{Index, IndexMut};

pub type CellValue = i64;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Tape {
  cells          : Vec<CellValue>,
  max_allocation : usize,
}

impl Tape {

  /// The tape always holds at least one cell, whatever `initial_size` says.
  pub fn new(initial_size: usize, max_allocation: usize) -> Tape {
    Tape{
      cells: vec![0; initial_size.max(1)],
      max_allocation
    }
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn cells(&self) -> &[CellValue] {
    &self.cells
  }

  /**
    Grows the tape until `idx` is a valid index. Returns `true` if the tape grew.

    Each step appends `max(max_allocation, len)` zero cells, and at least one.
  */
  pub fn ensure_index(&mut self, idx: usize) -> bool {
    let old_len = self.cells.len();
    while idx >= self.cells.len() {
      let step = std::cmp::max(self.max_allocation, self.cells.len()).max(1);
      self.cells.resize(self.cells.len() + step, 0);
    }

    #[cfg(feature = "trace_computation")]
      {
        if self.cells.len() != old_len {
          eprintln!("tape grew from {} to {} cells", old_len, self.cells.len());
        }
      }

    self.cells.len() != old_len
  }

}

impl Index<usize> for Tape {
  type Output = CellValue;
  fn index(&self, idx: usize) -> &CellValue {
    &self.cells[idx]
  }
}

impl IndexMut<usize> for Tape {
  fn index_mut(&mut self, idx: usize) -> &mut CellValue {
    &mut self.cells[idx]
  }
}
