use std::io;
use std::process;

use tape_vm::{parse_assembly, VirtualMachine};

fn main() {

  #[cfg(feature = "trace_computation")]
  eprintln!("Computation Tracing ENABLED");

  let text = "
% Build 72 in cell 1 with an 8 x 9 loop, then print from there.
change_value(8)
branch_if_zero(6)
  change_pointer(1)
  change_value(9)
  change_pointer(-1)
  change_value(-1)
branch_not_zero(-4)
change_pointer(1)
put(1)                  % H
change_value(29)
put(1)                  % e
change_value(7)
put(2)                  % ll
change_value(3)
put(1)                  % o
change_pointer(1)
change_value(10)
put(1)                  % newline
";

  let program = match parse_assembly(text) {
    Ok(program) => program,
    Err(e)      => {
      eprintln!("{}", e);
      process::exit(1);
    }
  };

  #[cfg(feature = "trace_computation")]
    {
      for instruction in &program {
        eprintln!("{}", instruction);
      }
    }

  let stdin   = io::stdin();
  let stdout  = io::stdout();
  let mut machine = VirtualMachine::new(stdin.lock(), stdout.lock(), -1);

  if let Err(e) = machine.load(program).and_then(|_| machine.execute()) {
    eprintln!("Error: {}\n{}", e, machine.state());
    process::exit(1);
  }

}
