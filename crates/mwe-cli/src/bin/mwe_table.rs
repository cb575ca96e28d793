// mwe-table: Validate or print noun compound transition tables.
//
// With a file argument, parses the table, builds the state machine and
// prints a summary of its states. Without one, prints the built-in table
// so it can be used as a starting point.
//
// Usage:
//   mwe-table [TABLE_FILE]
//
// Options:
//   -h, --help   Print help

use std::io::{self, Write};
use std::path::Path;

use mwe_en::nominal;
use mwe_fsm::machine::StateMachine;

fn main() {
    mwe_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if mwe_cli::wants_help(&args) {
        println!("mwe-table: Validate or print noun compound transition tables.");
        println!();
        println!("Usage: mwe-table [TABLE_FILE]");
        println!();
        println!("With a file, checks the table and lists its states.");
        println!("Without one, prints the built-in table.");
        return;
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let Some(path) = args.first() else {
        let table = nominal::nominal_table().unwrap_or_else(|e| mwe_cli::fatal(&e.to_string()));
        let _ = write!(out, "{table}");
        return;
    };

    let table = mwe_cli::load_table(Path::new(path)).unwrap_or_else(|e| mwe_cli::fatal(&e));
    let machine = StateMachine::from_table(&table)
        .unwrap_or_else(|e| mwe_cli::fatal(&format!("{path}: {e}")));

    let _ = writeln!(
        out,
        "{path}: {} rows, {} states, initial state {}",
        table.rows().len(),
        machine.state_count(),
        table.initial_state()
    );
    for name in table.state_names() {
        let rows = table.rows().iter().filter(|row| row.state == name).count();
        let _ = writeln!(out, "  {name}: {rows} transitions");
    }
}
