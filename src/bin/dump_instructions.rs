// dump-instructions - inspection table for a disassembly dump
// Prints one aligned row per instruction; not consumed by the translator.

use std::env;
use std::path::PathBuf;
use std::process;

use pycrust::stream;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <disassembly.csv>", args[0]);
        process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let instructions = match stream::load_instructions(&path) {
        Ok(instructions) => instructions,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!(
        "{:<20} {:>6} {:>5} {:<15} {:>6} {:>5} {:>4}",
        "opname", "opcode", "arg", "argval", "offset", "line", "jump"
    );
    for ins in &instructions {
        println!(
            "{:<20} {:>6} {:>5} {:<15} {:>6} {:>5} {:>4}",
            ins.opname,
            ins.opcode,
            ins.arg.map(|a| a.to_string()).unwrap_or_default(),
            ins.argval.to_string(),
            ins.offset,
            ins.starts_line.map(|l| l.to_string()).unwrap_or_default(),
            if ins.is_jump_target { "yes" } else { "" },
        );
    }
}
