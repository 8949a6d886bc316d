// pycrust - ahead-of-time translator from stack-machine bytecode to Rust
// Consumes a disassembly dump, emits Rust source, and hands it to rustc.

use log::{debug, info};
use std::env;
use std::path::{Path, PathBuf};
use std::process;

use pycrust::emitter;
use pycrust::stream;
use pycrust::toolchain;
use pycrust::translator::Translator;

fn print_usage(program: &str) {
    println!("pycrust - translate a disassembled bytecode stream to Rust");
    println!();
    println!("Usage: {} <disassembly.csv> [options]", program);
    println!();
    println!("Options:");
    println!("  -o, --output <name>   Artifact name (default: output)");
    println!("  --trace-stack         Dump the operand stack and statement");
    println!("                        history after the translation pass");
    println!("  --emit-only           Write the generated source but skip rustc");
    println!("  --run                 Run the compiled artifact and show its output");
}

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let csv_path = PathBuf::from(&args[1]);
    let mut output_name = String::from("output");
    let mut trace_stack = false;
    let mut emit_only = false;
    let mut run_binary = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: -o requires a name");
                    process::exit(1);
                }
                output_name = args[i + 1].clone();
                i += 2;
            }
            "--trace-stack" => {
                trace_stack = true;
                i += 1;
            }
            "--emit-only" => {
                emit_only = true;
                i += 1;
            }
            "--run" => {
                run_binary = true;
                i += 1;
            }
            other => {
                eprintln!("Error: unknown option '{}'", other);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    if !csv_path.exists() {
        eprintln!("Error: disassembly dump not found: {}", csv_path.display());
        eprintln!();
        eprintln!("Please check:");
        eprintln!("• File path is correct");
        eprintln!("• You're running from the right directory");
        process::exit(1);
    }

    debug!("loading instruction stream from {}", csv_path.display());
    let instructions = match stream::load_instructions(&csv_path) {
        Ok(instructions) => instructions,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!("loaded {} instructions", instructions.len());

    let mut translator = Translator::new();
    if let Err(e) = translator.translate(&instructions) {
        // Fatal: a malformed stream produces no output at all
        eprintln!("Translation failed: {}", e);
        process::exit(1);
    }

    if trace_stack {
        print!("{}", translator.trace_stack());
    }

    let translation = translator.into_translation();
    let source_text = emitter::emit_program(&translation);
    info!(
        "emitted {} statement(s), {} support declaration(s)",
        translation.statements.len(),
        translation.support.len()
    );

    let source_path = PathBuf::from(format!("{}.rs", output_name));
    if let Err(e) = toolchain::write_program(Path::new(&source_path), &source_text) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    println!("wrote {}", source_path.display());

    if emit_only {
        return;
    }

    let status = toolchain::compile(&source_path, &output_name);
    if !status.success {
        eprintln!("Compilation failed. Please check the generated code.");
        eprintln!("{}", status.message);
        process::exit(1);
    }
    println!("{}", status.message);

    if run_binary {
        let run = toolchain::run_artifact(&output_name);
        if !run.success {
            eprintln!("{}", run.message);
            process::exit(1);
        }
        print!("{}", run.message);
    }
}
