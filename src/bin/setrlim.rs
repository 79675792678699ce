//! Parses the same `NAME soft hard` triples as `nurse`'s Argument
//! Binder, applies them to the current process via `setrlimit(2)`,
//! then `execve`s the remaining argv. No tracing: this demonstrates
//! resource limits in isolation.

use nurse::{args, resource_limits};
use std::env;
use std::ffi::OsString;

fn main() {
    let tokens: Vec<OsString> = env::args_os().skip(1).collect();

    let program = match args::bind_arguments(&tokens, resource_limits::new_catalog()) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("usage: setrlim [NAME soft hard]* -- prog [args]\n{}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = resource_limits::apply(&program.limits) {
        eprintln!("error setting limits: {}", err);
        std::process::exit(1);
    }

    eprintln!("running {:?}", program.argv[0]);
    for (index, arg) in program.argv.iter().enumerate().skip(1) {
        eprintln!("\targ[{}] = {:?}", index - 1, arg);
    }

    let err = nix::unistd::execv(&program.argv[0], &program.argv).unwrap_err();
    eprintln!("ERROR ({})", err);
    std::process::exit(1);
}
