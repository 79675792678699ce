//! Prints the current soft/hard value of every cataloged resource via
//! `getrlimit(2)`. Reference behavior only; not wired into `nurse`
//! itself.

use nix::sys::resource::getrlimit;

fn main() {
    for entry in nurse::resource_limits::new_catalog() {
        match getrlimit(entry.resource) {
            Ok((soft, hard)) => println!("{} = {}, {}", entry.name, soft, hard),
            Err(err) => eprintln!("{}: getrlimit failed: {}", entry.name, err),
        }
    }
}
