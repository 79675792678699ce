//! A resource-limit-violating test load: allocates memory, spins the
//! CPU, opens temp files, and optionally faults, for exercising
//! `nurse`/`setrlim` against real limits in integration tests.
//!
//! Usage: `trylim MEM_MIB CPU_ITERS N_FILES FAULT_MODE`

use std::env;
use std::fs::File;
use std::io::Write;
use std::process::exit;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 5 {
        eprintln!("usage:\n\t{} mem cpu files faultP", args.get(0).map(String::as_str).unwrap_or("trylim"));
        exit(1);
    }

    let mem_mib: usize = args[1].parse().unwrap_or(0);
    let cpu_iters: u64 = args[2].parse().unwrap_or(0);
    let n_files: usize = args[3].parse().unwrap_or(0);
    let fault_mode: i32 = args[4].parse().unwrap_or(0);

    if mem_mib > 0 {
        let n_bytes = mem_mib * 1024 * 1024;
        println!("allocating {} bytes", n_bytes);
        let mut buffer = vec![0u8; n_bytes];
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = (i % 256) as u8;
        }
        drop(buffer);
    }

    if cpu_iters > 1000 {
        println!("cpu_iters = {}", cpu_iters);
        let step = cpu_iters / 10;
        for i in 0..cpu_iters {
            if step != 0 && i % step == 0 {
                println!("eo {}", i / step);
            }
        }
    }

    if n_files > 0 {
        let mut files = Vec::with_capacity(n_files);
        for i in 0..n_files {
            let path = format!("/tmp/cosa_lletja_{}", i);
            match File::create(&path) {
                Ok(file) => files.push(file),
                Err(err) => {
                    println!("fopen fail ({}): {}", path, err);
                    exit(1);
                }
            }
        }
        for mut file in files {
            let _ = file.flush();
        }
    }

    if fault_mode != 0 {
        if fault_mode == -1 {
            let p: *const i32 = std::ptr::null();
            // Intentional: exercises SIGSEGV under a traced/limited run.
            let q = unsafe { *p };
            exit(q);
        }
        exit(fault_mode);
    }
}
