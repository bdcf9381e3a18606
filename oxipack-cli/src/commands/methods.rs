//! Methods command implementation.

use crate::utils::CliResult;
use oxipack_container::Method;

pub fn cmd_methods() -> CliResult<()> {
    println!("{:<14} {:<6} Stages", "Method", "Magic");
    println!("{}", "-".repeat(40));
    for method in Method::ALL {
        let stages: Vec<&str> = method.stages().iter().map(|s| s.name()).collect();
        println!(
            "{:<14} {:<6} {}",
            method.name(),
            String::from_utf8_lossy(method.magic()),
            stages.join(" -> ")
        );
    }
    Ok(())
}
