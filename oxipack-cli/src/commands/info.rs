//! Info command implementation.

use crate::utils::CliResult;
use oxipack_container::inspect;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// JSON output for container inspection.
#[derive(Debug, Serialize)]
struct InfoJson {
    file: String,
    method: &'static str,
    magic: String,
    stages: Vec<&'static str>,
    size: u64,
    frames: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    lzw_blocks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tans: Option<TansJson>,
}

#[derive(Debug, Serialize)]
struct TansJson {
    table_size: u32,
    symbols: usize,
    length: u32,
    final_state: u32,
}

pub fn cmd_info(file: &Path, json: bool) -> CliResult<()> {
    let data = fs::read(file)?;
    let info = inspect(&data)?;
    let method = info.method;

    let tans = info.tans.as_ref().map(|h| TansJson {
        table_size: h.table_size,
        symbols: h.frequencies.distinct(),
        length: h.length,
        final_state: h.final_state,
    });

    if json {
        let out = InfoJson {
            file: file.display().to_string(),
            method: method.name(),
            magic: String::from_utf8_lossy(method.magic()).into_owned(),
            stages: method.stages().iter().map(|s| s.name()).collect(),
            size: info.container_size,
            frames: info.frames,
            lzw_blocks: info.lzw_blocks,
            tans,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Container Information");
    println!("=====================");
    println!("File: {}", file.display());
    println!("Method: {}", method);
    println!("Magic: {}", String::from_utf8_lossy(method.magic()));
    println!(
        "Stages: {}",
        method
            .stages()
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(" -> ")
    );
    println!("Size: {} bytes", info.container_size);
    println!("Frames: {}", info.frames);

    if let Some(blocks) = info.lzw_blocks {
        println!();
        println!("LZW:");
        println!("  Parallel blocks: {}", blocks);
    }

    if let Some(tans) = tans {
        println!();
        println!("tANS Header:");
        println!("  Table size: {}", tans.table_size);
        println!("  Distinct symbols: {}", tans.symbols);
        println!("  Coded symbols: {}", tans.length);
        println!("  Final state: {}", tans.final_state);
    }

    Ok(())
}
