//! Scans an N64 ROM for MIO0 blocks and writes each decompressed
//! block to `0x<offset>.texture` in the current directory.

use std::env;
use std::fs;
use std::process::ExitCode;

use tex64_rs::{mio0, rom};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "extract".to_string());
    let path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => {
            eprintln!("Usage: {} path/to/ROM", program);
            return ExitCode::FAILURE;
        }
    };

    let rom_data = match fs::read(&path) {
        Ok(data) => data,
        Err(err) => {
            log::error!("failed to read {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };
    log::info!("opened {} ({} bytes)", path, rom_data.len());

    if let Err(err) = rom::check_signature(&rom_data) {
        log::error!("{}: {}", path, err);
        return ExitCode::FAILURE;
    }

    let blocks = rom::find_mio0(&rom_data);
    log::info!("found {} MIO0 block(s)", blocks.len());

    for &start in blocks.iter() {
        match mio0::decode(&rom_data[start..]) {
            Ok(texture) => {
                let out_path = format!("0x{:x}.texture", start);
                match fs::write(&out_path, &texture) {
                    Ok(()) => {
                        log::info!("0x{:x}: wrote {} bytes to {}", start, texture.len(), out_path)
                    }
                    Err(err) => log::error!("failed to write {}: {}", out_path, err),
                }
            }
            Err(err) => log::warn!("skipping block at 0x{:x}: {}", start, err),
        }
    }

    ExitCode::SUCCESS
}
