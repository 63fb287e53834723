//! Renders an extracted texture as a tile sheet and writes the
//! result next to it as a PPM image.

use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use tex64_rs::bitmap;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "view".to_string());
    let path = match (args.next(), args.next()) {
        (Some(path), None) => PathBuf::from(path),
        _ => {
            eprintln!("Usage: {} path/to/texture", program);
            return ExitCode::FAILURE;
        }
    };

    let texture = match fs::read(&path) {
        Ok(data) => data,
        Err(err) => {
            log::error!("failed to read {}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let rendered = bitmap::render(&texture);

    let out_path = path.with_extension("ppm");
    let file = match File::create(&out_path) {
        Ok(file) => file,
        Err(err) => {
            log::error!("failed to create {}: {}", out_path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = rendered.write_ppm(&mut BufWriter::new(file)) {
        log::error!("failed to write {}: {}", out_path.display(), err);
        return ExitCode::FAILURE;
    }

    log::info!(
        "rendered {} ({} bytes) to {}",
        path.display(),
        texture.len(),
        out_path.display()
    );
    ExitCode::SUCCESS
}
