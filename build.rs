//! Embeds a build counter and compile timestamp for the status tool.

use std::fs;
use std::path::{Path, PathBuf};

fn counter_path() -> PathBuf {
    // OUT_DIR survives incremental builds of the same profile
    match std::env::var_os("OUT_DIR") {
        Some(dir) => Path::new(&dir).join("nve_build_number"),
        None => PathBuf::from("build_number.txt"),
    }
}

fn next_build_number(path: &Path) -> u64 {
    let previous = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    previous + 1
}

fn main() {
    println!("cargo:rerun-if-changed=src");

    let path = counter_path();
    let build = next_build_number(&path);
    if let Err(e) = fs::write(&path, build.to_string()) {
        println!("cargo:warning=could not record build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=NVE_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=NVE_BUILD_TIMESTAMP={}", timestamp);
}
