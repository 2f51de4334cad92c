use std::io;
use std::path::Path;
use std::process::Command;

fn main() {
    // Tell Cargo to only rerun this build script if specific files change
    println!("cargo:rerun-if-changed=src/build.rs");
    println!("cargo:rerun-if-changed=static");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/heads");

    // Source tarballs carry no git metadata, fall back to "unknown"
    let git_short_rev = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|rev| rev.trim().to_string())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_SHORT_REV={git_short_rev}");

    // Embed the portal pages served to captive clients
    generate_static_files().expect("Failed to generate static files");
}

fn generate_static_files() -> io::Result<()> {
    let static_path = Path::new("static");

    if !static_path.exists() {
        panic!("static folder not found at {static_path:?}");
    }

    static_files::resource_dir(static_path).build()
}
