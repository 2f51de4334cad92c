pub mod api;
pub mod config;
pub mod services;

// Include the generated static files from build.rs
include!(concat!(env!("OUT_DIR"), "/generated.rs"));

/// Portal pages embedded at build time
#[inline(always)]
pub fn static_files() -> api::StaticResources {
    generate()
}
