use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");

    let ffi_path = Path::new(&crate_dir).join("src/ffi.rs");
    if !ffi_path.exists() {
        panic!("src/ffi.rs missing; the C header is generated from it");
    }

    // C header for the embedding layer
    let header_path = Path::new(&crate_dir).join("include/ctrmode.h");
    if let Some(parent) = header_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            println!("cargo:warning=Failed to create include/ directory: {}", e);
        }
    }

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("CTRMODE_H")
        .with_sys_include("stddef.h")
        .with_sys_include("stdint.h")
        .generate()
    {
        Ok(bindings) => {
            if !bindings.write_to_file(&header_path) {
                println!("cargo:info=ctrmode.h unchanged");
            }
        }
        Err(e) => println!("cargo:warning=cbindgen generation failed: {}", e),
    }

    println!("cargo:rerun-if-changed=src/");
    println!("cargo:rerun-if-changed=build.rs");
}
