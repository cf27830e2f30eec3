// build.rs

fn main() {
    // Locate libX11 via pkg-config; fall back to plain linker flags when the
    // .pc file is missing (e.g. minimal container images).
    if pkg_config::probe_library("x11").is_err() {
        eprintln!("pkg-config failed for 'x11'. Falling back to manual linking.");
        println!("cargo:rustc-link-lib=X11");
        println!("cargo:rustc-link-search=/usr/lib");
    }
}
