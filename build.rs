// Build-time timeout overrides are read with option_env!, so a change in either
// variable has to invalidate the compiled crate.
fn main() {
    println!("cargo:rerun-if-env-changed=IPC_READ_TIMEOUT");
    println!("cargo:rerun-if-env-changed=IPC_SEND_TIMEOUT");
    println!("cargo:rerun-if-changed=build.rs");
}
