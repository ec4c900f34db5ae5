// This binary crate is intentionally minimal.
// All inference logic lives in the library (src/lib.rs and its modules).
// Run the web server with:
//   cargo run --bin server
fn main() {
    println!("darklight: feedforward inference for the dark-or-light text classifier.");
    println!("Run `cargo run --bin server` to serve the slider page,");
    println!("or `cargo run --example predict` for a terminal demo.");
}
