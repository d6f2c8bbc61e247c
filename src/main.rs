#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "This crate only runs in the browser. Run `trunk build --release` and include the generated script on the server-rendered pages."
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    portfolio_enhance::frontend::run();
}
