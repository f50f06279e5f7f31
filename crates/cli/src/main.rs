//! Command-line entry point for `busters`.
//!
//! Everything lives in `busters-app`; this crate only owns the binary.

fn main() -> anyhow::Result<()> {
    busters_app::run()
}
