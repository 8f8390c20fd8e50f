//! vitlc binary entry point.

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(vitlc_drv::run(&args));
}
