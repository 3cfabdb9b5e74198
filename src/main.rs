fn main() {
    if let Err(err) = posturewatch_lib::run() {
        log::error!("posturewatch exited with error: {err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
