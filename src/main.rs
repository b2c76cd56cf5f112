fn main() {
    #[cfg(feature = "cli")]
    subshift::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("subshift: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
