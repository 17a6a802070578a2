fn main() {
    std::process::exit(sitesmith::cli::run());
}
