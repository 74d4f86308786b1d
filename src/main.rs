use colored::Colorize;

fn main() {
    env_logger::init();
    if let Err(e) = pdftags::run() {
        eprintln!("{} {}", "error:".bright_red().bold(), e);
        std::process::exit(1);
    }
}
