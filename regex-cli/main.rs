mod args;
mod cmd;
mod config;
mod util;

fn main() {
    env_logger::init();
    if let Err(err) = cmd::run(&mut lexopt::Parser::from_env()) {
        // {:?} includes a backtrace when one was captured.
        if std::env::var("RUST_BACKTRACE").map_or(false, |v| v == "1") {
            eprintln!("{:?}", err);
        } else {
            eprintln!("{:#}", err);
        }
        std::process::exit(1);
    }
}
