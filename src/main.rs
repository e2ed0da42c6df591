use std::process::ExitCode;

fn main() -> ExitCode {
    // stdout carries the protocol, so diagnostics go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    match quint_chess::uci::run_uci_loop() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("uci loop failed: {err}");
            ExitCode::FAILURE
        }
    }
}
