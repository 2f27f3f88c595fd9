use clap::Parser;
use tctl_discovery_cli::{run, Cli};

fn main() {
    // Reset SIGPIPE to default behavior so piping into `head`/`less`
    // doesn't panic on a broken pipe.
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
