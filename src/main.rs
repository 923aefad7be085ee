use std::io;

use clap::Parser;

use cloud_desk::config::{Cli, ShellConfig};
use cloud_desk::drivers::OutputDriver;
use cloud_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use cloud_desk::runner::run_shell;
use cloud_desk::shell::DesktopShell;
use cloud_desk::tracing_sub::{self, LogBuffer};

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = ShellConfig::try_from(&cli)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let logs = LogBuffer::default();
    tracing_sub::set_global_log(logs.clone());
    tracing_sub::init_default(config.log_level);

    let mut shell = DesktopShell::new(&config, logs);
    let mut input = ConsoleInputDriver::new();
    let mut output = ConsoleOutputDriver::new()?;

    output.enter()?;
    let result = run_shell(&mut shell, &mut input, &mut output, config.poll_interval);
    output.exit()?;

    if let Err(err) = &result {
        tracing::error!(%err, "desktop stopped");
    }
    result
}
