use mantle::config::Config;
use mantle::error::ShellError;
use mantle::flags::Flags;
use mantle::input::ReadlineInput;
use mantle::shell::{interrupt_notice, Shell};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("mantle: {}", e);
        flags.print_help();
        return ExitCode::FAILURE;
    }

    if flags.is_set("help") {
        flags.print_help();
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!("Mantle {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(&flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mantle: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(flags: &Flags) -> Result<(), ShellError> {
    let config = Config::from_flags(flags)?;
    mantle::logging::init(config.debug);

    let input = ReadlineInput::new(config.history_path.clone())?;
    let mut shell = Shell::new(config, input, std::io::stdout())?;

    let jobs = shell.jobs();
    ctrlc::set_handler(move || {
        if let Some(notice) = interrupt_notice(&jobs) {
            println!("\n{}", notice);
        }
    })?;

    shell.run()
}
