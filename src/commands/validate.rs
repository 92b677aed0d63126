use super::common::print_config_warnings;
use camino::Utf8PathBuf;
use clap::Parser;
use dev_scout::Result;
use dev_scout::config::Config;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file [default: one of scout.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

#[expect(clippy::unnecessary_wraps, reason = "Consistent interface with other subcommands")]
pub fn validate_config(args: &ValidateArgs) -> Result<()> {
    let base_path = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match Config::load(&base_path, config_path) {
        Ok((_, warnings)) => {
            println!("Configuration validation successful");
            if let Some(path) = config_path {
                println!("Config file: {path}");
            } else {
                println!("Using default configuration (no config file found)");
            }

            print_config_warnings(&warnings);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {e}");
            std::process::exit(1);
        }
    }
}
