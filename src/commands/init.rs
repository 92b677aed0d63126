use camino::Utf8PathBuf;
use clap::Parser;
use dev_scout::Result;
use dev_scout::config::Config;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = "scout.yml")]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    Config::write_default(&args.output)?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
