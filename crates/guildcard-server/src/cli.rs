use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "guildcard-server", about = "Embeddable SVG cards for Discord guilds")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/guildcard.toml")]
    pub config: String,

    /// Address to listen on (overrides config and environment)
    #[arg(long)]
    pub bind: Option<String>,
}
