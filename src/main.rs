use anyhow::{Context, Result};
use bat::PrettyPrinter;
use clap::Parser;
use cliclack::{input, spinner};
use console::style;
use tracing_subscriber::EnvFilter;

use relay_agent::agent;
use relay_agent::environment::local::LocalEnvironment;
use relay_agent::providers::configs::openai::OpenAiProviderConfig;
use relay_agent::providers::openai::OpenAiProvider;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// OpenAI API Key (can also be set via OPENAI_API_KEY environment variable)
    #[arg(short, long)]
    api_key: Option<String>,

    /// API host (can also be set via OPENAI_API_HOST environment variable)
    #[arg(long)]
    host: Option<String>,

    /// Model to use
    #[arg(short, long, default_value = "gpt-4o")]
    model: String,
}

impl Cli {
    fn provider_config(&self) -> Result<OpenAiProviderConfig> {
        OpenAiProviderConfig::with_overrides(self.api_key.clone(), self.host.clone()).context(
            "API key must be provided via --api-key or OPENAI_API_KEY environment variable",
        )
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let provider = OpenAiProvider::new(cli.provider_config()?)?;
    let mut env = LocalEnvironment::new(provider, cli.model.as_str());

    println!(
        "Example relay agent {}",
        style("- type \"exit\" to end the session").dim()
    );
    println!("\n");

    loop {
        let message_text: String = input("Message:").placeholder("").multiline().interact()?;

        if message_text.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        env.add_user_message(message_text);

        let spin = spinner();
        spin.start("awaiting reply");
        let turn = agent::run(&mut env);
        spin.stop("");

        if let Err(e) = turn {
            cliclack::log::error(format!("{:#}", e))?;
            continue;
        }

        for reply in env.take_replies() {
            render(&reply)?;
            println!("\n");
        }
    }
    Ok(())
}

fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()?;
    Ok(())
}
