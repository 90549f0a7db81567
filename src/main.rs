use anyhow::Result;
use clap::Parser;
use gregorender::cli::{Cli, Commands};
use gregorender::config::{RenderConfig, ToolPaths};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        command @ Commands::Render { .. } => {
            let config = build_render_config(command)?;
            gregorender::commands::render::handle_render(config)
        }
        Commands::Check { input, limit } => {
            gregorender::commands::check::handle_check(&input, limit)
        }
    }
}

// Pure mapping from parsed arguments to the runtime configuration
fn build_render_config(command: Commands) -> Result<RenderConfig> {
    if let Commands::Render {
        input,
        output_dir,
        temp_dir,
        limit,
        keep_temp,
        jobs,
        quiet,
        verbosity,
        gregorio,
        lualatex,
        dvisvgm,
    } = command
    {
        Ok(RenderConfig {
            source: input,
            output_dir,
            temp_dir,
            jobs,
            limit,
            keep_temp,
            quiet,
            verbosity,
            tools: ToolPaths {
                gregorio,
                lualatex,
                dvisvgm,
            },
        })
    } else {
        Err(anyhow::anyhow!("Invalid command"))
    }
}
