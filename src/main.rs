use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncReadExt;
use vizhook::config::LogFormat;
use vizhook::core::export::{bundle, export_all, BUNDLE_FILENAME};
use vizhook::core::Storage;
use vizhook::utils::{logger, validation::Validate};
use vizhook::{
    Agent, AgentConfig, CliConfig, ConversationState, HookConfig, JsonLinesSink, LocalStorage,
    Message,
};

async fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file '{}'", path)),
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置
    let config = match &cli.config {
        Some(path) => match HookConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => HookConfig::default(),
    };

    // 初始化日誌
    match config.logging.format {
        LogFormat::Json => logger::init_json_logger(),
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
    }
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let agent = Agent::build(AgentConfig {
        hook: config,
        ..AgentConfig::default()
    })?;

    if cli.print_instructions {
        println!("{}", agent.instructions().trim());
        return Ok(());
    }

    let input = read_input(cli.input.as_deref()).await?;
    let state = if cli.conversation {
        serde_json::from_str::<ConversationState>(&input)
            .context("Input is not a valid conversation state")?
    } else {
        ConversationState::new(vec![Message::assistant(input)])
    };

    // 事件寫到 stdout，一行一筆
    let report = {
        let stdout = std::io::stdout();
        let mut sink = JsonLinesSink::new(stdout.lock());
        agent.post_model_hook(&state, &mut sink)
    };
    tracing::debug!("Hook report: {:?}", report);

    let Some(export_dir) = &cli.export_dir else {
        return Ok(());
    };
    let Some(message) = state.latest_assistant_message() else {
        tracing::info!("No assistant message, nothing to export");
        return Ok(());
    };

    let records = agent.hook().records(&message.content);
    let files = export_all(&records)?;
    let storage = LocalStorage::new(export_dir.as_str());

    if cli.bundle {
        let archive = bundle(&files)?;
        storage.write_file(BUNDLE_FILENAME, &archive).await?;
        tracing::info!(
            "📦 Bundled {} export(s) into {}/{}",
            files.len(),
            export_dir,
            BUNDLE_FILENAME
        );
    } else {
        for file in &files {
            storage.write_file(&file.filename, &file.contents).await?;
        }
        tracing::info!("📁 Wrote {} export(s) to {}", files.len(), export_dir);
    }

    Ok(())
}
