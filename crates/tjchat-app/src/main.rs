mod chat_loop;
mod cli;
mod logging;
mod provider;

use std::process::ExitCode;

use tjchat_ai::{
    completion_text, AiError, ChatSession, CompletionClient, OpenAiClient, RequestOptions,
};
use tjchat_common::{ConfigError, TjchatError};
use tjchat_config::TjchatConfig;

use chat_loop::Outcome;
use cli::{Args, ChatArgs, Command};

fn ai_error(e: AiError) -> TjchatError {
    TjchatError::Ai(e.to_string())
}

async fn run(args: Args, config: TjchatConfig) -> Result<Outcome, TjchatError> {
    let provider = config.active_provider()?;
    tracing::info!(
        provider = %config.api.provider,
        model = %provider.model,
        "using {}",
        provider.base_url
    );

    let client = OpenAiClient::new(provider::client_config(provider)).map_err(ai_error)?;

    match args.command.unwrap_or(Command::Chat(ChatArgs::default())) {
        Command::Chat(chat) => {
            let session = ChatSession::new(
                chat.temperature.unwrap_or(provider.temperature),
                chat.max_tokens.unwrap_or(provider.max_tokens),
            );
            let system_prompt = chat
                .system
                .unwrap_or_else(|| config.chat.system_prompt.clone());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            chat_loop::run(&client, session, &system_prompt, stdin, &mut std::io::stdout()).await
        }
        Command::Complete {
            prompt,
            temperature,
            max_tokens,
        } => {
            let options = RequestOptions {
                temperature,
                max_tokens,
                ..RequestOptions::default()
            };
            let response = client.completion(&prompt, &options).await;
            let text = response.and_then(|r| completion_text(&r)).map_err(|e| {
                tracing::error!("completion failed: {e}");
                ai_error(e)
            })?;
            tracing::info!(prompt = %prompt, completion = %text, "completion finished");
            println!("{text}");
            Ok(Outcome::Finished)
        }
    }
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let args = cli::parse();

    // Load config (logging settings live in it, so this comes first)
    let config = match tjchat_config::load_config(args.config.as_deref(), args.provider.as_deref())
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if let ConfigError::FileNotFound(path) = &e {
                eprintln!(
                    "Create {} (a template is written to the platform config dir on first run) \
                     and set api_key, or pass --config.",
                    path.display()
                );
            }
            return ExitCode::from(1);
        }
    };

    // Initialize logging
    let _guard = match logging::init_logging(&config.logging, args.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    tracing::info!("tjchat v{} starting...", env!("CARGO_PKG_VERSION"));

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to start async runtime: {e}");
            return ExitCode::from(1);
        }
    };

    match runtime.block_on(run(args, config)) {
        Ok(Outcome::Finished) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Interrupted) => {
            tracing::info!("Interrupted by user");
            ExitCode::from(130)
        }
        Err(e) => {
            tracing::error!("tjchat failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
