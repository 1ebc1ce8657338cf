use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use lingobridge::{LanguageCode, language_table};
use lingobridge_client::{
    ControllerOptions, ControllerState, ProxyClient, RequestLifecycle, TranslationController,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Interactive translator in the terminal, backed by a lingobridge proxy
#[derive(Debug, Parser)]
#[command(name = "lingobridge", version)]
struct Args {
    /// Text to translate right away
    text: Option<String>,

    /// Base URL of the proxy
    #[arg(long, env = "LINGOBRIDGE_PROXY_URL", default_value = ProxyClient::DEFAULT_URL)]
    proxy_url: String,

    /// Quiet period after the last edit before translating
    #[arg(long, default_value_t = 400)]
    debounce_ms: u64,

    /// Source language code, `auto` to detect
    #[arg(long, default_value = "auto")]
    from: LanguageCode,

    /// Target language code
    #[arg(long, default_value = "es")]
    to: LanguageCode,
}

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Text(String),
    From(LanguageCode),
    To(LanguageCode),
    Swap,
    Translate,
    Languages,
    Help,
    Quit,
}

impl Input {
    fn parse(line: &str) -> Result<Self, String> {
        let Some(command) = line.strip_prefix('/') else {
            return Ok(Input::Text(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let argument = parts.next();

        let code = |arg: Option<&str>| -> Result<LanguageCode, String> {
            arg.ok_or_else(|| format!("/{} needs a language code", name))?
                .parse()
                .map_err(|e: lingobridge::UnknownLanguage| e.to_string())
        };

        match name {
            "from" => code(argument).map(Input::From),
            "to" => code(argument).map(Input::To),
            "swap" => Ok(Input::Swap),
            "translate" | "t" => Ok(Input::Translate),
            "languages" | "langs" => Ok(Input::Languages),
            "help" | "?" => Ok(Input::Help),
            "quit" | "q" => Ok(Input::Quit),
            other => Err(format!("Unknown command /{}, try /help", other)),
        }
    }
}

const HELP: &str = "\
Type text to translate it. Commands:
  /from <code>   source language (auto to detect)
  /to <code>     target language
  /swap          exchange languages, translation becomes input
  /translate     translate now instead of waiting
  /languages     list language codes
  /quit          exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ProxyClient::new(&args.proxy_url)?;

    let controller = TranslationController::new(
        Arc::new(client.clone()),
        ControllerOptions {
            debounce: Duration::from_millis(args.debounce_ms),
            text: args.text.clone().unwrap_or_default(),
            source_language: args.from,
            target_language: args.to,
        },
    );

    eprintln!("{} → {} via {}", args.from, args.to, client.endpoint());
    eprintln!("{}", HELP);
    if args.text.is_some() {
        controller.translate();
    }

    let stdin = BufReader::new(tokio::io::stdin());
    run(&controller, &client, stdin, &mut std::io::stdout()).await
}

/// Drive the controller from `input` until `/quit` or end of input
///
/// Translations go to `out`, everything else to stderr. When the input ends,
/// a pending edit is translated right away and its outcome shown before
/// returning.
async fn run<R, W>(
    controller: &TranslationController,
    client: &ProxyClient,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut updates = controller.subscribe();
    // Show a request issued before we subscribed
    updates.mark_changed();
    let mut shown = (0, RequestLifecycle::Idle);
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(controller, client, &line).await {
                    return Ok(());
                }
            }
            Ok(()) = updates.changed() => {
                let state = updates.borrow_and_update().clone();
                show(&state, &mut shown, out)?;
            }
        }
    }

    controller.flush().await;
    show(&controller.snapshot(), &mut shown, out)?;
    Ok(())
}

/// Apply one line of input, returning false on `/quit`
async fn handle_line(controller: &TranslationController, client: &ProxyClient, line: &str) -> bool {
    let input = match Input::parse(line) {
        Ok(input) => input,
        Err(message) => {
            eprintln!("{}", message);
            return true;
        }
    };

    match input {
        Input::Text(text) => controller.update_text(text),
        Input::From(code) => controller.update_source_language(code),
        Input::To(code) => controller.update_target_language(code),
        Input::Swap => {
            if controller.source_language().is_auto() {
                eprintln!("Pick a source language before swapping");
            }
            controller.swap();
        }
        Input::Translate => {
            if controller.translate().is_none() {
                eprintln!("Nothing to translate: type some text and pick a target other than auto");
            }
        }
        Input::Languages => {
            let table = match client.languages().await {
                Ok(table) => table,
                Err(e) => {
                    tracing::warn!("Falling back to built-in language table: {}", e);
                    language_table()
                }
            };
            for entry in table {
                eprintln!("  {:<6} {}", entry.code, entry.label);
            }
        }
        Input::Help => eprintln!("{}", HELP),
        Input::Quit => return false,
    }
    true
}

/// Print a request outcome once per (sequence, lifecycle)
fn show<W: Write>(
    state: &ControllerState,
    shown: &mut (u64, RequestLifecycle),
    out: &mut W,
) -> std::io::Result<()> {
    let current = (state.sequence, state.lifecycle.clone());
    if current == *shown {
        return Ok(());
    }
    *shown = current;

    match &state.lifecycle {
        RequestLifecycle::Idle => {}
        RequestLifecycle::Pending => eprintln!("⏳ translating..."),
        RequestLifecycle::Succeeded => {
            writeln!(out, "{}", state.translated_text())?;
            out.flush()?;
            if let Some(detected) = state.detected_source_language() {
                eprintln!("   (detected {})", detected);
            }
        }
        RequestLifecycle::Failed(message) => eprintln!("❌ {}", message),
    }
    Ok(())
}
