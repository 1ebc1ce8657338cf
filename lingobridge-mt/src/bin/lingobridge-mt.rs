use clap::{Arg, Command};
use lingobridge::{LanguageCode, is_eligible};
use lingobridge_mt::{MachineTranslator, MockMode, MockTranslator, MyMemoryProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("lingobridge-mt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate one string directly against the upstream provider")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("target")
                .help("Target language code (e.g., es, fr, zh-CN)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source language code (default: auto)")
                .default_value("auto"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock translator instead of MyMemory")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show provider and detected language")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Required and defaulted arguments are always present
    let text = matches.get_one::<String>("text").map_or("", String::as_str);
    let target: LanguageCode = matches
        .get_one::<String>("target")
        .map_or("", String::as_str)
        .parse()?;
    let source: LanguageCode = matches
        .get_one::<String>("source")
        .map_or("auto", String::as_str)
        .parse()?;
    let verbose = matches.get_flag("verbose");

    if !is_eligible(text, target) {
        anyhow::bail!("Nothing to translate: text is blank or target is 'auto'");
    }

    let translator: Box<dyn MachineTranslator> = if matches.get_flag("mock") {
        Box::new(MockTranslator::new(MockMode::Suffix))
    } else {
        Box::new(MyMemoryProvider::from_env()?)
    };

    if verbose {
        eprintln!("🌍 {} → {} via {}", source, target, translator.provider_name());
    }

    let translation = translator
        .translate(text, Some(source.as_str()), target.as_str())
        .await?;

    if verbose {
        if let Some(detected) = &translation.detected_source {
            eprintln!("🔎 Detected: {}", detected);
        }
    }
    println!("{}", translation.text);

    Ok(())
}
