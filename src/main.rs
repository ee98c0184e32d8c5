use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use aviacode::catalog::Catalog;
use aviacode::label::render_label;
use aviacode::resolver::{
    AliasStore, HttpDirectory, Lang, RemoteConfig, RemoteDirectory, ResolutionEngine,
};
use aviacode::server;

/// aviacode — multilingual city-name → IATA code resolver.
///
/// Resolves free-form Russian/Uzbek city names (misspellings, Latin
/// transliterations, and inflected forms included) to 3-letter city codes,
/// and renders codes back into localized labels.
///
/// Examples:
///   aviacode Ташкент
///   aviacode tashkent --lang uz
///   aviacode "в Самарканде"
///   aviacode --code TAS --lang uz
///   aviacode --list
///   aviacode --serve --port 8080
#[derive(Parser)]
#[command(name = "aviacode", version, about, long_about = None)]
struct Cli {
    /// City name to resolve (positional).
    #[arg(index = 1)]
    query: Option<String>,

    /// Interface language: ru or uz.
    #[arg(long, default_value = "ru", value_parser = parse_lang)]
    lang: Lang,

    /// Render a label for a known code instead of resolving.
    #[arg(long)]
    code: Option<String>,

    /// Print the full city directory as JSON.
    #[arg(long)]
    list: bool,

    /// Offline mode: skip the remote directory strategy.
    #[arg(long)]
    offline: bool,

    /// Alias store path override (default: ~/.aviacode/aliases.json).
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// Run the HTTP API server.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server bind port.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn parse_lang(s: &str) -> Result<Lang, String> {
    s.parse()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ── Load the catalog: fatal if it cannot be parsed ──────────

    let catalog = Arc::new(Catalog::embedded().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }));

    // ── --list / --code need no engine ──────────────────────────

    if cli.list {
        println!(
            "{}",
            serde_json::to_string_pretty(catalog.records()).expect("catalog serializes")
        );
        return;
    }

    if let Some(ref code) = cli.code {
        println!("{}", render_label(&catalog, code, cli.lang));
        return;
    }

    // ── Build the engine ────────────────────────────────────────

    let aliases = Arc::new(match cli.aliases {
        Some(ref path) => AliasStore::load_from(path.clone()),
        None => AliasStore::load(),
    });
    let remote: Option<Arc<dyn RemoteDirectory>> = if cli.offline {
        None
    } else {
        Some(Arc::new(HttpDirectory::new(RemoteConfig::from_env())))
    };
    let engine = Arc::new(ResolutionEngine::new(
        Arc::clone(&catalog),
        aliases,
        remote,
    ));

    // ── Serve mode ──────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(server::start(&cli.host, cli.port, engine, catalog));
        return;
    }

    // ── One-shot resolution ─────────────────────────────────────

    let Some(ref query) = cli.query else {
        eprintln!("Error: No city name given.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  aviacode Ташкент");
        eprintln!("  aviacode tashkent --lang uz");
        eprintln!("  aviacode --code TAS");
        eprintln!("  aviacode --serve --port 8080");
        std::process::exit(1);
    };

    match engine.resolve(query) {
        Ok(resolution) => {
            let label = render_label(&catalog, &resolution.code, cli.lang);
            eprintln!("  resolved via {}", resolution.source);
            println!(
                "{}",
                serde_json::json!({
                    "code": resolution.code,
                    "source": resolution.source,
                    "label": label,
                })
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
