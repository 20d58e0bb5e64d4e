use clap::{Parser, Subcommand};
use comic_viewer::{catalog, config, logging, output, server};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let hash = env!("COMIC_VIEWER_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{} ({hash})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "comic-viewer")]
#[command(about = "Serve a directory of comic images as a paginated web comic")]
#[command(long_about = "\
Serve a directory of comic images as a paginated web comic

The comics directory is the data source. It is rescanned on every request,
so publishing a comic is just copying a file in.

Directory layout:

  static/comics/
  ├── 2025-08-01-first.png        # Title: \"First\"
  ├── 2025-08-01-first.txt        # Optional caption (first line = alt text)
  ├── 2025-08-05-bug-fix.jpg      # Title: \"Bug Fix\"
  └── my-plain-name.webp          # No date prefix: \"My Plain Name\"

Comics are ordered by filename, so a YYYY-MM-DD- prefix keeps them in
publication order. Supported formats: png, jpg, jpeg, webp, gif.

Pages: /  (latest)   /first   /c/<n>  (zero-based)

Keyboard: ← → previous/next, f first, l latest. Swipe left/right on touch.

Run 'comic-viewer gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Configuration file (optional; missing file means defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Comics directory [env: COMICS_DIR]
    #[arg(long, global = true)]
    comics_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve {
        /// Address to bind [env: HOST]
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on [env: PORT]
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the comics in display order
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    });

    let mut overrides = config::Overrides {
        comics_dir: cli.comics_dir,
        ..Default::default()
    };

    match command {
        Command::Serve { host, port } => {
            overrides.host = host;
            overrides.port = port;
            let config = config::load_config(&cli.config, overrides)?;
            logging::init_logging(&config.logging);
            server::run(config).await?;
        }
        Command::List { json } => {
            let config = config::load_config(&cli.config, overrides)?;
            logging::init_logging(&config.logging);
            let catalog = catalog::scan(&config.comics_dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                output::print_catalog(&catalog, &config.comics_dir);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
