use clap::{Parser, Subcommand};
use foodscan::render::{render_analysis, render_html, render_screen, LOADING};
use foodscan::{
    AnalysisResult, ImageSource, IngredientScanner, IngredientScannerBuilder, Mode, Provider,
    ScanError, ScanScreen,
};
use log::error;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "foodscan")]
#[command(about = "Scan a food label and explain its ingredients", long_about = None)]
struct Cli {
    /// LLM provider (anthropic or openai)
    #[arg(long, global = true)]
    provider: Option<Provider>,

    /// Model name (defaults to the configured model)
    #[arg(long, global = true)]
    model: Option<String>,

    /// API key (defaults to config file or environment)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Also write the result as an HTML report to this file
    #[arg(long, global = true)]
    html: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a photo of an ingredient label
    Image {
        /// Path to a jpg, png, gif or webp image
        path: String,
    },
    /// Analyze an ingredient list ("-" reads it from stdin)
    Text {
        text: String,
    },
    /// Drive the scanner screen from the terminal
    Interactive,
}

impl Cli {
    fn builder(&self) -> IngredientScannerBuilder {
        let mut builder = IngredientScanner::builder();
        if let Some(provider) = self.provider {
            builder = builder.provider(provider);
        }
        if let Some(model) = &self.model {
            builder = builder.model(model.clone());
        }
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key.clone());
        }
        builder
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), ScanError> {
    let result = match &cli.command {
        Commands::Image { path } => cli.builder().image(path.clone()).build().await?,
        Commands::Text { text } => {
            let text = if text == "-" {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf).map_err(|e| {
                    ScanError::InvalidInput(format!("Failed to read stdin: {}", e))
                })?;
                buf
            } else {
                text.clone()
            };
            cli.builder().text(text).build().await?
        }
        Commands::Interactive => return interactive(cli).await,
    };

    print_result(cli, &result)
}

fn print_result(cli: &Cli, result: &AnalysisResult) -> Result<(), ScanError> {
    if cli.json {
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| ScanError::Analysis(e.to_string()))?;
        println!("{}", json);
    } else {
        print!("{}", render_analysis(result));
    }

    write_html(cli, result)
}

fn write_html(cli: &Cli, result: &AnalysisResult) -> Result<(), ScanError> {
    if let Some(path) = &cli.html {
        std::fs::write(path, render_html(result)).map_err(|e| {
            ScanError::InvalidInput(format!("Failed to write {}: {}", path.display(), e))
        })?;
    }

    Ok(())
}

/// Emit the extra outputs for a result the screen just produced
fn report(cli: &Cli, screen: &ScanScreen) {
    let Some(result) = screen.analysis().filter(|_| screen.mode() == Mode::Results) else {
        return;
    };

    if cli.json {
        match serde_json::to_string_pretty(result) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize result: {}", e),
        }
    }
    if let Err(e) = write_html(cli, result) {
        error!("{}", e);
    }
}

const HELP: &str = "Commands: scan <image path> | paste | submit | cancel | dismiss | reset | quit";

async fn interactive(cli: &Cli) -> Result<(), ScanError> {
    let mut screen = cli.builder().into_screen()?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}\n{}\n> ", render_screen(&screen), HELP);
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            return Ok(());
        };

        let (command, arg) = match line.trim().split_once(' ') {
            Some((command, arg)) => (command.to_string(), arg.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        };

        match command.as_str() {
            "scan" if !arg.is_empty() => {
                println!("{}", LOADING);
                screen.scan_image(&ImageSource::Path(arg)).await;
                report(cli, &screen);
            }
            "paste" => {
                screen.open_text_input();
                println!("Enter ingredients, finish with an empty line:");
                let mut text = Vec::new();
                for line in lines.by_ref() {
                    let Ok(line) = line else { break };
                    if line.trim().is_empty() {
                        break;
                    }
                    text.push(line);
                }
                screen.set_text_input(text.join("\n"));
            }
            "submit" => {
                if screen.has_text_input() {
                    println!("{}", LOADING);
                }
                if screen.submit_text().await {
                    report(cli, &screen);
                } else {
                    println!("Nothing to analyze. Use paste to enter ingredients first.");
                }
            }
            "cancel" => screen.close_text_input(),
            "dismiss" => screen.dismiss_error(),
            "reset" => screen.reset(),
            "quit" | "exit" => return Ok(()),
            _ => println!("{}", HELP),
        }
    }
}
