use clap::Parser;
use convoflow::prelude::*;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Asks the bot backend's `/api/bots/ask` endpoint.
struct HttpAnswerer {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpAnswerer {
    fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/api/bots/ask", base_url.trim_end_matches('/')),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .build(),
        }
    }
}

impl Answerer for HttpAnswerer {
    fn ask(&mut self, request: &AskRequest<'_>) -> std::result::Result<AskResponse, AnswerError> {
        let response = match self.agent.post(&self.endpoint).send_json(request) {
            Ok(response) => response,
            // The backend reports errors in the same JSON shape.
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(AnswerError::Transport(e.to_string())),
        };
        response
            .into_json::<AskResponse>()
            .map_err(|e| AnswerError::Decode(e.to_string()))
    }
}

enum AnyAnswerer {
    Http(HttpAnswerer),
    Offline(OfflineAnswerer),
}

impl Answerer for AnyAnswerer {
    fn ask(&mut self, request: &AskRequest<'_>) -> std::result::Result<AskResponse, AnswerError> {
        match self {
            AnyAnswerer::Http(a) => a.ask(request),
            AnyAnswerer::Offline(a) => a.ask(request),
        }
    }
}

/// Chat with a bot's conversation flow in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the bot record JSON file
    bot_path: String,

    /// Base URL of the bot backend, used for questions once the flow is over
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Overrides the bot id sent to the backend
    #[arg(long)]
    bot_id: Option<String>,

    /// Optional interpreter config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Skip the pauses between conversation steps
    #[arg(long)]
    no_pacing: bool,

    /// Only report problems in the conversation flow, then exit
    #[arg(long)]
    check: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut bot = BotRecord::from_file(&cli.bot_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to load bot '{}': {}", cli.bot_path, e))
    });
    if let Some(id) = cli.bot_id {
        bot.id = Some(id);
    }

    if cli.check {
        run_check(&bot);
        return;
    }

    let mut config = match &cli.config {
        Some(path) => InterpreterConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config '{}': {}", path, e))
        }),
        None => InterpreterConfig::realtime(),
    };
    if cli.no_pacing {
        config.pacing_mode = PacingChoice::Immediate;
    }

    let answerer = match cli.backend_url.as_deref() {
        Some(url) => AnyAnswerer::Http(HttpAnswerer::new(url)),
        None => AnyAnswerer::Offline(OfflineAnswerer),
    };

    run_chat(bot, answerer, &config);
}

fn run_check(bot: &BotRecord) {
    let graph = bot
        .graph()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert flow: {}", e)));
    let Some(graph) = graph else {
        println!("'{}' has no conversation flow.", bot.name);
        return;
    };

    println!(
        "'{}': {} nodes, {} edges",
        bot.name,
        graph.nodes().len(),
        graph.edges().len()
    );
    if let Some(entry) = graph.entry_node() {
        println!("Entry node: {} ({})", entry.id, entry.kind.name());
    }

    let issues = graph.diagnostics();
    if issues.is_empty() {
        println!("No issues found.");
    } else {
        for issue in &issues {
            println!("  - {}", issue);
        }
        std::process::exit(2);
    }
}

fn run_chat(bot: BotRecord, answerer: AnyAnswerer, config: &InterpreterConfig) {
    println!("--- Chatting with {} ---", bot.name);
    println!("Commands: /yes, /no, /option <n>, /vars, /quit\n");

    let (mut session, effects) = ChatSession::open(bot, answerer, config);
    print_effects(&effects);

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => exit_with_error(&format!("Failed to read input: {}", e)),
        }
        let input = line.trim();

        let effects = match input {
            "/quit" => break,
            "/vars" => {
                let mut variables: Vec<_> = session.interpreter().variables().iter().collect();
                variables.sort();
                for (name, value) in variables {
                    println!("  {} = {}", name, value);
                }
                continue;
            }
            "/yes" => session.press_confirmation(true),
            "/no" => session.press_confirmation(false),
            _ if input.starts_with("/option") => {
                match input.trim_start_matches("/option").trim().parse::<usize>() {
                    Ok(n) if n > 0 => session.choose_option(n - 1),
                    _ => {
                        println!("Usage: /option <n>, counting from 1");
                        continue;
                    }
                }
            }
            _ => session.send(input),
        };
        print_effects(&effects);
    }
}

fn print_effects(effects: &[Effect]) {
    for effect in effects {
        if let Some(text) = TranscriptFormatter::format_effect(effect) {
            println!("bot: {}\n", text.replace('\n', "\n     "));
        }
        if effect.is_completed() {
            println!("(conversation flow finished, questions now go to question answering)\n");
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
