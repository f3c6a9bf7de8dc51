use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::{IsTerminal, stdout};
use std::path::PathBuf;

mod app;
mod cache;
mod commit;
mod config;
mod controller;
mod dataset;
mod error;
mod field;
mod lookup;
mod selection;
mod source;
mod surface;
mod widgets;

use app::{App, AppOutcome};
use commit::{CommitSink, DisplayOnlySink, HiddenValueSink};
use controller::FieldEvent;
use error::TypeaheadError;
use source::{DataSource, MatchMode, RemoteSource, StaticSource};

/// Interactive autocomplete over JSON datasets
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Interactive single-line autocomplete over local or remote JSON datasets"
)]
struct Args {
    /// Input JSON file (if not provided and no --url, reads from stdin)
    input: Option<PathBuf>,

    /// Remote lookup endpoint; the typed text is sent as a query parameter
    #[arg(long)]
    url: Option<String>,

    /// Dotted path to the display text inside each record
    #[arg(long)]
    field: Option<String>,

    /// Dotted path to the machine value committed alongside the display text
    #[arg(long = "value-field")]
    value_field: Option<String>,

    /// Matching mode for local datasets: contains, prefix, or fuzzy
    #[arg(long = "match", value_name = "MODE")]
    match_mode: Option<String>,

    /// Pre-filled field text, resolved against the dataset at startup
    #[arg(long)]
    initial: Option<String>,

    /// Minimum typed characters before a lookup runs
    #[arg(long = "min-chars")]
    min_chars: Option<usize>,

    /// Quiet period in milliseconds between typing and the lookup
    #[arg(long)]
    delay: Option<u64>,

    /// Maximum number of suggestions requested from a remote endpoint
    #[arg(long)]
    limit: Option<usize>,

    /// Query parameter the typed text is sent under
    #[arg(long = "query-var")]
    query_var: Option<String>,

    /// Placeholder shown while the field is empty
    #[arg(long, default_value = "Type to search")]
    placeholder: String,
}

fn main() -> Result<()> {
    // Writes to /tmp/typeahead-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/typeahead-debug.log")
            .expect("Failed to open /tmp/typeahead-debug.log");

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                use std::time::SystemTime;
                let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .init();

        log::debug!("=== TYPEAHEAD DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    // Load config early to avoid defaults during app initialization
    let config_result = config::load_config();
    let mut config = config_result.config;

    let args = Args::parse();
    apply_overrides(&mut config, &args);

    // Build the source before touching the terminal so load errors print
    // to a clean screen
    let source = build_source(&args, &config)?;
    let sink = build_sink(&config);

    let terminal = init_terminal()?;

    let mut app = App::new(
        source,
        sink,
        &config,
        &args.placeholder,
        args.initial.as_deref().unwrap_or(""),
    );
    app.status = config_result.warning;

    let result = run(terminal, app);

    restore_terminal()?;
    let app = result?;

    #[cfg(debug_assertions)]
    log::debug!("=== TYPEAHEAD DEBUG SESSION ENDED ===");

    // Output after terminal restore to prevent corruption
    match app.outcome {
        Some(AppOutcome::Accepted) => {
            println!("{}", app.accepted_output());
            Ok(())
        }
        _ => std::process::exit(1),
    }
}

/// Fold command-line flags over the loaded config.
fn apply_overrides(config: &mut config::Config, args: &Args) {
    if let Some(field) = &args.field {
        config.source.field = field.clone();
    }
    if let Some(value_field) = &args.value_field {
        config.source.value_field = Some(value_field.clone());
    }
    if let Some(mode) = &args.match_mode {
        config.source.match_mode = match mode.as_str() {
            "prefix" => MatchMode::Prefix,
            "fuzzy" => MatchMode::Fuzzy,
            _ => MatchMode::Contains,
        };
    }
    if let Some(url) = &args.url {
        config.remote.url = Some(url.clone());
    }
    if let Some(query_var) = &args.query_var {
        config.remote.query_var = query_var.clone();
    }
    if let Some(limit) = args.limit {
        config.remote.limit = Some(limit);
    }
    if let Some(min_chars) = args.min_chars {
        config.widget.min_chars = min_chars;
    }
    if let Some(delay) = args.delay {
        config.widget.request_delay_ms = delay;
    }
}

/// Build the data source: a remote endpoint when a URL is configured,
/// otherwise a local dataset from the file argument or piped stdin.
fn build_source(args: &Args, config: &config::Config) -> Result<Box<dyn DataSource>> {
    if let Some(url) = &config.remote.url {
        let mut source =
            RemoteSource::new(url, &config.source.field).with_query_var(&config.remote.query_var);
        if let Some(limit) = config.remote.limit {
            source = source.with_limit(limit);
        }
        if let Some(value_field) = &config.source.value_field {
            source = source.with_value_field(value_field);
        }
        return Ok(Box::new(source));
    }

    let records = if let Some(path) = &args.input {
        dataset::load_records(path)?
    } else {
        if std::io::stdin().is_terminal() {
            return Err(TypeaheadError::NoInput.into());
        }
        dataset::load_records_from_stdin()?
    };

    let mut source =
        StaticSource::new(records, &config.source.field).with_mode(config.source.match_mode);
    if let Some(value_field) = &config.source.value_field {
        source = source.with_value_field(value_field);
    }
    Ok(Box::new(source))
}

/// A hidden machine value only exists when a value field is mapped.
fn build_sink(config: &config::Config) -> Box<dyn CommitSink> {
    if config.source.value_field.is_some() {
        Box::new(HiddenValueSink::new())
    } else {
        Box::new(DisplayOnlySink)
    }
}

/// Initialize terminal with raw mode, alternate screen, bracketed paste,
/// mouse capture, and focus reporting
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableFocusChange,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(
        stdout(),
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableFocusChange,
        EnableMouseCapture
    ) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(
                stdout(),
                DisableMouseCapture,
                DisableFocusChange,
                DisableBracketedPaste,
                LeaveAlternateScreen
            );
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(
        stdout(),
        DisableMouseCapture,
        DisableFocusChange,
        DisableBracketedPaste,
        LeaveAlternateScreen
    );
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<App> {
    app.controller.attach();
    // The terminal starts focused; there is no initial FocusGained event
    app.controller.handle_event(&FieldEvent::Focus, app.now_ms());

    loop {
        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_render_flags();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    app.controller.detach();
    Ok(app)
}
