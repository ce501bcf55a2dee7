//! md2wechat - Main Entry Point
//!
//! Command-line front end: renders markdown with the selected theme and
//! copies it as inline-styled HTML, ready to paste into the WeChat editor.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{error, info, warn};

use md2wechat::error::{Error, Result};
use md2wechat::export::{
    copy_wechat_html, generate_html_document, prepare_export, ClipboardWriter, ExportOptions,
    MarkupScope, ScratchDocument, SystemClipboard,
};
use md2wechat::markdown::{render_document, RenderOptions};
use md2wechat::storage::{FileStore, Storage, StorageKey};
use md2wechat::style::ThemeCascade;
use md2wechat::theme::{import_theme_json, Theme, ThemeManager};

/// Application name constant.
const APP_NAME: &str = "md2wechat";

// ─────────────────────────────────────────────────────────────────────────────
// Command Line
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = APP_NAME, version, about = "Render markdown as WeChat-ready HTML")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the inlined HTML to stdout
    Render(SourceArgs),
    /// Copy the inlined HTML to the clipboard
    Copy(SourceArgs),
    /// Write a standalone preview page
    Preview {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Page title
        #[arg(long)]
        title: Option<String>,
    },
    /// Save a markdown file as the current document
    Save {
        /// Markdown file, `-` for stdin
        file: PathBuf,
    },
    /// Manage themes
    #[command(subcommand)]
    Theme(ThemeCommand),
    /// Switch the editor's dark mode
    DarkMode {
        #[arg(value_enum)]
        state: Switch,
    },
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// List available themes
    List,
    /// Select a theme
    Use { id: String },
    /// Import a theme from a JSON file
    Import { file: PathBuf },
    /// Remove a custom theme
    Remove { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
    Toggle,
}

#[derive(Args)]
struct SourceArgs {
    /// Markdown file, `-` for stdin (the saved document if omitted)
    file: Option<PathBuf>,
    /// Theme id (the selected theme if omitted)
    #[arg(long)]
    theme: Option<String>,
    /// Export only the article's contents, without its root element
    #[arg(long)]
    inner: bool,
    /// Escape raw HTML in the markdown instead of passing it through
    #[arg(long)]
    no_html: bool,
    /// Do not treat single newlines as line breaks
    #[arg(long)]
    no_breaks: bool,
    /// Do not turn bare URLs into links
    #[arg(long)]
    no_linkify: bool,
}

impl SourceArgs {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            html: !self.no_html,
            breaks: !self.no_breaks,
            linkify: !self.no_linkify,
        }
    }

    fn export_options(&self) -> ExportOptions {
        let markup = if self.inner {
            MarkupScope::Inner
        } else {
            MarkupScope::Outer
        };
        ExportOptions::default().with_markup(markup)
    }

    fn markdown(&self, storage: &Storage<FileStore>) -> Result<String> {
        match &self.file {
            Some(path) => read_source(path),
            None => Ok(storage.get(StorageKey::Content, String::new())),
        }
    }

    fn theme<'m>(&self, manager: &'m ThemeManager) -> Result<&'m Theme> {
        match &self.theme {
            Some(id) => manager
                .get(id)
                .ok_or_else(|| Error::ThemeNotFound(id.clone())),
            None => Ok(manager.current()),
        }
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run a command. `Ok(false)` means it completed but did not succeed.
fn run(command: Command) -> Result<bool> {
    let mut storage = Storage::new(FileStore::open_default()?);
    let mut manager = ThemeManager::load(&storage);

    match command {
        Command::Render(source) => {
            let payload = export(&source, &storage, &manager)?;
            println!("{}", payload.html);
            Ok(true)
        }
        Command::Copy(source) => copy(&source, &storage, &manager),
        Command::Preview {
            source,
            output,
            title,
        } => {
            let payload = export(&source, &storage, &manager)?;
            let page = generate_html_document(&payload, title.as_deref(), manager.is_dark_mode());
            match output {
                Some(path) => {
                    fs::write(&path, page)?;
                    info!("Preview written to {}", path.display());
                }
                None => println!("{}", page),
            }
            Ok(true)
        }
        Command::Save { file } => {
            let markdown = read_source(&file)?;
            Ok(storage.set(StorageKey::Content, &markdown))
        }
        Command::Theme(ThemeCommand::List) => {
            for theme in manager.all() {
                let marker = if theme.id == manager.current_id() { "*" } else { " " };
                let kind = if theme.is_custom { " (custom)" } else { "" };
                println!("{} {:<16} {}{}", marker, theme.id, theme.name, kind);
            }
            Ok(true)
        }
        Command::Theme(ThemeCommand::Use { id }) => {
            manager.select(&id)?;
            Ok(manager.save(&mut storage))
        }
        Command::Theme(ThemeCommand::Import { file }) => {
            let theme = import_theme_json(&read_source(&file)?)?;
            info!("Imported theme {} ({})", theme.id, theme.name);
            manager.add_custom(theme)?;
            Ok(manager.save(&mut storage))
        }
        Command::Theme(ThemeCommand::Remove { id }) => {
            manager.remove_custom(&id)?;
            Ok(manager.save(&mut storage))
        }
        Command::DarkMode { state } => {
            match state {
                Switch::On => manager.set_dark_mode(true),
                Switch::Off => manager.set_dark_mode(false),
                Switch::Toggle => {
                    manager.toggle_dark_mode();
                }
            }
            info!("Dark mode {}", if manager.is_dark_mode() { "on" } else { "off" });
            Ok(manager.save(&mut storage))
        }
    }
}

fn export(
    source: &SourceArgs,
    storage: &Storage<FileStore>,
    manager: &ThemeManager,
) -> Result<md2wechat::export::ClipboardPayload> {
    let markdown = source.markdown(storage)?;
    let root = render_document(&markdown, &source.render_options());
    let cascade = ThemeCascade::new(source.theme(manager)?);
    Ok(prepare_export(&root, &cascade, &source.export_options()))
}

fn copy(source: &SourceArgs, storage: &Storage<FileStore>, manager: &ThemeManager) -> Result<bool> {
    let markdown = source.markdown(storage)?;
    let root = render_document(&markdown, &source.render_options());
    let cascade = ThemeCascade::new(source.theme(manager)?);
    let options = source.export_options();

    let copied = match SystemClipboard::new() {
        Ok(clipboard) => {
            // The process exits right after copying, so it must hold the
            // clipboard until another program takes it over
            let mut clipboard = clipboard.wait_until_replaced(true);
            let mut writer = ClipboardWriter::new().with_structured(&mut clipboard);
            copy_wechat_html(&root, &cascade, &options, &mut writer)
        }
        Err(e) => {
            warn!("{}, falling back to selection copy", e);
            let mut scratch = ScratchDocument::new();
            let mut writer = ClipboardWriter::new().with_selection(&mut scratch);
            copy_wechat_html(&root, &cascade, &options, &mut writer)
        }
    };

    if copied {
        info!("Copied with theme {}", cascade.theme().name);
    }
    Ok(copied)
}
