// SPDX-License-Identifier: MIT
//
// palette-forge: a color palette generator for the terminal.
//
// This is the main binary that wires together the crates:
//
//   pf-color   → hex / RGB / HSL conversion, display formats, random sources
//   pf-palette → generators, contrast scoring, session, library, share links
//
// Every invocation is one short transaction against the data directory:
//
//   load config → load session (+ library) → apply command → save → print
//
// The session is the palette being worked on (colors, locks, settings). The
// library holds palettes the user chose to keep. Both are JSON documents in
// the data directory, written through pf-palette's `FileStore`.

mod config;
mod render;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use pf_color::{ColorFormat, RandomSource, Rgb, ThreadRandom, Xorshift32, format_color};
use pf_palette::contrast::{contrast_ratio, contrasting_text_color, relative_luminance};
use pf_palette::share::{colors_from_link, share_url};
use pf_palette::store::{STATE_KEY, Store};
use pf_palette::{
    ContrastResult, FileStore, Library, Mood, PaletteSession, PaletteStrategy, PaletteUpdate,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "palette-forge", version, about = "Generate, tune and keep color palettes")]
struct Cli {
    /// Config file (default: <config dir>/palette-forge/config.toml).
    #[arg(long, global = true, env = "PALETTE_FORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Where the session and library are stored.
    #[arg(long, global = true, env = "PALETTE_FORGE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Never emit color escapes.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a new palette, keeping locked colors.
    Generate(GenerateArgs),
    /// Show the current palette.
    Show,
    /// Toggle the lock on one or more positions (1-based).
    Lock {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Replace the color at a position (1-based).
    Set { position: usize, color: String },
    /// Change how colors are displayed.
    Format { format: ColorFormat },
    /// Show a color in every notation, with its luminance and text color.
    Convert { color: String },
    /// WCAG contrast between two colors.
    Contrast { first: String, second: String },
    /// Print a share link for the current palette.
    Share {
        /// Link base; overrides `share_base` from the config.
        #[arg(long)]
        base: Option<String>,
    },
    /// Load a palette from a share link, query string or `RRGGBB-RRGGBB` value.
    Open { link: String },
    /// Save the current palette to the library.
    Save {
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List saved palettes, newest first.
    List {
        #[arg(long)]
        favorites: bool,
    },
    /// Make a saved palette the current one.
    Load { id: String },
    /// Remove a saved palette.
    Delete { id: String },
    /// Toggle the favorite mark on a saved palette.
    Favorite { id: String },
    /// Rename, retag or recolor a saved palette.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Replaces all tags.
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        /// Replace the colors with the current palette.
        #[arg(long)]
        from_current: bool,
    },
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Number of colors.
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=256))]
    count: Option<u16>,

    /// random, analogous, monochromatic, triadic, complementary,
    /// split-complementary or tetradic. Clears any mood unless --mood is given.
    #[arg(short, long, value_parser = lenient_strategy)]
    strategy: Option<PaletteStrategy>,

    /// calm, energetic, professional, playful, nature or sunset.
    #[arg(short, long, value_parser = lenient_mood, conflicts_with = "no_mood")]
    mood: Option<Mood>,

    /// Stop using the current mood.
    #[arg(long)]
    no_mood: bool,

    /// Base color for rule-based strategies.
    #[arg(short, long, conflicts_with = "no_base")]
    base: Option<String>,

    /// Stop using the current base color.
    #[arg(long)]
    no_base: bool,

    /// Seed for a reproducible palette.
    #[arg(long)]
    seed: Option<u32>,

    /// Release all locks before generating.
    #[arg(long)]
    unlock_all: bool,
}

// Unknown names degrade instead of failing, same as stored settings.
#[allow(clippy::unnecessary_wraps)]
fn lenient_strategy(s: &str) -> Result<PaletteStrategy, String> {
    Ok(PaletteStrategy::parse_lenient(s))
}

#[allow(clippy::unnecessary_wraps)]
fn lenient_mood(s: &str) -> Result<Mood, String> {
    Ok(Mood::parse_lenient(s))
}

// ─── Application ────────────────────────────────────────────────────────────

struct App {
    config: Config,
    store: FileStore,
    color: bool,
}

impl App {
    fn new(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => config.data_dir()?,
        };
        debug!(data_dir = %data_dir.display(), "opening store");
        let color = !cli.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal();
        Ok(Self { config, store: FileStore::new(data_dir), color })
    }

    /// The stored session, or a fresh one seeded from the config.
    fn session(&self) -> Result<PaletteSession> {
        if self.store.get(STATE_KEY)?.is_none() {
            let mut session = PaletteSession::new();
            self.config.seed_session(&mut session);
            return Ok(session);
        }
        Ok(PaletteSession::load(&self.store))
    }

    fn save_session(&mut self, session: &PaletteSession) -> Result<()> {
        session.save(&mut self.store).context("failed to save session")
    }

    fn library(&self) -> Library {
        Library::load(&self.store)
    }

    fn save_library(&mut self, library: &Library) -> Result<()> {
        library.save(&mut self.store).context("failed to save library")
    }

    fn run(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Generate(args) => self.generate(args, out),
            Command::Show => {
                let mut session = self.session()?;
                if session.colors.is_empty() {
                    session.generate(&mut ThreadRandom);
                    self.save_session(&session)?;
                }
                render::session(out, &session, self.color)?;
                Ok(())
            }
            Command::Lock { positions } => {
                let mut session = self.session()?;
                for position in positions {
                    let locked = session
                        .toggle_lock(index(position)?)
                        .with_context(|| format!("cannot lock position {position}"))?;
                    info!(position, locked, "toggled lock");
                }
                self.save_session(&session)?;
                render::session(out, &session, self.color)?;
                Ok(())
            }
            Command::Set { position, color } => {
                let mut session = self.session()?;
                session
                    .set_color(index(position)?, &color)
                    .with_context(|| format!("cannot set position {position}"))?;
                self.save_session(&session)?;
                render::session(out, &session, self.color)?;
                Ok(())
            }
            Command::Format { format } => {
                let mut session = self.session()?;
                session.format = format;
                self.save_session(&session)?;
                render::session(out, &session, self.color)?;
                Ok(())
            }
            Command::Convert { color } => convert(&color, self.color, out),
            Command::Contrast { first, second } => contrast(&first, &second, out),
            Command::Share { base } => {
                let session = self.session()?;
                if session.colors.is_empty() {
                    bail!("nothing to share; generate a palette first");
                }
                let base = base.as_deref().unwrap_or(&self.config.share_base);
                let url = share_url(base, &session.colors)
                    .with_context(|| format!("invalid share base '{base}'"))?;
                writeln!(out, "{url}")?;
                Ok(())
            }
            Command::Open { link } => {
                let colors = colors_from_link(&link).context("no valid colors in link")?;
                let mut session = self.session()?;
                session.load_colors(colors, "");
                self.save_session(&session)?;
                render::session(out, &session, self.color)?;
                Ok(())
            }
            Command::Save { name, tags } => {
                let mut session = self.session()?;
                if session.colors.is_empty() {
                    bail!("nothing to save; generate a palette first");
                }
                let mut library = self.library();
                let saved = library.add(&session.colors, name.as_deref(), tags);
                let (id, saved_name) = (saved.id.clone(), saved.name.clone());
                self.save_library(&library)?;
                session.name = saved_name.clone();
                self.save_session(&session)?;
                writeln!(out, "Saved \"{saved_name}\" as {id}")?;
                Ok(())
            }
            Command::List { favorites } => {
                let library = self.library();
                let entries: Vec<_> = if favorites {
                    library.favorites().collect()
                } else {
                    library.iter().collect()
                };
                if entries.is_empty() {
                    writeln!(out, "No saved palettes.")?;
                }
                for entry in entries {
                    render::saved(out, entry, self.color)?;
                }
                Ok(())
            }
            Command::Load { id } => {
                let library = self.library();
                let entry = library.find(&id)?;
                let mut session = self.session()?;
                session.load_colors(entry.colors.clone(), entry.name.clone());
                self.save_session(&session)?;
                render::session(out, &session, self.color)?;
                Ok(())
            }
            Command::Delete { id } => {
                let mut library = self.library();
                let entry = library.find(&id)?;
                let (id, name) = (entry.id.clone(), entry.name.clone());
                library.delete(&id);
                self.save_library(&library)?;
                writeln!(out, "Deleted \"{name}\"")?;
                Ok(())
            }
            Command::Favorite { id } => {
                let mut library = self.library();
                let id = library.find(&id)?.id.clone();
                let favorite = library.toggle_favorite(&id).unwrap_or(false);
                self.save_library(&library)?;
                writeln!(out, "{}", if favorite { "Marked as favorite" } else { "Unmarked" })?;
                Ok(())
            }
            Command::Edit { id, name, tags, from_current } => {
                let mut library = self.library();
                let id = library.find(&id)?.id.clone();
                let colors = if from_current {
                    let session = self.session()?;
                    if session.colors.is_empty() {
                        bail!("no current palette to copy colors from");
                    }
                    Some(session.colors)
                } else {
                    None
                };
                library.update(&id, PaletteUpdate { name, tags, colors });
                self.save_library(&library)?;
                if let Some(entry) = library.get(&id) {
                    render::saved(out, entry, self.color)?;
                }
                Ok(())
            }
        }
    }

    fn generate(&mut self, args: GenerateArgs, out: &mut impl Write) -> Result<()> {
        let mut session = self.session()?;

        if let Some(count) = args.count {
            session.count = usize::from(count);
        }
        if let Some(strategy) = args.strategy {
            session.strategy = strategy;
            session.mood = None;
        }
        if let Some(mood) = args.mood {
            session.mood = Some(mood);
        } else if args.no_mood {
            session.mood = None;
        }
        if args.no_base {
            session.set_base_color(None)?;
        } else if let Some(base) = &args.base {
            session.set_base_color(Some(base))?;
        }
        if args.unlock_all {
            session.locked.clear();
        }

        let mut rng: Box<dyn RandomSource> = match args.seed {
            Some(seed) => Box::new(Xorshift32::new(seed)),
            None => Box::new(ThreadRandom),
        };
        session.generate(rng.as_mut());
        session.name.clear();
        info!(
            strategy = %session.strategy,
            mood = ?session.mood,
            count = session.count,
            "generated palette"
        );

        self.save_session(&session)?;
        render::session(out, &session, self.color)?;
        Ok(())
    }
}

/// 1-based position from the command line to a palette index.
fn index(position: usize) -> Result<usize> {
    position.checked_sub(1).context("positions start at 1")
}

fn convert(color: &str, painted: bool, out: &mut impl Write) -> Result<()> {
    let rgb: Rgb = color.parse()?;
    let hex = rgb.to_hex();
    if painted {
        render::swatch(out, &hex, &hex)?;
        writeln!(out)?;
    }
    for format in ColorFormat::all() {
        writeln!(out, "{:<10} {}", format.name(), format_color(&hex, *format))?;
    }
    writeln!(out, "{:<10} {:.4}", "luminance", relative_luminance(&hex))?;
    let text = contrasting_text_color(&hex);
    writeln!(out, "{:<10} {text} ({})", "text", ContrastResult::between(&hex, text))?;
    Ok(())
}

fn contrast(first: &str, second: &str, out: &mut impl Write) -> Result<()> {
    let a = first.parse::<Rgb>()?.to_hex();
    let b = second.parse::<Rgb>()?.to_hex();
    let result = ContrastResult::from_ratio(contrast_ratio(&a, &b));
    writeln!(
        out,
        "{a} / {b}: {:.2}:1  {} ({})",
        result.ratio,
        result.level,
        result.level.label()
    )?;
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let mut cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.take().unwrap_or(Command::Show);
    let result = App::new(&cli).and_then(|mut app| {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        app.run(command, &mut out)
    });

    if let Err(e) = result {
        eprintln!("palette-forge: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    // ── Helpers ───────────────────────────────────────────────────────────

    fn app(dir: &tempfile::TempDir) -> App {
        App {
            config: Config::default(),
            store: FileStore::new(dir.path()),
            color: false,
        }
    }

    fn parse(args: &[&str]) -> Command {
        let cli = Cli::try_parse_from(std::iter::once("palette-forge").chain(args.iter().copied()))
            .unwrap();
        cli.command.unwrap()
    }

    /// Run a command line against `app`, returning stdout.
    fn run(app: &mut App, args: &[&str]) -> Result<String> {
        let mut out = Vec::new();
        app.run(parse(args), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    // ── Parsing ───────────────────────────────────────────────────────────

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn unknown_strategy_degrades_to_random() {
        let Command::Generate(args) = parse(&["generate", "--strategy", "wobbly"]) else {
            panic!("expected generate");
        };
        assert_eq!(args.strategy, Some(PaletteStrategy::Random));
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(Cli::try_parse_from(["palette-forge", "generate", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["palette-forge", "generate", "-n", "257"]).is_err());
        assert!(Cli::try_parse_from(["palette-forge", "generate", "-n", "256"]).is_ok());
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(index(1).unwrap(), 0);
        assert!(index(0).is_err());
    }

    // ── Commands ──────────────────────────────────────────────────────────

    #[test]
    fn generate_persists_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let out = run(&mut app, &["generate", "-n", "4", "--seed", "7"]).unwrap();
        assert_eq!(out.lines().count(), 5);

        let session = app.session().unwrap();
        assert_eq!(session.colors.len(), 4);
        assert_eq!(session.count, 4);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        run(&mut app, &["generate", "-m", "calm", "--seed", "11"]).unwrap();
        let first = app.session().unwrap().colors;
        run(&mut app, &["generate", "--seed", "11"]).unwrap();
        assert_eq!(app.session().unwrap().colors, first);
    }

    #[test]
    fn strategy_flag_clears_mood() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        run(&mut app, &["generate", "-m", "sunset"]).unwrap();
        assert_eq!(app.session().unwrap().mood, Some(Mood::Sunset));
        run(&mut app, &["generate", "-s", "analogous"]).unwrap();
        assert_eq!(app.session().unwrap().mood, None);
    }

    #[test]
    fn lock_survives_generate() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        run(&mut app, &["generate", "-n", "3"]).unwrap();
        run(&mut app, &["set", "2", "abcdef"]).unwrap();
        run(&mut app, &["lock", "2"]).unwrap();
        run(&mut app, &["generate"]).unwrap();
        let session = app.session().unwrap();
        assert_eq!(session.colors[1], "#ABCDEF");
        assert!(session.is_locked(1));
    }

    #[test]
    fn lock_out_of_range_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        run(&mut app, &["generate", "-n", "2"]).unwrap();
        assert!(run(&mut app, &["lock", "3"]).is_err());
    }

    #[test]
    fn share_and_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        run(&mut app, &["open", "112233-445566"]).unwrap();
        let link = run(&mut app, &["share", "--base", "https://example.org/"]).unwrap();
        assert_eq!(link.trim(), "https://example.org/?colors=112233-445566");

        run(&mut app, &["generate"]).unwrap();
        run(&mut app, &["open", link.trim()]).unwrap();
        assert_eq!(app.session().unwrap().colors, vec!["#112233".to_owned(), "#445566".to_owned()]);
    }

    #[test]
    fn open_without_colors_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        assert!(run(&mut app, &["open", "https://example.org/"]).is_err());
    }

    #[test]
    fn library_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        run(&mut app, &["open", "112233-445566"]).unwrap();
        let saved = run(&mut app, &["save", "--tag", "dark"]).unwrap();
        assert!(saved.starts_with("Saved \"Palette 1\""), "{saved}");

        let id = app.library().iter().next().unwrap().id.clone();
        let short = &id[..8];

        run(&mut app, &["favorite", short]).unwrap();
        let favorites = run(&mut app, &["list", "--favorites"]).unwrap();
        assert!(favorites.contains("Palette 1"));

        run(&mut app, &["edit", short, "--name", "Night"]).unwrap();
        run(&mut app, &["generate"]).unwrap();
        run(&mut app, &["load", short]).unwrap();
        let session = app.session().unwrap();
        assert_eq!(session.name, "Night");
        assert_eq!(session.colors, vec!["#112233".to_owned(), "#445566".to_owned()]);

        run(&mut app, &["delete", short]).unwrap();
        assert!(app.library().is_empty());
        assert_eq!(run(&mut app, &["list"]).unwrap(), "No saved palettes.\n");
    }

    #[test]
    fn config_seeds_first_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.config = Config::parse("count = 3\nformat = \"rgb\"").unwrap();
        let out = run(&mut app, &["show"]).unwrap();
        assert!(out.contains("rgb("), "{out}");
        assert_eq!(app.session().unwrap().colors.len(), 3);
    }

    #[test]
    fn convert_prints_every_format() {
        let mut out = Vec::new();
        convert("3366cc", false, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("#3366CC"));
        assert!(out.contains("rgb(51, 102, 204)"));
        assert!(out.contains("hsl(220, 60%, 50%)"));
        assert!(out.contains("#FFFFFF"));
    }

    #[test]
    fn contrast_reports_level() {
        let mut out = Vec::new();
        contrast("#000000", "fff", &mut out).unwrap_err();
        contrast("#000000", "ffffff", &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "#000000 / #FFFFFF: 21.00:1  AAA (Excellent)\n");
    }
}
