use egomap::render::raster::{self, RasterOptions};
use egomap::render::{MapScene, render_map_svg};
use egomap::{
    EXPORT_JSON_FILE_NAME, EXPORT_PNG_FILE_NAME, ImportError, SaveSlot, SlotStatus,
    StakeholderRecord, export_records, import_records,
};
use egomap_render::layout_map;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Import(ImportError),
    Raster(raster::RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Import(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ImportError> for CliError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<raster::RasterError> for CliError {
    fn from(value: raster::RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Layout,
    List,
    Save,
    Load,
    Export,
    Import,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    viewport_width: f64,
    viewport_height: f64,
    slot: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "egomap-cli\n\
\n\
USAGE:\n\
  egomap-cli [render] [--format svg|png] [--scale <n>] [--background <css-color>] [--viewport-width <w>] [--viewport-height <h>] [--out <path>] [<records.json>|-]\n\
  egomap-cli layout [--pretty] [--viewport-width <w>] [--viewport-height <h>] [<records.json>|-]\n\
  egomap-cli list [<records.json>|-]\n\
  egomap-cli save [--slot <path>] [<records.json>|-]\n\
  egomap-cli load [--slot <path>]\n\
  egomap-cli export [--out <path>] [<records.json>|-]\n\
  egomap-cli import [--slot <path>] [<records.json>|-]\n\
\n\
NOTES:\n\
  - If <records.json> is omitted or '-', input is read from stdin.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing stakeholder-map.png next to the input\n\
    (or ./stakeholder-map.png for stdin) at 2x pixel density.\n\
  - export writes stakeholders.json next to the input unless --out is given.\n\
  - save/load/import operate on a single slot file (default ./egomap_items.json).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 2.0,
        viewport_width: 900.0,
        viewport_height: 640.0,
        ..Args::default()
    };

    let mut it = argv.iter().peekable();
    if let Some(first) = it.peek() {
        let command = match first.as_str() {
            "render" => Some(Command::Render),
            "layout" => Some(Command::Layout),
            "list" => Some(Command::List),
            "save" => Some(Command::Save),
            "load" => Some(Command::Load),
            "export" => Some(Command::Export),
            "import" => Some(Command::Import),
            _ => None,
        };
        if let Some(command) = command {
            args.command = command;
            it.next();
        }
    }

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--format" => {
                let value = it.next().ok_or(CliError::Usage("--format needs a value"))?;
                args.render_format = value
                    .parse()
                    .map_err(|_| CliError::Usage("--format must be svg or png"))?;
            }
            "--scale" => {
                let value = it.next().ok_or(CliError::Usage("--scale needs a value"))?;
                args.render_scale = value
                    .parse()
                    .map_err(|_| CliError::Usage("--scale must be a number"))?;
            }
            "--background" => {
                let value = it
                    .next()
                    .ok_or(CliError::Usage("--background needs a value"))?;
                args.background = Some(value.clone());
            }
            "--viewport-width" => {
                let value = it
                    .next()
                    .ok_or(CliError::Usage("--viewport-width needs a value"))?;
                args.viewport_width = value
                    .parse()
                    .map_err(|_| CliError::Usage("--viewport-width must be a number"))?;
            }
            "--viewport-height" => {
                let value = it
                    .next()
                    .ok_or(CliError::Usage("--viewport-height needs a value"))?;
                args.viewport_height = value
                    .parse()
                    .map_err(|_| CliError::Usage("--viewport-height must be a number"))?;
            }
            "--slot" => {
                let value = it.next().ok_or(CliError::Usage("--slot needs a value"))?;
                args.slot = Some(value.clone());
            }
            "--out" => {
                let value = it.next().ok_or(CliError::Usage("--out needs a value"))?;
                args.out = Some(value.clone());
            }
            other if other.starts_with("--") => {
                return Err(CliError::Usage("unknown option (see --help)"));
            }
            _ => {
                if args.input.is_some() {
                    return Err(CliError::Usage("multiple input paths given"));
                }
                args.input = Some(arg.clone());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn read_records(input: Option<&str>) -> Result<Vec<StakeholderRecord>, CliError> {
    let text = read_input(input)?;
    Ok(import_records(&text)?)
}

fn slot_from(args: &Args) -> SaveSlot {
    match args.slot.as_deref() {
        Some(path) => SaveSlot::new(path),
        None => SaveSlot::new(egomap::slot::DEFAULT_SLOT_FILE_NAME),
    }
}

fn default_sibling_path(input: Option<&str>, file_name: &str) -> PathBuf {
    match input {
        Some(path) if path != "-" => Path::new(path)
            .parent()
            .map(|dir| dir.join(file_name))
            .unwrap_or_else(|| PathBuf::from(file_name)),
        _ => PathBuf::from(file_name),
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    match args.command {
        Command::Render => {
            let records = read_records(args.input.as_deref())?;
            match args.render_format {
                RenderFormat::Svg => {
                    let scene =
                        MapScene::new(&records, args.viewport_width, args.viewport_height);
                    let svg = render_map_svg(&scene);
                    if svg.is_empty() {
                        eprintln!("Zero-size viewport; nothing to render.");
                        return Ok(());
                    }
                    match args.out.as_deref() {
                        Some(path) => std::fs::write(path, svg)?,
                        None => print!("{svg}"),
                    }
                }
                RenderFormat::Png => {
                    let raster = RasterOptions {
                        scale: args.render_scale,
                        background: args.background.clone(),
                    };
                    let Some(bytes) = raster::render_png_sync(
                        &records,
                        args.viewport_width,
                        args.viewport_height,
                        &raster,
                    )?
                    else {
                        eprintln!("Zero-size viewport; nothing to render.");
                        return Ok(());
                    };
                    let out = args
                        .out
                        .as_deref()
                        .map(PathBuf::from)
                        .unwrap_or_else(|| {
                            default_sibling_path(args.input.as_deref(), EXPORT_PNG_FILE_NAME)
                        });
                    std::fs::write(&out, bytes)?;
                    eprintln!("Wrote {}", out.display());
                }
            }
        }
        Command::Layout => {
            let records = read_records(args.input.as_deref())?;
            let layout = layout_map(&records, args.viewport_width, args.viewport_height);
            let json = if args.pretty {
                serde_json::to_string_pretty(&layout)?
            } else {
                serde_json::to_string(&layout)?
            };
            println!("{json}");
        }
        Command::List => {
            let records = read_records(args.input.as_deref())?;
            println!(
                "{:<24} {:<16} {:>10} {:>9} {:>8}",
                "NAME", "CATEGORY", "IMPORTANCE", "PROXIMITY", "STRENGTH"
            );
            for r in &records {
                println!(
                    "{:<24} {:<16} {:>10} {:>9} {:>8}",
                    r.name, r.category, r.importance, r.proximity, r.strength
                );
            }
        }
        Command::Save => {
            let records = read_records(args.input.as_deref())?;
            let slot = slot_from(args);
            slot.save(&records)?;
            eprintln!("Saved {} record(s) to {}", records.len(), slot.path().display());
        }
        Command::Load => {
            let slot = slot_from(args);
            match slot.load()? {
                SlotStatus::Empty => eprintln!("Nothing saved yet."),
                SlotStatus::Loaded(records) => {
                    println!("{}", export_records(&records));
                }
            }
        }
        Command::Export => {
            let records = read_records(args.input.as_deref())?;
            let out = args
                .out
                .as_deref()
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    default_sibling_path(args.input.as_deref(), EXPORT_JSON_FILE_NAME)
                });
            std::fs::write(&out, export_records(&records))?;
            eprintln!("Wrote {}", out.display());
        }
        Command::Import => {
            // Shape/parse failures abort before the slot is touched, so the
            // saved records stay unchanged on a bad import.
            let records = read_records(args.input.as_deref())?;
            let slot = slot_from(args);
            slot.save(&records)?;
            eprintln!(
                "Imported {} record(s) into {}",
                records.len(),
                slot.path().display()
            );
        }
    }
    Ok(())
}

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    if let Err(err) = run(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
