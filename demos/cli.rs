//! Command-line interface for palette_extract
//!
//! Extracts a palette from an image and prints it as a role table with
//! color theory suggestions, or in one of the export formats.

use palette_extract::{
    export, image_loader, ColorTheory, Palette, PaletteAssembler, PaletteConfig, PaletteError,
    SortKey,
};
use std::{env, path::Path, process};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputFormat {
    Table,
    Css,
    Hex,
    Json,
}

fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config = PaletteConfig::default();
    let mut format = OutputFormat::Table;
    let mut image_path_arg = None;
    let mut overrides: Vec<(String, String)> = Vec::new();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--colors" | "--sort" | "--seed" | "--format" | "--config" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires a value", args[i]);
                    process::exit(1);
                };
                overrides.push((args[i].clone(), value.clone()));
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    // A config file is the base; explicit flags win over it
    if let Some((_, path)) = overrides.iter().find(|(flag, _)| flag == "--config") {
        config = PaletteConfig::from_json_file(Path::new(path)).unwrap_or_else(|e| fail(&e));
    }
    for (flag, value) in &overrides {
        let applied = match flag.as_str() {
            "--colors" => parse_value(flag, value).map(|n| config.color_count = n),
            "--seed" => parse_value(flag, value).map(|s| config.seed = s),
            "--sort" => value.parse::<SortKey>().map(|key| config.sort_key = key),
            "--format" => parse_format(value).map(|f| format = f),
            _ => Ok(()),
        };
        if let Err(e) = applied {
            fail(&e);
        }
    }

    let image_path_str = match image_path_arg {
        Some(path) => path,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let image_path = Path::new(&image_path_str);

    if !image_path.exists() {
        eprintln!("Error: File '{}' does not exist", image_path.display());
        process::exit(1);
    }

    let palette = config
        .validate()
        .and_then(|_| image_loader::load_image(image_path))
        .and_then(|image| PaletteAssembler::build_with(&image, &config))
        .unwrap_or_else(|e| fail(&e));

    match format {
        OutputFormat::Table => print_table(&palette),
        OutputFormat::Css => print!("{}", export::css_variables(&palette)),
        OutputFormat::Hex => println!("{}", export::hex_list(&palette)),
        OutputFormat::Json => match export::json_records(&palette) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e),
        },
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, PaletteError> {
    value.parse().map_err(|_| PaletteError::InvalidParameter {
        parameter: flag.trim_start_matches("--").to_string(),
        value: value.to_string(),
    })
}

fn parse_format(value: &str) -> Result<OutputFormat, PaletteError> {
    match value.to_lowercase().as_str() {
        "table" => Ok(OutputFormat::Table),
        "css" => Ok(OutputFormat::Css),
        "hex" => Ok(OutputFormat::Hex),
        "json" => Ok(OutputFormat::Json),
        _ => Err(PaletteError::InvalidParameter {
            parameter: "format".to_string(),
            value: value.to_string(),
        }),
    }
}

fn fail(error: &PaletteError) -> ! {
    eprintln!("Analysis failed: {}", error);
    if error.is_recoverable() {
        eprintln!("Suggestion: {}", error.user_message());
    }
    process::exit(1);
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Extract the dominant color palette of an image.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --colors N       Number of colors, 3-10 (default: 5)");
    eprintln!("  --sort KEY       frequency, hue, lightness or saturation (default: frequency)");
    eprintln!("  --seed S         Clustering seed (default: 42)");
    eprintln!("  --format FMT     table, css, hex or json (default: table)");
    eprintln!("  --config FILE    Load settings from a JSON file; flags override it");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=palette_extract=debug to trace clustering.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} photo.jpg", program_name);
    eprintln!("  {} --colors 8 --sort hue photo.png", program_name);
    eprintln!("  {} --format css room.jpg > palette.css", program_name);
}

fn print_table(palette: &Palette) {
    println!("=== Palette ({} colors, sorted by {}) ===", palette.len(), palette.sort_key());
    println!("{:<10} {:<8} {:>7}  {:<22} {}", "Role", "Color", "Weight", "Application", "Label");
    for (role, entry) in PaletteAssembler::assign_roles(palette) {
        println!(
            "{:<10} {:<8} {:>6.1}%  {:<22} {}",
            role.as_str(),
            entry.hex(),
            entry.weight,
            role.application(),
            ColorTheory::label_color(&entry.color)
        );
    }

    println!();
    println!("=== Color Theory ===");
    for entry in palette {
        let suggestions = ColorTheory::suggestions(&entry.color);
        println!(
            "{}  comp {}  analogous {} / {}",
            suggestions.base,
            suggestions.complementary,
            suggestions.analogous.0,
            suggestions.analogous.1
        );
    }

    if palette.len() >= 2 {
        let background = &palette.entries()[0].color;
        let text = &palette.entries()[1].color;
        let contrast = ColorTheory::contrast_ratio(background, text);
        println!();
        println!("=== Contrast ===");
        println!(
            "{} on {}: {:.2}:1 {}",
            text,
            background,
            contrast.ratio,
            if contrast.passes_aa {
                "(meets WCAG AA)"
            } else {
                "(low contrast)"
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_installs_global_subscriber() {
        init_tracing();
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("CSS").unwrap(), OutputFormat::Css);
        assert!(matches!(
            parse_format("svg"),
            Err(PaletteError::InvalidParameter { .. })
        ));
    }
}
