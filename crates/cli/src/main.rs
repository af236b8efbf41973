#![deny(unsafe_code)]
//! CLI binary for okgamut.
//!
//! Subcommands:
//! - `convert <color>`: show a color in every supported space
//! - `map <L> <C> <H>`: gamut-map an Oklch color into sRGB or Display P3
//! - `to-p3` / `from-p3`: convert between sRGB and Display P3
//! - `mix`, `gradient`: blend colors in Oklab or Oklch
//! - `distance`: ΔEok between two colors

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use okgamut_core::gamut::{display_p3_to_srgb, srgb_to_display_p3};
use okgamut_core::oklab::p3_to_oklab;
use okgamut_core::transfer::srgb_to_linear;
use okgamut_core::{
    delta_e_srgb, map_to_gamut_in, mix, oklab_to_oklch, oklch_to_oklab, srgb_to_oklab,
    srgb_to_oklch, DisplayP3, Gamut, GamutStrategy, Interpolation, OkLab, OkLch, Palette, Srgb,
};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "okgamut", about = "Oklab color conversion and gamut mapping")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show an sRGB color as hex, linear RGB, Oklab, Oklch and Display P3.
    Convert {
        /// "#rrggbb", "rrggbb" or "r,g,b" with components in [0, 1].
        color: String,
    },
    /// Map an Oklch color into a device gamut.
    #[command(allow_negative_numbers = true)]
    Map {
        /// Lightness.
        l: f64,
        /// Chroma.
        c: f64,
        /// Hue in degrees.
        h: f64,

        /// Target gamut (srgb, p3).
        #[arg(short, long, default_value = "srgb")]
        gamut: String,

        /// Mapping strategy (chroma, css4, clip).
        #[arg(short, long, default_value = "chroma")]
        strategy: String,
    },
    /// Convert an sRGB color to Display P3.
    ToP3 {
        color: String,

        /// Mapping strategy (chroma, css4, clip).
        #[arg(short, long, default_value = "chroma")]
        strategy: String,
    },
    /// Convert a Display P3 color to sRGB, mapping it into gamut.
    FromP3 {
        /// "#rrggbb", "rrggbb" or "r,g,b" in Display P3.
        color: String,

        /// Mapping strategy (chroma, css4, clip).
        #[arg(short, long, default_value = "chroma")]
        strategy: String,
    },
    /// Blend two sRGB colors in Oklab.
    #[command(allow_negative_numbers = true)]
    Mix {
        a: String,
        b: String,

        /// Blend factor: 0 gives A, 1 gives B.
        #[arg(short, default_value_t = 0.5)]
        t: f64,
    },
    /// Print evenly spaced colors between two sRGB colors.
    Gradient {
        start: String,
        end: String,

        /// Number of colors, endpoints included.
        #[arg(short = 'n', long, default_value_t = 5)]
        steps: usize,

        /// Interpolation space (oklab, oklch).
        #[arg(short, long, default_value = "oklab")]
        interpolation: String,
    },
    /// Perceptual distance (ΔEok) between two sRGB colors.
    Distance { a: String, b: String },
}

fn finite(name: &str, v: f64) -> Result<f64, CliError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CliError::Input(format!("{name} must be a finite number, got {v}")))
    }
}

fn fmt3(v: [f64; 3]) -> String {
    format!("{:.6} {:.6} {:.6}", v[0], v[1], v[2])
}

fn fmt_lab(c: OkLab) -> String {
    fmt3([c.l, c.a, c.b])
}

fn fmt_lch(c: OkLch) -> String {
    format!("{:.6} {:.6} {:.3}", c.l, c.c, c.h)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Convert { color } => {
            let srgb: Srgb = color.parse()?;
            let linear = srgb_to_linear(srgb);
            let lab = srgb_to_oklab(srgb);
            let lch = oklab_to_oklch(lab);
            let p3 = srgb_to_display_p3(srgb, GamutStrategy::Chroma);
            debug!(input = %color, hex = %srgb.to_hex(), "converted");

            if cli.json {
                let info = serde_json::json!({
                    "srgb": srgb,
                    "rgb": srgb.to_array(),
                    "linear": linear,
                    "oklab": lab,
                    "oklch": lch,
                    "p3": p3,
                    "p3_rgb": p3.to_array(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("srgb    {}  ({})", srgb.to_hex(), fmt3(srgb.to_array()));
                println!("linear  {}", fmt3([linear.r, linear.g, linear.b]));
                println!("oklab   {}", fmt_lab(lab));
                println!("oklch   {}", fmt_lch(lch));
                println!("p3      {}", fmt3(p3.to_array()));
            }
        }
        Command::Map {
            l,
            c,
            h,
            gamut,
            strategy,
        } => {
            let input = OkLch::new(finite("L", l)?, finite("C", c)?, finite("H", h)?);
            let gamut: Gamut = gamut.parse()?;
            let strategy: GamutStrategy = strategy.parse()?;

            let in_gamut = gamut.contains(input);
            let [r, g, b] = strategy.map_encoded(gamut, oklch_to_oklab(input));
            let mapped = match (strategy, gamut) {
                (GamutStrategy::Chroma, _) => map_to_gamut_in(gamut, input),
                (_, Gamut::Srgb) => srgb_to_oklch(Srgb::new(r, g, b)),
                (_, Gamut::DisplayP3) => oklab_to_oklch(p3_to_oklab(DisplayP3 { r, g, b })),
            };
            info!(%gamut, %strategy, in_gamut, from = input.c, to = mapped.c, "mapped");

            if cli.json {
                let info = serde_json::json!({
                    "input": input,
                    "gamut": gamut.name(),
                    "strategy": strategy.name(),
                    "in_gamut": in_gamut,
                    "oklch": mapped,
                    "rgb": [r, g, b],
                    "hex": Srgb::new(r, g, b).to_hex(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let note = if in_gamut { "already in gamut" } else { "mapped" };
                println!("oklch   {}  ({note})", fmt_lch(mapped));
                println!("{:<7} {}  ({})", gamut.name(), Srgb::new(r, g, b).to_hex(), fmt3([r, g, b]));
            }
        }
        Command::ToP3 { color, strategy } => {
            let srgb: Srgb = color.parse()?;
            let strategy: GamutStrategy = strategy.parse()?;
            let p3 = srgb_to_display_p3(srgb, strategy);
            debug!(%strategy, from = %srgb.to_hex(), to = %p3.to_hex(), "srgb to p3");
            print_device(cli.json, "p3", p3.to_hex(), p3.to_array())?;
        }
        Command::FromP3 { color, strategy } => {
            let p3: DisplayP3 = color.parse()?;
            let strategy: GamutStrategy = strategy.parse()?;
            let srgb = display_p3_to_srgb(p3, strategy);
            debug!(%strategy, from = %p3.to_hex(), to = %srgb.to_hex(), "p3 to srgb");
            print_device(cli.json, "srgb", srgb.to_hex(), srgb.to_array())?;
        }
        Command::Mix { a, b, t } => {
            let a: Srgb = a.parse()?;
            let b: Srgb = b.parse()?;
            let t = finite("t", t)?;
            let out = mix(a, b, t);
            debug!(t, result = %out.to_hex(), "mixed");
            print_device(cli.json, "srgb", out.to_hex(), out.to_array())?;
        }
        Command::Gradient {
            start,
            end,
            steps,
            interpolation,
        } => {
            if steps == 0 {
                return Err(CliError::Input("--steps must be at least 1".to_string()));
            }
            let start: Srgb = start.parse()?;
            let end: Srgb = end.parse()?;
            let interpolation: Interpolation = interpolation.parse()?;
            let colors = Palette::between(start, end)
                .with_interpolation(interpolation)
                .steps(steps);
            info!(%interpolation, steps, "gradient");

            if cli.json {
                let info = serde_json::json!({
                    "interpolation": interpolation.name(),
                    "colors": colors,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for c in &colors {
                    println!("{}", c.to_hex());
                }
            }
        }
        Command::Distance { a, b } => {
            let a: Srgb = a.parse()?;
            let b: Srgb = b.parse()?;
            let d = delta_e_srgb(a, b);

            if cli.json {
                let info = serde_json::json!({
                    "a": a,
                    "b": b,
                    "delta_e_ok": d,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{d:.6}");
            }
        }
    }

    Ok(())
}

fn print_device(json: bool, space: &str, hex: String, rgb: [f64; 3]) -> Result<(), CliError> {
    if json {
        let info = serde_json::json!({
            "space": space,
            "hex": hex,
            "rgb": rgb,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{space:<7} {hex}  ({})", fmt3(rgb));
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
