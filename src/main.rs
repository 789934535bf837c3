use std::error::Error;
use std::path::PathBuf;

use ori_text::config::Config;
use ori_text::gpu::{WgpuUploader, headless_device};
use ori_text::{Engine, FontManager, FontTexture, MemoryUploader};

/// Options collected from the command line. `None` falls back to the config.
#[derive(Default)]
struct Args {
    font: Option<PathBuf>,
    size: Option<u32>,
    padding: Option<u32>,
    output: Option<PathBuf>,
    gpu: bool,
    text: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--print-config") {
        let config = Config::default();
        match toml::to_string_pretty(&config) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("oritext {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("oritext {}", env!("CARGO_PKG_VERSION"));
        println!("Rasterize a string into a power-of-two grayscale texture\n");
        println!("USAGE:");
        println!("    oritext [OPTIONS] <TEXT>\n");
        println!("OPTIONS:");
        println!("    --font PATH       Font file (overrides [font] path)");
        println!("    --size PX         Pixel height (overrides [font] size)");
        println!("    --padding PX      Padding around glyphs (overrides [atlas] padding)");
        println!("    --output FILE     Write the texture as a grayscale PNG");
        println!("    --gpu             Upload through a headless wgpu device");
        println!("    --print-config    Print the default configuration to stdout");
        println!("    --version, -V     Print version information");
        println!("    --help, -h        Print this help message");
        return;
    }

    let result = parse_args(&args[1..]).and_then(|parsed| run(&parsed));
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Args, Box<dyn Error>> {
    let mut parsed = Args::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{arg} needs a value"))
        };
        match arg.as_str() {
            "--font" => parsed.font = Some(value()?.into()),
            "--size" => parsed.size = Some(value()?.parse()?),
            "--padding" => parsed.padding = Some(value()?.parse()?),
            "--output" => parsed.output = Some(value()?.into()),
            "--gpu" => parsed.gpu = true,
            s if s.starts_with("--") => return Err(format!("unknown option {s}").into()),
            _ if parsed.text.is_none() => parsed.text = Some(arg.clone()),
            _ => return Err(format!("unexpected argument {arg}").into()),
        }
    }
    Ok(parsed)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = Config::load();
    let text = args.text.as_deref().ok_or("no text given (see --help)")?;
    let font = args
        .font
        .clone()
        .or_else(|| config.font.path.clone())
        .ok_or("no font given: pass --font or set [font] path")?;
    let size = args.size.unwrap_or(config.font.size);
    let mut options = config.text_options();
    if let Some(padding) = args.padding {
        options.padding = padding;
    }

    let engine = Engine::new();

    if args.gpu {
        if args.output.is_some() {
            log::warn!("--output is ignored with --gpu");
        }
        let (device, queue) = headless_device()?;
        let mut manager =
            FontManager::with_options(engine.clone(), WgpuUploader::new(device, queue), options);
        manager.open(&font)?;
        report(text, size, manager.get_texture(text, size)?);
    } else {
        let mut manager = FontManager::with_options(engine.clone(), MemoryUploader::new(), options);
        manager.open(&font)?;
        let texture = manager.get_texture(text, size)?;
        report(text, size, texture);
        if let Some(path) = &args.output {
            let cpu = texture.texture();
            image::save_buffer(
                path,
                &cpu.pixels,
                cpu.width,
                cpu.height,
                image::ExtendedColorType::L8,
            )?;
            println!("wrote {}", path.display());
        }
    }

    engine.terminate()?;
    Ok(())
}

fn report<T>(text: &str, size: u32, texture: &FontTexture<T>) {
    let m = texture.metrics();
    let [u0, v0, u1, v1] = texture.uv();
    println!("{text:?} at {size}px");
    println!(
        "  texture   {}x{} (string width {})",
        texture.width(),
        texture.height(),
        texture.string_width()
    );
    println!("  uv        ({u0:.4}, {v0:.4}) - ({u1:.4}, {v1:.4})");
    println!(
        "  metrics   base_line {} internal_leading {} ascender {} descender {} external_leading {} (total {})",
        m.base_line(),
        m.internal_leading(),
        m.ascender(),
        m.descender(),
        m.external_leading(),
        m.total()
    );
}
