use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use huffpath::{render_tree, Codec, Container};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "huffpath", about = "Huffman-code text into bit paths and back")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode text and report the code table and sizes.
    Encode {
        #[command(flatten)]
        source: Source,
        /// Where to write the result (a container unless --bits is given).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the '0'/'1' text form instead of a container.
        #[arg(long)]
        bits: bool,
    },
    /// Decode a container back into text.
    Decode {
        /// Container file produced by `encode`.
        #[arg(short, long)]
        input: PathBuf,
        /// Where to write the text (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the tree and code table for some text.
    Tree {
        #[command(flatten)]
        source: Source,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Text given on the command line.
    #[arg(short, long)]
    text: Option<String>,
    /// File to read the text from.
    #[arg(short, long)]
    input: Option<PathBuf>,
}

impl Source {
    fn read(&self) -> Result<String> {
        match (&self.text, &self.input) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("failed to read text from {}", path.display())),
            (None, None) => anyhow::bail!("either --text or --input is required"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode {
            source,
            output,
            bits,
        } => run_encode(&source.read()?, output.as_deref(), bits)?,
        Commands::Decode { input, output } => run_decode(&input, output.as_deref())?,
        Commands::Tree { source } => run_tree(&source.read()?)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_codec(text: &str) -> Result<Codec<char>> {
    Codec::from_text(text).context("failed to build the Huffman tree")
}

fn print_codes(codec: &Codec<char>) {
    let frequencies = codec.frequencies();
    println!("symbol\tcount\tcode");
    for (symbol, code) in codec.code_table() {
        println!(
            "{:?}\t{}\t{}",
            symbol,
            frequencies.get(symbol).unwrap_or(0),
            huffpath::to_bit_string(code)
        );
    }
}

fn run_encode(text: &str, output: Option<&Path>, bits: bool) -> Result<()> {
    let codec = build_codec(text)?;
    let encoded = codec.encode_text(text).context("failed to encode text")?;

    print_codes(&codec);
    println!("original size: {} bits", encoded.original_size());
    println!("compressed size: {} bits", encoded.compressed_size());
    println!(
        "compression ratio: {:.2}%",
        encoded.compression_ratio().context("failed to compute ratio")?
    );

    match output {
        Some(path) if bits => {
            fs::write(path, encoded.to_bit_string())
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote bit string");
        }
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            Container::new(codec.frequencies(), encoded.into_bits())
                .write_to(&mut writer)
                .and_then(|()| writer.flush().map_err(Into::into))
                .with_context(|| format!("failed to write container {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote container");
        }
        None => println!("encoded: {}", encoded.to_bit_string()),
    }

    Ok(())
}

fn run_decode(input: &Path, output: Option<&Path>) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let container = Container::read_from(BufReader::new(file))
        .with_context(|| format!("failed to read container {}", input.display()))?;
    let text = container
        .decode_text()
        .with_context(|| format!("failed to decode {}", input.display()))?;

    match output {
        Some(path) => fs::write(path, &text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{text}"),
    }

    Ok(())
}

fn run_tree(text: &str) -> Result<()> {
    let codec = build_codec(text)?;

    print!("{}", render_tree(codec.tree()));
    print_codes(&codec);

    Ok(())
}
