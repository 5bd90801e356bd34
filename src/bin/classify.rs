//! Command-line demonstrator: classify one image file against a bundled
//! waste-material model and print the ranked predictions.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use wastesort::core::assets::DirAssets;
use wastesort::core::inference::{ModelHost, OrtRuntime, SessionOptions};
use wastesort::domain::labels::LabelMap;
use wastesort::processors::topk::topk;
use wastesort::{Classifier, core::init_tracing};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image file to classify
    #[arg(long, value_name = "FILE")]
    image: String,

    /// Directory holding the packaged model artifacts
    #[arg(long, default_value = "assets", value_name = "DIR")]
    assets: String,

    /// Model artifact name inside the assets directory
    #[arg(long, default_value = "wastesort.onnx", value_name = "NAME")]
    model: String,

    /// Optional label file (one label per line, training order); the
    /// bundled waste-material labels are used when omitted
    #[arg(long, value_name = "FILE")]
    labels: Option<String>,

    /// Target square edge length the image is resized to
    #[arg(long, default_value = "224", value_name = "PIXELS")]
    input_size: u32,

    /// Treat the model as quantized: feed native [0, 255] values
    #[arg(long)]
    quantized: bool,

    /// Number of ranked predictions to print
    #[arg(long, default_value = "3", value_name = "COUNT")]
    top: usize,

    /// Intra-op worker threads for the inference runtime
    #[arg(long, default_value = "4", value_name = "COUNT")]
    threads: usize,
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let labels = match &args.labels {
        Some(path) => LabelMap::from_file(path)
            .with_context(|| format!("failed to load labels from {}", path))?,
        None => LabelMap::waste_materials(),
    };

    let image = wastesort::load_image(&args.image)
        .with_context(|| format!("failed to open image {}", args.image))?;

    let mut host = ModelHost::new(
        DirAssets::new(&args.assets),
        OrtRuntime::new(),
        SessionOptions::new().with_intra_threads(args.threads),
    );
    let handle = host.acquire(&args.model)?;
    let classifier = Classifier::new(handle)
        .with_input_size(args.input_size)?
        .quantized(args.quantized);

    info!(model = %args.model, image = %args.image, "running classification");
    let started = std::time::Instant::now();
    let scores = classifier.classify(&image)?;
    info!(elapsed = ?started.elapsed(), classes = scores.len(), "inference complete");

    for (rank, (index, score)) in topk(&scores, args.top).iter().enumerate() {
        let label = labels.get(*index).unwrap_or("<unlabeled>");
        println!("{}. {} ({:.2}%)", rank + 1, label, score * 100.0);
    }

    host.release();
    Ok(())
}
