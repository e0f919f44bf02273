use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use spatial_photo_combiner::image_pipeline::{
    ContainerCompression, ConversionConfig, StereoToSpatialPipeline, DEFAULT_HFOV_DEGREES,
};
use spatial_photo_combiner::logger;

use tracing::{debug, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl From<CompressionArg> for ContainerCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => ContainerCompression::None,
            CompressionArg::Lzw => ContainerCompression::Lzw,
            CompressionArg::DeflateFast => ContainerCompression::DeflateFast,
            CompressionArg::DeflateBalanced => ContainerCompression::DeflateBalanced,
            CompressionArg::DeflateBest => ContainerCompression::DeflateBest,
        }
    }
}

/// Combine a left and a right photo into one spatial (stereo) image.
#[derive(Debug, Parser)]
#[command(name = "spatial-photo-combiner", version, about)]
struct Args {
    /// The path to the left image.
    #[arg(short, long)]
    left: PathBuf,

    /// The path to the right image.
    #[arg(short, long)]
    right: PathBuf,

    /// The output path for the combined image: a two-page TIFF (left, right)
    /// with the stereo metadata as JSON in each page's ImageDescription tag.
    /// This is not a HEIC spatial photo and viewers will not open it as one.
    #[arg(short, long)]
    output: PathBuf,

    /// Horizontal field-of-view (in degrees).
    #[arg(long = "hfov", default_value_t = DEFAULT_HFOV_DEGREES)]
    hfov: f64,

    /// Compression applied to both image pages.
    #[arg(long, value_enum, default_value_t = CompressionArg::None)]
    compression: CompressionArg,

    /// Use horizontal differencing ahead of compression.
    #[arg(long)]
    predictor: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = ConversionConfig::builder()
        .hfov_degrees(args.hfov)
        .compression(args.compression.into())
        .predictor(args.predictor.then_some(2))
        .build();
    let pipeline = StereoToSpatialPipeline::new(config);

    info!("Horizontal FOV: {} degrees", pipeline.config().hfov_degrees);
    info!("Compression: {:?}", pipeline.config().compression);

    let metadata = pipeline.convert_files(&args.left, &args.right, &args.output)?;
    debug!(
        "Left intrinsics {:?}, right intrinsics {:?}",
        metadata.left.camera_intrinsics.to_row_major(),
        metadata.right.camera_intrinsics.to_row_major()
    );

    Ok(())
}

fn main() {
    logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => info!("Conversion successful!"),
        Err(e) => {
            debug!("Conversion failed: {:?}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
