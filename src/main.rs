// Example runner: compares two image files and prints the report. With an output
// directory, the three difference images are written next to each other as PNG.
//
// Configuration comes from the `CHROMA_DIFF_*` environment variables, logging from
// `RUST_LOG`.

use anyhow::Context;
use chroma_diff::core_modules::utils::image_helper::image_helper;
use chroma_diff::parallel_pipeline::ParallelPipeline;
use chroma_diff::{ColorSpace, ComparisonConfig, ImageSlot};
use std::env;
use std::path::PathBuf;
use std::process;

fn print_help() {
    println!("chroma_diff - Compare two images in the RGB, HSV and YUV color spaces");
    println!();
    println!("Usage: chroma_diff <first-image> <second-image> [output-dir]");
    println!();
    println!("Environment:");
    println!("  CHROMA_DIFF_HUE_SCALE    half (0..=179, default) or full (0..=255)");
    println!("  CHROMA_DIFF_CHROMA_BIAS  offset added to U and V (default 128)");
    println!("  CHROMA_DIFF_PARALLEL     run the three color spaces concurrently (true/false)");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        print_help();
        process::exit(1);
    }

    let config = ComparisonConfig::from_env().context("Failed to read configuration")?;
    log::debug!("configuration: {:?}", config);

    let first = image_helper::open(&args[1], ImageSlot::First)
        .with_context(|| format!("Failed to load {}", args[1]))?;
    let second = image_helper::open(&args[2], ImageSlot::Second)
        .with_context(|| format!("Failed to load {}", args[2]))?;

    let result = ParallelPipeline::new(config)
        .compare(&first, &second)
        .await
        .context("Comparison failed")?;

    print!("{}", result);

    if let Some(output_dir) = args.get(3).map(PathBuf::from) {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        for space in ColorSpace::ALL {
            let path = output_dir.join(format!("diff_{}.png", space.name().to_lowercase()));
            image_helper::save_png(result.space(space).diff_image(), &path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            println!("Difference in {} saved to {}", space, path.display());
        }
    }

    Ok(())
}
