// Example: Turn a floor plan image into a normalized zone layout
use std::fs;

use floorplan_vision::{import_analysis, FloorplanAnalyzer};
use zone_geometry::{FurnitureCatalog, NormalizerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("Floor plan zone import");
    println!("======================\n");

    if std::env::var("OPENAI_API_KEY").is_err() {
        eprintln!("Error: OPENAI_API_KEY environment variable not set");
        eprintln!("\nPlease set your API key:");
        eprintln!("  export OPENAI_API_KEY=sk-...");
        return Ok(());
    }

    let args: Vec<String> = std::env::args().collect();
    let Some(image_path) = args.get(1) else {
        eprintln!("Usage: cargo run --example analyze_floorplan <IMAGE_PATH> [OUTPUT_JSON]");
        return Ok(());
    };
    let output_path = args.get(2).map(String::as_str).unwrap_or("layout.json");

    let image_bytes = fs::read(image_path)?;
    println!("Loaded {} ({} bytes)\n", image_path, image_bytes.len());

    let analyzer = FloorplanAnalyzer::from_env()?;
    println!("Analyzing with {} (this may take 5-10 seconds)\n", analyzer.model());

    let analysis = match analyzer.analyze_image(&image_bytes).await {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("Analysis failed: {:#}", e);
            eprintln!("\nPossible issues:");
            eprintln!("  - Invalid OPENAI_API_KEY");
            eprintln!("  - Network connection problem");
            eprintln!("  - Model does not accept image input (set VISION_MODEL)");
            return Ok(());
        }
    };

    let layout = import_analysis(
        &analysis,
        &NormalizerConfig::default(),
        &FurnitureCatalog::default(),
    );

    println!("Canvas: {} x {} cm", layout.canvas.width, layout.canvas.height);
    println!("{}", "=".repeat(70));
    for zone in &layout.zones {
        println!(
            "{:<20} {:<10} x={:>5} y={:>5} w={:>5} h={:>5}",
            zone.name, zone.kind, zone.x, zone.y, zone.w, zone.h
        );
    }
    println!("{}", "=".repeat(70));
    println!(
        "\n{} zones kept, {} repositioned, {} dropped, {} furniture items placed",
        layout.zones.len(),
        layout.report.repositioned.len(),
        layout.report.dropped.len(),
        layout.furniture.len()
    );

    fs::write(output_path, serde_json::to_string_pretty(&layout)?)?;
    println!("Saved layout to: {}", output_path);

    Ok(())
}
