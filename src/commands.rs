use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tollway_core::{
    export::{
        road_network_geojson, write_by_way_summary_csv, write_connections_csv,
        write_way_stats_csv,
    },
    loading::{
        DatasetConfig, load_dataset, load_road_graph,
        pricing::{read_pricing_document, write_pricing_document},
    },
    pipeline::annotate as annotate_document,
};

use crate::{AnnotateArgs, InputArgs, config::Settings};

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn annotate(args: &AnnotateArgs, settings: &Settings) -> Result<()> {
    let config = settings.attribution(args);
    let mut dataset = load_dataset(&DatasetConfig::new(
        &args.inputs.price,
        &args.inputs.overpass,
    ))
    .context("failed to load input data")?;

    let report = annotate_document(&mut dataset.document, &dataset.graph, &config);
    if report.annotated == 0 && report.connections > 0 {
        warn!("No connection could be routed on the road network");
    }

    write_pricing_document(&args.out, &dataset.document)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    info!("Enriched document written to {}", args.out.display());

    if let Some(path) = &args.stats_csv {
        let rows = write_way_stats_csv(
            create(path)?,
            &report.aggregator,
            &dataset.graph,
            &report.classes,
            config.variance,
        )
        .with_context(|| format!("failed to write {}", path.display()))?;
        info!("{rows} priced ways written to {}", path.display());
    }
    Ok(())
}

pub fn connections(inputs: &InputArgs, csv: &Path, settings: &Settings) -> Result<()> {
    let mut dataset = load_dataset(&DatasetConfig::new(&inputs.price, &inputs.overpass))
        .context("failed to load input data")?;
    annotate_document(&mut dataset.document, &dataset.graph, &settings.attribution);

    let classes = dataset.document.vehicle_classes();
    let rows = write_connections_csv(create(csv)?, &dataset.document, &classes)
        .with_context(|| format!("failed to write {}", csv.display()))?;
    info!("{rows} connections written to {}", csv.display());
    Ok(())
}

pub fn summary(json: &Path, out: &Path, sig: Option<usize>, settings: &Settings) -> Result<()> {
    let document = read_pricing_document(json)
        .with_context(|| format!("failed to read {}", json.display()))?;
    let digits = sig.unwrap_or(settings.export.significant_digits);

    let rows = write_by_way_summary_csv(create(out)?, &document, digits)
        .with_context(|| format!("failed to write {}", out.display()))?;
    info!("{rows} ways written to {}", out.display());
    Ok(())
}

pub fn geojson(overpass: &Path, out: &Path) -> Result<()> {
    let graph = load_road_graph(overpass)
        .with_context(|| format!("failed to load road network {}", overpass.display()))?;
    let export = road_network_geojson(&graph)?;

    let mut writer = create(out)?;
    writer.write_all(export.to_string_pretty()?.as_bytes())?;
    writer.flush()?;
    info!(
        "{} features written to {}",
        export.collection.features.len(),
        out.display()
    );
    Ok(())
}
