//! StockSight - status assessment dashboard viewer.
//!
//! Shows one unit's dashboard in a window, or with `--dump` prints the draw
//! sequence as JSON.

use anyhow::Context;
use clap::Parser;
use iced::application;

use stocksight::app::{StockSight, load_dataset};
use stocksight::args::ViewerArgs;
use stocksight::{PanelComposer, RecordingSurface, ViewerConfig};
use stocksight_common::init_tracing;

fn main() -> anyhow::Result<()> {
    let args = ViewerArgs::parse();

    let config =
        ViewerConfig::load(args.config.as_deref())?.with_log_level(args.log_level.clone());
    init_tracing(&config.logging)?;

    tracing::info!("Starting StockSight");

    let source = args.source();

    if args.dump {
        let source = source.context("--dump needs a dataset file or --demo")?;
        let dataset = load_dataset(&source, &mut None)?;
        let mut surface = RecordingSurface::new();
        let report = PanelComposer::new(&dataset)
            .with_styles(config.style.metric_chart, config.style.timeline)
            .with_options(config.layout)
            .compose(&mut surface)?;
        tracing::debug!(?report, "Composed dashboard");
        println!("{}", surface.to_json()?);
        return Ok(());
    }

    application(
        move || StockSight::boot(config.clone(), source.clone()),
        StockSight::update,
        StockSight::view,
    )
    .title(StockSight::title)
    .theme(StockSight::theme)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
