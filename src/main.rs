use clap::Parser;
use facility_map::core::{ConfigProvider, DatasetSource, Storage};
use facility_map::utils::{logger, validation::Validate};
use facility_map::{
    AppContext, CliConfig, FileSource, HttpSource, LocalStorage, MapEngine, MapError, SceneMap,
    ScenePage, SceneSnapshot, TomlConfig, UiEvent,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting facility-map");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => run(&config, cli.events.as_deref()).await,
            Err(e) => Err(e),
        },
        None => run(&cli, cli.events.as_deref()).await,
    };

    if let Err(e) = result {
        tracing::error!("❌ facility-map failed: {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run<C: ConfigProvider + Validate>(config: &C, events: Option<&str>) -> facility_map::Result<()> {
    config.validate()?;

    let source: Box<dyn DatasetSource> = match config.dataset_file() {
        Some(file) => Box::new(FileSource::new(file)),
        None => match config.dataset_url()? {
            Some(url) => Box::new(HttpSource::from_url(url)),
            None => {
                return Err(MapError::MissingConfig {
                    field: "dataset location".to_string(),
                })
            }
        },
    };

    let mut context = AppContext::new(SceneMap::new(), ScenePage::new(), config.render_options());
    let engine = MapEngine::new(source).with_view(config.initial_view(), config.tile_layer());

    let outcome = engine.run(&mut context).await;
    if let Ok(report) = &outcome {
        tracing::info!(
            "✅ Loaded {} of {} data lines ({} skipped)",
            report.loaded,
            report.candidate_lines,
            report.skipped
        );

        if let Some(path) = events {
            let script = tokio::fs::read_to_string(path).await?;
            let events: Vec<UiEvent> = serde_json::from_str(&script)?;
            tracing::info!("Replaying {} UI events", events.len());
            for event in events {
                context.dispatch(event)?;
            }
        }
    }

    // The scene is written even when the fetch failed: an initialized, empty map.
    let storage = LocalStorage::new(config.output_path().to_string());
    let snapshot = SceneSnapshot {
        map: context.map(),
        page: context.page(),
    };
    let json = serde_json::to_vec_pretty(&snapshot)?;
    let written = storage.write_file("scene.json", &json).await?;
    tracing::info!("📁 Scene saved to: {}", written);
    println!("📁 Scene saved to: {}", written);

    outcome.map(|_| ())
}
