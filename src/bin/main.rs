extern crate pathlight as root;

use log::LevelFilter;
use root::camera::PinholeCamera;
use root::parsing::{construct_scene, default_scene, get_settings, load_scene, Config, TOMLConfig};
use root::renderer::ProgressiveRenderer;

#[macro_use]
extern crate log;
extern crate simplelog;

use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};

use std::fs::File;
use std::process::exit;
use std::sync::Arc;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(rename_all = "kebab-case")]
struct Opt {
    #[structopt(long)]
    pub scene_file: Option<String>,
    #[structopt(long, default_value = "data/config.toml")]
    pub config_file: String,
    #[structopt(short = "o", long)]
    pub output: Option<String>,
    #[structopt(long)]
    pub seed: Option<u64>,
    #[structopt(short = "n", long)]
    pub dry_run: bool,
    #[structopt(long, default_value = "warn")]
    pub print_log_level: String,
    #[structopt(long, default_value = "info")]
    pub write_log_level: String,
}

fn parse_log_level(level: String, default: LevelFilter) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "trace" => LevelFilter::Trace,
        "error" => LevelFilter::Error,
        "debug" => LevelFilter::Debug,
        _ => default,
    }
}

fn main() {
    let opts = Opt::from_args();
    let term_log_level = parse_log_level(opts.print_log_level, LevelFilter::Warn);
    let write_log_level = parse_log_level(opts.write_log_level, LevelFilter::Info);

    CombinedLogger::init(vec![
        TermLogger::new(
            term_log_level,
            simplelog::Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(
            write_log_level,
            simplelog::Config::default(),
            File::create("main.log").unwrap(),
        ),
    ])
    .unwrap();

    let mut toml_config: TOMLConfig = match get_settings(&opts.config_file) {
        Ok(config) => config,
        Err(e) => {
            error!("couldn't read config file, {:?}", e);
            exit(1);
        }
    };

    // command line arguments override the config file
    if let Some(scene_file) = opts.scene_file {
        toml_config.default_scene_file = Some(scene_file);
    }
    if let Some(output) = opts.output {
        toml_config.render.filename = Some(output);
    }
    if let Some(seed) = opts.seed {
        toml_config.render.seed = Some(seed);
    }

    let config = Config::from(toml_config);
    if let Err(e) = config.validate() {
        error!("invalid render settings, aborting. error is {:?}", e);
        exit(1);
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.render.threads as usize)
        .build_global()
        .unwrap();

    let parsed = match &config.scene_file {
        Some(scene_file) => load_scene(scene_file).and_then(construct_scene),
        None => default_scene(),
    };
    let (scene, look_from) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("fatal error parsing scene, aborting. error is {:?}", e);
            exit(1);
        }
    };

    let camera = PinholeCamera::new(
        look_from,
        config.render.width,
        config.render.height,
        config.render.fov,
        config.render.sample_variation,
    );

    if opts.dry_run {
        info!("dry run, scene and settings check out");
        return;
    }

    let renderer = ProgressiveRenderer::new();
    if let Err(e) = renderer.render(Arc::new(scene), &camera, &config.render) {
        error!("render failed, error is {:?}", e);
        exit(1);
    }
}
