use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use png_meta_search::{cli, config, error, error_log, scanner, search, session, shell};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use error_log::ErrorSink;
use std::io::IsTerminal;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default();
    let error_log = config.error_log();

    match cli.command {
        Commands::Search { folder, include, exclude, json, interactive } => {
            let folder = folder.or_else(|| config.last_folder.clone());
            let mut request = search::SearchRequest::from_input(folder, &include, &exclude)?;
            request.exclude = config.merged_exclude(request.exclude);

            if config.last_folder.as_deref() != Some(request.folder.as_path()) {
                config.last_folder = Some(request.folder.clone());
                if let Err(e) = config.save() {
                    log::warn!("設定を保存できません: {}", e);
                }
            }

            let outcome = if json || !std::io::stderr().is_terminal() {
                request.run(&error_log)?
            } else {
                run_with_spinner(&request, &error_log)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }

            if outcome.is_empty() {
                println!("No matches found.");
            } else {
                for path in &outcome.matches {
                    println!("{}", path.display());
                }
            }
            println!("\n{}", outcome.summary());

            if interactive {
                let shell = shell::platform_shell();
                session::run_interactive(&request.folder, &outcome, shell.as_ref(), &error_log)?;
            }
        }

        Commands::Metadata { file } => {
            ensure_file(&file)?;
            match session::metadata_text(&file, &error_log) {
                Some(text) => println!("{}", text),
                None => println!("{}", session::NO_METADATA_MESSAGE),
            }
        }

        Commands::Open { file } => {
            let shell = shell::platform_shell();
            shell.open_file(&file).inspect_err(|e| error_log.record("open_image_viewer", e))?;
        }

        Commands::Reveal { file } => {
            let shell = shell::platform_shell();
            shell.reveal_in_folder(&file).inspect_err(|e| error_log.record("show_in_explorer", e))?;
        }

        Commands::Config { show, set_error_log, set_default_exclude, clear_last_folder } => {
            let mut changed = false;

            if let Some(path) = set_error_log {
                config.error_log = path;
                changed = true;
            }

            if let Some(raw) = set_default_exclude {
                config.default_exclude = png_meta_search::common::parse_keywords(&raw);
                changed = true;
            }

            if clear_last_folder {
                config.last_folder = None;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                let location = Config::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "不明".into());
                println!("設定: {}", location);
                println!(
                    "  前回のフォルダ: {}",
                    config.last_folder.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "未設定".into())
                );
                println!("  エラーログ: {}", config.error_log.display());
                println!(
                    "  既定の除外キーワード: {}",
                    if config.default_exclude.is_empty() { "なし".to_string() } else { config.default_exclude.join(", ") }
                );
                println!("  プレビュー最大サイズ: {}px", config.preview_max_size);
            }
        }
    }

    Ok(())
}

fn run_with_spinner(
    request: &search::SearchRequest,
    sink: &dyn ErrorSink,
) -> Result<png_meta_search::common::SearchOutcome> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} [{pos}] {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let outcome = search::search_images_with_progress(
        &request.folder,
        &request.include,
        &request.exclude,
        sink,
        |path| {
            spinner.inc(1);
            spinner.set_message(path.display().to_string());
        },
    );

    spinner.finish_and_clear();
    outcome
}

fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() && scanner::is_png_name(&path.to_string_lossy()) {
        Ok(())
    } else if path.is_file() {
        Err(error::SearchError::InvalidInput(format!("PNGファイルではありません: {}", path.display())))
    } else {
        Err(error::SearchError::FileNotFound(path.display().to_string()))
    }
}
