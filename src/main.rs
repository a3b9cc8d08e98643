use vidsession::catalog::{JsonCatalog, MemoryCatalog};
use vidsession::engine::gst_engine::GstEngine;
use vidsession::error::SessionError;
use vidsession::events::LifecycleHub;
use vidsession::ops::coordinator::PlaybackCoordinator;
use vidsession::ops::registry::VideoRegistry;
use vidsession::ops::resolver::HandleResolver;
use vidsession::session::VideoSession;
use vidsession::storage::JsonFileStore;
use vidsession::types::config::SessionConfig;
use vidsession::types::handle::StorageHandle;
use vidsession::types::lifecycle::LifecycleEvent;

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Pick local videos and play them as one session
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Video files or handle URIs (e.g. content://media/7) to add
    #[arg(value_name = "FILE_OR_URI")]
    inputs: Vec<String>,

    /// Session config file (JSON)
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Open a file dialog to pick a video
    #[arg(short = 'p', long = "pick")]
    pick: bool,

    /// Index of the item to play (default: the last one)
    #[arg(short = 's', long = "select", value_name = "N")]
    select: Option<usize>,

    /// Print the video list and exit without playing
    #[arg(short = 'l', long = "list")]
    list: bool,
}

fn main() -> Result<(), SessionError> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SessionConfig::load_from_file(path)?,
        None => SessionConfig::default(),
    };
    init_tracing(&config.log_filter);
    run(args, config)
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Args, config: SessionConfig) -> Result<(), SessionError> {
    let resolver = match &config.catalog_path {
        Some(path) => HandleResolver::new(JsonCatalog::load_from_file(path)?),
        None => HandleResolver::new(MemoryCatalog::new()),
    };
    let mut registry = VideoRegistry::new(resolver, JsonFileStore::new(&config.state_path));
    let restored = registry.restore_from_store()?;
    info!(restored, state = %config.state_path.display(), "Loaded previous handles");

    let mut hub = LifecycleHub::new();
    let mut session =
        VideoSession::start(PlaybackCoordinator::new(registry, GstEngine::new()), &mut hub)?;
    for event in [
        LifecycleEvent::Create,
        LifecycleEvent::Start,
        LifecycleEvent::Resume,
    ] {
        hub.emit(event);
    }
    session.pump_lifecycle()?;

    let mut handles = args
        .inputs
        .iter()
        .map(|input| to_handle(input))
        .collect::<Result<Vec<_>, _>>()?;
    if args.pick {
        match pick_video(&config.accepted_extensions) {
            Some(path) => handles.push(to_handle(&path.to_string_lossy())?),
            None => info!("File dialog closed without a selection"),
        }
    }
    for handle in handles {
        session.add_handle(handle)?;
    }

    let items = session.items();
    for (index, item) in items.iter().enumerate() {
        println!("{:>3}  {:<40}  {}", index, item.display_name, item.handle);
    }

    if !args.list && config.autoplay && !items.is_empty() {
        let index = args.select.unwrap_or(items.len() - 1);
        match items.get(index) {
            Some(item) => {
                session.select(&item.handle)?;
                if let Some(engine) = session.coordinator().engine() {
                    engine.wait_until_finished()?;
                    let played = engine.state()?;
                    info!(queued = played.queue.len(), "Playback finished");
                }
            }
            None => warn!(index, len = items.len(), "No item at that index"),
        }
    }

    for event in [
        LifecycleEvent::Pause,
        LifecycleEvent::Stop,
        LifecycleEvent::Destroy,
    ] {
        hub.emit(event);
    }
    session.pump_lifecycle()?;
    let state = session.end(&mut hub)?;
    info!(handles = state.handles.len(), "Session saved");
    Ok(())
}

/// URIs are taken as they are; anything else is a local path turned into a `file://` URI.
fn to_handle(input: &str) -> Result<StorageHandle, SessionError> {
    let handle = StorageHandle::new(input);
    // Single-letter schemes are Windows drive letters, not URIs.
    if handle.scheme().is_some_and(|scheme| scheme.len() > 1) {
        return Ok(handle);
    }
    let path = std::fs::canonicalize(Path::new(input))
        .map_err(|e| SessionError::Input(format!("{}: {}", input, e)))?;
    url::Url::from_file_path(&path)
        .map(|uri| StorageHandle::new(uri.to_string()))
        .map_err(|_| SessionError::Input(format!("{} is not an absolute path", path.display())))
}

fn pick_video(extensions: &[String]) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select video")
        .add_filter("Video", extensions)
        .pick_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_input_is_kept() {
        let handle = to_handle("content://media/7").unwrap();
        assert_eq!(handle.as_str(), "content://media/7");
    }

    #[test]
    fn test_path_input_becomes_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car.mp4");
        std::fs::write(&path, b"").unwrap();
        let handle = to_handle(&path.to_string_lossy()).unwrap();
        assert_eq!(handle.scheme().as_deref(), Some("file"));
        assert!(handle.as_str().ends_with("/car.mp4"));
    }

    #[test]
    fn test_missing_path_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.mp4");
        assert!(matches!(
            to_handle(&missing.to_string_lossy()),
            Err(SessionError::Input(_))
        ));
    }
}
