use std::error::Error;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use notify::{EventKind, RecursiveMode, Watcher};
use tessera_world::{TerrainGenerator, load_params_from_path};

/// Editors often write a file in several steps; wait for them to settle.
const SETTLE: Duration = Duration::from_millis(150);

/// Blocks forever, reloading worldgen params and calling `render` whenever the
/// config file changes. A config that fails to load keeps the previous params.
/// The seed is fixed for the generator's lifetime; only params reload.
pub fn rerender_on_change<F>(
    generator: &TerrainGenerator,
    path: &Path,
    mut render: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(&TerrainGenerator),
{
    let (tx, rx) = mpsc::channel::<()>();
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res {
            match event.kind {
                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                    let _ = tx.send(());
                }
                _ => {}
            }
        }
    })?;
    watcher.watch(path, RecursiveMode::NonRecursive)?;
    log::info!("watching {} for worldgen changes", path.display());

    while rx.recv().is_ok() {
        while rx.recv_timeout(SETTLE).is_ok() {}
        match load_params_from_path(path) {
            Ok(params) => {
                generator.update_params(params);
                render(generator);
            }
            Err(err) => log::warn!("worldgen config reload failed: {}", err),
        }
    }
    Ok(())
}
