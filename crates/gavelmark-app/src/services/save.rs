// SPDX-License-Identifier: MIT
//
// Save strategies for exported images.
//
// The preferred path is a native save dialog per file. On hosts where no
// dialog can be shown (headless session, no display server) a fallback
// saver writes into the exports directory instead, pacing batch writes so
// dozens of files do not land in the same instant.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gavelmark_core::SaveOutcome;
use tracing::{info, warn};

/// A destination that image bytes can be written to.
///
/// Implementations never treat a user's "no" as an error: dismissing the
/// dialog yields `Cancelled` and the batch continues with the next item.
pub trait SaveTarget: Send + Sync {
    /// Save one file under (or starting from) the suggested name.
    fn save_one(&self, suggested_name: &str, bytes: &[u8]) -> SaveOutcome;

    /// Save a batch, one outcome per item, in input order.
    fn save_many(&self, items: &[(String, Vec<u8>)]) -> Vec<SaveOutcome> {
        items
            .iter()
            .map(|(name, bytes)| self.save_one(name, bytes))
            .collect()
    }
}

/// Native dialogs: a save prompt per single file, one folder prompt per batch.
pub struct DialogSaver;

impl SaveTarget for DialogSaver {
    fn save_one(&self, suggested_name: &str, bytes: &[u8]) -> SaveOutcome {
        #[cfg(not(any(target_os = "ios", target_os = "android")))]
        {
            let Some(path) = rfd::FileDialog::new()
                .set_file_name(suggested_name)
                .save_file()
            else {
                info!(name = suggested_name, "save dialog dismissed");
                return SaveOutcome::Cancelled;
            };
            write_bytes(&path, bytes)
        }
        #[cfg(any(target_os = "ios", target_os = "android"))]
        {
            let _ = bytes;
            SaveOutcome::Failed(format!("no save dialog on this platform ({suggested_name})"))
        }
    }

    /// One folder prompt for the whole batch; every item lands in the chosen
    /// directory. Dismissing the picker cancels the entire batch.
    fn save_many(&self, items: &[(String, Vec<u8>)]) -> Vec<SaveOutcome> {
        #[cfg(not(any(target_os = "ios", target_os = "android")))]
        {
            let Some(dir) = rfd::FileDialog::new().pick_folder() else {
                info!(count = items.len(), "folder picker dismissed");
                return vec![SaveOutcome::Cancelled; items.len()];
            };
            write_all(&dir, items)
        }
        #[cfg(any(target_os = "ios", target_os = "android"))]
        {
            items
                .iter()
                .map(|(name, bytes)| self.save_one(name, bytes))
                .collect()
        }
    }
}

/// Write every item into `dir`, one outcome per item, in input order.
#[cfg(not(any(target_os = "ios", target_os = "android")))]
fn write_all(dir: &Path, items: &[(String, Vec<u8>)]) -> Vec<SaveOutcome> {
    items
        .iter()
        .map(|(name, bytes)| write_bytes(&dir.join(name), bytes))
        .collect()
}

/// Dialog-free saver: writes into a fixed exports directory.
pub struct FallbackSaver {
    export_dir: PathBuf,
    stagger: Duration,
}

impl FallbackSaver {
    pub fn new(export_dir: PathBuf, stagger: Duration) -> Self {
        Self {
            export_dir,
            stagger,
        }
    }

    /// Where this saver writes.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

impl SaveTarget for FallbackSaver {
    fn save_one(&self, suggested_name: &str, bytes: &[u8]) -> SaveOutcome {
        if let Err(err) = std::fs::create_dir_all(&self.export_dir) {
            return SaveOutcome::Failed(format!(
                "could not create {}: {err}",
                self.export_dir.display()
            ));
        }
        write_bytes(&self.export_dir.join(suggested_name), bytes)
    }

    fn save_many(&self, items: &[(String, Vec<u8>)]) -> Vec<SaveOutcome> {
        let mut outcomes = Vec::with_capacity(items.len());
        for (i, (name, bytes)) in items.iter().enumerate() {
            if i > 0 {
                std::thread::sleep(self.stagger);
            }
            outcomes.push(self.save_one(name, bytes));
        }
        outcomes
    }
}

fn write_bytes(path: &Path, bytes: &[u8]) -> SaveOutcome {
    match std::fs::write(path, bytes) {
        Ok(()) => {
            info!(path = %path.display(), len = bytes.len(), "file saved");
            SaveOutcome::Saved
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "save failed");
            SaveOutcome::Failed(format!("could not write {}: {err}", path.display()))
        }
    }
}

/// Whether this host can show a native save dialog.
///
/// On Linux that requires a running display server; elsewhere the desktop
/// shell always provides one.
pub fn dialog_capable() -> bool {
    #[cfg(target_os = "linux")]
    {
        std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
    }
    #[cfg(all(not(target_os = "linux"), not(any(target_os = "ios", target_os = "android"))))]
    {
        true
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        false
    }
}

/// Pick the saver for this host: dialog when possible, exports dir otherwise.
pub fn select_saver(export_dir: PathBuf, stagger: Duration) -> Box<dyn SaveTarget> {
    if dialog_capable() {
        Box::new(DialogSaver)
    } else {
        info!(dir = %export_dir.display(), "no display server; saving to exports directory");
        Box::new(FallbackSaver::new(export_dir, stagger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_writes_under_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let saver = FallbackSaver::new(dir.path().to_path_buf(), Duration::ZERO);
        let outcome = saver.save_one("wm_photo.jpg", b"abc");
        assert_eq!(outcome, SaveOutcome::Saved);
        let written = std::fs::read(dir.path().join("wm_photo.jpg")).unwrap();
        assert_eq!(written, b"abc");
    }

    #[test]
    fn fallback_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports");
        let saver = FallbackSaver::new(nested.clone(), Duration::ZERO);
        assert_eq!(saver.save_one("cover_auction.png", b"x"), SaveOutcome::Saved);
        assert!(nested.join("cover_auction.png").exists());
    }

    #[test]
    fn fallback_batch_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let saver = FallbackSaver::new(dir.path().to_path_buf(), Duration::ZERO);
        let items = vec![
            ("wm_a.jpg".to_string(), vec![1u8]),
            ("wm_b.jpg".to_string(), vec![2u8]),
            ("wm_c.jpg".to_string(), vec![3u8]),
        ];
        let outcomes = saver.save_many(&items);
        assert_eq!(outcomes, vec![SaveOutcome::Saved; 3]);
        assert_eq!(std::fs::read(dir.path().join("wm_b.jpg")).unwrap(), vec![2u8]);
    }

    #[test]
    fn folder_batch_writes_every_item() {
        let dir = tempfile::tempdir().unwrap();
        let items = vec![
            ("wm_one.jpg".to_string(), vec![10u8]),
            ("wm_two.jpg".to_string(), vec![20u8]),
        ];
        let outcomes = write_all(dir.path(), &items);
        assert_eq!(outcomes, vec![SaveOutcome::Saved; 2]);
        assert_eq!(std::fs::read(dir.path().join("wm_one.jpg")).unwrap(), vec![10u8]);
        assert_eq!(std::fs::read(dir.path().join("wm_two.jpg")).unwrap(), vec![20u8]);
    }

    #[test]
    fn folder_batch_keeps_per_item_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        // The second name points into a directory that does not exist, so it
        // fails while the others still land.
        let items = vec![
            ("wm_a.jpg".to_string(), vec![1u8]),
            ("missing/wm_b.jpg".to_string(), vec![2u8]),
            ("wm_c.jpg".to_string(), vec![3u8]),
        ];
        let outcomes = write_all(dir.path(), &items);
        assert_eq!(outcomes[0], SaveOutcome::Saved);
        assert!(matches!(outcomes[1], SaveOutcome::Failed(_)));
        assert_eq!(outcomes[2], SaveOutcome::Saved);
    }

    #[test]
    fn fallback_reports_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the export dir should be makes create_dir_all fail.
        let blocked = dir.path().join("taken");
        std::fs::write(&blocked, b"occupied").unwrap();
        let saver = FallbackSaver::new(blocked, Duration::ZERO);
        assert!(matches!(
            saver.save_one("wm_x.jpg", b"y"),
            SaveOutcome::Failed(_)
        ));
    }
}
