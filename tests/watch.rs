use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use profile_seeder::config::Settings;
use profile_seeder::watch::WatchLoop;
use tempfile::TempDir;
use tokio::sync::oneshot;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn new_profile_folder_is_seeded() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("userdata");
    let userfolder = root.join("u1");
    fs::create_dir_all(userfolder.join("220")).unwrap();
    fs::create_dir_all(userfolder.join("730")).unwrap();
    fs::write(userfolder.join("220").join("cfg.txt"), "fps_max 300").unwrap();

    let settings = Settings::parse(&format!(
        "[DEFAULT]\npath = \"{}\"\nuserfolder = u1\ngame_ids = \"220,730\"\n",
        root.display()
    ))
    .unwrap();

    let watch = Arc::new(WatchLoop::new(Arc::new(settings)));
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = {
        let watch = Arc::clone(&watch);
        tokio::spawn(async move {
            watch
                .run_until(async move {
                    let _ = stop_rx.await;
                })
                .await
        })
    };

    // Give the watcher time to register
    tokio::time::sleep(Duration::from_millis(500)).await;

    let profile = root.join("76561198000000000");
    fs::create_dir(&profile).unwrap();

    let seeded = profile.join("220").join("cfg.txt");
    let deadline = Instant::now() + Duration::from_secs(10);
    while !(seeded.exists() && profile.join("730").is_dir()) && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();

    assert_eq!(fs::read_to_string(&seeded).unwrap(), "fps_max 300");
    assert_eq!(fs::read_dir(profile.join("730")).unwrap().count(), 0);
}
