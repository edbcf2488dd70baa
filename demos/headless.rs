use std::time::Duration;

use tokio::{task::LocalSet, time};
use toastkit::{
    Config, Host, Placement, Timeout, ToastId, ToastKind, ToastManager, ToastOptions, ToastView,
    Transition,
};

/// Prints what a real host would draw.
struct Console;

impl Host for Console {
    fn place_container(&mut self, placement: &Placement) {
        println!("container at {}", placement.position);
    }

    fn create(&mut self, view: &ToastView) {
        println!("[{}] {} ({})", view.id, view.message, view.kind);
    }

    fn update(&mut self, view: &ToastView) {
        println!("[{}] now: {} ({})", view.id, view.message, view.kind);
    }

    fn transition(&mut self, id: &ToastId, transition: Transition) {
        println!("[{}] {:?}", id, transition);
    }

    fn remove(&mut self, id: &ToastId) {
        println!("[{}] removed", id);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    LocalSet::new().block_on(&runtime, async {
        let config = Config::from_toml_str(
            r#"
            position = "bottom-right"
            duration = 1500
            max-toasts = 4
            "#,
        )
        .unwrap();
        let toasts = ToastManager::new(Console, config);

        for i in 1..5 {
            toasts.info(
                &format!("Just kidding, this is just the toast example {}.", i),
                &ToastOptions::new(),
            );
        }
        // evicts the first example
        let upload = toasts.loading(
            "Uploading 3 files",
            ToastOptions::new().timeout(Timeout::Never),
        );

        time::sleep(Duration::from_millis(500)).await;
        toasts.update(
            &upload,
            "Upload finished",
            ToastOptions::new().kind(ToastKind::Success),
        );
        toasts.pause_all();
        time::sleep(Duration::from_millis(500)).await;
        toasts.resume_all();

        time::sleep(Duration::from_secs(2)).await;
        toasts.close_all().await;
    });
}
