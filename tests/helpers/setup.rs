use visit_reminder_api::Application;
use visit_reminder_infra::{setup_context, Config, VisitContext};

pub struct TestApp {
    pub ctx: VisitContext,
    pub address: String,
}

impl TestApp {
    pub fn ws_address(&self) -> String {
        format!("{}/api/v1/reminders/ws", self.address.replacen("http", "ws", 1))
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    spawn_app_with_config(|_| {}).await
}

pub async fn spawn_app_with_config<F: FnOnce(&mut Config)>(configure: F) -> TestApp {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port
    configure(&mut ctx.config);
    // The bus is sized from the config, so rebuild the context around it
    let ctx = VisitContext::new(ctx.repos, ctx.config, ctx.sys);

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp { ctx, address }
}
