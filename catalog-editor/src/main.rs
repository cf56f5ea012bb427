use anyhow::bail;
use catalog_editor::catalog_client::ConnectivityFlag;
use catalog_editor::core::{
    AutoConfirm, Collaborators, FormState, NotificationLog, Outcome, ProjectionKind,
    SyncController,
};
use catalog_editor::setup_environment;
use std::rc::Rc;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let (config, _log_guard) = setup_environment();

    tracing::info!(api_url = %config.api_url, "Catalog editor starting...");

    // 2. 初始化客户端
    let connectivity = ConnectivityFlag::default();
    let client = config
        .client_config()
        .build_http_client()?
        .with_connectivity(Arc::new(connectivity.clone()));

    // 3. Headless collaborators; deletes are never confirmed here
    let controller = SyncController::new(
        Arc::new(client),
        Collaborators {
            notifier: Rc::new(NotificationLog::new()),
            editor: Rc::new(FormState::new()),
            confirmer: Rc::new(AutoConfirm(false)),
        },
        config.page_size,
    )
    .with_connectivity(connectivity);

    // 4. 加载列表
    match controller.list().await {
        Outcome::Committed(count) => tracing::info!(count, "Catalog loaded"),
        Outcome::Failed(err) => {
            println!("{}", controller.render_html(ProjectionKind::Cards));
            bail!("failed to load catalog: {}", err);
        }
        Outcome::Cancelled | Outcome::Busy => bail!("catalog listing did not run"),
    }

    for kind in [ProjectionKind::Cards, ProjectionKind::Table] {
        println!("<!-- {:?} -->", kind);
        println!("{}", controller.render_html(kind));
    }

    Ok(())
}
