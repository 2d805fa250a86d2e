use std::sync::OnceLock;
use tracing_subscriber::FmtSubscriber;

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        FmtSubscriber::builder()
            .with_env_filter("graphload=trace,mock_graph=debug")
            .init();
    });
}
