#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    ConfigReload,
    WatchFailed(String),
}
