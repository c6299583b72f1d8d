use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> u16;
    fn data_file(&self) -> PathBuf;
}
