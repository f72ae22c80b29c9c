use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub top_k: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: PathBuf::from("models/mobilenetv2.onnx"),
            labels_path: PathBuf::from("models/imagenet_classes.txt"),
            top_k: 5,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("CLASSIFIER_HOST").unwrap_or(defaults.host),
            port: parse_var("CLASSIFIER_PORT", defaults.port),
            model_path: path_var("CLASSIFIER_MODEL", defaults.model_path),
            labels_path: path_var("CLASSIFIER_LABELS", defaults.labels_path),
            top_k: parse_var("CLASSIFIER_TOP_K", defaults.top_k),
            max_upload_bytes: parse_var("CLASSIFIER_MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn path_var(name: &str, default: PathBuf) -> PathBuf {
    env::var_os(name).map(PathBuf::from).unwrap_or(default)
}
