//! 模块配置管理
//!
//! 基础配置从环境变量读取, 再由商店选项覆盖, 支持以下变量:
//!
//! | 变量 | 默认值 | 说明 |
//! |------|--------|------|
//! | `GTM_CONTAINER_ID` | - | Google Tag Manager 容器 ID (GTM-XXXXXX) |
//! | `GTM_SANDBOX` | `true` | 开发模式下是否继续输出数据 |
//! | `ENVIRONMENT` | `development` | 运行环境 (development/production) |

use std::collections::HashMap;
use std::env;

use thiserror::Error;

/// Option key for the container id in the host configuration store.
pub const CONTAINER_ID_KEY: &str = "GTM_ID";

/// Option key for the sandbox flag. Doubles as the request parameter
/// name that switches sandbox mode on for a single request.
pub const SANDBOX_KEY: &str = "SANDBOX";

const MAX_CONTAINER_ID_LEN: usize = 14;

/// 模块运行配置
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    /// Tag container id. `None` disables rendering entirely.
    pub container_id: Option<String>,
    /// Keep emitting data while the shop runs in development mode.
    pub sandbox: bool,
    /// development / production
    pub environment: String,
}

impl ModuleConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            container_id: env::var("GTM_CONTAINER_ID").ok().filter(|v| !v.is_empty()),
            sandbox: env::var("GTM_SANDBOX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// 从商店选项加载配置, 选项值优先于环境变量
    pub fn from_options(options: &dyn OptionsStore) -> Self {
        let mut config = Self::from_env();
        if let Some(id) = options.option(CONTAINER_ID_KEY)
            && !id.is_empty()
        {
            config.container_id = Some(id);
        }
        if let Some(flag) = options.option(SANDBOX_KEY) {
            config.sandbox = option_flag(&flag);
        }
        config
    }

    /// 使用显式值覆盖配置 (测试用)
    pub fn with_overrides(container_id: Option<&str>, sandbox: bool, environment: &str) -> Self {
        Self {
            container_id: container_id.map(str::to_string),
            sandbox,
            environment: environment.to_string(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Host configuration KV the module owns its options in.
pub trait OptionsStore {
    fn option(&self, key: &str) -> Option<String>;
    fn set_option(&mut self, key: &str, value: &str);
    fn remove_option(&mut self, key: &str);
}

/// In-memory options store for tests and the demo.
#[derive(Debug, Clone, Default)]
pub struct MemoryOptions {
    values: HashMap<String, String>,
}

impl MemoryOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionsStore for MemoryOptions {
    fn option(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_option(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove_option(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    ContainerId,
    Bool,
}

/// One entry of the module options screen.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub key: &'static str,
    pub kind: OptionKind,
    pub required: bool,
    pub default: Option<&'static str>,
}

/// The options this module owns in the host configuration store.
pub const OPTIONS: [OptionSpec; 2] = [
    OptionSpec {
        key: CONTAINER_ID_KEY,
        kind: OptionKind::ContainerId,
        required: true,
        default: None,
    },
    OptionSpec {
        key: SANDBOX_KEY,
        kind: OptionKind::Bool,
        required: true,
        default: Some("1"),
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("required option {0} is missing")]
    MissingRequired(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Validate and persist the module options.
pub fn save_options(
    store: &mut dyn OptionsStore,
    container_id: &str,
    sandbox: bool,
) -> Result<(), OptionsError> {
    if container_id.is_empty() {
        return Err(OptionsError::MissingRequired(CONTAINER_ID_KEY));
    }
    validate_container_id(container_id)?;
    store.set_option(CONTAINER_ID_KEY, container_id);
    store.set_option(SANDBOX_KEY, if sandbox { "1" } else { "0" });
    Ok(())
}

/// Seed unset options with their defaults, then load the config.
pub fn load_options(store: &mut dyn OptionsStore) -> ModuleConfig {
    for spec in &OPTIONS {
        if let Some(default) = spec.default
            && store.option(spec.key).is_none()
        {
            store.set_option(spec.key, default);
        }
    }
    ModuleConfig::from_options(store)
}

/// Container ids look like `GTM-XXXXXX`: fixed prefix, uppercase
/// alphanumeric tail.
pub fn validate_container_id(value: &str) -> Result<(), OptionsError> {
    let invalid = |reason: &str| OptionsError::Invalid {
        key: CONTAINER_ID_KEY,
        reason: reason.to_string(),
    };

    if value.len() > MAX_CONTAINER_ID_LEN {
        return Err(invalid("too long"));
    }
    let Some(tail) = value.strip_prefix("GTM-") else {
        return Err(invalid("must start with GTM-"));
    };
    if tail.is_empty() {
        return Err(invalid("missing id after GTM-"));
    }
    if !tail.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
        return Err(invalid("id tail must be uppercase alphanumeric"));
    }
    Ok(())
}

/// Flags are stored as `1`/`0` by the options screen; accept `true` as
/// well for hand-written configuration.
fn option_flag(value: &str) -> bool {
    matches!(value, "1" | "true")
}
