//! # 示例应用程序
//!
//! 演示如何用组件宏声明 bean，并扫描命名空间创建应用上下文

use anyhow::Context;
use clap::Parser;
use di_abstractions::BeanFactory;
use di_impl::{ApplicationContext, CatalogTypeDiscovery};
use infrastructure_common::{load_toml_file, ContainerConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "minispring 示例应用")]
struct Args {
    /// 扫描的命名空间，覆盖配置文件中的设置
    #[arg(short, long)]
    namespace: Option<String>,

    /// 配置文件路径
    #[arg(short, long, default_value = "config/app.toml")]
    config: PathBuf,

    /// 日志级别，`RUST_LOG` 优先
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 配置文件结构
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppConfig {
    namespace: Option<String>,
    container: ContainerConfig,
}

impl AppConfig {
    fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!("配置文件 {} 不存在，使用默认配置", path.display());
            return Ok(Self::default());
        }
        load_toml_file(path).with_context(|| format!("加载配置文件失败: {}", path.display()))
    }
}

mod zoo {
    use component_macros::{lifecycle, Component};
    use std::sync::Arc;
    use tracing::info;

    /// 会叫的动物
    pub trait Animal: Send + Sync {
        fn sound(&self) -> &'static str;
    }

    #[derive(Debug, Default, Component)]
    #[component(name = "mydog")]
    #[implements(dyn Animal)]
    pub struct Dog;

    impl Animal for Dog {
        fn sound(&self) -> &'static str {
            "汪汪"
        }
    }

    #[derive(Debug, Default, Component)]
    #[component(lifecycle)]
    #[implements(dyn Animal)]
    pub struct Cat {
        #[autowired]
        dog: Option<Arc<Dog>>,
    }

    impl Animal for Cat {
        fn sound(&self) -> &'static str {
            "喵喵"
        }
    }

    #[lifecycle]
    impl Cat {
        #[post_construct]
        fn init(&self) {
            info!("cat {} {:?}", self.sound(), self.dog);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("启动 minispring 示例应用");

    let config = AppConfig::load(&args.config)?;
    let namespace = args
        .namespace
        .or(config.namespace)
        .unwrap_or_else(|| module_path!().to_string());

    let context =
        ApplicationContext::create_with_config(namespace, &CatalogTypeDiscovery, config.container)
            .await?;

    for name in context.bean_names() {
        info!("bean: {}", name);
    }
    for animal in context.get_beans::<dyn zoo::Animal>() {
        info!("动物叫声: {}", animal.sound());
    }

    info!("应用已退出");
    Ok(())
}
